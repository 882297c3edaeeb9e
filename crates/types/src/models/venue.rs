//! Venue listing model

use serde::{Deserialize, Serialize};

/// Availability of a venue in the `/api/aggregators` listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VenueStatus {
	/// Registered and queried on every request
	Active,
	/// Configured but disabled
	Pending,
}

/// Public description of a venue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueInfo {
	pub name: String,
	pub status: VenueStatus,
	pub priority: u32,
}

impl VenueInfo {
	pub fn new(name: impl Into<String>, status: VenueStatus, priority: u32) -> Self {
		Self {
			name: name.into(),
			status,
			priority,
		}
	}
}
