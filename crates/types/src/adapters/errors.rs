//! Error types for venue adapter operations

use thiserror::Error;

use crate::quotes::FailureKind;

/// Failure reported by a venue adapter
///
/// Adapters return these instead of panicking; the aggregator converts each
/// one into a per-venue failure entry.
#[derive(Error, Debug)]
pub enum VenueError {
	#[error("Timeout occurred after {timeout_ms}ms")]
	Timeout { timeout_ms: u64 },

	#[error("{0}")]
	Venue(String),

	#[error("Invalid response format: {reason}")]
	MalformedResponse { reason: String },

	#[error("HTTP {status_code}: {reason}")]
	HttpStatus { status_code: u16, reason: String },

	#[error("HTTP request failed: {0}")]
	Http(#[from] reqwest::Error),

	#[error("Serialization error: {0}")]
	Serialization(#[from] serde_json::Error),

	#[error("Configuration error: {reason}")]
	Configuration { reason: String },
}

impl VenueError {
	/// Failure category reported to API clients
	pub fn failure_kind(&self) -> FailureKind {
		match self {
			VenueError::Timeout { .. } => FailureKind::Timeout,
			VenueError::Http(e) if e.is_timeout() => FailureKind::Timeout,
			VenueError::MalformedResponse { .. } | VenueError::Serialization(_) => {
				FailureKind::MalformedResponse
			},
			VenueError::Http(e) if e.is_decode() => FailureKind::MalformedResponse,
			_ => FailureKind::VenueError,
		}
	}

	/// Extract HTTP status code from the error if available
	pub fn status_code(&self) -> Option<u16> {
		match self {
			VenueError::HttpStatus { status_code, .. } => Some(*status_code),
			VenueError::Http(reqwest_error) => reqwest_error.status().map(|s| s.as_u16()),
			_ => None,
		}
	}

	/// Create an HTTP failure error from response status with default reason
	pub fn from_http_failure(status_code: u16) -> Self {
		let reason = match status_code {
			400 => "Bad Request".to_string(),
			401 => "Unauthorized".to_string(),
			403 => "Forbidden".to_string(),
			404 => "Not Found".to_string(),
			408 => "Request Timeout".to_string(),
			429 => "Too Many Requests".to_string(),
			500 => "Internal Server Error".to_string(),
			502 => "Bad Gateway".to_string(),
			503 => "Service Unavailable".to_string(),
			504 => "Gateway Timeout".to_string(),
			_ => format!("HTTP Error {}", status_code),
		};

		Self::HttpStatus {
			status_code,
			reason,
		}
	}
}
