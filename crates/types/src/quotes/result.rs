//! Per-venue outcome of a quote fan-out

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use super::NormalizedQuote;
use crate::adapters::VenueError;
use crate::Amount;

/// Category of a venue failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
	/// No response within the per-venue deadline
	Timeout,
	/// The venue answered with an error (no liquidity, bad pair, HTTP error...)
	VenueError,
	/// The venue answered but the response could not be normalized
	MalformedResponse,
	/// The adapter task itself failed (panic or cancellation)
	Internal,
}

/// Why a venue produced no quote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueFailure {
	pub kind: FailureKind,
	pub reason: String,
}

impl VenueFailure {
	pub fn new(kind: FailureKind, reason: impl Into<String>) -> Self {
		Self {
			kind,
			reason: reason.into(),
		}
	}

	pub fn timeout(timeout_ms: u64) -> Self {
		Self::new(
			FailureKind::Timeout,
			format!("Timeout occurred after {}ms", timeout_ms),
		)
	}

	pub fn internal(reason: impl Into<String>) -> Self {
		Self::new(FailureKind::Internal, reason)
	}
}

impl From<&VenueError> for VenueFailure {
	fn from(error: &VenueError) -> Self {
		Self::new(error.failure_kind(), error.to_string())
	}
}

impl From<VenueError> for VenueFailure {
	fn from(error: VenueError) -> Self {
		Self::from(&error)
	}
}

/// Success or failure of a single venue call
#[derive(Debug, Clone, PartialEq)]
pub enum AdapterOutcome {
	Success(NormalizedQuote),
	Failure(VenueFailure),
}

/// One venue's contribution to an aggregated response
#[derive(Debug, Clone, PartialEq)]
pub struct AdapterResult {
	pub venue_name: String,
	pub outcome: AdapterOutcome,
	pub elapsed_millis: u64,
}

impl AdapterResult {
	pub fn success(venue_name: impl Into<String>, quote: NormalizedQuote, elapsed_millis: u64) -> Self {
		Self {
			venue_name: venue_name.into(),
			outcome: AdapterOutcome::Success(quote),
			elapsed_millis,
		}
	}

	pub fn failure(
		venue_name: impl Into<String>,
		failure: VenueFailure,
		elapsed_millis: u64,
	) -> Self {
		Self {
			venue_name: venue_name.into(),
			outcome: AdapterOutcome::Failure(failure),
			elapsed_millis,
		}
	}

	pub fn is_success(&self) -> bool {
		matches!(self.outcome, AdapterOutcome::Success(_))
	}

	pub fn quote(&self) -> Option<&NormalizedQuote> {
		match &self.outcome {
			AdapterOutcome::Success(quote) => Some(quote),
			AdapterOutcome::Failure(_) => None,
		}
	}

	pub fn quote_mut(&mut self) -> Option<&mut NormalizedQuote> {
		match &mut self.outcome {
			AdapterOutcome::Success(quote) => Some(quote),
			AdapterOutcome::Failure(_) => None,
		}
	}

	pub fn failure_reason(&self) -> Option<&VenueFailure> {
		match &self.outcome {
			AdapterOutcome::Success(_) => None,
			AdapterOutcome::Failure(failure) => Some(failure),
		}
	}

	pub fn output_amount(&self) -> Option<&Amount> {
		self.quote().map(|q| &q.output_amount)
	}
}

// Flattened as `{venueName, success, quote | error, elapsedMillis}` for API clients
impl Serialize for AdapterResult {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		let mut state = serializer.serialize_struct("AdapterResult", 4)?;
		state.serialize_field("venueName", &self.venue_name)?;
		match &self.outcome {
			AdapterOutcome::Success(quote) => {
				state.serialize_field("success", &true)?;
				state.serialize_field("quote", quote)?;
			},
			AdapterOutcome::Failure(failure) => {
				state.serialize_field("success", &false)?;
				state.serialize_field("error", failure)?;
			},
		}
		state.serialize_field("elapsedMillis", &self.elapsed_millis)?;
		state.end()
	}
}
