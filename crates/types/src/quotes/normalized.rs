//! Normalized quote: the common shape every venue response is mapped onto

use serde::{Deserialize, Serialize};

use crate::adapters::{VenueError, VenueResult};
use crate::Amount;

/// Which side produced `min_output_amount`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MinOutputSource {
	/// Supplied by the venue in its response
	Venue,
	/// Derived from the output amount and the request's slippage tolerance
	Slippage,
}

/// Directly executable transaction data returned by a venue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionPayload {
	/// Contract the transaction is sent to
	pub to: String,
	/// Opaque call data, hex encoded by the venue
	pub data: String,
	/// Native token value attached to the call, in base units
	pub value: Amount,
}

/// Venue quote in the engine's common schema
///
/// The engine compares `output_amount` and passes everything else through
/// untouched; `route` in particular is display-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedQuote {
	pub output_amount: Amount,
	pub min_output_amount: Amount,
	pub min_output_source: MinOutputSource,
	#[serde(default)]
	pub route: serde_json::Value,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub estimated_gas: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub execution_payload: Option<ExecutionPayload>,
}

impl NormalizedQuote {
	/// Quote whose minimum output is derived from the slippage tolerance
	pub fn from_output(output_amount: Amount, slippage_bps: u32) -> Self {
		let min_output_amount = output_amount.apply_slippage(slippage_bps);
		Self {
			output_amount,
			min_output_amount,
			min_output_source: MinOutputSource::Slippage,
			route: serde_json::Value::Null,
			estimated_gas: None,
			execution_payload: None,
		}
	}

	/// Quote using the venue's own minimum when it supplied one
	///
	/// A venue minimum above the output is clamped to the output.
	pub fn with_venue_min(
		output_amount: Amount,
		venue_min: Option<Amount>,
		slippage_bps: u32,
	) -> Self {
		match venue_min {
			Some(min) => Self {
				min_output_amount: min.min(output_amount.clone()),
				min_output_source: MinOutputSource::Venue,
				..Self::from_output(output_amount, slippage_bps)
			},
			None => Self::from_output(output_amount, slippage_bps),
		}
	}

	pub fn with_route(mut self, route: serde_json::Value) -> Self {
		self.route = route;
		self
	}

	pub fn with_estimated_gas(mut self, estimated_gas: Option<String>) -> Self {
		self.estimated_gas = estimated_gas;
		self
	}

	pub fn with_execution_payload(mut self, payload: Option<ExecutionPayload>) -> Self {
		self.execution_payload = payload;
		self
	}

	/// Recompute the minimum output for a different slippage tolerance
	pub fn rederive_min_output(&mut self, slippage_bps: u32) {
		self.min_output_amount = self.output_amount.apply_slippage(slippage_bps);
		self.min_output_source = MinOutputSource::Slippage;
	}

	/// Parse a required amount field out of a venue response
	///
	/// A missing or non-integer value means the venue response cannot be
	/// normalized, which is reported as a venue failure.
	pub fn parse_amount(field: &str, raw: Option<&str>) -> VenueResult<Amount> {
		let raw = raw.ok_or_else(|| VenueError::MalformedResponse {
			reason: format!("missing {}", field),
		})?;
		Amount::parse(raw).map_err(|e| VenueError::MalformedResponse {
			reason: format!("{}: {}", field, e),
		})
	}

	/// Parse an optional amount field; unparseable values are treated as absent
	pub fn parse_optional_amount(raw: Option<&str>) -> Option<Amount> {
		raw.and_then(|r| Amount::parse(r).ok())
	}
}
