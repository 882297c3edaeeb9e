//! Aggregated quote response models for the API layer

use serde::Serialize;

use super::AdapterResult;

/// Winning venue quote plus how it compares to the rest
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BestQuoteSelection {
	/// Result with the highest output amount
	pub chosen: AdapterResult,
	/// Integer percentage by which the chosen output beats the worst successful one
	pub savings_percent: i64,
	/// Number of successful quotes that were ranked
	pub compared_against: usize,
}

/// Response of a quote aggregation
///
/// `all_quotes` always holds one entry per registered venue, so a total
/// failure is still reported venue by venue with `best_quote: null`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotesResponse {
	pub best_quote: Option<BestQuoteSelection>,
	pub all_quotes: Vec<AdapterResult>,
	/// Whether the venue results were served from the short-lived cache
	pub cached: bool,
	/// Unix timestamp in milliseconds
	pub timestamp: i64,
}

impl QuotesResponse {
	pub fn new(
		best_quote: Option<BestQuoteSelection>,
		all_quotes: Vec<AdapterResult>,
		cached: bool,
	) -> Self {
		Self {
			best_quote,
			all_quotes,
			cached,
			timestamp: chrono::Utc::now().timestamp_millis(),
		}
	}

	/// Number of venues that returned a quote
	pub fn successful_quotes(&self) -> usize {
		self.all_quotes.iter().filter(|r| r.is_success()).count()
	}
}
