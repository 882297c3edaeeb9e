//! Core venue adapter trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::VenueResult;
use crate::quotes::{NormalizedQuote, QuoteRequest};

/// A quoting venue the aggregator can fan out to
///
/// Implementations translate the request into the venue's own API, call it,
/// and map the answer onto [`NormalizedQuote`]. Transport and parse problems
/// must come back as `Err(VenueError)`, never as a panic.
#[async_trait]
pub trait VenueAdapter: Send + Sync + Debug {
	/// Unique, human-readable venue name (e.g. "KyberSwap")
	fn name(&self) -> &str;

	/// Fetch and normalize a quote for the request
	async fn quote(&self, request: &QuoteRequest) -> VenueResult<NormalizedQuote>;

	/// Per-venue deadline overriding the aggregator default
	fn timeout_ms(&self) -> Option<u64> {
		None
	}
}
