//! Purple Types
//!
//! Shared models and traits for the Purple quote aggregator: base-unit
//! amounts, the venue adapter contract and the normalized quote schema.

pub mod adapters;
pub mod amount;
pub mod constants;
pub mod models;
pub mod quotes;

// Re-export chrono and serde_json for convenience
pub use chrono;
pub use serde_json;

pub use adapters::{VenueAdapter, VenueConfig, VenueError, VenueResult, VenueType};
pub use amount::{Amount, AmountParseError};
pub use models::{SecretString, VenueInfo, VenueStatus};
pub use quotes::{
	bps_to_percent, percent_to_bps, AdapterOutcome, AdapterResult, BestQuoteSelection,
	ExecutionPayload, FailureKind, MinOutputSource, NormalizedQuote, QuoteParams, QuoteRequest,
	QuoteValidationError, QuoteValidationResult, QuotesResponse, VenueFailure,
};
