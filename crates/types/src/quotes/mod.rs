//! Quote request, normalized quote and aggregation result models

pub mod errors;
pub mod normalized;
pub mod request;
pub mod response;
pub mod result;

pub use errors::QuoteValidationError;
pub use normalized::{ExecutionPayload, MinOutputSource, NormalizedQuote};
pub use request::{bps_to_percent, percent_to_bps, QuoteParams, QuoteRequest};
pub use response::{BestQuoteSelection, QuotesResponse};
pub use result::{AdapterOutcome, AdapterResult, FailureKind, VenueFailure};

/// Result type for quote validation operations
pub type QuoteValidationResult<T> = Result<T, QuoteValidationError>;
