//! Purple Service
//!
//! Quote fan-out across venues, the short-lived result cache and best-quote
//! selection.

pub mod aggregator;
pub mod cache;
pub mod selector;

pub use aggregator::{AggregatorError, AggregatorService, AggregatorTrait};
pub use cache::{CacheEntry, CacheKey, QuoteCache};
pub use selector::select_best_quote;
