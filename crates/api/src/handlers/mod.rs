pub mod common;
pub mod health;
pub mod quotes;
pub mod venues;

pub use health::health;
pub use quotes::get_quote;
pub use venues::get_aggregators;
