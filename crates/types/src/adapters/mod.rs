//! Venue adapter contract: trait, errors and configuration

pub mod config;
pub mod errors;
pub mod traits;

pub use config::{VenueConfig, VenueType};
pub use errors::VenueError;
pub use traits::VenueAdapter;

/// Result type for venue adapter operations
pub type VenueResult<T> = Result<T, VenueError>;
