//! Shared domain models

pub mod secret_string;
pub mod venue;

pub use secret_string::SecretString;
pub use venue::{VenueInfo, VenueStatus};
