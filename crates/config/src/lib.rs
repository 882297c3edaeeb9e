//! Purple Configuration
//!
//! Settings, configuration loading and startup logging for the Purple quote
//! aggregator.

pub mod configurable_value;
pub mod loader;
pub mod settings;
pub mod startup_logger;

pub use configurable_value::{ConfigurableValue, ConfigurableValueError, ValueType};
pub use loader::{load_config, load_config_from, ConfigLoadError};
pub use settings::{
	CacheSettings, ConfigValidationError, LogFormat, LoggingSettings, ServerSettings, Settings,
	TimeoutSettings, VenueSettings,
};
pub use startup_logger::{
	log_service_info, log_service_shutdown, log_startup_complete, log_venue_settings,
};
