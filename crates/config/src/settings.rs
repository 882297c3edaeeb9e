//! Configuration settings structures

use std::collections::HashSet;

use crate::{configurable_value::ConfigurableValue, ConfigurableValueError};
use purple_types::constants::limits::{
	DEFAULT_CACHE_MAX_ENTRIES, DEFAULT_CACHE_TTL_MS, DEFAULT_VENUE_TIMEOUT_MS,
	MAX_VENUE_TIMEOUT_MS, MIN_VENUE_TIMEOUT_MS,
};
use purple_types::{VenueConfig, VenueType};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main application settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Settings {
	#[serde(default)]
	pub server: ServerSettings,
	#[serde(default)]
	pub timeouts: TimeoutSettings,
	#[serde(default)]
	pub cache: CacheSettings,
	#[serde(default = "default_venues")]
	pub venues: Vec<VenueSettings>,
	#[serde(default)]
	pub logging: LoggingSettings,
}

/// Server configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerSettings {
	pub host: String,
	pub port: u16,
}

impl Default for ServerSettings {
	fn default() -> Self {
		Self {
			host: "0.0.0.0".to_string(),
			port: 3001,
		}
	}
}

/// Timeout configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TimeoutSettings {
	/// Deadline for a single venue call unless the venue sets its own
	pub per_venue_ms: u64,
}

impl Default for TimeoutSettings {
	fn default() -> Self {
		Self {
			per_venue_ms: DEFAULT_VENUE_TIMEOUT_MS,
		}
	}
}

/// Result cache configuration; `ttl_ms = 0` disables caching
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CacheSettings {
	pub ttl_ms: u64,
	pub max_entries: usize,
}

impl Default for CacheSettings {
	fn default() -> Self {
		Self {
			ttl_ms: DEFAULT_CACHE_TTL_MS,
			max_entries: DEFAULT_CACHE_MAX_ENTRIES,
		}
	}
}

/// Individual venue configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct VenueSettings {
	pub name: String,
	pub venue_type: VenueType,
	#[serde(default = "default_enabled")]
	pub enabled: bool,
	#[serde(default)]
	pub base_url: Option<String>,
	#[serde(default)]
	pub chain: Option<String>,
	#[serde(default)]
	pub timeout_ms: Option<u64>,
	#[serde(default)]
	pub api_key: Option<ConfigurableValue>,
	#[serde(default)]
	pub wrapped_native: Option<String>,
	/// Listing priority while the venue is disabled
	#[serde(default)]
	pub priority: Option<u32>,
	/// Token decimals for venues that work in whole tokens (OpenOcean, Mace)
	#[serde(default)]
	pub input_decimals: Option<u32>,
	#[serde(default)]
	pub output_decimals: Option<u32>,
}

fn default_enabled() -> bool {
	true
}

impl VenueSettings {
	pub fn new(name: impl Into<String>, venue_type: VenueType) -> Self {
		Self {
			name: name.into(),
			venue_type,
			enabled: true,
			base_url: None,
			chain: None,
			timeout_ms: None,
			api_key: None,
			wrapped_native: None,
			priority: None,
			input_decimals: None,
			output_decimals: None,
		}
	}
}

/// Convert from settings VenueSettings to domain VenueConfig, resolving the API key
impl TryFrom<VenueSettings> for VenueConfig {
	type Error = ConfigurableValueError;

	fn try_from(settings: VenueSettings) -> Result<Self, Self::Error> {
		let api_key = settings
			.api_key
			.as_ref()
			.map(ConfigurableValue::resolve)
			.transpose()?;

		Ok(Self {
			name: settings.name,
			venue_type: settings.venue_type,
			enabled: settings.enabled,
			base_url: settings.base_url,
			chain: settings.chain,
			timeout_ms: settings.timeout_ms,
			api_key,
			wrapped_native: settings.wrapped_native,
			priority: settings.priority,
			input_decimals: settings.input_decimals,
			output_decimals: settings.output_decimals,
		})
	}
}

/// Logging configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoggingSettings {
	pub level: String,
	pub format: LogFormat,
	pub structured: bool,
}

impl Default for LoggingSettings {
	fn default() -> Self {
		Self {
			level: "info".to_string(),
			format: LogFormat::Pretty,
			structured: false,
		}
	}
}

/// Log format options
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
	Json,
	Pretty,
	Compact,
}

/// Venues queried when the configuration lists none
fn default_venues() -> Vec<VenueSettings> {
	vec![
		VenueSettings::new("OpenOcean", VenueType::OpenOcean),
		VenueSettings::new("KyberSwap", VenueType::KyberSwap),
		VenueSettings::new("0x", VenueType::ZeroX),
		VenueSettings {
			output_decimals: Some(6),
			..VenueSettings::new("Mace", VenueType::Mace)
		},
	]
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigValidationError {
	#[error("{field} must be between {min} and {max} ms, got {value}")]
	TimeoutOutOfRange {
		field: String,
		value: u64,
		min: u64,
		max: u64,
	},
	#[error("cache.max_entries must be greater than zero")]
	ZeroCacheCapacity,
	#[error("venue name must not be empty")]
	EmptyVenueName,
	#[error("venue '{0}' is configured more than once")]
	DuplicateVenue(String),
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			server: ServerSettings::default(),
			timeouts: TimeoutSettings::default(),
			cache: CacheSettings::default(),
			venues: default_venues(),
			logging: LoggingSettings::default(),
		}
	}
}

impl Settings {
	/// Get server bind address
	pub fn bind_address(&self) -> String {
		format!("{}:{}", self.server.host, self.server.port)
	}

	/// Get enabled venues only, in configuration order
	pub fn enabled_venues(&self) -> Vec<&VenueSettings> {
		self.venues.iter().filter(|v| v.enabled).collect()
	}

	/// Domain venue configs for every configured venue, enabled or not
	pub fn venue_configs(&self) -> Result<Vec<VenueConfig>, ConfigurableValueError> {
		self.venues.iter().cloned().map(VenueConfig::try_from).collect()
	}

	pub fn validate(&self) -> Result<(), ConfigValidationError> {
		check_timeout("timeouts.per_venue_ms", self.timeouts.per_venue_ms)?;

		if self.cache.max_entries == 0 {
			return Err(ConfigValidationError::ZeroCacheCapacity);
		}

		let mut seen = HashSet::new();
		for venue in &self.venues {
			if venue.name.trim().is_empty() {
				return Err(ConfigValidationError::EmptyVenueName);
			}
			if !seen.insert(venue.name.as_str()) {
				return Err(ConfigValidationError::DuplicateVenue(venue.name.clone()));
			}
			if let Some(timeout_ms) = venue.timeout_ms {
				check_timeout(&format!("venues.{}.timeout_ms", venue.name), timeout_ms)?;
			}
		}

		Ok(())
	}
}

fn check_timeout(field: &str, value: u64) -> Result<(), ConfigValidationError> {
	if (MIN_VENUE_TIMEOUT_MS..=MAX_VENUE_TIMEOUT_MS).contains(&value) {
		return Ok(());
	}
	Err(ConfigValidationError::TimeoutOutOfRange {
		field: field.to_string(),
		value,
		min: MIN_VENUE_TIMEOUT_MS,
		max: MAX_VENUE_TIMEOUT_MS,
	})
}
