//! Configuration builders for tests

use purple_aggregator::config::{
	CacheSettings, LogFormat, LoggingSettings, ServerSettings, Settings, TimeoutSettings,
	VenueSettings,
};
use purple_aggregator::VenueType;

/// Configuration builders for tests
#[allow(dead_code)]
pub struct MockConfigs;

#[allow(dead_code)]
impl MockConfigs {
	/// Settings with no configured venues, so nothing reaches the network
	pub fn test_settings() -> Settings {
		Settings {
			server: ServerSettings {
				host: "127.0.0.1".to_string(),
				port: 3001,
			},
			timeouts: TimeoutSettings { per_venue_ms: 1000 },
			cache: CacheSettings {
				ttl_ms: 5000,
				max_entries: 100,
			},
			venues: Vec::new(),
			logging: LoggingSettings {
				level: "debug".to_string(),
				format: LogFormat::Compact,
				structured: false,
			},
		}
	}

	/// Test settings with the cache switched off
	pub fn test_settings_without_cache() -> Settings {
		let mut settings = Self::test_settings();
		settings.cache.ttl_ms = 0;
		settings
	}

	/// Test settings with configured mock venues, the last one disabled
	pub fn test_settings_with_mock_venues(names: &[&str]) -> Settings {
		let mut settings = Self::test_settings();
		settings.venues = names
			.iter()
			.map(|name| VenueSettings::new(*name, VenueType::Mock))
			.collect();
		if let Some(last) = settings.venues.last_mut() {
			last.enabled = false;
		}
		settings
	}
}
