//! Builds venue adapters from configuration

use std::sync::Arc;

use purple_types::{VenueAdapter, VenueConfig, VenueResult, VenueType};

use crate::{KyberSwapAdapter, MaceAdapter, MockVenueAdapter, OpenOceanAdapter, ZeroXAdapter};

/// Factory for creating venue adapters
pub struct AdapterFactory;

impl AdapterFactory {
	/// Create the adapter matching the configured venue type
	pub fn create(config: &VenueConfig) -> VenueResult<Arc<dyn VenueAdapter>> {
		let adapter: Arc<dyn VenueAdapter> = match config.venue_type {
			VenueType::KyberSwap => Arc::new(KyberSwapAdapter::new(config)?),
			VenueType::ZeroX => Arc::new(ZeroXAdapter::new(config)?),
			VenueType::OpenOcean => Arc::new(OpenOceanAdapter::new(config)?),
			VenueType::Mace => Arc::new(MaceAdapter::new(config)?),
			VenueType::Mock => Arc::new(MockVenueAdapter::from_config(config)),
		};
		Ok(adapter)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_create_uses_configured_name() {
		for (name, venue_type) in [
			("KyberSwap", VenueType::KyberSwap),
			("0x", VenueType::ZeroX),
			("OpenOcean", VenueType::OpenOcean),
			("Mace", VenueType::Mace),
			("Local", VenueType::Mock),
		] {
			let adapter = AdapterFactory::create(&VenueConfig::new(name, venue_type)).unwrap();
			assert_eq!(adapter.name(), name);
		}
	}

	#[test]
	fn test_create_carries_timeout() {
		let mut config = VenueConfig::new("0x", VenueType::ZeroX);
		config.timeout_ms = Some(1_500);
		let adapter = AdapterFactory::create(&config).unwrap();
		assert_eq!(adapter.timeout_ms(), Some(1_500));
	}
}
