//! Ordered set of venue adapters queried on every request

use std::sync::Arc;

use purple_types::{VenueAdapter, VenueConfig, VenueError};
use thiserror::Error;
use tracing::{debug, info};

use crate::AdapterFactory;

/// Errors raised while assembling the registry at startup
#[derive(Error, Debug)]
pub enum RegistryError {
	#[error("Venue '{name}' is already registered")]
	DuplicateVenue { name: String },

	#[error("Failed to initialize venue '{name}': {source}")]
	Initialization {
		name: String,
		#[source]
		source: VenueError,
	},
}

/// Registered venue adapters in registration order
///
/// Names are unique and case-sensitive. Registration order is the order in
/// which results are reported and the tie-break order for equal outputs.
#[derive(Debug, Default, Clone)]
pub struct AdapterRegistry {
	adapters: Vec<Arc<dyn VenueAdapter>>,
}

impl AdapterRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Build adapters for every enabled venue, in configuration order
	pub fn from_configs(configs: &[VenueConfig]) -> Result<Self, RegistryError> {
		let mut registry = Self::new();
		for config in configs {
			if !config.enabled {
				debug!("Skipping disabled venue '{}'", config.name);
				continue;
			}

			let adapter =
				AdapterFactory::create(config).map_err(|source| RegistryError::Initialization {
					name: config.name.clone(),
					source,
				})?;
			registry.register(adapter)?;
		}

		info!("Registered {} venue adapters: {:?}", registry.len(), registry.names());
		Ok(registry)
	}

	pub fn register(&mut self, adapter: Arc<dyn VenueAdapter>) -> Result<(), RegistryError> {
		if self.get(adapter.name()).is_some() {
			return Err(RegistryError::DuplicateVenue {
				name: adapter.name().to_string(),
			});
		}
		self.adapters.push(adapter);
		Ok(())
	}

	pub fn get(&self, name: &str) -> Option<&Arc<dyn VenueAdapter>> {
		self.adapters.iter().find(|a| a.name() == name)
	}

	pub fn adapters(&self) -> &[Arc<dyn VenueAdapter>] {
		&self.adapters
	}

	pub fn names(&self) -> Vec<&str> {
		self.adapters.iter().map(|a| a.name()).collect()
	}

	pub fn len(&self) -> usize {
		self.adapters.len()
	}

	pub fn is_empty(&self) -> bool {
		self.adapters.is_empty()
	}
}
