//! Purple Aggregator Library
//!
//! Best-price swap quote aggregation: fans a quote request out to every
//! configured DEX aggregator venue and returns the highest output.

// Core domain types - the most commonly used types
pub use purple_types::{
	chrono,
	// External dependencies for convenience
	serde_json,
	AdapterResult,
	Amount,
	BestQuoteSelection,
	NormalizedQuote,
	QuoteParams,
	QuoteRequest,
	QuotesResponse,
	VenueAdapter,
	VenueConfig,
	VenueError,
	VenueFailure,
	VenueInfo,
	VenueType,
};

// Service layer
pub use purple_service::{AggregatorError, AggregatorService, AggregatorTrait, QuoteCache};

// API layer
pub use purple_api::{create_router, AppState};

// Adapters
pub use purple_adapters::{AdapterRegistry, MockVenueAdapter, RegistryError};

// Config
pub use purple_config::{load_config, log_service_info, log_startup_complete, Settings};

pub mod models {
	pub use purple_types::*;
}

pub mod config {
	pub use purple_config::*;
}

pub mod adapters {
	pub use purple_adapters::*;
}

pub mod api {
	pub use purple_api::*;
}

pub mod service {
	pub use purple_service::*;
}

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use purple_config::{log_service_shutdown, log_venue_settings};
use tracing::{info, warn};

// Re-export external dependencies for downstream adapters
pub use async_trait;
pub use reqwest;

/// Builder pattern for configuring the aggregator
#[derive(Default)]
pub struct AggregatorBuilder {
	settings: Option<Settings>,
	adapters: Vec<Arc<dyn VenueAdapter>>,
}

impl AggregatorBuilder {
	/// Create a new aggregator builder with default settings
	pub fn new() -> Self {
		Self::default()
	}

	/// Create aggregator builder from configuration
	pub fn from_config(settings: Settings) -> Self {
		Self::new().with_settings(settings)
	}

	/// Register a custom adapter, queried after the configured venues
	///
	/// Duplicate names are reported by `start()`.
	pub fn with_adapter(mut self, adapter: Arc<dyn VenueAdapter>) -> Self {
		self.adapters.push(adapter);
		self
	}

	/// Set custom settings
	pub fn with_settings(mut self, settings: Settings) -> Self {
		self.settings = Some(settings);
		self
	}

	/// Get the current settings
	pub fn settings(&self) -> Option<&Settings> {
		self.settings.as_ref()
	}

	/// Initialize tracing with configuration-based settings
	fn init_tracing_from_settings(
		&self,
		settings: &Settings,
	) -> Result<(), Box<dyn std::error::Error>> {
		use purple_config::LogFormat;

		// Create env filter using config level or environment variable
		let log_level = &settings.logging.level;
		let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
			.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

		match settings.logging.format {
			LogFormat::Json => {
				let subscriber = tracing_subscriber::fmt().json().with_env_filter(env_filter);

				if settings.logging.structured {
					subscriber.with_target(true).with_thread_ids(true).try_init().map_err(|e| -> Box<dyn std::error::Error> { e })?;
				} else {
					subscriber.try_init().map_err(|e| -> Box<dyn std::error::Error> { e })?;
				}
			},
			LogFormat::Pretty => {
				let subscriber = tracing_subscriber::fmt()
					.pretty()
					.with_env_filter(env_filter);

				if settings.logging.structured {
					subscriber.with_target(true).with_thread_ids(true).try_init().map_err(|e| -> Box<dyn std::error::Error> { e })?;
				} else {
					subscriber.try_init().map_err(|e| -> Box<dyn std::error::Error> { e })?;
				}
			},
			LogFormat::Compact => {
				let subscriber = tracing_subscriber::fmt()
					.compact()
					.with_env_filter(env_filter);

				if settings.logging.structured {
					subscriber.with_target(true).with_thread_ids(true).try_init().map_err(|e| -> Box<dyn std::error::Error> { e })?;
				} else {
					subscriber.try_init().map_err(|e| -> Box<dyn std::error::Error> { e })?;
				}
			},
		}

		info!(
			"Logging configuration applied: level={}, format={:?}, structured={}",
			settings.logging.level, settings.logging.format, settings.logging.structured
		);

		Ok(())
	}

	/// Build the adapter registry: configured venues first, then custom adapters
	fn build_registry(
		&self,
		venue_configs: &[VenueConfig],
	) -> Result<AdapterRegistry, RegistryError> {
		let mut registry = AdapterRegistry::from_configs(venue_configs)?;
		for adapter in &self.adapters {
			registry.register(Arc::clone(adapter))?;
		}
		Ok(registry)
	}

	/// Start the aggregator and return the configured router with state
	pub async fn start(self) -> Result<(axum::Router, AppState), Box<dyn std::error::Error>> {
		let settings = self.settings.clone().unwrap_or_default();
		settings
			.validate()
			.map_err(|e| format!("Invalid configuration: {}", e))?;

		let venue_configs = settings
			.venue_configs()
			.map_err(|e| format!("Failed to resolve venue configuration: {}", e))?;
		let registry = self.build_registry(&venue_configs)?;
		if registry.is_empty() {
			warn!("No venues registered; every quote request will return no quotes");
		}
		info!(
			"Successfully initialized with {} venue(s): {:?}",
			registry.len(),
			registry.names()
		);

		let cache = QuoteCache::new(
			Duration::from_millis(settings.cache.ttl_ms),
			settings.cache.max_entries,
		);
		let aggregator_service = AggregatorService::new(
			Arc::new(registry),
			settings.timeouts.per_venue_ms,
			Arc::new(cache),
		)
		.with_disabled_venues(&venue_configs);

		let app_state = AppState::new(Arc::new(aggregator_service) as Arc<dyn AggregatorTrait>);

		// Create router with state
		let router = create_router().with_state(app_state.clone());

		Ok((router, app_state))
	}

	/// Start the complete server with all defaults and setup
	///
	/// Loads `.env`, reads configuration (falling back to defaults),
	/// initializes tracing, then serves until Ctrl-C.
	pub async fn start_server(mut self) -> Result<(), Box<dyn std::error::Error>> {
		dotenvy::dotenv().ok();

		// Use provided settings or load from config with defaults
		let (settings, config_error) = match self.settings.take() {
			Some(settings) => (settings, None),
			None => match load_config() {
				Ok(settings) => (settings, None),
				Err(e) => (Settings::default(), Some(e)),
			},
		};

		self.init_tracing_from_settings(&settings)?;
		log_service_info();
		if let Some(e) = config_error {
			warn!("Failed to load configuration, using defaults: {}", e);
		}
		log_venue_settings(&settings);

		let bind_addr = settings.bind_address();
		let addr: SocketAddr = bind_addr
			.parse()
			.map_err(|e| format!("Invalid bind address '{}': {}", bind_addr, e))?;

		self.settings = Some(settings);
		let (app, _) = self.start().await?;

		let listener = tokio::net::TcpListener::bind(addr).await?;
		log_startup_complete(&bind_addr);

		axum::serve(listener, app)
			.with_graceful_shutdown(shutdown_signal())
			.await?;

		log_service_shutdown();
		Ok(())
	}
}

async fn shutdown_signal() {
	if let Err(e) = tokio::signal::ctrl_c().await {
		warn!("Failed to listen for shutdown signal: {}", e);
		std::future::pending::<()>().await;
	}
}
