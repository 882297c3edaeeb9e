//! Service startup logging for the Purple aggregator

use std::env;
use tracing::info;

use crate::Settings;

const SERVICE_NAME: &str = "purple-aggregator";

/// Logs service and environment information at startup
pub fn log_service_info() {
	info!("=== Purple Aggregator Starting ===");
	info!("🚀 Service: {} v{}", SERVICE_NAME, env!("CARGO_PKG_VERSION"));
	info!("💻 Platform: {} ({})", env::consts::OS, env::consts::ARCH);

	if let Ok(cwd) = env::current_dir() {
		info!("📁 Working Directory: {}", cwd.display());
	}

	if let Ok(rust_log) = env::var("RUST_LOG") {
		info!("🔧 Log Level: {}", rust_log);
	}

	info!(
		"🕒 Started at: {}",
		chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
	);
}

/// Logs the venue line-up and cache policy taken from the settings
pub fn log_venue_settings(settings: &Settings) {
	info!(
		"Per-venue timeout: {}ms, cache: ttl={}ms max_entries={}",
		settings.timeouts.per_venue_ms, settings.cache.ttl_ms, settings.cache.max_entries
	);
	for venue in &settings.venues {
		let key = venue
			.api_key
			.as_ref()
			.map(|k| k.description())
			.unwrap_or_else(|| "none".to_string());
		info!(
			"  - {} [{:?}] {} (timeout: {}ms, api key: {})",
			venue.name,
			venue.venue_type,
			if venue.enabled { "enabled" } else { "pending" },
			venue.timeout_ms.unwrap_or(settings.timeouts.per_venue_ms),
			key
		);
	}
}

/// Logs startup completion and the served endpoints
pub fn log_startup_complete(bind_address: &str) {
	info!("✅ Purple Aggregator Started Successfully");
	info!("🌐 Server listening on: {}", bind_address);
	info!("API endpoints available:");
	info!("  GET  /health");
	info!("  GET  /api/quote");
	info!("  GET  /api/aggregators");
}

pub fn log_service_shutdown() {
	info!("🛑 Purple Aggregator Shutting Down");
	info!(
		"🕒 Shutdown at: {}",
		chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
	);
}
