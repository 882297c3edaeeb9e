//! Test server for integration tests

use std::sync::Arc;

use axum::Router;
use purple_aggregator::{AggregatorBuilder, MockVenueAdapter, Settings, VenueAdapter};
use tokio::task::JoinHandle;

use super::adapters::TimingAdapters;
use super::configs::MockConfigs;

/// Test server instance bound to an ephemeral local port
pub struct TestServer {
	pub base_url: String,
	pub handle: JoinHandle<()>,
}

#[allow(dead_code)]
impl TestServer {
	/// Spawn a test server with two fixed-output mock venues
	pub async fn spawn() -> Result<Self, Box<dyn std::error::Error>> {
		Self::spawn_with_adapters(
			MockConfigs::test_settings(),
			vec![
				Arc::new(MockVenueAdapter::fixed("alpha", 1_000u64)),
				Arc::new(MockVenueAdapter::fixed("beta", 1_200u64)),
			],
		)
		.await
	}

	/// Spawn a test server with no venues at all
	pub async fn spawn_minimal() -> Result<Self, Box<dyn std::error::Error>> {
		Self::spawn_with_adapters(MockConfigs::test_settings(), Vec::new()).await
	}

	/// Spawn a test server with the four timing-controlled venues
	pub async fn spawn_with_timing_adapters(
	) -> Result<(Self, TimingAdapters), Box<dyn std::error::Error>> {
		let adapters = TimingAdapters::new();
		let server =
			Self::spawn_with_adapters(MockConfigs::test_settings(), adapters.all()).await?;
		Ok((server, adapters))
	}

	pub async fn spawn_with_adapters(
		settings: Settings,
		adapters: Vec<Arc<dyn VenueAdapter>>,
	) -> Result<Self, Box<dyn std::error::Error>> {
		let builder = adapters
			.into_iter()
			.fold(AggregatorBuilder::from_config(settings), |builder, adapter| {
				builder.with_adapter(adapter)
			});
		let (app, _state) = builder.start().await?;

		Self::spawn_server_with_app(app).await
	}

	/// Common server spawning logic
	async fn spawn_server_with_app(app: Router) -> Result<Self, Box<dyn std::error::Error>> {
		let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
		let addr = listener.local_addr()?;
		let base_url = format!("http://{}:{}", addr.ip(), addr.port());

		let handle = tokio::spawn(async move {
			let _ = axum::serve(listener, app).await;
		});

		// Give server time to start
		tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;

		Ok(Self { base_url, handle })
	}

	pub fn url(&self, path: &str) -> String {
		format!("{}{}", self.base_url, path)
	}

	pub fn abort(self) {
		self.handle.abort();
	}
}
