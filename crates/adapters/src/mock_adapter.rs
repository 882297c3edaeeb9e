//! In-process venue used for local runs and tests
//!
//! Configured with `venue_type = "mock"`, it echoes the input amount back as
//! the output. Tests build it directly with a fixed output, a failure mode
//! and an artificial response delay.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use purple_types::serde_json::json;
use purple_types::{
	Amount, NormalizedQuote, QuoteRequest, VenueAdapter, VenueConfig, VenueError, VenueResult,
};
use tracing::debug;

/// What a mock venue answers with
#[derive(Debug, Clone, PartialEq)]
pub enum MockBehavior {
	/// Always quote this output amount
	Fixed(Amount),
	/// Quote the input amount one to one
	Echo,
	/// Fail with a venue error carrying this message
	Fail(String),
	/// Answer with a response that cannot be normalized
	Malformed,
}

/// Mock venue adapter with a call counter shared across clones
#[derive(Debug, Clone)]
pub struct MockVenueAdapter {
	name: String,
	behavior: MockBehavior,
	delay: Duration,
	timeout_ms: Option<u64>,
	calls: Arc<AtomicUsize>,
}

impl MockVenueAdapter {
	pub fn new(name: impl Into<String>, behavior: MockBehavior) -> Self {
		Self {
			name: name.into(),
			behavior,
			delay: Duration::ZERO,
			timeout_ms: None,
			calls: Arc::new(AtomicUsize::new(0)),
		}
	}

	pub fn fixed(name: impl Into<String>, output: impl Into<Amount>) -> Self {
		Self::new(name, MockBehavior::Fixed(output.into()))
	}

	pub fn echo(name: impl Into<String>) -> Self {
		Self::new(name, MockBehavior::Echo)
	}

	pub fn failing(name: impl Into<String>, message: impl Into<String>) -> Self {
		Self::new(name, MockBehavior::Fail(message.into()))
	}

	pub fn malformed(name: impl Into<String>) -> Self {
		Self::new(name, MockBehavior::Malformed)
	}

	/// Echo venue built from configuration
	pub fn from_config(config: &VenueConfig) -> Self {
		Self {
			timeout_ms: config.timeout_ms,
			..Self::echo(config.name.clone())
		}
	}

	/// Respond only after `delay` has elapsed
	pub fn with_delay(mut self, delay: Duration) -> Self {
		self.delay = delay;
		self
	}

	pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
		self.timeout_ms = Some(timeout_ms);
		self
	}

	/// Number of quote calls received so far
	pub fn call_count(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}
}

#[async_trait]
impl VenueAdapter for MockVenueAdapter {
	fn name(&self) -> &str {
		&self.name
	}

	fn timeout_ms(&self) -> Option<u64> {
		self.timeout_ms
	}

	async fn quote(&self, request: &QuoteRequest) -> VenueResult<NormalizedQuote> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		if !self.delay.is_zero() {
			debug!("{} delaying response by {:?}", self.name, self.delay);
			tokio::time::sleep(self.delay).await;
		}

		let output = match &self.behavior {
			MockBehavior::Fixed(amount) => amount.clone(),
			MockBehavior::Echo => request.amount().clone(),
			MockBehavior::Fail(message) => return Err(VenueError::Venue(message.clone())),
			MockBehavior::Malformed => {
				return Err(VenueError::MalformedResponse {
					reason: "missing outputAmount".to_string(),
				})
			},
		};

		Ok(
			NormalizedQuote::from_output(output, request.slippage_tolerance_bps())
				.with_route(json!([{ "dex": self.name, "proportion": "100%" }])),
		)
	}
}
