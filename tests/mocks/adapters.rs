//! Venue adapters with controlled timing and outcomes

use std::sync::Arc;
use std::time::Duration;

use purple_aggregator::{MockVenueAdapter, VenueAdapter};

/// Per-venue deadline used by the timing adapters
#[allow(dead_code)]
pub const TEST_TIMEOUT_MS: u64 = 200;

/// The four-venue line-up used by the aggregation scenarios
///
/// `cheap` quotes 100, `best` quotes 150, `stalled` and `hung` answer only
/// long after their deadline.
#[derive(Clone)]
pub struct TimingAdapters {
	pub cheap: MockVenueAdapter,
	pub best: MockVenueAdapter,
	pub stalled: MockVenueAdapter,
	pub hung: MockVenueAdapter,
}

#[allow(dead_code)]
impl TimingAdapters {
	pub fn new() -> Self {
		let late = Duration::from_millis(TEST_TIMEOUT_MS * 50);
		Self {
			cheap: MockVenueAdapter::fixed("cheap", 100u64)
				.with_delay(Duration::from_millis(10))
				.with_timeout_ms(TEST_TIMEOUT_MS),
			best: MockVenueAdapter::fixed("best", 150u64)
				.with_delay(Duration::from_millis(20))
				.with_timeout_ms(TEST_TIMEOUT_MS),
			stalled: MockVenueAdapter::fixed("stalled", 1_000u64)
				.with_delay(late)
				.with_timeout_ms(TEST_TIMEOUT_MS),
			hung: MockVenueAdapter::echo("hung")
				.with_delay(late)
				.with_timeout_ms(TEST_TIMEOUT_MS),
		}
	}

	/// Adapters in registration order
	pub fn all(&self) -> Vec<Arc<dyn VenueAdapter>> {
		vec![
			Arc::new(self.cheap.clone()),
			Arc::new(self.best.clone()),
			Arc::new(self.stalled.clone()),
			Arc::new(self.hung.clone()),
		]
	}

	pub fn total_calls(&self) -> usize {
		self.cheap.call_count()
			+ self.best.call_count()
			+ self.stalled.call_count()
			+ self.hung.call_count()
	}
}
