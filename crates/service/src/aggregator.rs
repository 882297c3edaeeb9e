//! Core aggregation service logic

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;
use purple_adapters::AdapterRegistry;
use purple_types::constants::limits::DEFAULT_VENUE_TIMEOUT_MS;
use purple_types::{
	AdapterResult, QuoteParams, QuoteRequest, QuoteValidationError, QuotesResponse, VenueConfig,
	VenueFailure, VenueInfo, VenueStatus,
};
use thiserror::Error;
use tokio::time::{timeout, Duration, Instant};
use tracing::{debug, error, info, warn};

use crate::cache::{CacheEntry, CacheKey, QuoteCache};
use crate::selector::select_best_quote;

#[derive(Debug, Error)]
pub enum AggregatorError {
	#[error("validation error: {0}")]
	Validation(#[from] QuoteValidationError),
}

/// Trait for quote aggregation operations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AggregatorTrait: Send + Sync {
	/// Validate raw parameters, then quote every venue and pick the best
	async fn get_quotes(&self, params: QuoteParams) -> Result<QuotesResponse, AggregatorError>;

	/// Active venues in registration order followed by disabled ones
	fn venues(&self) -> Vec<VenueInfo>;
}

/// Service fanning a quote request out to every registered venue
pub struct AggregatorService {
	registry: Arc<AdapterRegistry>,
	default_timeout_ms: u64,
	cache: Arc<QuoteCache>,
	pending_venues: Vec<VenueInfo>,
}

impl AggregatorService {
	pub fn new(
		registry: Arc<AdapterRegistry>,
		default_timeout_ms: u64,
		cache: Arc<QuoteCache>,
	) -> Self {
		Self {
			registry,
			default_timeout_ms,
			cache,
			pending_venues: Vec::new(),
		}
	}

	/// Service with the default timeout and cache settings
	pub fn with_defaults(registry: Arc<AdapterRegistry>) -> Self {
		Self::new(
			registry,
			DEFAULT_VENUE_TIMEOUT_MS,
			Arc::new(QuoteCache::default()),
		)
	}

	/// List the disabled venues among `configs` as pending
	///
	/// A configured priority is kept; otherwise pending venues are numbered
	/// after the active ones.
	pub fn with_disabled_venues(mut self, configs: &[VenueConfig]) -> Self {
		let first_free = self.registry.len() as u32 + 1;
		self.pending_venues = configs
			.iter()
			.filter(|config| !config.enabled)
			.enumerate()
			.map(|(i, config)| {
				VenueInfo::new(
					config.name.clone(),
					VenueStatus::Pending,
					config.priority.unwrap_or(first_free + i as u32),
				)
			})
			.collect();
		self
	}

	pub fn registry(&self) -> &Arc<AdapterRegistry> {
		&self.registry
	}

	pub fn cache(&self) -> &Arc<QuoteCache> {
		&self.cache
	}

	/// Quote a validated request, serving from the cache when possible
	pub async fn quote(&self, request: &QuoteRequest) -> QuotesResponse {
		let key = CacheKey::from(request);

		if let Some(entry) = self.cache.get(&key).await {
			debug!(
				"Cache hit for {} -> {} ({})",
				request.token_in(),
				request.token_out(),
				request.amount()
			);
			let results = entry.results_for(request);
			let best_quote = select_best_quote(&results);
			return QuotesResponse::new(best_quote, results, true);
		}

		let results = self.fetch_quotes(request).await;
		self.cache
			.put(key, CacheEntry::new(results.clone(), request))
			.await;

		let best_quote = select_best_quote(&results);
		QuotesResponse::new(best_quote, results, false)
	}

	/// Query every registered venue concurrently, each under its own deadline
	///
	/// Returns exactly one result per venue, in registration order.
	pub async fn fetch_quotes(&self, request: &QuoteRequest) -> Vec<AdapterResult> {
		let adapters = self.registry.adapters();
		info!(
			"Fetching quotes {} -> {} for {} from {} venues",
			request.token_in(),
			request.token_out(),
			request.amount(),
			adapters.len()
		);

		let started = Instant::now();
		let (names, tasks): (Vec<String>, Vec<_>) = adapters
			.iter()
			.map(|adapter| {
				let adapter = Arc::clone(adapter);
				let request = request.clone();
				let timeout_ms = adapter.timeout_ms().unwrap_or(self.default_timeout_ms);
				let venue = adapter.name().to_string();

				let task = tokio::spawn(async move {
					let venue = adapter.name().to_string();
					debug!("Starting quote fetch from venue {}", venue);

					let started = Instant::now();
					let outcome =
						timeout(Duration::from_millis(timeout_ms), adapter.quote(&request)).await;
					let elapsed_millis = started.elapsed().as_millis() as u64;

					match outcome {
						Ok(Ok(quote)) => {
							info!(
								"Venue {} quoted {} in {}ms",
								venue, quote.output_amount, elapsed_millis
							);
							AdapterResult::success(venue, quote, elapsed_millis)
						},
						Ok(Err(e)) => {
							warn!("Venue {} returned error: {}", venue, e);
							AdapterResult::failure(venue, VenueFailure::from(&e), elapsed_millis)
						},
						Err(_) => {
							warn!("Venue {} timed out after {}ms", venue, timeout_ms);
							AdapterResult::failure(
								venue,
								VenueFailure::timeout(timeout_ms),
								elapsed_millis,
							)
						},
					}
				});
				(venue, task)
			})
			.unzip();

		let results: Vec<AdapterResult> = join_all(tasks)
			.await
			.into_iter()
			.zip(names)
			.map(|(joined, venue)| {
				joined.unwrap_or_else(|e| {
					error!("Quote task for venue {} failed: {}", venue, e);
					AdapterResult::failure(
						venue,
						VenueFailure::internal(format!("Adapter task failed: {}", e)),
						started.elapsed().as_millis() as u64,
					)
				})
			})
			.collect();

		info!(
			"Quote aggregation completed: {} of {} venues succeeded in {}ms",
			results.iter().filter(|r| r.is_success()).count(),
			results.len(),
			started.elapsed().as_millis()
		);

		results
	}
}

#[async_trait]
impl AggregatorTrait for AggregatorService {
	async fn get_quotes(&self, params: QuoteParams) -> Result<QuotesResponse, AggregatorError> {
		let request = QuoteRequest::try_from(params)?;
		Ok(self.quote(&request).await)
	}

	fn venues(&self) -> Vec<VenueInfo> {
		self.registry
			.names()
			.into_iter()
			.enumerate()
			.map(|(i, name)| VenueInfo::new(name, VenueStatus::Active, i as u32 + 1))
			.chain(self.pending_venues.iter().cloned())
			.collect()
	}
}
