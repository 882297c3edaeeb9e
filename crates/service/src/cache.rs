//! Short-lived cache of fan-out results
//!
//! Keyed by token pair and input amount. Entries expire after a fixed TTL
//! and are dropped lazily on read; when full, the oldest entry makes room
//! for a new key.

use std::collections::HashMap;
use std::time::Duration;

use purple_types::constants::limits::{DEFAULT_CACHE_MAX_ENTRIES, DEFAULT_CACHE_TTL_MS};
use purple_types::{AdapterResult, Amount, QuoteRequest};
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

/// Cache key: lowercased token pair plus input amount
///
/// Slippage and user are not part of the key; see [`CacheEntry::results_for`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
	token_in: String,
	token_out: String,
	amount: Amount,
}

impl CacheKey {
	pub fn new(token_in: &str, token_out: &str, amount: Amount) -> Self {
		Self {
			token_in: token_in.to_lowercase(),
			token_out: token_out.to_lowercase(),
			amount,
		}
	}
}

impl From<&QuoteRequest> for CacheKey {
	fn from(request: &QuoteRequest) -> Self {
		Self::new(
			request.token_in(),
			request.token_out(),
			request.amount().clone(),
		)
	}
}

/// Fan-out results together with the request parameters they were fetched for
#[derive(Debug, Clone)]
pub struct CacheEntry {
	pub results: Vec<AdapterResult>,
	pub slippage_tolerance_bps: u32,
	pub user_address: Option<String>,
	stored_at: Instant,
}

impl CacheEntry {
	pub fn new(results: Vec<AdapterResult>, request: &QuoteRequest) -> Self {
		Self {
			results,
			slippage_tolerance_bps: request.slippage_tolerance_bps(),
			user_address: request.user_address().map(str::to_string),
			stored_at: Instant::now(),
		}
	}

	pub fn stored_at(&self) -> Instant {
		self.stored_at
	}

	/// Cached results adapted to the request that hit the entry
	///
	/// Output amounts are served as cached. A different slippage re-derives
	/// every minimum output and drops calldata; a different user drops
	/// calldata.
	pub fn results_for(&self, request: &QuoteRequest) -> Vec<AdapterResult> {
		let slippage_changed = self.slippage_tolerance_bps != request.slippage_tolerance_bps();
		let user_changed = self.user_address.as_deref() != request.user_address();

		let mut results = self.results.clone();
		if !slippage_changed && !user_changed {
			return results;
		}

		for quote in results.iter_mut().filter_map(AdapterResult::quote_mut) {
			if slippage_changed {
				quote.rederive_min_output(request.slippage_tolerance_bps());
			}
			quote.execution_payload = None;
		}
		results
	}
}

/// TTL and size-bounded cache guarded by an async mutex
///
/// The lock covers map operations only, never a venue call.
#[derive(Debug)]
pub struct QuoteCache {
	ttl: Duration,
	max_entries: usize,
	entries: Mutex<HashMap<CacheKey, CacheEntry>>,
}

impl QuoteCache {
	/// A zero `ttl` or `max_entries` disables caching
	pub fn new(ttl: Duration, max_entries: usize) -> Self {
		Self {
			ttl,
			max_entries,
			entries: Mutex::new(HashMap::new()),
		}
	}

	pub fn disabled() -> Self {
		Self::new(Duration::ZERO, 0)
	}

	pub fn is_enabled(&self) -> bool {
		!self.ttl.is_zero() && self.max_entries > 0
	}

	pub fn ttl(&self) -> Duration {
		self.ttl
	}

	pub fn max_entries(&self) -> usize {
		self.max_entries
	}

	/// Entry for `key` if it is younger than the TTL
	pub async fn get(&self, key: &CacheKey) -> Option<CacheEntry> {
		if !self.is_enabled() {
			return None;
		}

		let mut entries = self.entries.lock().await;
		let fresh = entries.get(key)?.stored_at.elapsed() < self.ttl;
		if fresh {
			return entries.get(key).cloned();
		}

		debug!("Dropping expired cache entry for {:?}", key);
		entries.remove(key);
		None
	}

	/// Store an entry, evicting the oldest one if the cache is full and
	/// `key` is new
	pub async fn put(&self, key: CacheKey, entry: CacheEntry) {
		if !self.is_enabled() {
			return;
		}

		let mut entries = self.entries.lock().await;
		if !entries.contains_key(&key) && entries.len() >= self.max_entries {
			let oldest = entries
				.iter()
				.min_by_key(|(_, entry)| entry.stored_at)
				.map(|(key, _)| key.clone());
			if let Some(oldest) = oldest {
				debug!("Cache full, evicting {:?}", oldest);
				entries.remove(&oldest);
			}
		}
		entries.insert(key, entry);
	}

	pub async fn len(&self) -> usize {
		self.entries.lock().await.len()
	}

	pub async fn is_empty(&self) -> bool {
		self.entries.lock().await.is_empty()
	}

	pub async fn clear(&self) {
		self.entries.lock().await.clear();
	}
}

impl Default for QuoteCache {
	fn default() -> Self {
		Self::new(
			Duration::from_millis(DEFAULT_CACHE_TTL_MS),
			DEFAULT_CACHE_MAX_ENTRIES,
		)
	}
}
