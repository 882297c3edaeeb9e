//! Global limits and defaults for configuration and runtime

/// Basis points in one whole (100%)
pub const BPS_DENOMINATOR: u32 = 10_000;

/// Default slippage tolerance in basis points (0.5%)
pub const DEFAULT_SLIPPAGE_BPS: u32 = 50;

/// Minimum allowed timeout for venue requests in milliseconds
pub const MIN_VENUE_TIMEOUT_MS: u64 = 100; // 100ms

/// Maximum allowed timeout for venue requests in milliseconds
pub const MAX_VENUE_TIMEOUT_MS: u64 = 30_000; // 30s

/// Default timeout for venue requests in milliseconds
pub const DEFAULT_VENUE_TIMEOUT_MS: u64 = 5_000; // 5s

/// Default lifetime of a cached fan-out result in milliseconds
pub const DEFAULT_CACHE_TTL_MS: u64 = 5_000; // 5s

/// Default maximum number of cached fan-out results
pub const DEFAULT_CACHE_MAX_ENTRIES: usize = 100;

/// Decimals assumed for venues that take whole-token amounts
pub const DEFAULT_TOKEN_DECIMALS: u32 = 18;

/// Sentinel address used by several aggregators for the chain's native token
pub const NATIVE_TOKEN_ADDRESS: &str = "0xEeeeeEeeeEeEeeEeEeEeeEEEeeeeEeeeeeeeEEeE";
