//! Venue adapter configuration models

use serde::{Deserialize, Serialize};

use crate::constants::limits::DEFAULT_TOKEN_DECIMALS;
use crate::SecretString;

/// Venue implementations the adapter factory knows how to build
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VenueType {
	/// KyberSwap aggregator API
	KyberSwap,
	/// 0x swap API (permit2 flow)
	ZeroX,
	/// OpenOcean v3 API
	OpenOcean,
	/// Mace exchange-rate API
	Mace,
	/// In-process mock venue returning a fixed quote
	Mock,
}

impl VenueType {
	/// Get display name for UI
	pub fn display_name(&self) -> &'static str {
		match self {
			VenueType::KyberSwap => "KyberSwap",
			VenueType::ZeroX => "0x",
			VenueType::OpenOcean => "OpenOcean",
			VenueType::Mace => "Mace",
			VenueType::Mock => "Mock",
		}
	}

	/// Public API base URL used when none is configured
	pub fn default_base_url(&self) -> &'static str {
		match self {
			VenueType::KyberSwap => "https://aggregator-api.kyberswap.com",
			VenueType::ZeroX => "https://api.0x.org",
			VenueType::OpenOcean => "https://open-api.openocean.finance/v3",
			VenueType::Mace => "https://api.mace.ag/swaps",
			VenueType::Mock => "http://localhost",
		}
	}

	/// Chain identifier in the venue's own notation (Monad mainnet)
	pub fn default_chain(&self) -> &'static str {
		match self {
			VenueType::KyberSwap => "monad",
			VenueType::ZeroX | VenueType::OpenOcean | VenueType::Mace | VenueType::Mock => "143",
		}
	}
}

/// Resolved configuration for one venue
#[derive(Debug, Clone)]
pub struct VenueConfig {
	/// Unique venue name, reported in every result
	pub name: String,
	pub venue_type: VenueType,
	pub enabled: bool,
	pub base_url: Option<String>,
	pub chain: Option<String>,
	/// Per-venue deadline; the aggregator default applies when absent
	pub timeout_ms: Option<u64>,
	pub api_key: Option<SecretString>,
	/// Wrapped native token that the venue expects as the native sentinel
	pub wrapped_native: Option<String>,
	/// Listing priority for disabled venues
	pub priority: Option<u32>,
	/// Decimals of the input token, for venues that take or return whole tokens
	pub input_decimals: Option<u32>,
	/// Decimals of the output token, for venues that quote a whole-token rate
	pub output_decimals: Option<u32>,
}

impl VenueConfig {
	pub fn new(name: impl Into<String>, venue_type: VenueType) -> Self {
		Self {
			name: name.into(),
			venue_type,
			enabled: true,
			base_url: None,
			chain: None,
			timeout_ms: None,
			api_key: None,
			wrapped_native: None,
			priority: None,
			input_decimals: None,
			output_decimals: None,
		}
	}

	pub fn base_url(&self) -> String {
		self.base_url
			.clone()
			.unwrap_or_else(|| self.venue_type.default_base_url().to_string())
			.trim_end_matches('/')
			.to_string()
	}

	pub fn chain(&self) -> String {
		self.chain
			.clone()
			.unwrap_or_else(|| self.venue_type.default_chain().to_string())
	}

	pub fn input_decimals(&self) -> u32 {
		self.input_decimals.unwrap_or(DEFAULT_TOKEN_DECIMALS)
	}

	pub fn output_decimals(&self) -> u32 {
		self.output_decimals.unwrap_or(DEFAULT_TOKEN_DECIMALS)
	}
}
