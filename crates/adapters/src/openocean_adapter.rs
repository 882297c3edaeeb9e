//! OpenOcean v3 adapter
//!
//! OpenOcean takes the input amount in whole tokens and reports errors with a
//! `code` field inside a 200 response, so both are handled here rather than
//! in the shared HTTP layer.
//!
//! Base units are truncated to whole tokens using the venue's configured
//! `input_decimals` (18 by default). Amounts below one whole token are
//! rejected before any request is sent.

use async_trait::async_trait;
use purple_types::{
	bps_to_percent, Amount, ExecutionPayload, NormalizedQuote, QuoteRequest, VenueAdapter,
	VenueConfig, VenueError, VenueResult,
};
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::http::{self, native_alias, scalar_to_string, DEFAULT_WRAPPED_NATIVE};

const ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";
const GAS_PRICE_GWEI: &str = "5";

#[derive(Debug)]
pub struct OpenOceanAdapter {
	name: String,
	base_url: String,
	chain: String,
	wrapped_native: String,
	input_decimals: u32,
	timeout_ms: Option<u64>,
	client: Client,
}

impl OpenOceanAdapter {
	pub fn new(config: &VenueConfig) -> VenueResult<Self> {
		Ok(Self {
			name: config.name.clone(),
			base_url: config.base_url(),
			chain: config.chain(),
			wrapped_native: config
				.wrapped_native
				.clone()
				.unwrap_or_else(|| DEFAULT_WRAPPED_NATIVE.to_string()),
			input_decimals: config.input_decimals(),
			timeout_ms: config.timeout_ms,
			client: http::build_client(config, &[])?,
		})
	}

	pub(crate) fn normalize_quote(body: &Value, slippage_bps: u32) -> VenueResult<NormalizedQuote> {
		if body.get("code").and_then(Value::as_i64) != Some(200) {
			let message = body
				.get("message")
				.and_then(Value::as_str)
				.unwrap_or("OpenOcean API error");
			return Err(VenueError::Venue(message.to_string()));
		}

		let data = &body["data"];
		let output = NormalizedQuote::parse_amount(
			"data.outAmount",
			data.get("outAmount").and_then(Value::as_str),
		)?;
		let venue_min =
			NormalizedQuote::parse_optional_amount(data.get("minOutAmount").and_then(Value::as_str));

		let payload = match (
			data.get("to").and_then(Value::as_str),
			data.get("data").and_then(Value::as_str),
		) {
			(Some(to), Some(calldata)) => Some(ExecutionPayload {
				to: to.to_string(),
				data: calldata.to_string(),
				value: NormalizedQuote::parse_optional_amount(
					scalar_to_string(data.get("value")).as_deref(),
				)
				.unwrap_or_else(Amount::zero),
			}),
			_ => None,
		};

		Ok(NormalizedQuote::with_venue_min(output, venue_min, slippage_bps)
			.with_route(data.get("path").cloned().unwrap_or(Value::Null))
			.with_estimated_gas(scalar_to_string(data.get("estimatedGas")))
			.with_execution_payload(payload))
	}
}

#[async_trait]
impl VenueAdapter for OpenOceanAdapter {
	fn name(&self) -> &str {
		&self.name
	}

	fn timeout_ms(&self) -> Option<u64> {
		self.timeout_ms
	}

	async fn quote(&self, request: &QuoteRequest) -> VenueResult<NormalizedQuote> {
		let in_token = native_alias(request.token_in(), &self.wrapped_native);
		let out_token = native_alias(request.token_out(), &self.wrapped_native);
		let whole_tokens = request.amount().truncate_decimals(self.input_decimals);
		if whole_tokens.is_zero() {
			return Err(VenueError::Venue(format!(
				"Amount is below one whole token ({} decimals)",
				self.input_decimals
			)));
		}
		let amount = whole_tokens.to_string();
		let slippage = bps_to_percent(request.slippage_tolerance_bps());
		let account = request.user_address().unwrap_or(ZERO_ADDRESS);

		debug!(
			"{} requesting quote {} -> {} for {} whole tokens",
			self.name, in_token, out_token, amount
		);

		let quote = self
			.client
			.get(format!("{}/{}/quote", self.base_url, self.chain))
			.query(&[
				("inTokenAddress", in_token.as_str()),
				("outTokenAddress", out_token.as_str()),
				("amount", amount.as_str()),
				("gasPrice", GAS_PRICE_GWEI),
				("slippage", slippage.as_str()),
				("account", account),
			]);

		let body = http::send(quote)
			.await?
			.into_success_body(|_| "Invalid token pair or amount".to_string())?;

		Self::normalize_quote(&body, request.slippage_tolerance_bps())
	}
}
