//! 0x swap API adapter (permit2 quote flow, API v2)

use async_trait::async_trait;
use purple_types::{
	bps_to_percent, Amount, ExecutionPayload, NormalizedQuote, QuoteRequest, VenueAdapter,
	VenueConfig, VenueError, VenueResult,
};
use reqwest::Client;
use serde_json::{json, Value};
use tracing::debug;

use crate::http::{self, native_alias, scalar_to_string, DEFAULT_WRAPPED_NATIVE};

/// Taker used for anonymous price quotes; 0x refuses quotes without one
pub const DEFAULT_TAKER: &str = "0x70a9f34f9b34c64957b9c401a97bfed35b95049e";

/// 0x swap API adapter
#[derive(Debug)]
pub struct ZeroXAdapter {
	name: String,
	base_url: String,
	chain_id: String,
	wrapped_native: String,
	timeout_ms: Option<u64>,
	client: Client,
}

impl ZeroXAdapter {
	pub fn new(config: &VenueConfig) -> VenueResult<Self> {
		let mut headers = vec![("0x-version", "v2".to_string())];
		match &config.api_key {
			Some(key) if !key.is_empty() => {
				headers.push(("0x-api-key", key.expose_secret().to_string()))
			},
			_ => debug!("{} configured without an API key", config.name),
		}

		Ok(Self {
			name: config.name.clone(),
			base_url: config.base_url(),
			chain_id: config.chain(),
			wrapped_native: config
				.wrapped_native
				.clone()
				.unwrap_or_else(|| DEFAULT_WRAPPED_NATIVE.to_string()),
			timeout_ms: config.timeout_ms,
			client: http::build_client(config, &headers)?,
		})
	}

	/// Map a 400 body onto a client-facing message
	pub(crate) fn bad_request_message(body: &Value) -> String {
		if body.get("name").and_then(Value::as_str) == Some("INPUT_INVALID") {
			return "Invalid token pair or amount".to_string();
		}
		body.get("message")
			.and_then(Value::as_str)
			.unwrap_or("Invalid request")
			.to_string()
	}

	/// Map a quote response body onto the normalized schema
	pub(crate) fn normalize_quote(body: &Value, slippage_bps: u32) -> VenueResult<NormalizedQuote> {
		let buy_amount = body
			.get("buyAmount")
			.and_then(Value::as_str)
			.ok_or_else(|| VenueError::Venue("No quote available from 0x".to_string()))?;
		let output = NormalizedQuote::parse_amount("buyAmount", Some(buy_amount))?;
		let venue_min =
			NormalizedQuote::parse_optional_amount(body.get("minBuyAmount").and_then(Value::as_str));

		let fills = body
			.pointer("/route/fills")
			.and_then(Value::as_array)
			.map(|fills| fills.iter().map(Self::describe_fill).collect::<Vec<_>>())
			.unwrap_or_default();

		let transaction = body.get("transaction");
		let payload = transaction.and_then(|tx| {
			Some(ExecutionPayload {
				to: tx.get("to")?.as_str()?.to_string(),
				data: tx.get("data")?.as_str()?.to_string(),
				value: NormalizedQuote::parse_optional_amount(tx.get("value").and_then(Value::as_str))
					.unwrap_or_else(Amount::zero),
			})
		});

		Ok(NormalizedQuote::with_venue_min(output, venue_min, slippage_bps)
			.with_route(Value::Array(fills))
			.with_estimated_gas(scalar_to_string(transaction.and_then(|tx| tx.get("gas"))))
			.with_execution_payload(payload))
	}

	fn describe_fill(fill: &Value) -> Value {
		let proportion = scalar_to_string(fill.get("proportionBps"))
			.and_then(|bps| bps.parse::<u32>().ok())
			.map(|bps| format!("{}%", bps_to_percent(bps)));

		json!({
			"dex": fill.get("source"),
			"from": fill.get("from"),
			"to": fill.get("to"),
			"proportion": proportion,
		})
	}
}

#[async_trait]
impl VenueAdapter for ZeroXAdapter {
	fn name(&self) -> &str {
		&self.name
	}

	fn timeout_ms(&self) -> Option<u64> {
		self.timeout_ms
	}

	async fn quote(&self, request: &QuoteRequest) -> VenueResult<NormalizedQuote> {
		let sell_token = native_alias(request.token_in(), &self.wrapped_native);
		let buy_token = native_alias(request.token_out(), &self.wrapped_native);
		let taker = request.user_address().unwrap_or(DEFAULT_TAKER);
		let sell_amount = request.amount().to_string();
		let slippage_bps = request.slippage_tolerance_bps().to_string();

		debug!("{} requesting quote {} -> {}", self.name, sell_token, buy_token);

		let quote = self
			.client
			.get(format!("{}/swap/permit2/quote", self.base_url))
			.query(&[
				("chainId", self.chain_id.as_str()),
				("sellToken", sell_token.as_str()),
				("buyToken", buy_token.as_str()),
				("sellAmount", sell_amount.as_str()),
				("taker", taker),
				("slippageBps", slippage_bps.as_str()),
			]);

		let body = http::send(quote)
			.await?
			.into_success_body(Self::bad_request_message)?;

		Self::normalize_quote(&body, request.slippage_tolerance_bps())
	}
}
