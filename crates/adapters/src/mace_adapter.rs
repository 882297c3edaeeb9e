//! Mace adapter
//!
//! Mace publishes a recent average exchange rate rather than a routed quote.
//! The output is the input scaled by that rate, converted between the venue's
//! configured input and output decimals. No calldata is returned.

use std::str::FromStr;

use async_trait::async_trait;
use purple_types::{
	Amount, NormalizedQuote, QuoteRequest, VenueAdapter, VenueConfig, VenueError, VenueResult,
};
use reqwest::Client;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use tracing::debug;

use crate::http::{self, VenueResponse};

/// Window the averaged rate is taken over
const RATE_WINDOW_SECONDS: u64 = 60;
const ESTIMATED_GAS: &str = "150000";

#[derive(Debug)]
pub struct MaceAdapter {
	name: String,
	base_url: String,
	input_decimals: u32,
	output_decimals: u32,
	timeout_ms: Option<u64>,
	client: Client,
}

impl MaceAdapter {
	pub fn new(config: &VenueConfig) -> VenueResult<Self> {
		Ok(Self {
			name: config.name.clone(),
			base_url: config.base_url(),
			input_decimals: config.input_decimals(),
			output_decimals: config.output_decimals(),
			timeout_ms: config.timeout_ms,
			client: http::build_client(config, &[])?,
		})
	}

	/// Body of a successful exchange-amount response
	///
	/// Mace reports failures as `errorMessage`, sometimes alongside a 2xx.
	fn success_body(response: VenueResponse) -> VenueResult<Value> {
		if let Some(message) = response.body.get("errorMessage").and_then(Value::as_str) {
			return Err(VenueError::Venue(message.to_string()));
		}
		response.into_success_body(|_| "Invalid token pair or amount".to_string())
	}

	fn parse_rate(raw: &Value) -> Option<Decimal> {
		let text = match raw {
			Value::String(s) => s.trim().to_string(),
			Value::Number(n) => n.to_string(),
			_ => return None,
		};
		Decimal::from_str(&text)
			.or_else(|_| Decimal::from_scientific(&text))
			.ok()
	}

	/// Scale `amount` by the response's average rate
	pub(crate) fn normalize_quote(
		body: &Value,
		amount: &Amount,
		input_decimals: u32,
		output_decimals: u32,
		slippage_bps: u32,
	) -> VenueResult<NormalizedQuote> {
		let average = body
			.get("average")
			.filter(|v| !v.is_null())
			.ok_or_else(|| VenueError::Venue("No exchange rate found".to_string()))?;
		let rate = Self::parse_rate(average).ok_or_else(|| VenueError::MalformedResponse {
			reason: format!("average is not a decimal rate: {}", average),
		})?;
		if rate.is_zero() {
			return Err(VenueError::Venue("No exchange rate found".to_string()));
		}

		let output = amount
			.convert_at_rate(rate, input_decimals, output_decimals)
			.ok_or_else(|| VenueError::MalformedResponse {
				reason: format!("negative exchange rate: {}", rate),
			})?;

		let route = json!({
			"type": body.get("routeType").cloned().unwrap_or(Value::Null),
			"source": "Mace Exchange Rate",
			"intermediaries": body
				.get("equivilantTokens")
				.filter(|v| v.is_array())
				.cloned()
				.unwrap_or_else(|| json!([])),
		});

		Ok(NormalizedQuote::from_output(output, slippage_bps)
			.with_route(route)
			.with_estimated_gas(Some(ESTIMATED_GAS.to_string())))
	}
}

#[async_trait]
impl VenueAdapter for MaceAdapter {
	fn name(&self) -> &str {
		&self.name
	}

	fn timeout_ms(&self) -> Option<u64> {
		self.timeout_ms
	}

	async fn quote(&self, request: &QuoteRequest) -> VenueResult<NormalizedQuote> {
		debug!(
			"{} fetching rate {} -> {}",
			self.name,
			request.token_in(),
			request.token_out()
		);

		let rate = self
			.client
			.post(format!("{}/exchange-amount", self.base_url))
			.json(&json!({
				"inToken": request.token_in(),
				"outToken": request.token_out(),
				"lastNSeconds": RATE_WINDOW_SECONDS,
			}));

		let body = Self::success_body(http::send(rate).await?)?;

		Self::normalize_quote(
			&body,
			request.amount(),
			self.input_decimals,
			self.output_decimals,
			request.slippage_tolerance_bps(),
		)
	}
}
