//! KyberSwap aggregator adapter
//!
//! Quotes come from `GET /{chain}/api/v1/routes`. When the caller supplied a
//! wallet, the route is additionally built into calldata through
//! `POST /{chain}/api/v1/route/build`.

use async_trait::async_trait;
use purple_types::{
	Amount, ExecutionPayload, NormalizedQuote, QuoteRequest, VenueAdapter, VenueConfig,
	VenueError, VenueResult,
};
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::http::{self, scalar_to_string};

/// KyberSwap aggregator adapter
#[derive(Debug)]
pub struct KyberSwapAdapter {
	name: String,
	base_url: String,
	chain: String,
	timeout_ms: Option<u64>,
	client: Client,
}

/// Route found by KyberSwap, kept whole so it can be posted back for building
#[derive(Debug, Clone)]
pub(crate) struct KyberRoute {
	pub quote: NormalizedQuote,
	pub route_summary: Value,
	pub router_address: Option<String>,
}

impl KyberSwapAdapter {
	pub fn new(config: &VenueConfig) -> VenueResult<Self> {
		Ok(Self {
			name: config.name.clone(),
			base_url: config.base_url(),
			chain: config.chain(),
			timeout_ms: config.timeout_ms,
			client: http::build_client(config, &[])?,
		})
	}

	fn endpoint(&self, path: &str) -> String {
		format!("{}/{}/api/v1/{}", self.base_url, self.chain, path)
	}

	/// Map a `routes` response body onto the normalized schema
	///
	/// `amountOutUsd` is a dollar value, so the minimum output is always
	/// derived from the request's slippage.
	pub(crate) fn normalize_routes(body: &Value, slippage_bps: u32) -> VenueResult<KyberRoute> {
		let data = &body["data"];
		let route_summary = data
			.get("routeSummary")
			.filter(|summary| !summary.is_null())
			.ok_or_else(|| VenueError::Venue("No route found".to_string()))?;

		let output = NormalizedQuote::parse_amount(
			"routeSummary.amountOut",
			route_summary.get("amountOut").and_then(Value::as_str),
		)?;

		let quote = NormalizedQuote::from_output(output, slippage_bps)
			.with_route(route_summary.get("route").cloned().unwrap_or(Value::Null))
			.with_estimated_gas(scalar_to_string(route_summary.get("gas")));

		Ok(KyberRoute {
			quote,
			route_summary: route_summary.clone(),
			router_address: data
				.get("routerAddress")
				.and_then(Value::as_str)
				.map(str::to_string),
		})
	}

	/// Extract executable calldata from a `route/build` response body
	pub(crate) fn payload_from_build(
		body: &Value,
		router_address: Option<&str>,
	) -> Option<ExecutionPayload> {
		let data = &body["data"];
		let calldata = data.get("data").and_then(Value::as_str)?;
		let to = data
			.get("routerAddress")
			.and_then(Value::as_str)
			.or(router_address)?;

		Some(ExecutionPayload {
			to: to.to_string(),
			data: calldata.to_string(),
			value: NormalizedQuote::parse_optional_amount(
				data.get("transactionValue").and_then(Value::as_str),
			)
			.unwrap_or_else(Amount::zero),
		})
	}

	async fn build_route(
		&self,
		route: &KyberRoute,
		user_address: &str,
		slippage_bps: u32,
	) -> VenueResult<Option<ExecutionPayload>> {
		let request = self.client.post(self.endpoint("route/build")).json(&json!({
			"routeSummary": route.route_summary,
			"sender": user_address,
			"recipient": user_address,
			"slippageTolerance": slippage_bps,
		}));

		let body = http::send(request)
			.await?
			.into_success_body(|_| "Invalid token pair or amount".to_string())?;

		Ok(Self::payload_from_build(
			&body,
			route.router_address.as_deref(),
		))
	}
}

#[async_trait]
impl VenueAdapter for KyberSwapAdapter {
	fn name(&self) -> &str {
		&self.name
	}

	fn timeout_ms(&self) -> Option<u64> {
		self.timeout_ms
	}

	async fn quote(&self, request: &QuoteRequest) -> VenueResult<NormalizedQuote> {
		debug!(
			"{} fetching route {} -> {} for {}",
			self.name,
			request.token_in(),
			request.token_out(),
			request.amount()
		);

		let amount = request.amount().to_string();
		let routes = self.client.get(self.endpoint("routes")).query(&[
			("tokenIn", request.token_in()),
			("tokenOut", request.token_out()),
			("amountIn", amount.as_str()),
		]);

		let body = http::send(routes)
			.await?
			.into_success_body(|_| "Invalid token pair or amount".to_string())?;
		let route = Self::normalize_routes(&body, request.slippage_tolerance_bps())?;

		let Some(user_address) = request.user_address() else {
			return Ok(route.quote);
		};

		// Calldata is a bonus: a failed build still leaves a valid quote
		let payload = match self
			.build_route(&route, user_address, request.slippage_tolerance_bps())
			.await
		{
			Ok(payload) => payload,
			Err(e) => {
				warn!("{} route build failed for {}: {}", self.name, user_address, e);
				None
			},
		};

		Ok(route.quote.with_execution_payload(payload))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use purple_types::{MinOutputSource, VenueType};
	use wiremock::matchers::{body_partial_json, method, path, query_param};
	use wiremock::{Mock, MockServer, ResponseTemplate};

	const ROUTES_PATH: &str = "/monad/api/v1/routes";
	const BUILD_PATH: &str = "/monad/api/v1/route/build";

	fn adapter_for(server: &MockServer) -> KyberSwapAdapter {
		let mut config = VenueConfig::new("KyberSwap", VenueType::KyberSwap);
		config.base_url = Some(server.uri());
		KyberSwapAdapter::new(&config).unwrap()
	}

	fn request(user: Option<&str>) -> QuoteRequest {
		QuoteRequest::new(
			"0xin",
			"0xout",
			Amount::from(1_000_000_000_000_000_000u64),
			50,
			user.map(str::to_string),
		)
		.unwrap()
	}

	async fn mount_routes(server: &MockServer) {
		Mock::given(method("GET"))
			.and(path(ROUTES_PATH))
			.and(query_param("tokenIn", "0xin"))
			.and(query_param("tokenOut", "0xout"))
			.and(query_param("amountIn", "1000000000000000000"))
			.respond_with(ResponseTemplate::new(200).set_body_json(routes_fixture()))
			.expect(1)
			.mount(server)
			.await;
	}

	fn routes_fixture() -> Value {
		json!({
			"code": 0,
			"message": "successfully",
			"data": {
				"routeSummary": {
					"tokenIn": "0xin",
					"amountIn": "1000000000000000000",
					"tokenOut": "0xout",
					"amountOut": "2512345",
					"amountOutUsd": "2.51",
					"gas": "180000",
					"gasUsd": "0.02",
					"route": [[{"pool": "0xpool", "exchange": "uniswapv3"}]]
				},
				"routerAddress": "0x6131B5fae19EA4f9D964eAc0408E4408b66337b5"
			}
		})
	}

	#[test]
	fn test_normalize_routes() {
		let route = KyberSwapAdapter::normalize_routes(&routes_fixture(), 50).unwrap();
		assert_eq!(route.quote.output_amount, Amount::from(2_512_345u64));
		// 2512345 - floor(2512345 * 50 / 10000) = 2512345 - 12561
		assert_eq!(route.quote.min_output_amount, Amount::from(2_499_784u64));
		assert_eq!(route.quote.min_output_source, MinOutputSource::Slippage);
		assert_eq!(route.quote.estimated_gas.as_deref(), Some("180000"));
		assert_eq!(route.quote.route[0][0]["exchange"], "uniswapv3");
		assert_eq!(
			route.router_address.as_deref(),
			Some("0x6131B5fae19EA4f9D964eAc0408E4408b66337b5")
		);
	}

	#[test]
	fn test_normalize_routes_without_summary() {
		let err = KyberSwapAdapter::normalize_routes(&json!({"data": {}}), 50).unwrap_err();
		assert!(matches!(err, VenueError::Venue(m) if m == "No route found"));
	}

	#[test]
	fn test_normalize_routes_bad_amount() {
		let body = json!({"data": {"routeSummary": {"amountOut": "n/a"}}});
		let err = KyberSwapAdapter::normalize_routes(&body, 50).unwrap_err();
		assert!(matches!(err, VenueError::MalformedResponse { .. }));
	}

	#[test]
	fn test_payload_from_build() {
		let body = json!({"code": 0, "data": {"data": "0xe21fd0e9", "amountOut": "2512345"}});
		let payload = KyberSwapAdapter::payload_from_build(&body, Some("0xrouter")).unwrap();
		assert_eq!(payload.to, "0xrouter");
		assert_eq!(payload.data, "0xe21fd0e9");
		assert_eq!(payload.value, Amount::zero());

		assert!(KyberSwapAdapter::payload_from_build(&json!({"data": {}}), Some("0xr")).is_none());
		assert!(
			KyberSwapAdapter::payload_from_build(&json!({"data": {"data": "0x"}}), None).is_none()
		);
	}

	#[test]
	fn test_endpoint_uses_chain() {
		let mut config = VenueConfig::new("KyberSwap", VenueType::KyberSwap);
		config.base_url = Some("http://localhost:4000/".to_string());
		let adapter = KyberSwapAdapter::new(&config).unwrap();
		assert_eq!(
			adapter.endpoint("routes"),
			"http://localhost:4000/monad/api/v1/routes"
		);
		assert_eq!(adapter.name(), "KyberSwap");
	}

	#[tokio::test]
	async fn test_quote_without_user_skips_build() {
		let server = MockServer::start().await;
		mount_routes(&server).await;
		Mock::given(method("POST"))
			.and(path(BUILD_PATH))
			.respond_with(ResponseTemplate::new(200))
			.expect(0)
			.mount(&server)
			.await;

		let quote = adapter_for(&server).quote(&request(None)).await.unwrap();
		assert_eq!(quote.output_amount, Amount::from(2_512_345u64));
		assert!(quote.execution_payload.is_none());
	}

	#[tokio::test]
	async fn test_quote_with_user_builds_calldata() {
		let server = MockServer::start().await;
		mount_routes(&server).await;
		Mock::given(method("POST"))
			.and(path(BUILD_PATH))
			.and(body_partial_json(json!({
				"routeSummary": {"amountOut": "2512345"},
				"sender": "0xuser",
				"recipient": "0xuser",
				"slippageTolerance": 50
			})))
			.respond_with(ResponseTemplate::new(200).set_body_json(json!({
				"code": 0,
				"data": {"data": "0xe21fd0e9", "transactionValue": "0"}
			})))
			.expect(1)
			.mount(&server)
			.await;

		let quote = adapter_for(&server)
			.quote(&request(Some("0xuser")))
			.await
			.unwrap();
		let payload = quote.execution_payload.unwrap();
		assert_eq!(payload.to, "0x6131B5fae19EA4f9D964eAc0408E4408b66337b5");
		assert_eq!(payload.data, "0xe21fd0e9");
	}

	#[tokio::test]
	async fn test_failed_build_keeps_quote() {
		let server = MockServer::start().await;
		mount_routes(&server).await;
		Mock::given(method("POST"))
			.and(path(BUILD_PATH))
			.respond_with(ResponseTemplate::new(500))
			.expect(1)
			.mount(&server)
			.await;

		let quote = adapter_for(&server)
			.quote(&request(Some("0xuser")))
			.await
			.unwrap();
		assert_eq!(quote.output_amount, Amount::from(2_512_345u64));
		assert!(quote.execution_payload.is_none());
	}

	#[tokio::test]
	async fn test_quote_error_statuses() {
		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.and(path(ROUTES_PATH))
			.and(query_param("tokenOut", "0xbad"))
			.respond_with(ResponseTemplate::new(400).set_body_json(json!({"code": 4008})))
			.mount(&server)
			.await;
		Mock::given(method("GET"))
			.and(path(ROUTES_PATH))
			.and(query_param("tokenOut", "0xdown"))
			.respond_with(ResponseTemplate::new(502))
			.mount(&server)
			.await;
		let adapter = adapter_for(&server);
		let amount = Amount::from(1u64);
		let to = |token: &str| QuoteRequest::new("0xin", token, amount.clone(), 50, None).unwrap();

		let err = adapter.quote(&to("0xbad")).await.unwrap_err();
		assert!(matches!(err, VenueError::Venue(m) if m == "Invalid token pair or amount"));

		let err = adapter.quote(&to("0xdown")).await.unwrap_err();
		assert_eq!(err.status_code(), Some(502));
	}
}
