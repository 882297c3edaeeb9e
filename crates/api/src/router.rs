use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{
	cors::CorsLayer,
	request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
	trace::TraceLayer,
};
use tracing::Level;

use crate::handlers::{get_aggregators, get_quote, health};
use crate::state::AppState;

// State is applied at the application level using `.with_state(...)`.
pub fn create_router() -> Router<AppState> {
	let cors = CorsLayer::permissive();
	let trace = TraceLayer::new_for_http()
		.make_span_with(|req: &axum::http::Request<_>| {
			let req_id = req
				.headers()
				.get("x-request-id")
				.and_then(|v| v.to_str().ok())
				.unwrap_or("-");
			tracing::info_span!(
				"http_request",
				method = %req.method(),
				uri = %req.uri(),
				req_id
			)
		})
		.on_request(tower_http::trace::DefaultOnRequest::new().level(Level::INFO))
		.on_response(
			tower_http::trace::DefaultOnResponse::new()
				.level(Level::INFO)
				.latency_unit(tower_http::LatencyUnit::Millis),
		);
	let req_id = ServiceBuilder::new()
		.layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
		.layer(PropagateRequestIdLayer::x_request_id());

	Router::new()
		.route("/health", get(health))
		.route("/api/quote", get(get_quote))
		.route("/api/aggregators", get(get_aggregators))
		.layer(cors)
		.layer(trace)
		.layer(req_id)
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::sync::Arc;

	use axum::body::{to_bytes, Body};
	use axum::http::{Request, StatusCode};
	use purple_adapters::{AdapterRegistry, MockVenueAdapter};
	use purple_service::AggregatorService;
	use purple_types::{VenueAdapter, VenueConfig, VenueType};
	use serde_json::Value;
	use tower::ServiceExt;

	fn app(adapters: Vec<Arc<dyn VenueAdapter>>) -> Router {
		let mut registry = AdapterRegistry::new();
		for adapter in adapters {
			registry.register(adapter).unwrap();
		}
		let mut pending = VenueConfig::new("Monorail", VenueType::Mock);
		pending.enabled = false;

		let service = AggregatorService::with_defaults(Arc::new(registry))
			.with_disabled_venues(&[pending]);
		create_router().with_state(AppState::new(Arc::new(service)))
	}

	async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
		let response = app
			.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
			.await
			.unwrap();
		let status = response.status();
		let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
		(status, serde_json::from_slice(&bytes).unwrap())
	}

	#[tokio::test]
	async fn test_health() {
		let (status, body) = get_json(app(vec![]), "/health").await;
		assert_eq!(status, StatusCode::OK);
		assert_eq!(body["status"], "ok");
		assert_eq!(body["service"], "purple-aggregator");
	}

	#[tokio::test]
	async fn test_quote_returns_best_and_all() {
		let app = app(vec![
			Arc::new(MockVenueAdapter::fixed("A", 100u64)),
			Arc::new(MockVenueAdapter::fixed("B", 150u64)),
			Arc::new(MockVenueAdapter::failing("C", "No route found")),
		]);

		let (status, body) =
			get_json(app, "/api/quote?tokenIn=0xa&tokenOut=0xb&amount=1000&slippage=1").await;
		assert_eq!(status, StatusCode::OK);
		assert_eq!(body["bestQuote"]["chosen"]["venueName"], "B");
		assert_eq!(body["bestQuote"]["chosen"]["quote"]["minOutputAmount"], "149");
		assert_eq!(body["bestQuote"]["savingsPercent"], 50);
		assert_eq!(body["allQuotes"].as_array().unwrap().len(), 3);
		assert_eq!(body["allQuotes"][2]["success"], false);
		assert_eq!(body["allQuotes"][2]["error"]["reason"], "No route found");
		assert_eq!(body["cached"], false);
	}

	#[tokio::test]
	async fn test_quote_with_no_successes_is_still_ok() {
		let app = app(vec![Arc::new(MockVenueAdapter::failing("A", "down"))]);
		let (status, body) = get_json(app, "/api/quote?tokenIn=0xa&tokenOut=0xb&amount=1").await;
		assert_eq!(status, StatusCode::OK);
		assert!(body["bestQuote"].is_null());
	}

	#[tokio::test]
	async fn test_quote_validation_errors() {
		let (status, body) = get_json(app(vec![]), "/api/quote?tokenIn=0xa&amount=1").await;
		assert_eq!(status, StatusCode::BAD_REQUEST);
		assert_eq!(body["error"], "VALIDATION_ERROR");
		assert!(body["message"].as_str().unwrap().contains("tokenOut"));

		let (status, _) =
			get_json(app(vec![]), "/api/quote?tokenIn=0xa&tokenOut=0xb&amount=12.5").await;
		assert_eq!(status, StatusCode::BAD_REQUEST);

		let (status, _) = get_json(
			app(vec![]),
			"/api/quote?tokenIn=0xa&tokenOut=0xb&amount=1&slippage=abc",
		)
		.await;
		assert_eq!(status, StatusCode::BAD_REQUEST);
	}

	#[tokio::test]
	async fn test_aggregators_listing() {
		let app = app(vec![
			Arc::new(MockVenueAdapter::echo("OpenOcean")),
			Arc::new(MockVenueAdapter::echo("KyberSwap")),
		]);
		let (status, body) = get_json(app, "/api/aggregators").await;
		assert_eq!(status, StatusCode::OK);

		let venues = body["aggregators"].as_array().unwrap();
		assert_eq!(venues.len(), 3);
		assert_eq!(venues[0]["name"], "OpenOcean");
		assert_eq!(venues[0]["status"], "active");
		assert_eq!(venues[0]["priority"], 1);
		assert_eq!(venues[2]["name"], "Monorail");
		assert_eq!(venues[2]["status"], "pending");
		assert_eq!(venues[2]["priority"], 3);
	}

	#[tokio::test]
	async fn test_request_id_is_propagated() {
		let response = app(vec![])
			.oneshot(
				Request::builder()
					.uri("/health")
					.header("x-request-id", "abc-123")
					.body(Body::empty())
					.unwrap(),
			)
			.await
			.unwrap();
		assert_eq!(response.headers()["x-request-id"], "abc-123");
	}
}
