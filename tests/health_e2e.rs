//! Health endpoint E2E tests

mod mocks;

use crate::mocks::TestServer;
use reqwest::Client;

#[tokio::test]
async fn test_health_endpoint() {
	let server = TestServer::spawn()
		.await
		.expect("Failed to start test server");
	let client = Client::new();

	let resp = client.get(server.url("/health")).send().await.unwrap();

	assert!(resp.status().is_success());
	assert!(resp.headers().contains_key("x-request-id"));
	let body: serde_json::Value = resp.json().await.unwrap();
	assert_eq!(body["status"], "ok");
	assert_eq!(body["service"], "purple-aggregator");

	server.abort();
}

#[tokio::test]
async fn test_health_without_venues() {
	let server = TestServer::spawn_minimal()
		.await
		.expect("Failed to start test server");

	let resp = Client::new().get(server.url("/health")).send().await.unwrap();
	assert_eq!(resp.status(), reqwest::StatusCode::OK);

	server.abort();
}

#[tokio::test]
async fn test_unknown_endpoint_404() {
	let server = TestServer::spawn()
		.await
		.expect("Failed to start test server");

	let resp = Client::new()
		.get(server.url("/unknown-endpoint"))
		.send()
		.await
		.unwrap();
	assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);

	server.abort();
}
