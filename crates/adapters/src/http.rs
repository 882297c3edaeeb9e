//! Shared HTTP plumbing for venue adapters
//!
//! One pooled reqwest client per adapter, built once at startup with the
//! venue's headers and a client-level timeout.

use purple_types::constants::limits::{DEFAULT_VENUE_TIMEOUT_MS, NATIVE_TOKEN_ADDRESS};
use purple_types::{VenueConfig, VenueError, VenueResult};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, ClientBuilder, RequestBuilder, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Wrapped MON on Monad mainnet
pub const DEFAULT_WRAPPED_NATIVE: &str = "0x3bd359C1119dA7Da1D913D1C4D2B7c461115433A";

const USER_AGENT: &str = "Purple-Aggregator/1.0";

/// Build the HTTP client for a venue
///
/// `extra_headers` carries venue-specific headers such as API keys.
pub(crate) fn build_client(
	config: &VenueConfig,
	extra_headers: &[(&str, String)],
) -> VenueResult<Client> {
	let mut headers = HeaderMap::new();
	headers.insert("Accept", HeaderValue::from_static("application/json"));
	headers.insert("User-Agent", HeaderValue::from_static(USER_AGENT));

	for (key, value) in extra_headers {
		let name = HeaderName::from_bytes(key.as_bytes()).map_err(|e| {
			VenueError::Configuration {
				reason: format!("invalid header name '{}': {}", key, e),
			}
		})?;
		let value = HeaderValue::from_str(value).map_err(|e| VenueError::Configuration {
			reason: format!("invalid value for header '{}': {}", key, e),
		})?;
		headers.insert(name, value);
	}

	let timeout_ms = config.timeout_ms.unwrap_or(DEFAULT_VENUE_TIMEOUT_MS);

	ClientBuilder::new()
		.default_headers(headers)
		.timeout(Duration::from_millis(timeout_ms))
		.pool_max_idle_per_host(10)
		.tcp_keepalive(Duration::from_secs(60))
		.build()
		.map_err(VenueError::Http)
}

/// Status and decoded JSON body of a venue response
#[derive(Debug)]
pub(crate) struct VenueResponse {
	pub status: StatusCode,
	pub body: Value,
}

impl VenueResponse {
	/// Return the body of a 2xx response
	///
	/// A 400 means the venue rejected the pair or amount; `bad_request_message`
	/// turns the error body into the message reported to clients.
	pub fn into_success_body(
		self,
		bad_request_message: impl FnOnce(&Value) -> String,
	) -> VenueResult<Value> {
		if self.status.is_success() {
			return Ok(self.body);
		}
		if self.status == StatusCode::BAD_REQUEST {
			return Err(VenueError::Venue(bad_request_message(&self.body)));
		}
		Err(VenueError::from_http_failure(self.status.as_u16()))
	}
}

/// Send a request and decode its JSON body
///
/// Error responses with a non-JSON body decode to `Value::Null` so the status
/// code still reaches the caller.
pub(crate) async fn send(request: RequestBuilder) -> VenueResult<VenueResponse> {
	let response = request.send().await?;
	let status = response.status();
	let bytes = response.bytes().await?;
	debug!("Venue responded with {} ({} bytes)", status, bytes.len());

	let body = if bytes.is_empty() {
		Value::Null
	} else {
		match serde_json::from_slice(&bytes) {
			Ok(value) => value,
			Err(e) if status.is_success() => return Err(VenueError::Serialization(e)),
			Err(_) => Value::Null,
		}
	};

	Ok(VenueResponse { status, body })
}

/// Venues that price the native token expect the `0xEeee…` sentinel instead
/// of the wrapped token address
pub(crate) fn native_alias(token: &str, wrapped_native: &str) -> String {
	if token.eq_ignore_ascii_case(wrapped_native) {
		NATIVE_TOKEN_ADDRESS.to_string()
	} else {
		token.to_string()
	}
}

/// String form of a JSON scalar that venues send either quoted or bare
pub(crate) fn scalar_to_string(value: Option<&Value>) -> Option<String> {
	match value? {
		Value::String(s) => Some(s.clone()),
		Value::Number(n) => Some(n.to_string()),
		_ => None,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn test_native_alias() {
		assert_eq!(
			native_alias(
				"0x3BD359c1119da7da1d913d1c4d2b7c461115433a",
				DEFAULT_WRAPPED_NATIVE
			),
			NATIVE_TOKEN_ADDRESS
		);
		assert_eq!(native_alias("0xabc", DEFAULT_WRAPPED_NATIVE), "0xabc");
	}

	#[test]
	fn test_scalar_to_string() {
		let body = json!({"gas": 150000, "gasStr": "21000", "obj": {}});
		assert_eq!(scalar_to_string(body.get("gas")), Some("150000".to_string()));
		assert_eq!(scalar_to_string(body.get("gasStr")), Some("21000".to_string()));
		assert_eq!(scalar_to_string(body.get("obj")), None);
		assert_eq!(scalar_to_string(body.get("missing")), None);
	}

	#[test]
	fn test_into_success_body_maps_statuses() {
		let ok = VenueResponse {
			status: StatusCode::OK,
			body: json!({"a": 1}),
		};
		assert_eq!(ok.into_success_body(|_| String::new()).unwrap()["a"], 1);

		let bad = VenueResponse {
			status: StatusCode::BAD_REQUEST,
			body: json!({"message": "bad pair"}),
		};
		let err = bad
			.into_success_body(|b| b["message"].as_str().unwrap_or("x").to_string())
			.unwrap_err();
		assert!(matches!(err, VenueError::Venue(m) if m == "bad pair"));

		let limited = VenueResponse {
			status: StatusCode::TOO_MANY_REQUESTS,
			body: Value::Null,
		};
		let err = limited.into_success_body(|_| String::new()).unwrap_err();
		assert_eq!(err.status_code(), Some(429));
	}

	#[test]
	fn test_build_client_rejects_bad_header() {
		let config = VenueConfig::new("x", purple_types::VenueType::ZeroX);
		assert!(build_client(&config, &[("0x-version", "v2".to_string())]).is_ok());
		assert!(matches!(
			build_client(&config, &[("bad header", "v".to_string())]),
			Err(VenueError::Configuration { .. })
		));
	}
}
