use axum::{http::StatusCode, response::Json};
use serde::Serialize;

/// Error response format shared by handlers
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
	pub error: String,
	pub message: String,
	pub timestamp: i64,
}

impl ErrorResponse {
	pub fn new(error: &str, message: impl Into<String>) -> Self {
		Self {
			error: error.to_string(),
			message: message.into(),
			timestamp: chrono::Utc::now().timestamp_millis(),
		}
	}
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub fn validation_error(message: impl Into<String>) -> ApiError {
	(
		StatusCode::BAD_REQUEST,
		Json(ErrorResponse::new("VALIDATION_ERROR", message)),
	)
}
