//! Quote handlers

use axum::{
	extract::{Query, State},
	response::Json,
};
use purple_service::AggregatorError;
use purple_types::{QuoteParams, QuotesResponse};
use tracing::{info, warn};

use crate::handlers::common::{validation_error, ApiError};
use crate::state::AppState;

/// GET /api/quote - Quote a swap on every venue and return the best one
///
/// Venue failures never fail the request: they are reported per venue and
/// `bestQuote` is `null` when nobody quoted.
pub async fn get_quote(
	State(state): State<AppState>,
	Query(params): Query<QuoteParams>,
) -> Result<Json<QuotesResponse>, ApiError> {
	info!(
		"Received quote request {:?} -> {:?} for {:?}",
		params.token_in, params.token_out, params.amount
	);

	let response = state
		.aggregator_service
		.get_quotes(params)
		.await
		.map_err(|e| match e {
			AggregatorError::Validation(reason) => {
				warn!("Rejected quote request: {}", reason);
				validation_error(reason.to_string())
			},
		})?;

	info!(
		"Returning {} of {} venue quotes (cached: {})",
		response.successful_quotes(),
		response.all_quotes.len(),
		response.cached
	);
	Ok(Json(response))
}
