use axum::{extract::State, response::Json};
use purple_types::VenueInfo;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AggregatorsResponse {
	pub aggregators: Vec<VenueInfo>,
}

/// GET /api/aggregators - Active venues followed by configured but disabled ones
pub async fn get_aggregators(State(state): State<AppState>) -> Json<AggregatorsResponse> {
	Json(AggregatorsResponse {
		aggregators: state.aggregator_service.venues(),
	})
}
