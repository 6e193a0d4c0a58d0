use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use tracing::info;

use crate::models::RateTable;
use crate::services::exchange_rate_service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_rates))
}

/// Always succeeds; falls back to the static table when the provider fails.
pub async fn get_rates(State(state): State<AppState>) -> Json<RateTable> {
    info!("GET /api/exchange-rates - Fetching exchange rates");
    Json(exchange_rate_service::current_rates(state.rate_provider.as_ref()).await)
}
