use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use tracing::info;

use crate::errors::AppError;
use crate::models::{ForecastQuery, PredictionBlock};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(project_price))
}

/// Projection for an arbitrary price with the configured growth rate.
pub async fn project_price(
    State(state): State<AppState>,
    Query(query): Query<ForecastQuery>,
) -> Result<Json<PredictionBlock>, AppError> {
    info!("GET /api/forecast - Projecting price {}", query.price);
    let block = state.catalog.read().forecaster().project(query.price)?;
    Ok(Json(block))
}
