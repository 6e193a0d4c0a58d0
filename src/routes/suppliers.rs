use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use http::StatusCode;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::models::{DeliveryObservation, SupplierHistory, SupplierReport};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/:supplier_id/deliveries", post(record_delivery))
        .route("/:supplier_id/performance", get(get_performance))
}

pub async fn record_delivery(
    State(state): State<AppState>,
    Path(supplier_id): Path<String>,
    Json(observation): Json<DeliveryObservation>,
) -> Result<(StatusCode, Json<SupplierHistory>), AppError> {
    info!("POST /api/suppliers/{}/deliveries - Recording delivery", supplier_id);
    let history = state.suppliers.record(&supplier_id, observation).map_err(|e| {
        warn!("Delivery for supplier {} rejected: {}", supplier_id, e);
        e
    })?;
    Ok((StatusCode::CREATED, Json(history)))
}

/// Classification from the supplier's current history.
///
/// Catalog records keep the classification made when they were added.
pub async fn get_performance(
    State(state): State<AppState>,
    Path(supplier_id): Path<String>,
) -> Result<Json<SupplierReport>, AppError> {
    info!("GET /api/suppliers/{}/performance - Classifying supplier", supplier_id);
    let history = state.suppliers.history(&supplier_id);

    let performance = {
        let catalog = state.catalog.read();
        let in_catalog = catalog.has_supplier(&supplier_id);
        catalog.classifier().classify(&supplier_id, history.as_ref(), in_catalog)?
    };

    Ok(Json(SupplierReport { supplier_id, history, performance }))
}
