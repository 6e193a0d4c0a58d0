use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::models::{ProcessModel, UpdateAck, UpdateProcessModel};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_process_model).post(update_process_model))
}

pub async fn get_process_model(State(state): State<AppState>) -> Json<ProcessModel> {
    info!("GET /api/process-model - Fetching process model");
    Json(state.process_model.get())
}

pub async fn update_process_model(
    State(state): State<AppState>,
    Json(data): Json<UpdateProcessModel>,
) -> Result<Json<UpdateAck>, AppError> {
    info!("POST /api/process-model - Replacing process model");
    state.process_model.replace(data.steps).map_err(|e| {
        warn!("Process model update rejected: {}", e);
        e
    })?;
    Ok(Json(UpdateAck { message: "Process model updated successfully".to_string() }))
}
