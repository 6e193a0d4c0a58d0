use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::models::{AnalyzeRequest, TextAnalysis};
use crate::services::analysis_service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(analyze_text))
}

pub async fn analyze_text(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<TextAnalysis>, AppError> {
    // An unreadable body carries no text
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!("Unreadable analyze request: {}", rejection.body_text());
            AnalyzeRequest::default()
        }
    };
    info!("POST /api/analyze - Analyzing {} chars", request.text.len());

    analysis_service::analyze(state.embedding_provider.as_ref(), &request.text)
        .await
        .map(Json)
}
