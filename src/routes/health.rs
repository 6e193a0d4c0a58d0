use axum::extract::State;
use axum::routing::get;
use axum::Router;
use tracing::info;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(health))
}

async fn health(State(state): State<AppState>) -> &'static str {
    let goods = state.catalog.read().len();
    info!("GET /health - Health check ({} goods in catalog)", goods);
    "OK"
}
