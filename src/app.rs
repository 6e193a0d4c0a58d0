use axum::http::{HeaderValue, Method};
use axum::Router;
use tower_http::cors::CorsLayer;
use tracing::warn;

use crate::routes::{analyze, exchange_rates, forecast, goods, health, process_model, suppliers};
use crate::state::AppState;

pub fn create_app(state: AppState, allowed_origins: &[String]) -> Router {
    Router::<AppState>::new()
        .nest("/health", health::router())
        .nest("/api/goods", goods::router())
        .nest("/api/forecast", forecast::router())
        .nest("/api/suppliers", suppliers::router())
        .nest("/api/exchange-rates", exchange_rates::router())
        .nest("/api/process-model", process_model::router())
        .nest("/api/analyze", analyze::router())
        .layer(cors_layer(allowed_origins))
        .with_state(state)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE])
}
