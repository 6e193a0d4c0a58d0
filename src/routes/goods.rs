use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use bigdecimal::ToPrimitive;
use http::StatusCode;
use tracing::{error, info, warn};

use crate::errors::{AppError, ValidationErrors};
use crate::models::{ConvertedPrice, CreateGoods, GoodsRecord, PriceQuery, BASE_CURRENCY};
use crate::services::exchange_rate_service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_goods).post(create_goods))
        .route("/:goods_id", get(get_goods))
        .route("/:goods_id/price", get(get_converted_price))
}

pub async fn create_goods(
    State(state): State<AppState>,
    payload: Result<Json<CreateGoods>, JsonRejection>,
) -> Result<(StatusCode, Json<GoodsRecord>), AppError> {
    let Json(data) = payload.map_err(|rejection| {
        warn!("Unreadable goods submission: {}", rejection.body_text());
        AppError::Validation(ValidationErrors::new(format!(
            "Please fill in all fields with valid values: {}",
            rejection.body_text()
        )))
    })?;
    info!("POST /api/goods - Adding goods {}", data.goods_id);
    let history = state.suppliers.history(data.supplier_id.trim());
    let record = state
        .catalog
        .write()
        .add(data, history.as_ref())
        .map_err(|e| {
            match &e {
                AppError::Validation(_) | AppError::Conflict(_) => {
                    warn!("Goods submission rejected: {}", e)
                }
                _ => error!("Failed to add goods: {}", e),
            }
            e
        })?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn list_goods(State(state): State<AppState>) -> Json<Vec<GoodsRecord>> {
    info!("GET /api/goods - Listing catalog");
    Json(state.catalog.read().list().to_vec())
}

pub async fn get_goods(
    State(state): State<AppState>,
    Path(goods_id): Path<String>,
) -> Result<Json<GoodsRecord>, AppError> {
    info!("GET /api/goods/{} - Fetching goods", goods_id);
    lookup(&state, &goods_id).map(Json)
}

pub async fn get_converted_price(
    State(state): State<AppState>,
    Path(goods_id): Path<String>,
    Query(query): Query<PriceQuery>,
) -> Result<Json<ConvertedPrice>, AppError> {
    let currency = query
        .currency
        .unwrap_or_else(|| BASE_CURRENCY.to_string())
        .to_uppercase();
    info!("GET /api/goods/{}/price - Converting to {}", goods_id, currency);

    let record = lookup(&state, &goods_id)?;
    let amount = record.current_price.to_f64().ok_or_else(|| {
        AppError::InvalidInput(format!("price {} is out of range", record.current_price))
    })?;

    let table = exchange_rate_service::current_rates(state.rate_provider.as_ref()).await;
    let (rate, converted) = exchange_rate_service::convert(amount, &currency, &table)?;

    Ok(Json(ConvertedPrice {
        goods_id: record.goods_id,
        currency,
        rate,
        amount: converted,
    }))
}

fn lookup(state: &AppState, goods_id: &str) -> Result<GoodsRecord, AppError> {
    state.catalog.read().get(goods_id).cloned().ok_or_else(|| {
        warn!("Goods {} not found", goods_id);
        AppError::NotFound(format!("Goods {} not found", goods_id))
    })
}
