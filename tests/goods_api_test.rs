/// HTTP-level tests for the catalog, forecast, supplier, exchange-rate,
/// process-model and text-analysis endpoints, driven through the router
/// without a socket.
use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use goods_forecast::app::create_app;
use goods_forecast::external::embedding_provider::{EmbeddingError, EmbeddingProvider};
use goods_forecast::external::exchange_rate_provider::{ExchangeRateError, ExchangeRateProvider};
use goods_forecast::models::{RateSource, RateTable};
use goods_forecast::services::forecasting_service::Forecaster;
use goods_forecast::services::supplier_risk_service::{
    DefaultPolicy, RiskThresholds, SupplierClassifier,
};
use goods_forecast::state::AppState;
use goods_forecast::store::catalog::CatalogStore;

// ---------------------------------------------------------------------------
// Harness
// ---------------------------------------------------------------------------

struct UnreachableRates;

#[async_trait]
impl ExchangeRateProvider for UnreachableRates {
    async fn fetch_rates(&self) -> Result<RateTable, ExchangeRateError> {
        Err(ExchangeRateError::Network("simulated network failure".into()))
    }
}

struct LiveRates;

#[async_trait]
impl ExchangeRateProvider for LiveRates {
    async fn fetch_rates(&self) -> Result<RateTable, ExchangeRateError> {
        let mut rates = BTreeMap::new();
        rates.insert("USD".to_string(), 1.0);
        rates.insert("EUR".to_string(), 0.5);
        Ok(RateTable { base: "USD".into(), rates, source: RateSource::Live })
    }
}

/// Two rows so the spread per dimension is non-trivial.
struct FixedEmbeddings;

#[async_trait]
impl EmbeddingProvider for FixedEmbeddings {
    async fn embed(&self, _text: &str) -> Result<Vec<Vec<f64>>, EmbeddingError> {
        Ok(vec![vec![1.0, -2.0, 0.5], vec![3.0, -2.0, 1.5]])
    }
}

struct UnreachableEmbeddings;

#[async_trait]
impl EmbeddingProvider for UnreachableEmbeddings {
    async fn embed(&self, _text: &str) -> Result<Vec<Vec<f64>>, EmbeddingError> {
        Err(EmbeddingError::Network("simulated network failure".into()))
    }
}

fn build_app(provider: Arc<dyn ExchangeRateProvider>, policy: DefaultPolicy) -> Router {
    build_app_with(provider, Arc::new(FixedEmbeddings), policy)
}

fn build_app_with(
    rates: Arc<dyn ExchangeRateProvider>,
    embeddings: Arc<dyn EmbeddingProvider>,
    policy: DefaultPolicy,
) -> Router {
    let store = CatalogStore::new(
        Forecaster::default(),
        SupplierClassifier::new(RiskThresholds::default(), policy),
    );
    create_app(
        AppState::new(store, rates, embeddings),
        &["http://localhost:3000".to_string()],
    )
}

fn default_app() -> Router {
    build_app(Arc::new(UnreachableRates), DefaultPolicy::Neutral)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(
            String::from_utf8_lossy(&bytes).into_owned(),
        ))
    };
    (status, value)
}

fn widget() -> Value {
    json!({
        "goodsId": "G1",
        "goodsName": "Widget",
        "cost": "5",
        "price": "10",
        "date": "2024-01-01",
        "supplierId": "S1",
        "supplierName": "Acme"
    })
}

async fn catalog_len(app: &Router) -> usize {
    let (status, body) = send(app, "GET", "/api/goods", None).await;
    assert_eq!(status, StatusCode::OK);
    body.as_array().unwrap().len()
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_add_widget_creates_record_with_predictions() {
    let app = default_app();

    let (status, record) = send(&app, "POST", "/api/goods", Some(widget())).await;
    assert_eq!(status, StatusCode::CREATED);

    let current: f64 = record["currentPrice"].as_str().unwrap().parse().unwrap();
    assert_eq!(current, 10.0);
    assert!(record["predictions"]["up"]["30"].as_f64().unwrap() > 10.0);
    assert!(record["predictions"]["down"]["30"].as_f64().unwrap() < 10.0);
    assert_eq!(record["supplierPerformance"]["riskLevel"], "Medium");
    assert_eq!(record["supplierPerformance"]["basis"], "default");

    assert_eq!(catalog_len(&app).await, 1);
}

#[tokio::test]
async fn test_each_blank_field_is_rejected_without_changing_catalog() {
    let app = default_app();
    let fields = [
        "goodsId", "goodsName", "cost", "price", "date", "supplierId", "supplierName",
    ];

    for field in fields {
        let mut body = widget();
        body[field] = json!("");

        let (status, error) = send(&app, "POST", "/api/goods", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "field {}", field);
        assert_eq!(error["missing"], json!([field]));
        assert!(error["error"].as_str().is_some());
        assert_eq!(catalog_len(&app).await, 0);
    }
}

#[tokio::test]
async fn test_absent_fields_are_reported_missing() {
    let app = default_app();
    let (status, error) =
        send(&app, "POST", "/api/goods", Some(json!({"goodsId": "G1"}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["missing"].as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn test_null_field_is_reported_missing() {
    let app = default_app();
    let mut body = widget();
    body["price"] = Value::Null;

    let (status, error) = send(&app, "POST", "/api/goods", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["missing"], json!(["price"]));
    assert_eq!(catalog_len(&app).await, 0);
}

#[tokio::test]
async fn test_numeric_amounts_are_accepted() {
    let app = default_app();
    let mut body = widget();
    body["cost"] = json!(5);
    body["price"] = json!(10);

    let (status, record) = send(&app, "POST", "/api/goods", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(record["currentPrice"], "10");

    let mut body = widget();
    body["goodsId"] = json!("G2");
    body["price"] = json!(-3.5);
    let (status, error) = send(&app, "POST", "/api/goods", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["invalid"], json!(["price"]));
}

#[tokio::test]
async fn test_unreadable_body_is_a_validation_error() {
    let app = default_app();
    let mut body = widget();
    body["cost"] = json!({"amount": 5});

    let (status, error) = send(&app, "POST", "/api/goods", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error["error"]
        .as_str()
        .unwrap()
        .starts_with("Please fill in all fields with valid values"));

    let (status, error) = send(&app, "POST", "/api/goods", Some(json!(["G1"]))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error["error"].is_string());
    assert_eq!(catalog_len(&app).await, 0);
}

#[tokio::test]
async fn test_duplicate_goods_id_conflicts() {
    let app = default_app();
    send(&app, "POST", "/api/goods", Some(widget())).await;

    let (status, _) = send(&app, "POST", "/api/goods", Some(widget())).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(catalog_len(&app).await, 1);
}

#[tokio::test]
async fn test_list_and_get_preserve_order() {
    let app = default_app();
    for id in ["B", "A", "C"] {
        let mut body = widget();
        body["goodsId"] = json!(id);
        let (status, _) = send(&app, "POST", "/api/goods", Some(body)).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, list) = send(&app, "GET", "/api/goods", None).await;
    let ids: Vec<&str> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["goodsId"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["B", "A", "C"]);

    let (status, record) = send(&app, "GET", "/api/goods/A", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(record["goodsName"], "Widget");

    let (status, _) = send(&app, "GET", "/api/goods/Z", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_converted_price_uses_fallback_when_rates_unreachable() {
    let app = default_app();
    send(&app, "POST", "/api/goods", Some(widget())).await;

    let (status, body) = send(&app, "GET", "/api/goods/G1/price?currency=ngn", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["currency"], "NGN");
    assert_eq!(body["rate"], 460.0);
    assert_eq!(body["amount"], 4600.0);

    let (status, _) = send(&app, "GET", "/api/goods/G1/price?currency=XYZ", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_converted_price_uses_live_rates() {
    let app = build_app(Arc::new(LiveRates), DefaultPolicy::Neutral);
    send(&app, "POST", "/api/goods", Some(widget())).await;

    let (status, body) = send(&app, "GET", "/api/goods/G1/price?currency=EUR", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["amount"], 5.0);
}

// ---------------------------------------------------------------------------
// Forecast
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_forecast_endpoint_is_monotonic_in_horizon() {
    let app = default_app();
    let (status, block) = send(&app, "GET", "/api/forecast?price=80", None).await;
    assert_eq!(status, StatusCode::OK);

    let up: Vec<f64> = ["30", "50", "60"]
        .iter()
        .map(|h| block["up"][h].as_f64().unwrap())
        .collect();
    let down: Vec<f64> = ["30", "50", "60"]
        .iter()
        .map(|h| block["down"][h].as_f64().unwrap())
        .collect();

    assert!(up.windows(2).all(|w| w[0] < w[1]));
    assert!(down.windows(2).all(|w| w[0] > w[1]));
    assert!(up[0] > 80.0 && down[0] < 80.0);
}

#[tokio::test]
async fn test_forecast_rejects_non_positive_price() {
    let app = default_app();
    let (status, _) = send(&app, "GET", "/api/forecast?price=0", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Suppliers
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_recorded_history_drives_new_records() {
    let app = default_app();
    for actual in [4, 5, 5] {
        let (status, _) = send(
            &app,
            "POST",
            "/api/suppliers/S1/deliveries",
            Some(json!({
                "promisedDays": 5,
                "actualDays": actual,
                "unitsReceived": 100,
                "defectiveUnits": 0
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, record) = send(&app, "POST", "/api/goods", Some(widget())).await;
    assert_eq!(record["supplierPerformance"]["onTimeDelivery"], "Good");
    assert_eq!(record["supplierPerformance"]["qualityScore"], "High");
    assert_eq!(record["supplierPerformance"]["riskLevel"], "Low");
    assert_eq!(record["supplierPerformance"]["basis"], "history");
}

#[tokio::test]
async fn test_record_is_not_reclassified_by_later_history() {
    let app = default_app();
    send(&app, "POST", "/api/goods", Some(widget())).await;

    send(
        &app,
        "POST",
        "/api/suppliers/S1/deliveries",
        Some(json!({"promisedDays": 2, "actualDays": 9, "unitsReceived": 10, "defectiveUnits": 5})),
    )
    .await;

    let (_, record) = send(&app, "GET", "/api/goods/G1", None).await;
    assert_eq!(record["supplierPerformance"]["basis"], "default");

    let (status, report) = send(&app, "GET", "/api/suppliers/S1/performance", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["performance"]["onTimeDelivery"], "Poor");
    assert_eq!(report["performance"]["qualityScore"], "Low");
    assert_eq!(report["history"]["deliveries"], 1);
}

#[tokio::test]
async fn test_invalid_delivery_rejected() {
    let app = default_app();
    let (status, error) = send(
        &app,
        "POST",
        "/api/suppliers/S1/deliveries",
        Some(json!({"promisedDays": 3, "actualDays": 3, "unitsReceived": 0})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["invalid"], json!(["unitsReceived"]));
}

#[tokio::test]
async fn test_unknown_supplier_follows_default_policy() {
    let neutral = default_app();
    let (status, report) = send(&neutral, "GET", "/api/suppliers/S9/performance", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["performance"]["riskLevel"], "Medium");
    assert_eq!(report["performance"]["onTimeDelivery"], "Unknown");

    let strict = build_app(Arc::new(UnreachableRates), DefaultPolicy::Reject);
    let (status, _) = send(&strict, "GET", "/api/suppliers/S9/performance", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // A catalog entry makes the supplier known even without history
    send(&strict, "POST", "/api/goods", Some(widget())).await;
    let (status, _) = send(&strict, "GET", "/api/suppliers/S1/performance", None).await;
    assert_eq!(status, StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Exchange rates
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_rate_fetch_failure_returns_fallback_table() {
    let app = default_app();
    let (status, table) = send(&app, "GET", "/api/exchange-rates", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        table["rates"],
        json!({"USD": 1.0, "EUR": 0.85, "GBP": 0.73, "NGN": 460.0})
    );
    assert_eq!(table["source"], "fallback");
}

#[tokio::test]
async fn test_live_rates_are_served() {
    let app = build_app(Arc::new(LiveRates), DefaultPolicy::Neutral);
    let (_, table) = send(&app, "GET", "/api/exchange-rates", None).await;
    assert_eq!(table["source"], "live");
    assert_eq!(table["rates"]["EUR"], 0.5);
}

// ---------------------------------------------------------------------------
// Text analysis
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_analyze_returns_embeddings_and_statistics() {
    let app = default_app();
    let (status, body) = send(
        &app,
        "POST",
        "/api/analyze",
        Some(json!({"text": "Galvanized steel bolts, 500 units"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["embeddings"].as_array().unwrap().len(), 2);
    assert_eq!(body["statistics"]["mean"], json!([2.0, -2.0, 1.0]));
    assert_eq!(body["statistics"]["std"], json!([1.0, 0.0, 0.5]));
}

#[tokio::test]
async fn test_analyze_without_text_is_rejected() {
    let app = default_app();
    for body in [json!({"text": ""}), json!({}), json!({"text": 42})] {
        let (status, error) = send(&app, "POST", "/api/analyze", Some(body.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body {}", body);
        assert_eq!(error["error"], "No text provided");
    }
}

#[tokio::test]
async fn test_analyze_reports_embedding_outage() {
    let app = build_app_with(
        Arc::new(UnreachableRates),
        Arc::new(UnreachableEmbeddings),
        DefaultPolicy::Neutral,
    );
    let (status, error) =
        send(&app, "POST", "/api/analyze", Some(json!({"text": "bolts"}))).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(error["error"].as_str().unwrap().contains("Embedding service failed"));
}

// ---------------------------------------------------------------------------
// Process model and health
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_process_model_round_trip() {
    let app = default_app();

    let (status, model) = send(&app, "GET", "/api/process-model", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(model["steps"].as_array().unwrap().len(), 5);
    assert_eq!(model["steps"][0]["text"], "Raw Material Supply");

    let steps = json!({"steps": [{"id": 1, "text": "Sourcing"}, {"id": 2, "text": "Retail"}]});
    let (status, ack) = send(&app, "POST", "/api/process-model", Some(steps.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ack["message"], "Process model updated successfully");

    let (_, model) = send(&app, "GET", "/api/process-model", None).await;
    assert_eq!(model, steps);
}

#[tokio::test]
async fn test_process_model_requires_steps() {
    let app = default_app();
    let (status, error) = send(&app, "POST", "/api/process-model", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["error"], "Invalid process model data");
}

#[tokio::test]
async fn test_health() {
    let app = default_app();
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("OK".into()));
}
