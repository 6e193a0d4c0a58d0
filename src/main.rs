use std::sync::Arc;

use anyhow::{anyhow, Context};
use tokio::net::TcpListener;

use goods_forecast::app;
use goods_forecast::config::AppConfig;
use goods_forecast::external::embedding_api::EmbeddingApiProvider;
use goods_forecast::external::embedding_provider::EmbeddingProvider;
use goods_forecast::external::exchange_rate_provider::ExchangeRateProvider;
use goods_forecast::external::exchangerate_api::ExchangeRateApiProvider;
use goods_forecast::logging::{init_logging, LoggingConfig};
use goods_forecast::services::forecasting_service::Forecaster;
use goods_forecast::services::supplier_risk_service::{RiskThresholds, SupplierClassifier};
use goods_forecast::state::AppState;
use goods_forecast::store::catalog::CatalogStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging FIRST
    init_logging(LoggingConfig::from_env()).context("logging setup failed")?;

    let config = AppConfig::from_env().map_err(|e| anyhow!(e))?;

    let forecaster = Forecaster::new(config.growth_rate)?;
    let classifier = SupplierClassifier::new(RiskThresholds::default(), config.supplier_default_policy);
    tracing::info!(
        "Forecasting at {:.2}% per 30 days, supplier default policy {:?}",
        config.growth_rate * 100.0,
        config.supplier_default_policy
    );

    let rate_provider: Arc<dyn ExchangeRateProvider> = Arc::new(
        ExchangeRateApiProvider::new(config.exchange_rate_url.clone(), config.exchange_rate_timeout)
            .context("failed to build exchange rate client")?,
    );
    tracing::info!("Exchange rates from {}", config.exchange_rate_url);

    let embedding_provider: Arc<dyn EmbeddingProvider> = Arc::new(
        EmbeddingApiProvider::new(config.embedding_url.clone(), config.embedding_timeout)
            .context("failed to build embedding client")?,
    );
    tracing::info!("Text embeddings from {}", config.embedding_url);

    let state = AppState::new(
        CatalogStore::new(forecaster, classifier),
        rate_provider,
        embedding_provider,
    );
    let app = app::create_app(state, &config.cors_allowed_origins);

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    tracing::info!("Goods forecast backend running at http://{}/", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
