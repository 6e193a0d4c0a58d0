use async_trait::async_trait;
use thiserror::Error;

use crate::models::RateTable;

#[derive(Debug, Error)]
pub enum ExchangeRateError {
    #[error("network error: {0}")]
    Network(String),

    #[error("bad response: {0}")]
    BadResponse(String),

    #[error("parse error: {0}")]
    Parse(String),
}

#[async_trait]
pub trait ExchangeRateProvider: Send + Sync {
    /// Latest rates relative to USD.
    async fn fetch_rates(&self) -> Result<RateTable, ExchangeRateError>;
}
