use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::external::exchange_rate_provider::{ExchangeRateError, ExchangeRateProvider};
use crate::models::{RateSource, RateTable};

pub const DEFAULT_URL: &str = "https://api.exchangerate-api.com/v4/latest/USD";

/// Public exchange-rate endpoint returning `{"base": .., "rates": {..}}`.
pub struct ExchangeRateApiProvider {
    client: reqwest::Client,
    url: String,
}

impl ExchangeRateApiProvider {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, ExchangeRateError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ExchangeRateError::Network(e.to_string()))?;

        Ok(Self { client, url: url.into() })
    }
}

// Only what we read from the response
#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    base: String,
    rates: BTreeMap<String, f64>,
}

#[async_trait]
impl ExchangeRateProvider for ExchangeRateApiProvider {
    async fn fetch_rates(&self) -> Result<RateTable, ExchangeRateError> {
        let resp = self.client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| ExchangeRateError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ExchangeRateError::BadResponse(format!("HTTP {}", status)));
        }

        let body = resp
            .json::<LatestRatesResponse>()
            .await
            .map_err(|e| ExchangeRateError::Parse(e.to_string()))?;

        if body.rates.is_empty() {
            return Err(ExchangeRateError::BadResponse("empty rate table".into()));
        }

        Ok(RateTable {
            base: body.base.to_uppercase(),
            rates: body.rates,
            source: RateSource::Live,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unreachable_endpoint_is_network_error() {
        // Port 1 on loopback refuses connections
        let provider =
            ExchangeRateApiProvider::new("http://127.0.0.1:1/latest/USD", Duration::from_secs(2))
                .unwrap();

        let result = provider.fetch_rates().await;
        assert!(matches!(result, Err(ExchangeRateError::Network(_))));
    }
}
