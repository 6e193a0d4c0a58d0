use std::net::SocketAddr;
use std::time::Duration;

use crate::external::{embedding_api, exchangerate_api};
use crate::services::forecasting_service::DEFAULT_GROWTH_RATE;
use crate::services::supplier_risk_service::DefaultPolicy;

const DEFAULT_ORIGINS: [&str; 4] = [
    "http://localhost:3000",
    "http://localhost:3001",
    "http://localhost:3002",
    "http://localhost:3003",
];

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub growth_rate: f64,
    pub supplier_default_policy: DefaultPolicy,
    pub exchange_rate_url: String,
    pub exchange_rate_timeout: Duration,
    pub embedding_url: String,
    pub embedding_timeout: Duration,
    pub cors_allowed_origins: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 5000)),
            growth_rate: DEFAULT_GROWTH_RATE,
            supplier_default_policy: DefaultPolicy::Neutral,
            exchange_rate_url: exchangerate_api::DEFAULT_URL.to_string(),
            exchange_rate_timeout: Duration::from_secs(10),
            embedding_url: embedding_api::DEFAULT_URL.to_string(),
            embedding_timeout: Duration::from_secs(30),
            cors_allowed_origins: DEFAULT_ORIGINS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let bind_addr = match lookup("BIND_ADDR") {
            Some(raw) => raw
                .parse::<SocketAddr>()
                .map_err(|_| format!("Invalid BIND_ADDR: {}", raw))?,
            None => defaults.bind_addr,
        };

        let growth_rate = match lookup("FORECAST_GROWTH_RATE") {
            Some(raw) => raw
                .parse::<f64>()
                .map_err(|_| format!("Invalid FORECAST_GROWTH_RATE: {}", raw))?,
            None => defaults.growth_rate,
        };

        let supplier_default_policy = match lookup("SUPPLIER_DEFAULT_POLICY") {
            Some(raw) => raw.parse::<DefaultPolicy>()?,
            None => defaults.supplier_default_policy,
        };

        let exchange_rate_timeout =
            seconds(&lookup, "EXCHANGE_RATE_TIMEOUT_SECS")?.unwrap_or(defaults.exchange_rate_timeout);
        let embedding_timeout =
            seconds(&lookup, "EMBEDDING_TIMEOUT_SECS")?.unwrap_or(defaults.embedding_timeout);

        let cors_allowed_origins = match lookup("CORS_ALLOWED_ORIGINS") {
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            None => defaults.cors_allowed_origins,
        };

        let config = Self {
            bind_addr,
            growth_rate,
            supplier_default_policy,
            exchange_rate_url: lookup("EXCHANGE_RATE_URL").unwrap_or(defaults.exchange_rate_url),
            exchange_rate_timeout,
            embedding_url: lookup("EMBEDDING_URL").unwrap_or(defaults.embedding_url),
            embedding_timeout,
            cors_allowed_origins,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        if !(self.growth_rate > 0.0 && self.growth_rate < 1.0) {
            return Err(format!(
                "FORECAST_GROWTH_RATE must be between 0 and 1, got {}",
                self.growth_rate
            ));
        }
        if self.exchange_rate_timeout.is_zero() {
            return Err("EXCHANGE_RATE_TIMEOUT_SECS must be positive".to_string());
        }
        if self.embedding_timeout.is_zero() {
            return Err("EMBEDDING_TIMEOUT_SECS must be positive".to_string());
        }
        url::Url::parse(&self.exchange_rate_url)
            .map_err(|e| format!("Invalid EXCHANGE_RATE_URL {}: {}", self.exchange_rate_url, e))?;
        url::Url::parse(&self.embedding_url)
            .map_err(|e| format!("Invalid EMBEDDING_URL {}: {}", self.embedding_url, e))?;
        Ok(())
    }
}

fn seconds<F>(lookup: &F, key: &str) -> Result<Option<Duration>, String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|raw| {
            raw.parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| format!("Invalid {}: {}", key, raw))
        })
        .transpose()
}
