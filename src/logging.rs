use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid logging config: {0}")]
    Config(String),

    #[error("invalid log filter: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),

    #[error("loki setup failed: {0}")]
    Loki(String),

    #[error(transparent)]
    Init(#[from] tracing_subscriber::util::TryInitError),
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub loki_enabled: bool,
    pub loki_url: Option<String>,
    pub service_name: String,
    pub environment: String,
    pub log_level: String,
}

impl LoggingConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Self {
            loki_enabled: lookup("LOKI_ENABLED")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(false),
            loki_url: lookup("LOKI_URL"),
            service_name: or("SERVICE_NAME", "goods-forecast"),
            environment: or("ENVIRONMENT", "development"),
            log_level: or("RUST_LOG", "info"),
        }
    }

    /// Loki endpoint to ship to, when shipping is switched on.
    pub fn loki_endpoint(&self) -> Option<&str> {
        self.loki_url.as_deref().filter(|_| self.loki_enabled)
    }

    pub fn validate(&self) -> Result<(), LoggingError> {
        EnvFilter::try_new(&self.log_level)?;

        match (self.loki_enabled, self.loki_url.as_deref()) {
            (true, None) => Err(LoggingError::Config(
                "LOKI_ENABLED is true but LOKI_URL is not set".to_string(),
            )),
            (true, Some(raw)) => url::Url::parse(raw)
                .map(|_| ())
                .map_err(|e| LoggingError::Config(format!("Invalid LOKI_URL {}: {}", raw, e))),
            (false, _) => Ok(()),
        }
    }
}

/// Install the global subscriber: env filter and console output, plus a Loki
/// layer when the `loki` feature is built and enabled in `config`.
pub fn init_logging(config: LoggingConfig) -> Result<(), LoggingError> {
    config.validate()?;

    let registry = tracing_subscriber::registry()
        .with(EnvFilter::try_new(&config.log_level)?)
        .with(tracing_subscriber::fmt::layer());

    #[cfg(feature = "loki")]
    let registry = registry.with(loki_layer(&config)?);

    registry.try_init()?;

    tracing::info!(
        service = %config.service_name,
        environment = %config.environment,
        level = %config.log_level,
        loki = config.loki_endpoint().unwrap_or("off"),
        "Logging initialized"
    );

    #[cfg(not(feature = "loki"))]
    if config.loki_enabled {
        tracing::warn!("LOKI_ENABLED is set but this build has no loki support");
    }

    Ok(())
}

/// `None` leaves the subscriber console-only.
#[cfg(feature = "loki")]
fn loki_layer(config: &LoggingConfig) -> Result<Option<tracing_loki::Layer>, LoggingError> {
    let Some(endpoint) = config.loki_endpoint() else {
        return Ok(None);
    };
    let loki = |e: &dyn std::fmt::Display| LoggingError::Loki(e.to_string());

    let url = url::Url::parse(endpoint).map_err(|e| loki(&e))?;
    let (layer, task) = tracing_loki::builder()
        .label("service", config.service_name.as_str())
        .map_err(|e| loki(&e))?
        .label("environment", config.environment.as_str())
        .map_err(|e| loki(&e))?
        .build_url(url)
        .map_err(|e| loki(&e))?;

    // Ships buffered events for the life of the process
    tokio::spawn(task);
    Ok(Some(layer))
}
