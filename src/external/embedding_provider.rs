use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("network error: {0}")]
    Network(String),

    #[error("bad response: {0}")]
    BadResponse(String),

    #[error("parse error: {0}")]
    Parse(String),
}

#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// One vector per encoded segment of `text`, all of the same length.
    async fn embed(&self, text: &str) -> Result<Vec<Vec<f64>>, EmbeddingError>;
}
