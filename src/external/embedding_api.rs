use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::external::embedding_provider::{EmbeddingError, EmbeddingProvider};

pub const DEFAULT_URL: &str = "http://localhost:8080/embed";

/// Text-embedding service answering `POST {"text": ..}` with
/// `{"embeddings": [[..], ..]}`.
pub struct EmbeddingApiProvider {
    client: reqwest::Client,
    url: String,
}

impl EmbeddingApiProvider {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, EmbeddingError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| EmbeddingError::Network(e.to_string()))?;

        Ok(Self { client, url: url.into() })
    }
}

#[derive(Debug, Serialize)]
struct EmbedRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbedResponse {
    embeddings: Vec<Vec<f64>>,
}

#[async_trait]
impl EmbeddingProvider for EmbeddingApiProvider {
    async fn embed(&self, text: &str) -> Result<Vec<Vec<f64>>, EmbeddingError> {
        let resp = self
            .client
            .post(&self.url)
            .json(&EmbedRequest { text })
            .send()
            .await
            .map_err(|e| EmbeddingError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(EmbeddingError::BadResponse(format!("HTTP {}", status)));
        }

        let body = resp
            .json::<EmbedResponse>()
            .await
            .map_err(|e| EmbeddingError::Parse(e.to_string()))?;

        Ok(body.embeddings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unreachable_endpoint_is_network_error() {
        let provider =
            EmbeddingApiProvider::new("http://127.0.0.1:1/embed", Duration::from_secs(2)).unwrap();

        let result = provider.embed("steel bolts").await;
        assert!(matches!(result, Err(EmbeddingError::Network(_))));
    }
}
