use tracing::{error, info};

use crate::errors::AppError;
use crate::external::embedding_provider::EmbeddingProvider;
use crate::models::{EmbeddingStatistics, TextAnalysis};

/// Embed `text` and summarize the vectors dimension by dimension.
pub async fn analyze(provider: &dyn EmbeddingProvider, text: &str) -> Result<TextAnalysis, AppError> {
    if text.trim().is_empty() {
        return Err(AppError::InvalidInput("No text provided".to_string()));
    }

    let embeddings = provider.embed(text).await.map_err(|e| {
        error!("Embedding request failed: {}", e);
        AppError::External(format!("Embedding service failed: {}", e))
    })?;

    let statistics = summarize(&embeddings)?;
    info!(
        "Embedded {} chars into {} x {} vectors",
        text.len(),
        embeddings.len(),
        statistics.mean.len()
    );

    Ok(TextAnalysis { embeddings, statistics })
}

/// Mean and population standard deviation of each column.
///
/// Rows must be non-empty and share one length.
pub fn summarize(rows: &[Vec<f64>]) -> Result<EmbeddingStatistics, AppError> {
    let width = match rows.first() {
        Some(first) if !first.is_empty() => first.len(),
        _ => return Err(AppError::External("Embedding service returned no vectors".into())),
    };
    if rows.iter().any(|row| row.len() != width) {
        return Err(AppError::External(
            "Embedding service returned vectors of different lengths".into(),
        ));
    }

    let n = rows.len() as f64;
    let mean: Vec<f64> = (0..width)
        .map(|d| rows.iter().map(|row| row[d]).sum::<f64>() / n)
        .collect();
    let std = mean
        .iter()
        .enumerate()
        .map(|(d, m)| {
            let variance = rows.iter().map(|row| (row[d] - m).powi(2)).sum::<f64>() / n;
            variance.sqrt()
        })
        .collect();

    Ok(EmbeddingStatistics { mean, std })
}
