use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AnalyzeRequest {
    pub text: String,
}

/// Per-dimension summary across every embedding row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbeddingStatistics {
    pub mean: Vec<f64>,
    pub std: Vec<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TextAnalysis {
    pub embeddings: Vec<Vec<f64>>,
    pub statistics: EmbeddingStatistics,
}
