use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessStep {
    pub id: i64,
    pub text: String,
}

/// Ordered stages of the supply chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessModel {
    pub steps: Vec<ProcessStep>,
}

impl Default for ProcessModel {
    fn default() -> Self {
        let steps = [
            "Raw Material Supply",
            "Manufacturing",
            "Quality Control",
            "Distribution",
            "Retail",
        ]
        .into_iter()
        .zip(1..)
        .map(|(text, id)| ProcessStep { id, text: text.to_string() })
        .collect();

        Self { steps }
    }
}

/// Replacement payload; `steps` is optional so its absence can be reported.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProcessModel {
    pub steps: Option<Vec<ProcessStep>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateAck {
    pub message: String,
}
