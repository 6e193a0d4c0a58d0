use serde::{Deserialize, Serialize};

/// On-time delivery rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeliveryRating {
    Good,
    Poor,
    Unknown,
}

/// Quality rating derived from the defect rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QualityRating {
    High,
    Low,
    Unknown,
}

/// Supplier risk classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Whether a classification came from observed history or the neutral default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PerformanceBasis {
    History,
    Default,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierPerformance {
    pub on_time_delivery: DeliveryRating,
    pub quality_score: QualityRating,
    pub risk_level: RiskLevel,
    /// Weighted score in [0, 100]; absent for the neutral default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_score: Option<f64>,
    pub basis: PerformanceBasis,
}

impl SupplierPerformance {
    /// Classification used when a supplier has no observed history.
    pub fn neutral() -> Self {
        Self {
            on_time_delivery: DeliveryRating::Unknown,
            quality_score: QualityRating::Unknown,
            risk_level: RiskLevel::Medium,
            risk_score: None,
            basis: PerformanceBasis::Default,
        }
    }
}

/// A single observed delivery from a supplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryObservation {
    pub promised_days: u32,
    pub actual_days: u32,
    pub units_received: u32,
    #[serde(default)]
    pub defective_units: u32,
}

impl DeliveryObservation {
    pub fn is_on_time(&self) -> bool {
        self.actual_days <= self.promised_days
    }
}

/// Aggregated delivery metrics for one supplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierHistory {
    /// Share of deliveries that arrived on or before the promised day, 0.0-1.0
    pub on_time_ratio: f64,
    /// Defective units over units received, 0.0-1.0
    pub defect_rate: f64,
    /// Population variance of actual lead times, in days squared
    pub lead_time_variance: f64,
    pub deliveries: usize,
}

impl SupplierHistory {
    /// Aggregate observations; `None` when there are none.
    pub fn from_observations(observations: &[DeliveryObservation]) -> Option<Self> {
        if observations.is_empty() {
            return None;
        }

        let n = observations.len() as f64;
        let on_time = observations.iter().filter(|o| o.is_on_time()).count() as f64;

        let units: u64 = observations.iter().map(|o| o.units_received as u64).sum();
        let defects: u64 = observations.iter().map(|o| o.defective_units as u64).sum();
        let defect_rate = if units == 0 {
            0.0
        } else {
            defects as f64 / units as f64
        };

        let mean_lead = observations.iter().map(|o| o.actual_days as f64).sum::<f64>() / n;
        let lead_time_variance = observations
            .iter()
            .map(|o| (o.actual_days as f64 - mean_lead).powi(2))
            .sum::<f64>()
            / n;

        Some(Self {
            on_time_ratio: on_time / n,
            defect_rate,
            lead_time_variance,
            deliveries: observations.len(),
        })
    }
}

/// Response body for the supplier performance endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierReport {
    pub supplier_id: String,
    pub history: Option<SupplierHistory>,
    pub performance: SupplierPerformance,
}
