use std::str::FromStr;

use tracing::{debug, warn};

use crate::errors::AppError;
use crate::models::{
    DeliveryRating, PerformanceBasis, QualityRating, RiskLevel, SupplierHistory,
    SupplierPerformance,
};

/// What to do for a supplier with neither catalog entries nor history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DefaultPolicy {
    /// Answer with the neutral `Unknown / Unknown / Medium` classification.
    #[default]
    Neutral,
    /// Fail with `UnknownSupplier`.
    Reject,
}

impl FromStr for DefaultPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "neutral" => Ok(DefaultPolicy::Neutral),
            "reject" => Ok(DefaultPolicy::Reject),
            other => Err(format!(
                "Invalid supplier default policy: {}. Must be 'neutral' or 'reject'",
                other
            )),
        }
    }
}

/// Cut-offs and weights for supplier classification.
#[derive(Debug, Clone)]
pub struct RiskThresholds {
    /// Minimum on-time ratio rated `Good`
    pub on_time_good: f64,
    /// Maximum defect rate rated `High` quality
    pub defect_high_quality: f64,
    /// Defect rate at which the defect component saturates
    pub defect_ceiling: f64,
    /// Lead-time variance (days²) at which the variance component saturates
    pub variance_ceiling: f64,
    pub late_weight: f64,
    pub defect_weight: f64,
    pub variance_weight: f64,
    /// Scores below this are `Low` risk
    pub low_below: f64,
    /// Scores at or above this are `High` risk
    pub high_from: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            on_time_good: 0.90,
            defect_high_quality: 0.02,
            defect_ceiling: 0.10,
            variance_ceiling: 25.0,
            late_weight: 50.0,
            defect_weight: 30.0,
            variance_weight: 20.0,
            low_below: 30.0,
            high_from: 60.0,
        }
    }
}

impl RiskThresholds {
    pub fn level(&self, score: f64) -> RiskLevel {
        if score < self.low_below {
            RiskLevel::Low
        } else if score < self.high_from {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }
}

/// Deterministic supplier classifier over observed delivery history.
#[derive(Debug, Clone, Default)]
pub struct SupplierClassifier {
    thresholds: RiskThresholds,
    default_policy: DefaultPolicy,
}

impl SupplierClassifier {
    pub fn new(thresholds: RiskThresholds, default_policy: DefaultPolicy) -> Self {
        Self { thresholds, default_policy }
    }

    pub fn default_policy(&self) -> DefaultPolicy {
        self.default_policy
    }

    /// Classify a supplier.
    ///
    /// With history the result is a pure function of it. Without history a
    /// supplier already in the catalog gets the neutral default; an unknown
    /// supplier gets it only under `DefaultPolicy::Neutral`.
    pub fn classify(
        &self,
        supplier_id: &str,
        history: Option<&SupplierHistory>,
        in_catalog: bool,
    ) -> Result<SupplierPerformance, AppError> {
        if let Some(history) = history {
            return Ok(self.from_history(history));
        }

        if in_catalog || self.default_policy == DefaultPolicy::Neutral {
            debug!("No delivery history for supplier {}, using neutral default", supplier_id);
            return Ok(SupplierPerformance::neutral());
        }

        warn!("Supplier {} has no catalog entry and no history", supplier_id);
        Err(AppError::UnknownSupplier(supplier_id.to_string()))
    }

    /// Weighted risk score in [0, 100].
    pub fn risk_score(&self, history: &SupplierHistory) -> f64 {
        let t = &self.thresholds;
        let late = (1.0 - history.on_time_ratio).clamp(0.0, 1.0);
        let defects = (history.defect_rate / t.defect_ceiling).clamp(0.0, 1.0);
        let variance = (history.lead_time_variance / t.variance_ceiling).clamp(0.0, 1.0);

        t.late_weight * late + t.defect_weight * defects + t.variance_weight * variance
    }

    fn from_history(&self, history: &SupplierHistory) -> SupplierPerformance {
        let t = &self.thresholds;

        let on_time_delivery = if history.on_time_ratio >= t.on_time_good {
            DeliveryRating::Good
        } else {
            DeliveryRating::Poor
        };

        let quality_score = if history.defect_rate <= t.defect_high_quality {
            QualityRating::High
        } else {
            QualityRating::Low
        };

        let score = self.risk_score(history);

        SupplierPerformance {
            on_time_delivery,
            quality_score,
            risk_level: t.level(score),
            risk_score: Some(score),
            basis: PerformanceBasis::History,
        }
    }
}
