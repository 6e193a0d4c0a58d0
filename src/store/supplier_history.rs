use std::sync::Arc;

use dashmap::DashMap;
use tracing::info;

use crate::errors::{AppError, ValidationErrors};
use crate::models::{DeliveryObservation, SupplierHistory};

/// Thread-safe log of delivery observations per supplier.
#[derive(Clone, Default)]
pub struct SupplierBook {
    deliveries: Arc<DashMap<String, Vec<DeliveryObservation>>>,
}

impl SupplierBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an observation and return the supplier's updated history.
    pub fn record(
        &self,
        supplier_id: &str,
        observation: DeliveryObservation,
    ) -> Result<SupplierHistory, AppError> {
        validate_observation(supplier_id, &observation)?;

        let mut entry = self.deliveries.entry(supplier_id.to_string()).or_default();
        entry.push(observation);
        let count = entry.len();

        info!("Recorded delivery for supplier {} ({} total)", supplier_id, count);

        SupplierHistory::from_observations(entry.value()).ok_or_else(|| {
            AppError::NotFound(format!("No deliveries recorded for supplier {}", supplier_id))
        })
    }

    /// Aggregated history, `None` if nothing was recorded.
    pub fn history(&self, supplier_id: &str) -> Option<SupplierHistory> {
        self.deliveries
            .get(supplier_id)
            .and_then(|entry| SupplierHistory::from_observations(entry.value()))
    }

    pub fn deliveries(&self, supplier_id: &str) -> usize {
        self.deliveries.get(supplier_id).map(|e| e.len()).unwrap_or(0)
    }
}

fn validate_observation(
    supplier_id: &str,
    observation: &DeliveryObservation,
) -> Result<(), AppError> {
    let mut errors = ValidationErrors::new("Invalid delivery observation");

    if supplier_id.trim().is_empty() {
        errors.missing("supplierId");
    }
    if observation.promised_days == 0 {
        errors.invalid("promisedDays");
    }
    if observation.units_received == 0 {
        errors.invalid("unitsReceived");
    }
    if observation.defective_units > observation.units_received {
        errors.invalid("defectiveUnits");
    }

    errors.into_result()
}
