use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::errors::{AppError, ValidationErrors};
use crate::models::{ProcessModel, ProcessStep};

/// Shared, replaceable supply-chain process model.
#[derive(Clone, Default)]
pub struct ProcessModelStore {
    model: Arc<RwLock<ProcessModel>>,
}

impl ProcessModelStore {
    pub fn new(model: ProcessModel) -> Self {
        Self { model: Arc::new(RwLock::new(model)) }
    }

    pub fn get(&self) -> ProcessModel {
        self.model.read().clone()
    }

    /// Replace all steps. `None` means the payload had no `steps` field.
    pub fn replace(&self, steps: Option<Vec<ProcessStep>>) -> Result<(), AppError> {
        let steps = steps.ok_or_else(|| {
            let mut errors = ValidationErrors::new("Invalid process model data");
            errors.missing("steps");
            AppError::Validation(errors)
        })?;

        let mut errors = ValidationErrors::new("Invalid process model data");
        let mut seen = HashSet::new();
        for step in &steps {
            if step.text.trim().is_empty() {
                errors.missing(&format!("steps[{}].text", step.id));
            }
            if !seen.insert(step.id) {
                errors.invalid(&format!("steps[{}].id", step.id));
            }
        }
        errors.into_result()?;

        self.model.write().steps = steps;
        Ok(())
    }
}
