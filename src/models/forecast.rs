use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Direction of a price projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scenario {
    Up,
    Down,
}

impl Scenario {
    /// Sign applied to the growth rate.
    pub fn direction(&self) -> f64 {
        match self {
            Scenario::Up => 1.0,
            Scenario::Down => -1.0,
        }
    }
}

/// Projected prices per scenario, keyed by horizon in days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionBlock {
    pub up: BTreeMap<u32, f64>,
    pub down: BTreeMap<u32, f64>,
    pub growth_rate: f64,
}

impl PredictionBlock {
    pub fn scenario(&self, scenario: Scenario) -> &BTreeMap<u32, f64> {
        match scenario {
            Scenario::Up => &self.up,
            Scenario::Down => &self.down,
        }
    }
}

/// Query for an on-demand projection.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastQuery {
    pub price: f64,
}
