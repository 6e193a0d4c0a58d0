use std::collections::BTreeMap;

use tracing::debug;

use crate::errors::AppError;
use crate::models::{PredictionBlock, Scenario};

pub const DEFAULT_GROWTH_RATE: f64 = 0.03;
pub const DEFAULT_HORIZONS: [u32; 3] = [30, 50, 60];

/// Length of one compounding period in days.
pub const BASE_PERIOD_DAYS: f64 = 30.0;

/// Horizon-sensitive compounding projection.
///
/// For each horizon `h` (days) a scenario projects
/// `current_price * (1 ± growth_rate)^(h / 30)`, so longer horizons
/// diverge further from the current price in both directions.
#[derive(Debug, Clone)]
pub struct Forecaster {
    growth_rate: f64,
    horizons: Vec<u32>,
}

impl Default for Forecaster {
    fn default() -> Self {
        Self {
            growth_rate: DEFAULT_GROWTH_RATE,
            horizons: DEFAULT_HORIZONS.to_vec(),
        }
    }
}

impl Forecaster {
    pub fn new(growth_rate: f64) -> Result<Self, AppError> {
        Self::with_horizons(growth_rate, DEFAULT_HORIZONS.to_vec())
    }

    pub fn with_horizons(growth_rate: f64, mut horizons: Vec<u32>) -> Result<Self, AppError> {
        if !growth_rate.is_finite() || growth_rate <= 0.0 || growth_rate >= 1.0 {
            return Err(AppError::InvalidInput(format!(
                "growth rate must be between 0 and 1 (exclusive), got {}",
                growth_rate
            )));
        }
        if horizons.is_empty() || horizons.contains(&0) {
            return Err(AppError::InvalidInput(
                "horizons must be a non-empty list of positive day counts".to_string(),
            ));
        }
        horizons.sort_unstable();
        horizons.dedup();

        Ok(Self { growth_rate, horizons })
    }

    pub fn growth_rate(&self) -> f64 {
        self.growth_rate
    }

    pub fn horizons(&self) -> &[u32] {
        &self.horizons
    }

    /// Project `current_price` under both scenarios at every horizon.
    pub fn project(&self, current_price: f64) -> Result<PredictionBlock, AppError> {
        if !current_price.is_finite() || current_price <= 0.0 {
            return Err(AppError::InvalidInput(format!(
                "current price must be a positive amount, got {}",
                current_price
            )));
        }

        let block = PredictionBlock {
            up: self.scenario_path(current_price, Scenario::Up),
            down: self.scenario_path(current_price, Scenario::Down),
            growth_rate: self.growth_rate,
        };

        debug!(
            "Projected {} over {} horizons at rate {}",
            current_price,
            self.horizons.len(),
            self.growth_rate
        );

        Ok(block)
    }

    fn scenario_path(&self, current_price: f64, scenario: Scenario) -> BTreeMap<u32, f64> {
        let factor = 1.0 + scenario.direction() * self.growth_rate;
        self.horizons
            .iter()
            .map(|&h| {
                let periods = h as f64 / BASE_PERIOD_DAYS;
                (h, current_price * factor.powf(periods))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_projection_values() {
        let block = Forecaster::default().project(100.0).unwrap();

        assert!((block.up[&30] - 103.0).abs() < 1e-9);
        assert!((block.down[&30] - 97.0).abs() < 1e-9);
        // 1.03^(60/30) = 1.0609
        assert!((block.up[&60] - 106.09).abs() < 1e-9);
        assert!((block.down[&60] - 94.09).abs() < 1e-9);
        assert_eq!(block.growth_rate, DEFAULT_GROWTH_RATE);
    }

    #[test]
    fn test_scenarios_bracket_current_price() {
        let forecaster = Forecaster::default();
        for price in [0.0001, 0.5, 1.0, 10.0, 99.99, 12_345.0] {
            let block = forecaster.project(price).unwrap();
            for h in DEFAULT_HORIZONS {
                assert!(block.up[&h] > price, "up[{}] for {}", h, price);
                assert!(block.down[&h] < price, "down[{}] for {}", h, price);
            }
        }
    }

    #[test]
    fn test_longer_horizons_diverge_further() {
        let block = Forecaster::default().project(250.0).unwrap();

        assert!(block.up[&30] < block.up[&50]);
        assert!(block.up[&50] < block.up[&60]);
        assert!(block.down[&30] > block.down[&50]);
        assert!(block.down[&50] > block.down[&60]);
    }

    #[test]
    fn test_custom_rate_applies() {
        let block = Forecaster::new(0.10).unwrap().project(10.0).unwrap();
        assert!((block.up[&30] - 11.0).abs() < 1e-9);
        assert!((block.down[&30] - 9.0).abs() < 1e-9);
    }

    #[test]
    fn test_non_positive_price_rejected() {
        let forecaster = Forecaster::default();
        for price in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(forecaster.project(price), Err(AppError::InvalidInput(_))));
        }
    }

    #[test]
    fn test_invalid_rate_rejected() {
        for rate in [0.0, -0.03, 1.0, 1.5, f64::NAN] {
            assert!(Forecaster::new(rate).is_err(), "rate {} accepted", rate);
        }
    }

    #[test]
    fn test_horizons_sorted_and_deduplicated() {
        let forecaster = Forecaster::with_horizons(0.03, vec![60, 30, 60, 50]).unwrap();
        assert_eq!(forecaster.horizons(), &[30, 50, 60]);
        assert!(Forecaster::with_horizons(0.03, vec![]).is_err());
        assert!(Forecaster::with_horizons(0.03, vec![0, 30]).is_err());
    }
}
