use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const BASE_CURRENCY: &str = "USD";

/// Where a rate table came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RateSource {
    Live,
    Fallback,
}

/// Units of each currency per one unit of `base`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateTable {
    pub base: String,
    pub rates: BTreeMap<String, f64>,
    pub source: RateSource,
}

impl RateTable {
    /// Static table used whenever the live endpoint cannot be reached.
    pub fn fallback() -> Self {
        let rates = [("USD", 1.0), ("EUR", 0.85), ("GBP", 0.73), ("NGN", 460.0)]
            .into_iter()
            .map(|(code, rate)| (code.to_string(), rate))
            .collect();

        Self {
            base: BASE_CURRENCY.to_string(),
            rates,
            source: RateSource::Fallback,
        }
    }

    pub fn rate(&self, currency: &str) -> Option<f64> {
        self.rates.get(&currency.to_uppercase()).copied()
    }
}
