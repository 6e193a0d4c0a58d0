use tracing::{info, warn};

use crate::errors::AppError;
use crate::external::exchange_rate_provider::ExchangeRateProvider;
use crate::models::{RateTable, BASE_CURRENCY};

/// Latest rates, or the static fallback table on any failure.
///
/// Failures are logged and swallowed; callers always get a usable table.
pub async fn current_rates(provider: &dyn ExchangeRateProvider) -> RateTable {
    match provider.fetch_rates().await {
        Ok(table) if table.base == BASE_CURRENCY && !table.rates.is_empty() => {
            info!("Fetched {} live exchange rates", table.rates.len());
            table
        }
        Ok(table) => {
            warn!(
                "Exchange rate table has base {} with {} rates, using fallback table",
                table.base,
                table.rates.len()
            );
            RateTable::fallback()
        }
        Err(e) => {
            warn!("Exchange rate fetch failed: {}. Using fallback table", e);
            RateTable::fallback()
        }
    }
}

/// Convert a USD amount into `currency` using `table`.
pub fn convert(amount: f64, currency: &str, table: &RateTable) -> Result<(f64, f64), AppError> {
    let rate = table.rate(currency).ok_or_else(|| {
        AppError::InvalidInput(format!("Unsupported currency: {}", currency))
    })?;
    Ok((rate, amount * rate))
}
