pub(crate) mod analyze;
pub(crate) mod exchange_rates;
pub(crate) mod forecast;
pub(crate) mod goods;
pub(crate) mod health;
pub(crate) mod process_model;
pub(crate) mod suppliers;
