pub mod embedding_api;
pub mod embedding_provider;
pub mod exchange_rate_provider;
pub mod exchangerate_api;
