pub mod analysis_service;
pub mod exchange_rate_service;
pub mod forecasting_service;
pub mod supplier_risk_service;
