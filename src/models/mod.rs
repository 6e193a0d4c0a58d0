mod analysis;
mod exchange_rate;
mod forecast;
mod goods;
mod process_model;
mod supplier;

pub use analysis::{AnalyzeRequest, EmbeddingStatistics, TextAnalysis};
pub use exchange_rate::{RateSource, RateTable, BASE_CURRENCY};
pub use forecast::{ForecastQuery, PredictionBlock, Scenario};
pub use goods::{ConvertedPrice, CreateGoods, GoodsRecord, PriceQuery, ValidGoods};
pub use process_model::{ProcessModel, ProcessStep, UpdateAck, UpdateProcessModel};
pub use supplier::{
    DeliveryObservation, DeliveryRating, PerformanceBasis, QualityRating, RiskLevel,
    SupplierHistory, SupplierPerformance, SupplierReport,
};
