use std::sync::Arc;

use parking_lot::RwLock;

use crate::external::embedding_provider::EmbeddingProvider;
use crate::external::exchange_rate_provider::ExchangeRateProvider;
use crate::store::catalog::CatalogStore;
use crate::store::process_model::ProcessModelStore;
use crate::store::supplier_history::SupplierBook;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<RwLock<CatalogStore>>,
    pub suppliers: SupplierBook,
    pub process_model: ProcessModelStore,
    pub rate_provider: Arc<dyn ExchangeRateProvider>,
    pub embedding_provider: Arc<dyn EmbeddingProvider>,
}

impl AppState {
    pub fn new(
        catalog: CatalogStore,
        rate_provider: Arc<dyn ExchangeRateProvider>,
        embedding_provider: Arc<dyn EmbeddingProvider>,
    ) -> Self {
        Self {
            catalog: Arc::new(RwLock::new(catalog)),
            suppliers: SupplierBook::new(),
            process_model: ProcessModelStore::default(),
            rate_provider,
            embedding_provider,
        }
    }
}
