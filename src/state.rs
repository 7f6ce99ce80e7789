use crate::services::catalog::CatalogService;
use crate::services::order_store::OrderStore;
use crate::services::rate::RateService;

/// Everything the protocol layer mutates: the two fetch caches and the
/// session order store. Owned by the main loop, one instance per process.
pub struct CoreState {
    pub catalog: CatalogService,
    pub rate: RateService,
    pub orders: OrderStore,
}

impl CoreState {
    pub fn new() -> Self {
        CoreState {
            catalog: CatalogService::from_env(),
            rate: RateService::new(),
            orders: OrderStore::new(),
        }
    }
}

impl Default for CoreState {
    fn default() -> Self {
        CoreState::new()
    }
}
