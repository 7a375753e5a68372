use std::sync::Arc;

use crate::{db::CollectionStore, services::providers::CatalogProvider, services::PairSessionService};

/// Shared application state handed to the router
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<PairSessionService>,
    pub collections: CollectionStore,
    pub catalog: Arc<dyn CatalogProvider>,
}

impl AppState {
    pub fn new(
        sessions: PairSessionService,
        collections: CollectionStore,
        catalog: Arc<dyn CatalogProvider>,
    ) -> Self {
        Self {
            sessions: Arc::new(sessions),
            collections,
            catalog,
        }
    }
}
