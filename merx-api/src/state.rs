use std::sync::Arc;

use merx_catalog::ProductRepository;

#[derive(Clone)]
pub struct AppState {
    pub products: Arc<dyn ProductRepository>,
}
