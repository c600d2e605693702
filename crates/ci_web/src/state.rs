use ci_core::DatasetStore;
use std::sync::Arc;

pub struct AppState {
    pub store: Arc<dyn DatasetStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn DatasetStore>) -> Self {
        Self { store }
    }
}
