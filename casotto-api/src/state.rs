use casotto_core::BeachService;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub beach: Arc<BeachService>,
}

impl AppState {
    pub fn new(beach: BeachService) -> Self {
        Self {
            beach: Arc::new(beach),
        }
    }
}
