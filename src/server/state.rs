use std::sync::Arc;

use crate::service::BilibiliService;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<BilibiliService>,
}

impl AppState {
    pub fn new(service: BilibiliService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}
