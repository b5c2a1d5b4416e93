use std::sync::Arc;
use crate::processor::StatsProcessor;

#[derive(Clone)]
pub struct AppState {
    pub processor: Arc<StatsProcessor>,
}

impl AppState {
    pub fn new(processor: StatsProcessor) -> Self {
        Self {
            processor: Arc::new(processor),
        }
    }
}
