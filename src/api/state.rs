use std::sync::Arc;

use crate::{config::Config, services::RecommendationEngine};

/// Shared application state
///
/// The engine is immutable once built, so handlers share it without locking.
#[derive(Clone, Debug)]
pub struct AppState {
    pub engine: Arc<RecommendationEngine>,
    pub default_recommendations: i64,
    pub enable_cors: bool,
}

impl AppState {
    pub fn new(engine: RecommendationEngine, config: &Config) -> Self {
        Self {
            engine: Arc::new(engine),
            default_recommendations: config.default_recommendations,
            enable_cors: config.enable_cors,
        }
    }
}
