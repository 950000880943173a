use std::sync::Arc;

use crate::config::Config;
use crate::services::{MovieProvider, RecommendationAggregator};

use super::responses::ImageUrls;

/// Shared application state
///
/// Read-only after startup; handlers only clone the `Arc`s.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub provider: Arc<dyn MovieProvider>,
    pub aggregator: RecommendationAggregator,
    pub images: ImageUrls,
}

impl AppState {
    /// Wires the provider into the services that need it
    pub fn new(config: Config, provider: Arc<dyn MovieProvider>) -> Self {
        Self {
            images: ImageUrls::new(&config.tmdb_image_url),
            aggregator: RecommendationAggregator::new(provider.clone()),
            provider,
            config: Arc::new(config),
        }
    }
}
