//! ListProvidersHandler - Configuration reflection of the provider registry

use std::sync::Arc;

use super::orchestrator::RecommendationOrchestrator;
use crate::ports::ProviderStatus;

/// Registered providers and how many of them can be used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderListing {
    pub providers: Vec<ProviderStatus>,
    pub available_count: usize,
}

pub struct ListProvidersHandler {
    orchestrator: Arc<RecommendationOrchestrator>,
}

impl ListProvidersHandler {
    pub fn new(orchestrator: Arc<RecommendationOrchestrator>) -> Self {
        Self { orchestrator }
    }

    pub fn handle(&self) -> ProviderListing {
        let providers = self.orchestrator.statuses();
        let available_count = providers.iter().filter(|p| p.available).count();
        ProviderListing {
            providers,
            available_count,
        }
    }
}
