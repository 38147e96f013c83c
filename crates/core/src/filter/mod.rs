//! Reactive facet filtering over a loaded [`RecommendationResult`].
//!
//! [`RecommendationResult`]: crate::recommend::RecommendationResult

mod engine;
mod state;

pub use engine::{FilterEngine, FilterView, TabCounts};
pub use state::{FilterState, Tab, DEFAULT_PRICE_RANGE};

use crate::catalog::Catalog;
use crate::recommend::ProviderMatch;

/// Built-in providers shown when a result carries none of its own.
pub fn fallback_providers() -> Vec<ProviderMatch> {
    Catalog::builtin()
        .providers()
        .iter()
        .cloned()
        .map(|provider| ProviderMatch { provider, best_package: None })
        .collect()
}
