use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::answers::QuizAnswers;
use crate::domain::product::{Product, ProductId};
use crate::domain::provider::{Package, ServiceProvider};

/// A ranked product entry as stored in buckets and top picks.
///
/// `product` is optional only so that hand-edited or truncated snapshots
/// still deserialize; entries without one are skipped when filtering.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    #[serde(default)]
    pub product: Option<Product>,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub recommended: bool,
    #[serde(default)]
    pub recommendation_reasons: Vec<String>,
    /// Whether the linked service provider requires a contract.
    #[serde(default)]
    pub contract_required: bool,
}

impl Recommendation {
    pub fn product_id(&self) -> Option<&ProductId> {
        self.product.as_ref().map(|product| &product.id)
    }
}

/// A provider that passed eligibility, with packages narrowed to the budget.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderMatch {
    #[serde(flatten)]
    pub provider: ServiceProvider,
    /// Highest-priced affordable package; set only when a budget is active.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_package: Option<Package>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResult {
    pub top_recommendations: Vec<Recommendation>,
    pub recommendations_by_category: BTreeMap<String, Vec<Recommendation>>,
    #[serde(default)]
    pub recommended_providers: Vec<ProviderMatch>,
    #[serde(default)]
    pub quiz_answers: QuizAnswers,
}

impl RecommendationResult {
    /// All bucket entries in category order, duplicates included.
    pub fn bucket_entries(&self) -> impl Iterator<Item = (&str, &Recommendation)> {
        self.recommendations_by_category
            .iter()
            .flat_map(|(category, entries)| entries.iter().map(move |entry| (category.as_str(), entry)))
    }
}

/// Output size limits for assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecommendationLimits {
    pub max_top_picks: usize,
    pub max_reasons: usize,
}

impl Default for RecommendationLimits {
    fn default() -> Self {
        Self { max_top_picks: super::MAX_TOP_PICKS, max_reasons: super::MAX_REASONS }
    }
}
