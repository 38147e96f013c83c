use serde::{Deserialize, Serialize};

use crate::domain::provider::ProviderId;

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProductId(pub String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A catalog item as authored. Ranking metadata (score, recommended flag,
/// reasons) lives on [`crate::recommend::Recommendation`], never here.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub brand: String,
    pub category: String,
    #[serde(default)]
    pub sub_category: String,
    pub price: f64,
    #[serde(default)]
    pub price_range: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub compatibility: Vec<String>,
    #[serde(default)]
    pub ecosystems: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_provider: Option<ProviderId>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default)]
    pub affiliate_url: String,
}

impl Product {
    pub fn is_provider_linked(&self) -> bool {
        self.service_provider.is_some()
    }

    /// True when any feature contains `term`, ignoring ASCII case.
    pub fn mentions_feature(&self, term: &str) -> bool {
        let term = term.to_ascii_lowercase();
        self.features.iter().any(|feature| feature.to_ascii_lowercase().contains(&term))
    }

    pub fn supports_ecosystem(&self, ecosystem: &str) -> bool {
        self.ecosystems.iter().any(|tag| tag.eq_ignore_ascii_case(ecosystem))
    }

    pub fn shares_compatibility(&self, selected: &std::collections::BTreeSet<String>) -> bool {
        self.compatibility.iter().any(|standard| selected.contains(standard))
    }
}

/// Coarse price label shown on product cards.
pub fn price_range_label(price: f64) -> &'static str {
    if price < 50.0 {
        "$"
    } else if price < 150.0 {
        "$$"
    } else if price < 400.0 {
        "$$$"
    } else {
        "$$$$"
    }
}
