//! Match predicates shared by scoring and explanation text.

use crate::catalog::GoalProfile;
use crate::domain::product::Product;
use crate::scoring::ScoringWeights;

/// Feature phrases that mark a product as self-installable.
pub const DIY_TERMS: &[&str] = &["diy", "easy setup", "easy-setup", "self-install", "self install"];

/// Feature phrases that mark a product as professionally installed.
pub const PROFESSIONAL_TERMS: &[&str] = &["professional installation"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GoalMatch {
    pub category: bool,
    pub sub_category: bool,
    /// Number of features containing at least one goal keyword.
    pub keyword_features: usize,
}

impl GoalMatch {
    /// Category or subcategory alignment; keyword hits alone do not count.
    pub fn is_aligned(&self) -> bool {
        self.category || self.sub_category
    }
}

pub fn goal_match(product: &Product, profile: &GoalProfile) -> GoalMatch {
    let keywords: Vec<String> = profile.keywords.iter().map(|keyword| keyword.to_ascii_lowercase()).collect();
    let keyword_features = product
        .features
        .iter()
        .map(|feature| feature.to_ascii_lowercase())
        .filter(|feature| keywords.iter().any(|keyword| !keyword.is_empty() && feature.contains(keyword)))
        .count();

    GoalMatch {
        category: profile.matches_category(&product.category),
        sub_category: profile.matches_sub_category(&product.sub_category),
        keyword_features,
    }
}

pub fn is_diy_friendly(product: &Product) -> bool {
    DIY_TERMS.iter().any(|term| product.mentions_feature(term))
}

pub fn offers_professional_install(product: &Product) -> bool {
    PROFESSIONAL_TERMS.iter().any(|term| product.mentions_feature(term))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EcosystemMatch {
    /// The product lists the ecosystem tag itself.
    pub direct: bool,
    /// Number of ecosystem search terms found in any compatibility entry.
    pub matched_terms: usize,
}

impl EcosystemMatch {
    pub fn is_match(&self) -> bool {
        self.direct || self.matched_terms > 0
    }
}

pub fn ecosystem_match(product: &Product, ecosystem: &str, terms: &[String]) -> EcosystemMatch {
    let compatibility: Vec<String> =
        product.compatibility.iter().map(|standard| standard.to_ascii_lowercase()).collect();
    let matched_terms = terms
        .iter()
        .map(|term| term.to_ascii_lowercase())
        .filter(|term| !term.is_empty() && compatibility.iter().any(|standard| standard.contains(term)))
        .count();

    EcosystemMatch { direct: product.supports_ecosystem(ecosystem), matched_terms }
}

/// Where a price sits relative to the stated budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetTier {
    /// Below `budget_mid_floor` of budget.
    Low,
    /// Within `[budget_mid_floor, budget_near_floor)` of budget.
    Mid,
    /// Within `[budget_near_floor, 1.0]` of budget.
    Near,
    /// Above budget but within `budget_hard_limit`.
    Over,
    /// Above `budget_hard_limit`; the product is eliminated.
    Excluded,
}

impl BudgetTier {
    /// Compares `price / budget` against the ratios so boundaries such as
    /// exactly 115% of budget land on the documented side.
    pub fn classify(price: f64, budget: f64, weights: &ScoringWeights) -> Self {
        let ratio = price / budget;
        if ratio > weights.budget_hard_limit {
            Self::Excluded
        } else if ratio > 1.0 {
            Self::Over
        } else if ratio >= weights.budget_near_floor {
            Self::Near
        } else if ratio >= weights.budget_mid_floor {
            Self::Mid
        } else {
            Self::Low
        }
    }

    pub fn points(self, weights: &ScoringWeights) -> f64 {
        match self {
            Self::Low => weights.budget_tier_low,
            Self::Mid => weights.budget_tier_mid,
            Self::Near => weights.budget_tier_near,
            Self::Over => weights.budget_over_penalty,
            Self::Excluded => 0.0,
        }
    }
}
