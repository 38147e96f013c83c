use serde::{Deserialize, Serialize};

/// Bonuses, penalties and thresholds used by scoring and assembly.
///
/// Penalties are stored as negative numbers and added like any bonus.
/// Deserializing a partial table fills the gaps from the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    /// Per goal whose categories include the product category (default: 5)
    pub goal_category: f64,
    /// Per goal whose subcategories include the product subcategory (default: 10)
    #[serde(alias = "goal_subcategory")]
    pub goal_sub_category: f64,
    /// Per goal, per feature containing one of the goal keywords (default: 2)
    pub goal_keyword: f64,
    /// DIY preference and a DIY-friendly feature (default: 15)
    pub diy_feature: f64,
    /// DIY preference and a provider-linked product (default: -10)
    pub diy_provider_penalty: f64,
    /// Professional preference and a professional-installation feature (default: 15)
    pub professional_feature: f64,
    /// Professional preference and a provider-linked product (default: 20)
    pub professional_provider: f64,
    /// Product lists the stated ecosystem (default: 25)
    pub ecosystem_direct: f64,
    /// Per ecosystem search term found in the compatibility list (default: 15)
    pub ecosystem_term: f64,
    /// Price within [near_floor, 1.0] of budget (default: 15)
    pub budget_tier_near: f64,
    /// Price within [mid_floor, near_floor) of budget (default: 10)
    pub budget_tier_mid: f64,
    /// Price below mid_floor of budget (default: 5)
    pub budget_tier_low: f64,
    /// Price above budget but inside the hard limit (default: -5)
    pub budget_over_penalty: f64,
    /// Fraction of the top score needed to be flagged recommended (default: 0.7)
    pub recommended_ratio: f64,
    /// Products priced above budget times this are dropped (default: 1.15)
    pub budget_hard_limit: f64,
    pub budget_near_floor: f64,
    pub budget_mid_floor: f64,
    /// Price at or below budget times this reads as great value (default: 0.7)
    pub great_value_ratio: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        super::DEFAULT_WEIGHTS
    }
}

impl ScoringWeights {
    /// Check the ratios are usable; point values may be any finite number.
    pub fn validate(&self) -> Result<(), String> {
        let points = [
            ("goal_category", self.goal_category),
            ("goal_sub_category", self.goal_sub_category),
            ("goal_keyword", self.goal_keyword),
            ("diy_feature", self.diy_feature),
            ("diy_provider_penalty", self.diy_provider_penalty),
            ("professional_feature", self.professional_feature),
            ("professional_provider", self.professional_provider),
            ("ecosystem_direct", self.ecosystem_direct),
            ("ecosystem_term", self.ecosystem_term),
            ("budget_tier_near", self.budget_tier_near),
            ("budget_tier_mid", self.budget_tier_mid),
            ("budget_tier_low", self.budget_tier_low),
            ("budget_over_penalty", self.budget_over_penalty),
        ];
        if let Some((name, _)) = points.iter().find(|(_, value)| !value.is_finite()) {
            return Err(format!("scoring.{name} must be a finite number"));
        }

        let ratios = [
            ("recommended_ratio", self.recommended_ratio),
            ("budget_hard_limit", self.budget_hard_limit),
            ("budget_near_floor", self.budget_near_floor),
            ("budget_mid_floor", self.budget_mid_floor),
            ("great_value_ratio", self.great_value_ratio),
        ];
        if let Some((name, _)) = ratios.iter().find(|(_, value)| !value.is_finite() || *value <= 0.0) {
            return Err(format!("scoring.{name} must be a finite positive number"));
        }

        if self.budget_hard_limit < 1.0 {
            return Err("scoring.budget_hard_limit must be at least 1.0".to_string());
        }
        if self.budget_mid_floor >= self.budget_near_floor || self.budget_near_floor > 1.0 {
            return Err("scoring budget floors must satisfy mid_floor < near_floor <= 1.0".to_string());
        }

        Ok(())
    }
}
