//! Weighted scoring of catalog products against questionnaire answers.
//!
//! Every bonus, penalty and ratio is a field of [`ScoringWeights`] so it can be
//! tuned from configuration. Scores are sums of independent rule
//! contributions and are recomputed from scratch on every call.

mod engine;
pub mod rules;
mod weights;

pub use engine::{ScoreBreakdown, ScoreTable, ScoringEngine};
pub use weights::ScoringWeights;

/// Default scoring weights
pub const DEFAULT_WEIGHTS: ScoringWeights = ScoringWeights {
    goal_category: 5.0,
    goal_sub_category: 10.0,
    goal_keyword: 2.0,
    diy_feature: 15.0,
    diy_provider_penalty: -10.0,
    professional_feature: 15.0,
    professional_provider: 20.0,
    ecosystem_direct: 25.0,
    ecosystem_term: 15.0,
    budget_tier_near: 15.0,
    budget_tier_mid: 10.0,
    budget_tier_low: 5.0,
    budget_over_penalty: -5.0,
    recommended_ratio: 0.7,
    budget_hard_limit: 1.15,
    budget_near_floor: 0.9,
    budget_mid_floor: 0.6,
    great_value_ratio: 0.7,
};
