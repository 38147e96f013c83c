//! Scoring engine implementation

use std::collections::HashMap;

use super::rules::{self, BudgetTier};
use super::ScoringWeights;
use crate::catalog::Catalog;
use crate::domain::answers::{InstallationPreference, QuizAnswers};
use crate::domain::product::{Product, ProductId};

/// Per-rule contributions for one product.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScoreBreakdown {
    pub goals: f64,
    pub installation: f64,
    pub ecosystem: f64,
    pub budget: f64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        self.goals + self.installation + self.ecosystem + self.budget
    }
}

/// Scores for the products that survived the budget hard filter, in catalog
/// order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreTable {
    entries: Vec<(ProductId, f64)>,
    index: HashMap<ProductId, usize>,
}

impl ScoreTable {
    fn push(&mut self, id: ProductId, score: f64) {
        self.index.insert(id.clone(), self.entries.len());
        self.entries.push((id, score));
    }

    pub fn get(&self, id: &ProductId) -> Option<f64> {
        self.index.get(id).map(|position| self.entries[*position].1)
    }

    pub fn contains(&self, id: &ProductId) -> bool {
        self.index.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ProductId, f64)> {
        self.entries.iter().map(|(id, score)| (id, *score))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Highest score, or `None` for an empty table.
    pub fn max_score(&self) -> Option<f64> {
        self.entries.iter().map(|(_, score)| *score).reduce(f64::max)
    }
}

/// Turns answers into a [`ScoreTable`] for a catalog.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    weights: ScoringWeights,
}

impl ScoringEngine {
    /// Create a new scoring engine with default weights
    pub fn new() -> Self {
        Self { weights: ScoringWeights::default() }
    }

    /// Create with custom weights
    pub fn with_weights(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    pub fn score(&self, answers: &QuizAnswers, catalog: &Catalog) -> ScoreTable {
        let mut table = ScoreTable::default();
        for product in catalog.products() {
            if let Some(breakdown) = self.breakdown(answers, catalog, product) {
                table.push(product.id.clone(), breakdown.total());
            }
        }
        table
    }

    /// Rule contributions for one product, or `None` when the budget hard
    /// filter eliminates it.
    pub fn breakdown(&self, answers: &QuizAnswers, catalog: &Catalog, product: &Product) -> Option<ScoreBreakdown> {
        let budget_tier = answers.budget().map(|budget| BudgetTier::classify(product.price, budget, &self.weights));
        if budget_tier == Some(BudgetTier::Excluded) {
            return None;
        }

        Some(ScoreBreakdown {
            goals: self.goal_points(answers, catalog, product),
            installation: self.installation_points(answers, product),
            ecosystem: self.ecosystem_points(answers, catalog, product),
            budget: budget_tier.map(|tier| tier.points(&self.weights)).unwrap_or(0.0),
        })
    }

    fn goal_points(&self, answers: &QuizAnswers, catalog: &Catalog, product: &Product) -> f64 {
        let mut points = 0.0;
        for goal in answers.goals() {
            let Some(profile) = catalog.goal_mapping().resolve(goal) else {
                continue;
            };

            let matched = rules::goal_match(product, profile);
            if matched.category {
                points += self.weights.goal_category;
            }
            if matched.sub_category {
                points += self.weights.goal_sub_category;
            }
            points += self.weights.goal_keyword * matched.keyword_features as f64;
        }
        points
    }

    fn installation_points(&self, answers: &QuizAnswers, product: &Product) -> f64 {
        let mut points = 0.0;
        match answers.installation() {
            Some(InstallationPreference::Diy) => {
                if rules::is_diy_friendly(product) {
                    points += self.weights.diy_feature;
                }
                if product.is_provider_linked() {
                    points += self.weights.diy_provider_penalty;
                }
            }
            Some(InstallationPreference::Professional) => {
                if rules::offers_professional_install(product) {
                    points += self.weights.professional_feature;
                }
                if product.is_provider_linked() {
                    points += self.weights.professional_provider;
                }
            }
            None => {}
        }
        points
    }

    fn ecosystem_points(&self, answers: &QuizAnswers, catalog: &Catalog, product: &Product) -> f64 {
        let Some(ecosystem) = answers.ecosystem() else {
            return 0.0;
        };

        let matched = rules::ecosystem_match(product, ecosystem, catalog.ecosystem_terms().terms(ecosystem));
        let mut points = self.weights.ecosystem_term * matched.matched_terms as f64;
        if matched.direct {
            points += self.weights.ecosystem_direct;
        }
        points
    }
}

#[cfg(test)]
mod tests {
    use super::ScoringEngine;
    use crate::catalog::{Catalog, EcosystemProfile, EcosystemTerms, GoalMapping, GoalProfile};
    use crate::domain::answers::{AnswerValue, QuizAnswers};
    use crate::domain::product::{Product, ProductId};
    use crate::domain::provider::{ProviderId, ServiceProvider};
    use crate::scoring::ScoringWeights;

    fn product(id: &str, price: f64) -> Product {
        Product {
            id: ProductId::new(id),
            name: id.to_owned(),
            brand: "Acme".to_owned(),
            category: "security".to_owned(),
            sub_category: "cameras".to_owned(),
            price,
            price_range: String::new(),
            features: vec![],
            compatibility: vec![],
            ecosystems: vec![],
            service_provider: None,
            rating: 4.0,
            review_count: 1,
            affiliate_url: String::new(),
        }
    }

    fn provider() -> ServiceProvider {
        ServiceProvider {
            id: ProviderId::new("installer"),
            name: "Installer".to_owned(),
            locations: vec![],
            services: vec![],
            compatible_ecosystems: vec![],
            packages: vec![],
            requires_contract: false,
            contract_length: None,
            installation_fee: 0.0,
        }
    }

    fn catalog(products: Vec<Product>) -> Catalog {
        let goals = GoalMapping::new().with_goal(
            "security",
            GoalProfile {
                categories: vec!["security".to_owned()],
                sub_categories: vec!["cameras".to_owned()],
                keywords: vec!["motion".to_owned()],
            },
        );
        let ecosystems = EcosystemTerms::new().with_ecosystem(
            "alexa",
            EcosystemProfile { display_name: "Alexa".to_owned(), terms: vec!["Alexa".to_owned(), "Amazon".to_owned()] },
        );
        Catalog::new(products, vec![provider()], goals, ecosystems).expect("valid catalog")
    }

    fn single(value: &str) -> AnswerValue {
        AnswerValue::SingleSelect(value.to_owned())
    }

    #[test]
    fn empty_answers_score_every_product_zero() {
        let catalog = catalog(vec![product("a", 10.0), product("b", 900.0)]);
        let table = ScoringEngine::new().score(&QuizAnswers::new(), &catalog);

        assert_eq!(table.len(), 2);
        assert!(table.iter().all(|(_, score)| score == 0.0));
        assert_eq!(table.max_score(), Some(0.0));
    }

    #[test]
    fn budget_hard_filter_removes_products_before_scoring() {
        let catalog = catalog(vec![product("cheap", 100.0), product("edge", 115.0), product("pricey", 116.0)]);
        let answers = QuizAnswers::new().with("budget", AnswerValue::Range(100.0));
        let table = ScoringEngine::new().score(&answers, &catalog);

        assert_eq!(table.get(&ProductId::new("cheap")), Some(15.0));
        assert_eq!(table.get(&ProductId::new("edge")), Some(-5.0));
        assert!(!table.contains(&ProductId::new("pricey")));
    }

    #[test]
    fn goal_bonuses_stack_category_subcategory_and_keywords() {
        let mut camera = product("cam", 50.0);
        camera.features = vec!["Motion alerts".to_owned(), "Motion zones".to_owned(), "HD video".to_owned()];
        let catalog = catalog(vec![camera]);
        let answers = QuizAnswers::new().with("goals", AnswerValue::MultiSelect(vec!["security".to_owned()]));

        let table = ScoringEngine::new().score(&answers, &catalog);
        assert_eq!(table.get(&ProductId::new("cam")), Some(5.0 + 10.0 + 2.0 + 2.0));
    }

    #[test]
    fn unknown_goals_contribute_nothing() {
        let catalog = catalog(vec![product("cam", 50.0)]);
        let answers = QuizAnswers::new().with("goals", AnswerValue::MultiSelect(vec!["gardening".to_owned()]));
        let table = ScoringEngine::new().score(&answers, &catalog);
        assert_eq!(table.get(&ProductId::new("cam")), Some(0.0));
    }

    #[test]
    fn diy_preference_rewards_diy_and_penalises_provider_products() {
        let mut diy = product("diy", 50.0);
        diy.features = vec!["DIY setup".to_owned()];
        let mut installed = product("installed", 50.0);
        installed.service_provider = Some(ProviderId::new("installer"));
        let catalog = catalog(vec![diy, installed]);
        let answers = QuizAnswers::new().with("installation", single("diy"));

        let table = ScoringEngine::new().score(&answers, &catalog);
        assert_eq!(table.get(&ProductId::new("diy")), Some(15.0));
        assert_eq!(table.get(&ProductId::new("installed")), Some(-10.0));
    }

    #[test]
    fn professional_preference_weights_provider_products_higher() {
        let mut featured = product("featured", 50.0);
        featured.features = vec!["Professional installation available".to_owned()];
        let mut linked = product("linked", 50.0);
        linked.service_provider = Some(ProviderId::new("installer"));
        let catalog = catalog(vec![featured, linked]);
        let answers = QuizAnswers::new().with("installation", single("professional"));

        let table = ScoringEngine::new().score(&answers, &catalog);
        assert_eq!(table.get(&ProductId::new("featured")), Some(15.0));
        assert_eq!(table.get(&ProductId::new("linked")), Some(20.0));
    }

    #[test]
    fn ecosystem_direct_and_term_bonuses_both_apply() {
        let mut echo = product("echo", 50.0);
        echo.ecosystems = vec!["alexa".to_owned()];
        echo.compatibility = vec!["Works with Alexa".to_owned(), "Amazon Sidewalk".to_owned()];
        let mut bridge = product("bridge", 50.0);
        bridge.compatibility = vec!["Alexa skill".to_owned()];
        let catalog = catalog(vec![echo, bridge]);
        let answers = QuizAnswers::new().with("ecosystem", single("alexa"));

        let table = ScoringEngine::new().score(&answers, &catalog);
        assert_eq!(table.get(&ProductId::new("echo")), Some(25.0 + 15.0 + 15.0));
        assert_eq!(table.get(&ProductId::new("bridge")), Some(15.0));
    }

    #[test]
    fn ecosystem_none_is_ignored() {
        let mut echo = product("echo", 50.0);
        echo.ecosystems = vec!["alexa".to_owned()];
        let catalog = catalog(vec![echo]);
        let answers = QuizAnswers::new().with("ecosystem", single("none"));

        let table = ScoringEngine::new().score(&answers, &catalog);
        assert_eq!(table.get(&ProductId::new("echo")), Some(0.0));
    }

    #[test]
    fn custom_weights_change_contributions() {
        let catalog = catalog(vec![product("cam", 50.0)]);
        let answers = QuizAnswers::new().with("goals", AnswerValue::MultiSelect(vec!["security".to_owned()]));
        let weights = ScoringWeights { goal_category: 1.0, goal_sub_category: 0.0, ..ScoringWeights::default() };

        let table = ScoringEngine::with_weights(weights).score(&answers, &catalog);
        assert_eq!(table.get(&ProductId::new("cam")), Some(1.0));
    }

    #[test]
    fn table_preserves_catalog_order() {
        let catalog = catalog(vec![product("z", 1.0), product("a", 1.0), product("m", 1.0)]);
        let table = ScoringEngine::new().score(&QuizAnswers::new(), &catalog);
        let ids: Vec<_> = table.iter().map(|(id, _)| id.as_str().to_owned()).collect();
        assert_eq!(ids, vec!["z", "a", "m"]);
    }
}
