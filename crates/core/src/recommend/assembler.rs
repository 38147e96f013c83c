//! Ranking, bucketing and explanation of scored products.

use std::collections::{BTreeMap, HashSet};

use super::providers::eligible_providers;
use super::reasons::explain;
use super::types::{Recommendation, RecommendationLimits, RecommendationResult};
use crate::catalog::Catalog;
use crate::domain::answers::QuizAnswers;
use crate::domain::product::Product;
use crate::scoring::{ScoreTable, ScoringWeights};

#[derive(Debug, Clone, Default)]
pub struct RecommendationAssembler {
    weights: ScoringWeights,
    limits: RecommendationLimits,
}

impl RecommendationAssembler {
    pub fn new(weights: ScoringWeights, limits: RecommendationLimits) -> Self {
        Self { weights, limits }
    }

    /// Build the full result for one scoring run.
    ///
    /// Ranking is by score descending; equal scores keep catalog order. A
    /// product is flagged recommended when its score reaches
    /// `recommended_ratio` of the best score and that best score is positive.
    pub fn assemble(&self, scores: &ScoreTable, catalog: &Catalog, answers: &QuizAnswers) -> RecommendationResult {
        let threshold =
            scores.max_score().filter(|max| *max > 0.0).map(|max| max * self.weights.recommended_ratio);

        let ranked = self.rank(scores, catalog);

        let entries: Vec<Recommendation> = ranked
            .into_iter()
            .map(|(product, score)| Recommendation {
                product: Some(product.clone()),
                score,
                recommended: threshold.is_some_and(|threshold| score >= threshold),
                recommendation_reasons: explain(product, answers, catalog, &self.weights, self.limits.max_reasons),
                contract_required: catalog.requires_contract(product),
            })
            .collect();

        let mut recommendations_by_category: BTreeMap<String, Vec<Recommendation>> = BTreeMap::new();
        for entry in &entries {
            if let Some(product) = &entry.product {
                recommendations_by_category.entry(product.category.clone()).or_default().push(entry.clone());
            }
        }

        let top_recommendations = entries.into_iter().take(self.limits.max_top_picks).collect();

        RecommendationResult {
            top_recommendations,
            recommendations_by_category,
            recommended_providers: eligible_providers(catalog, answers),
            quiz_answers: answers.clone(),
        }
    }

    /// Scored products, best first, each product id at most once.
    fn rank<'a>(&self, scores: &ScoreTable, catalog: &'a Catalog) -> Vec<(&'a Product, f64)> {
        let mut seen = HashSet::new();
        let mut ranked: Vec<(&Product, f64)> = scores
            .iter()
            .filter(|(id, _)| seen.insert((*id).clone()))
            .filter_map(|(id, score)| catalog.product(id).map(|product| (product, score)))
            .collect();

        // Stable: ties stay in catalog order.
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::RecommendationAssembler;
    use crate::catalog::{Catalog, EcosystemTerms, GoalMapping, GoalProfile};
    use crate::domain::answers::{AnswerValue, QuizAnswers};
    use crate::domain::product::{Product, ProductId};
    use crate::domain::provider::{Package, ProviderId, ServiceProvider};
    use crate::recommend::RecommendationLimits;
    use crate::scoring::{ScoringEngine, ScoringWeights};

    fn product(id: &str, category: &str, sub_category: &str, price: f64) -> Product {
        Product {
            id: ProductId::new(id),
            name: id.to_owned(),
            brand: "Acme".to_owned(),
            category: category.to_owned(),
            sub_category: sub_category.to_owned(),
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

    fn catalog() -> Catalog {
        let mut monitored = product("monitored", "security", "alarms", 40.0);
        monitored.service_provider = Some(ProviderId::new("watch"));
        let provider = ServiceProvider {
            id: ProviderId::new("watch"),
            name: "Watch Co".to_owned(),
            locations: vec![],
            services: vec![],
            compatible_ecosystems: vec![],
            packages: vec![Package { name: "Basic".to_owned(), price: 20.0, features: vec![] }],
            requires_contract: true,
            contract_length: Some(24),
            installation_fee: 0.0,
        };

        let goals = GoalMapping::new()
            .with_goal(
                "security",
                GoalProfile {
                    categories: vec!["security".to_owned()],
                    sub_categories: vec!["cameras".to_owned()],
                    keywords: vec![],
                },
            )
            .with_goal(
                "energy",
                GoalProfile { categories: vec!["energy".to_owned()], ..GoalProfile::default() },
            );

        Catalog::new(
            vec![
                product("plug", "energy", "plugs", 20.0),
                product("cam-a", "security", "cameras", 50.0),
                product("cam-b", "security", "cameras", 60.0),
                monitored,
                product("bulb", "lighting", "bulbs", 10.0),
            ],
            vec![provider],
            goals,
            EcosystemTerms::new(),
        )
        .expect("valid catalog")
    }

    fn generate(answers: &QuizAnswers) -> crate::recommend::RecommendationResult {
        let catalog = catalog();
        let scores = ScoringEngine::new().score(answers, &catalog);
        RecommendationAssembler::default().assemble(&scores, &catalog, answers)
    }

    fn ids(entries: &[crate::recommend::Recommendation]) -> Vec<String> {
        entries.iter().filter_map(|entry| entry.product_id()).map(|id| id.0.clone()).collect()
    }

    fn goals(values: &[&str]) -> QuizAnswers {
        QuizAnswers::new().with("goals", AnswerValue::MultiSelect(values.iter().map(|v| (*v).to_owned()).collect()))
    }

    #[test]
    fn ranks_by_score_with_catalog_order_tie_break() {
        let result = generate(&goals(&["security"]));

        // cam-a and cam-b score 15, monitored 5, the rest 0.
        assert_eq!(ids(&result.top_recommendations), vec!["cam-a", "cam-b", "monitored"]);
        assert_eq!(ids(&result.recommendations_by_category["security"]), vec!["cam-a", "cam-b", "monitored"]);
    }

    #[test]
    fn recommended_flag_uses_ratio_of_best_score() {
        let result = generate(&goals(&["security"]));
        let security = &result.recommendations_by_category["security"];

        assert!(security[0].recommended);
        assert!(security[1].recommended);
        // 5 < 0.7 * 15
        assert!(!security[2].recommended);
    }

    #[test]
    fn top_picks_are_global_not_per_bucket() {
        let result = generate(&goals(&["security", "energy"]));
        assert_eq!(ids(&result.top_recommendations), vec!["cam-a", "cam-b", "plug"]);
    }

    #[test]
    fn buckets_omit_empty_categories_and_filtered_products() {
        let answers = QuizAnswers::new().with("budget", AnswerValue::Range(30.0));
        let result = generate(&answers);

        assert!(!result.recommendations_by_category.contains_key("security"));
        assert_eq!(ids(&result.recommendations_by_category["energy"]), vec!["plug"]);
        assert_eq!(ids(&result.recommendations_by_category["lighting"]), vec!["bulb"]);
    }

    #[test]
    fn zero_scores_still_rank_but_nothing_is_recommended() {
        let result = generate(&QuizAnswers::new());

        assert_eq!(ids(&result.top_recommendations), vec!["plug", "cam-a", "cam-b"]);
        assert!(result.bucket_entries().all(|(_, entry)| !entry.recommended && entry.score == 0.0));
    }

    #[test]
    fn contract_flag_follows_linked_provider() {
        let result = generate(&QuizAnswers::new());
        let monitored = result
            .bucket_entries()
            .find(|(_, entry)| entry.product_id().map(|id| id.as_str()) == Some("monitored"))
            .map(|(_, entry)| entry.contract_required);
        assert_eq!(monitored, Some(true));
    }

    #[test]
    fn top_picks_appear_in_exactly_one_bucket() {
        let result = generate(&goals(&["security", "energy"]));
        for pick in &result.top_recommendations {
            let appearances =
                result.bucket_entries().filter(|(_, entry)| entry.product_id() == pick.product_id()).count();
            assert_eq!(appearances, 1);
        }
    }

    #[test]
    fn limits_cap_top_picks_and_reasons() {
        let catalog = catalog();
        let answers = goals(&["security"]).with("budget", AnswerValue::Range(100.0));
        let scores = ScoringEngine::new().score(&answers, &catalog);
        let assembler = RecommendationAssembler::new(
            ScoringWeights::default(),
            RecommendationLimits { max_top_picks: 1, max_reasons: 1 },
        );

        let result = assembler.assemble(&scores, &catalog, &answers);
        assert_eq!(result.top_recommendations.len(), 1);
        assert!(result.bucket_entries().all(|(_, entry)| entry.recommendation_reasons.len() <= 1));
    }

    #[test]
    fn snapshot_keeps_a_copy_of_answers() {
        let answers = goals(&["energy"]);
        assert_eq!(generate(&answers).quiz_answers, answers);
    }
}
