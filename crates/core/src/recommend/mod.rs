//! Recommendation pipeline: score the catalog, rank, bucket and explain.
//!
//! [`Recommender`] is the entry point. It owns a shared [`Catalog`] and is a
//! pure function of the answers it is given; persistence lives in
//! [`crate::store`].

mod assembler;
pub mod providers;
pub mod reasons;
mod types;

use std::sync::Arc;

pub use assembler::RecommendationAssembler;
pub use types::{ProviderMatch, Recommendation, RecommendationLimits, RecommendationResult};

use crate::catalog::Catalog;
use crate::domain::answers::QuizAnswers;
use crate::observer::{NoopObserver, RecommendationObserver};
use crate::scoring::{ScoringEngine, ScoringWeights};

/// Global top picks returned per run.
pub const MAX_TOP_PICKS: usize = 3;
/// Explanation strings attached to each entry.
pub const MAX_REASONS: usize = 2;

#[derive(Clone)]
pub struct Recommender {
    catalog: Arc<Catalog>,
    engine: ScoringEngine,
    assembler: RecommendationAssembler,
    limits: RecommendationLimits,
    observer: Arc<dyn RecommendationObserver>,
}

impl std::fmt::Debug for Recommender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Recommender")
            .field("products", &self.catalog.products().len())
            .field("weights", self.engine.weights())
            .field("limits", &self.limits)
            .finish()
    }
}

impl Recommender {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            engine: ScoringEngine::new(),
            assembler: RecommendationAssembler::default(),
            limits: RecommendationLimits::default(),
            observer: Arc::new(NoopObserver),
        }
    }

    pub fn with_weights(mut self, weights: ScoringWeights) -> Self {
        self.engine = ScoringEngine::with_weights(weights);
        self.assembler = RecommendationAssembler::new(weights, self.limits);
        self
    }

    pub fn with_limits(mut self, limits: RecommendationLimits) -> Self {
        self.limits = limits;
        self.assembler = RecommendationAssembler::new(*self.engine.weights(), limits);
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn RecommendationObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn weights(&self) -> &ScoringWeights {
        self.engine.weights()
    }

    pub fn observer(&self) -> Arc<dyn RecommendationObserver> {
        Arc::clone(&self.observer)
    }

    /// Score every product against `answers` and assemble the result.
    ///
    /// Deterministic: identical answers over the same catalog always yield
    /// an identical result.
    pub fn generate_recommendations(&self, answers: &QuizAnswers) -> RecommendationResult {
        let scores = self.engine.score(answers, &self.catalog);
        self.observer.scored(self.catalog.products().len(), scores.len(), scores.max_score());

        let result = self.assembler.assemble(&scores, &self.catalog, answers);
        self.observer.assembled(&result);
        result
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::{RecommendationLimits, Recommender};
    use crate::catalog::Catalog;
    use crate::domain::answers::{AnswerValue, QuizAnswers};
    use crate::observer::testing::RecordingObserver;

    fn security_answers() -> QuizAnswers {
        QuizAnswers::new()
            .with("goals", AnswerValue::MultiSelect(vec!["security".to_owned()]))
            .with("installation", AnswerValue::SingleSelect("diy".to_owned()))
            .with("ecosystem", AnswerValue::SingleSelect("alexa".to_owned()))
            .with("budget", AnswerValue::Range(200.0))
    }

    #[test]
    fn generation_is_deterministic() {
        let recommender = Recommender::new(Arc::new(Catalog::builtin()));
        let answers = security_answers();

        assert_eq!(recommender.generate_recommendations(&answers), recommender.generate_recommendations(&answers));
    }

    #[test]
    fn diy_alexa_security_puts_ring_first() {
        let recommender = Recommender::new(Arc::new(Catalog::builtin()));
        let result = recommender.generate_recommendations(&security_answers());

        let top = result.top_recommendations.first().and_then(|entry| entry.product_id()).map(|id| id.0.clone());
        assert_eq!(top.as_deref(), Some("ring-video-doorbell"));
        assert!(result.top_recommendations.len() <= super::MAX_TOP_PICKS);
        assert!(result.bucket_entries().all(|(_, entry)| entry.recommendation_reasons.len() <= super::MAX_REASONS));
    }

    #[test]
    fn observer_sees_scoring_then_assembly() {
        let observer = Arc::new(RecordingObserver::default());
        let recommender = Recommender::new(Arc::new(Catalog::builtin())).with_observer(observer.clone());
        let products = recommender.catalog().products().len();

        recommender.generate_recommendations(&QuizAnswers::new());

        assert_eq!(observer.events(), vec![format!("scored:{products}:{products}"), "assembled:3".to_owned()]);
    }

    #[test]
    fn limits_flow_through_to_assembly() {
        let recommender = Recommender::new(Arc::new(Catalog::builtin()))
            .with_limits(RecommendationLimits { max_top_picks: 1, max_reasons: 2 });

        assert_eq!(recommender.generate_recommendations(&security_answers()).top_recommendations.len(), 1);
    }
}
