pub mod catalog;
pub mod config;
pub mod domain;
pub mod errors;
pub mod filter;
pub mod observer;
pub mod recommend;
pub mod scoring;
pub mod store;

pub use catalog::{Catalog, EcosystemProfile, EcosystemTerms, GoalMapping, GoalProfile};
pub use config::{AppConfig, ConfigError, LoadOptions};
pub use domain::answers::{AnswerValue, InstallationPreference, QuizAnswers};
pub use domain::product::{Product, ProductId};
pub use domain::provider::{Package, ProviderId, ServiceProvider};
pub use errors::{ApplicationError, DomainError, SnapshotError, StorageError};
pub use filter::{FilterEngine, FilterState, FilterView, Tab, TabCounts};
pub use observer::{NoopObserver, RecommendationObserver, TracingObserver};
pub use recommend::{
    ProviderMatch, Recommendation, RecommendationAssembler, RecommendationLimits, RecommendationResult, Recommender,
};
pub use scoring::{ScoreBreakdown, ScoreTable, ScoringEngine, ScoringWeights};
pub use store::{
    FileKeyValueStore, InMemoryKeyValueStore, KeyValueStore, PersistedRecommendationStore, SaveOutcome, SaveReport,
};
