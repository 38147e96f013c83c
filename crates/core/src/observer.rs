//! Diagnostics hooks for the recommendation pipeline.
//!
//! Scoring and assembly never log directly. Callers inject an observer; the
//! default is [`NoopObserver`], and [`TracingObserver`] forwards every
//! notification to `tracing` with an `event_name` field.

use tracing::{debug, info, warn};

use crate::errors::{SnapshotError, StorageError};
use crate::recommend::RecommendationResult;

pub trait RecommendationObserver: Send + Sync {
    fn scored(&self, _considered: usize, _surviving: usize, _max_score: Option<f64>) {}

    fn assembled(&self, _result: &RecommendationResult) {}

    fn snapshot_recovered(&self, _error: &SnapshotError) {}

    fn answers_discarded(&self, _error: &SnapshotError) {}

    fn storage_write_failed(&self, _key: &str, _error: &StorageError) {}

    fn storage_write_abandoned(&self, _key: &str, _error: &StorageError) {}

    fn dangling_reference_skipped(&self, _category: &str) {}
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl RecommendationObserver for NoopObserver {}

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl RecommendationObserver for TracingObserver {
    fn scored(&self, considered: usize, surviving: usize, max_score: Option<f64>) {
        debug!(
            event_name = "recommendation.scoring.completed",
            considered,
            surviving,
            max_score = max_score.unwrap_or(0.0),
            "scored catalog against answers"
        );
    }

    fn assembled(&self, result: &RecommendationResult) {
        info!(
            event_name = "recommendation.assembly.completed",
            top_picks = result.top_recommendations.len(),
            categories = result.recommendations_by_category.len(),
            providers = result.recommended_providers.len(),
            "recommendations assembled"
        );
    }

    fn snapshot_recovered(&self, error: &SnapshotError) {
        warn!(
            event_name = "recommendation.snapshot.recovered",
            error = %error,
            "persisted recommendations unusable; serving fallback"
        );
    }

    fn answers_discarded(&self, error: &SnapshotError) {
        warn!(
            event_name = "recommendation.answers.discarded",
            error = %error,
            "saved answers unusable; recovering with empty answers"
        );
    }

    fn storage_write_failed(&self, key: &str, error: &StorageError) {
        warn!(
            event_name = "recommendation.storage.write_failed",
            key,
            error = %error,
            "storage write failed; retrying with reduced payload"
        );
    }

    fn storage_write_abandoned(&self, key: &str, error: &StorageError) {
        warn!(
            event_name = "recommendation.storage.write_abandoned",
            key,
            error = %error,
            "storage write abandoned after retry"
        );
    }

    fn dangling_reference_skipped(&self, category: &str) {
        debug!(
            event_name = "recommendation.filter.dangling_reference",
            category,
            "skipped entry without a product"
        );
    }
}
