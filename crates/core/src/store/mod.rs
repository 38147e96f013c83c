//! Durable hand-off of a [`RecommendationResult`] between screens.
//!
//! Two blobs live under fixed keys: the full result and, redundantly, the
//! answers that produced it. Neither [`PersistedRecommendationStore::save`]
//! nor [`PersistedRecommendationStore::load`] ever returns an error; every
//! failure degrades to a documented fallback and is reported to the
//! observer.

mod file;
mod memory;

use std::sync::Arc;

use serde_json::Value;

pub use file::FileKeyValueStore;
pub use memory::InMemoryKeyValueStore;

use crate::config::{StorageBackend, StorageConfig};
use crate::domain::answers::QuizAnswers;
use crate::errors::{SnapshotError, StorageError};
use crate::observer::RecommendationObserver;
use crate::recommend::{RecommendationResult, Recommender};

pub const RECOMMENDATIONS_KEY: &str = "recommendations";
pub const QUIZ_ANSWERS_KEY: &str = "quizAnswers";

/// Fields a snapshot must carry to be usable.
const REQUIRED_FIELDS: [&str; 2] = ["topRecommendations", "recommendationsByCategory"];

/// Smallest bucket truncation that still keeps every top pick in its bucket.
pub const MIN_REDUCED_BUCKET_LIMIT: usize = crate::recommend::MAX_TOP_PICKS;

pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// Open the configured backend. File sessions live in
/// `<directory>/<session_id>/`.
pub fn open_storage(config: &StorageConfig) -> Result<Box<dyn KeyValueStore>, StorageError> {
    Ok(match config.backend {
        StorageBackend::Memory => Box::new(match config.quota_bytes {
            Some(quota) => InMemoryKeyValueStore::with_quota(quota),
            None => InMemoryKeyValueStore::new(),
        }),
        StorageBackend::File => Box::new(FileKeyValueStore::open(config.directory.join(&config.session_id))?),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    /// The first write failed and the reduced payload was stored instead.
    SavedReduced,
    /// Both attempts failed; the key is left empty.
    Abandoned,
}

impl SaveOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Saved => "saved",
            Self::SavedReduced => "saved_reduced",
            Self::Abandoned => "abandoned",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveReport {
    pub result: SaveOutcome,
    pub answers: SaveOutcome,
}

pub struct PersistedRecommendationStore<S> {
    storage: S,
    recommender: Arc<Recommender>,
    reduced_bucket_limit: usize,
    observer: Arc<dyn RecommendationObserver>,
}

impl<S: KeyValueStore> PersistedRecommendationStore<S> {
    /// The fallback generator and the observer are both taken from
    /// `recommender`.
    pub fn new(storage: S, recommender: Arc<Recommender>) -> Self {
        let observer = recommender.observer();
        Self { storage, recommender, reduced_bucket_limit: 5, observer }
    }

    /// Clamped to at least [`MIN_REDUCED_BUCKET_LIMIT`].
    pub fn with_reduced_bucket_limit(mut self, limit: usize) -> Self {
        self.reduced_bucket_limit = limit.max(MIN_REDUCED_BUCKET_LIMIT);
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn RecommendationObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Replace both blobs. A failed write is dropped and retried once with a
    /// reduced payload; if that fails too the write is abandoned.
    pub fn save(&self, result: &RecommendationResult, answers: &QuizAnswers) -> SaveReport {
        let result_outcome = self.write_with_retry(RECOMMENDATIONS_KEY, result, || {
            reduce(result, self.reduced_bucket_limit)
        });
        let answers_outcome = self.write_with_retry(QUIZ_ANSWERS_KEY, answers, || answers.clone());

        SaveReport { result: result_outcome, answers: answers_outcome }
    }

    /// The stored result, or `generate_recommendations({})` when it is
    /// missing, unparsable or structurally incomplete.
    pub fn load(&self) -> RecommendationResult {
        match self.read_snapshot() {
            Ok(result) => result,
            Err(error) => {
                self.observer.snapshot_recovered(&error);
                self.recommender.generate_recommendations(&QuizAnswers::new())
            }
        }
    }

    /// Like [`Self::load`], but regenerates from the saved answers before
    /// falling back to empty answers.
    pub fn recover(&self) -> RecommendationResult {
        match self.read_snapshot() {
            Ok(result) => result,
            Err(error) => {
                self.observer.snapshot_recovered(&error);
                let answers = self.load_answers().unwrap_or_default();
                self.recommender.generate_recommendations(&answers)
            }
        }
    }

    pub fn read_snapshot(&self) -> Result<RecommendationResult, SnapshotError> {
        let raw = self.storage.get(RECOMMENDATIONS_KEY)?.ok_or(SnapshotError::Missing)?;
        let value: Value = serde_json::from_str(&raw)?;

        for field in REQUIRED_FIELDS {
            if value.get(field).is_none() {
                return Err(SnapshotError::Incomplete(field));
            }
        }

        Ok(serde_json::from_value(value)?)
    }

    /// The redundant answers blob, if present and readable. An unreadable
    /// blob is reported to the observer and treated as absent.
    pub fn load_answers(&self) -> Option<QuizAnswers> {
        match self.read_answers() {
            Ok(answers) => answers,
            Err(error) => {
                self.observer.answers_discarded(&error);
                None
            }
        }
    }

    fn read_answers(&self) -> Result<Option<QuizAnswers>, SnapshotError> {
        let Some(raw) = self.storage.get(QUIZ_ANSWERS_KEY)? else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }

    /// Remove both blobs, e.g. when a new questionnaire starts.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.storage.remove(RECOMMENDATIONS_KEY)?;
        self.storage.remove(QUIZ_ANSWERS_KEY)
    }

    fn write_with_retry<T, R>(&self, key: &str, full: &T, reduced: impl FnOnce() -> R) -> SaveOutcome
    where
        T: serde::Serialize,
        R: serde::Serialize,
    {
        let first = encode(key, full).and_then(|payload| self.storage.set(key, &payload));
        let Err(error) = first else {
            return SaveOutcome::Saved;
        };
        self.observer.storage_write_failed(key, &error);

        // Dropping the stale value frees its space for the retry.
        let retry = self
            .storage
            .remove(key)
            .and_then(|()| encode(key, &reduced()))
            .and_then(|payload| self.storage.set(key, &payload));

        match retry {
            Ok(()) => SaveOutcome::SavedReduced,
            Err(error) => {
                self.observer.storage_write_abandoned(key, &error);
                SaveOutcome::Abandoned
            }
        }
    }
}

fn encode<T: serde::Serialize>(key: &str, value: &T) -> Result<String, StorageError> {
    serde_json::to_string(value).map_err(|source| StorageError::Encode { key: key.to_owned(), source })
}

/// Truncate buckets and keep one package per provider.
fn reduce(result: &RecommendationResult, bucket_limit: usize) -> RecommendationResult {
    let mut reduced = result.clone();

    for entries in reduced.recommendations_by_category.values_mut() {
        entries.truncate(bucket_limit);
    }

    for provider in &mut reduced.recommended_providers {
        let kept = provider.best_package.clone().or_else(|| provider.provider.packages.first().cloned());
        provider.provider.packages = kept.into_iter().collect();
    }

    reduced
}
