use thiserror::Error;

use crate::config::ConfigError;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid answer for `{question}`: {reason}")]
    InvalidAnswer { question: String, reason: String },
    #[error("duplicate product id `{0}` in catalog")]
    DuplicateProduct(String),
    #[error("duplicate service provider id `{0}` in catalog")]
    DuplicateProvider(String),
    #[error("product `{product}` references unknown service provider `{provider}`")]
    UnknownProvider { product: String, provider: String },
    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage quota exceeded writing `{key}` ({bytes} bytes, quota {quota})")]
    QuotaExceeded { key: String, bytes: usize, quota: usize },
    #[error("storage i/o failure on `{key}`: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
    #[error("could not encode value for `{key}`: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("storage lock is poisoned")]
    Poisoned,
}

/// Why a persisted snapshot could not be used as-is.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("no snapshot stored")]
    Missing,
    #[error("snapshot could not be read: {0}")]
    Storage(#[from] StorageError),
    #[error("snapshot is not valid JSON: {0}")]
    Unparsable(#[from] serde_json::Error),
    #[error("snapshot is missing `{0}`")]
    Incomplete(&'static str),
}

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Configuration(#[from] ConfigError),
}

impl ApplicationError {
    /// Stable machine-readable class used in CLI envelopes.
    pub fn error_class(&self) -> &'static str {
        match self {
            Self::Domain(DomainError::InvalidAnswer { .. }) => "invalid_answers",
            Self::Domain(_) => "invalid_catalog",
            Self::Storage(_) => "storage",
            Self::Configuration(_) => "config_validation",
        }
    }
}
