pub mod catalog;
pub mod config;
pub mod recommend;
pub mod show;

pub use recommend::RecommendArgs;
pub use show::ShowArgs;

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use advisor_core::catalog::Catalog;
use advisor_core::config::{AppConfig, ConfigOverrides, LoadOptions};
use advisor_core::errors::ApplicationError;
use advisor_core::observer::TracingObserver;
use advisor_core::recommend::Recommender;
use advisor_core::store::{open_storage, KeyValueStore, PersistedRecommendationStore};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome {
    command: String,
    status: String,
    error_class: Option<String>,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
}

impl CommandResult {
    pub fn success_with_data(command: &str, message: impl Into<String>, data: Option<Value>) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            message: message.into(),
            data,
        };
        Self { exit_code: 0, output: serialize_payload(payload) }
    }

    pub fn failure(command: &str, error_class: &str, message: impl Into<String>, exit_code: u8) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: message.into(),
            data: None,
        };
        Self { exit_code, output: serialize_payload(payload) }
    }

    fn from_failure(command: &str, (error_class, message, exit_code): Failure) -> Self {
        Self::failure(command, error_class, message, exit_code)
    }
}

fn serialize_payload(payload: CommandOutcome) -> String {
    serde_json::to_string(&payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}

/// `(error_class, message, exit_code)` for a failed command step.
pub(crate) type Failure = (&'static str, String, u8);

/// Options shared by every subcommand.
#[derive(Debug, Clone, Default)]
pub struct Invocation {
    pub config_path: Option<PathBuf>,
    pub catalog_path: Option<PathBuf>,
    pub session_id: Option<String>,
}

impl Invocation {
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            config_path: self.config_path.clone(),
            require_file: self.config_path.is_some(),
            overrides: ConfigOverrides { session_id: self.session_id.clone(), ..ConfigOverrides::default() },
        }
    }

    pub(crate) fn load_config(&self) -> Result<AppConfig, Failure> {
        AppConfig::load(self.load_options())
            .map_err(|error| ("config_validation", format!("configuration issue: {error}"), 2))
    }

    /// The catalog named by `--catalog`, or the built-in one.
    pub(crate) fn load_catalog(&self) -> Result<Catalog, Failure> {
        let Some(path) = &self.catalog_path else {
            return Ok(Catalog::builtin());
        };

        let raw = fs::read_to_string(path)
            .map_err(|error| ("input_read", format!("could not read catalog `{}`: {error}", path.display()), 3))?;
        Catalog::from_json_str(&raw).map_err(|error| input_failure(error.into()))
    }
}

pub(crate) fn input_failure(error: ApplicationError) -> Failure {
    let exit_code = match error {
        ApplicationError::Configuration(_) => 2,
        ApplicationError::Domain(_) => 3,
        ApplicationError::Storage(_) => 1,
    };
    (error.error_class(), error.to_string(), exit_code)
}

pub(crate) fn build_recommender(config: &AppConfig, catalog: Catalog) -> Recommender {
    Recommender::new(Arc::new(catalog))
        .with_weights(config.scoring)
        .with_limits(config.recommendations.limits())
        .with_observer(Arc::new(TracingObserver))
}

pub(crate) fn open_store(
    config: &AppConfig,
    recommender: Arc<Recommender>,
) -> Result<PersistedRecommendationStore<Box<dyn KeyValueStore>>, Failure> {
    let storage = open_storage(&config.storage).map_err(|error| input_failure(error.into()))?;
    Ok(PersistedRecommendationStore::new(storage, recommender)
        .with_reduced_bucket_limit(config.storage.reduced_bucket_limit))
}

pub(crate) fn to_json<T: Serialize>(value: &T) -> Result<Value, Failure> {
    serde_json::to_value(value).map_err(|error| ("serialization", error.to_string(), 1))
}
