use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::filter::{FilterState, DEFAULT_PRICE_RANGE};
use crate::recommend::{RecommendationLimits, MAX_REASONS, MAX_TOP_PICKS};
use crate::scoring::ScoringWeights;
use crate::store::MIN_REDUCED_BUCKET_LIMIT;

pub const DEFAULT_CONFIG_FILE: &str = "advisor.toml";

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub scoring: ScoringWeights,
    pub recommendations: RecommendationsConfig,
    pub storage: StorageConfig,
    pub filters: FiltersConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecommendationsConfig {
    pub max_top_picks: usize,
    pub max_reasons: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub directory: PathBuf,
    pub session_id: String,
    pub reduced_bucket_limit: usize,
    pub quota_bytes: Option<usize>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FiltersConfig {
    pub min_price: f64,
    pub max_price: f64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    Memory,
    File,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub log_level: Option<String>,
    pub log_format: Option<LogFormat>,
    pub storage_backend: Option<StorageBackend>,
    pub storage_directory: Option<PathBuf>,
    pub session_id: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("environment variable interpolation failed for `{var}`")]
    MissingEnvInterpolation { var: String },
    #[error("unterminated environment interpolation expression")]
    UnterminatedInterpolation,
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            scoring: ScoringWeights::default(),
            recommendations: RecommendationsConfig::default(),
            storage: StorageConfig::default(),
            filters: FiltersConfig::default(),
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

impl Default for RecommendationsConfig {
    fn default() -> Self {
        Self { max_top_picks: MAX_TOP_PICKS, max_reasons: MAX_REASONS }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::File,
            directory: PathBuf::from(".advisor"),
            session_id: "default".to_string(),
            reduced_bucket_limit: 5,
            quota_bytes: None,
        }
    }
}

impl Default for FiltersConfig {
    fn default() -> Self {
        Self { min_price: DEFAULT_PRICE_RANGE.0, max_price: DEFAULT_PRICE_RANGE.1 }
    }
}

impl RecommendationsConfig {
    pub fn limits(&self) -> RecommendationLimits {
        RecommendationLimits { max_top_picks: self.max_top_picks, max_reasons: self.max_reasons }
    }
}

impl FiltersConfig {
    /// The state a filter session starts from and resets to.
    pub fn default_state(&self) -> FilterState {
        FilterState::with_price_range(self.min_price, self.max_price)
    }
}

impl std::str::FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "file" => Ok(Self::File),
            other => Err(ConfigError::Validation(format!(
                "unsupported storage backend `{other}` (expected memory|file)"
            ))),
        }
    }
}

impl std::fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Memory => "memory",
            Self::File => "file",
        })
    }
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected = options.config_path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(scoring) = patch.scoring {
            self.scoring = scoring;
        }

        if let Some(recommendations) = patch.recommendations {
            if let Some(max_top_picks) = recommendations.max_top_picks {
                self.recommendations.max_top_picks = max_top_picks;
            }
            if let Some(max_reasons) = recommendations.max_reasons {
                self.recommendations.max_reasons = max_reasons;
            }
        }

        if let Some(storage) = patch.storage {
            if let Some(backend) = storage.backend {
                self.storage.backend = backend;
            }
            if let Some(directory) = storage.directory {
                self.storage.directory = directory;
            }
            if let Some(session_id) = storage.session_id {
                self.storage.session_id = session_id;
            }
            if let Some(reduced_bucket_limit) = storage.reduced_bucket_limit {
                self.storage.reduced_bucket_limit = reduced_bucket_limit;
            }
            if let Some(quota_bytes) = storage.quota_bytes {
                self.storage.quota_bytes = Some(quota_bytes);
            }
        }

        if let Some(filters) = patch.filters {
            if let Some(min_price) = filters.min_price {
                self.filters.min_price = min_price;
            }
            if let Some(max_price) = filters.max_price {
                self.filters.max_price = max_price;
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        for (field, slot) in scoring_fields(&mut self.scoring) {
            let key = format!("ADVISOR_SCORING_{}", field.to_ascii_uppercase());
            if let Some(value) = read_env(&key) {
                *slot = parse_f64(&key, &value)?;
            }
        }

        if let Some(value) = read_env("ADVISOR_RECOMMENDATIONS_MAX_TOP_PICKS") {
            self.recommendations.max_top_picks =
                parse_usize("ADVISOR_RECOMMENDATIONS_MAX_TOP_PICKS", &value)?;
        }
        if let Some(value) = read_env("ADVISOR_RECOMMENDATIONS_MAX_REASONS") {
            self.recommendations.max_reasons = parse_usize("ADVISOR_RECOMMENDATIONS_MAX_REASONS", &value)?;
        }

        if let Some(value) = read_env("ADVISOR_STORAGE_BACKEND") {
            self.storage.backend = value.parse()?;
        }
        if let Some(value) = read_env("ADVISOR_STORAGE_DIRECTORY") {
            self.storage.directory = PathBuf::from(value);
        }
        if let Some(value) = read_env("ADVISOR_STORAGE_SESSION_ID") {
            self.storage.session_id = value;
        }
        if let Some(value) = read_env("ADVISOR_STORAGE_REDUCED_BUCKET_LIMIT") {
            self.storage.reduced_bucket_limit = parse_usize("ADVISOR_STORAGE_REDUCED_BUCKET_LIMIT", &value)?;
        }
        if let Some(value) = read_env("ADVISOR_STORAGE_QUOTA_BYTES") {
            self.storage.quota_bytes = Some(parse_usize("ADVISOR_STORAGE_QUOTA_BYTES", &value)?);
        }

        if let Some(value) = read_env("ADVISOR_FILTERS_MIN_PRICE") {
            self.filters.min_price = parse_f64("ADVISOR_FILTERS_MIN_PRICE", &value)?;
        }
        if let Some(value) = read_env("ADVISOR_FILTERS_MAX_PRICE") {
            self.filters.max_price = parse_f64("ADVISOR_FILTERS_MAX_PRICE", &value)?;
        }

        let log_level = read_env("ADVISOR_LOGGING_LEVEL").or_else(|| read_env("ADVISOR_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format = read_env("ADVISOR_LOGGING_FORMAT").or_else(|| read_env("ADVISOR_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
        if let Some(log_format) = overrides.log_format {
            self.logging.format = log_format;
        }
        if let Some(backend) = overrides.storage_backend {
            self.storage.backend = backend;
        }
        if let Some(directory) = overrides.storage_directory {
            self.storage.directory = directory;
        }
        if let Some(session_id) = overrides.session_id {
            self.storage.session_id = session_id;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.scoring.validate().map_err(ConfigError::Validation)?;
        validate_recommendations(&self.recommendations)?;
        validate_storage(&self.storage)?;
        validate_filters(&self.filters)?;
        validate_logging(&self.logging)?;
        Ok(())
    }
}

/// Every tunable weight with its config key, in declaration order.
pub fn scoring_fields(weights: &mut ScoringWeights) -> [(&'static str, &mut f64); 18] {
    [
        ("goal_category", &mut weights.goal_category),
        ("goal_sub_category", &mut weights.goal_sub_category),
        ("goal_keyword", &mut weights.goal_keyword),
        ("diy_feature", &mut weights.diy_feature),
        ("diy_provider_penalty", &mut weights.diy_provider_penalty),
        ("professional_feature", &mut weights.professional_feature),
        ("professional_provider", &mut weights.professional_provider),
        ("ecosystem_direct", &mut weights.ecosystem_direct),
        ("ecosystem_term", &mut weights.ecosystem_term),
        ("budget_tier_near", &mut weights.budget_tier_near),
        ("budget_tier_mid", &mut weights.budget_tier_mid),
        ("budget_tier_low", &mut weights.budget_tier_low),
        ("budget_over_penalty", &mut weights.budget_over_penalty),
        ("recommended_ratio", &mut weights.recommended_ratio),
        ("budget_hard_limit", &mut weights.budget_hard_limit),
        ("budget_near_floor", &mut weights.budget_near_floor),
        ("budget_mid_floor", &mut weights.budget_mid_floor),
        ("great_value_ratio", &mut weights.great_value_ratio),
    ]
}

/// The file [`AppConfig::load`] would read, if any.
pub fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    [PathBuf::from(DEFAULT_CONFIG_FILE), PathBuf::from("config").join(DEFAULT_CONFIG_FILE)]
        .into_iter()
        .find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    let interpolated = interpolate_env_vars(&raw)?;
    toml::from_str::<ConfigPatch>(&interpolated)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && matches!(chars.peek(), Some('{')) {
            chars.next();
            let mut key = String::new();

            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(next) => key.push(next),
                    None => return Err(ConfigError::UnterminatedInterpolation),
                }
            }

            let value = env::var(&key).map_err(|_| ConfigError::MissingEnvInterpolation { var: key.clone() })?;
            output.push_str(&value);
            continue;
        }

        output.push(ch);
    }

    Ok(output)
}

fn validate_recommendations(recommendations: &RecommendationsConfig) -> Result<(), ConfigError> {
    if !(1..=MAX_TOP_PICKS).contains(&recommendations.max_top_picks) {
        return Err(ConfigError::Validation(format!(
            "recommendations.max_top_picks must be in range 1..={MAX_TOP_PICKS}"
        )));
    }

    if !(1..=MAX_REASONS).contains(&recommendations.max_reasons) {
        return Err(ConfigError::Validation(format!(
            "recommendations.max_reasons must be in range 1..={MAX_REASONS}"
        )));
    }

    Ok(())
}

fn validate_storage(storage: &StorageConfig) -> Result<(), ConfigError> {
    let session_id = storage.session_id.trim();
    if session_id.is_empty() || session_id.contains(['/', '\\']) || session_id == "." || session_id == ".." {
        return Err(ConfigError::Validation(
            "storage.session_id must be a non-empty name without path separators".to_string(),
        ));
    }

    if storage.backend == StorageBackend::File && storage.directory.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "storage.directory is required for the file backend".to_string(),
        ));
    }

    if storage.reduced_bucket_limit < MIN_REDUCED_BUCKET_LIMIT {
        return Err(ConfigError::Validation(format!(
            "storage.reduced_bucket_limit must be at least {MIN_REDUCED_BUCKET_LIMIT}"
        )));
    }

    if storage.quota_bytes == Some(0) {
        return Err(ConfigError::Validation(
            "storage.quota_bytes must be greater than zero when set".to_string(),
        ));
    }

    Ok(())
}

fn validate_filters(filters: &FiltersConfig) -> Result<(), ConfigError> {
    if !filters.min_price.is_finite() || !filters.max_price.is_finite() {
        return Err(ConfigError::Validation("filters price bounds must be finite".to_string()));
    }

    if filters.min_price < 0.0 || filters.min_price > filters.max_price {
        return Err(ConfigError::Validation(
            "filters.min_price must be non-negative and not above filters.max_price".to_string(),
        ));
    }

    Ok(())
}

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let level = logging.level.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ConfigError::Validation(
            "logging.level must be one of trace|debug|info|warn|error".to_string(),
        )),
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_usize(key: &str, value: &str) -> Result<usize, ConfigError> {
    value.trim().parse::<usize>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_f64(key: &str, value: &str) -> Result<f64, ConfigError> {
    value.trim().parse::<f64>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    scoring: Option<ScoringWeights>,
    recommendations: Option<RecommendationsPatch>,
    storage: Option<StoragePatch>,
    filters: Option<FiltersPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct RecommendationsPatch {
    max_top_picks: Option<usize>,
    max_reasons: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
struct StoragePatch {
    backend: Option<StorageBackend>,
    directory: Option<PathBuf>,
    session_id: Option<String>,
    reduced_bucket_limit: Option<usize>,
    quota_bytes: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
struct FiltersPatch {
    min_price: Option<f64>,
    max_price: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}

#[cfg(test)]
mod tests {
    use std::env;
    use std::fs;
    use std::io;
    use std::sync::{Mutex, OnceLock};

    use tempfile::TempDir;

    use super::{AppConfig, ConfigError, ConfigOverrides, LoadOptions, LogFormat, StorageBackend};

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

    fn env_lock() -> &'static Mutex<()> {
        ENV_LOCK.get_or_init(|| Mutex::new(()))
    }

    fn clear_vars(vars: &[&str]) {
        for var in vars {
            env::remove_var(var);
        }
    }

    fn ensure(condition: bool, message: &'static str) -> Result<(), String> {
        if condition {
            Ok(())
        } else {
            Err(message.to_string())
        }
    }

    fn write_config(dir: &TempDir, body: &str) -> Result<std::path::PathBuf, String> {
        let path = dir.path().join("advisor.toml");
        fs::write(&path, body).map_err(|err| err.to_string())?;
        Ok(path)
    }

    #[test]
    fn defaults_are_valid_and_match_documented_values() -> Result<(), String> {
        let config = AppConfig::default();
        config.validate().map_err(|err| err.to_string())?;

        ensure(config.scoring.recommended_ratio == 0.7, "recommended ratio defaults to 0.7")?;
        ensure(config.scoring.budget_hard_limit == 1.15, "hard limit defaults to 1.15")?;
        ensure(config.recommendations.max_top_picks == 3, "three top picks by default")?;
        ensure(config.recommendations.max_reasons == 2, "two reasons by default")?;
        ensure(config.storage.reduced_bucket_limit == 5, "reduced bucket limit defaults to 5")?;
        ensure(config.storage.session_id == "default", "default session id")?;
        ensure(config.filters.default_state().price_range == (0.0, 1000.0), "default price range")?;
        ensure(matches!(config.logging.format, LogFormat::Compact), "compact logging by default")
    }

    #[test]
    fn file_load_supports_env_interpolation_and_partial_scoring() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("TEST_ADVISOR_SESSION", "kiosk-7");

        let result = (|| -> Result<(), String> {
            let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
            let path = write_config(
                &dir,
                r#"
[scoring]
ecosystem_direct = 30
goal_subcategory = 12

[storage]
backend = "memory"
session_id = "${TEST_ADVISOR_SESSION}"
quota_bytes = 2048
"#,
            )?;

            let config = AppConfig::load(LoadOptions { config_path: Some(path), ..LoadOptions::default() })
                .map_err(|err| format!("config load failed: {err}"))?;

            ensure(config.storage.session_id == "kiosk-7", "session id should be interpolated from env")?;
            ensure(config.storage.backend == StorageBackend::Memory, "backend should come from file")?;
            ensure(config.storage.quota_bytes == Some(2048), "quota should come from file")?;
            ensure(config.scoring.ecosystem_direct == 30.0, "file weight should apply")?;
            ensure(config.scoring.goal_sub_category == 12.0, "subcategory alias should apply")?;
            ensure(config.scoring.ecosystem_term == 15.0, "unspecified weights keep defaults")?;
            Ok(())
        })();

        clear_vars(&["TEST_ADVISOR_SESSION"]);
        result
    }

    #[test]
    fn logging_env_aliases_are_supported() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("ADVISOR_LOG_LEVEL", "warn");
        env::set_var("ADVISOR_LOG_FORMAT", "json");

        let result = (|| -> Result<(), String> {
            let config =
                AppConfig::load(LoadOptions::default()).map_err(|err| format!("config load failed: {err}"))?;

            ensure(config.logging.level == "warn", "warning log level should be set from env var")?;
            ensure(matches!(config.logging.format, LogFormat::Json), "json logging format should be set from env var")
        })();

        clear_vars(&["ADVISOR_LOG_LEVEL", "ADVISOR_LOG_FORMAT"]);
        result
    }

    #[test]
    fn precedence_defaults_file_env_overrides() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("ADVISOR_STORAGE_SESSION_ID", "from-env");
        env::set_var("ADVISOR_SCORING_RECOMMENDED_RATIO", "0.8");

        let result = (|| -> Result<(), String> {
            let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
            let path = write_config(
                &dir,
                r#"
[scoring]
recommended_ratio = 0.5

[storage]
session_id = "from-file"
directory = "from-file-dir"

[logging]
level = "warn"
"#,
            )?;

            let config = AppConfig::load(LoadOptions {
                config_path: Some(path),
                overrides: ConfigOverrides {
                    log_level: Some("debug".to_string()),
                    storage_directory: Some("from-override".into()),
                    ..ConfigOverrides::default()
                },
                ..LoadOptions::default()
            })
            .map_err(|err| format!("config load failed: {err}"))?;

            ensure(config.storage.directory.as_os_str() == "from-override", "override directory should win")?;
            ensure(config.logging.level == "debug", "overridden log level should be debug")?;
            ensure(config.storage.session_id == "from-env", "env session id should win over file")?;
            ensure(config.scoring.recommended_ratio == 0.8, "env weight should win over file")?;
            Ok(())
        })();

        clear_vars(&["ADVISOR_STORAGE_SESSION_ID", "ADVISOR_SCORING_RECOMMENDED_RATIO"]);
        result
    }

    #[test]
    fn invalid_env_numbers_are_reported_with_their_key() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("ADVISOR_SCORING_ECOSYSTEM_TERM", "lots");

        let result = (|| -> Result<(), String> {
            let has_key = matches!(
                AppConfig::load(LoadOptions::default()),
                Err(ConfigError::InvalidEnvOverride { ref key, .. }) if key == "ADVISOR_SCORING_ECOSYSTEM_TERM"
            );
            ensure(has_key, "invalid env override should name the variable")
        })();

        clear_vars(&["ADVISOR_SCORING_ECOSYSTEM_TERM"]);
        result
    }

    #[test]
    fn validation_fails_fast_with_actionable_error() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("ADVISOR_RECOMMENDATIONS_MAX_TOP_PICKS", "5");

        let result = (|| -> Result<(), String> {
            let error = match AppConfig::load(LoadOptions::default()) {
                Ok(_) => return Err("expected validation failure but config load succeeded".to_string()),
                Err(error) => error,
            };
            let has_message = matches!(
                error,
                ConfigError::Validation(ref message) if message.contains("recommendations.max_top_picks")
            );
            ensure(has_message, "validation failure should mention recommendations.max_top_picks")
        })();

        clear_vars(&["ADVISOR_RECOMMENDATIONS_MAX_TOP_PICKS"]);
        result
    }

    #[test]
    fn storage_and_filter_rules_are_enforced() -> Result<(), String> {
        let mut config = AppConfig::default();
        config.storage.reduced_bucket_limit = 2;
        ensure(config.validate().is_err(), "reduced bucket limit below 3 is rejected")?;

        let mut config = AppConfig::default();
        config.storage.session_id = "../escape".to_string();
        ensure(config.validate().is_err(), "session ids cannot contain separators")?;

        let mut config = AppConfig::default();
        config.filters.min_price = 500.0;
        config.filters.max_price = 100.0;
        ensure(config.validate().is_err(), "inverted default price range is rejected")?;

        let mut config = AppConfig::default();
        config.scoring.budget_hard_limit = 0.5;
        let rejected = matches!(
            config.validate(),
            Err(ConfigError::Validation(ref message)) if message.contains("budget_hard_limit")
        );
        ensure(rejected, "scoring validation errors surface through config")
    }

    #[test]
    fn missing_required_file_is_reported() -> Result<(), String> {
        let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
        let path = dir.path().join("absent.toml");
        let result =
            AppConfig::load(LoadOptions { config_path: Some(path), require_file: true, ..LoadOptions::default() });
        ensure(matches!(result, Err(ConfigError::MissingConfigFile(_))), "missing file should be reported")
    }
}
