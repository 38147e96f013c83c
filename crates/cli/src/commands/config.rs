use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use advisor_core::config::{resolve_config_path, scoring_fields, AppConfig};
use toml::Value;

use super::{CommandResult, Invocation};

pub fn run(invocation: &Invocation) -> CommandResult {
    let config = match invocation.load_config() {
        Ok(config) => config,
        Err(failure) => return CommandResult::from_failure("config", failure),
    };

    let config_file_path = resolve_config_path(invocation.config_path.as_deref());
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());
    let source = |key_paths: &[&str], env_keys: &[&str]| {
        if key_paths.contains(&"storage.session_id") && invocation.session_id.is_some() {
            return "override (--session)".to_string();
        }
        field_source(key_paths, env_keys, config_file_doc.as_ref(), config_file_path.as_deref())
    };

    CommandResult { exit_code: 0, output: render(&config, &source) }
}

type SourceFn<'a> = dyn Fn(&[&str], &[&str]) -> String + 'a;

fn render(config: &AppConfig, source: &SourceFn<'_>) -> String {
    let mut lines = vec!["effective config (source precedence: override > env > file > default):".to_string()];

    let mut weights = config.scoring;
    for (field, value) in scoring_fields(&mut weights) {
        let key_path = format!("scoring.{field}");
        let env_key = format!("ADVISOR_SCORING_{}", field.to_ascii_uppercase());
        let from = if field == "goal_sub_category" {
            source(&[key_path.as_str(), "scoring.goal_subcategory"], &[env_key.as_str()])
        } else {
            source(&[key_path.as_str()], &[env_key.as_str()])
        };
        lines.push(render_line(&key_path, &value.to_string(), from));
    }

    let fields: [(&str, String, &[&str]); 11] = [
        (
            "recommendations.max_top_picks",
            config.recommendations.max_top_picks.to_string(),
            &["ADVISOR_RECOMMENDATIONS_MAX_TOP_PICKS"],
        ),
        (
            "recommendations.max_reasons",
            config.recommendations.max_reasons.to_string(),
            &["ADVISOR_RECOMMENDATIONS_MAX_REASONS"],
        ),
        ("storage.backend", config.storage.backend.to_string(), &["ADVISOR_STORAGE_BACKEND"]),
        ("storage.directory", config.storage.directory.display().to_string(), &["ADVISOR_STORAGE_DIRECTORY"]),
        ("storage.session_id", config.storage.session_id.clone(), &["ADVISOR_STORAGE_SESSION_ID"]),
        (
            "storage.reduced_bucket_limit",
            config.storage.reduced_bucket_limit.to_string(),
            &["ADVISOR_STORAGE_REDUCED_BUCKET_LIMIT"],
        ),
        (
            "storage.quota_bytes",
            config.storage.quota_bytes.map(|quota| quota.to_string()).unwrap_or_else(|| "<unset>".to_string()),
            &["ADVISOR_STORAGE_QUOTA_BYTES"],
        ),
        ("filters.min_price", config.filters.min_price.to_string(), &["ADVISOR_FILTERS_MIN_PRICE"]),
        ("filters.max_price", config.filters.max_price.to_string(), &["ADVISOR_FILTERS_MAX_PRICE"]),
        ("logging.level", config.logging.level.clone(), &["ADVISOR_LOGGING_LEVEL", "ADVISOR_LOG_LEVEL"]),
        (
            "logging.format",
            format!("{:?}", config.logging.format),
            &["ADVISOR_LOGGING_FORMAT", "ADVISOR_LOG_FORMAT"],
        ),
    ];
    for (key_path, value, env_keys) in fields {
        lines.push(render_line(key_path, &value, source(&[key_path], env_keys)));
    }

    lines.join("\n")
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

/// Mirrors the core loader: the first non-blank env key wins, then any
/// spelling of the key in the config file.
fn field_source(
    key_paths: &[&str],
    env_keys: &[&str],
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    let set_env_key = env_keys.iter().find(|key| env::var(key).is_ok_and(|value| !value.trim().is_empty()));
    if let Some(env_key) = set_env_key {
        return format!("env ({env_key})");
    }

    if let Some(doc) = config_file_doc {
        if key_paths.iter().any(|key_path| contains_path(doc, key_path)) {
            let file_path = config_file_path
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("config file"))
                .display()
                .to_string();
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("- {key} = {value} (source: {source})")
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::{contains_path, field_source};

    #[test]
    fn file_keys_are_attributed_to_the_file() {
        let doc: toml::Value = "[storage]\nsession_id = \"kiosk\"\n".parse().expect("valid toml");
        let path = Some(Path::new("advisor.toml"));

        assert!(contains_path(&doc, "storage.session_id"));
        assert!(!contains_path(&doc, "storage.backend"));
        assert_eq!(field_source(&["storage.session_id"], &[], Some(&doc), path), "file (advisor.toml)");
        assert_eq!(field_source(&["storage.backend"], &[], Some(&doc), None), "default");
    }

    #[test]
    fn file_aliases_are_attributed_to_the_file() {
        let doc: toml::Value = "[scoring]\ngoal_subcategory = 12.0\n".parse().expect("valid toml");

        assert_eq!(
            field_source(
                &["scoring.goal_sub_category", "scoring.goal_subcategory"],
                &[],
                Some(&doc),
                Some(Path::new("advisor.toml")),
            ),
            "file (advisor.toml)"
        );
    }
}
