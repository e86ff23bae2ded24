use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use avenue_core::config::{resolve_config_path, AppConfig, LoadOptions, LogFormat};
use toml::Value;

use super::{CommandResult, EXIT_CONFIG};

pub fn run(config_path: Option<PathBuf>) -> CommandResult {
    let config = match AppConfig::load(LoadOptions {
        config_path: config_path.clone(),
        ..LoadOptions::default()
    }) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "config",
                "config_validation",
                error.to_string(),
                EXIT_CONFIG,
            )
        }
    };

    let file_path = resolve_config_path(config_path.as_deref());
    let file_doc = load_config_file_doc(file_path.as_deref());
    let source = |key_path: &str, env_keys: &[&str]| {
        field_source(key_path, env_keys, file_doc.as_ref(), file_path.as_deref())
    };

    let fields = [
        (
            "dataset.path",
            config.dataset.path.display().to_string(),
            source("dataset.path", &["AVENUE_DATASET_PATH"]),
        ),
        (
            "engine.default_risk_level",
            config.engine.default_risk_level.clone(),
            source("engine.default_risk_level", &["AVENUE_ENGINE_DEFAULT_RISK_LEVEL"]),
        ),
        (
            "engine.default_top_n",
            config.engine.default_top_n.to_string(),
            source("engine.default_top_n", &["AVENUE_ENGINE_DEFAULT_TOP_N"]),
        ),
        (
            "engine.strict_inputs",
            config.engine.strict_inputs.to_string(),
            source("engine.strict_inputs", &["AVENUE_ENGINE_STRICT_INPUTS"]),
        ),
        (
            "server.bind_address",
            config.server.bind_address.clone(),
            source("server.bind_address", &["AVENUE_SERVER_BIND_ADDRESS"]),
        ),
        (
            "server.port",
            config.server.port.to_string(),
            source("server.port", &["AVENUE_SERVER_PORT"]),
        ),
        (
            "logging.level",
            config.logging.level.clone(),
            source("logging.level", &["AVENUE_LOGGING_LEVEL", "AVENUE_LOG_LEVEL"]),
        ),
        (
            "logging.format",
            format_name(config.logging.format).to_string(),
            source("logging.format", &["AVENUE_LOGGING_FORMAT", "AVENUE_LOG_FORMAT"]),
        ),
    ];

    let mut lines = vec!["effective config (source precedence: env > file > default):".to_string()];
    lines.extend(fields.iter().map(|(key, value, source)| render_line(key, value, source)));

    CommandResult::ok(lines.join("\n"))
}

fn format_name(format: LogFormat) -> &'static str {
    match format {
        LogFormat::Compact => "compact",
        LogFormat::Pretty => "pretty",
        LogFormat::Json => "json",
    }
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    env_keys: &[&str],
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    if let Some(env_key) = env_keys
        .iter()
        .find(|key| env::var(key).is_ok_and(|value| !value.trim().is_empty()))
    {
        return format!("env ({env_key})");
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
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

fn render_line(key: &str, value: &str, source: &str) -> String {
    format!("- {key} = {value} (source: {source})")
}
