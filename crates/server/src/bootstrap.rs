use std::sync::Arc;

use avenue_core::config::{AppConfig, ConfigError, LoadOptions};
use avenue_core::RecommendationEngine;
use avenue_data::{load_csv, LoadError};
use thiserror::Error;
use tracing::info;

pub struct Application {
    pub config: AppConfig,
    pub engine: Arc<RecommendationEngine>,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("dataset load failed: {0}")]
    Dataset(#[source] LoadError),
}

#[cfg_attr(not(test), allow(dead_code))]
pub fn bootstrap(options: LoadOptions) -> Result<Application, BootstrapError> {
    let config = AppConfig::load(options)?;
    bootstrap_with_config(config)
}

/// Loads the survey table once; every request shares the resulting engine.
pub fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    info!(
        event_name = "system.bootstrap.start",
        correlation_id = "bootstrap",
        dataset_path = %config.dataset.path.display(),
        "starting application bootstrap"
    );

    let dataset = load_csv(&config.dataset.path).map_err(BootstrapError::Dataset)?;
    let engine = RecommendationEngine::new(Arc::new(dataset))
        .with_strict_inputs(config.engine.strict_inputs);
    info!(
        event_name = "system.bootstrap.engine_ready",
        correlation_id = "bootstrap",
        records = engine.dataset().len(),
        strict_inputs = config.engine.strict_inputs,
        "recommendation engine ready"
    );

    Ok(Application { config, engine: Arc::new(engine) })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use avenue_core::config::{ConfigOverrides, LoadOptions};
    use avenue_data::demo_csv;
    use tempfile::TempDir;

    use crate::bootstrap::{bootstrap, BootstrapError};

    #[test]
    fn bootstrap_fails_fast_when_dataset_is_missing() {
        let dir = TempDir::new().expect("tempdir");

        let result = bootstrap(LoadOptions {
            overrides: ConfigOverrides {
                dataset_path: Some(dir.path().join("absent.csv")),
                ..ConfigOverrides::default()
            },
            ..LoadOptions::default()
        });

        let error = result.err().expect("bootstrap should fail");
        assert!(matches!(error, BootstrapError::Dataset(_)));
        assert!(error.to_string().contains("absent.csv"));
    }

    #[test]
    fn bootstrap_rejects_invalid_engine_defaults() {
        let result = bootstrap(LoadOptions {
            overrides: ConfigOverrides {
                default_top_n: Some(0),
                ..ConfigOverrides::default()
            },
            ..LoadOptions::default()
        });

        let message = result.err().expect("bootstrap should fail").to_string();
        assert!(message.contains("default_top_n"));
    }

    #[test]
    fn bootstrap_builds_engine_over_loaded_dataset() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("survey.csv");
        fs::write(&path, demo_csv()).expect("write csv");

        let app = bootstrap(LoadOptions {
            overrides: ConfigOverrides {
                dataset_path: Some(path),
                strict_inputs: Some(true),
                ..ConfigOverrides::default()
            },
            ..LoadOptions::default()
        })
        .expect("bootstrap should succeed");

        assert_eq!(app.engine.dataset().len(), 6);
        assert!(app.config.engine.strict_inputs);
    }
}
