pub mod config;
pub mod doctor;
pub mod recommend;
pub mod segment;

use std::path::PathBuf;
use std::sync::Arc;

use avenue_core::config::{AppConfig, ConfigOverrides, LoadOptions};
use avenue_core::{InvestorProfile, RecommendationEngine};
use avenue_data::{demo_dataset, load_csv};
use clap::Args;
use serde::Serialize;

pub const EXIT_CONFIG: u8 = 2;
pub const EXIT_DATASET: u8 = 3;
pub const EXIT_RECOMMENDATION: u8 = 4;

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
}

impl CommandResult {
    pub fn ok(output: impl Into<String>) -> Self {
        Self { exit_code: 0, output: output.into() }
    }

    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: message.into(),
        };
        Self { exit_code, output: serialize_payload(&payload) }
    }
}

/// Investor profile flags shared by `recommend` and `segment`.
#[derive(Debug, Clone, Args)]
pub struct ProfileArgs {
    #[arg(long, allow_hyphen_values = true, help = "Planned investment horizon in years")]
    pub duration_years: f64,
    #[arg(long, allow_hyphen_values = true, help = "Target average annual return in percent")]
    pub expected_return: f64,
    #[arg(long, help = "Risk appetite: low, medium or high [default: from config]")]
    pub risk: Option<String>,
    #[arg(long, allow_hyphen_values = true, help = "Number of avenues to return [default: from config]")]
    pub top_n: Option<i64>,
    #[arg(long)]
    pub age: Option<u32>,
    #[arg(long)]
    pub gender: Option<String>,
}

impl ProfileArgs {
    pub fn new(duration_years: f64, expected_return: f64) -> Self {
        Self { duration_years, expected_return, risk: None, top_n: None, age: None, gender: None }
    }

    fn to_profile(&self, config: &AppConfig) -> InvestorProfile {
        let risk = self.risk.clone().unwrap_or_else(|| config.engine.default_risk_level.clone());
        let mut profile = InvestorProfile::new(self.duration_years, self.expected_return)
            .with_risk_level(risk)
            .with_top_n(self.top_n.unwrap_or(config.engine.default_top_n));
        if let Some(age) = self.age {
            profile = profile.with_age(age);
        }
        if let Some(gender) = &self.gender {
            profile = profile.with_gender(gender);
        }
        profile
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct DatasetArgs {
    #[arg(long, conflicts_with = "demo", help = "Survey CSV to load [default: from config]")]
    pub dataset: Option<PathBuf>,
    #[arg(long, help = "Use the built-in demo dataset instead of a CSV file")]
    pub demo: bool,
}

/// Loaded configuration plus an engine over the selected dataset.
pub(crate) struct Session {
    pub config: AppConfig,
    pub engine: RecommendationEngine,
}

pub(crate) fn open_session(
    command: &str,
    config_path: Option<PathBuf>,
    dataset: &DatasetArgs,
) -> Result<Session, CommandResult> {
    let config = AppConfig::load(LoadOptions {
        config_path,
        overrides: ConfigOverrides {
            dataset_path: dataset.dataset.clone(),
            ..ConfigOverrides::default()
        },
        ..LoadOptions::default()
    })
    .map_err(|error| {
        CommandResult::failure(command, "config_validation", error.to_string(), EXIT_CONFIG)
    })?;

    let data = if dataset.demo {
        demo_dataset()
    } else {
        load_csv(&config.dataset.path).map_err(|error| {
            CommandResult::failure(command, "dataset_load", error.to_string(), EXIT_DATASET)
        })?
    };

    let engine = RecommendationEngine::new(Arc::new(data))
        .with_strict_inputs(config.engine.strict_inputs);
    Ok(Session { config, engine })
}

pub(crate) fn to_json<T: Serialize>(command: &str, payload: &T) -> CommandResult {
    match serde_json::to_string_pretty(payload) {
        Ok(output) => CommandResult::ok(output),
        Err(error) => CommandResult::failure(command, "serialization", error.to_string(), 1),
    }
}

fn serialize_payload(payload: &CommandOutcome) -> String {
    serde_json::to_string(payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}
