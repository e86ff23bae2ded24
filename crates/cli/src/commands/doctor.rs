use std::path::PathBuf;

use avenue_core::config::{AppConfig, LoadOptions};
use avenue_core::{Avenue, Dataset, ReasonColumnMap};
use avenue_data::load_csv;
use serde::Serialize;

use super::{CommandResult, EXIT_CONFIG, EXIT_DATASET};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum CheckStatus {
    Pass,
    Fail,
    Skipped,
}

#[derive(Debug, Serialize)]
struct DoctorCheck {
    name: &'static str,
    status: CheckStatus,
    details: String,
}

#[derive(Debug, Serialize)]
struct DoctorReport {
    overall_status: CheckStatus,
    summary: String,
    checks: Vec<DoctorCheck>,
}

pub fn run(config_path: Option<PathBuf>, json_output: bool) -> CommandResult {
    let report = build_report(config_path);
    let exit_code = exit_code(&report);

    let output = if json_output {
        serde_json::to_string_pretty(&report).unwrap_or_else(|error| {
            format!(
                "{{\"overall_status\":\"fail\",\"summary\":\"doctor serialization failed\",\"error\":\"{}\"}}",
                escape_json(&error.to_string())
            )
        })
    } else {
        render_human(&report)
    };

    CommandResult { exit_code, output }
}

fn build_report(config_path: Option<PathBuf>) -> DoctorReport {
    let mut checks = Vec::new();

    match AppConfig::load(LoadOptions { config_path, ..LoadOptions::default() }) {
        Ok(config) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Pass,
                details: "configuration loaded and validated".to_string(),
            });
            match load_csv(&config.dataset.path) {
                Ok(dataset) => {
                    checks.push(DoctorCheck {
                        name: "dataset_load",
                        status: CheckStatus::Pass,
                        details: format!(
                            "loaded {} records from `{}`",
                            dataset.len(),
                            config.dataset.path.display()
                        ),
                    });
                    checks.push(check_reason_coverage(&dataset));
                }
                Err(error) => {
                    checks.push(DoctorCheck {
                        name: "dataset_load",
                        status: CheckStatus::Fail,
                        details: error.to_string(),
                    });
                    checks.push(skipped("reason_coverage", "dataset did not load"));
                }
            }
        }
        Err(error) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Fail,
                details: error.to_string(),
            });
            checks.push(skipped("dataset_load", "configuration did not load"));
            checks.push(skipped("reason_coverage", "configuration did not load"));
        }
    }

    let all_pass = checks.iter().all(|check| check.status == CheckStatus::Pass);
    let overall_status = if all_pass { CheckStatus::Pass } else { CheckStatus::Fail };
    let summary = if all_pass {
        "doctor: all readiness checks passed".to_string()
    } else {
        "doctor: one or more readiness checks failed".to_string()
    };

    DoctorReport { overall_status, summary, checks }
}

fn exit_code(report: &DoctorReport) -> u8 {
    let failed = |name: &str| {
        report.checks.iter().any(|check| check.name == name && check.status == CheckStatus::Fail)
    };
    if failed("config_validation") {
        EXIT_CONFIG
    } else if report.overall_status == CheckStatus::Fail {
        EXIT_DATASET
    } else {
        0
    }
}

/// Fails when the dataset is empty or a mapped reason column is absent.
fn check_reason_coverage(dataset: &Dataset) -> DoctorCheck {
    if dataset.is_empty() {
        return DoctorCheck {
            name: "reason_coverage",
            status: CheckStatus::Fail,
            details: "dataset has no rows; every recommendation would fail".to_string(),
        };
    }

    let mapping = ReasonColumnMap::standard();
    let missing: Vec<String> = Avenue::ALL
        .into_iter()
        .filter_map(|avenue| mapping.column_for(avenue))
        .filter(|column| !dataset.schema().has_reason_column(*column))
        .map(|column| column.column_name().to_string())
        .collect();

    if missing.is_empty() {
        DoctorCheck {
            name: "reason_coverage",
            status: CheckStatus::Pass,
            details: "all mapped reason columns are present".to_string(),
        }
    } else {
        DoctorCheck {
            name: "reason_coverage",
            status: CheckStatus::Fail,
            details: format!("missing reason columns: {}", missing.join(", ")),
        }
    }
}

fn skipped(name: &'static str, because: &str) -> DoctorCheck {
    DoctorCheck {
        name,
        status: CheckStatus::Skipped,
        details: format!("skipped because {because}"),
    }
}

fn render_human(report: &DoctorReport) -> String {
    let mut lines = Vec::new();
    lines.push(report.summary.clone());

    for check in &report.checks {
        let marker = match check.status {
            CheckStatus::Pass => "ok",
            CheckStatus::Fail => "fail",
            CheckStatus::Skipped => "skip",
        };
        lines.push(format!("- [{marker}] {}: {}", check.name, check.details));
    }

    lines.join("\n")
}

fn escape_json(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
