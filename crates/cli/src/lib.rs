pub mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use avenue_core::config::{AppConfig, LoadOptions, LogFormat};
use clap::{Parser, Subcommand};
use commands::recommend::RecommendOptions;
use commands::{DatasetArgs, ProfileArgs};
use tracing::Level;

#[derive(Debug, Parser)]
#[command(
    name = "avenue",
    about = "Investment avenue recommendation CLI",
    long_about = "Rank investment avenues for an investor profile using survey responses from similar investors.",
    after_help = "Examples:\n  avenue recommend --duration-years 6 --expected-return 25 --risk high --explain\n  avenue segment --duration-years 0.5 --expected-return 12 --demo\n  avenue doctor --json"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Config file [default: avenue.toml or config/avenue.toml]")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Rank investment avenues for an investor profile")]
    Recommend {
        #[command(flatten)]
        profile: ProfileArgs,
        #[command(flatten)]
        dataset: DatasetArgs,
        #[arg(long, help = "Explain each recommended avenue from survey reasons")]
        explain: bool,
        #[arg(long, help = "Log intermediate steps at info level")]
        verbose: bool,
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "Show the survey segment and base scores used for a profile")]
    Segment {
        #[command(flatten)]
        profile: ProfileArgs,
        #[command(flatten)]
        dataset: DatasetArgs,
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
    #[command(about = "Validate config, dataset loading, and reason-column coverage")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let verbose = matches!(cli.command, Command::Recommend { verbose: true, .. });
    init_logging(cli.config.clone(), verbose);

    let result = match cli.command {
        Command::Recommend { profile, dataset, explain, verbose, json } => commands::recommend::run(
            cli.config,
            &profile,
            &dataset,
            &RecommendOptions { explain, verbose, json },
        ),
        Command::Segment { profile, dataset, json } => {
            commands::segment::run(cli.config, &profile, &dataset, json)
        }
        Command::Config => commands::config::run(cli.config),
        Command::Doctor { json } => commands::doctor::run(cli.config, json),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}

/// Logs go to stderr so stdout stays machine readable. Falls back to
/// defaults when the config does not load; the command reports that itself.
fn init_logging(config_path: Option<PathBuf>, verbose: bool) {
    let config = AppConfig::load(LoadOptions { config_path, ..LoadOptions::default() })
        .unwrap_or_default();

    let configured = config.logging.level.parse::<Level>().unwrap_or(Level::WARN);
    let log_level = if verbose { configured.max(Level::INFO) } else { configured };

    let builder =
        tracing_subscriber::fmt().with_writer(std::io::stderr).with_target(false).with_max_level(log_level);
    let _ = match config.logging.format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}
