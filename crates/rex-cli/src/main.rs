//! REX - reviewer expertise and reputation scoring CLI
//!
//! ## Commands
//!
//! - `score`: Score a JSON snapshot and write the report as JSON
//! - `config`: Print the effective configuration as TOML

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use rex_core::config::{CliOverrides, ScoringConfig};
use rex_core::constants::LOG_ENV_VAR;
use rex_core::errors::RexErrorCode;
use rex_core::ScoringSnapshot;
use rex_scoring::{ScoringPipeline, ScoringReport};

#[derive(Parser)]
#[command(name = "rex")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Reviewer expertise and reputation scoring", long_about = None)]
struct Cli {
    /// Enable debug logging (ignored when REX_LOG is set)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    /// Project root searched for rex.toml
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    /// Config file used instead of <root>/rex.toml
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a snapshot of reviewers, reviews, assessments and proposals
    Score {
        /// Snapshot file (JSON)
        #[arg(short, long)]
        snapshot: PathBuf,

        /// Write the report here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        overrides: OverrideArgs,

        /// Pretty-print the JSON report
        #[arg(long)]
        pretty: bool,
    },

    /// Print the effective configuration after all layers are applied
    Config {
        #[command(flatten)]
        overrides: OverrideArgs,
    },
}

#[derive(clap::Args, Debug, Default)]
struct OverrideArgs {
    /// Quality threshold for pHigh
    #[arg(long)]
    tau: Option<f64>,

    /// Minimum pHigh for HIGH
    #[arg(long)]
    high_threshold: Option<f64>,

    /// pHigh below which a proposal is LOW
    #[arg(long)]
    low_threshold: Option<f64>,

    /// Risk penalty in the ranking score
    #[arg(long)]
    lambda: Option<f64>,
}

impl From<&OverrideArgs> for CliOverrides {
    fn from(args: &OverrideArgs) -> Self {
        Self {
            tau: args.tau,
            high_threshold: args.high_threshold,
            low_threshold: args.low_threshold,
            lambda: args.lambda,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose && std::env::var_os(LOG_ENV_VAR).is_none() {
        std::env::set_var(LOG_ENV_VAR, "rex=debug");
    }
    if cli.json {
        rex_core::tracing::init_tracing_json();
    } else {
        rex_core::tracing::init_tracing();
    }

    match &cli.command {
        Commands::Score {
            snapshot,
            output,
            overrides,
            pretty,
        } => {
            let config = load_config(&cli.root, cli.config.as_deref(), overrides)?;
            let report = cmd_score(config, snapshot)?;
            let json = render_report(&report, *pretty)?;
            match output {
                Some(path) => {
                    fs::write(path, json)
                        .with_context(|| format!("Failed to write report to {}", path.display()))?;
                    info!(path = %path.display(), "report written");
                }
                None => println!("{json}"),
            }
            Ok(())
        }
        Commands::Config { overrides } => {
            let config = load_config(&cli.root, cli.config.as_deref(), overrides)?;
            let toml = config
                .to_toml()
                .map_err(|e| anyhow::anyhow!(e.coded_string()))?;
            print!("{toml}");
            Ok(())
        }
    }
}

fn load_config(root: &Path, config: Option<&Path>, overrides: &OverrideArgs) -> Result<ScoringConfig> {
    ScoringConfig::load(root, config, Some(&CliOverrides::from(overrides)))
        .map_err(|e| anyhow::anyhow!(e.coded_string()))
        .context("Failed to load configuration")
}

fn cmd_score(config: ScoringConfig, snapshot_path: &Path) -> Result<ScoringReport> {
    let raw = fs::read_to_string(snapshot_path)
        .with_context(|| format!("Failed to read snapshot {}", snapshot_path.display()))?;
    let snapshot: ScoringSnapshot = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid snapshot JSON in {}", snapshot_path.display()))?;

    let report = ScoringPipeline::new(config)
        .run(&snapshot)
        .map_err(|e| anyhow::anyhow!(e.coded_string()))
        .context("Scoring failed")?;

    info!(
        reviewers = report.reviewers.len(),
        reviews = report.reviews.len(),
        proposals = report.proposals.len(),
        "snapshot scored"
    );
    Ok(report)
}

fn render_report(report: &ScoringReport, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(report)
    } else {
        serde_json::to_string(report)
    };
    json.context("Failed to serialize report")
}
