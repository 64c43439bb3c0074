//! petrolog - well-log interpretation CLI
//!
//! # Usage
//!
//! ```bash
//! # Interpret a LAS file, write the JSON bundle
//! petrolog analyze well.las --output well.json --pretty
//!
//! # Check a config file for typos and out-of-range values
//! petrolog check-config petrolog.toml
//!
//! # Start a config from the built-in defaults
//! petrolog print-default-config > petrolog.toml
//! ```
//!
//! # Environment Variables
//!
//! - `PETROLOG_CONFIG`: Path to the interpretation config (default: ./petrolog.toml)
//! - `RUST_LOG`: Logging level (default: info)
//!
//! Pass `--log-json` for machine-readable log lines on stderr.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};

use petrolog::config::validation;
use petrolog::pipeline;
use petrolog::summary;
use petrolog::InterpretationConfig;

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "petrolog")]
#[command(about = "Petrophysical well-log interpretation")]
#[command(version)]
struct CliArgs {
    /// Emit logs as JSON lines instead of human-readable text
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: SubCommand,
}

#[derive(clap::Subcommand, Debug)]
enum SubCommand {
    /// Interpret a LAS file and write the result bundle as JSON
    Analyze {
        /// LAS 2.0 input file
        input: PathBuf,

        /// Interpretation config (overrides PETROLOG_CONFIG and ./petrolog.toml)
        #[arg(short, long, env = "PETROLOG_CONFIG")]
        config: Option<PathBuf>,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Report unknown keys and out-of-range values in a config file
    CheckConfig {
        /// TOML config file
        file: PathBuf,
    },

    /// Print the built-in default config as TOML
    PrintDefaultConfig,
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() -> Result<()> {
    let args = CliArgs::parse();

    // Logs go to stderr so JSON on stdout stays clean
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    if args.log_json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }

    match args.command {
        SubCommand::Analyze {
            input,
            config,
            output,
            pretty,
        } => run_analyze(&input, config, output, pretty),
        SubCommand::CheckConfig { file } => run_check_config(&file),
        SubCommand::PrintDefaultConfig => {
            let toml = InterpretationConfig::default()
                .to_toml()
                .context("Failed to serialize default config")?;
            print!("{toml}");
            Ok(())
        }
    }
}

fn run_analyze(
    input: &std::path::Path,
    config_path: Option<PathBuf>,
    output: Option<PathBuf>,
    pretty: bool,
) -> Result<()> {
    let config = match config_path {
        Some(path) => InterpretationConfig::load_from_file(&path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => InterpretationConfig::load(),
    };

    info!(input = %input.display(), "Interpreting log");
    let bundle = pipeline::interpret_las_file(input, &config)
        .with_context(|| format!("Failed to interpret {}", input.display()))?;

    summary::log_summary(&summary::summarize(&bundle));

    let json = bundle
        .to_json(pretty)
        .context("Failed to serialize interpretation bundle")?;
    match output {
        Some(path) => {
            std::fs::write(&path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(output = %path.display(), "Bundle written");
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn run_check_config(file: &std::path::Path) -> Result<()> {
    let contents = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let unknown = validation::validate_unknown_keys(&contents);
    for w in &unknown {
        warn!("{}", w);
    }

    let config: InterpretationConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse {}", file.display()))?;
    let (errors, warnings) = validation::validate_physical_ranges(&config);
    for w in &warnings {
        warn!("{}", w);
    }
    for e in &errors {
        tracing::error!("{}", e);
    }

    if errors.is_empty() {
        info!(
            unknown_keys = unknown.len(),
            warnings = warnings.len(),
            "Config is valid"
        );
        Ok(())
    } else {
        anyhow::bail!("{} validation error(s) in {}", errors.len(), file.display())
    }
}
