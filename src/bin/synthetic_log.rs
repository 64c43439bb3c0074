//! Synthetic LAS Generator
//!
//! Writes a layered synthetic well (shale, water sand, gas sand, shaly sand,
//! limestone, oil sand) as LAS 2.0 for exercising the interpreter.
//!
//! # Usage
//! ```bash
//! ./synthetic-log --samples 2000 --seed 42 --output synthetic.las
//! ./synthetic-log | petrolog analyze /dev/stdin
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use petrolog::synthetic::SyntheticWell;

#[derive(Parser, Debug)]
#[command(name = "synthetic-log")]
#[command(about = "Generate a synthetic LAS well log")]
struct Args {
    /// Number of depth samples
    #[arg(short, long, default_value = "2000", value_parser = clap::value_parser!(u32).range(1..=1_000_000))]
    samples: u32,

    /// Random seed (same seed, same log)
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Probability of a null reading per value
    #[arg(long, default_value = "0.02")]
    null_fraction: f64,

    /// Well name written to the ~W section
    #[arg(long, default_value = "SYNTHETIC-1")]
    name: String,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let well = SyntheticWell {
        name: args.name,
        ..SyntheticWell::new(args.samples as usize, args.seed)
    }
    .with_null_fraction(args.null_fraction);

    let text = well.to_las();
    match &args.output {
        Some(path) => {
            std::fs::write(path, &text)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(
                path = %path.display(),
                samples = well.samples,
                seed = well.seed,
                "Synthetic log written"
            );
        }
        None => print!("{text}"),
    }
    Ok(())
}
