//! Command-line interface for randkit
//!
//! # Usage Examples
//!
//! ```bash
//! # Pick three names without repeats
//! randkit list --set items="Ann,Bob,Cy,Dee" --set count=3
//!
//! # Powerball-style draw
//! randkit lottery
//!
//! # UUIDs without hyphens, uppercase
//! randkit uuid --set count=5 --set uuid_hyphens=false --set uuid_uppercase=true
//!
//! # 32 random bytes as base64
//! randkit bytes --set length=32 --set byte_encoding=base64
//! ```
//!
//! Logging goes to stderr and is controlled by `RUST_LOG` (default `warn`).

use anyhow::Context;
use clap::Parser;
use randkit::{OutputFormat, ParamsOpts, RandkitConfig};
use randkit_core::GeneratorMode;
use randkit_engine::{Generator, RandomSource};
use std::path::PathBuf;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "randkit")]
#[command(about = "Secure random numbers, passwords, list picks, dice, lotteries, tickets and UUIDs")]
#[command(version)]
struct Cli {
    /// What to generate (range, list, shuffle, password, pin, dice, coin,
    /// lottery, ticket, uuid, bytes, color)
    mode: GeneratorMode,

    #[command(flatten)]
    params: ParamsOpts,

    /// Use a seeded generator for reproducible output (not for secrets)
    #[arg(long)]
    seed: Option<u64>,

    /// Output format
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Config file with output settings and per-mode defaults
    #[arg(long, value_name = "PATH", env = "RANDKIT_CONFIG")]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => RandkitConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => RandkitConfig::default(),
    };

    let default_filter = config.log_filter.as_deref().unwrap_or("warn");
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let params = cli
        .params
        .to_input()
        .resolve(config.defaults_for(cli.mode))
        .context("Failed to resolve generator parameters")?;
    debug!(mode = %cli.mode, "Parameters resolved");

    let result = match cli.seed {
        Some(seed) => {
            warn!(seed, "Using a seeded generator; output is reproducible and not secure");
            generate(Generator::seeded(seed), cli.mode, &params)?
        }
        None => generate(Generator::secure(), cli.mode, &params)?,
    };

    let format = cli.format.or(config.output).unwrap_or_default();
    if format == OutputFormat::Text {
        for line in randkit::output::warning_lines(&result) {
            eprintln!("{line}");
        }
    }
    let rendered = randkit::output::render(&result, format).context("Failed to render result")?;
    println!("{rendered}");
    Ok(())
}

fn generate<S: RandomSource>(
    mut generator: Generator<S>,
    mode: GeneratorMode,
    params: &randkit_core::GeneratorParams,
) -> anyhow::Result<randkit_core::GenerationResult> {
    generator
        .generate(mode, params)
        .with_context(|| format!("Failed to generate {mode}"))
}
