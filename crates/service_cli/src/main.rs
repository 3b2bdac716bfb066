//! curvecast CLI - Operational entry point for the curve pipeline
//!
//! # Commands
//!
//! - `curvecast run --config <file>` - Drive the pipeline from a synthetic
//!   market feed and print published spline series
//! - `curvecast check --config <file>` - Validate a configuration and report
//!   the resolved curve/spline set
//!
//! The live market transport is out of scope here: `run` stands in for both
//! edges with a seeded mean-reverting feed and a console sink, which makes
//! the whole knot → curve → spline → publish chain observable offline.

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod error;
mod feed;

pub use error::{CliError, Result};

use feed::OutputFormat;

/// Curve spline publisher CLI
#[derive(Parser)]
#[command(name = "curvecast")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Drive the pipeline from a synthetic feed
    Run {
        /// Pipeline configuration file (TOML)
        #[arg(short, long, default_value = "curvecast.toml")]
        config: String,

        /// Number of feed ticks to run
        #[arg(short, long, default_value = "10")]
        ticks: u32,

        /// Pause between ticks, in milliseconds
        #[arg(short, long, default_value = "0")]
        interval_ms: u64,

        /// Feed random seed
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Output format for published updates
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,

        /// Leave splines unbound: recompute without publishing
        #[arg(long)]
        unwatched: bool,
    },

    /// Validate a configuration and report the resolved set
    Check {
        /// Pipeline configuration file (TOML)
        #[arg(short, long, default_value = "curvecast.toml")]
        config: String,
    },
}

fn main() -> Result<()> {
    // Initialise tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    match cli.command {
        Commands::Run {
            config,
            ticks,
            interval_ms,
            seed,
            format,
            unwatched,
        } => commands::run::run(&config, ticks, interval_ms, seed, format, unwatched),
        Commands::Check { config } => commands::check::run(&config),
    }
}
