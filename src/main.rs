//! # vibeq CLI
//!
//! Command-line front end for the test-equivalency engine.
//!
//! ## Usage
//!
//! ```bash
//! # Run the full planning pipeline on a job file
//! vibeq plan mission.toml --out plan/
//!
//! # Solve a reliability demonstration sample size
//! vibeq sample-size --reliability 0.90 --confidence 0.95
//!
//! # List the built-in PSD template library
//! vibeq templates
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;

/// vibeq - Vibration & Thermal-Cycling Test-Equivalency Planner
#[derive(Parser)]
#[command(name = "vibeq")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline on a TOML job file and emit artifacts
    Plan {
        /// Job file describing the mission profile, DUT, and test plan
        #[arg(value_name = "JOB")]
        job: PathBuf,

        /// Output directory for the generated artifacts
        #[arg(short, long, default_value = "plan")]
        out: PathBuf,

        /// Justification acknowledging any Critical fixture warnings
        #[arg(long, value_name = "JUSTIFICATION")]
        ack: Option<String>,
    },

    /// Solve the reliability-demonstration sample size
    SampleSize {
        /// Target reliability in (0, 1)
        #[arg(short, long)]
        reliability: f64,

        /// Confidence level in (0, 1)
        #[arg(short, long)]
        confidence: f64,

        /// Allowed failures during the demonstration
        #[arg(short = 'f', long, default_value = "0")]
        allowed_failures: u64,
    },

    /// List the built-in PSD template library
    Templates,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Commands::Plan { job, out, ack } => cli::run_plan(job, out, ack),
        Commands::SampleSize {
            reliability,
            confidence,
            allowed_failures,
        } => cli::run_sample_size(reliability, confidence, allowed_failures),
        Commands::Templates => cli::run_templates(),
    }
}
