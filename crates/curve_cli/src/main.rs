//! Command-line front end for calibrating, repricing, and risking curve
//! maps.
//!
//! # Commands
//!
//! - `curve_cli calibrate` - calibrate curves against an instrument table
//!   and quoted prices
//! - `curve_cli price` - reprice an instrument book against calibrated
//!   curves
//! - `curve_cli risk` - drive a regex-selected bump scenario
//! - `curve_cli check` - validate an instrument/curve table without solving
//! - `curve_cli demo` - synthesize a curve from a Hull-White simulation

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;

pub use error::{CliError, Result};

/// Curve calibration, pricing, and risk command-line tool.
#[derive(Parser)]
#[command(name = "curve_cli")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Calibrate curves against an instrument table and quoted prices.
    Calibrate(commands::calibrate::CalibrateArgs),

    /// Reprice an instrument book against calibrated curves.
    Price(commands::price::PriceArgs),

    /// Drive a regex-selected bump scenario against calibrated curves.
    Risk(commands::risk::RiskArgs),

    /// Validate an instrument/curve-properties/convention table set
    /// without running the solver.
    Check(commands::check::CheckArgs),

    /// Synthesize a curve from a Hull-White short-rate simulation.
    Demo(commands::demo::DemoArgs),
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Calibrate(args) => commands::calibrate::run(args),
        Commands::Price(args) => commands::price::run(args),
        Commands::Risk(args) => commands::risk::run(args),
        Commands::Check(args) => commands::check::run(args),
        Commands::Demo(args) => commands::demo::run(args),
    }
}
