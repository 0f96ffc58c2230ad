//! Top-level CLI error: every failure mode that can reach `main`, with the
//! process exiting non-zero and the cause printed to stderr.

use curve_builder::BuildError;
use curve_core::types::DateError;
use curve_risk::RiskError;
use curve_synth::SynthError;
use thiserror::Error;

/// Errors raised while running a CLI subcommand.
#[derive(Debug, Error)]
pub enum CliError {
    /// An input file named on the command line does not exist.
    #[error("file not found: {0}")]
    FileNotFound(String),

    /// An argument failed validation before any parsing was attempted.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Reading an input file failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The evaluation date argument failed to resolve to a valid `Date`.
    #[error(transparent)]
    Date(#[from] DateError),

    /// Instrument/curve-properties parsing or calibration failed.
    #[error(transparent)]
    Build(#[from] BuildError),

    /// A bump-scenario risk calculation failed.
    #[error(transparent)]
    Risk(#[from] RiskError),

    /// A synthetic curve failed to build.
    #[error(transparent)]
    Synth(#[from] SynthError),

    /// Pricing an instrument against a curve map failed.
    #[error(transparent)]
    Instrument(#[from] curve_instruments::InstrumentError),

    /// A curve query (e.g. an out-of-range discount factor lookup) failed.
    #[error(transparent)]
    Curve(#[from] curve_model::CurveError),
}

/// The `Result` alias every subcommand returns.
pub type Result<T> = std::result::Result<T, CliError>;
