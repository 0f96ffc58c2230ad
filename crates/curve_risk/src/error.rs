//! Errors raised while selecting or bumping instruments for risk.

use curve_builder::BuildError;
use curve_instruments::InstrumentError;
use curve_model::CurveError;
use thiserror::Error;

/// Errors raised by [`crate::RiskCalculator`].
#[derive(Debug, Error)]
pub enum RiskError {
    /// A regex matched none of the input-price keys.
    #[error("pattern {pattern:?} matched no instruments")]
    NoMatchingInstruments {
        /// The regex that matched nothing.
        pattern: String,
    },

    /// The post-calibration Jacobian was rank-deficient beyond what the
    /// pseudo-inverse's tolerance could recover.
    #[error("Jacobian pseudo-inverse failed")]
    PseudoInverseFailed,

    /// Re-running the solver for a `FULL_REBUILD` scenario failed.
    #[error(transparent)]
    Build(#[from] BuildError),

    /// A curve DOF update failed while applying a Jacobian-rebuild delta.
    #[error(transparent)]
    Curve(#[from] CurveError),

    /// A regex pattern was invalid, or an instrument lookup failed.
    #[error(transparent)]
    Instrument(#[from] InstrumentError),
}
