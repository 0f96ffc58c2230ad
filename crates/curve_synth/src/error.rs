//! Errors raised while generating a synthetic curve.

use curve_model::CurveError;
use thiserror::Error;

/// Errors raised by [`crate::hull_white_curve`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SynthError {
    /// `speed` or `sigma` was not strictly positive.
    #[error("Hull-White parameters must have positive speed and sigma, got speed={speed}, sigma={sigma}")]
    InvalidParameters {
        /// The offending mean-reversion speed.
        speed: f64,
        /// The offending volatility.
        sigma: f64,
    },

    /// The simulated discount factors failed to build a valid curve.
    #[error(transparent)]
    Curve(#[from] CurveError),
}
