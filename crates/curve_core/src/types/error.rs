//! Low-level structured error types.
//!
//! Mirrors the hand-written `Display`/`std::error::Error` idiom used at the
//! foundation of this workspace (higher layers such as `curve_builder` and
//! `curve_risk` use `thiserror` instead once the error surface grows
//! variant-rich enough to want `#[from]` conversions).

use std::fmt;

/// Errors from date parsing and tenor arithmetic.
///
/// # Examples
/// ```
/// use curve_core::types::DateError;
///
/// let err = DateError::InvalidTenor("3X".to_string());
/// assert_eq!(format!("{}", err), "Unable to parse tenor: 3X");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// A tenor string did not match `<signed integer><unit>`.
    InvalidTenor(String),
    /// An excel-epoch day count fell below the supported range (day 61).
    OutOfRange(i64),
    /// A date-expression string could not be resolved against a reference date.
    ParseError(String),
    /// `MODIFIED_FOLLOWING`/`MODIFIED_PRECEDING` or another reserved roll type.
    UnsupportedRollType(String),
}

impl fmt::Display for DateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateError::InvalidTenor(s) => write!(f, "Unable to parse tenor: {}", s),
            DateError::OutOfRange(d) => {
                write!(f, "Excel date {} is below the supported range (day 61)", d)
            }
            DateError::ParseError(msg) => write!(f, "Date parse error: {}", msg),
            DateError::UnsupportedRollType(s) => write!(f, "Unsupported roll type: {}", s),
        }
    }
}

impl std::error::Error for DateError {}

/// Errors raised by the generic 1D interpolators in [`crate::math::interpolators`].
#[derive(Debug, Clone, PartialEq)]
pub enum InterpolationError {
    /// Fewer data points were supplied than the method requires.
    InsufficientData {
        /// Number of points actually supplied.
        got: usize,
        /// Minimum number of points required.
        need: usize,
    },
    /// Mismatched array lengths or other malformed construction input.
    InvalidInput(String),
    /// Query point fell outside `[xs[0], xs[last]]`.
    OutOfBounds {
        /// The offending query point, as `f64` for display purposes.
        x: f64,
        /// Lower bound of the interpolator's domain.
        min: f64,
        /// Upper bound of the interpolator's domain.
        max: f64,
    },
}

impl fmt::Display for InterpolationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterpolationError::InsufficientData { got, need } => {
                write!(f, "Insufficient data: got {} points, need at least {}", got, need)
            }
            InterpolationError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            InterpolationError::OutOfBounds { x, min, max } => write!(
                f,
                "Query point {} outside interpolator domain [{}, {}]",
                x, min, max
            ),
        }
    }
}

impl std::error::Error for InterpolationError {}

/// Errors raised by the generic solvers in [`crate::math::solvers`].
#[derive(Debug, Clone, PartialEq)]
pub enum SolverError {
    /// The linear solve inside an iteration step failed (e.g. non positive
    /// definite normal equations) or the problem was malformed (empty
    /// parameter/residual vector).
    NumericalInstability(String),
    /// The solver ran out of iterations without reaching its tolerance.
    NonConvergence {
        /// Iterations actually performed.
        iterations: usize,
        /// Residual sum of squares at termination.
        residual: f64,
    },
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverError::NumericalInstability(msg) => write!(f, "Numerical instability: {}", msg),
            SolverError::NonConvergence { iterations, residual } => write!(
                f,
                "Solver failed to converge after {} iterations (residual {:.3e})",
                iterations, residual
            ),
        }
    }
}

impl std::error::Error for SolverError {}
