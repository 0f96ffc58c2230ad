//! Curve construction and query errors.

use thiserror::Error;

/// Errors raised while constructing or querying a [`crate::Curve`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CurveError {
    /// `times` was empty at construction.
    #[error("curve {curve_id}: vector of times is empty")]
    EmptyTimes {
        /// The curve under construction.
        curve_id: String,
    },

    /// The first user-supplied pillar coincided with `eval_date`; the
    /// eval-date DF of 1.0 is implicit and must not be supplied externally.
    #[error("curve {curve_id}: DF at eval date cannot be provided externally")]
    EvalDateCollision {
        /// The curve under construction.
        curve_id: String,
    },

    /// `times`/`dfs` (or a `set_all_dofs` replacement) had mismatched lengths.
    #[error("curve {curve_id}: times/dfs length mismatch ({times} vs {dfs})")]
    MismatchedLengths {
        /// The curve under construction.
        curve_id: String,
        /// Length of the times vector.
        times: usize,
        /// Length of the dfs vector.
        dfs: usize,
    },

    /// A query point fell outside the curve's pillar range.
    #[error("curve {curve_id}: query point {t} outside range [{min}, {max}]")]
    OutOfRange {
        /// The curve that was queried.
        curve_id: String,
        /// The offending query point.
        t: f64,
        /// Lower bound of the curve's pillar range.
        min: f64,
        /// Upper bound of the curve's pillar range.
        max: f64,
    },

    /// `add_another_curve` was called with a curve whose `times` differ.
    #[error("curve {curve_id}: cannot combine with a curve over different times")]
    MismatchedTimes {
        /// The curve under construction.
        curve_id: String,
    },

    /// A degree-of-freedom vector handed to `set_all_dofs` was the wrong length.
    #[error("curve {curve_id}: expected {expected} dofs, got {got}")]
    WrongDofCount {
        /// The curve under construction.
        curve_id: String,
        /// Degrees of freedom the curve actually has.
        expected: usize,
        /// Degrees of freedom supplied by the caller.
        got: usize,
    },
}
