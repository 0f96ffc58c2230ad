//! Curve-building errors: bad definition rows, solver failures, and the
//! transparent wrapping of lower-layer errors.

use curve_instruments::InstrumentError;
use curve_model::CurveError;
use curve_schedule::schedules::ScheduleError;
use thiserror::Error;

/// Errors raised while parsing an instrument definition table or running
/// the staged calibration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BuildError {
    /// An instrument definition row named an unrecognised `Type`.
    #[error("instrument {name}: unknown type {type_name}")]
    UnknownInstrumentType {
        /// The row's `Name` column.
        name: String,
        /// The unrecognised `Type` value.
        type_name: String,
    },

    /// A required column for this instrument type was the `"na"` sentinel.
    #[error("instrument {name}: column {column} is required for type {type_name}")]
    MissingColumn {
        /// The row's `Name` column.
        name: String,
        /// The instrument type.
        type_name: String,
        /// The column that was `"na"`.
        column: String,
    },

    /// A column that must be `"na"` for this instrument type carried a
    /// real value.
    #[error("instrument {name}: column {column} must be \"na\" for type {type_name}")]
    ForbiddenColumn {
        /// The row's `Name` column.
        name: String,
        /// The instrument type.
        type_name: String,
        /// The column that should have been `"na"`.
        column: String,
    },

    /// A named convention was not present in the convention registry.
    #[error("instrument {name}: convention {convention} not found")]
    UnknownConvention {
        /// The row's `Name` column.
        name: String,
        /// The missing convention name.
        convention: String,
    },

    /// `Enabled` was neither `"Y"` nor `"N"`.
    #[error("instrument {name}: Enabled must be Y or N, got {value}")]
    InvalidEnabledFlag {
        /// The row's `Name` column.
        name: String,
        /// The offending value.
        value: String,
    },

    /// A table's header was missing a required column.
    #[error("table missing required column {column}")]
    MissingTableColumn {
        /// The missing column name.
        column: String,
    },

    /// A curve-properties row named an unrecognised `Interpolation` value.
    #[error("curve {curve_id}: unknown interpolation mode {value}")]
    UnknownInterpolationMode {
        /// The row's `Curve` column.
        curve_id: String,
        /// The unrecognised value.
        value: String,
    },

    /// A curve-properties row's `Solve Stage` column did not parse as an
    /// integer.
    #[error("curve {curve_id}: Solve Stage must be an integer, got {value}")]
    InvalidSolveStage {
        /// The row's `Curve` column.
        curve_id: String,
        /// The offending value.
        value: String,
    },

    /// The Levenberg-Marquardt solver exhausted its iteration budget
    /// without meeting the convergence tolerance.
    #[error("solver failed to converge after {iterations} iterations: {message}")]
    SolverFailure {
        /// Iterations attempted.
        iterations: usize,
        /// A human-readable description of the final residual state.
        message: String,
    },

    /// Schedule/tenor resolution failed while building an instrument.
    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    /// Instrument construction or pricing failed.
    #[error(transparent)]
    Instrument(#[from] InstrumentError),

    /// A curve query or DOF update failed.
    #[error(transparent)]
    Curve(#[from] CurveError),
}
