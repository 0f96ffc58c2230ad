//! Instrument construction and pricing errors.

use curve_core::types::DateError;
use curve_model::CurveError;
use curve_schedule::schedules::ScheduleError;
use thiserror::Error;

/// Errors raised while building or pricing an [`crate::Instrument`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InstrumentError {
    /// `calc_par_rate` referenced a curve id absent from the `CurveMap`.
    #[error("instrument {instrument}: curve {curve_id} not found in curve map")]
    CurveNotFound {
        /// The instrument that performed the lookup.
        instrument: String,
        /// The missing curve id.
        curve_id: String,
    },

    /// Two legs of a multi-schedule instrument produced accrual schedules
    /// of different lengths; the pricing formula pairs them index-wise.
    #[error("instrument {instrument}: left schedule has {left} periods, right has {right}")]
    MismatchedScheduleLengths {
        /// The instrument that built the mismatched schedules.
        instrument: String,
        /// Left-leg period count.
        left: usize,
        /// Right-leg period count.
        right: usize,
    },

    /// Schedule/tenor construction failed.
    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    /// A curve query failed (typically out-of-range).
    #[error(transparent)]
    Curve(#[from] CurveError),

    /// Date arithmetic failed outside of schedule generation.
    #[error(transparent)]
    Date(#[from] DateError),

    /// A regex passed to [`crate::PriceLadder::filter`] failed to compile.
    #[error("invalid filter pattern: {0}")]
    InvalidPattern(String),

    /// A row of a price table had fewer than two tab-separated columns, or
    /// its price column did not parse as a float.
    #[error("invalid price table row: {0}")]
    InvalidPriceTableRow(String),
}

impl From<regex::Error> for InstrumentError {
    fn from(err: regex::Error) -> Self {
        InstrumentError::InvalidPattern(err.to_string())
    }
}
