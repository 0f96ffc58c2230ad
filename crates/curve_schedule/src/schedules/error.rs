//! Schedule generation error types.

use curve_core::types::{Date, DateError};
use thiserror::Error;

use super::roll::RollType;

/// Errors that can occur during schedule generation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// `start` must be strictly before `end`.
    #[error("start date {start} must be before end date {end}")]
    InvalidDateRange {
        /// The start date.
        start: Date,
        /// The end date.
        end: Date,
    },

    /// `generate_schedule` was called with `StubType::NotAllowed` and the
    /// forward-stepped schedule does not land exactly on `end`.
    #[error("generate_schedule for start={start}, end={end}, step={step} results in an unallowed stub (mismatch {mismatch_days} days)")]
    UnallowedStub {
        /// Schedule start date.
        start: Date,
        /// Schedule end date.
        end: Date,
        /// The stepping tenor's source string.
        step: String,
        /// `actual_last - end`, in days.
        mismatch_days: i64,
    },

    /// A roll type with no implementation (only `Following`/`Preceding` are
    /// supported; `ModifiedFollowing`/`ModifiedPreceding` are reserved).
    #[error("roll type {0:?} is not implemented")]
    UnsupportedRoll(RollType),

    /// Date-arithmetic failure (tenor parse error, excel-epoch underflow).
    #[error(transparent)]
    Date(#[from] DateError),
}
