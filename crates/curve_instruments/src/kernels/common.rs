//! Shared accrual-schedule plumbing used by every pricing kernel.

use curve_core::types::{Date, Dcc, Tenor};
use curve_schedule::schedules::{calculate_dcfs, generate_schedule, StubType};

use crate::error::InstrumentError;

/// An accrual schedule with its day-count fractions and `f64` curve times,
/// generated once at instrument construction and reused on every price.
#[derive(Debug, Clone)]
pub(crate) struct Schedule {
    pub dates: Vec<Date>,
    pub times: Vec<f64>,
    pub dcfs: Vec<f64>,
}

impl Schedule {
    /// Build an accrual schedule from `start` to `end`, stepping by
    /// `frequency` under a front-short stub, matching the reference date
    /// library's default.
    pub fn build(start: Date, end: Date, frequency: &Tenor, dcc: Dcc) -> Result<Self, InstrumentError> {
        let dates = generate_schedule(start, end, frequency, StubType::FrontStubShort)?;
        let dcfs = calculate_dcfs(&dates, dcc);
        let times = dates.iter().map(|d| d.excel() as f64).collect();
        Ok(Self { dates, times, dcfs })
    }

    pub fn maturity(&self) -> Date {
        *self.dates.last().expect("generate_schedule always returns at least [start, end]")
    }
}

/// Default linear quote/rate bijection: `quote = rate * 100`.
pub(crate) fn default_rate_to_quote(rate: f64) -> f64 {
    rate * 100.0
}

/// Inverse of [`default_rate_to_quote`].
pub(crate) fn default_quote_to_rate(quote: f64) -> f64 {
    quote / 100.0
}
