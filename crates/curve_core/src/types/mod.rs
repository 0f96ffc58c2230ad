//! Foundational types: dates, tenors, calendars, conventions, and the
//! hand-written error types used at this layer of the workspace.

pub mod calendar;
pub mod convention;
pub mod date;
pub mod error;
pub mod tenor;

pub use calendar::{Calendar, CalendarRegistry, EnumeratedCalendar, WeekendCalendar};
pub use convention::{CalculationType, Convention, ConventionRegistry, CouponFreq, Dcc};
pub use date::{Date, MIN_SUPPORTED_DATE};
pub use error::{DateError, InterpolationError, SolverError};
pub use tenor::{Tenor, TenorUnit};
