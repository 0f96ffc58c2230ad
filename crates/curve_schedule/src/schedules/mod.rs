//! Tenor stepping, IMM dates, business-day rolls, and stub-policy schedule
//! generation, ported branch-for-branch from the reference date library.
//!
//! # Example
//!
//! ```
//! use curve_core::types::{Date, Tenor};
//! use curve_schedule::schedules::{generate_schedule, StubType};
//!
//! let start = Date::from_excel(35065).unwrap();
//! let end = Date::from_excel(35431).unwrap();
//! let step = Tenor::parse("3M").unwrap();
//!
//! let dates = generate_schedule(start, end, &step, StubType::FrontStubShort).unwrap();
//! assert_eq!(dates.len(), 5);
//! ```

mod dcf;
mod error;
mod expr;
mod generate;
mod imm;
mod roll;
mod step;

pub use dcf::{calculate_dcf, calculate_dcfs};
pub use error::ScheduleError;
pub use expr::resolve_date_expression;
pub use generate::generate_schedule;
pub use imm::next_imm_date;
pub use roll::{RollType, StubType};
pub use step::{calculate_spot_date, date_roll, date_step};
