//! Stub-policy schedule generation.

use curve_core::types::Tenor;

use super::error::ScheduleError;
use super::roll::StubType;
use super::step::date_step;
use curve_core::types::Date;

/// Generate the list of schedule dates between `start` and `end`, stepping
/// by `step` under `stub_type`.
///
/// Branches exactly as the five [`StubType`] variants describe; see each
/// variant's doc comment for its policy.
pub fn generate_schedule(start: Date, end: Date, step: &Tenor, stub_type: StubType) -> Result<Vec<Date>, ScheduleError> {
    match stub_type {
        StubType::NotAllowed => {
            let mut out = Vec::new();
            let mut d = start;
            while d <= end {
                out.push(d);
                d = date_step(d, step, false)?;
            }
            let last = *out.last().expect("loop runs at least once since start <= end");
            let mismatch = last - end;
            if mismatch != 0 {
                return Err(ScheduleError::UnallowedStub {
                    start,
                    end,
                    step: step.as_str().to_string(),
                    mismatch_days: mismatch,
                });
            }
            Ok(out)
        }
        StubType::BackStubShort => {
            let mut out = Vec::new();
            let mut d = start;
            while d < end {
                out.push(d);
                d = date_step(d, step, false)?;
            }
            if out.last() != Some(&end) {
                out.push(end);
            }
            Ok(out)
        }
        StubType::BackStubLong => {
            let mut out = Vec::new();
            let mut d = start;
            while date_step(d, step, false)? <= end {
                out.push(d);
                d = date_step(d, step, false)?;
            }
            if out.last() != Some(&end) {
                out.push(end);
            }
            Ok(out)
        }
        StubType::FrontStubShort => {
            let mut out = Vec::new();
            let mut d = end;
            let step_inv = step.negated();
            while d > start {
                out.push(d);
                d = date_step(d, &step_inv, false)?;
            }
            if out.last() != Some(&start) {
                out.push(start);
            }
            out.reverse();
            Ok(out)
        }
        StubType::FrontStubLong => {
            let mut out = Vec::new();
            let mut d = end;
            let step_inv = step.negated();
            while date_step(d, &step_inv, false)? >= start {
                out.push(d);
                d = date_step(d, &step_inv, false)?;
            }
            if out.last() != Some(&start) {
                out.push(start);
            }
            out.reverse();
            Ok(out)
        }
    }
}
