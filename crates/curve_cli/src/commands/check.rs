//! `check`: parse and validate an instrument/curve-properties/convention
//! table set without running the solver.

use tracing::info;

use crate::config::{load_builder, CalibrationArgs};
use crate::Result;

/// Arguments for `curve_cli check`.
#[derive(clap::Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub calibration: CalibrationArgs,
}

/// Run the check command: construct every row's instrument and curve
/// property, surfacing the same errors `calibrate` would, but never
/// invoke the solver.
pub fn run(args: &CheckArgs) -> Result<()> {
    let builder = load_builder(&args.calibration)?;
    info!("{} instrument row(s) parsed without error", builder.instrument_count());
    println!("OK: {} instrument(s) parsed across {} curve stage(s)", builder.instrument_count(), builder.stage_count());
    Ok(())
}
