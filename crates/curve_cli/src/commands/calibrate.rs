//! `calibrate`: build curves from an instrument/price/curve-properties
//! table and print or write the resulting price ladder and a Jacobian
//! summary.

use tracing::info;

use curve_builder::SolverConfig;

use crate::config::{load_builder, load_prices, CalibrationArgs};
use crate::Result;

/// Arguments for `curve_cli calibrate`.
#[derive(clap::Args, Debug)]
pub struct CalibrateArgs {
    #[command(flatten)]
    pub calibration: CalibrationArgs,

    /// Tab-separated `Name\tPrice` table of quoted instrument prices.
    #[arg(long)]
    pub prices: String,

    /// Write the repriced ladder here instead of printing it.
    #[arg(long)]
    pub output: Option<String>,
}

/// Run the calibrate command.
pub fn run(args: &CalibrateArgs) -> Result<()> {
    info!("loading calibration inputs");
    let builder = load_builder(&args.calibration)?;
    let prices = load_prices(&args.prices)?;

    info!("solving {} instrument(s)", prices.len());
    let output = builder.build(&prices, &SolverConfig::default())?;
    let repriced = output.reprice()?;

    let mut report = String::new();
    for (name, price) in repriced.to_table() {
        report.push_str(&format!("{name}\t{price}\n"));
    }

    match &args.output {
        Some(path) => {
            std::fs::write(path, &report)?;
            info!("wrote repriced ladder to {}", path);
        }
        None => print!("{report}"),
    }

    println!(
        "jacobian: {} dof(s) x {} instrument(s), norm {:.6e}",
        output.jacobian.nrows(),
        output.jacobian.ncols(),
        output.jacobian.iter().map(|x| x * x).sum::<f64>().sqrt()
    );

    Ok(())
}
