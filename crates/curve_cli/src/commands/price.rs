//! `price`: build curves from the calibration inputs, then reprice a
//! separate instrument book against the resulting curve map.

use tracing::info;

use curve_builder::{InstrumentRow, SolverConfig};
use curve_core::types::ConventionRegistry;
use curve_instruments::PriceLadder;

use crate::config::{load_builder, load_prices, CalibrationArgs};
use crate::error::CliError;
use crate::Result;

/// Arguments for `curve_cli price`.
#[derive(clap::Args, Debug)]
pub struct PriceArgs {
    #[command(flatten)]
    pub calibration: CalibrationArgs,

    /// Tab-separated `Name\tPrice` table the curves are calibrated against.
    #[arg(long)]
    pub prices: String,

    /// Tab-separated instrument definition table to reprice. Defaults to
    /// `--instruments` when omitted.
    #[arg(long)]
    pub book: Option<String>,
}

/// Run the price command.
pub fn run(args: &PriceArgs) -> Result<()> {
    let builder = load_builder(&args.calibration)?;
    let prices = load_prices(&args.prices)?;
    let output = builder.build(&prices, &SolverConfig::default())?;

    let book_path = args.book.as_deref().unwrap_or(&args.calibration.instruments);
    if !std::path::Path::new(book_path).exists() {
        return Err(CliError::FileNotFound(book_path.to_string()));
    }
    let book_text = std::fs::read_to_string(book_path)?;
    let conventions_text = std::fs::read_to_string(&args.calibration.conventions)?;
    let conventions = ConventionRegistry::from_table(&conventions_text).map_err(CliError::InvalidArgument)?;
    let eval_date = curve_core::types::Date::from_excel(args.calibration.eval_date)?;

    info!("repricing book {}", book_path);
    let mut table = Vec::new();
    for row in InstrumentRow::from_table(&book_text)? {
        if let Some((_, instrument)) = curve_builder::build_instrument(&row, eval_date, &conventions)? {
            let price = match instrument.calc_par_rate(&output.curves) {
                Ok(rate) => instrument.rate_to_quote(rate),
                Err(_) => 0.0,
            };
            table.push((instrument.name().to_string(), price));
        }
    }

    for (name, price) in PriceLadder::from_table(&table).to_table() {
        println!("{name}\t{price}");
    }

    Ok(())
}
