//! `risk`: calibrate, then drive [`curve_risk::RiskCalculator`] over a
//! regex-selected set of instruments to produce a bump-and-reprice
//! scenario.

use tracing::info;

use curve_builder::SolverConfig;
use curve_risk::{BumpType, RiskCalculator};

use crate::config::{load_builder, load_prices, CalibrationArgs};
use crate::Result;

/// `clap`-friendly mirror of [`BumpType`].
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
pub enum BumpTypeArg {
    /// [`BumpType::FullRebuild`]
    Full,
    /// [`BumpType::JacobianRebuild`]
    Jacobian,
}

impl From<BumpTypeArg> for BumpType {
    fn from(value: BumpTypeArg) -> Self {
        match value {
            BumpTypeArg::Full => BumpType::FullRebuild,
            BumpTypeArg::Jacobian => BumpType::JacobianRebuild,
        }
    }
}

/// Arguments for `curve_cli risk`.
#[derive(clap::Args, Debug)]
pub struct RiskArgs {
    #[command(flatten)]
    pub calibration: CalibrationArgs,

    /// Tab-separated `Name\tPrice` table of quoted instrument prices.
    #[arg(long)]
    pub prices: String,

    /// Regex selecting which input prices to bump.
    #[arg(long)]
    pub pattern: String,

    /// Bump size, in the instrument's own quoted units.
    #[arg(long)]
    pub bump: f64,

    /// How the bumped curve map is produced.
    #[arg(long, value_enum, default_value = "full")]
    pub bump_type: BumpTypeArg,
}

/// Run the risk command.
pub fn run(args: &RiskArgs) -> Result<()> {
    let builder = load_builder(&args.calibration)?;
    let prices = load_prices(&args.prices)?;
    let config = SolverConfig::default();
    let output = builder.build(&prices, &config)?;

    let calculator = RiskCalculator::new(&builder, &output, config);
    let instruments = calculator.find_instruments(&args.pattern)?;
    info!("bumping {} instrument(s) matching {:?}", instruments.len(), args.pattern);

    let bumped = calculator.get_bumped_curvemap(&instruments, args.bump, args.bump_type.into())?;

    let base_rates: Vec<f64> = output.instruments.iter().map(|i| i.calc_par_rate(&output.curves).unwrap_or(0.0)).collect();
    let bumped_rates: Vec<f64> = output.instruments.iter().map(|i| i.calc_par_rate(&bumped).unwrap_or(0.0)).collect();

    println!("instrument\tbase\tbumped\tdelta");
    for ((instrument, base), bumped_rate) in output.instruments.iter().zip(base_rates).zip(bumped_rates) {
        println!("{}\t{:.8}\t{:.8}\t{:.8}", instrument.name(), base, bumped_rate, bumped_rate - base);
    }

    Ok(())
}
