//! `demo`: synthesize a curve from a Hull-White short-rate simulation and
//! print its discount factors, without reading any market data.

use curve_model::InterpolationMode;
use curve_synth::{hull_white_curve, ShortRateRng};

use crate::Result;

/// Arguments for `curve_cli demo`.
#[derive(clap::Args, Debug)]
pub struct DemoArgs {
    /// PRNG seed; the same seed always reproduces the same curve.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Initial short rate.
    #[arg(long, default_value_t = 0.02)]
    pub r0: f64,

    /// Mean-reversion speed.
    #[arg(long, default_value_t = 0.1)]
    pub speed: f64,

    /// Long-run mean short rate.
    #[arg(long, default_value_t = 0.03)]
    pub mean: f64,

    /// Short-rate volatility.
    #[arg(long, default_value_t = 0.01)]
    pub sigma: f64,
}

const DEMO_PILLARS_YEARS: [f64; 10] = [1.0, 2.0, 3.0, 4.0, 5.0, 7.0, 10.0, 15.0, 20.0, 30.0];

/// Run the demo command.
pub fn run(args: &DemoArgs) -> Result<()> {
    let pillar_times: Vec<f64> = DEMO_PILLARS_YEARS.iter().map(|y| y * 365.0).collect();
    let mut rng = ShortRateRng::from_seed(args.seed);

    let curve = hull_white_curve(
        "DEMO.SIM",
        0.0,
        &pillar_times,
        args.r0,
        args.speed,
        args.mean,
        args.sigma,
        InterpolationMode::LinearLogDf,
        &mut rng,
    )?;

    println!("synthetic curve {} (seed {})", curve.id(), rng.seed());
    println!("years\tdf");
    for (years, t) in DEMO_PILLARS_YEARS.iter().zip(pillar_times.iter()) {
        println!("{years}\t{:.8}", curve.get_df(*t)?);
    }

    Ok(())
}
