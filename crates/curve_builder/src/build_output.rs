//! The calibration result: the fitted [`CurveMap`], the instruments it was
//! fitted against, their input prices, and the post-calibration Jacobian.

use curve_instruments::{Instrument, PriceLadder};
use curve_model::CurveMap;
use nalgebra::DMatrix;

use crate::error::BuildError;

/// Everything a calibration run produces: the calibrated curves, the
/// ordered instrument list used to fit them, their input quotes, and the
/// sensitivity Jacobian computed after the last stage converged.
#[derive(Debug, Clone)]
pub struct BuildOutput {
    /// The calibrated curves.
    pub curves: CurveMap<f64>,
    /// The instruments used to calibrate, in the order their residuals
    /// were assembled across all stages.
    pub instruments: Vec<Instrument>,
    /// The input quotes each instrument was calibrated against, keyed by
    /// instrument name.
    pub input_prices: PriceLadder,
    /// `dInstrument/dDOF`, rows by DOF (pillar), columns by instrument, in
    /// `instruments` order. Built once, after the final stage.
    pub jacobian: DMatrix<f64>,
}

impl BuildOutput {
    /// Reprice every instrument against the calibrated curves and express
    /// each result in its own quoted convention.
    ///
    /// An instrument whose required curve is missing from `curves` (this
    /// should not happen for a successfully calibrated output, but the
    /// method stays total rather than panicking) contributes a zero price
    /// rather than aborting the whole ladder.
    pub fn reprice(&self) -> Result<PriceLadder, BuildError> {
        let mut table = Vec::with_capacity(self.instruments.len());
        for instrument in &self.instruments {
            let price = match instrument.calc_par_rate(&self.curves) {
                Ok(rate) => instrument.rate_to_quote(rate),
                Err(_) => 0.0,
            };
            table.push((instrument.name().to_string(), price));
        }
        Ok(PriceLadder::from_table(&table))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use curve_core::types::{Dcc, Date, Tenor};
    use curve_instruments::ForecastRateInstrument;
    use curve_model::{Curve, InterpolationMode};

    fn sample_output() -> BuildOutput {
        let mut curves = CurveMap::new();
        curves.add_curve(Curve::new("USD.OIS", 42000.0, vec![42091.0], vec![0.998], InterpolationMode::LinearLogDf).unwrap());
        let instrument = Instrument::Deposit(
            ForecastRateInstrument::new(
                "USD.3M.DEP",
                "USD.OIS",
                Date::from_excel(42000).unwrap(),
                Date::from_excel(42091).unwrap(),
                &Tenor::parse("3M").unwrap(),
                Dcc::Act360,
            )
            .unwrap(),
        );
        BuildOutput {
            curves,
            instruments: vec![instrument],
            input_prices: PriceLadder::from_table(&[("USD.3M.DEP".to_string(), 2.0)]),
            jacobian: DMatrix::zeros(1, 1),
        }
    }

    #[test]
    fn reprice_returns_one_entry_per_instrument() {
        let output = sample_output();
        let repriced = output.reprice().unwrap();
        assert_eq!(repriced.len(), 1);
        assert!(repriced.get("USD.3M.DEP").is_some());
    }
}
