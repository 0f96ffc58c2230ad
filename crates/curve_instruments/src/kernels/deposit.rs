//! Deposit and ZeroRate: a single forecast curve, averaged over its own
//! accrual schedule.
//!
//! The source treats both as the same instrument under the hood — a
//! reference-rate-free schedule priced entirely off one curve — so both
//! `Instrument` variants wrap this one kernel.

use curve_core::types::{Date, Dcc, Tenor};
use curve_model::CurveMap;

use crate::error::InstrumentError;
use crate::kernels::common::{default_quote_to_rate, default_rate_to_quote, Schedule};

/// Shared kernel behind the `Deposit` and `ZeroRate` instrument variants.
#[derive(Debug, Clone)]
pub struct ForecastRateInstrument {
    name: String,
    forecast_curve: String,
    schedule: Schedule,
}

impl ForecastRateInstrument {
    /// Build a single-curve deposit-style instrument accruing from `start`
    /// to `end` on `frequency`/`dcc`.
    pub fn new(
        name: impl Into<String>,
        forecast_curve: impl Into<String>,
        start: Date,
        end: Date,
        frequency: &Tenor,
        dcc: Dcc,
    ) -> Result<Self, InstrumentError> {
        Ok(Self {
            name: name.into(),
            forecast_curve: forecast_curve.into(),
            schedule: Schedule::build(start, end, frequency, dcc)?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get_pillar_date(&self) -> Date {
        self.schedule.maturity()
    }

    /// `(DF(start) - DF(end)) / sum(dcf_i * DF(end_i))`, the flat simply
    /// compounded rate implied by the forecast curve over the whole
    /// schedule; reduces to `(DF(start)/DF(end) - 1)/dcf` for a one-period
    /// schedule.
    pub fn calc_par_rate(&self, curves: &CurveMap<f64>) -> Result<f64, InstrumentError> {
        let curve = curves.get(&self.forecast_curve).ok_or_else(|| InstrumentError::CurveNotFound {
            instrument: self.name.clone(),
            curve_id: self.forecast_curve.clone(),
        })?;
        let dfs: Result<Vec<f64>, _> = self.schedule.times.iter().map(|&t| curve.get_df(t)).collect();
        let dfs = dfs?;
        let annuity: f64 = self.schedule.dcfs.iter().zip(dfs[1..].iter()).map(|(dcf, df)| dcf * df).sum();
        Ok((dfs[0] - *dfs.last().unwrap()) / annuity)
    }

    pub fn rate_to_quote(&self, rate: f64) -> f64 {
        default_rate_to_quote(rate)
    }

    pub fn quote_to_rate(&self, quote: f64) -> f64 {
        default_quote_to_rate(quote)
    }

    pub fn drdp(&self) -> f64 {
        100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use curve_model::{Curve, InterpolationMode};

    fn curves() -> CurveMap<f64> {
        let mut map = CurveMap::new();
        map.add_curve(
            Curve::new("USD.OIS", 42000.0, vec![42000.0 + 1.0, 42000.0 + 91.0], vec![0.9998, 0.995], InterpolationMode::LinearLogDf)
                .unwrap(),
        );
        map
    }

    #[test]
    fn single_period_matches_simple_fwd_rate_identity() {
        let deposit = ForecastRateInstrument::new(
            "USD.3M.DEP",
            "USD.OIS",
            Date::from_excel(42000 + 1).unwrap(),
            Date::from_excel(42000 + 91).unwrap(),
            &Tenor::parse("3M").unwrap(),
            Dcc::Act360,
        )
        .unwrap();
        let map = curves();
        let rate = deposit.calc_par_rate(&map).unwrap();
        let curve = map.get("USD.OIS").unwrap();
        let expected = curve.get_fwd_rate(42001.0, 42091.0, curve_core::types::CouponFreq::Zero, Dcc::Act360).unwrap();
        assert!((rate - expected).abs() < 1e-12);
    }
}
