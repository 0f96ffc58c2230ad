//! Futures: two-date accrual with a convexity adjustment, and an inverted
//! quote convention (price = 100 - rate*100).

use curve_core::types::{Date, Dcc};
use curve_model::CurveMap;
use curve_schedule::schedules::calculate_dcf;

use crate::error::InstrumentError;

const CONVEXITY_COEFFICIENT: f64 = 2e-5;

/// A single IMM future: forward rate over `[start, end]` plus a convexity
/// adjustment proportional to the square of the time-to-start.
#[derive(Debug, Clone)]
pub struct Future {
    name: String,
    forecast_curve: String,
    trade_date: Date,
    start: Date,
    end: Date,
    dcc: Dcc,
}

impl Future {
    pub fn new(
        name: impl Into<String>,
        forecast_curve: impl Into<String>,
        trade_date: Date,
        start: Date,
        end: Date,
        dcc: Dcc,
    ) -> Self {
        Self { name: name.into(), forecast_curve: forecast_curve.into(), trade_date, start, end, dcc }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get_pillar_date(&self) -> Date {
        self.end
    }

    /// `(DF(start)/DF(end) - 1)/dcf + dcf_trade^2 * 2e-5`, with
    /// `dcf_trade = calculate_dcf(trade_date, start, ACT360)`.
    pub fn calc_par_rate(&self, curves: &CurveMap<f64>) -> Result<f64, InstrumentError> {
        let curve = curves.get(&self.forecast_curve).ok_or_else(|| InstrumentError::CurveNotFound {
            instrument: self.name.clone(),
            curve_id: self.forecast_curve.clone(),
        })?;
        let t_start = self.start.excel() as f64;
        let t_end = self.end.excel() as f64;
        let fwd = curve.get_fwd_rate(t_start, t_end, curve_core::types::CouponFreq::Zero, self.dcc)?;
        let dcf_trade = calculate_dcf(self.trade_date, self.start, Dcc::Act360);
        Ok(fwd + dcf_trade * dcf_trade * CONVEXITY_COEFFICIENT)
    }

    pub fn rate_to_quote(&self, rate: f64) -> f64 {
        100.0 - 100.0 * rate
    }

    pub fn quote_to_rate(&self, quote: f64) -> f64 {
        (100.0 - quote) / 100.0
    }

    pub fn drdp(&self) -> f64 {
        -100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use curve_model::{Curve, InterpolationMode};

    #[test]
    fn quote_bijection_inverts_around_par() {
        let future = Future::new(
            "EDU5",
            "USD.LIBOR.3M",
            Date::from_excel(42000).unwrap(),
            Date::from_excel(42091).unwrap(),
            Date::from_excel(42182).unwrap(),
            Dcc::Act360,
        );
        let rate = 0.0234;
        assert!((future.quote_to_rate(future.rate_to_quote(rate)) - rate).abs() < 1e-12);
        assert_eq!(future.drdp(), -100.0);
    }

    #[test]
    fn par_rate_adds_positive_convexity_adjustment() {
        let mut map = CurveMap::new();
        map.add_curve(
            Curve::new(
                "USD.LIBOR.3M",
                42000.0,
                vec![42091.0, 42182.0],
                vec![0.994, 0.988],
                InterpolationMode::LinearLogDf,
            )
            .unwrap(),
        );
        let future = Future::new(
            "EDU5",
            "USD.LIBOR.3M",
            Date::from_excel(42000).unwrap(),
            Date::from_excel(42091).unwrap(),
            Date::from_excel(42182).unwrap(),
            Dcc::Act360,
        );
        let curve = map.get("USD.LIBOR.3M").unwrap();
        let raw_fwd = curve
            .get_fwd_rate(42091.0, 42182.0, curve_core::types::CouponFreq::Zero, Dcc::Act360)
            .unwrap();
        let rate = future.calc_par_rate(&map).unwrap();
        assert!(rate > raw_fwd);
    }
}
