//! Cross-currency swap: fixed left leg versus a floating right leg, with
//! notional exchange on both legs.

use curve_core::types::{CouponFreq, Date, Dcc, Tenor};
use curve_model::CurveMap;

use crate::error::InstrumentError;
use crate::kernels::common::{default_quote_to_rate, default_rate_to_quote, Schedule};

/// Fixed-vs-floating cross-currency swap with principal exchange; solved
/// for the par fixed rate on the left leg.
#[derive(Debug, Clone)]
pub struct CrossCurrencySwap {
    name: String,
    forecast_right: String,
    discount_left: String,
    discount_right: String,
    left: Schedule,
    right: Schedule,
    right_dcc: Dcc,
}

impl CrossCurrencySwap {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        forecast_right: impl Into<String>,
        discount_left: impl Into<String>,
        discount_right: impl Into<String>,
        start: Date,
        end: Date,
        left_frequency: &Tenor,
        left_dcc: Dcc,
        right_frequency: &Tenor,
        right_dcc: Dcc,
    ) -> Result<Self, InstrumentError> {
        Ok(Self {
            name: name.into(),
            forecast_right: forecast_right.into(),
            discount_left: discount_left.into(),
            discount_right: discount_right.into(),
            left: Schedule::build(start, end, left_frequency, left_dcc)?,
            right: Schedule::build(start, end, right_frequency, right_dcc)?,
            right_dcc,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get_pillar_date(&self) -> Date {
        self.left.maturity().max(self.right.maturity())
    }

    /// `(sum(r_r*dcf_r*DF_r+1) - (DF_r[0] - DF_r[-1]) + (DF_l[0] -
    /// DF_l[-1])) / sum(dcf_l*DF_l+1)`.
    pub fn calc_par_rate(&self, curves: &CurveMap<f64>) -> Result<f64, InstrumentError> {
        let not_found = |curve_id: &str| InstrumentError::CurveNotFound {
            instrument: self.name.clone(),
            curve_id: curve_id.to_string(),
        };
        let forecast_r = curves.get(&self.forecast_right).ok_or_else(|| not_found(&self.forecast_right))?;
        let discount_l = curves.get(&self.discount_left).ok_or_else(|| not_found(&self.discount_left))?;
        let discount_r = curves.get(&self.discount_right).ok_or_else(|| not_found(&self.discount_right))?;

        let r_r = forecast_r.get_fwd_rate_aligned(&self.right.times, CouponFreq::Zero, self.right_dcc)?;
        let mut right_floating_npv = 0.0;
        for i in 0..self.right.dcfs.len() {
            right_floating_npv += r_r[i] * self.right.dcfs[i] * discount_r.get_df(self.right.times[i + 1])?;
        }
        let df_r0 = discount_r.get_df(self.right.times[0])?;
        let df_r_last = discount_r.get_df(*self.right.times.last().unwrap())?;

        let df_l0 = discount_l.get_df(self.left.times[0])?;
        let df_l_last = discount_l.get_df(*self.left.times.last().unwrap())?;

        let mut annuity_left = 0.0;
        for i in 0..self.left.dcfs.len() {
            annuity_left += self.left.dcfs[i] * discount_l.get_df(self.left.times[i + 1])?;
        }

        Ok((right_floating_npv - (df_r0 - df_r_last) + (df_l0 - df_l_last)) / annuity_left)
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

    #[test]
    fn flat_curves_yield_finite_par_rate() {
        let mut map = CurveMap::new();
        let times: Vec<f64> = vec![42091.0, 42182.0, 42274.0, 42365.0];
        let dfs_usd: Vec<f64> = times.iter().map(|t| (-0.02 * (t - 42000.0) / 365.0).exp()).collect();
        let dfs_eur: Vec<f64> = times.iter().map(|t| (-0.01 * (t - 42000.0) / 365.0).exp()).collect();
        map.add_curve(Curve::new("USD.OIS", 42000.0, times.clone(), dfs_usd.clone(), InterpolationMode::LinearLogDf).unwrap());
        map.add_curve(Curve::new("EUR.OIS", 42000.0, times.clone(), dfs_eur.clone(), InterpolationMode::LinearLogDf).unwrap());
        map.add_curve(Curve::new("EUR.LIBOR.3M", 42000.0, times, dfs_eur, InterpolationMode::LinearLogDf).unwrap());

        let xccy = CrossCurrencySwap::new(
            "USD.EUR.XCCY",
            "EUR.LIBOR.3M",
            "USD.OIS",
            "EUR.OIS",
            Date::from_excel(42000).unwrap(),
            Date::from_excel(42365).unwrap(),
            &Tenor::parse("3M").unwrap(),
            Dcc::Act360,
            &Tenor::parse("3M").unwrap(),
            Dcc::Act360,
        )
        .unwrap();

        let rate = xccy.calc_par_rate(&map).unwrap();
        assert!(rate.is_finite());
    }
}
