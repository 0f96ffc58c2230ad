//! Mark-to-market cross-currency basis swap: a shared reset schedule with
//! the right leg's notional retranslated at each FX-implied ratio
//! `x_i = DF_left_i / DF_right_i`.

use curve_core::types::{CouponFreq, Date, Dcc, Tenor};
use curve_model::CurveMap;
use curve_schedule::schedules::{calculate_dcfs, generate_schedule, StubType};

use crate::error::InstrumentError;
use crate::kernels::common::{default_quote_to_rate, default_rate_to_quote};

/// Float-vs-float cross-currency basis swap with MTM notional resets on
/// the right leg, solved for the par spread on the left leg.
#[derive(Debug, Clone)]
pub struct MtmCrossCurrencyBasisSwap {
    name: String,
    forecast_left: String,
    forecast_right: String,
    discount_left: String,
    discount_right: String,
    times: Vec<f64>,
    dcf_left: Vec<f64>,
    dcf_right: Vec<f64>,
    left_dcc: Dcc,
    right_dcc: Dcc,
    maturity: Date,
}

impl MtmCrossCurrencyBasisSwap {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        forecast_left: impl Into<String>,
        forecast_right: impl Into<String>,
        discount_left: impl Into<String>,
        discount_right: impl Into<String>,
        start: Date,
        end: Date,
        frequency: &Tenor,
        left_dcc: Dcc,
        right_dcc: Dcc,
    ) -> Result<Self, InstrumentError> {
        let dates = generate_schedule(start, end, frequency, StubType::FrontStubShort)?;
        let dcf_left = calculate_dcfs(&dates, left_dcc);
        let dcf_right = calculate_dcfs(&dates, right_dcc);
        let times = dates.iter().map(|d| d.excel() as f64).collect();
        let maturity = *dates.last().expect("generate_schedule always returns at least [start, end]");
        Ok(Self {
            name: name.into(),
            forecast_left: forecast_left.into(),
            forecast_right: forecast_right.into(),
            discount_left: discount_left.into(),
            discount_right: discount_right.into(),
            times,
            dcf_left,
            dcf_right,
            left_dcc,
            right_dcc,
            maturity,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get_pillar_date(&self) -> Date {
        self.maturity
    }

    /// `NPV_right = -DF_r[0] + DF_r[-1]*x[-1] + sum(r_r*dcf_r*DF_r+1*x[..-1])
    /// - sum((x[1..] - x[..-1]) * DF_r+1)`; left rate is `(NPV_right +
    /// DF_l[0] - DF_l[-1] - sum(r_l*dcf_l*DF_l+1)) / sum(dcf_l*DF_l+1)`.
    pub fn calc_par_rate(&self, curves: &CurveMap<f64>) -> Result<f64, InstrumentError> {
        let not_found = |curve_id: &str| InstrumentError::CurveNotFound {
            instrument: self.name.clone(),
            curve_id: curve_id.to_string(),
        };
        let forecast_l = curves.get(&self.forecast_left).ok_or_else(|| not_found(&self.forecast_left))?;
        let forecast_r = curves.get(&self.forecast_right).ok_or_else(|| not_found(&self.forecast_right))?;
        let discount_l = curves.get(&self.discount_left).ok_or_else(|| not_found(&self.discount_left))?;
        let discount_r = curves.get(&self.discount_right).ok_or_else(|| not_found(&self.discount_right))?;

        let df_l: Vec<f64> = self.times.iter().map(|&t| discount_l.get_df(t)).collect::<Result<_, _>>()?;
        let df_r: Vec<f64> = self.times.iter().map(|&t| discount_r.get_df(t)).collect::<Result<_, _>>()?;
        let x: Vec<f64> = df_l.iter().zip(df_r.iter()).map(|(l, r)| l / r).collect();

        let r_l = forecast_l.get_fwd_rate_aligned(&self.times, CouponFreq::Zero, self.left_dcc)?;
        let r_r = forecast_r.get_fwd_rate_aligned(&self.times, CouponFreq::Zero, self.right_dcc)?;

        let n = self.times.len();
        let last = n - 1;

        let mut npv_right = -df_r[0] + df_r[last] * x[last];
        for i in 0..last {
            npv_right += r_r[i] * self.dcf_right[i] * df_r[i + 1] * x[i];
            npv_right -= (x[i + 1] - x[i]) * df_r[i + 1];
        }

        let mut floating_left_npv = 0.0;
        let mut annuity_left = 0.0;
        for i in 0..last {
            floating_left_npv += r_l[i] * self.dcf_left[i] * df_l[i + 1];
            annuity_left += self.dcf_left[i] * df_l[i + 1];
        }

        Ok((npv_right + df_l[0] - df_l[last] - floating_left_npv) / annuity_left)
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
    fn same_currency_on_both_legs_collapses_x_to_one() {
        let mut map = CurveMap::new();
        let times: Vec<f64> = vec![42091.0, 42182.0, 42274.0, 42365.0];
        let dfs: Vec<f64> = times.iter().map(|t| (-0.02 * (t - 42000.0) / 365.0).exp()).collect();
        map.add_curve(Curve::new("USD.OIS", 42000.0, times.clone(), dfs.clone(), InterpolationMode::LinearLogDf).unwrap());
        map.add_curve(Curve::new("USD.LIBOR.3M", 42000.0, times, dfs, InterpolationMode::LinearLogDf).unwrap());

        // identical curves on both "legs" => x == 1 everywhere, so this
        // reduces to the plain float-vs-float basis swap with zero spread.
        let mtm = MtmCrossCurrencyBasisSwap::new(
            "USD.MTM",
            "USD.LIBOR.3M",
            "USD.LIBOR.3M",
            "USD.OIS",
            "USD.OIS",
            Date::from_excel(42000).unwrap(),
            Date::from_excel(42365).unwrap(),
            &Tenor::parse("3M").unwrap(),
            Dcc::Act360,
            Dcc::Act360,
        )
        .unwrap();

        let rate = mtm.calc_par_rate(&map).unwrap();
        assert!(rate.abs() < 1e-10);
    }
}
