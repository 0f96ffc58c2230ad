//! Same-currency float-vs-float basis swap.

use curve_core::types::{CouponFreq, Date, Dcc, Tenor};
use curve_model::CurveMap;

use crate::error::InstrumentError;
use crate::kernels::common::{default_quote_to_rate, default_rate_to_quote, Schedule};

/// A float-vs-float basis swap; the quoted spread sits on the left leg.
#[derive(Debug, Clone)]
pub struct BasisSwap {
    name: String,
    forecast_left: String,
    forecast_right: String,
    discount_curve: String,
    left: Schedule,
    right: Schedule,
    left_dcc: Dcc,
    right_dcc: Dcc,
}

impl BasisSwap {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        forecast_left: impl Into<String>,
        forecast_right: impl Into<String>,
        discount_curve: impl Into<String>,
        start: Date,
        end: Date,
        left_frequency: &Tenor,
        left_dcc: Dcc,
        right_frequency: &Tenor,
        right_dcc: Dcc,
    ) -> Result<Self, InstrumentError> {
        let name = name.into();
        let left = Schedule::build(start, end, left_frequency, left_dcc)?;
        let right = Schedule::build(start, end, right_frequency, right_dcc)?;
        if left.dcfs.len() != right.dcfs.len() {
            return Err(InstrumentError::MismatchedScheduleLengths {
                instrument: name,
                left: left.dcfs.len(),
                right: right.dcfs.len(),
            });
        }
        Ok(Self {
            name,
            forecast_left: forecast_left.into(),
            forecast_right: forecast_right.into(),
            discount_curve: discount_curve.into(),
            left,
            right,
            left_dcc,
            right_dcc,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get_pillar_date(&self) -> Date {
        self.left.maturity().max(self.right.maturity())
    }

    /// `(sum(r_r*dcf_r*DF_l+1) - sum(r_l*dcf_l*DF_l+1)) / sum(dcf_l*DF_l+1)`,
    /// where `DF_l` is the shared discount curve evaluated at the left
    /// schedule's dates.
    pub fn calc_par_rate(&self, curves: &CurveMap<f64>) -> Result<f64, InstrumentError> {
        let not_found = |curve_id: &str| InstrumentError::CurveNotFound {
            instrument: self.name.clone(),
            curve_id: curve_id.to_string(),
        };
        let forecast_l = curves.get(&self.forecast_left).ok_or_else(|| not_found(&self.forecast_left))?;
        let forecast_r = curves.get(&self.forecast_right).ok_or_else(|| not_found(&self.forecast_right))?;
        let discount = curves.get(&self.discount_curve).ok_or_else(|| not_found(&self.discount_curve))?;

        let r_l = forecast_l.get_fwd_rate_aligned(&self.left.times, CouponFreq::Zero, self.left_dcc)?;
        let r_r = forecast_r.get_fwd_rate_aligned(&self.right.times, CouponFreq::Zero, self.right_dcc)?;

        let mut numerator = 0.0;
        let mut denominator = 0.0;
        for i in 0..self.left.dcfs.len() {
            let df_end = discount.get_df(self.left.times[i + 1])?;
            numerator += r_r[i] * self.right.dcfs[i] * df_end;
            numerator -= r_l[i] * self.left.dcfs[i] * df_end;
            denominator += self.left.dcfs[i] * df_end;
        }
        Ok(numerator / denominator)
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
    fn identical_legs_price_to_zero_spread() {
        let mut map = CurveMap::new();
        let times: Vec<f64> = vec![42091.0, 42182.0, 42274.0, 42365.0];
        let dfs: Vec<f64> = times.iter().map(|t| (-0.02 * (t - 42000.0) / 365.0).exp()).collect();
        map.add_curve(Curve::new("USD.OIS", 42000.0, times.clone(), dfs.clone(), InterpolationMode::LinearLogDf).unwrap());
        map.add_curve(Curve::new("USD.LIBOR.3M", 42000.0, times.clone(), dfs.clone(), InterpolationMode::LinearLogDf).unwrap());

        let swap = BasisSwap::new(
            "USD.BASIS",
            "USD.LIBOR.3M",
            "USD.LIBOR.3M",
            "USD.OIS",
            Date::from_excel(42000).unwrap(),
            Date::from_excel(42365).unwrap(),
            &Tenor::parse("3M").unwrap(),
            Dcc::Act360,
            &Tenor::parse("3M").unwrap(),
            Dcc::Act360,
        )
        .unwrap();

        let rate = swap.calc_par_rate(&map).unwrap();
        assert!(rate.abs() < 1e-12);
    }

    #[test]
    fn mismatched_schedule_lengths_are_rejected() {
        let result = BasisSwap::new(
            "USD.BASIS",
            "USD.LIBOR.1M",
            "USD.LIBOR.3M",
            "USD.OIS",
            Date::from_excel(42000).unwrap(),
            Date::from_excel(42365).unwrap(),
            &Tenor::parse("1M").unwrap(),
            Dcc::Act360,
            &Tenor::parse("3M").unwrap(),
            Dcc::Act360,
        );
        assert!(matches!(result, Err(InstrumentError::MismatchedScheduleLengths { .. })));
    }
}
