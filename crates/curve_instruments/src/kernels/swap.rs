//! Single-currency fixed-vs-float swap.

use curve_core::types::{CouponFreq, Date, Dcc, Tenor};
use curve_model::CurveMap;

use crate::error::InstrumentError;
use crate::kernels::common::{default_quote_to_rate, default_rate_to_quote, Schedule};

/// Vanilla fixed-vs-float interest rate swap, priced to par on the fixed
/// leg against a separate discount curve.
#[derive(Debug, Clone)]
pub struct Swap {
    name: String,
    forecast_curve: String,
    discount_curve: String,
    fixed: Schedule,
    float: Schedule,
    float_dcc: Dcc,
}

impl Swap {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        forecast_curve: impl Into<String>,
        discount_curve: impl Into<String>,
        start: Date,
        end: Date,
        fixed_frequency: &Tenor,
        fixed_dcc: Dcc,
        float_frequency: &Tenor,
        float_dcc: Dcc,
    ) -> Result<Self, InstrumentError> {
        Ok(Self {
            name: name.into(),
            forecast_curve: forecast_curve.into(),
            discount_curve: discount_curve.into(),
            fixed: Schedule::build(start, end, fixed_frequency, fixed_dcc)?,
            float: Schedule::build(start, end, float_frequency, float_dcc)?,
            float_dcc,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get_pillar_date(&self) -> Date {
        self.fixed.maturity().max(self.float.maturity())
    }

    /// `sum(r_i * dcf_float_i * DF_disc(t_float,i+1)) / sum(dcf_fixed_i *
    /// DF_disc(t_fixed,i+1))`.
    pub fn calc_par_rate(&self, curves: &CurveMap<f64>) -> Result<f64, InstrumentError> {
        let forecast = curves.get(&self.forecast_curve).ok_or_else(|| InstrumentError::CurveNotFound {
            instrument: self.name.clone(),
            curve_id: self.forecast_curve.clone(),
        })?;
        let discount = curves.get(&self.discount_curve).ok_or_else(|| InstrumentError::CurveNotFound {
            instrument: self.name.clone(),
            curve_id: self.discount_curve.clone(),
        })?;

        let float_rates = forecast.get_fwd_rate_aligned(&self.float.times, CouponFreq::Zero, self.float_dcc)?;
        let mut numerator = 0.0;
        for ((r, dcf), t_end) in float_rates.iter().zip(self.float.dcfs.iter()).zip(self.float.times[1..].iter()) {
            numerator += r * dcf * discount.get_df(*t_end)?;
        }

        let mut denominator = 0.0;
        for (dcf, t_end) in self.fixed.dcfs.iter().zip(self.fixed.times[1..].iter()) {
            denominator += dcf * discount.get_df(*t_end)?;
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
