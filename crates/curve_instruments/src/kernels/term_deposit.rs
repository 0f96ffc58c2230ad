//! Term deposit: principal exchange plus a floating reference leg, solved
//! for the fixed spread.

use curve_core::types::{CouponFreq, Date, Dcc, Tenor};
use curve_model::CurveMap;

use crate::error::InstrumentError;
use crate::kernels::common::{default_quote_to_rate, default_rate_to_quote, Schedule};

/// A term deposit: discounted principal exchange net of a floating
/// reference leg, solved for the constant fixed spread that closes the NPV.
#[derive(Debug, Clone)]
pub struct TermDeposit {
    name: String,
    forecast_curve: String,
    discount_curve: String,
    schedule: Schedule,
    dcc: Dcc,
}

impl TermDeposit {
    pub fn new(
        name: impl Into<String>,
        forecast_curve: impl Into<String>,
        discount_curve: impl Into<String>,
        start: Date,
        end: Date,
        frequency: &Tenor,
        dcc: Dcc,
    ) -> Result<Self, InstrumentError> {
        Ok(Self {
            name: name.into(),
            forecast_curve: forecast_curve.into(),
            discount_curve: discount_curve.into(),
            schedule: Schedule::build(start, end, frequency, dcc)?,
            dcc,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get_pillar_date(&self) -> Date {
        self.schedule.maturity()
    }

    /// `(DF_disc(start) - DF_disc(end) - sum(r*dcf*DF_disc)) /
    /// sum(dcf*DF_disc)`.
    pub fn calc_par_rate(&self, curves: &CurveMap<f64>) -> Result<f64, InstrumentError> {
        let not_found = |curve_id: &str| InstrumentError::CurveNotFound {
            instrument: self.name.clone(),
            curve_id: curve_id.to_string(),
        };
        let forecast = curves.get(&self.forecast_curve).ok_or_else(|| not_found(&self.forecast_curve))?;
        let discount = curves.get(&self.discount_curve).ok_or_else(|| not_found(&self.discount_curve))?;

        let r = forecast.get_fwd_rate_aligned(&self.schedule.times, CouponFreq::Zero, self.dcc)?;
        let df_start = discount.get_df(self.schedule.times[0])?;
        let df_end = discount.get_df(*self.schedule.times.last().unwrap())?;

        let mut floating_npv = 0.0;
        let mut annuity = 0.0;
        for i in 0..self.schedule.dcfs.len() {
            let df = discount.get_df(self.schedule.times[i + 1])?;
            floating_npv += r[i] * self.schedule.dcfs[i] * df;
            annuity += self.schedule.dcfs[i] * df;
        }

        Ok((df_start - df_end - floating_npv) / annuity)
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
