//! Synthetic [`Curve`] generation by Euler-discretising a Hull-White
//! short-rate path and discounting along it.

use curve_model::{Curve, InterpolationMode};

use crate::error::SynthError;
use crate::short_rate_rng::ShortRateRng;

/// Simulate `dr = speed * (mean - r) * dt + sigma * dW` from `r0` across
/// `pillar_times` (in days, excluding `eval_date`), and discount along the
/// resulting path to build a [`Curve`].
///
/// `eval_date` and every entry of `pillar_times` are day-count units (as
/// used throughout `curve_model`); the simulation converts each gap to
/// years by dividing by 365. The step-`i` short rate is held constant
/// across `[times[i], times[i+1])`, so the discount factor to pillar `i`
/// is the running product of `exp(-r_j * dt_j)` for every prior step.
pub fn hull_white_curve(
    id: impl Into<String>,
    eval_date: f64,
    pillar_times: &[f64],
    r0: f64,
    speed: f64,
    mean: f64,
    sigma: f64,
    interpolation_mode: InterpolationMode,
    rng: &mut ShortRateRng,
) -> Result<Curve<f64>, SynthError> {
    if speed <= 0.0 || sigma <= 0.0 {
        return Err(SynthError::InvalidParameters { speed, sigma });
    }

    let mut times = Vec::with_capacity(pillar_times.len() + 1);
    times.push(eval_date);
    times.extend_from_slice(pillar_times);

    let mut r = r0;
    let mut cumulative_df = 1.0;
    let mut dfs = Vec::with_capacity(pillar_times.len());

    for window in times.windows(2) {
        let dt = (window[1] - window[0]) / 365.0;
        cumulative_df *= (-r * dt).exp();
        dfs.push(cumulative_df);

        let dr = speed * (mean - r) * dt + sigma * rng.gen_normal() * dt.sqrt();
        r += dr;
    }

    Ok(Curve::new(id, eval_date, pillar_times.to_vec(), dfs, interpolation_mode)?)
}
