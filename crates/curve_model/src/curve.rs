//! Discount curve with pluggable interpolation in discount-factor space.

use curve_core::math::interpolators::{CubicSplineInterpolator, Interpolator, LinearInterpolator};
use curve_core::types::{CouponFreq, Dcc};
use num_traits::Float;

use crate::error::CurveError;

/// Interpolation scheme a [`Curve`] builds its DF queries on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InterpolationMode {
    /// Piecewise-linear over `log(df)`; `DF(t) = exp(interp(t))`.
    LinearLogDf,
    /// Piecewise-linear over continuously-compounded zero rates.
    LinearCczr,
    /// Natural cubic spline over `log(df)`; `DF(t) = exp(interp(t))`.
    CubicLogDf,
}

/// A tagged variant over the built interpolator state, one case per
/// [`InterpolationMode`]. Avoids a null late-bound interpolator field.
#[derive(Debug, Clone)]
enum CurveInterpolator<T: Float> {
    LinearLogDf(LinearInterpolator<T>),
    CubicLogDf(CubicSplineInterpolator<T>),
    LinearCczr { interp: LinearInterpolator<T>, t_eval: T },
}

impl<T: Float> CurveInterpolator<T> {
    fn value(&self, t: T) -> Result<T, curve_core::types::InterpolationError> {
        match self {
            CurveInterpolator::LinearLogDf(i) => Ok(i.interpolate(t)?.exp()),
            CurveInterpolator::CubicLogDf(i) => Ok(i.interpolate(t)?.exp()),
            CurveInterpolator::LinearCczr { interp, t_eval } => {
                Ok((interp.interpolate(t)? * (t - *t_eval)).exp())
            }
        }
    }

    fn domain(&self) -> (T, T) {
        match self {
            CurveInterpolator::LinearLogDf(i) => i.domain(),
            CurveInterpolator::CubicLogDf(i) => i.domain(),
            CurveInterpolator::LinearCczr { interp, .. } => interp.domain(),
        }
    }
}

fn build_interpolator<T: Float>(
    curve_id: &str,
    times: &[T],
    dfs: &[T],
    mode: InterpolationMode,
) -> Result<CurveInterpolator<T>, CurveError> {
    let invalid = |_| CurveError::MismatchedLengths {
        curve_id: curve_id.to_string(),
        times: times.len(),
        dfs: dfs.len(),
    };
    match mode {
        InterpolationMode::LinearLogDf => {
            let logdf: Vec<T> = dfs.iter().map(|d| d.ln()).collect();
            LinearInterpolator::new(times, &logdf)
                .map(CurveInterpolator::LinearLogDf)
                .map_err(invalid)
        }
        InterpolationMode::CubicLogDf => {
            let logdf: Vec<T> = dfs.iter().map(|d| d.ln()).collect();
            CubicSplineInterpolator::new(times, &logdf)
                .map(CurveInterpolator::CubicLogDf)
                .map_err(invalid)
        }
        InterpolationMode::LinearCczr => {
            let t_eval = times[0];
            // cczr is undefined at t_eval; replace with the value at the
            // first real pillar.
            let cczr1 = dfs[1].ln() / (times[1] - t_eval);
            let mut cczr = Vec::with_capacity(times.len());
            cczr.push(cczr1);
            for i in 1..times.len() {
                cczr.push(dfs[i].ln() / (times[i] - t_eval));
            }
            LinearInterpolator::new(times, &cczr)
                .map(|interp| CurveInterpolator::LinearCczr { interp, t_eval })
                .map_err(invalid)
        }
    }
}

/// A discount curve: an `eval_date`-prepended sequence of pillar times and
/// discount factors, queried through one of three interpolation schemes.
///
/// Construction prepends `eval_date` with `DF = 1.0`; everything downstream
/// (DOF access, interpolation) operates on the extended arrays.
#[derive(Debug, Clone)]
pub struct Curve<T: Float> {
    id: String,
    eval_date: T,
    /// Extended: `[eval_date, times...]`.
    times: Vec<T>,
    /// Extended: `[1.0, dfs...]`.
    dfs: Vec<T>,
    interpolation_mode: InterpolationMode,
    interpolator: CurveInterpolator<T>,
}

impl<T: Float> Curve<T> {
    /// Construct a curve. `times`/`dfs` are the user-supplied pillars,
    /// excluding the implicit `eval_date`/`1.0` pair.
    pub fn new(
        id: impl Into<String>,
        eval_date: T,
        times: Vec<T>,
        dfs: Vec<T>,
        interpolation_mode: InterpolationMode,
    ) -> Result<Self, CurveError> {
        let id = id.into();
        if times.is_empty() {
            return Err(CurveError::EmptyTimes { curve_id: id });
        }
        if times.len() != dfs.len() {
            return Err(CurveError::MismatchedLengths {
                curve_id: id,
                times: times.len(),
                dfs: dfs.len(),
            });
        }
        if times[0] == eval_date {
            return Err(CurveError::EvalDateCollision { curve_id: id });
        }

        let mut ext_times = Vec::with_capacity(times.len() + 1);
        ext_times.push(eval_date);
        ext_times.extend(times);
        let mut ext_dfs = Vec::with_capacity(dfs.len() + 1);
        ext_dfs.push(T::one());
        ext_dfs.extend(dfs);

        let interpolator = build_interpolator(&id, &ext_times, &ext_dfs, interpolation_mode)?;

        Ok(Self {
            id,
            eval_date,
            times: ext_times,
            dfs: ext_dfs,
            interpolation_mode,
            interpolator,
        })
    }

    /// Rebuild the interpolator, optionally switching mode first.
    fn set_interpolator(&mut self, mode: Option<InterpolationMode>) -> Result<(), CurveError> {
        if let Some(mode) = mode {
            self.interpolation_mode = mode;
        }
        self.interpolator = build_interpolator(&self.id, &self.times, &self.dfs, self.interpolation_mode)?;
        Ok(())
    }

    /// The curve's identity.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The evaluation (as-of) date, in the curve's own time units.
    pub fn eval_date(&self) -> T {
        self.eval_date
    }

    /// The interpolation scheme currently in effect.
    pub fn interpolation_mode(&self) -> InterpolationMode {
        self.interpolation_mode
    }

    fn out_of_range(&self, t: T) -> CurveError {
        let (min, max) = self.interpolator.domain();
        CurveError::OutOfRange {
            curve_id: self.id.clone(),
            t: t.to_f64().unwrap_or(f64::NAN),
            min: min.to_f64().unwrap_or(f64::NAN),
            max: max.to_f64().unwrap_or(f64::NAN),
        }
    }

    /// Discount factor at `t`.
    pub fn get_df(&self, t: T) -> Result<T, CurveError> {
        self.interpolator.value(t).map_err(|_| self.out_of_range(t))
    }

    /// Zero rate to `t` under `freq`/`dcc`.
    ///
    /// `ZERO`: `(1/DF - 1)/dcf`. `CONTINUOUS`: `-ln(DF)/dcf`. Other
    /// frequencies are descriptive-only and are treated as `ZERO`.
    pub fn get_zero_rate(&self, t: T, freq: CouponFreq, dcc: Dcc) -> Result<T, CurveError> {
        let df = self.get_df(t)?;
        let dcf = (t - self.eval_date) / T::from(dcc.denominator()).unwrap();
        Ok(match freq {
            CouponFreq::Continuous => -df.ln() / dcf,
            _ => (T::one() / df - T::one()) / dcf,
        })
    }

    /// Forward rate between `t_start` and `t_end` under `freq`/`dcc`.
    pub fn get_fwd_rate(&self, t_start: T, t_end: T, freq: CouponFreq, dcc: Dcc) -> Result<T, CurveError> {
        let df_start = self.get_df(t_start)?;
        let df_end = self.get_df(t_end)?;
        let dcf = (t_end - t_start) / T::from(dcc.denominator()).unwrap();
        Ok(match freq {
            CouponFreq::Continuous => (df_start / df_end).ln() / dcf,
            _ => (df_start / df_end - T::one()) / dcf,
        })
    }

    /// Forward rates over consecutive pairs of an aligned schedule `t`,
    /// avoiding re-querying the interpolator at duplicated boundaries.
    /// Returns `t.len() - 1` rates.
    pub fn get_fwd_rate_aligned(&self, t: &[T], freq: CouponFreq, dcc: Dcc) -> Result<Vec<T>, CurveError> {
        let dfs: Result<Vec<T>, CurveError> = t.iter().map(|&ti| self.get_df(ti)).collect();
        let dfs = dfs?;
        let denom = T::from(dcc.denominator()).unwrap();
        Ok((0..t.len() - 1)
            .map(|i| {
                let dcf = (t[i + 1] - t[i]) / denom;
                match freq {
                    CouponFreq::Continuous => (dfs[i] / dfs[i + 1]).ln() / dcf,
                    _ => (dfs[i] / dfs[i + 1] - T::one()) / dcf,
                }
            })
            .collect())
    }

    /// Multiplies discount factors pillar-by-pillar with `other`'s, used to
    /// compose a basis curve onto a discount curve. Requires identical
    /// `times`.
    pub fn add_another_curve(&mut self, other: &Curve<T>) -> Result<(), CurveError> {
        if self.times.len() != other.times.len()
            || self.times.iter().zip(other.times.iter()).any(|(a, b)| a != b)
        {
            return Err(CurveError::MismatchedTimes { curve_id: self.id.clone() });
        }
        for (d, o) in self.dfs.iter_mut().zip(other.dfs.iter()) {
            *d = *d * *o;
        }
        self.set_interpolator(None)
    }

    /// Degrees of freedom: the DFs excluding the prepended eval-date 1.0.
    pub fn get_all_dofs(&self) -> &[T] {
        &self.dfs[1..]
    }

    /// Replace the degrees of freedom and rebuild the interpolator.
    pub fn set_all_dofs(&mut self, dofs: &[T]) -> Result<(), CurveError> {
        if dofs.len() != self.dfs.len() - 1 {
            return Err(CurveError::WrongDofCount {
                curve_id: self.id.clone(),
                expected: self.dfs.len() - 1,
                got: dofs.len(),
            });
        }
        self.dfs[1..].copy_from_slice(dofs);
        self.set_interpolator(None)
    }

    /// Number of degrees of freedom (`len(dfs) - 1`).
    pub fn get_dofs_count(&self) -> usize {
        self.dfs.len() - 1
    }

    /// The pillar times, including the prepended `eval_date`.
    pub fn times(&self) -> &[T] {
        &self.times
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make(mode: InterpolationMode) -> Curve<f64> {
        Curve::new("USD.OIS", 0.0, vec![0.001, 1.0, 2.0], vec![0.99, 0.98, 0.975], mode).unwrap()
    }

    #[test]
    fn get_df_at_eval_date_is_exactly_one() {
        let curve = make(InterpolationMode::LinearLogDf);
        assert_eq!(curve.get_df(0.0).unwrap(), 1.0);
    }

    #[test]
    fn rejects_empty_times() {
        let result = Curve::<f64>::new("X", 0.0, vec![], vec![], InterpolationMode::LinearLogDf);
        assert!(matches!(result, Err(CurveError::EmptyTimes { .. })));
    }

    #[test]
    fn rejects_eval_date_collision() {
        let result = Curve::new("X", 0.0, vec![0.0, 1.0], vec![0.99, 0.98], InterpolationMode::LinearLogDf);
        assert!(matches!(result, Err(CurveError::EvalDateCollision { .. })));
    }

    #[test]
    fn linear_logdf_matches_fixture() {
        let curve = make(InterpolationMode::LinearLogDf);
        let dfs: Vec<f64> = [1.3, 1.9].iter().map(|&t| curve.get_df(t).unwrap()).collect();
        assert!((dfs[0] - 0.9784973).abs() < 1e-6);
        assert!((dfs[1] - 0.9754988).abs() < 1e-6);
    }

    #[test]
    fn fwd_rate_aligned_matches_fixture() {
        let curve = make(InterpolationMode::LinearLogDf);
        let rates = curve
            .get_fwd_rate_aligned(&[1.0, 1.3, 1.9], CouponFreq::Zero, Dcc::Act365)
            .unwrap();
        assert!((rates[0] - 1.868445).abs() < 1e-5);
        assert!((rates[1] - 1.8698797).abs() < 1e-5);
    }

    #[test]
    fn out_of_range_names_curve_id_and_bounds() {
        let curve = make(InterpolationMode::LinearLogDf);
        let err = curve.get_df(5.0).unwrap_err();
        match err {
            CurveError::OutOfRange { curve_id, .. } => assert_eq!(curve_id, "USD.OIS"),
            _ => panic!("expected OutOfRange"),
        }
    }

    #[test]
    fn get_all_dofs_excludes_prepended_one() {
        let curve = make(InterpolationMode::LinearLogDf);
        assert_eq!(curve.get_all_dofs(), &[0.99, 0.98, 0.975]);
        assert_eq!(curve.get_dofs_count(), 3);
    }

    #[test]
    fn set_all_dofs_rebuilds_interpolator() {
        let mut curve = make(InterpolationMode::LinearLogDf);
        curve.set_all_dofs(&[0.991, 0.981, 0.976]).unwrap();
        assert_eq!(curve.get_all_dofs(), &[0.991, 0.981, 0.976]);
    }

    #[test]
    fn set_all_dofs_rejects_wrong_length() {
        let mut curve = make(InterpolationMode::LinearLogDf);
        let result = curve.set_all_dofs(&[0.99]);
        assert!(matches!(result, Err(CurveError::WrongDofCount { .. })));
    }

    #[test]
    fn cubic_logdf_reproduces_pillars_exactly() {
        let curve = make(InterpolationMode::CubicLogDf);
        assert!((curve.get_df(1.0).unwrap() - 0.98).abs() < 1e-10);
        assert!((curve.get_df(2.0).unwrap() - 0.975).abs() < 1e-10);
    }

    #[test]
    fn linear_cczr_reproduces_pillars_exactly() {
        let curve = make(InterpolationMode::LinearCczr);
        assert!((curve.get_df(1.0).unwrap() - 0.98).abs() < 1e-8);
        assert!((curve.get_df(2.0).unwrap() - 0.975).abs() < 1e-8);
    }

    #[test]
    fn add_another_curve_multiplies_dfs_pillarwise() {
        let mut base = make(InterpolationMode::LinearLogDf);
        let basis = make(InterpolationMode::LinearLogDf);
        base.add_another_curve(&basis).unwrap();
        assert!((base.get_df(1.0).unwrap() - 0.98 * 0.98).abs() < 1e-10);
    }

    #[test]
    fn add_another_curve_rejects_mismatched_times() {
        let mut base = make(InterpolationMode::LinearLogDf);
        let other = Curve::new("Y", 0.0, vec![0.5, 1.0], vec![0.99, 0.98], InterpolationMode::LinearLogDf).unwrap();
        assert!(matches!(base.add_another_curve(&other), Err(CurveError::MismatchedTimes { .. })));
    }
}
