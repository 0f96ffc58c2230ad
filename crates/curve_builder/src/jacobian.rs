//! Post-calibration sensitivity Jacobian: `dInstrument/dDOF` across every
//! instrument and every degree of freedom in the finished [`CurveMap`].

use curve_instruments::Instrument;
use curve_model::CurveMap;
use nalgebra::DMatrix;

use crate::error::BuildError;
use crate::solver::FINITE_DIFFERENCE_BUMP;

/// Dense Jacobian of the calibrated curve map: one row per DOF (pillar,
/// in [`CurveMap::keys`] order), one column per instrument, built by
/// one-sided finite differences with bump [`FINITE_DIFFERENCE_BUMP`].
///
/// Entry `(row, col)` is `d(par_rate_col)/d(dof_row)`, holding every other
/// DOF fixed at its calibrated value.
pub fn build_jacobian(curves: &CurveMap<f64>, instruments: &[Instrument]) -> Result<DMatrix<f64>, BuildError> {
    let all_ids: Vec<String> = curves.keys().cloned().collect();
    let n_dofs: usize = all_ids.iter().map(|id| curves[id.as_str()].get_dofs_count()).sum();
    let n_instruments = instruments.len();

    let mut jacobian = DMatrix::zeros(n_dofs, n_instruments);

    let base_rates = price_all(curves, instruments)?;

    let mut row = 0;
    for id in &all_ids {
        let dof_count = curves[id.as_str()].get_dofs_count();
        for local in 0..dof_count {
            let mut bumped = curves.clone();
            {
                let curve = bumped.get_mut(id).expect("id came from curves.keys()");
                let mut dofs = curve.get_all_dofs().to_vec();
                let h = FINITE_DIFFERENCE_BUMP * dofs[local].abs().max(1.0);
                dofs[local] += h;
                curve.set_all_dofs(&dofs)?;

                let bumped_rates = price_all(&bumped, instruments)?;
                let h_inv = 1.0 / h;
                for col in 0..n_instruments {
                    jacobian[(row, col)] = (bumped_rates[col] - base_rates[col]) * h_inv;
                }
            }
            row += 1;
        }
    }

    Ok(jacobian)
}

fn price_all(curves: &CurveMap<f64>, instruments: &[Instrument]) -> Result<Vec<f64>, BuildError> {
    instruments.iter().map(|i| Ok(i.calc_par_rate(curves)?)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use curve_core::types::{Dcc, Date, Tenor};
    use curve_instruments::ForecastRateInstrument;
    use curve_model::{Curve, InterpolationMode};

    #[test]
    fn jacobian_is_nonzero_on_the_pillar_the_instrument_matures_at() {
        let mut curves = CurveMap::new();
        curves.add_curve(
            Curve::new("USD.OIS", 42000.0, vec![42091.0, 42182.0], vec![0.998, 0.996], InterpolationMode::LinearLogDf).unwrap(),
        );
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

        let jacobian = build_jacobian(&curves, &[instrument]).unwrap();
        assert_eq!(jacobian.nrows(), 2);
        assert_eq!(jacobian.ncols(), 1);
        assert!(jacobian[(0, 0)].abs() > 1e-6);
    }
}
