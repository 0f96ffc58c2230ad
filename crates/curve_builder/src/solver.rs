//! Bounded Levenberg-Marquardt least-squares, used to calibrate one solve
//! stage's parameter vector against its assigned instruments' residuals.

use nalgebra::{DMatrix, DVector};

use crate::error::BuildError;

/// Finite-difference bump used both for in-loop Jacobians and the
/// post-calibration sensitivity Jacobian.
pub const FINITE_DIFFERENCE_BUMP: f64 = 1e-8;

/// Tuning knobs for [`levenberg_marquardt`]. Defaults mirror a conservative
/// damped Gauss-Newton pass: generous iteration budget, tight tolerance.
#[derive(Debug, Clone, Copy)]
pub struct SolverConfig {
    /// Stop when the residual-vector norm falls below this.
    pub tolerance: f64,
    /// Stop after this many iterations even if not converged.
    pub max_iterations: usize,
    /// Initial damping factor.
    pub initial_lambda: f64,
    /// Floor clamp applied to every parameter after each accepted step,
    /// enforcing the `DF > 0` bound without a constrained solver.
    pub lower_bound: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self { tolerance: 1e-10, max_iterations: 200, initial_lambda: 1e-3, lower_bound: 1e-10 }
    }
}

/// Bounded Levenberg-Marquardt: minimises `0.5 * ||residual(p)||^2` over
/// `p`, clamping every parameter to `(lower_bound, +inf)` after each
/// accepted step rather than solving a constrained subproblem — the
/// bound only ever binds on a pathological input, so a post-step clamp
/// tracks the constrained optimum closely without its cost.
///
/// `residual_fn` returns one residual per instrument in the current
/// stage; its Jacobian is built by one-sided finite differences with bump
/// [`FINITE_DIFFERENCE_BUMP`].
pub fn levenberg_marquardt<F>(initial: &[f64], config: &SolverConfig, residual_fn: F) -> Result<Vec<f64>, BuildError>
where
    F: Fn(&[f64]) -> Vec<f64>,
{
    let mut p = DVector::from_vec(initial.to_vec());
    let mut lambda = config.initial_lambda;

    let mut r = DVector::from_vec(residual_fn(p.as_slice()));
    let mut cost = 0.5 * r.norm_squared();

    for iteration in 0..config.max_iterations {
        if r.norm() < config.tolerance {
            return Ok(p.as_slice().to_vec());
        }

        let j = finite_difference_jacobian(p.as_slice(), r.len(), &residual_fn);
        let jt = j.transpose();
        let jtj = &jt * &j;
        let jtr = &jt * &r;

        let mut accepted = false;
        for _ in 0..16 {
            let damped = &jtj + DMatrix::identity(jtj.nrows(), jtj.ncols()) * lambda;
            let Some(delta) = damped.clone().lu().solve(&jtr) else {
                lambda *= 10.0;
                continue;
            };

            let mut candidate = &p - &delta;
            for x in candidate.iter_mut() {
                if *x < config.lower_bound {
                    *x = config.lower_bound;
                }
            }

            let r_candidate = DVector::from_vec(residual_fn(candidate.as_slice()));
            let candidate_cost = 0.5 * r_candidate.norm_squared();

            if candidate_cost.is_finite() && candidate_cost < cost {
                p = candidate;
                r = r_candidate;
                cost = candidate_cost;
                lambda = (lambda / 10.0).max(1e-12);
                accepted = true;
                break;
            }
            lambda *= 10.0;
        }

        if !accepted {
            return Err(BuildError::SolverFailure {
                iterations: iteration,
                message: format!("no damping factor reduced the cost below {cost:.3e}"),
            });
        }
    }

    if r.norm() < config.tolerance {
        Ok(p.as_slice().to_vec())
    } else {
        Err(BuildError::SolverFailure { iterations: config.max_iterations, message: format!("residual norm {:.3e} exceeds tolerance", r.norm()) })
    }
}

/// One-sided finite-difference Jacobian of `residual_fn` at `p`, shaped
/// `n_residuals x p.len()`.
pub fn finite_difference_jacobian<F>(p: &[f64], n_residuals: usize, residual_fn: &F) -> DMatrix<f64>
where
    F: Fn(&[f64]) -> Vec<f64>,
{
    let base = residual_fn(p);
    let mut jacobian = DMatrix::zeros(n_residuals, p.len());
    let mut bumped = p.to_vec();
    for col in 0..p.len() {
        let h = FINITE_DIFFERENCE_BUMP * p[col].abs().max(1.0);
        bumped[col] = p[col] + h;
        let bumped_residual = residual_fn(&bumped);
        bumped[col] = p[col];
        for row in 0..n_residuals {
            jacobian[(row, col)] = (bumped_residual[row] - base[row]) / h;
        }
    }
    jacobian
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converges_on_a_linear_system() {
        // residual(p) = A*p - b, A = [[2,0],[0,3]], b = [4,9] => p = [2,3]
        let residual = |p: &[f64]| vec![2.0 * p[0] - 4.0, 3.0 * p[1] - 9.0];
        let result = levenberg_marquardt(&[0.5, 0.5], &SolverConfig::default(), residual).unwrap();
        assert!((result[0] - 2.0).abs() < 1e-6);
        assert!((result[1] - 3.0).abs() < 1e-6);
    }

    #[test]
    fn clamps_parameters_above_the_lower_bound() {
        // residual(p) = p + 5, driving the unconstrained optimum negative.
        let residual = |p: &[f64]| vec![p[0] + 5.0];
        let config = SolverConfig { lower_bound: 0.01, max_iterations: 50, ..SolverConfig::default() };
        let result = levenberg_marquardt(&[1.0], &config, residual).unwrap();
        assert!(result[0] >= 0.01);
    }

    #[test]
    fn finite_difference_jacobian_matches_linear_coefficients() {
        let residual = |p: &[f64]| vec![2.0 * p[0] + 3.0 * p[1]];
        let jacobian = finite_difference_jacobian(&[1.0, 1.0], 1, &residual);
        assert!((jacobian[(0, 0)] - 2.0).abs() < 1e-4);
        assert!((jacobian[(0, 1)] - 3.0).abs() < 1e-4);
    }
}
