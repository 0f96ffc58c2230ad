//! Nonlinear solvers used for curve calibration.
//!
//! ## Available Solvers
//!
//! - [`LevenbergMarquardtSolver`]: damped Gauss-Newton nonlinear least-squares,
//!   used by the curve builder's joint multi-instrument calibration.
//!
//! ## Example
//!
//! ```
//! use curve_core::math::solvers::{LevenbergMarquardtSolver, LMConfig};
//!
//! // Minimize (p[0] - 2)² + (p[1] - 3)²
//! let residuals = |params: &[f64]| -> Vec<f64> {
//!     vec![params[0] - 2.0, params[1] - 3.0]
//! };
//!
//! let solver = LevenbergMarquardtSolver::with_defaults();
//! let result = solver.solve(residuals, vec![0.0, 0.0]).unwrap();
//!
//! assert!(result.converged);
//! assert!((result.params[0] - 2.0).abs() < 1e-6);
//! ```

mod levenberg_marquardt;

pub use levenberg_marquardt::{LMConfig, LMResult, LevenbergMarquardtSolver};
