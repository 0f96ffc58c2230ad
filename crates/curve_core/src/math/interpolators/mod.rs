//! 1D interpolation methods used by the curve object's DF/log-DF/zero-rate
//! interpolation modes.
//!
//! ## Available Interpolators
//!
//! - [`LinearInterpolator`]: piecewise linear interpolation between points
//! - [`CubicSplineInterpolator`]: natural cubic spline with C² continuity
//!
//! ## Core Trait
//!
//! Both implement [`Interpolator`]:
//! - `interpolate(x: T) -> Result<T, InterpolationError>`
//! - `domain() -> (T, T)`
//!
//! ## Example
//!
//! ```
//! use curve_core::math::interpolators::{Interpolator, LinearInterpolator};
//!
//! let xs = [0.0, 1.0, 2.0, 3.0];
//! let ys = [0.0, 1.0, 4.0, 9.0];
//!
//! let interp = LinearInterpolator::new(&xs, &ys).unwrap();
//! let (x_min, x_max) = interp.domain();
//! assert_eq!(x_min, 0.0);
//! assert_eq!(x_max, 3.0);
//!
//! let y = interp.interpolate(1.5).unwrap();
//! assert!((y - 2.5).abs() < 1e-10);
//! ```

mod cubic_spline;
mod linear;

pub use cubic_spline::CubicSplineInterpolator;
pub use linear::LinearInterpolator;

use crate::types::InterpolationError;
use num_traits::Float;

/// A 1D interpolator over `(x, y)` pairs.
pub trait Interpolator<T: Float> {
    /// Evaluate the interpolant at `x`, failing if `x` lies outside
    /// [`Self::domain`].
    fn interpolate(&self, x: T) -> Result<T, InterpolationError>;

    /// The `[min, max]` range of valid query points.
    fn domain(&self) -> (T, T);
}
