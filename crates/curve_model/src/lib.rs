//! Discount curves, interpolation modes, and the ordered [`CurveMap`]
//! collection the bootstrapping solver calibrates.

#![warn(missing_docs)]

mod curve;
mod curve_map;
mod error;

pub use curve::{Curve, InterpolationMode};
pub use curve_map::CurveMap;
pub use error::CurveError;
