//! Synthetic curve generation from a simulated Hull-White short-rate
//! path, used to build demo and test fixtures without a real market feed.

#![warn(missing_docs)]

mod error;
mod hull_white;
mod short_rate_rng;

pub use error::SynthError;
pub use hull_white::hull_white_curve;
pub use short_rate_rng::ShortRateRng;
