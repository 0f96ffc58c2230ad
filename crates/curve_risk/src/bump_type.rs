//! The two ways [`crate::RiskCalculator`] can produce a bumped curve map.

/// How [`crate::RiskCalculator::get_bumped_curvemap`] derives its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BumpType {
    /// Re-run the full solver against prices bumped by `bump * drdp()`.
    /// Exact, but as expensive as the original calibration.
    FullRebuild,
    /// Linearise around the calibrated state using the post-calibration
    /// Jacobian's pseudo-inverse. Cheap, accurate to `O(bump²)`.
    JacobianRebuild,
}
