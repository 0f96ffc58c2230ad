//! Business-day roll conventions and schedule stub policies.

/// How a date that falls on a holiday is adjusted onto a business day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RollType {
    /// No adjustment.
    None,
    /// Roll forward to the next business day.
    Following,
    /// Roll backward to the previous business day.
    Preceding,
    /// Following, unless that crosses a month boundary, in which case
    /// preceding. Reserved: not yet implemented.
    ModifiedFollowing,
    /// Preceding, unless that crosses a month boundary, in which case
    /// following. Reserved: not yet implemented.
    ModifiedPreceding,
}

/// How [`generate_schedule`](super::generate::generate_schedule) handles the
/// remainder when `end - start` is not an exact multiple of `step`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StubType {
    /// No stub permitted: the forward-stepped schedule must land exactly on
    /// `end`, or generation fails.
    NotAllowed,
    /// Step forward from `start`; the final short period is folded into the
    /// last regular period at the front.
    FrontStubShort,
    /// Step backward from `end`; the final long period (step + remainder) is
    /// placed at the front.
    FrontStubLong,
    /// Step forward from `start`; a short remainder period is appended at
    /// the back.
    BackStubShort,
    /// Step forward from `start`; the final long period (step + remainder)
    /// is placed at the back.
    BackStubLong,
}
