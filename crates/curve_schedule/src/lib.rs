//! Tenor stepping, IMM-date succession, business-day rolling, and
//! stub-policy schedule generation built on [`curve_core`]'s `Date`/`Tenor`.

#![warn(missing_docs)]

pub mod schedules;

#[cfg(test)]
mod tests {
    #[test]
    fn it_works() {
        assert_eq!(2 + 2, 4);
    }
}
