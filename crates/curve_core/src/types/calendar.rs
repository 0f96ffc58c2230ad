//! Holiday calendars.
//!
//! The original source loads `global_calendars` as a process-wide singleton
//! at import time. Here a [`CalendarRegistry`] is constructed explicitly and
//! passed into the builder, per the workspace's "no global state" design
//! note — it is otherwise the same `"+"`-joined union lookup.

use super::Date;
use std::collections::{HashMap, HashSet};

/// A holiday predicate over [`Date`].
pub trait Calendar: std::fmt::Debug {
    /// True if `date` is not a business day under this calendar.
    fn is_holiday(&self, date: Date) -> bool;
}

/// Weekend-only calendar: Saturday and Sunday are holidays.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeekendCalendar;

impl Calendar for WeekendCalendar {
    fn is_holiday(&self, date: Date) -> bool {
        is_weekend(date)
    }
}

/// Weekend union an explicit holiday set.
#[derive(Debug, Clone, Default)]
pub struct EnumeratedCalendar {
    holidays: HashSet<i64>,
}

impl EnumeratedCalendar {
    /// Construct from an explicit set of excel-epoch holiday dates.
    pub fn new(holidays: HashSet<i64>) -> Self {
        Self { holidays }
    }

    /// The raw holiday set (excluding weekends, which are implicit).
    pub fn holidays(&self) -> &HashSet<i64> {
        &self.holidays
    }
}

impl Calendar for EnumeratedCalendar {
    fn is_holiday(&self, date: Date) -> bool {
        is_weekend(date) || self.holidays.contains(&date.excel())
    }
}

/// True for Saturday/Sunday.
pub fn is_weekend(date: Date) -> bool {
    use chrono::Datelike;
    date.to_naive_date().weekday().num_days_from_monday() >= 5
}

/// Union several calendars' holiday sets into one [`EnumeratedCalendar`].
pub fn union_calendars(calendars: &[EnumeratedCalendar]) -> EnumeratedCalendar {
    let mut holidays = HashSet::new();
    for cal in calendars {
        holidays.extend(cal.holidays().iter().copied());
    }
    EnumeratedCalendar::new(holidays)
}

/// Named registry of calendars, replacing the source's `global_calendars`
/// singleton with an explicit value owned by the caller.
#[derive(Debug, Clone, Default)]
pub struct CalendarRegistry {
    calendars: HashMap<String, EnumeratedCalendar>,
}

impl CalendarRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a named calendar (weekend union the supplied holiday set).
    pub fn insert(&mut self, name: impl Into<String>, holidays: HashSet<i64>) {
        self.calendars.insert(name.into(), EnumeratedCalendar::new(holidays));
    }

    /// Resolve a `"+"`-joined calendar name, e.g. `"London+NewYork"`, to the
    /// union of the named calendars' holiday sets.
    pub fn get(&self, name: &str) -> Option<EnumeratedCalendar> {
        let parts: Vec<&str> = name.split('+').collect();
        let mut found = Vec::with_capacity(parts.len());
        for part in parts {
            found.push(self.calendars.get(part)?.clone());
        }
        Some(union_calendars(&found))
    }
}
