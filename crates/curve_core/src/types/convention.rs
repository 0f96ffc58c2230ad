//! Day-count conventions and named convention bundles.

use super::Tenor;
use std::collections::HashMap;

/// Day-count convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dcc {
    /// Actual/360.
    Act360,
    /// Actual/365.
    Act365,
}

impl Dcc {
    /// The denominator used by `dcf(d0, d1) = (d1 - d0) / denominator`.
    pub fn denominator(self) -> f64 {
        match self {
            Dcc::Act360 => 360.0,
            Dcc::Act365 => 365.0,
        }
    }

    /// Parse the convention-table string representation (`"ACT360"`, `"ACT365"`).
    pub fn from_str_table(s: &str) -> Option<Self> {
        match s {
            "ACT360" => Some(Dcc::Act360),
            "ACT365" => Some(Dcc::Act365),
            _ => None,
        }
    }
}

/// Coupon/rate compounding frequency.
///
/// Only `Continuous` and `Zero` affect numeric pricing code (`Zero` ≡
/// simple rate, `Continuous` ≡ log-rate); `Daily`/`Quarterly` are retained
/// as descriptive frequency tags carried over unchanged from the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CouponFreq {
    /// Continuously compounded (log-rate).
    Continuous,
    /// Daily compounding tag (descriptive only).
    Daily,
    /// Quarterly compounding tag (descriptive only).
    Quarterly,
    /// Simply compounded (zero rate).
    Zero,
}

/// Descriptive metadata on a [`Convention`]: whether the calculation period
/// plainly matches the payment period, compounds sub-periods, or carries no
/// special semantics.
///
/// Not load-bearing in any pricing kernel. Reset Frequency < Calculation
/// Period Frequency indicates an averaging/OIS leg; Calculation Period
/// Frequency < Payment Frequency indicates a compounding leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CalculationType {
    /// Calculation period matches payment period.
    Plain,
    /// Sub-periods are averaged into the payment period (OIS-style).
    Averaging,
    /// No special semantics recorded.
    None,
}

/// A named bundle of reset/calculation/payment frequencies and a day-count
/// convention. Immutable once built.
#[derive(Debug, Clone)]
pub struct Convention {
    /// How often the floating rate resets.
    pub reset_frequency: Tenor,
    /// The accrual calculation period.
    pub calculation_frequency: Tenor,
    /// How often coupons are paid.
    pub payment_frequency: Tenor,
    /// The day-count convention for accrual fractions.
    pub dcc: Dcc,
}

/// Named convention registry, loaded from a tab-separated table with columns
/// `Index, Reset Frequency, Calculation Period Frequency, Payment Frequency,
/// Day Count Convention`.
#[derive(Debug, Clone, Default)]
pub struct ConventionRegistry {
    conventions: HashMap<String, Convention>,
}

impl ConventionRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a named convention.
    pub fn insert(&mut self, name: impl Into<String>, convention: Convention) {
        self.conventions.insert(name.into(), convention);
    }

    /// Look up a convention by name.
    pub fn get(&self, name: &str) -> Option<&Convention> {
        self.conventions.get(name)
    }

    /// Parse a tab-separated table with a header row and the columns
    /// `Index, Reset Frequency, Calculation Period Frequency,
    /// Payment Frequency, Day Count Convention`.
    pub fn from_table(text: &str) -> Result<Self, String> {
        let mut lines = text.lines();
        let header = lines.next().ok_or("empty convention table")?;
        let cols: Vec<&str> = header.split('\t').collect();
        let idx = |name: &str| -> Result<usize, String> {
            cols.iter()
                .position(|c| *c == name)
                .ok_or_else(|| format!("missing column {}", name))
        };
        let i_index = idx("Index")?;
        let i_reset = idx("Reset Frequency")?;
        let i_calc = idx("Calculation Period Frequency")?;
        let i_pay = idx("Payment Frequency")?;
        let i_dcc = idx("Day Count Convention")?;

        let mut registry = ConventionRegistry::new();
        for line in lines {
            if line.trim().is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split('\t').collect();
            let name = fields[i_index].to_string();
            let reset = Tenor::parse(fields[i_reset]).map_err(|e| e.to_string())?;
            let calc = Tenor::parse(fields[i_calc]).map_err(|e| e.to_string())?;
            let pay = Tenor::parse(fields[i_pay]).map_err(|e| e.to_string())?;
            let dcc = Dcc::from_str_table(fields[i_dcc])
                .ok_or_else(|| format!("unknown day count convention {}", fields[i_dcc]))?;
            registry.insert(
                name,
                Convention {
                    reset_frequency: reset,
                    calculation_frequency: calc,
                    payment_frequency: pay,
                    dcc,
                },
            );
        }
        Ok(registry)
    }
}
