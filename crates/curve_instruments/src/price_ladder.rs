//! An ordered name-to-price container, the common currency for quoted
//! instrument inputs and repriced outputs alike.

use std::collections::HashMap;

use regex::Regex;

use crate::error::InstrumentError;

/// An insertion-ordered `name -> price` table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceLadder {
    names: Vec<String>,
    prices: HashMap<String, f64>,
}

impl PriceLadder {
    /// An empty ladder.
    pub fn new() -> Self {
        Self { names: Vec::new(), prices: HashMap::new() }
    }

    /// Insert or replace a price, keeping the name's first insertion
    /// position on replacement.
    pub fn insert(&mut self, name: impl Into<String>, price: f64) {
        let name = name.into();
        if !self.prices.contains_key(&name) {
            self.names.push(name.clone());
        }
        self.prices.insert(name, price);
    }

    /// Build from a `(name, price)` table, preserving row order.
    pub fn from_table(rows: &[(String, f64)]) -> Self {
        let mut ladder = Self::new();
        for (name, price) in rows {
            ladder.insert(name.clone(), *price);
        }
        ladder
    }

    /// Parse a tab-separated `Name\tPrice` table: an optional header row
    /// (recognised and skipped when its second column is not a valid
    /// float) followed by one row per instrument. Blank lines are skipped.
    pub fn from_text_table(text: &str) -> Result<Self, InstrumentError> {
        let mut ladder = Self::new();
        for (i, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split('\t').collect();
            if fields.len() < 2 {
                if i == 0 {
                    continue;
                }
                return Err(InstrumentError::InvalidPriceTableRow(line.to_string()));
            }
            match fields[1].trim().parse::<f64>() {
                Ok(price) => ladder.insert(fields[0].to_string(), price),
                Err(_) if i == 0 => continue,
                Err(_) => return Err(InstrumentError::InvalidPriceTableRow(line.to_string())),
            }
        }
        Ok(ladder)
    }

    /// Build from a name-keyed map; row order follows the map's own
    /// iteration order, which callers should not rely on being stable.
    pub fn from_map(prices: HashMap<String, f64>) -> Self {
        let mut ladder = Self::new();
        for (name, price) in prices {
            ladder.insert(name, price);
        }
        ladder
    }

    /// Look up a price by name.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.prices.get(name).copied()
    }

    /// Names in insertion order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the ladder holds no entries.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// The subset of names matching `pattern`, preserving order.
    pub fn filter(&self, pattern: &str) -> Result<Vec<String>, InstrumentError> {
        let re = Regex::new(pattern)?;
        Ok(self.names.iter().filter(|name| re.is_match(name)).cloned().collect())
    }

    /// The two-column `(name, price)` table, in insertion order.
    pub fn to_table(&self) -> Vec<(String, f64)> {
        self.names.iter().map(|name| (name.clone(), self.prices[name])).collect()
    }
}
