//! Tenor parsing: `(n: signed integer, unit)` pairs such as `"3M"`, `"1Y"`, `"2F"`.

use super::DateError;
use std::fmt;

/// The unit of a [`Tenor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TenorUnit {
    /// Calendar day.
    Day,
    /// Calendar month.
    Month,
    /// Calendar quarter (3 months).
    Quarter,
    /// Calendar year.
    Year,
    /// IMM future step: advance to the n-th IMM date at or after the anchor.
    Future,
}

impl TenorUnit {
    fn from_char(c: char) -> Result<Self, DateError> {
        match c {
            'D' => Ok(TenorUnit::Day),
            'M' => Ok(TenorUnit::Month),
            'Q' => Ok(TenorUnit::Quarter),
            'Y' => Ok(TenorUnit::Year),
            'F' => Ok(TenorUnit::Future),
            other => Err(DateError::InvalidTenor(other.to_string())),
        }
    }

    fn to_char(self) -> char {
        match self {
            TenorUnit::Day => 'D',
            TenorUnit::Month => 'M',
            TenorUnit::Quarter => 'Q',
            TenorUnit::Year => 'Y',
            TenorUnit::Future => 'F',
        }
    }
}

/// A parsed tenor expression, e.g. `3M`, `-6M`, `2F`.
///
/// Equality and hashing are structural on the originating source string (as
/// in the original implementation), not on the semantic `(n, unit)` pair —
/// `"3M"` and `"+3M"` are distinct `Tenor` values even though they denote the
/// same step.
#[derive(Debug, Clone)]
pub struct Tenor {
    source: String,
    n: i64,
    unit: TenorUnit,
}

impl Tenor {
    /// Parse a tenor string such as `"3M"`, `"-1Y"`, `"2F"`.
    pub fn parse(s: &str) -> Result<Self, DateError> {
        if s.is_empty() {
            return Err(DateError::InvalidTenor(s.to_string()));
        }
        let mut chars = s.chars();
        let unit_char = chars.next_back().ok_or_else(|| DateError::InvalidTenor(s.to_string()))?;
        let unit = TenorUnit::from_char(unit_char)?;
        let n_part = &s[..s.len() - 1];
        let n: i64 = if n_part.is_empty() {
            0
        } else {
            n_part
                .parse()
                .map_err(|_| DateError::InvalidTenor(s.to_string()))?
        };
        Ok(Tenor { source: s.to_string(), n, unit })
    }

    /// The signed step count.
    pub fn n(&self) -> i64 {
        self.n
    }

    /// The step unit.
    pub fn unit(&self) -> TenorUnit {
        self.unit
    }

    /// The original source string.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Negate the tenor's sign, preserving its unit.
    pub fn negated(&self) -> Tenor {
        let n = -self.n;
        let source = format!("{}{}", n, self.unit.to_char());
        Tenor { source, n, unit: self.unit }
    }
}

impl PartialEq for Tenor {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for Tenor {}

impl fmt::Display for Tenor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_basic_tenors() {
        let t = Tenor::parse("3M").unwrap();
        assert_eq!(t.n(), 3);
        assert_eq!(t.unit(), TenorUnit::Month);

        let t = Tenor::parse("2F").unwrap();
        assert_eq!(t.n(), 2);
        assert_eq!(t.unit(), TenorUnit::Future);
    }

    #[test]
    fn parses_negative_tenors() {
        let t = Tenor::parse("-6M").unwrap();
        assert_eq!(t.n(), -6);
    }

    #[test]
    fn rejects_unknown_units() {
        assert!(Tenor::parse("3X").is_err());
    }

    #[test]
    fn negation_flips_sign() {
        let t = Tenor::parse("3M").unwrap();
        let neg = t.negated();
        assert_eq!(neg.n(), -3);
        assert_eq!(neg.as_str(), "-3M");
    }

    #[test]
    fn equality_is_structural_on_source_string() {
        let a = Tenor::parse("3M").unwrap();
        let b = Tenor::parse("3M").unwrap();
        assert_eq!(a, b);
        let c = Tenor::parse("+3M");
        // "+3M" does not parse as an integer prefix the same way; ensure
        // the two do not collapse to equal unless the source text matches.
        if let Ok(c) = c {
            assert_ne!(a, c);
        }
    }
}
