//! Day-count fraction calculation.

use curve_core::types::{Date, Dcc};

/// `(date1 - date0) / dcc.denominator()`.
pub fn calculate_dcf(date0: Date, date1: Date, dcc: Dcc) -> f64 {
    (date1 - date0) as f64 / dcc.denominator()
}

/// Elementwise [`calculate_dcf`] over consecutive pairs in `dates`.
pub fn calculate_dcfs(dates: &[Date], dcc: Dcc) -> Vec<f64> {
    dates.windows(2).map(|w| calculate_dcf(w[0], w[1], dcc)).collect()
}
