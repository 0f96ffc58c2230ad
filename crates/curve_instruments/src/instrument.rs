//! The closed instrument enum every curve-building residual dispatches
//! over.

use curve_core::types::Date;
use curve_model::CurveMap;

use crate::error::InstrumentError;
use crate::kernels::{BasisSwap, CrossCurrencySwap, ForecastRateInstrument, Future, MtmCrossCurrencyBasisSwap, Swap, TermDeposit};

/// A priceable linear rates instrument. Closed over the eight kernels the
/// curve builder knows how to calibrate against; there is no trait object
/// indirection, so dispatch is a single match.
#[derive(Debug, Clone)]
pub enum Instrument {
    /// Single-curve deposit.
    Deposit(ForecastRateInstrument),
    /// Single-curve zero rate, priced identically to `Deposit`.
    ZeroRate(ForecastRateInstrument),
    /// Exchange-traded future with a convexity adjustment.
    Future(Future),
    /// Fixed-vs-float single-currency swap.
    Swap(Swap),
    /// Float-vs-float single-currency basis swap.
    BasisSwap(BasisSwap),
    /// Term deposit with a floating reference leg.
    TermDeposit(TermDeposit),
    /// Fixed-vs-float cross-currency swap with notional exchange.
    CrossCurrencySwap(CrossCurrencySwap),
    /// Float-vs-float cross-currency basis swap with MTM notional resets.
    MtmCrossCurrencyBasisSwap(MtmCrossCurrencyBasisSwap),
}

impl Instrument {
    /// The instrument's own name, as given at construction.
    pub fn name(&self) -> &str {
        match self {
            Instrument::Deposit(i) | Instrument::ZeroRate(i) => i.name(),
            Instrument::Future(i) => i.name(),
            Instrument::Swap(i) => i.name(),
            Instrument::BasisSwap(i) => i.name(),
            Instrument::TermDeposit(i) => i.name(),
            Instrument::CrossCurrencySwap(i) => i.name(),
            Instrument::MtmCrossCurrencyBasisSwap(i) => i.name(),
        }
    }

    /// The maturity date used to pillar this instrument onto its curve(s).
    pub fn get_pillar_date(&self) -> Date {
        match self {
            Instrument::Deposit(i) | Instrument::ZeroRate(i) => i.get_pillar_date(),
            Instrument::Future(i) => i.get_pillar_date(),
            Instrument::Swap(i) => i.get_pillar_date(),
            Instrument::BasisSwap(i) => i.get_pillar_date(),
            Instrument::TermDeposit(i) => i.get_pillar_date(),
            Instrument::CrossCurrencySwap(i) => i.get_pillar_date(),
            Instrument::MtmCrossCurrencyBasisSwap(i) => i.get_pillar_date(),
        }
    }

    /// The par rate implied by `curves` for this instrument's structure.
    pub fn calc_par_rate(&self, curves: &CurveMap<f64>) -> Result<f64, InstrumentError> {
        match self {
            Instrument::Deposit(i) | Instrument::ZeroRate(i) => i.calc_par_rate(curves),
            Instrument::Future(i) => i.calc_par_rate(curves),
            Instrument::Swap(i) => i.calc_par_rate(curves),
            Instrument::BasisSwap(i) => i.calc_par_rate(curves),
            Instrument::TermDeposit(i) => i.calc_par_rate(curves),
            Instrument::CrossCurrencySwap(i) => i.calc_par_rate(curves),
            Instrument::MtmCrossCurrencyBasisSwap(i) => i.calc_par_rate(curves),
        }
    }

    /// Convert a par rate to this instrument's quoted units.
    pub fn rate_to_quote(&self, rate: f64) -> f64 {
        match self {
            Instrument::Deposit(i) | Instrument::ZeroRate(i) => i.rate_to_quote(rate),
            Instrument::Future(i) => i.rate_to_quote(rate),
            Instrument::Swap(i) => i.rate_to_quote(rate),
            Instrument::BasisSwap(i) => i.rate_to_quote(rate),
            Instrument::TermDeposit(i) => i.rate_to_quote(rate),
            Instrument::CrossCurrencySwap(i) => i.rate_to_quote(rate),
            Instrument::MtmCrossCurrencyBasisSwap(i) => i.rate_to_quote(rate),
        }
    }

    /// Convert a quoted value back to a par rate.
    pub fn quote_to_rate(&self, quote: f64) -> f64 {
        match self {
            Instrument::Deposit(i) | Instrument::ZeroRate(i) => i.quote_to_rate(quote),
            Instrument::Future(i) => i.quote_to_rate(quote),
            Instrument::Swap(i) => i.quote_to_rate(quote),
            Instrument::BasisSwap(i) => i.quote_to_rate(quote),
            Instrument::TermDeposit(i) => i.quote_to_rate(quote),
            Instrument::CrossCurrencySwap(i) => i.quote_to_rate(quote),
            Instrument::MtmCrossCurrencyBasisSwap(i) => i.quote_to_rate(quote),
        }
    }

    /// `dQuote/dRate`, used to translate a rate bump into a quote bump for
    /// risk. `100.0` for every instrument except `Future`, which quotes
    /// inversely (`-100.0`).
    pub fn drdp(&self) -> f64 {
        match self {
            Instrument::Deposit(i) | Instrument::ZeroRate(i) => i.drdp(),
            Instrument::Future(i) => i.drdp(),
            Instrument::Swap(i) => i.drdp(),
            Instrument::BasisSwap(i) => i.drdp(),
            Instrument::TermDeposit(i) => i.drdp(),
            Instrument::CrossCurrencySwap(i) => i.drdp(),
            Instrument::MtmCrossCurrencyBasisSwap(i) => i.drdp(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernels::ForecastRateInstrument;
    use curve_core::types::Dcc;
    use curve_core::types::Tenor;
    use curve_model::{Curve, InterpolationMode};

    #[test]
    fn dispatch_matches_inner_kernel_for_deposit_and_zero_rate() {
        let inner = ForecastRateInstrument::new(
            "USD.3M.DEP",
            "USD.OIS",
            Date::from_excel(42001).unwrap(),
            Date::from_excel(42091).unwrap(),
            &Tenor::parse("3M").unwrap(),
            Dcc::Act360,
        )
        .unwrap();
        let deposit = Instrument::Deposit(inner.clone());
        let zero = Instrument::ZeroRate(inner);

        let mut map = CurveMap::new();
        map.add_curve(Curve::new("USD.OIS", 42000.0, vec![42001.0, 42091.0], vec![0.9998, 0.995], InterpolationMode::LinearLogDf).unwrap());

        assert_eq!(deposit.calc_par_rate(&map).unwrap(), zero.calc_par_rate(&map).unwrap());
        assert_eq!(deposit.drdp(), 100.0);
        assert_eq!(deposit.name(), "USD.3M.DEP");
    }

    #[test]
    fn future_quote_convention_is_inverted() {
        let future = Instrument::Future(crate::kernels::Future::new(
            "EDU5",
            "USD.LIBOR.3M",
            Date::from_excel(42000).unwrap(),
            Date::from_excel(42091).unwrap(),
            Date::from_excel(42182).unwrap(),
            Dcc::Act360,
        ));
        assert_eq!(future.drdp(), -100.0);
        assert_eq!(future.rate_to_quote(0.02), 98.0);
        assert_eq!(future.quote_to_rate(98.0), 0.02);
    }
}
