//! Pricing kernels for the closed set of linear rates instruments the
//! curve builder calibrates against, plus the [`PriceLadder`] container
//! their quoted inputs and repriced outputs share.

#![warn(missing_docs)]

mod error;
mod instrument;
mod kernels;
mod price_ladder;

pub use error::InstrumentError;
pub use instrument::Instrument;
pub use kernels::{BasisSwap, CrossCurrencySwap, ForecastRateInstrument, Future, MtmCrossCurrencyBasisSwap, Swap, TermDeposit};
pub use price_ladder::PriceLadder;
