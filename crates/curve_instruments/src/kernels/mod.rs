//! One pricing kernel per instrument variant.

pub(crate) mod common;

mod basis_swap;
mod cross_currency_swap;
mod deposit;
mod future;
mod mtm_cross_currency_basis_swap;
mod swap;
mod term_deposit;

pub use basis_swap::BasisSwap;
pub use cross_currency_swap::CrossCurrencySwap;
pub use deposit::ForecastRateInstrument;
pub use future::Future;
pub use mtm_cross_currency_basis_swap::MtmCrossCurrencyBasisSwap;
pub use swap::Swap;
pub use term_deposit::TermDeposit;
