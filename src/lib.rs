//! Market order execution against a Binance spot account.
//!
//! One operation per call: look up the balance, apply the symbol's
//! quantization rules, submit a market order, classify the outcome.

pub mod config;
pub mod error;
pub mod exchange;
pub mod executor;

pub use config::Settings;
pub use error::TradeError;
pub use exchange::{BinanceGateway, ExchangeError, ExchangeGateway};
pub use executor::{OrderExecutor, OrderReport};
