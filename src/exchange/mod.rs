// exchange/mod.rs
pub mod binance;
pub mod errors;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export main interfaces for easy access
pub use binance::{BinanceGateway, BINANCE_API_URL, RECV_WINDOW_MS};
pub use errors::ExchangeError;
pub use traits::ExchangeGateway;
pub use types::*;
