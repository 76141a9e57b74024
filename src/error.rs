use rust_decimal::Decimal;
use thiserror::Error;

use crate::exchange::ExchangeError;

/// Failures of a single trade operation.
#[derive(Debug, Error)]
pub enum TradeError {
    /// No usable balance to trade from.
    #[error("No sufficient balance for {asset} (free: {free})")]
    InsufficientBalance { asset: String, free: Decimal },

    /// The computed trade size collapsed to zero.
    #[error("Computed trade amount for {asset} is zero")]
    InvalidAmount { asset: String },

    /// Exchange or transport failure; check `is_retryable` on the source
    /// before deciding on a retry.
    #[error(transparent)]
    Exchange(#[from] ExchangeError),
}
