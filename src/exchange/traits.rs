// =================================================================
// exchange/traits.rs - Gateway Trait
// =================================================================

use async_trait::async_trait;
use rust_decimal::Decimal;

use super::errors::ExchangeError;
use super::types::{OrderAck, SymbolRules};

/// Abstraction over the exchange REST surface.
///
/// `BinanceGateway` implements this for live trading; tests implement it
/// with canned responses. The executor only ever talks to this trait.
#[async_trait]
pub trait ExchangeGateway: Send + Sync {
    /// Free (unlocked) balance for an asset. An asset the account has no
    /// entry for is reported as zero, never as an error.
    async fn free_balance(&self, asset: &str) -> Result<Decimal, ExchangeError>;

    /// Trading rules (lot-size step, quote precision) for a symbol.
    async fn symbol_rules(&self, symbol: &str) -> Result<SymbolRules, ExchangeError>;

    /// Submit a market sell sized in base-asset quantity.
    async fn market_sell(
        &self,
        symbol: &str,
        quantity: Decimal,
    ) -> Result<OrderAck, ExchangeError>;

    /// Submit a market buy sized in quote-currency amount.
    async fn market_buy_quote(
        &self,
        symbol: &str,
        quote_amount: Decimal,
    ) -> Result<OrderAck, ExchangeError>;
}
