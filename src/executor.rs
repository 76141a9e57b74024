// =================================================================
// executor.rs - Order Sizing & Outcome Classification
// =================================================================

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{error, info};

use crate::error::TradeError;
use crate::exchange::{
    utils::{self, QUOTE_ASSET},
    ExchangeGateway, OrderAck, OrderSide, OrderStatus,
};

/// Fraction of the rounded balance actually sold, tolerating the gap
/// between reported balance and what fees leave spendable.
const SELL_HAIRCUT: Decimal = dec!(0.95);

/// Fraction of the USDT balance spent per buy.
const BUY_FRACTION: Decimal = dec!(0.20);

/// Exchange-imposed minimum order value in USDT.
const MIN_QUOTE_AMOUNT: Decimal = dec!(10);

/// Quote precision assumed when the exchange reports none.
const DEFAULT_QUOTE_PRECISION: u32 = 6;

/// Final outcome of one trade operation, returned to the caller so the
/// result is always discoverable rather than inferred from silence.
#[derive(Debug, Clone)]
pub struct OrderReport {
    pub symbol: String,
    pub side: OrderSide,
    /// Quantity (sell) or quote amount (buy) submitted.
    pub requested: Decimal,
    pub ack: OrderAck,
}

impl OrderReport {
    pub fn status(&self) -> OrderStatus {
        self.ack.status()
    }

    pub fn is_filled(&self) -> bool {
        self.status().is_filled()
    }
}

/// Translates a buy/sell intent for one asset into one market order.
///
/// Stateless between calls; each operation runs a fresh fetch/size/submit
/// sequence against the injected gateway.
pub struct OrderExecutor<G> {
    gateway: G,
}

impl<G: ExchangeGateway> OrderExecutor<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    /// The injected gateway, mainly so tests can inspect a mock.
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Sell the entire free balance of `asset` at market.
    ///
    /// The balance is rounded down to the lot-size precision of the
    /// `{asset}USDT` pair, then reduced by the 5% haircut.
    pub async fn sell(&self, asset: &str) -> Result<OrderReport, TradeError> {
        let asset = utils::validate_asset(asset)?;
        let symbol = utils::usdt_pair(&asset)?;

        let balance = self.account_balance(&asset).await?;
        if balance <= Decimal::ZERO {
            return Err(TradeError::InsufficientBalance {
                asset,
                free: balance,
            });
        }

        let rules = self.gateway.symbol_rules(&symbol).await?;
        let step_size = rules.step_size.ok_or_else(|| {
            crate::exchange::ExchangeError::MissingRules {
                symbol: symbol.clone(),
                detail: "no LOT_SIZE filter".to_string(),
            }
        })?;
        let precision = utils::precision_from_step(step_size)?;

        // Re-quantize after the haircut: the product rarely lands on the
        // step grid and the exchange rejects off-grid quantities outright.
        let quantity =
            utils::round_down(utils::round_down(balance, precision) * SELL_HAIRCUT, precision);

        info!(%asset, %balance, %quantity, "about to sell");
        let ack = self.gateway.market_sell(&symbol, quantity).await?;

        let report = OrderReport {
            symbol,
            side: OrderSide::Sell,
            requested: quantity,
            ack,
        };
        self.log_outcome(&asset, balance, &report);
        Ok(report)
    }

    /// Buy `asset` at market, spending 20% of the free USDT balance
    /// (clamped up to the 10-USDT minimum order value).
    pub async fn buy(&self, asset: &str) -> Result<OrderReport, TradeError> {
        let asset = utils::validate_asset(asset)?;
        let symbol = utils::usdt_pair(&asset)?;

        let balance = self.account_balance(QUOTE_ASSET).await?;
        if balance <= Decimal::ZERO {
            return Err(TradeError::InsufficientBalance {
                asset,
                free: balance,
            });
        }

        let mut amount = balance * BUY_FRACTION;
        if amount.is_zero() {
            return Err(TradeError::InvalidAmount { asset });
        }
        if amount < MIN_QUOTE_AMOUNT {
            amount = MIN_QUOTE_AMOUNT;
        }

        let rules = self.gateway.symbol_rules(&symbol).await?;
        let precision = match rules.quote_precision {
            Some(p) if p > 0 => p,
            _ => DEFAULT_QUOTE_PRECISION,
        };
        let amount = utils::round_quote(amount, precision);

        info!(%asset, usdt_balance = %balance, %amount, "about to buy");
        let ack = self.gateway.market_buy_quote(&symbol, amount).await?;

        let report = OrderReport {
            symbol,
            side: OrderSide::Buy,
            requested: amount,
            ack,
        };
        self.log_outcome(&asset, balance, &report);
        Ok(report)
    }

    /// Free balance for `asset`; an asset the account holds nothing of
    /// reports zero.
    pub async fn account_balance(&self, asset: &str) -> Result<Decimal, TradeError> {
        let free = self.gateway.free_balance(asset).await?;
        info!(%asset, %free, "account balance");
        Ok(free)
    }

    fn log_outcome(&self, asset: &str, balance: Decimal, report: &OrderReport) {
        match report.status() {
            OrderStatus::Filled => {
                info!(
                    %asset,
                    side = report.side.as_str(),
                    order_id = report.ack.order_id,
                    qty = %report.ack.orig_qty,
                    exec_qty = %report.ack.executed_qty,
                    "order filled"
                );
            }
            OrderStatus::Other(status) => {
                error!(
                    %asset,
                    side = report.side.as_str(),
                    %balance,
                    %status,
                    "order not filled"
                );
            }
        }
    }
}
