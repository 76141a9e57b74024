// =================================================================
// exchange/types.rs - Data Structures
// =================================================================

use rust_decimal::Decimal;
use serde::Deserialize;

/// Order direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderSide::Buy => "BUY",
            OrderSide::Sell => "SELL",
        }
    }
}

/// Outcome status of a submitted order, parsed case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderStatus {
    Filled,
    Other(String),
}

impl OrderStatus {
    pub fn parse(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("FILLED") {
            OrderStatus::Filled
        } else {
            OrderStatus::Other(raw.to_string())
        }
    }

    pub fn is_filled(&self) -> bool {
        matches!(self, OrderStatus::Filled)
    }
}

/// One balance entry from the account endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct AssetBalance {
    pub asset: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub free: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub locked: Decimal,
}

/// Account snapshot (`GET /api/v3/account`); only balances are consumed.
#[derive(Debug, Deserialize)]
pub struct AccountInfo {
    pub balances: Vec<AssetBalance>,
}

/// A single symbol filter from the exchangeInfo endpoint.
///
/// Binance returns a heterogeneous filter array; only LOT_SIZE matters
/// here, so everything else falls through to `Other`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "filterType")]
pub enum SymbolFilter {
    #[serde(rename = "LOT_SIZE")]
    LotSize {
        #[serde(rename = "stepSize", with = "rust_decimal::serde::str")]
        step_size: Decimal,
        #[serde(rename = "minQty", with = "rust_decimal::serde::str")]
        min_qty: Decimal,
        #[serde(rename = "maxQty", with = "rust_decimal::serde::str")]
        max_qty: Decimal,
    },
    #[serde(other)]
    Other,
}

/// Per-symbol metadata from `GET /api/v3/exchangeInfo`.
#[derive(Debug, Clone, Deserialize)]
pub struct SymbolInfo {
    pub symbol: String,
    #[serde(rename = "quotePrecision")]
    pub quote_precision: Option<u32>,
    #[serde(default)]
    pub filters: Vec<SymbolFilter>,
}

#[derive(Debug, Deserialize)]
pub struct ExchangeInfo {
    pub symbols: Vec<SymbolInfo>,
}

/// The trading rules the executor needs for sizing one order.
#[derive(Debug, Clone)]
pub struct SymbolRules {
    pub symbol: String,
    /// LOT_SIZE step, when the exchange reports one (sell path).
    pub step_size: Option<Decimal>,
    /// Quote-currency decimal places (buy path).
    pub quote_precision: Option<u32>,
}

impl From<SymbolInfo> for SymbolRules {
    fn from(info: SymbolInfo) -> Self {
        let step_size = info.filters.iter().find_map(|f| match f {
            SymbolFilter::LotSize { step_size, .. } => Some(*step_size),
            SymbolFilter::Other => None,
        });
        Self {
            symbol: info.symbol,
            step_size,
            quote_precision: info.quote_precision,
        }
    }
}

/// Acknowledgement returned by the order endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderAck {
    #[serde(rename = "orderId")]
    pub order_id: u64,

    pub status: String,

    /// Requested quantity as echoed by the exchange.
    #[serde(rename = "origQty", with = "rust_decimal::serde::str")]
    pub orig_qty: Decimal,

    /// Quantity actually executed.
    #[serde(rename = "executedQty", with = "rust_decimal::serde::str")]
    pub executed_qty: Decimal,
}

impl OrderAck {
    pub fn status(&self) -> OrderStatus {
        OrderStatus::parse(&self.status)
    }
}

/// Binance error body, e.g. `{"code":-1013,"msg":"Filter failure: LOT_SIZE"}`.
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub code: i64,
    pub msg: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_status_parse_case_insensitive() {
        assert!(OrderStatus::parse("FILLED").is_filled());
        assert!(OrderStatus::parse("filled").is_filled());
        assert!(OrderStatus::parse("Filled").is_filled());
        assert_eq!(
            OrderStatus::parse("EXPIRED"),
            OrderStatus::Other("EXPIRED".to_string())
        );
    }

    #[test]
    fn test_decode_account_balances() {
        let json = r#"{
            "balances": [
                {"asset": "BTC", "free": "0.50000000", "locked": "0.00000000"},
                {"asset": "USDT", "free": "100.12345678", "locked": "2.00000000"}
            ]
        }"#;
        let account: AccountInfo = serde_json::from_str(json).unwrap();
        assert_eq!(account.balances.len(), 2);
        assert_eq!(account.balances[0].asset, "BTC");
        assert_eq!(account.balances[0].free, dec!(0.50000000));
        assert_eq!(account.balances[1].locked, dec!(2.00000000));
    }

    #[test]
    fn test_decode_exchange_info_lot_size() {
        let json = r#"{
            "symbols": [{
                "symbol": "BTCUSDT",
                "quotePrecision": 8,
                "filters": [
                    {"filterType": "PRICE_FILTER", "minPrice": "0.01"},
                    {"filterType": "LOT_SIZE", "minQty": "0.00001", "maxQty": "9000", "stepSize": "0.00001"},
                    {"filterType": "NOTIONAL", "minNotional": "5"}
                ]
            }]
        }"#;
        let info: ExchangeInfo = serde_json::from_str(json).unwrap();
        let rules = SymbolRules::from(info.symbols.into_iter().next().unwrap());
        assert_eq!(rules.symbol, "BTCUSDT");
        assert_eq!(rules.step_size, Some(dec!(0.00001)));
        assert_eq!(rules.quote_precision, Some(8));
    }

    #[test]
    fn test_decode_order_ack() {
        let json = r#"{
            "symbol": "BTCUSDT",
            "orderId": 28457329,
            "status": "FILLED",
            "origQty": "0.475",
            "executedQty": "0.475"
        }"#;
        let ack: OrderAck = serde_json::from_str(json).unwrap();
        assert_eq!(ack.order_id, 28457329);
        assert!(ack.status().is_filled());
        assert_eq!(ack.orig_qty, dec!(0.475));
        assert_eq!(ack.executed_qty, dec!(0.475));
    }
}
