// =================================================================
// exchange/binance.rs - Binance Spot REST Implementation
// =================================================================

use async_trait::async_trait;
use chrono::Utc;
use hmac::{Hmac, Mac};
use rust_decimal::Decimal;
use sha2::Sha256;
use std::time::Duration;
use tracing::{debug, info};

use super::errors::ExchangeError;
use super::traits::ExchangeGateway;
use super::types::{AccountInfo, ApiErrorBody, ExchangeInfo, OrderAck, OrderSide, SymbolRules};

pub const BINANCE_API_URL: &str = "https://api.binance.com";

/// How long a signed request stays acceptable on the exchange side,
/// bounding clock skew between signing and server-side validation.
pub const RECV_WINDOW_MS: u64 = 50_000;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

type HmacSha256 = Hmac<Sha256>;

/// Live Binance spot gateway. Credentials are injected at construction;
/// nothing here reads process environment.
pub struct BinanceGateway {
    api_url: String,
    api_key: String,
    api_secret: String,
    client: reqwest::Client,
}

impl BinanceGateway {
    pub fn new(api_key: String, api_secret: String) -> Self {
        Self::with_api_url(api_key, api_secret, BINANCE_API_URL.to_string())
    }

    /// Point the gateway at another base URL (e.g. the spot testnet).
    pub fn with_api_url(api_key: String, api_secret: String, api_url: String) -> Self {
        Self {
            api_url,
            api_key,
            api_secret,
            client: reqwest::Client::new(),
        }
    }

    /// HMAC-SHA256 over the canonical query string, hex-encoded.
    fn sign(&self, query: &str) -> Result<String, ExchangeError> {
        let mut mac = HmacSha256::new_from_slice(self.api_secret.as_bytes())
            .map_err(|e| ExchangeError::Parse(format!("Invalid HMAC key: {}", e)))?;
        mac.update(query.as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }

    /// Append timestamp, recvWindow and signature to a query string.
    fn signed_query(&self, mut query: String) -> Result<String, ExchangeError> {
        if !query.is_empty() {
            query.push('&');
        }
        query.push_str(&format!(
            "timestamp={}&recvWindow={}",
            Utc::now().timestamp_millis(),
            RECV_WINDOW_MS
        ));
        let signature = self.sign(&query)?;
        Ok(format!("{}&signature={}", query, signature))
    }

    async fn get_signed<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: String,
    ) -> Result<T, ExchangeError> {
        let url = format!("{}{}?{}", self.api_url, path, self.signed_query(query)?);
        debug!("GET {}", path);
        let response = self
            .client
            .get(&url)
            .header("X-MBX-APIKEY", &self.api_key)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn post_signed<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: String,
    ) -> Result<T, ExchangeError> {
        let url = format!("{}{}?{}", self.api_url, path, self.signed_query(query)?);
        debug!("POST {}", path);
        let response = self
            .client
            .post(&url)
            .header("X-MBX-APIKEY", &self.api_key)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn get_public<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &str,
    ) -> Result<T, ExchangeError> {
        let url = format!("{}{}?{}", self.api_url, path, query);
        debug!("GET {}", path);
        let response = self
            .client
            .get(&url)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn decode<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ExchangeError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            // Binance error bodies carry {code, msg}; keep the raw body
            // when they don't.
            if let Ok(err) = serde_json::from_str::<ApiErrorBody>(&body) {
                return Err(ExchangeError::Api {
                    code: err.code,
                    msg: err.msg,
                });
            }
            return Err(ExchangeError::Http {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body)
            .map_err(|e| ExchangeError::Parse(format!("{}: {}", e, body)))
    }

    fn order_query(symbol: &str, side: OrderSide) -> String {
        format!("symbol={}&side={}&type=MARKET", symbol, side.as_str())
    }
}

#[async_trait]
impl ExchangeGateway for BinanceGateway {
    async fn free_balance(&self, asset: &str) -> Result<Decimal, ExchangeError> {
        let account: AccountInfo = self
            .get_signed("/api/v3/account", String::new())
            .await?;

        let free = account
            .balances
            .iter()
            .find(|b| b.asset == asset)
            .map(|b| b.free)
            .unwrap_or(Decimal::ZERO);

        Ok(free)
    }

    async fn symbol_rules(&self, symbol: &str) -> Result<SymbolRules, ExchangeError> {
        let info: ExchangeInfo = self
            .get_public("/api/v3/exchangeInfo", &format!("symbol={}", symbol))
            .await?;

        let symbol_info = info
            .symbols
            .into_iter()
            .find(|s| s.symbol == symbol)
            .ok_or_else(|| ExchangeError::MissingRules {
                symbol: symbol.to_string(),
                detail: "symbol not listed".to_string(),
            })?;

        Ok(SymbolRules::from(symbol_info))
    }

    async fn market_sell(
        &self,
        symbol: &str,
        quantity: Decimal,
    ) -> Result<OrderAck, ExchangeError> {
        let query = format!(
            "{}&quantity={}",
            Self::order_query(symbol, OrderSide::Sell),
            quantity
        );
        let ack: OrderAck = self.post_signed("/api/v3/order", query).await?;
        info!(
            symbol, order_id = ack.order_id, status = %ack.status,
            "market sell submitted"
        );
        Ok(ack)
    }

    async fn market_buy_quote(
        &self,
        symbol: &str,
        quote_amount: Decimal,
    ) -> Result<OrderAck, ExchangeError> {
        let query = format!(
            "{}&quoteOrderQty={}",
            Self::order_query(symbol, OrderSide::Buy),
            quote_amount
        );
        let ack: OrderAck = self.post_signed("/api/v3/order", query).await?;
        info!(
            symbol, order_id = ack.order_id, status = %ack.status,
            "market buy submitted"
        );
        Ok(ack)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_matches_binance_documentation() {
        // Worked example from the official API docs: known secret and
        // query string must produce this exact signature.
        let gateway = BinanceGateway::new(
            "vmPUZE6mv9SD5VNHk4HlWFsOr6aKE2zvsw0MuIgwCIPy6utIco14y7Ju91duEh8A".to_string(),
            "NhqPtmdSJYdKjVHjA7PZj4Mge3R5YNiP1e3UZjInClVN65XAbvqqM6A7H5fATj0j".to_string(),
        );
        let query = "symbol=LTCBTC&side=BUY&type=LIMIT&timeInForce=GTC&quantity=1&price=0.1&recvWindow=5000&timestamp=1499827319559";
        assert_eq!(
            gateway.sign(query).unwrap(),
            "c8db56825ae71d6d79447849e617115f4a920fa2acdcab2b053c4b2838bd6b71"
        );
    }

    #[test]
    fn test_order_query_shape() {
        assert_eq!(
            BinanceGateway::order_query("BTCUSDT", OrderSide::Sell),
            "symbol=BTCUSDT&side=SELL&type=MARKET"
        );
    }

    #[test]
    fn test_signed_query_carries_recv_window() {
        let gateway = BinanceGateway::new("key".to_string(), "secret".to_string());
        let query = gateway.signed_query("symbol=BTCUSDT".to_string()).unwrap();
        assert!(query.starts_with("symbol=BTCUSDT&timestamp="));
        assert!(query.contains(&format!("recvWindow={}", RECV_WINDOW_MS)));
        assert!(query.contains("&signature="));
    }
}
