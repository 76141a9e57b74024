// =================================================================
// exchange/errors.rs - Exchange Error Types
// =================================================================

use thiserror::Error;

/// Errors surfaced by the exchange gateway.
#[derive(Debug, Error)]
pub enum ExchangeError {
    /// Exchange rejected the request and returned an error body.
    #[error("API error (code {code}): {msg}")]
    Api { code: i64, msg: String },

    /// Transport-level failure (connect, TLS, timeout).
    #[error("Network error: {0}")]
    Network(String),

    /// Response body could not be decoded.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Symbol failed validation before any request was sent.
    #[error("Invalid symbol: {0}")]
    InvalidSymbol(String),

    /// Exchange reported no trading rules usable for sizing an order.
    #[error("Missing trading rules for {symbol}: {detail}")]
    MissingRules { symbol: String, detail: String },

    /// HTTP response with an unexpected status and no decodable error body.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },
}

impl ExchangeError {
    /// Whether the caller may reasonably retry the same request.
    ///
    /// Transport failures, server-side errors and rate limiting are
    /// transient; API rejections (bad symbol, filter violation,
    /// insufficient funds on the exchange side) are terminal.
    pub fn is_retryable(&self) -> bool {
        match self {
            ExchangeError::Network(_) => true,
            ExchangeError::Http { status, .. } => *status == 429 || *status >= 500,
            // -1003 TOO_MANY_REQUESTS, -1001 DISCONNECTED, -1021 timestamp
            // outside recvWindow: all worth a retry with a fresh request.
            ExchangeError::Api { code, .. } => matches!(code, -1003 | -1001 | -1021),
            _ => false,
        }
    }
}

impl From<reqwest::Error> for ExchangeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ExchangeError::Parse(err.to_string())
        } else {
            ExchangeError::Network(err.to_string())
        }
    }
}
