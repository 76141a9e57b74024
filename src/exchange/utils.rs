// =================================================================
// exchange/utils.rs - Quantization & Symbol Helpers
// =================================================================

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use super::errors::ExchangeError;

/// Quote currency every traded pair settles in.
pub const QUOTE_ASSET: &str = "USDT";

/// Derive the decimal precision implied by a LOT_SIZE step.
///
/// `round(-log10(step))`: 1 -> 0, 0.1 -> 1, 0.01 -> 2, 0.001 -> 3.
pub fn precision_from_step(step_size: Decimal) -> Result<u32, ExchangeError> {
    if step_size <= Decimal::ZERO {
        return Err(ExchangeError::Parse(format!(
            "Step size must be positive, got {}",
            step_size
        )));
    }
    let step = step_size.to_f64().ok_or_else(|| {
        ExchangeError::Parse(format!("Step size {} not representable", step_size))
    })?;
    let precision = (-step.log10()).round();
    if precision < 0.0 {
        // Steps above 1 (e.g. 10) still quantize to whole units.
        return Ok(0);
    }
    Ok(precision as u32)
}

/// Round a quantity down to `precision` decimal places.
///
/// Quantities are always truncated toward zero so the order can never
/// exceed the free balance it was sized from.
pub fn round_down(quantity: Decimal, precision: u32) -> Decimal {
    quantity.round_dp_with_strategy(precision, RoundingStrategy::ToZero)
}

/// Round a quote-currency amount to `precision` decimal places.
pub fn round_quote(amount: Decimal, precision: u32) -> Decimal {
    amount.round_dp_with_strategy(precision, RoundingStrategy::ToZero)
}

/// Validate an asset code and build its USDT trading pair, e.g. "BTC" -> "BTCUSDT".
pub fn usdt_pair(asset: &str) -> Result<String, ExchangeError> {
    let asset = validate_asset(asset)?;
    Ok(format!("{}{}", asset, QUOTE_ASSET))
}

/// Validate a bare asset code (e.g. "BTC", "eth").
pub fn validate_asset(asset: &str) -> Result<String, ExchangeError> {
    if asset.is_empty() {
        return Err(ExchangeError::InvalidSymbol(
            "Asset cannot be empty".to_string(),
        ));
    }

    let asset = asset.to_uppercase();

    if !asset.chars().all(char::is_alphanumeric) {
        return Err(ExchangeError::InvalidSymbol(format!(
            "Asset '{}' contains invalid characters",
            asset
        )));
    }

    if asset.len() < 2 || asset.len() > 10 {
        return Err(ExchangeError::InvalidSymbol(format!(
            "Asset '{}' has invalid length",
            asset
        )));
    }

    Ok(asset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_precision_from_step() {
        assert_eq!(precision_from_step(dec!(1)).unwrap(), 0);
        assert_eq!(precision_from_step(dec!(0.1)).unwrap(), 1);
        assert_eq!(precision_from_step(dec!(0.01)).unwrap(), 2);
        assert_eq!(precision_from_step(dec!(0.001)).unwrap(), 3);
        assert_eq!(precision_from_step(dec!(0.0001)).unwrap(), 4);
        assert_eq!(precision_from_step(dec!(0.00000001)).unwrap(), 8);
    }

    #[test]
    fn test_precision_from_step_above_one() {
        assert_eq!(precision_from_step(dec!(10)).unwrap(), 0);
    }

    #[test]
    fn test_precision_rejects_zero_step() {
        assert!(precision_from_step(Decimal::ZERO).is_err());
        assert!(precision_from_step(dec!(-0.1)).is_err());
    }

    #[test]
    fn test_round_down_truncates() {
        assert_eq!(round_down(dec!(1.0), 3), dec!(1.000));
        assert_eq!(round_down(dec!(0.123456), 4), dec!(0.1234));
        // Never rounds up past the balance.
        assert_eq!(round_down(dec!(0.99999), 3), dec!(0.999));
    }

    #[test]
    fn test_asset_validation() {
        assert_eq!(validate_asset("BTC").unwrap(), "BTC");
        assert_eq!(validate_asset("eth").unwrap(), "ETH");
        assert!(validate_asset("").is_err());
        assert!(validate_asset("BTC-USDT").is_err());
        assert!(validate_asset("B").is_err());
    }

    #[test]
    fn test_usdt_pair() {
        assert_eq!(usdt_pair("BTC").unwrap(), "BTCUSDT");
        assert_eq!(usdt_pair("sol").unwrap(), "SOLUSDT");
    }
}
