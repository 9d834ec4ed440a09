//! Money calculation utilities using rust_decimal for precision
//!
//! All calculations are done using `Decimal` internally, then converted to
//! `f64` for storage/serialization. Values entering from the outside pass
//! a finite-number check before any comparison or arithmetic: a NaN must
//! never reach a persisted total.

use crate::settlement::SettlementError;
use rust_decimal::prelude::*;
use shared::order::OrderLineRequest;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Tolerance for monetary comparisons (0.01)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Maximum allowed unit price (€1,000,000)
const MAX_PRICE: f64 = 1_000_000.0;
/// Maximum allowed quantity per line
const MAX_QUANTITY: i64 = 9999;

/// Validate that a f64 value is finite (not NaN, not Infinity)
#[inline]
fn require_finite(value: f64, field_name: &str) -> Result<(), SettlementError> {
    if !value.is_finite() {
        return Err(SettlementError::InvalidLine(format!(
            "{} must be a finite number, got {}",
            field_name, value
        )));
    }
    Ok(())
}

/// Validate an OrderLineRequest before settlement
pub fn validate_line_request(line: &OrderLineRequest) -> Result<(), SettlementError> {
    if line.quantity <= 0 {
        return Err(SettlementError::InvalidLine(format!(
            "quantity must be positive, got {} for product {}",
            line.quantity, line.product_id
        )));
    }
    if line.quantity > MAX_QUANTITY {
        return Err(SettlementError::InvalidLine(format!(
            "quantity exceeds maximum allowed ({}), got {} for product {}",
            MAX_QUANTITY, line.quantity, line.product_id
        )));
    }
    Ok(())
}

/// Validate a catalog unit price before it enters arithmetic
pub fn validate_unit_price(price: f64, product_id: i64) -> Result<(), SettlementError> {
    require_finite(price, "price")?;
    if price < 0.0 {
        return Err(SettlementError::InvalidLine(format!(
            "price must be non-negative, got {} for product {}",
            price, product_id
        )));
    }
    if price > MAX_PRICE {
        return Err(SettlementError::InvalidLine(format!(
            "price exceeds maximum allowed ({}), got {} for product {}",
            MAX_PRICE, price, product_id
        )));
    }
    Ok(())
}

/// Convert f64 to Decimal for calculation
///
/// Input values should be pre-validated via `require_finite()` at the
/// boundary. If NaN/Infinity somehow reaches here, logs an error and
/// returns ZERO to avoid silent data corruption in financial calculations.
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::error!(value = ?value, "Non-finite f64 in monetary calculation, defaulting to zero");
        Decimal::ZERO
    })
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        // SAFETY: Decimal rounded to 2dp with max input ≤ 1_000_000 (validated at boundary)
        // is always within f64 representable range (~1.8e308)
        .expect("Decimal rounded to 2dp is always representable as f64")
}

/// Compare two monetary values for equality (within 0.01 tolerance)
pub fn money_eq(a: f64, b: f64) -> bool {
    let diff = (to_decimal(a) - to_decimal(b)).abs();
    diff < MONEY_TOLERANCE
}
