//! Bundle Pricer
//!
//! Pure arithmetic for "N units for price P" bundle rules. The same
//! floor/remainder shape prices a single line under its product sale and,
//! with pre-summed quantities, a sale group's pooled total.

use rust_decimal::Decimal;

/// Price a quantity of one product under one bundle rule.
///
/// `bundles = quantity / amount` (integer division), the remainder is
/// charged at the regular unit price:
///
/// `total = bundles × bundle_price + remainder × unit_price`
///
/// A bundle amount ≤ 0 makes the rule invalid and the quantity is charged
/// entirely at the unit price. A bundle price of 0 is legal (free bundle).
/// Negative quantities are clamped to 0; the request validator rejects
/// them before a line is ever priced.
pub fn bundle_total(
    quantity: i64,
    bundle_amount: i64,
    bundle_price: Decimal,
    unit_price: Decimal,
) -> Decimal {
    let quantity = quantity.max(0);

    if bundle_amount <= 0 {
        return Decimal::from(quantity) * unit_price;
    }

    let bundles = quantity / bundle_amount;
    let remainder = quantity % bundle_amount;

    Decimal::from(bundles) * bundle_price + Decimal::from(remainder) * unit_price
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::{to_decimal, to_f64};

    #[test]
    fn test_bundles_plus_remainder() {
        // 7 units under "3 for 25", unit price 10:
        // 2 bundles × 25 + 1 remainder × 10 = 60
        let total = bundle_total(7, 3, to_decimal(25.0), to_decimal(10.0));
        assert_eq!(to_f64(total), 60.0);
    }

    #[test]
    fn test_exact_bundles() {
        // 6 units under "3 for 25" = 2 bundles, no remainder
        let total = bundle_total(6, 3, to_decimal(25.0), to_decimal(10.0));
        assert_eq!(to_f64(total), 50.0);
    }

    #[test]
    fn test_below_bundle_size() {
        // 2 units under "3 for 25" = plain 2 × 10
        let total = bundle_total(2, 3, to_decimal(25.0), to_decimal(10.0));
        assert_eq!(to_f64(total), 20.0);
    }

    #[test]
    fn test_invalid_amount_falls_back_to_unit_price() {
        for amount in [0, -1, -100] {
            let total = bundle_total(5, amount, to_decimal(25.0), to_decimal(10.0));
            assert_eq!(to_f64(total), 50.0);
        }
    }

    #[test]
    fn test_free_bundle_price() {
        // "2 for 0" is legal: 5 units = 2 free bundles + 1 × 10
        let total = bundle_total(5, 2, Decimal::ZERO, to_decimal(10.0));
        assert_eq!(to_f64(total), 10.0);
    }

    #[test]
    fn test_zero_quantity() {
        let total = bundle_total(0, 3, to_decimal(25.0), to_decimal(10.0));
        assert_eq!(to_f64(total), 0.0);
    }

    #[test]
    fn test_negative_quantity_clamped() {
        let total = bundle_total(-4, 3, to_decimal(25.0), to_decimal(10.0));
        assert_eq!(to_f64(total), 0.0);
    }

    #[test]
    fn test_fractional_unit_price() {
        // 4 units under "3 for 10.50", unit price 4.99:
        // 1 bundle × 10.50 + 1 × 4.99 = 15.49
        let total = bundle_total(4, 3, to_decimal(10.50), to_decimal(4.99));
        assert_eq!(to_f64(total), 15.49);
    }
}
