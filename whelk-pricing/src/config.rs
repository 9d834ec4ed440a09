//! Checkout configuration
//!
//! # Environment variables
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | DELIVERY_THRESHOLD | 90 | Subtotal at or above this ships free |
//! | DELIVERY_FEE | 10 | Fee charged below the threshold |

/// Default free-delivery threshold (store currency units)
const DEFAULT_DELIVERY_THRESHOLD: f64 = 90.0;
/// Default delivery fee (store currency units)
const DEFAULT_DELIVERY_FEE: f64 = 10.0;

/// Checkout configuration consumed by the settlement path
#[derive(Debug, Clone)]
pub struct CheckoutConfig {
    /// Orders with 0 < subtotal < threshold pay the delivery fee
    pub delivery_threshold: f64,
    /// Flat delivery fee
    pub delivery_fee: f64,
}

impl CheckoutConfig {
    /// Load configuration from environment variables, falling back to the
    /// defaults for anything unset or unparsable
    pub fn from_env() -> Self {
        Self {
            delivery_threshold: std::env::var("DELIVERY_THRESHOLD")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_DELIVERY_THRESHOLD),
            delivery_fee: std::env::var("DELIVERY_FEE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_DELIVERY_FEE),
        }
    }

    /// Build a config with explicit values
    ///
    /// Commonly used in tests
    pub fn with_values(delivery_threshold: f64, delivery_fee: f64) -> Self {
        Self {
            delivery_threshold,
            delivery_fee,
        }
    }
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            delivery_threshold: DEFAULT_DELIVERY_THRESHOLD,
            delivery_fee: DEFAULT_DELIVERY_FEE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CheckoutConfig::default();
        assert_eq!(config.delivery_threshold, 90.0);
        assert_eq!(config.delivery_fee, 10.0);
    }

    #[test]
    fn test_with_values() {
        let config = CheckoutConfig::with_values(50.0, 4.5);
        assert_eq!(config.delivery_threshold, 50.0);
        assert_eq!(config.delivery_fee, 4.5);
    }
}
