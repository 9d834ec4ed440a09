//! Applied sale records - track which sales were applied and their worth

use serde::{Deserialize, Serialize};

/// Product-level bundle sale applied to a line item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppliedBundleSale {
    /// Bundle size
    pub amount: i64,
    /// Price for one full bundle
    pub price: f64,
    /// Saving versus the plain quantity × unit price
    pub calculated_amount: f64,
}

/// Group bundle sale applied to an order (one record per earning group)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppliedGroupSale {
    pub group_id: i64,
    pub name: String,
    pub bundle_amount: i64,
    pub bundle_price: f64,
    /// Group reference unit price the discount was computed against
    pub unit_price: f64,
    /// Total discount this group earned on the order
    pub calculated_amount: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_applied_group_sale_serialization() {
        let applied = AppliedGroupSale {
            group_id: 3,
            name: "summer drinks".to_string(),
            bundle_amount: 3,
            bundle_price: 20.0,
            unit_price: 10.0,
            calculated_amount: 20.0,
        };

        let json = serde_json::to_string(&applied).unwrap();
        let back: AppliedGroupSale = serde_json::from_str(&json).unwrap();

        assert_eq!(applied, back);
    }
}
