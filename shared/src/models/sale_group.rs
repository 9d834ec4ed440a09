//! Sale Group Model

use serde::{Deserialize, Serialize};

/// Sale group entity (联合促销组)
///
/// A named set of otherwise-unrelated products sold at a shared reference
/// unit price. The bundle rule is evaluated over the *combined* purchased
/// quantity across all member line items of an order, and the earned
/// discount is distributed back proportionally.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SaleGroup {
    pub id: i64,
    pub name: String,
    /// Pooled quantity required per bundle (strictly positive)
    pub bundle_amount: i64,
    /// Price for one full bundle (non-negative)
    pub bundle_price: f64,
    /// Shared reference unit price of the group's members
    pub unit_price: f64,
    /// Member product IDs; a product belongs to at most one group
    pub member_product_ids: Vec<i64>,
}

impl SaleGroup {
    /// Whether a product is a member of this group
    pub fn contains(&self, product_id: i64) -> bool {
        self.member_product_ids.contains(&product_id)
    }
}
