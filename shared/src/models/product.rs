//! Product Model

use serde::{Deserialize, Serialize};

/// Product entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: i64,
    pub name: String,
    /// Regular unit price (non-negative)
    pub price: f64,
    pub is_active: bool,
}

/// Product-level bundle sale ("N units for price P")
///
/// At most one per product. Applied both on the storefront display path
/// and at order settlement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductSale {
    /// Product reference
    pub product_id: i64,
    /// Bundle size (strictly positive)
    pub amount: i64,
    /// Price for one full bundle (non-negative; 0 = free bundle)
    pub price: f64,
}
