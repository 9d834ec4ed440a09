//! Shared types for order settlement

use super::AppliedBundleSale;
use serde::{Deserialize, Serialize};

/// Order line request - what the storefront submits at order creation
///
/// Deliberately carries no price: the authoritative unit price is looked
/// up from the catalog at settlement time, never trusted from the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderLineRequest {
    /// Product ID
    pub product_id: i64,
    /// Requested quantity (strictly positive)
    pub quantity: i64,
    /// Stock flag at request time; out-of-stock lines stay listed but
    /// contribute nothing to totals or group pools
    pub in_stock: bool,
}

/// Line item snapshot - complete per-line record frozen at settlement
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItemSnapshot {
    /// Product ID
    pub product_id: i64,
    /// Product name snapshot (for receipts)
    pub name: String,
    /// Quantity
    pub quantity: i64,
    /// Authoritative unit price at settlement time
    pub unit_price: f64,
    /// Stock flag at settlement time
    pub in_stock: bool,

    // === Applied Sales ===
    /// Product-level bundle sale applied to this line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applied_sale: Option<AppliedBundleSale>,
    /// Sale group this line belongs to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sale_group_id: Option<i64>,
    /// This line's share of its group's discount
    #[serde(default)]
    pub group_discount_share: f64,

    // === Computed Fields ===
    /// Line total before the group discount share is subtracted
    pub line_total: f64,
}
