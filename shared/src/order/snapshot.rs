//! Order snapshot - totals frozen at order creation
//!
//! The snapshot is written once, from a point-in-time catalog read, and is
//! never recomputed from the live catalog afterward: later price edits or
//! sale removals must not alter what an already-created order cost. The
//! `state_checksum` field lets a re-reader detect drift or corruption in a
//! persisted snapshot.

use super::applied_sale::AppliedGroupSale;
use super::types::LineItemSnapshot;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Order snapshot - immutable pricing record for one order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderSnapshot {
    /// Order ID (assigned by the host service)
    pub order_id: String,
    /// Creation timestamp (Unix millis, supplied by the caller)
    pub created_at: i64,
    /// Line items in the order
    pub lines: Vec<LineItemSnapshot>,
    /// Sum of per-line bundle pricing before group discounts
    pub pre_group_total: f64,
    /// Total discount earned by sale groups on this order
    pub group_discount_total: f64,
    /// pre_group_total - group_discount_total
    pub subtotal: f64,
    /// Delivery fee charged (0 above the free-delivery threshold)
    pub delivery_fee: f64,
    /// subtotal + delivery_fee
    pub grand_total: f64,
    /// Requested lines dropped because the product no longer exists
    #[serde(default)]
    pub dropped_line_count: u32,
    /// Group sales that earned a discount on this order
    #[serde(default)]
    pub applied_group_sales: Vec<AppliedGroupSale>,
    /// Checksum over the monetary fields (sha256 hex)
    #[serde(default)]
    pub state_checksum: String,
}

/// Convert a monetary f64 to cents for hashing (avoids float precision
/// issues in the checksum input)
fn cents(value: f64) -> i64 {
    (value * 100.0).round() as i64
}

impl OrderSnapshot {
    /// Compute the state checksum over everything that determines what
    /// this order cost. Returns a sha256 hex string.
    pub fn compute_checksum(&self) -> String {
        let mut hasher = Sha256::new();

        hasher.update(self.order_id.as_bytes());
        hasher.update((self.lines.len() as u64).to_le_bytes());

        for line in &self.lines {
            hasher.update(line.product_id.to_le_bytes());
            hasher.update(line.quantity.to_le_bytes());
            hasher.update(cents(line.unit_price).to_le_bytes());
            hasher.update(cents(line.group_discount_share).to_le_bytes());
            hasher.update(cents(line.line_total).to_le_bytes());
        }

        hasher.update(cents(self.pre_group_total).to_le_bytes());
        hasher.update(cents(self.group_discount_total).to_le_bytes());
        hasher.update(cents(self.subtotal).to_le_bytes());
        hasher.update(cents(self.delivery_fee).to_le_bytes());
        hasher.update(cents(self.grand_total).to_le_bytes());

        format!("{:x}", hasher.finalize())
    }

    /// Update the state_checksum field based on current state
    pub fn update_checksum(&mut self) {
        self.state_checksum = self.compute_checksum();
    }

    /// Verify that the stored checksum matches the computed one.
    /// Returns false if the persisted snapshot has drifted.
    pub fn verify_checksum(&self) -> bool {
        self.state_checksum == self.compute_checksum()
    }

    /// Total saving on this order (product-level bundle savings plus
    /// group discounts), for "you saved X" display
    pub fn total_saved(&self) -> f64 {
        let bundle_savings: f64 = self
            .lines
            .iter()
            .filter_map(|l| l.applied_sale.as_ref())
            .map(|s| s.calculated_amount)
            .sum();
        bundle_savings + self.group_discount_total
    }
}
