//! Category Sale Model

use serde::{Deserialize, Serialize};

/// Category-level bundle sale
///
/// Applies to every product the category contains. A product may belong
/// to multiple categories, so several category sales can compete for one
/// product; the display resolver picks the winner. Category sales are
/// display-only: settlement never consults them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategorySale {
    pub category_id: i64,
    /// Category name snapshot (for "see more items in this sale")
    pub name: String,
    /// Bundle size (strictly positive)
    pub amount: i64,
    /// Price for one full bundle (non-negative)
    pub price: f64,
}
