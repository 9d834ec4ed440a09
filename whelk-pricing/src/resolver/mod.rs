//! Sale Resolver (display path)
//!
//! When listing products, several bundle sales can compete for the same
//! product: its own product sale, any category sale covering it, and the
//! sale group it belongs to. The resolver picks the single best offer to
//! show the shopper. It is a pure comparator: no hidden state, and the
//! same candidates produce the same winner regardless of input ordering.
//!
//! Settlement does not use this module; the order path applies
//! product-level sales and group discounts only.

use crate::money::to_decimal;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

/// Where a sale offer came from
///
/// The meta (category/group id and name) rides in the variant so the UI
/// can explain "see more items in this sale".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OfferSource {
    /// The product's own bundle sale
    Product,
    /// A bundle sale on a category containing the product
    Category { id: i64, name: String },
    /// The sale group the product belongs to
    Group { id: i64, name: String },
}

impl OfferSource {
    /// Tie-break weight: group > category > product (group is the most
    /// specific source, so it wins ties)
    fn specificity(&self) -> u8 {
        match self {
            OfferSource::Product => 0,
            OfferSource::Category { .. } => 1,
            OfferSource::Group { .. } => 2,
        }
    }

    /// Meta id, used only as the final total-order key
    fn meta_id(&self) -> i64 {
        match self {
            OfferSource::Product => 0,
            OfferSource::Category { id, .. } | OfferSource::Group { id, .. } => *id,
        }
    }
}

/// A normalized sale candidate for display-time comparison
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SaleOffer {
    pub source: OfferSource,
    /// Bundle size
    pub amount: i64,
    /// Price for one full bundle
    pub price: f64,
}

impl SaleOffer {
    /// Whether this offer is well-formed enough to rank.
    /// Malformed offers are discarded, never surfaced as errors: absence
    /// of a valid sale is a normal state.
    fn is_valid(&self) -> bool {
        self.amount > 0 && self.price.is_finite() && self.price >= 0.0
    }

    /// Effective per-unit price of the offer (the basis for "which sale
    /// is better"). `None` when the bundle amount cannot divide.
    pub fn unit_price(&self) -> Option<Decimal> {
        if self.amount <= 0 {
            return None;
        }
        Some(to_decimal(self.price) / Decimal::from(self.amount))
    }
}

/// Ranking key: lower unit price wins, then lower absolute bundle price,
/// then the more specific source, then meta id for a total order.
fn rank(offer: &SaleOffer) -> (Decimal, Decimal, Reverse<u8>, i64) {
    (
        offer.unit_price().unwrap_or(Decimal::MAX),
        to_decimal(offer.price),
        Reverse(offer.source.specificity()),
        offer.source.meta_id(),
    )
}

/// Pick the single best sale among the candidates.
///
/// Returns `None` when no valid candidate survives filtering (the plain
/// price applies).
pub fn resolve(offers: Vec<SaleOffer>) -> Option<SaleOffer> {
    offers
        .into_iter()
        .filter(|offer| {
            if offer.is_valid() {
                true
            } else {
                tracing::debug!(?offer, "Discarding malformed sale offer");
                false
            }
        })
        .min_by(|a, b| rank(a).cmp(&rank(b)))
}
