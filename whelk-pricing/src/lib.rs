//! Whelk pricing engine
//!
//! Pure, synchronous pricing and discount resolution for the Whelk
//! storefront. The engine never performs I/O: the host service reads a
//! point-in-time [`catalog::CatalogSnapshot`], hands it in together with
//! the order line requests, and persists the returned totals as a frozen
//! [`shared::order::OrderSnapshot`]. Identical inputs always produce
//! identical outputs.
//!
//! Two independent paths share the same bundle arithmetic:
//!
//! - **Display path** ([`resolver`]): pick the single best sale to show a
//!   shopper, among the product's own sale, category sales covering it,
//!   and its sale group.
//! - **Settlement path** ([`settlement`]): price every line under its
//!   product-level sale, pool quantities per sale group and distribute the
//!   earned group discount back ([`groups`]), then aggregate subtotal,
//!   delivery fee and grand total.
//!
//! The two paths are not the same computation: settlement deliberately
//! ignores category sales.

pub mod bundle;
pub mod catalog;
pub mod config;
pub mod groups;
pub mod money;
pub mod resolver;
pub mod settlement;

// Re-exports for convenience
pub use catalog::CatalogSnapshot;
pub use config::CheckoutConfig;
pub use resolver::{OfferSource, SaleOffer};
pub use settlement::{OrderPricingResult, SettlementError};
