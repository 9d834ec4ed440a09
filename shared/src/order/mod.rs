//! Order types: line requests, line snapshots, and frozen order totals

mod applied_sale;
mod snapshot;
mod types;

pub use applied_sale::{AppliedBundleSale, AppliedGroupSale};
pub use snapshot::OrderSnapshot;
pub use types::{LineItemSnapshot, OrderLineRequest};
