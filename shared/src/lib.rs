//! Shared types for the Whelk storefront
//!
//! Plain records exchanged between the pricing engine and the host
//! service: catalog entities, order line requests, persisted order
//! snapshots, and the unified error system.

pub mod error;
pub mod models;
pub mod order;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};
