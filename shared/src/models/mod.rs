//! Catalog entity models
//!
//! These records are supplied by the host service's catalog-access layer.
//! The engine never mutates them; CMS operations live outside this
//! workspace.

mod category;
mod product;
mod sale_group;

pub use category::CategorySale;
pub use product::{Product, ProductSale};
pub use sale_group::SaleGroup;
