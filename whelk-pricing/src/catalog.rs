//! Catalog snapshot - the engine's only view of the catalog
//!
//! The host service reads products, sales and groups from its own storage
//! inside one read–compute–persist unit and hands the engine this plain
//! in-memory snapshot. The engine performs no lookups of its own, which
//! keeps both paths pure and independently testable. A race where the
//! catalog changes between the read and the persist is accepted at the
//! service boundary; it cannot be observed from inside a snapshot.

use crate::resolver::{OfferSource, SaleOffer};
use shared::models::{CategorySale, Product, ProductSale, SaleGroup};
use std::collections::HashMap;

/// Point-in-time catalog read, injected into both engine paths
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    products: HashMap<i64, Product>,
    /// Product-level bundle sales, keyed by product id (at most one each)
    product_sales: HashMap<i64, ProductSale>,
    /// Category bundle sales, keyed by category id
    category_sales: HashMap<i64, CategorySale>,
    /// Category memberships, product id -> category ids
    product_categories: HashMap<i64, Vec<i64>>,
    sale_groups: HashMap<i64, SaleGroup>,
    /// Reverse membership index, product id -> group id
    group_by_product: HashMap<i64, i64>,
}

impl CatalogSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== Population (host side) ====================

    pub fn add_product(&mut self, product: Product) {
        self.products.insert(product.id, product);
    }

    pub fn add_product_sale(&mut self, sale: ProductSale) {
        self.product_sales.insert(sale.product_id, sale);
    }

    pub fn add_category_sale(&mut self, sale: CategorySale) {
        self.category_sales.insert(sale.category_id, sale);
    }

    /// Record that a product belongs to a category. A product may belong
    /// to several categories, each potentially bearing a sale.
    pub fn assign_category(&mut self, product_id: i64, category_id: i64) {
        let categories = self.product_categories.entry(product_id).or_default();
        if !categories.contains(&category_id) {
            categories.push(category_id);
        }
    }

    /// Add a sale group and index its membership. A product belongs to at
    /// most one group; a later group silently takes over a product that
    /// was already claimed.
    pub fn add_sale_group(&mut self, group: SaleGroup) {
        for product_id in &group.member_product_ids {
            self.group_by_product.insert(*product_id, group.id);
        }
        self.sale_groups.insert(group.id, group);
    }

    // ==================== Lookups (engine side) ====================

    pub fn product(&self, product_id: i64) -> Option<&Product> {
        self.products.get(&product_id)
    }

    pub fn product_sale(&self, product_id: i64) -> Option<&ProductSale> {
        self.product_sales.get(&product_id)
    }

    /// The sale group a product belongs to, if any
    pub fn group_for(&self, product_id: i64) -> Option<&SaleGroup> {
        self.group_by_product
            .get(&product_id)
            .and_then(|group_id| self.sale_groups.get(group_id))
    }

    pub fn sale_groups(&self) -> &HashMap<i64, SaleGroup> {
        &self.sale_groups
    }

    // ==================== Display path assembly ====================

    /// Collect every sale candidate for a product: its own bundle sale,
    /// one candidate per on-sale category containing it, and its sale
    /// group's bundle. Feed the result to [`crate::resolver::resolve`].
    pub fn offers_for(&self, product_id: i64) -> Vec<SaleOffer> {
        let mut offers = Vec::new();

        if let Some(sale) = self.product_sales.get(&product_id) {
            offers.push(SaleOffer {
                source: OfferSource::Product,
                amount: sale.amount,
                price: sale.price,
            });
        }

        if let Some(category_ids) = self.product_categories.get(&product_id) {
            let mut sorted = category_ids.clone();
            sorted.sort_unstable();
            for category_id in sorted {
                if let Some(sale) = self.category_sales.get(&category_id) {
                    offers.push(SaleOffer {
                        source: OfferSource::Category {
                            id: sale.category_id,
                            name: sale.name.clone(),
                        },
                        amount: sale.amount,
                        price: sale.price,
                    });
                }
            }
        }

        if let Some(group) = self.group_for(product_id) {
            offers.push(SaleOffer {
                source: OfferSource::Group {
                    id: group.id,
                    name: group.name.clone(),
                },
                amount: group.bundle_amount,
                price: group.bundle_price,
            });
        }

        offers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver;

    fn make_product(id: i64, price: f64) -> Product {
        Product {
            id,
            name: format!("product_{}", id),
            price,
            is_active: true,
        }
    }

    fn seeded_catalog() -> CatalogSnapshot {
        let mut catalog = CatalogSnapshot::new();
        catalog.add_product(make_product(1, 10.0));
        catalog.add_product_sale(ProductSale {
            product_id: 1,
            amount: 2,
            price: 18.0,
        });
        catalog.add_category_sale(CategorySale {
            category_id: 7,
            name: "breakfast".to_string(),
            amount: 3,
            price: 25.0,
        });
        catalog.assign_category(1, 7);
        catalog.assign_category(1, 8); // category without a sale
        catalog.add_sale_group(SaleGroup {
            id: 3,
            name: "picnic pack".to_string(),
            bundle_amount: 4,
            bundle_price: 36.0,
            unit_price: 10.0,
            member_product_ids: vec![1, 2],
        });
        catalog
    }

    #[test]
    fn test_offers_for_collects_all_sources() {
        let catalog = seeded_catalog();
        let offers = catalog.offers_for(1);

        assert_eq!(offers.len(), 3);
        assert!(matches!(offers[0].source, OfferSource::Product));
        assert!(matches!(offers[1].source, OfferSource::Category { id: 7, .. }));
        assert!(matches!(offers[2].source, OfferSource::Group { id: 3, .. }));
    }

    #[test]
    fn test_offers_resolve_to_best_unit_price() {
        let catalog = seeded_catalog();
        // product "2 for 18" = 9.0/unit, category "3 for 25" = 8.33/unit,
        // group "4 for 36" = 9.0/unit -> category wins
        let winner = resolver::resolve(catalog.offers_for(1)).unwrap();
        assert!(matches!(winner.source, OfferSource::Category { id: 7, .. }));
    }

    #[test]
    fn test_no_offers_for_plain_product() {
        let mut catalog = seeded_catalog();
        catalog.add_product(make_product(9, 4.0));
        assert!(catalog.offers_for(9).is_empty());
        assert!(resolver::resolve(catalog.offers_for(9)).is_none());
    }

    #[test]
    fn test_group_membership_index() {
        let catalog = seeded_catalog();
        assert_eq!(catalog.group_for(1).unwrap().id, 3);
        assert_eq!(catalog.group_for(2).unwrap().id, 3);
        assert!(catalog.group_for(99).is_none());
    }
}
