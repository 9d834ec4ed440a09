//! Group Discount Allocator
//!
//! A sale group spans several distinct products sold at a shared unit
//! price; buying enough units *across the group* unlocks its bundle
//! price. The group's earned discount is distributed back onto the member
//! line items in proportion to each line's share of the pooled quantity,
//! so receipts and accounting can attribute it.
//!
//! This allocator runs independently of, and additively with, the
//! product-level bundle sale applied during settlement: a line can
//! receive its own bundle discount and a share of its group's discount
//! on the same order.

use crate::money::{to_decimal, to_f64};
use rust_decimal::Decimal;
use shared::models::SaleGroup;
use shared::order::AppliedGroupSale;
use std::collections::{BTreeMap, HashMap};

/// One order line's view for group pooling
#[derive(Debug, Clone)]
pub struct GroupMember {
    /// Index of the line within the order
    pub line_index: usize,
    /// Sale group the line's product belongs to
    pub group_id: i64,
    /// Requested quantity
    pub quantity: i64,
    /// Out-of-stock lines stay listed but contribute nothing to the pool
    pub in_stock: bool,
}

impl GroupMember {
    /// Quantity this line contributes to its group's pool
    fn eligible_quantity(&self) -> i64 {
        if self.in_stock { self.quantity.max(0) } else { 0 }
    }
}

/// Result of allocating group discounts across one order
#[derive(Debug, Default)]
pub struct GroupAllocation {
    /// Per-line discount share, keyed by line index. Exact Decimal
    /// values; rounding happens only when written into the snapshot.
    pub shares: HashMap<usize, Decimal>,
    /// Exact total discount earned across all groups
    pub total_discount: Decimal,
    /// One record per group that earned a discount
    pub applied: Vec<AppliedGroupSale>,
}

/// Allocate group bundle discounts for one order.
///
/// Per group: pool the eligible quantity over member lines, evaluate the
/// bundle rule over the pool, and split the earned discount
/// proportionally to each line's eligible quantity. Groups whose pool
/// stays below the bundle amount earn nothing. Groups are processed in
/// id order so the output is identical across runs.
pub fn allocate(members: &[GroupMember], groups: &HashMap<i64, SaleGroup>) -> GroupAllocation {
    let mut by_group: BTreeMap<i64, Vec<&GroupMember>> = BTreeMap::new();
    for member in members {
        by_group.entry(member.group_id).or_default().push(member);
    }

    let mut allocation = GroupAllocation::default();

    for (group_id, group_members) in by_group {
        let Some(group) = groups.get(&group_id) else {
            tracing::warn!(group_id, "Sale group missing from catalog snapshot, skipping");
            continue;
        };
        // Division guard: a malformed bundle amount disables the group
        if group.bundle_amount <= 0 {
            continue;
        }

        let total_eligible: i64 = group_members.iter().map(|m| m.eligible_quantity()).sum();
        let bundles = total_eligible / group.bundle_amount;
        if bundles <= 0 {
            continue;
        }

        // Discount = what the bundled units would cost at the regular
        // unit price, minus the bundle price, never negative
        let regular_cost = Decimal::from(bundles * group.bundle_amount) * to_decimal(group.unit_price);
        let sale_cost = Decimal::from(bundles) * to_decimal(group.bundle_price);
        let discount = (regular_cost - sale_cost).max(Decimal::ZERO);
        if discount <= Decimal::ZERO {
            continue;
        }

        let pool = Decimal::from(total_eligible);
        for member in &group_members {
            let eligible = member.eligible_quantity();
            if eligible == 0 {
                continue;
            }
            let share = Decimal::from(eligible) / pool * discount;
            *allocation
                .shares
                .entry(member.line_index)
                .or_insert(Decimal::ZERO) += share;
        }

        allocation.total_discount += discount;
        allocation.applied.push(AppliedGroupSale {
            group_id,
            name: group.name.clone(),
            bundle_amount: group.bundle_amount,
            bundle_price: group.bundle_price,
            unit_price: group.unit_price,
            calculated_amount: to_f64(discount),
        });
    }

    allocation
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper to create a test sale group
    fn make_group(id: i64, bundle_amount: i64, bundle_price: f64, unit_price: f64) -> SaleGroup {
        SaleGroup {
            id,
            name: format!("group_{}", id),
            bundle_amount,
            bundle_price,
            unit_price,
            member_product_ids: vec![],
        }
    }

    fn make_member(line_index: usize, group_id: i64, quantity: i64, in_stock: bool) -> GroupMember {
        GroupMember {
            line_index,
            group_id,
            quantity,
            in_stock,
        }
    }

    fn group_map(groups: Vec<SaleGroup>) -> HashMap<i64, SaleGroup> {
        groups.into_iter().map(|g| (g.id, g)).collect()
    }

    #[test]
    fn test_proportional_shares() {
        // Quantities 2 and 4 in a "3 for 20" group at unit price 10:
        // pool 6 -> 2 bundles, discount = 2×3×10 - 2×20 = 20
        // shares: 2/6 × 20 = 6.67 and 4/6 × 20 = 13.33
        let groups = group_map(vec![make_group(1, 3, 20.0, 10.0)]);
        let members = vec![make_member(0, 1, 2, true), make_member(1, 1, 4, true)];

        let allocation = allocate(&members, &groups);

        assert_eq!(to_f64(allocation.total_discount), 20.0);
        assert_eq!(to_f64(allocation.shares[&0]), 6.67);
        assert_eq!(to_f64(allocation.shares[&1]), 13.33);
        // Exact shares sum to the exact discount
        let sum: Decimal = allocation.shares.values().copied().sum();
        assert_eq!(sum, allocation.total_discount);

        assert_eq!(allocation.applied.len(), 1);
        assert_eq!(allocation.applied[0].group_id, 1);
        assert_eq!(allocation.applied[0].calculated_amount, 20.0);
    }

    #[test]
    fn test_pool_below_bundle_amount_earns_nothing() {
        // Pool of 2 in a "3 for 20" group: no bundle, no discount
        let groups = group_map(vec![make_group(1, 3, 20.0, 10.0)]);
        let members = vec![make_member(0, 1, 1, true), make_member(1, 1, 1, true)];

        let allocation = allocate(&members, &groups);

        assert_eq!(allocation.total_discount, Decimal::ZERO);
        assert!(allocation.shares.is_empty());
        assert!(allocation.applied.is_empty());
    }

    #[test]
    fn test_out_of_stock_contributes_nothing() {
        // Out-of-stock line neither feeds the pool nor receives a share
        let groups = group_map(vec![make_group(1, 3, 20.0, 10.0)]);
        let members = vec![
            make_member(0, 1, 6, true),
            make_member(1, 1, 5, false), // out of stock
        ];

        let allocation = allocate(&members, &groups);

        // Pool is 6 -> 2 bundles, discount 20, all of it to line 0
        assert_eq!(to_f64(allocation.total_discount), 20.0);
        assert_eq!(to_f64(allocation.shares[&0]), 20.0);
        assert!(!allocation.shares.contains_key(&1));
    }

    #[test]
    fn test_unprofitable_bundle_earns_nothing() {
        // Bundle price above the regular cost: discount clamps to zero
        let groups = group_map(vec![make_group(1, 3, 35.0, 10.0)]);
        let members = vec![make_member(0, 1, 6, true)];

        let allocation = allocate(&members, &groups);

        assert_eq!(allocation.total_discount, Decimal::ZERO);
        assert!(allocation.applied.is_empty());
    }

    #[test]
    fn test_groups_are_independent() {
        // Two groups on one order: each pools and allocates separately
        let groups = group_map(vec![
            make_group(1, 3, 20.0, 10.0),
            make_group(2, 2, 5.0, 4.0),
        ]);
        let members = vec![
            make_member(0, 1, 3, true), // group 1: 1 bundle, discount 10
            make_member(1, 2, 2, true), // group 2: 1 bundle, discount 3
            make_member(2, 2, 1, true), // remainder, still shares
        ];

        let allocation = allocate(&members, &groups);

        assert_eq!(to_f64(allocation.total_discount), 13.0);
        assert_eq!(to_f64(allocation.shares[&0]), 10.0);
        // group 2 pool is 3 -> 1 bundle, discount 2×4 - 5 = 3
        assert_eq!(to_f64(allocation.shares[&1]), 2.0);
        assert_eq!(to_f64(allocation.shares[&2]), 1.0);
        assert_eq!(allocation.applied.len(), 2);
    }

    #[test]
    fn test_same_product_on_two_lines_pools() {
        // Two lines of the same group pool into one quantity
        let groups = group_map(vec![make_group(1, 4, 30.0, 10.0)]);
        let members = vec![make_member(0, 1, 2, true), make_member(1, 1, 2, true)];

        let allocation = allocate(&members, &groups);

        // Pool 4 -> 1 bundle, discount 4×10 - 30 = 10, split 5/5
        assert_eq!(to_f64(allocation.total_discount), 10.0);
        assert_eq!(to_f64(allocation.shares[&0]), 5.0);
        assert_eq!(to_f64(allocation.shares[&1]), 5.0);
    }

    #[test]
    fn test_malformed_bundle_amount_disables_group() {
        let groups = group_map(vec![make_group(1, 0, 20.0, 10.0)]);
        let members = vec![make_member(0, 1, 6, true)];

        let allocation = allocate(&members, &groups);

        assert_eq!(allocation.total_discount, Decimal::ZERO);
        assert!(allocation.applied.is_empty());
    }

    #[test]
    fn test_free_bundle_price() {
        // "3 for 0" gives the full regular cost back as discount
        let groups = group_map(vec![make_group(1, 3, 0.0, 10.0)]);
        let members = vec![make_member(0, 1, 3, true)];

        let allocation = allocate(&members, &groups);

        assert_eq!(to_f64(allocation.total_discount), 30.0);
        assert_eq!(to_f64(allocation.shares[&0]), 30.0);
    }
}
