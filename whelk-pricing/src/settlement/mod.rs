//! Order settlement - the authoritative totals computation
//!
//! Runs once, at order creation, against an injected catalog snapshot.
//! Per line: the product-level bundle sale (if any) prices the quantity;
//! category sales are display-only and are not consulted here. Group
//! discounts are pooled and allocated separately and stack on top of the
//! per-line pricing. The resulting totals are frozen into an
//! [`OrderSnapshot`] and never recomputed from the live catalog.

use crate::bundle::bundle_total;
use crate::catalog::CatalogSnapshot;
use crate::config::CheckoutConfig;
use crate::groups::{self, GroupMember};
use crate::money::{to_decimal, to_f64, validate_line_request, validate_unit_price};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::error::{AppError, ErrorCode};
use shared::order::{
    AppliedBundleSale, AppliedGroupSale, LineItemSnapshot, OrderLineRequest, OrderSnapshot,
};
use thiserror::Error;

/// Settlement errors
#[derive(Debug, Error)]
pub enum SettlementError {
    /// The request contained no lines at all
    #[error("Order is empty")]
    EmptyOrder,

    /// Every requested product was unknown to the catalog
    #[error("No valid products in request")]
    NoValidProducts,

    /// A line or its catalog data failed numeric validation
    #[error("Invalid line: {0}")]
    InvalidLine(String),
}

impl From<SettlementError> for AppError {
    fn from(err: SettlementError) -> Self {
        match err {
            SettlementError::EmptyOrder => AppError::new(ErrorCode::OrderEmpty),
            SettlementError::NoValidProducts => AppError::new(ErrorCode::OrderNoValidProducts),
            SettlementError::InvalidLine(msg) => {
                AppError::with_message(ErrorCode::ValidationFailed, msg)
            }
        }
    }
}

/// Engine output for one settled order
///
/// Plain result record for the host to persist or render; identity
/// (order id, timestamp) is stamped on via [`Self::into_snapshot`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderPricingResult {
    pub lines: Vec<LineItemSnapshot>,
    /// Sum of per-line bundle pricing over in-stock lines
    pub pre_group_total: f64,
    /// Total discount earned by sale groups
    pub group_discount_total: f64,
    /// pre_group_total - group_discount_total
    pub subtotal: f64,
    pub delivery_fee: f64,
    /// subtotal + delivery_fee
    pub grand_total: f64,
    /// Requested lines dropped because the product was unknown
    pub dropped_line_count: u32,
    pub applied_group_sales: Vec<AppliedGroupSale>,
}

impl OrderPricingResult {
    /// Freeze this result into a persistable snapshot with identity and
    /// checksum. `created_at` is supplied by the caller so the
    /// computation itself stays clock-free.
    pub fn into_snapshot(self, order_id: impl Into<String>, created_at: i64) -> OrderSnapshot {
        let mut snapshot = OrderSnapshot {
            order_id: order_id.into(),
            created_at,
            lines: self.lines,
            pre_group_total: self.pre_group_total,
            group_discount_total: self.group_discount_total,
            subtotal: self.subtotal,
            delivery_fee: self.delivery_fee,
            grand_total: self.grand_total,
            dropped_line_count: self.dropped_line_count,
            applied_group_sales: self.applied_group_sales,
            state_checksum: String::new(),
        };
        snapshot.update_checksum();
        snapshot
    }
}

/// Settle one order against a point-in-time catalog read.
///
/// Unknown product ids are per-line soft failures: the line is dropped,
/// warned and counted. The whole settlement fails only when the request
/// is empty or no line survives.
pub fn settle(
    catalog: &CatalogSnapshot,
    requests: &[OrderLineRequest],
    config: &CheckoutConfig,
) -> Result<OrderPricingResult, SettlementError> {
    if requests.is_empty() {
        return Err(SettlementError::EmptyOrder);
    }
    for request in requests {
        validate_line_request(request)?;
    }

    // Resolve requests against the catalog; authoritative prices come
    // from the snapshot, never from the client
    let mut dropped_line_count = 0u32;
    let mut lines: Vec<LineItemSnapshot> = Vec::with_capacity(requests.len());
    for request in requests {
        let Some(product) = catalog.product(request.product_id) else {
            tracing::warn!(
                product_id = request.product_id,
                "Requested product not found in catalog, dropping line"
            );
            dropped_line_count += 1;
            continue;
        };
        validate_unit_price(product.price, product.id)?;

        lines.push(LineItemSnapshot {
            product_id: product.id,
            name: product.name.clone(),
            quantity: request.quantity,
            unit_price: product.price,
            in_stock: request.in_stock,
            applied_sale: None,
            sale_group_id: catalog.group_for(product.id).map(|g| g.id),
            group_discount_share: 0.0,
            line_total: 0.0,
        });
    }
    if lines.is_empty() {
        return Err(SettlementError::NoValidProducts);
    }

    // Per-line bundle pricing (product-level sale only; out-of-stock
    // lines stay listed but contribute nothing)
    let mut pre_group_total = Decimal::ZERO;
    for line in lines.iter_mut() {
        if !line.in_stock {
            continue;
        }
        let unit_price = to_decimal(line.unit_price);
        let plain = Decimal::from(line.quantity) * unit_price;

        let line_total = match catalog.product_sale(line.product_id) {
            Some(sale) if sale.amount > 0 => {
                let bundled =
                    bundle_total(line.quantity, sale.amount, to_decimal(sale.price), unit_price);
                if line.quantity >= sale.amount {
                    line.applied_sale = Some(AppliedBundleSale {
                        amount: sale.amount,
                        price: sale.price,
                        calculated_amount: to_f64(plain - bundled),
                    });
                }
                bundled
            }
            _ => plain,
        };

        line.line_total = to_f64(line_total);
        pre_group_total += line_total;
    }

    // Pool and allocate group discounts across member lines
    let members: Vec<GroupMember> = lines
        .iter()
        .enumerate()
        .filter_map(|(line_index, line)| {
            line.sale_group_id.map(|group_id| GroupMember {
                line_index,
                group_id,
                quantity: line.quantity,
                in_stock: line.in_stock,
            })
        })
        .collect();
    let allocation = groups::allocate(&members, catalog.sale_groups());
    for (line_index, share) in &allocation.shares {
        lines[*line_index].group_discount_share = to_f64(*share);
    }

    // Totals: discount never exceeds a group's regular bundle cost, so
    // the subtotal stays non-negative by construction
    let subtotal = pre_group_total - allocation.total_discount;
    let delivery_fee = if subtotal > Decimal::ZERO && subtotal < to_decimal(config.delivery_threshold)
    {
        to_decimal(config.delivery_fee)
    } else {
        Decimal::ZERO
    };
    let grand_total = subtotal + delivery_fee;

    Ok(OrderPricingResult {
        lines,
        pre_group_total: to_f64(pre_group_total),
        group_discount_total: to_f64(allocation.total_discount),
        subtotal: to_f64(subtotal),
        delivery_fee: to_f64(delivery_fee),
        grand_total: to_f64(grand_total),
        dropped_line_count,
        applied_group_sales: allocation.applied,
    })
}
