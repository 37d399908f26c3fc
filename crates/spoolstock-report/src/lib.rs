//! Read-only reporting over the batch ledger.
//!
//! Aggregations built from batch store snapshots: current on-hand quantity,
//! weighted-average unit cost, full batch history, and a catalog-joined
//! stock summary. Nothing here mutates; the store's own locking is all the
//! synchronization reporting needs, and two calls without intervening
//! writes return identical results.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use spoolstock_catalog::Catalog;
use spoolstock_core::{Batch, ProductId};
use spoolstock_store::BatchStore;

/// One product's row in the stock summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockLine {
    /// The product.
    pub product_id: ProductId,
    /// Display name from the catalog.
    pub product_name: String,
    /// Unit of measure from the catalog.
    pub unit: String,
    /// Quantity currently on hand across all batches.
    pub on_hand: Decimal,
    /// Quantity originally purchased across all batches.
    pub initial_total: Decimal,
    /// Weighted-average unit cost of the on-hand stock, in the base
    /// currency. `None` when nothing is on hand.
    pub weighted_average_cost: Option<Decimal>,
}

/// Current on-hand quantity for a product (sum over its batches).
#[must_use]
pub fn on_hand(store: &BatchStore, product_id: ProductId) -> Decimal {
    store.on_hand(product_id)
}

/// Weighted-average unit cost of a product's remaining stock.
///
/// `sum(current_quantity * cost_per_unit) / sum(current_quantity)` across
/// the product's batches; `None` when nothing is on hand.
#[must_use]
pub fn weighted_average_cost(store: &BatchStore, product_id: ProductId) -> Option<Decimal> {
    let batches = store.list_batches(Some(product_id));
    let total_quantity: Decimal = batches.iter().map(Batch::current_quantity).sum();
    if total_quantity.is_zero() {
        return None;
    }
    let total_value: Decimal = batches.iter().map(Batch::remaining_value).sum();
    Some(total_value / total_quantity)
}

/// Full batch history for a product, oldest first, exhausted batches
/// included.
#[must_use]
pub fn batch_history(store: &BatchStore, product_id: ProductId) -> Vec<Batch> {
    store.list_batches(Some(product_id))
}

/// Per-product stock summary joined against the catalog.
///
/// Products with no batches yet appear with zero quantities, matching what
/// a stock table should show right after a product is created.
#[must_use]
pub fn stock_summary(store: &BatchStore, catalog: &Catalog) -> Vec<StockLine> {
    catalog
        .products()
        .into_iter()
        .map(|product| {
            let batches = store.list_batches(Some(product.id));
            let on_hand: Decimal = batches.iter().map(Batch::current_quantity).sum();
            let initial_total: Decimal = batches.iter().map(|b| b.initial_quantity).sum();
            StockLine {
                product_id: product.id,
                product_name: product.display_name(),
                unit: product.unit().to_string(),
                on_hand,
                initial_total,
                weighted_average_cost: weighted_average_cost(store, product.id),
            }
        })
        .collect()
}
