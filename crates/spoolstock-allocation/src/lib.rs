//! FIFO consumption allocator.
//!
//! Given a product and a quantity to consume, the allocator depletes that
//! product's batches oldest-first through the batch store and reports a
//! per-batch cost breakdown. Running out of stock is a *normal* outcome:
//! the unmet remainder comes back as [`Allocation::shortfall`] rather than
//! an error, because running low is an expected business state.
//!
//! The multi-batch walk is not atomic: batches already decremented stay
//! decremented if later ones cannot cover the rest — partial progress
//! reflects material actually consumed. Callers that need all-or-nothing
//! semantics must layer their own reservation scheme on top.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use spoolstock_core::{BatchError, BatchId, ProductId};
use spoolstock_store::{BatchStore, StoreError};

/// Error returned when an allocation cannot even start.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocationError {
    /// The requested consumption quantity was zero or negative.
    #[error("quantity to consume must be positive, got {0}")]
    InvalidQuantity(Decimal),
    /// The store rejected the request (unknown product, unknown batch).
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// One batch's contribution to an allocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationLine {
    /// The batch the material came from.
    pub batch_id: BatchId,
    /// How much was taken from that batch.
    pub amount_taken: Decimal,
    /// That batch's unit cost in the base currency.
    pub cost_per_unit: Decimal,
}

impl AllocationLine {
    /// Cost of this line in the base currency.
    #[must_use]
    pub fn cost(&self) -> Decimal {
        self.amount_taken * self.cost_per_unit
    }
}

/// The result of consuming material from a product's batches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    /// Per-batch breakdown, in the order batches were depleted (oldest first).
    pub lines: Vec<AllocationLine>,
    /// Total cost of the allocated quantity in the base currency — a
    /// weighted blend across the consumed batches.
    pub total_cost: Decimal,
    /// The requested quantity that could not be satisfied. Zero when stock
    /// covered the whole request.
    pub shortfall: Decimal,
}

impl Allocation {
    /// Quantity actually allocated across all lines.
    #[must_use]
    pub fn quantity_allocated(&self) -> Decimal {
        self.lines.iter().map(|l| l.amount_taken).sum()
    }

    /// Whether the full requested quantity was available.
    #[must_use]
    pub fn is_fully_satisfied(&self) -> bool {
        self.shortfall.is_zero()
    }
}

/// Consume `quantity_needed` of a product, oldest batches first.
///
/// Walks the store's timestamp-ordered batch list, taking
/// `min(remaining, batch.current_quantity)` from each non-exhausted batch
/// through the store's serialized take operation, until the request is
/// satisfied or every batch is empty. The blended cost of everything taken
/// is accumulated into [`Allocation::total_cost`].
///
/// Fails with [`AllocationError::InvalidQuantity`] for a non-positive
/// request and with [`StoreError::ProductNotFound`] for an unknown product.
pub fn allocate(
    store: &BatchStore,
    product_id: ProductId,
    quantity_needed: Decimal,
) -> Result<Allocation, AllocationError> {
    if quantity_needed <= Decimal::ZERO {
        return Err(AllocationError::InvalidQuantity(quantity_needed));
    }
    store.ensure_product(product_id)?;

    let mut remaining = quantity_needed;
    let mut lines = Vec::new();
    let mut total_cost = Decimal::ZERO;

    for batch in store.list_batches(Some(product_id)) {
        if remaining.is_zero() {
            break;
        }
        if batch.is_exhausted() {
            continue;
        }

        // The store re-reads the live quantity under the batch's own lock,
        // so a stale snapshot here can only make us take less, never more.
        let taken = match store.decrement_up_to(batch.id, remaining) {
            Ok(taken) => taken,
            // Another consumer emptied the batch between the snapshot and
            // the take; move on to the next one.
            Err(StoreError::Batch(BatchError::InsufficientQuantity { .. })) => continue,
            Err(err) => return Err(err.into()),
        };
        if taken.is_zero() {
            continue;
        }

        total_cost += taken * batch.cost_per_unit;
        remaining -= taken;
        lines.push(AllocationLine {
            batch_id: batch.id,
            amount_taken: taken,
            cost_per_unit: batch.cost_per_unit,
        });
    }

    tracing::debug!(
        product = %product_id,
        requested = %quantity_needed,
        allocated = %(quantity_needed - remaining),
        shortfall = %remaining,
        "consumption allocated"
    );

    Ok(Allocation {
        lines,
        total_cost,
        shortfall: remaining,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;
    use spoolstock_catalog::{Catalog, ProductDraft};
    use spoolstock_core::{Currency, NewPurchase, Normalizer};
    use std::sync::Arc;

    fn setup() -> (BatchStore, ProductId) {
        let catalog = Arc::new(Catalog::new());
        let cat = catalog.add_category("Filament").unwrap();
        let product = catalog
            .add_product(
                ProductDraft::for_category(cat.id)
                    .with_manufacturer("Prusament")
                    .with_material_type("PLA")
                    .with_color("Azure Blue"),
            )
            .unwrap();
        let store = BatchStore::new(catalog, Normalizer::default());
        (store, product.id)
    }

    /// Record a PLN batch whose cost per unit comes out to `cost_per_unit`.
    fn record(
        store: &BatchStore,
        product: ProductId,
        qty: Decimal,
        cost_per_unit: Decimal,
        day: u32,
    ) -> BatchId {
        let ts = Utc.with_ymd_and_hms(2024, 3, day, 9, 0, 0).unwrap();
        store
            .record_purchase(
                NewPurchase::new(product, cost_per_unit * qty, Currency::Pln, dec!(1), qty)
                    .at(ts),
            )
            .unwrap()
            .id
    }

    #[test]
    fn test_fifo_depletes_oldest_first() {
        let (store, product) = setup();
        let b1 = record(&store, product, dec!(10), dec!(2.00), 1); // older
        let b2 = record(&store, product, dec!(10), dec!(3.00), 15); // newer

        let allocation = allocate(&store, product, dec!(15)).unwrap();

        assert!(allocation.is_fully_satisfied());
        assert_eq!(allocation.lines.len(), 2);
        assert_eq!(allocation.lines[0].batch_id, b1);
        assert_eq!(allocation.lines[0].amount_taken, dec!(10));
        assert_eq!(allocation.lines[1].batch_id, b2);
        assert_eq!(allocation.lines[1].amount_taken, dec!(5));

        // B1 fully depleted, B2 left at 5
        assert!(store.batch(b1).unwrap().is_exhausted());
        assert_eq!(store.batch(b2).unwrap().current_quantity(), dec!(5));
    }

    #[test]
    fn test_blended_cost() {
        let (store, product) = setup();
        record(&store, product, dec!(10), dec!(2.00), 1);
        record(&store, product, dec!(10), dec!(3.00), 15);

        let allocation = allocate(&store, product, dec!(15)).unwrap();

        // 10 * 2.00 + 5 * 3.00
        assert_eq!(allocation.total_cost, dec!(35.00));
        assert_eq!(
            allocation.total_cost,
            allocation.lines.iter().map(AllocationLine::cost).sum::<Decimal>()
        );
    }

    #[test]
    fn test_shortfall_consumes_everything_available() {
        let (store, product) = setup();
        let b1 = record(&store, product, dec!(3), dec!(1.00), 1);
        let b2 = record(&store, product, dec!(5), dec!(1.00), 2);

        let allocation = allocate(&store, product, dec!(10)).unwrap();

        assert_eq!(allocation.shortfall, dec!(2));
        assert_eq!(allocation.quantity_allocated(), dec!(8));
        assert!(!allocation.is_fully_satisfied());
        assert!(store.batch(b1).unwrap().is_exhausted());
        assert!(store.batch(b2).unwrap().is_exhausted());
    }

    #[test]
    fn test_exact_single_batch() {
        let (store, product) = setup();
        let b1 = record(&store, product, dec!(10), dec!(2.00), 1);
        let b2 = record(&store, product, dec!(10), dec!(3.00), 2);

        let allocation = allocate(&store, product, dec!(10)).unwrap();

        assert_eq!(allocation.lines.len(), 1);
        assert_eq!(allocation.lines[0].batch_id, b1);
        assert_eq!(allocation.total_cost, dec!(20.00));
        assert_eq!(store.batch(b2).unwrap().current_quantity(), dec!(10));
    }

    #[test]
    fn test_skips_exhausted_batches() {
        let (store, product) = setup();
        let b1 = record(&store, product, dec!(4), dec!(2.00), 1);
        let b2 = record(&store, product, dec!(6), dec!(3.00), 2);

        // Exhaust the oldest batch first
        store.decrement(b1, dec!(4)).unwrap();

        let allocation = allocate(&store, product, dec!(6)).unwrap();
        assert_eq!(allocation.lines.len(), 1);
        assert_eq!(allocation.lines[0].batch_id, b2);
        assert_eq!(allocation.total_cost, dec!(18.00));
    }

    #[test]
    fn test_no_stock_at_all() {
        let (store, product) = setup();
        let allocation = allocate(&store, product, dec!(5)).unwrap();
        assert!(allocation.lines.is_empty());
        assert_eq!(allocation.total_cost, Decimal::ZERO);
        assert_eq!(allocation.shortfall, dec!(5));
    }

    #[test]
    fn test_invalid_quantity() {
        let (store, product) = setup();
        assert_eq!(
            allocate(&store, product, dec!(0)).unwrap_err(),
            AllocationError::InvalidQuantity(dec!(0))
        );
        assert!(allocate(&store, product, dec!(-3)).is_err());
    }

    #[test]
    fn test_unknown_product() {
        let (store, _product) = setup();
        let err = allocate(&store, ProductId::new(404), dec!(1)).unwrap_err();
        assert_eq!(
            err,
            AllocationError::Store(StoreError::ProductNotFound(ProductId::new(404)))
        );
    }

    #[test]
    fn test_fractional_quantities() {
        let (store, product) = setup();
        record(&store, product, dec!(2.5), dec!(0.10), 1);
        record(&store, product, dec!(2.5), dec!(0.20), 2);

        let allocation = allocate(&store, product, dec!(3.75)).unwrap();
        assert!(allocation.is_fully_satisfied());
        // 2.5 * 0.10 + 1.25 * 0.20
        assert_eq!(allocation.total_cost, dec!(0.50));
    }
}
