//! The batch store: durable collection of purchase batches per product.
//!
//! [`BatchStore`] is the single owner of all batch records. Every quantity
//! mutation goes through it, and decrements against the same batch are
//! serialized by a per-batch mutex, so two simultaneous consumption requests
//! can never both read a stale quantity and jointly overdraw a batch below
//! zero. Decrements on *different* batches proceed in parallel, and
//! recording a purchase never contends with other purchases beyond the map
//! insert itself.
//!
//! Batches are append-only except for their remaining quantity: they are
//! never deleted, preserving the audit trail of what was bought and used.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use rust_decimal::Decimal;
use thiserror::Error;

use spoolstock_catalog::Catalog;
use spoolstock_core::{Batch, BatchError, BatchId, NewPurchase, Normalizer, ProductId};

/// Error returned by store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The purchase references a product the catalog does not know.
    #[error("product not found: {0}")]
    ProductNotFound(ProductId),
    /// The referenced batch does not exist.
    #[error("batch not found: {0}")]
    BatchNotFound(BatchId),
    /// Quantity or normalization failure from the batch itself.
    #[error(transparent)]
    Batch(#[from] BatchError),
}

#[derive(Debug, Default)]
struct StoreState {
    batches: BTreeMap<BatchId, Arc<Mutex<Batch>>>,
    next_id: u64,
}

/// Exclusive owner of all purchase batches.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use rust_decimal_macros::dec;
/// use spoolstock_catalog::{Catalog, ProductDraft};
/// use spoolstock_core::{Currency, NewPurchase, Normalizer};
/// use spoolstock_store::BatchStore;
///
/// let catalog = Arc::new(Catalog::new());
/// let cat = catalog.add_category("Filament").unwrap();
/// let product = catalog
///     .add_product(
///         ProductDraft::for_category(cat.id)
///             .with_manufacturer("Prusament")
///             .with_material_type("PLA")
///             .with_color("Lipstick Red"),
///     )
///     .unwrap();
///
/// let store = BatchStore::new(catalog, Normalizer::default());
/// let batch = store
///     .record_purchase(NewPurchase::new(
///         product.id,
///         dec!(120.00),
///         Currency::Pln,
///         dec!(1),
///         dec!(1000),
///     ))
///     .unwrap();
///
/// assert_eq!(store.on_hand(product.id), dec!(1000));
/// let after = store.decrement(batch.id, dec!(200)).unwrap();
/// assert_eq!(after.current_quantity(), dec!(800));
/// ```
#[derive(Debug)]
pub struct BatchStore {
    catalog: Arc<Catalog>,
    normalizer: Normalizer,
    inner: RwLock<StoreState>,
}

impl BatchStore {
    /// Create an empty store validating products against `catalog`.
    #[must_use]
    pub fn new(catalog: Arc<Catalog>, normalizer: Normalizer) -> Self {
        Self {
            catalog,
            normalizer,
            inner: RwLock::new(StoreState::default()),
        }
    }

    /// The catalog this store validates product references against.
    #[must_use]
    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// The normalizer used to derive unit costs.
    #[must_use]
    pub const fn normalizer(&self) -> Normalizer {
        self.normalizer
    }

    /// Fail with [`StoreError::ProductNotFound`] unless the product exists.
    pub fn ensure_product(&self, product_id: ProductId) -> Result<(), StoreError> {
        if self.catalog.contains_product(product_id) {
            Ok(())
        } else {
            Err(StoreError::ProductNotFound(product_id))
        }
    }

    /// Record a purchase as a new batch.
    ///
    /// Validates the product reference and the quantity, derives the unit
    /// cost in the base currency, and persists the batch with its full
    /// quantity remaining. Each call creates an independent record, so no
    /// cross-batch locking is needed.
    pub fn record_purchase(&self, purchase: NewPurchase) -> Result<Batch, StoreError> {
        self.ensure_product(purchase.product_id)?;

        let mut state = self.inner.write();
        state.next_id += 1;
        let batch = Batch::record(BatchId::new(state.next_id), purchase, &self.normalizer)?;
        state
            .batches
            .insert(batch.id, Arc::new(Mutex::new(batch.clone())));

        tracing::info!(
            batch = %batch.id,
            product = %batch.product_id,
            quantity = %batch.initial_quantity,
            cost_per_unit = %batch.cost_per_unit,
            "purchase recorded"
        );
        Ok(batch)
    }

    /// Snapshot of batches ordered by purchase timestamp ascending (oldest
    /// first), id breaking ties.
    ///
    /// This ordering is load-bearing: the consumption allocator walks it for
    /// FIFO depletion. Pass a product id to restrict the listing.
    #[must_use]
    pub fn list_batches(&self, product_id: Option<ProductId>) -> Vec<Batch> {
        let state = self.inner.read();
        let mut batches: Vec<Batch> = state
            .batches
            .values()
            .map(|slot| slot.lock().clone())
            .filter(|b| product_id.map_or(true, |p| b.product_id == p))
            .collect();
        batches.sort_by_key(Batch::fifo_key);
        batches
    }

    /// Snapshot of a single batch.
    pub fn batch(&self, id: BatchId) -> Result<Batch, StoreError> {
        let slot = self.slot(id)?;
        let batch = slot.lock().clone();
        Ok(batch)
    }

    /// Atomically reduce a batch's remaining quantity by exactly `amount`.
    ///
    /// Fails with [`BatchError::InsufficientQuantity`] when `amount` exceeds
    /// what is left; the batch is untouched on failure. Concurrent calls
    /// against the same batch are serialized by the per-batch mutex.
    pub fn decrement(&self, id: BatchId, amount: Decimal) -> Result<Batch, StoreError> {
        let slot = self.slot(id)?;
        let mut batch = slot.lock();
        batch.deplete(amount)?;
        tracing::debug!(
            batch = %id,
            amount = %amount,
            remaining = %batch.current_quantity(),
            "batch decremented"
        );
        Ok(batch.clone())
    }

    /// Atomically take up to `amount` from a batch, returning what was taken.
    ///
    /// The taken amount is `min(amount, current_quantity)`, decided under
    /// the same per-batch mutex that guards [`BatchStore::decrement`] — the
    /// allocator uses this so no other consumer can slip in between reading
    /// a batch's quantity and reducing it. Returns zero (and takes nothing)
    /// when the batch is already exhausted.
    pub fn decrement_up_to(&self, id: BatchId, amount: Decimal) -> Result<Decimal, StoreError> {
        if amount <= Decimal::ZERO {
            return Err(StoreError::Batch(BatchError::InvalidQuantity(amount)));
        }
        let slot = self.slot(id)?;
        let mut batch = slot.lock();
        let take = amount.min(batch.current_quantity());
        if take > Decimal::ZERO {
            batch.deplete(take)?;
            tracing::debug!(
                batch = %id,
                amount = %take,
                remaining = %batch.current_quantity(),
                "batch decremented"
            );
        }
        Ok(take)
    }

    /// Total quantity on hand for a product across all its batches.
    #[must_use]
    pub fn on_hand(&self, product_id: ProductId) -> Decimal {
        let state = self.inner.read();
        state
            .batches
            .values()
            .map(|slot| slot.lock().clone())
            .filter(|b| b.product_id == product_id)
            .map(|b| b.current_quantity())
            .sum()
    }

    fn slot(&self, id: BatchId) -> Result<Arc<Mutex<Batch>>, StoreError> {
        self.inner
            .read()
            .batches
            .get(&id)
            .cloned()
            .ok_or(StoreError::BatchNotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;
    use spoolstock_catalog::ProductDraft;
    use spoolstock_core::Currency;

    fn setup() -> (Arc<Catalog>, BatchStore, ProductId) {
        let catalog = Arc::new(Catalog::new());
        let cat = catalog.add_category("Filament").unwrap();
        let product = catalog
            .add_product(
                ProductDraft::for_category(cat.id)
                    .with_manufacturer("Prusament")
                    .with_material_type("PLA")
                    .with_color("Jet Black"),
            )
            .unwrap();
        let store = BatchStore::new(Arc::clone(&catalog), Normalizer::default());
        (catalog, store, product.id)
    }

    fn pln(product: ProductId, qty: Decimal) -> NewPurchase {
        NewPurchase::new(product, dec!(100.00), Currency::Pln, dec!(1), qty)
    }

    #[test]
    fn test_record_purchase() {
        let (_catalog, store, product) = setup();
        let batch = store.record_purchase(pln(product, dec!(1000))).unwrap();
        assert_eq!(batch.current_quantity(), dec!(1000));
        assert_eq!(batch.cost_per_unit, dec!(0.1));
        assert_eq!(store.batch(batch.id).unwrap(), batch);
    }

    #[test]
    fn test_record_purchase_unknown_product() {
        let (_catalog, store, _product) = setup();
        let err = store
            .record_purchase(pln(ProductId::new(99), dec!(10)))
            .unwrap_err();
        assert_eq!(err, StoreError::ProductNotFound(ProductId::new(99)));
    }

    #[test]
    fn test_record_purchase_invalid_quantity() {
        let (_catalog, store, product) = setup();
        let err = store.record_purchase(pln(product, dec!(0))).unwrap_err();
        assert_eq!(err, StoreError::Batch(BatchError::InvalidQuantity(dec!(0))));
    }

    #[test]
    fn test_list_batches_fifo_order() {
        let (_catalog, store, product) = setup();
        let t1 = Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap();
        let t2 = Utc.with_ymd_and_hms(2024, 2, 20, 12, 0, 0).unwrap();

        // Insert newest first; listing must come back oldest first
        let newer = store
            .record_purchase(pln(product, dec!(10)).at(t2))
            .unwrap();
        let older = store
            .record_purchase(pln(product, dec!(10)).at(t1))
            .unwrap();

        let listed = store.list_batches(Some(product));
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, older.id);
        assert_eq!(listed[1].id, newer.id);
    }

    #[test]
    fn test_list_batches_filters_by_product() {
        let (catalog, store, product) = setup();
        let other = catalog
            .add_product(
                ProductDraft::for_category(catalog.categories()[0].id)
                    .with_manufacturer("Devil Design")
                    .with_material_type("PETG")
                    .with_color("White"),
            )
            .unwrap();

        store.record_purchase(pln(product, dec!(10))).unwrap();
        store.record_purchase(pln(other.id, dec!(20))).unwrap();

        assert_eq!(store.list_batches(Some(product)).len(), 1);
        assert_eq!(store.list_batches(Some(other.id)).len(), 1);
        assert_eq!(store.list_batches(None).len(), 2);
    }

    #[test]
    fn test_decrement() {
        let (_catalog, store, product) = setup();
        let batch = store.record_purchase(pln(product, dec!(100))).unwrap();

        let after = store.decrement(batch.id, dec!(30)).unwrap();
        assert_eq!(after.current_quantity(), dec!(70));
        assert_eq!(store.on_hand(product), dec!(70));
    }

    #[test]
    fn test_decrement_insufficient() {
        let (_catalog, store, product) = setup();
        let batch = store.record_purchase(pln(product, dec!(100))).unwrap();

        let err = store.decrement(batch.id, dec!(100.5)).unwrap_err();
        assert_eq!(
            err,
            StoreError::Batch(BatchError::InsufficientQuantity {
                requested: dec!(100.5),
                available: dec!(100),
            })
        );
        // Untouched after the failure
        assert_eq!(store.on_hand(product), dec!(100));
    }

    #[test]
    fn test_decrement_unknown_batch() {
        let (_catalog, store, _product) = setup();
        let err = store.decrement(BatchId::new(7), dec!(1)).unwrap_err();
        assert_eq!(err, StoreError::BatchNotFound(BatchId::new(7)));
    }

    #[test]
    fn test_decrement_up_to_caps_at_remaining() {
        let (_catalog, store, product) = setup();
        let batch = store.record_purchase(pln(product, dec!(8))).unwrap();

        let taken = store.decrement_up_to(batch.id, dec!(10)).unwrap();
        assert_eq!(taken, dec!(8));
        assert!(store.batch(batch.id).unwrap().is_exhausted());

        // Exhausted batch yields zero, not an error
        let taken = store.decrement_up_to(batch.id, dec!(10)).unwrap();
        assert_eq!(taken, Decimal::ZERO);
    }

    #[test]
    fn test_decrement_up_to_rejects_nonpositive() {
        let (_catalog, store, product) = setup();
        let batch = store.record_purchase(pln(product, dec!(8))).unwrap();
        assert!(store.decrement_up_to(batch.id, dec!(0)).is_err());
        assert!(store.decrement_up_to(batch.id, dec!(-2)).is_err());
    }

    #[test]
    fn test_batches_are_never_deleted() {
        let (_catalog, store, product) = setup();
        let batch = store.record_purchase(pln(product, dec!(5))).unwrap();
        store.decrement(batch.id, dec!(5)).unwrap();

        // Exhausted but still listed: the audit trail survives
        let listed = store.list_batches(Some(product));
        assert_eq!(listed.len(), 1);
        assert!(listed[0].is_exhausted());
        assert_eq!(listed[0].initial_quantity, dec!(5));
    }
}
