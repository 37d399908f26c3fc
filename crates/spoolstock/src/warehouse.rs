//! The warehouse facade wiring catalog, store, allocator and reports.

use std::sync::Arc;

use rust_decimal::Decimal;

use spoolstock_allocation::{allocate, Allocation};
use spoolstock_catalog::{Catalog, Category, Product, ProductDraft};
use spoolstock_core::{Batch, CategoryId, Currency, NewPurchase, Normalizer, ProductId};
use spoolstock_report::{stock_summary, StockLine};
use spoolstock_store::BatchStore;

use crate::config::LedgerConfig;
use crate::error::LedgerError;
use crate::requests::{ConsumeRequest, RecordPurchase};

/// The ledger's service facade.
///
/// One `Warehouse` owns a catalog and a batch store and exposes the full
/// request/response contract: category and product management, purchase
/// recording, FIFO consumption, and stock reports. It is `Send + Sync`;
/// clones of the inner state are never handed out, only snapshots.
#[derive(Debug)]
pub struct Warehouse {
    config: LedgerConfig,
    catalog: Arc<Catalog>,
    store: Arc<BatchStore>,
}

impl Default for Warehouse {
    fn default() -> Self {
        Self::new(LedgerConfig::default())
    }
}

impl Warehouse {
    /// Create an empty warehouse with the given configuration.
    #[must_use]
    pub fn new(config: LedgerConfig) -> Self {
        let catalog = Arc::new(Catalog::new());
        let store = Arc::new(BatchStore::new(
            Arc::clone(&catalog),
            Normalizer::new(config.base_currency),
        ));
        Self {
            config,
            catalog,
            store,
        }
    }

    /// The configuration this warehouse was created with.
    #[must_use]
    pub const fn config(&self) -> LedgerConfig {
        self.config
    }

    // ------------------------------------------------------------------
    // Categories
    // ------------------------------------------------------------------

    /// Create a product category.
    pub fn create_category(&self, name: &str) -> Result<Category, LedgerError> {
        let category = self.catalog.add_category(name)?;
        tracing::info!(category = %category.id, name = %category.name, "category created");
        Ok(category)
    }

    /// Rename a category, re-resolving its variant tag.
    pub fn rename_category(&self, id: CategoryId, name: &str) -> Result<Category, LedgerError> {
        let category = self.catalog.rename_category(id, name)?;
        tracing::info!(category = %id, name = %category.name, "category renamed");
        Ok(category)
    }

    /// All categories.
    #[must_use]
    pub fn categories(&self) -> Vec<Category> {
        self.catalog.categories()
    }

    // ------------------------------------------------------------------
    // Products
    // ------------------------------------------------------------------

    /// Create a product from a draft, validating the variant's field set.
    pub fn create_product(&self, draft: ProductDraft) -> Result<Product, LedgerError> {
        let product = self.catalog.add_product(draft)?;
        tracing::info!(product = %product.id, name = %product.display_name(), "product created");
        Ok(product)
    }

    /// Look up a product.
    pub fn product(&self, id: ProductId) -> Result<Product, LedgerError> {
        Ok(self.catalog.product(id)?)
    }

    /// All products.
    #[must_use]
    pub fn products(&self) -> Vec<Product> {
        self.catalog.products()
    }

    // ------------------------------------------------------------------
    // Purchases
    // ------------------------------------------------------------------

    /// Record a purchase as a new batch.
    ///
    /// The currency code is parsed here, so an unknown code is rejected
    /// before anything touches the store.
    pub fn record_purchase(&self, request: RecordPurchase) -> Result<Batch, LedgerError> {
        let currency: Currency = request.currency.parse()?;
        let mut purchase = NewPurchase::new(
            request.product_id,
            request.price,
            currency,
            request.exchange_rate,
            request.initial_quantity,
        );
        purchase.vendor = request.vendor_name;
        purchase.purchased_at = request.purchased_at;

        Ok(self.store.record_purchase(purchase)?)
    }

    /// All recorded batches, oldest first.
    #[must_use]
    pub fn purchases(&self) -> Vec<Batch> {
        self.store.list_batches(None)
    }

    // ------------------------------------------------------------------
    // Consumption
    // ------------------------------------------------------------------

    /// Consume material FIFO, returning the per-batch cost breakdown.
    ///
    /// A shortfall is reported in the result, not as an error; batches
    /// depleted before the stock ran out stay depleted.
    pub fn consume(&self, request: ConsumeRequest) -> Result<Allocation, LedgerError> {
        let allocation = allocate(&self.store, request.product_id, request.quantity)?;
        tracing::info!(
            product = %request.product_id,
            requested = %request.quantity,
            total_cost = %allocation.total_cost,
            shortfall = %allocation.shortfall,
            "stock consumed"
        );
        Ok(allocation)
    }

    // ------------------------------------------------------------------
    // Reports
    // ------------------------------------------------------------------

    /// Current on-hand quantity for a product.
    #[must_use]
    pub fn on_hand(&self, product_id: ProductId) -> Decimal {
        spoolstock_report::on_hand(&self.store, product_id)
    }

    /// Weighted-average unit cost of a product's remaining stock.
    #[must_use]
    pub fn weighted_average_cost(&self, product_id: ProductId) -> Option<Decimal> {
        spoolstock_report::weighted_average_cost(&self.store, product_id)
    }

    /// Full batch history for a product, exhausted batches included.
    #[must_use]
    pub fn batch_history(&self, product_id: ProductId) -> Vec<Batch> {
        spoolstock_report::batch_history(&self.store, product_id)
    }

    /// Catalog-joined stock summary, one line per product.
    #[must_use]
    pub fn stock_summary(&self) -> Vec<StockLine> {
        stock_summary(&self.store, &self.catalog)
    }
}
