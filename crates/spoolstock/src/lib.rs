//! Spoolstock: a batch ledger for consumable-materials inventory.
//!
//! Purchases are recorded as discrete batches — a product, a quantity, a
//! price in an arbitrary supported currency, an exchange rate to the base
//! currency — and every batch exposes a normalized unit cost fixed at
//! acquisition. Consumption depletes batches first-in-first-out and reports
//! a blended cost; reporting aggregates on-hand stock and weighted-average
//! costs.
//!
//! This crate is the transport-independent facade: an HTTP layer (or any
//! other collaborator) hands [`Warehouse`] plain structured requests and
//! gets back plain results or typed [`LedgerError`]s.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use spoolstock::{
//!     ConsumeRequest, LedgerConfig, ProductDraft, RecordPurchase, Warehouse,
//! };
//!
//! let warehouse = Warehouse::new(LedgerConfig::default());
//!
//! let category = warehouse.create_category("Filament").unwrap();
//! let product = warehouse
//!     .create_product(
//!         ProductDraft::for_category(category.id)
//!             .with_manufacturer("Prusament")
//!             .with_material_type("PLA")
//!             .with_color("Galaxy Black"),
//!     )
//!     .unwrap();
//!
//! // 1 kg spool for 20 EUR at 4.30 EUR/PLN
//! warehouse
//!     .record_purchase(RecordPurchase {
//!         product_id: product.id,
//!         vendor_name: Some("Prusa Store".to_string()),
//!         price: dec!(20.00),
//!         currency: "EUR".to_string(),
//!         exchange_rate: dec!(4.30),
//!         initial_quantity: dec!(1000),
//!         purchased_at: None,
//!     })
//!     .unwrap();
//!
//! // Print something using 250 g
//! let allocation = warehouse
//!     .consume(ConsumeRequest {
//!         product_id: product.id,
//!         quantity: dec!(250),
//!     })
//!     .unwrap();
//!
//! assert!(allocation.is_fully_satisfied());
//! assert_eq!(allocation.total_cost, dec!(21.5)); // 250 * 0.086
//! assert_eq!(warehouse.on_hand(product.id), dec!(750));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod requests;
mod warehouse;

pub use config::LedgerConfig;
pub use error::LedgerError;
pub use requests::{ConsumeRequest, RecordPurchase};
pub use warehouse::Warehouse;

// The full pipeline, re-exported for callers that want the pieces
pub use spoolstock_allocation::{allocate, Allocation, AllocationError, AllocationLine};
pub use spoolstock_catalog::{
    Catalog, CatalogError, Category, CategoryKind, Product, ProductDraft, ProductSpec,
};
pub use spoolstock_core::{
    Batch, BatchError, BatchId, CategoryId, Currency, NewPurchase, NormalizeError, Normalizer,
    ProductId,
};
pub use spoolstock_report::{
    batch_history, on_hand, stock_summary, weighted_average_cost, StockLine,
};
pub use spoolstock_store::{BatchStore, StoreError};

// Re-export commonly used external types
pub use chrono::{DateTime, Utc};
pub use rust_decimal::Decimal;
