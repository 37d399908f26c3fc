//! Core types for spoolstock
//!
//! This crate provides the fundamental types used throughout the spoolstock
//! workspace:
//!
//! - [`Currency`] - The closed set of supported purchase currencies
//! - [`Normalizer`] - Converts foreign-currency prices into the base currency
//! - [`Batch`] - One recorded purchase, tracked for remaining quantity and cost
//! - [`NewPurchase`] - The inputs needed to record a batch
//! - Typed ids ([`CategoryId`], [`ProductId`], [`BatchId`])
//!
//! # Example
//!
//! ```
//! use spoolstock_core::{Batch, BatchId, Currency, NewPurchase, Normalizer, ProductId};
//! use rust_decimal_macros::dec;
//!
//! let fx = Normalizer::default(); // base currency PLN
//!
//! // Record a 1000 g spool bought for 20 EUR at 4.30 EUR/PLN
//! let purchase = NewPurchase::new(
//!     ProductId::new(1),
//!     dec!(20.00),
//!     Currency::Eur,
//!     dec!(4.30),
//!     dec!(1000),
//! );
//! let mut batch = Batch::record(BatchId::new(1), purchase, &fx).unwrap();
//!
//! assert_eq!(batch.current_quantity(), dec!(1000));
//! assert_eq!(batch.cost_per_unit, dec!(0.086)); // 20 * 4.30 / 1000
//!
//! // Consume 250 g
//! batch.deplete(dec!(250)).unwrap();
//! assert_eq!(batch.current_quantity(), dec!(750));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod batch;
pub mod currency;
pub mod id;

pub use batch::{Batch, BatchError, NewPurchase};
pub use currency::{Currency, NormalizeError, Normalizer};
pub use id::{BatchId, CategoryId, ProductId};

// Re-export commonly used external types
pub use chrono::{DateTime, Utc};
pub use rust_decimal::Decimal;
