//! Purchase batch type and its quantity invariants.
//!
//! A [`Batch`] is one recorded purchase of a product. Each batch tracks its
//! remaining quantity independently and carries a unit cost in the base
//! currency fixed at acquisition time. Batches are never deleted; an
//! exhausted batch stays around as the audit trail of what was consumed.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::currency::{Currency, NormalizeError, Normalizer};
use crate::id::{BatchId, ProductId};

/// Error raised when recording or depleting a batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BatchError {
    /// A quantity that must be positive was zero or negative.
    #[error("quantity must be positive, got {0}")]
    InvalidQuantity(Decimal),
    /// A depletion asked for more than the batch has left.
    #[error("insufficient quantity: requested {requested}, available {available}")]
    InsufficientQuantity {
        /// The amount the caller asked to remove.
        requested: Decimal,
        /// What the batch actually has left.
        available: Decimal,
    },
    /// The price/currency/rate triple could not be normalized.
    #[error(transparent)]
    Normalize(#[from] NormalizeError),
}

/// The inputs needed to record a purchase batch.
///
/// # Examples
///
/// ```
/// use spoolstock_core::{Currency, NewPurchase, ProductId};
/// use rust_decimal_macros::dec;
///
/// let purchase = NewPurchase::new(
///     ProductId::new(1),
///     dec!(89.99),
///     Currency::Pln,
///     dec!(1),
///     dec!(1000),
/// )
/// .with_vendor("Prusa Store");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPurchase {
    /// The product the batch belongs to.
    pub product_id: ProductId,
    /// Optional vendor (shop) name.
    pub vendor: Option<String>,
    /// Unit price in the purchase currency.
    pub price: Decimal,
    /// The purchase currency.
    pub currency: Currency,
    /// Caller-supplied exchange rate to the base currency.
    /// Ignored (forced to 1) when `currency` is the base currency.
    pub exchange_rate: Decimal,
    /// Quantity purchased, in the product's unit.
    pub initial_quantity: Decimal,
    /// Purchase timestamp; defaults to now when `None`.
    pub purchased_at: Option<DateTime<Utc>>,
}

impl NewPurchase {
    /// Create a purchase with the required fields.
    #[must_use]
    pub const fn new(
        product_id: ProductId,
        price: Decimal,
        currency: Currency,
        exchange_rate: Decimal,
        initial_quantity: Decimal,
    ) -> Self {
        Self {
            product_id,
            vendor: None,
            price,
            currency,
            exchange_rate,
            initial_quantity,
            purchased_at: None,
        }
    }

    /// Set the vendor name.
    #[must_use]
    pub fn with_vendor(mut self, vendor: impl Into<String>) -> Self {
        self.vendor = Some(vendor.into());
        self
    }

    /// Set an explicit purchase timestamp.
    #[must_use]
    pub const fn at(mut self, purchased_at: DateTime<Utc>) -> Self {
        self.purchased_at = Some(purchased_at);
        self
    }
}

/// One recorded purchase of a product.
///
/// Invariants, enforced by this type rather than by callers:
///
/// - `current_quantity` starts at `initial_quantity`, only ever decreases,
///   and stays within `0 ..= initial_quantity`;
/// - `cost_per_unit == price * exchange_rate / initial_quantity`, computed
///   once at creation — later consumption never changes the historical unit
///   cost (valuation is acquisition cost, not replacement cost);
/// - `exchange_rate` is exactly 1 when the purchase currency is the base
///   currency;
/// - the product reference is immutable.
///
/// The only mutation a batch supports is [`Batch::deplete`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Batch {
    /// Unique batch id.
    pub id: BatchId,
    /// The product this batch holds stock of.
    pub product_id: ProductId,
    /// Vendor (shop) name, if recorded.
    pub vendor: Option<String>,
    /// When the purchase was made. FIFO consumption follows this, ascending.
    pub purchased_at: DateTime<Utc>,
    /// Quantity originally purchased.
    pub initial_quantity: Decimal,
    current_quantity: Decimal,
    /// Unit price in the original purchase currency.
    pub price: Decimal,
    /// The original purchase currency.
    pub currency: Currency,
    /// Effective exchange rate to the base currency (1 for the base itself).
    pub exchange_rate: Decimal,
    /// Cost of one unit in the base currency, fixed at acquisition.
    pub cost_per_unit: Decimal,
}

impl Batch {
    /// Record a new batch from a purchase.
    ///
    /// Validates the quantity and normalizes the price through `normalizer`,
    /// deriving the immutable `cost_per_unit`. The new batch starts with
    /// `current_quantity == initial_quantity`.
    pub fn record(
        id: BatchId,
        purchase: NewPurchase,
        normalizer: &Normalizer,
    ) -> Result<Self, BatchError> {
        if purchase.initial_quantity <= Decimal::ZERO {
            return Err(BatchError::InvalidQuantity(purchase.initial_quantity));
        }

        let exchange_rate =
            normalizer.effective_rate(purchase.currency, purchase.exchange_rate)?;
        let total_in_base =
            normalizer.normalize(purchase.price, purchase.currency, exchange_rate)?;
        let cost_per_unit = total_in_base / purchase.initial_quantity;

        Ok(Self {
            id,
            product_id: purchase.product_id,
            vendor: purchase.vendor,
            purchased_at: purchase.purchased_at.unwrap_or_else(Utc::now),
            initial_quantity: purchase.initial_quantity,
            current_quantity: purchase.initial_quantity,
            price: purchase.price,
            currency: purchase.currency,
            exchange_rate,
            cost_per_unit,
        })
    }

    /// Quantity still on hand in this batch.
    #[must_use]
    pub const fn current_quantity(&self) -> Decimal {
        self.current_quantity
    }

    /// Quantity already consumed from this batch.
    #[must_use]
    pub fn consumed(&self) -> Decimal {
        self.initial_quantity - self.current_quantity
    }

    /// Whether nothing is left in this batch.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.current_quantity.is_zero()
    }

    /// Value of the remaining quantity, in the base currency.
    #[must_use]
    pub fn remaining_value(&self) -> Decimal {
        self.current_quantity * self.cost_per_unit
    }

    /// The key batches are ordered by for FIFO consumption.
    ///
    /// The id breaks ties between batches recorded in the same instant;
    /// ids are assigned in insertion order.
    #[must_use]
    pub const fn fifo_key(&self) -> (DateTime<Utc>, BatchId) {
        (self.purchased_at, self.id)
    }

    /// Remove `amount` from the batch.
    ///
    /// Fails with [`BatchError::InvalidQuantity`] for non-positive amounts
    /// and [`BatchError::InsufficientQuantity`] when `amount` exceeds what
    /// is left. The quantity can never go negative.
    pub fn deplete(&mut self, amount: Decimal) -> Result<(), BatchError> {
        if amount <= Decimal::ZERO {
            return Err(BatchError::InvalidQuantity(amount));
        }
        if amount > self.current_quantity {
            return Err(BatchError::InsufficientQuantity {
                requested: amount,
                available: self.current_quantity,
            });
        }
        self.current_quantity -= amount;
        Ok(())
    }
}
