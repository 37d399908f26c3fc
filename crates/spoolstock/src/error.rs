//! The umbrella error type returned by the warehouse facade.

use thiserror::Error;

use spoolstock_allocation::AllocationError;
use spoolstock_catalog::CatalogError;
use spoolstock_core::NormalizeError;
use spoolstock_store::StoreError;

/// Any error the ledger can return.
///
/// Every variant is a value reported to the caller — nothing in the core is
/// fatal to the process, nothing is retried automatically, and nothing is
/// silently coerced. The transport layer decides how each kind maps to a
/// user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Bad currency, rate, or price.
    #[error(transparent)]
    Normalize(#[from] NormalizeError),
    /// Unknown category/product or missing variant fields.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    /// Unknown batch/product or a quantity violation.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// A consumption request that could not start.
    #[error(transparent)]
    Allocation(#[from] AllocationError),
}
