//! Typed ids for catalog and ledger entities.
//!
//! Using distinct id types prevents accidentally passing a `ProductId` where
//! a `BatchId` is expected. Ids are plain `u64` sequence numbers assigned by
//! the store that owns the entity, so insertion order is recoverable from
//! the id alone.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Generate a typed id wrapper.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Create an id from a raw sequence number.
            #[must_use]
            pub const fn new(id: u64) -> Self {
                Self(id)
            }

            /// Get the raw sequence number.
            #[must_use]
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

typed_id!(CategoryId, "Unique identifier for a product category.");
typed_id!(ProductId, "Unique identifier for a product.");
typed_id!(BatchId, "Unique identifier for a purchase batch.");
