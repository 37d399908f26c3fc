//! Category and product catalog.
//!
//! The catalog is the reference data the batch ledger keys against:
//! categories carry an explicit variant tag ([`CategoryKind`]) and products
//! are a closed set of attribute variants ([`ProductSpec`]). The variant is
//! resolved from the category name once at write time and stored, never
//! re-derived by string matching on reads.
//!
//! # Example
//!
//! ```
//! use spoolstock_catalog::{Catalog, CategoryKind, ProductDraft};
//!
//! let catalog = Catalog::new();
//! let cat = catalog.add_category("Filament").unwrap();
//! assert_eq!(cat.kind, CategoryKind::Filament);
//!
//! let product = catalog
//!     .add_product(
//!         ProductDraft::for_category(cat.id)
//!             .with_manufacturer("Prusament")
//!             .with_material_type("PLA")
//!             .with_color("Galaxy Black"),
//!     )
//!     .unwrap();
//! assert_eq!(product.display_name(), "Prusament PLA Galaxy Black");
//! assert_eq!(product.unit(), "g");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod category;
mod product;

pub use category::{Category, CategoryKind};
pub use product::{Product, ProductDraft, ProductSpec};

use std::collections::BTreeMap;

use parking_lot::RwLock;
use thiserror::Error;

use spoolstock_core::{CategoryId, ProductId};

/// Error returned by catalog operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// The referenced category does not exist.
    #[error("category not found: {0}")]
    CategoryNotFound(CategoryId),
    /// The referenced product does not exist.
    #[error("product not found: {0}")]
    ProductNotFound(ProductId),
    /// A field required by the resolved variant is missing or blank.
    #[error("missing required field: {field}")]
    MissingField {
        /// Name of the missing field.
        field: &'static str,
    },
}

#[derive(Debug, Default)]
struct CatalogState {
    categories: BTreeMap<CategoryId, Category>,
    products: BTreeMap<ProductId, Product>,
    next_category: u64,
    next_product: u64,
}

/// The catalog of categories and products.
///
/// Categories can be created and renamed; products are created once and
/// immutable afterward (category reassignment is not offered, so no batch
/// can be orphaned). All reads return snapshots.
#[derive(Debug, Default)]
pub struct Catalog {
    inner: RwLock<CatalogState>,
}

impl Catalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a category, resolving its variant tag from the name.
    ///
    /// A blank name is rejected with [`CatalogError::MissingField`].
    pub fn add_category(&self, name: &str) -> Result<Category, CatalogError> {
        let name = require_text(Some(name.to_string()), "name")?;

        let mut state = self.inner.write();
        state.next_category += 1;
        let category = Category::new(CategoryId::new(state.next_category), name);
        state.categories.insert(category.id, category.clone());
        Ok(category)
    }

    /// Rename a category.
    ///
    /// Rename is a write, so the variant tag is re-resolved from the new
    /// name. Existing products keep the variant they were created with.
    pub fn rename_category(&self, id: CategoryId, name: &str) -> Result<Category, CatalogError> {
        let name = require_text(Some(name.to_string()), "name")?;

        let mut state = self.inner.write();
        let category = state
            .categories
            .get_mut(&id)
            .ok_or(CatalogError::CategoryNotFound(id))?;
        category.rename(name);
        Ok(category.clone())
    }

    /// Look up a category by id.
    pub fn category(&self, id: CategoryId) -> Result<Category, CatalogError> {
        self.inner
            .read()
            .categories
            .get(&id)
            .cloned()
            .ok_or(CatalogError::CategoryNotFound(id))
    }

    /// All categories, ordered by id.
    #[must_use]
    pub fn categories(&self) -> Vec<Category> {
        self.inner.read().categories.values().cloned().collect()
    }

    /// Create a product from a draft.
    ///
    /// The category's stored variant tag decides which fields the draft must
    /// provide: filament categories require manufacturer, material type and
    /// color; everything else requires a name and a unit. Fields belonging
    /// to the other variant are ignored.
    pub fn add_product(&self, draft: ProductDraft) -> Result<Product, CatalogError> {
        let mut state = self.inner.write();

        let kind = state
            .categories
            .get(&draft.category_id)
            .ok_or(CatalogError::CategoryNotFound(draft.category_id))?
            .kind;

        let spec = match kind {
            CategoryKind::Filament => ProductSpec::Filament {
                manufacturer: require_text(draft.manufacturer, "manufacturer")?,
                material_type: require_text(draft.material_type, "materialType")?,
                color: require_text(draft.color, "color")?,
            },
            CategoryKind::Standard => ProductSpec::Standard {
                name: require_text(draft.name, "name")?,
                unit: require_text(draft.unit, "unit")?,
            },
        };

        state.next_product += 1;
        let product = Product {
            id: ProductId::new(state.next_product),
            category_id: draft.category_id,
            spec,
        };
        state.products.insert(product.id, product.clone());
        Ok(product)
    }

    /// Look up a product by id.
    pub fn product(&self, id: ProductId) -> Result<Product, CatalogError> {
        self.inner
            .read()
            .products
            .get(&id)
            .cloned()
            .ok_or(CatalogError::ProductNotFound(id))
    }

    /// Whether a product with this id exists.
    #[must_use]
    pub fn contains_product(&self, id: ProductId) -> bool {
        self.inner.read().products.contains_key(&id)
    }

    /// All products, ordered by id.
    #[must_use]
    pub fn products(&self) -> Vec<Product> {
        self.inner.read().products.values().cloned().collect()
    }
}

/// Require a non-blank text field, trimming surrounding whitespace.
fn require_text(value: Option<String>, field: &'static str) -> Result<String, CatalogError> {
    match value {
        Some(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Err(CatalogError::MissingField { field })
            } else {
                Ok(trimmed.to_string())
            }
        }
        None => Err(CatalogError::MissingField { field }),
    }
}
