//! Product type, its attribute variants, and the creation draft.

use serde::{Deserialize, Serialize};

use spoolstock_core::{CategoryId, ProductId};

/// Filament quantities are tracked in grams; the form never asks for a unit.
const FILAMENT_UNIT: &str = "g";

/// The attribute set of a product, decided by its category's variant tag.
///
/// This is a closed set of variants, not open-ended fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "variant", rename_all = "camelCase")]
pub enum ProductSpec {
    /// Generic product with a free-form unit (g, ml, piece, hour).
    #[serde(rename_all = "camelCase")]
    Standard {
        /// Display name.
        name: String,
        /// Unit of measure.
        unit: String,
    },
    /// 3D-printing filament.
    #[serde(rename_all = "camelCase")]
    Filament {
        /// Manufacturer name.
        manufacturer: String,
        /// Material type (PLA, PETG, ASA, ...).
        material_type: String,
        /// Color.
        color: String,
    },
}

impl ProductSpec {
    /// The name shown in stock listings.
    #[must_use]
    pub fn display_name(&self) -> String {
        match self {
            Self::Standard { name, .. } => name.clone(),
            Self::Filament {
                manufacturer,
                material_type,
                color,
            } => format!("{manufacturer} {material_type} {color}"),
        }
    }

    /// The unit quantities of this product are measured in.
    #[must_use]
    pub fn unit(&self) -> &str {
        match self {
            Self::Standard { unit, .. } => unit,
            Self::Filament { .. } => FILAMENT_UNIT,
        }
    }
}

/// A product in the catalog.
///
/// Products are immutable once created; in particular the category
/// reference never changes, so no batch can end up orphaned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product id.
    pub id: ProductId,
    /// The category this product belongs to.
    pub category_id: CategoryId,
    /// The variant-specific attributes.
    pub spec: ProductSpec,
}

impl Product {
    /// The name shown in stock listings.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.spec.display_name()
    }

    /// The unit quantities of this product are measured in.
    #[must_use]
    pub fn unit(&self) -> &str {
        self.spec.unit()
    }
}

/// A plain structured product-creation request.
///
/// All variant fields are optional, mirroring the creation form: the
/// catalog resolves the category's variant tag and then requires that
/// variant's field set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    /// The category the product will belong to.
    pub category_id: CategoryId,
    /// Display name (standard variant).
    #[serde(default)]
    pub name: Option<String>,
    /// Unit of measure (standard variant).
    #[serde(default)]
    pub unit: Option<String>,
    /// Manufacturer (filament variant).
    #[serde(default)]
    pub manufacturer: Option<String>,
    /// Material type (filament variant).
    #[serde(default)]
    pub material_type: Option<String>,
    /// Color (filament variant).
    #[serde(default)]
    pub color: Option<String>,
}

impl ProductDraft {
    /// Start a draft for the given category.
    #[must_use]
    pub const fn for_category(category_id: CategoryId) -> Self {
        Self {
            category_id,
            name: None,
            unit: None,
            manufacturer: None,
            material_type: None,
            color: None,
        }
    }

    /// Set the display name (standard variant).
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the unit (standard variant).
    #[must_use]
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Set the manufacturer (filament variant).
    #[must_use]
    pub fn with_manufacturer(mut self, manufacturer: impl Into<String>) -> Self {
        self.manufacturer = Some(manufacturer.into());
        self
    }

    /// Set the material type (filament variant).
    #[must_use]
    pub fn with_material_type(mut self, material_type: impl Into<String>) -> Self {
        self.material_type = Some(material_type.into());
        self
    }

    /// Set the color (filament variant).
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}
