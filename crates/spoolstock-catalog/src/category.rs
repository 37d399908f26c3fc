//! Category type and its variant tag.

use serde::{Deserialize, Serialize};
use std::fmt;

use spoolstock_core::CategoryId;

/// Which attribute schema products of a category use.
///
/// This is the explicit variant tag resolved from the category name at
/// write time. Reads consult the tag, never the name, so renaming a
/// category's display text cannot silently change how its products parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CategoryKind {
    /// Generic product: free-form name and unit.
    #[default]
    Standard,
    /// 3D-printing filament: manufacturer, material type, color; unit is grams.
    Filament,
}

impl CategoryKind {
    /// Resolve the variant tag from a category name.
    ///
    /// The comparison is case-insensitive, matching how the legacy UI
    /// selected the filament form.
    #[must_use]
    pub fn resolve(name: &str) -> Self {
        if name.trim().eq_ignore_ascii_case("filament") {
            Self::Filament
        } else {
            Self::Standard
        }
    }
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard => write!(f, "standard"),
            Self::Filament => write!(f, "filament"),
        }
    }
}

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique category id.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// The variant tag, resolved from the name at the last write.
    pub kind: CategoryKind,
}

impl Category {
    /// Create a category, resolving its kind from the name.
    #[must_use]
    pub fn new(id: CategoryId, name: impl Into<String>) -> Self {
        let name = name.into();
        let kind = CategoryKind::resolve(&name);
        Self { id, name, kind }
    }

    /// Rename the category, re-resolving the kind.
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.kind = CategoryKind::resolve(&self.name);
    }
}
