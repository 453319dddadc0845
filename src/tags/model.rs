/// The tag entity as reported by the tagging service.
use std::fmt;

use serde::{Deserialize, Serialize};

/// A label attachable to inventory objects, scoped under a category.
///
/// Read-only here; the service owns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Opaque unique identifier (e.g., `urn:vmomi:InventoryServiceTag:...`).
    pub id: String,
    /// Display name, unique only within its category.
    pub name: String,
    /// Free-form description; empty when unset.
    #[serde(default)]
    pub description: String,
    /// ID of the owning category.
    pub category_id: String,
    /// References to the objects this tag is attached to.
    #[serde(default)]
    pub used_by: Vec<String>,
}

impl Tag {
    /// `UsedBy` rendered as a bracketed, space-separated list.
    #[must_use]
    pub fn used_by_display(&self) -> UsedBy<'_> {
        UsedBy(&self.used_by)
    }
}

/// Display adapter for a tag's `used_by` list: `[a b c]`, or `[]` when empty.
pub struct UsedBy<'a>(&'a [String]);

impl fmt::Display for UsedBy<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, item) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(item)?;
        }
        f.write_str("]")
    }
}
