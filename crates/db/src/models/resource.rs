//! System resource (feature flag) model and DTOs.

use portal_core::catalog::CatalogEntry;
use portal_core::resources::ResourceCategory;
use portal_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `system_resources` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Resource {
    pub id: DbId,
    pub name: String,
    pub display_name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub category: String,
    pub icon: Option<String>,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for the idempotent seed upsert. New rows start active.
#[derive(Debug, Clone)]
pub struct UpsertResource {
    pub name: String,
    pub display_name: String,
    pub description: Option<String>,
    pub category: ResourceCategory,
    pub icon: Option<String>,
    pub sort_order: i32,
}

impl From<&CatalogEntry> for UpsertResource {
    fn from(entry: &CatalogEntry) -> Self {
        Self {
            name: entry.name.to_string(),
            display_name: entry.display_name.to_string(),
            description: Some(entry.description.to_string()),
            category: entry.category,
            icon: Some(entry.icon.to_string()),
            sort_order: entry.sort_order,
        }
    }
}
