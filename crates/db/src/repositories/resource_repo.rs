//! Repository for the `system_resources` table.

use sqlx::PgPool;

use crate::models::resource::{Resource, UpsertResource};

/// Column list for `system_resources` queries.
const COLUMNS: &str = "\
    id, name, display_name, description, is_active, category, icon, \
    sort_order, created_at, updated_at";

/// Result of a seed upsert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Updated,
    Unchanged,
}

/// Provides data access for system resources.
pub struct ResourceRepo;

impl ResourceRepo {
    /// Read only the active flag. `None` when no such resource exists.
    pub async fn find_flag(pool: &PgPool, name: &str) -> Result<Option<bool>, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT is_active FROM system_resources WHERE name = $1")
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// All resources ordered by category, rank and display name.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Resource>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM system_resources \
             ORDER BY category, sort_order, display_name"
        );
        sqlx::query_as::<_, Resource>(&query).fetch_all(pool).await
    }

    /// Resources of one category ordered by rank and display name.
    pub async fn list_by_category(
        pool: &PgPool,
        category: &str,
        active_only: bool,
    ) -> Result<Vec<Resource>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM system_resources \
             WHERE category = $1 AND ($2 = FALSE OR is_active) \
             ORDER BY sort_order, display_name"
        );
        sqlx::query_as::<_, Resource>(&query)
            .bind(category)
            .bind(active_only)
            .fetch_all(pool)
            .await
    }

    /// Flip the active flag and return the updated row.
    pub async fn toggle(pool: &PgPool, name: &str) -> Result<Option<Resource>, sqlx::Error> {
        let query = format!(
            "UPDATE system_resources SET is_active = NOT is_active, updated_at = NOW() \
             WHERE name = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Resource>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Set the active flag on every named resource. Returns the rows updated.
    pub async fn set_active_many(
        pool: &PgPool,
        names: &[String],
        is_active: bool,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE system_resources SET is_active = $2, updated_at = NOW() \
             WHERE name = ANY($1) AND is_active <> $2",
        )
        .bind(names)
        .bind(is_active)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Insert a resource or refresh its descriptive fields.
    ///
    /// The active flag of an existing row is never touched, so re-seeding
    /// does not re-enable resources an administrator switched off.
    pub async fn upsert(pool: &PgPool, dto: &UpsertResource) -> Result<UpsertOutcome, sqlx::Error> {
        let inserted = sqlx::query_scalar::<_, bool>(
            "INSERT INTO system_resources \
                 (name, display_name, description, category, icon, sort_order) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             ON CONFLICT (name) DO UPDATE SET \
                 display_name = EXCLUDED.display_name, \
                 description = EXCLUDED.description, \
                 category = EXCLUDED.category, \
                 icon = EXCLUDED.icon, \
                 sort_order = EXCLUDED.sort_order, \
                 updated_at = NOW() \
             WHERE (system_resources.display_name, system_resources.description, \
                    system_resources.category, system_resources.icon, system_resources.sort_order) \
                 IS DISTINCT FROM \
                   (EXCLUDED.display_name, EXCLUDED.description, \
                    EXCLUDED.category, EXCLUDED.icon, EXCLUDED.sort_order) \
             RETURNING (xmax = 0)",
        )
        .bind(&dto.name)
        .bind(&dto.display_name)
        .bind(&dto.description)
        .bind(dto.category.as_str())
        .bind(&dto.icon)
        .bind(dto.sort_order)
        .fetch_optional(pool)
        .await?;

        Ok(match inserted {
            Some(true) => UpsertOutcome::Created,
            Some(false) => UpsertOutcome::Updated,
            None => UpsertOutcome::Unchanged,
        })
    }
}
