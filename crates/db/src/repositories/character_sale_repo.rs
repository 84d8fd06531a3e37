//! Repository for the `character_sales` table.

use portal_core::sale_status::SaleStatus;
use portal_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::character_sale::CharacterSale;

/// Column list for `character_sales` queries.
const COLUMNS: &str = "\
    id, char_id, char_name, char_level, seller_id, seller_name, price, \
    status, listed_at, updated_at";

/// Provides data access for marketplace character sales.
pub struct CharacterSaleRepo;

impl CharacterSaleRepo {
    /// Sales whose character is still held (`for_sale` or `pending`), oldest first.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<CharacterSale>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM character_sales \
             WHERE status = ANY($1) \
             ORDER BY listed_at, id"
        );
        sqlx::query_as::<_, CharacterSale>(&query)
            .bind(SaleStatus::ACTIVE)
            .fetch_all(pool)
            .await
    }

    /// Move an active sale to `cancelled`.
    ///
    /// Returns `false` when the sale does not exist or is no longer active.
    pub async fn cancel<'e>(executor: impl PgExecutor<'e>, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE character_sales SET status = $2, updated_at = NOW() \
             WHERE id = $1 AND status = ANY($3)",
        )
        .bind(id)
        .bind(SaleStatus::Cancelled.as_str())
        .bind(SaleStatus::ACTIVE)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
