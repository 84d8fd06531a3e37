//! Portal-side sale records.

use async_trait::async_trait;
use portal_core::types::DbId;
use portal_db::models::character_sale::CharacterSale;
use portal_db::repositories::CharacterSaleRepo;
use portal_db::DbPool;

#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("Sale #{0} is no longer active")]
    NotActive(DbId),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Sale records owned by the portal.
#[async_trait]
pub trait SaleLedger: Send + Sync {
    /// Sales in `for_sale` or `pending` status.
    async fn list_active(&self) -> Result<Vec<CharacterSale>, LedgerError>;

    /// Cancel one sale in its own transaction.
    async fn cancel(&self, sale_id: DbId) -> Result<(), LedgerError>;
}

/// [`SaleLedger`] over the portal PostgreSQL database.
#[derive(Clone)]
pub struct PgSaleLedger {
    pool: DbPool,
}

impl PgSaleLedger {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SaleLedger for PgSaleLedger {
    async fn list_active(&self) -> Result<Vec<CharacterSale>, LedgerError> {
        Ok(CharacterSaleRepo::list_active(&self.pool).await?)
    }

    async fn cancel(&self, sale_id: DbId) -> Result<(), LedgerError> {
        let mut tx = self.pool.begin().await?;
        if !CharacterSaleRepo::cancel(&mut *tx, sale_id).await? {
            tx.rollback().await?;
            return Err(LedgerError::NotActive(sale_id));
        }
        tx.commit().await?;
        Ok(())
    }
}
