//! MySQL-backed [`GameStore`] for L2J-style game server schemas.
//!
//! Expects the usual `accounts (login, password, accessLevel)` and
//! `characters (charId, char_name, level, account_name)` tables.

use async_trait::async_trait;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};

use crate::store::{GameCharacter, GameStore, StoreError};

/// Game server store over a MySQL connection pool.
#[derive(Clone)]
pub struct LineageStore {
    pool: MySqlPool,
}

impl LineageStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Connect to the game database.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = MySqlPoolOptions::new()
            .max_connections(4)
            .connect(database_url)
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl GameStore for LineageStore {
    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Ok(())
    }

    async fn find_character(&self, char_id: i64) -> Result<Option<GameCharacter>, StoreError> {
        let character = sqlx::query_as::<_, GameCharacter>(
            "SELECT CAST(charId AS SIGNED) AS char_id, char_name, \
                    CAST(level AS SIGNED) AS level, account_name \
             FROM characters WHERE charId = ?",
        )
        .bind(char_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(character)
    }

    async fn verify_ownership(&self, char_id: i64, account: &str) -> Result<bool, StoreError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM characters WHERE charId = ? AND account_name = ?",
        )
        .bind(char_id)
        .bind(account)
        .fetch_one(&self.pool)
        .await?;
        Ok(count > 0)
    }

    async fn transfer_ownership(&self, char_id: i64, account: &str) -> Result<bool, StoreError> {
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query("UPDATE characters SET account_name = ? WHERE charId = ?")
            .bind(account)
            .bind(char_id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() != 1 {
            tx.rollback().await?;
            tracing::warn!(char_id, account, "Character transfer matched no single row");
            return Ok(false);
        }

        tx.commit().await?;
        tracing::info!(char_id, account, "Character moved to account");
        Ok(true)
    }

    async fn account_exists(&self, login: &str) -> Result<bool, StoreError> {
        let found = sqlx::query_scalar::<_, String>("SELECT login FROM accounts WHERE login = ?")
            .bind(login)
            .fetch_optional(&self.pool)
            .await?;
        Ok(found.is_some())
    }

    async fn create_or_update_account(
        &self,
        login: &str,
        password_hash: &str,
    ) -> Result<bool, StoreError> {
        let result = sqlx::query(
            "INSERT INTO accounts (login, password, accessLevel) VALUES (?, ?, 0) \
             ON DUPLICATE KEY UPDATE password = VALUES(password)",
        )
        .bind(login)
        .bind(password_hash)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
