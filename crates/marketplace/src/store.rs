//! Interface to the game server's account and character tables.

use async_trait::async_trait;

/// A character row as seen by the marketplace.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct GameCharacter {
    pub char_id: i64,
    pub char_name: String,
    pub level: i64,
    pub account_name: String,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Game database unavailable: {0}")]
    Unavailable(String),

    #[error("Game database query failed: {0}")]
    Query(#[from] sqlx::Error),
}

/// Read/write access to the game server database.
///
/// The game server runs independently; a character may move or disappear
/// between a read and a subsequent write.
#[async_trait]
pub trait GameStore: Send + Sync {
    /// Confirm the store is reachable.
    async fn ping(&self) -> Result<(), StoreError>;

    async fn find_character(&self, char_id: i64) -> Result<Option<GameCharacter>, StoreError>;

    /// Whether `char_id` currently belongs to `account`.
    async fn verify_ownership(&self, char_id: i64, account: &str) -> Result<bool, StoreError>;

    /// Move a character to another account. `false` if nothing was moved.
    async fn transfer_ownership(&self, char_id: i64, account: &str) -> Result<bool, StoreError>;

    /// Exact login-name lookup.
    async fn account_exists(&self, login: &str) -> Result<bool, StoreError>;

    /// Insert the account or replace its password hash.
    async fn create_or_update_account(
        &self,
        login: &str,
        password_hash: &str,
    ) -> Result<bool, StoreError>;
}
