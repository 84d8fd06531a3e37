//! Storage seam for resource flags.

use async_trait::async_trait;
use portal_db::models::resource::Resource;
use portal_db::repositories::ResourceRepo;
use portal_db::DbPool;

/// Read/write access to the `system_resources` table.
#[async_trait]
pub trait ResourceStore: Send + Sync {
    async fn health_check(&self) -> Result<(), sqlx::Error>;

    /// Own flag of a resource; `None` if it is not registered.
    async fn find_flag(&self, name: &str) -> Result<Option<bool>, sqlx::Error>;

    /// Every resource, ordered by category, rank and display name.
    async fn list_all(&self) -> Result<Vec<Resource>, sqlx::Error>;

    async fn list_by_category(
        &self,
        category: &str,
        active_only: bool,
    ) -> Result<Vec<Resource>, sqlx::Error>;

    /// Flip a resource's flag. `None` if it is not registered.
    async fn toggle(&self, name: &str) -> Result<Option<Resource>, sqlx::Error>;

    /// Set the flag on every named resource; returns how many changed.
    async fn set_active_many(&self, names: &[String], is_active: bool)
        -> Result<u64, sqlx::Error>;
}

/// [`ResourceStore`] over the portal PostgreSQL database.
#[derive(Clone)]
pub struct PgResourceStore {
    pool: DbPool,
}

impl PgResourceStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResourceStore for PgResourceStore {
    async fn health_check(&self) -> Result<(), sqlx::Error> {
        portal_db::health_check(&self.pool).await
    }

    async fn find_flag(&self, name: &str) -> Result<Option<bool>, sqlx::Error> {
        ResourceRepo::find_flag(&self.pool, name).await
    }

    async fn list_all(&self) -> Result<Vec<Resource>, sqlx::Error> {
        ResourceRepo::list_all(&self.pool).await
    }

    async fn list_by_category(
        &self,
        category: &str,
        active_only: bool,
    ) -> Result<Vec<Resource>, sqlx::Error> {
        ResourceRepo::list_by_category(&self.pool, category, active_only).await
    }

    async fn toggle(&self, name: &str) -> Result<Option<Resource>, sqlx::Error> {
        ResourceRepo::toggle(&self.pool, name).await
    }

    async fn set_active_many(
        &self,
        names: &[String],
        is_active: bool,
    ) -> Result<u64, sqlx::Error> {
        ResourceRepo::set_active_many(&self.pool, names, is_active).await
    }
}
