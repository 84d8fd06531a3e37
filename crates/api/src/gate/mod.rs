//! Resource gate: feature flags consulted on every request.
//!
//! [`ResourceGate`] combines the static [`GateConfig`] tables with the flags
//! stored in `system_resources`. Effective decisions are memoized in a
//! bounded TTL cache, so a flag flipped outside the admin endpoints becomes
//! visible after at most one TTL. The admin endpoints clear the cache
//! explicitly.

pub mod store;

use std::sync::Arc;

use indexmap::IndexMap;
use moka::future::Cache;
use portal_core::gate::{effective_active, GateConfig};
use portal_core::resources::ResourceCategory;
use portal_db::models::resource::Resource;

use crate::config::GateSettings;
use store::ResourceStore;

/// Outcome of checking a request path against the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// No resource gates this path.
    Unmapped,
    Allowed { resource: String },
    Blocked { resource: String },
}

impl GateDecision {
    pub fn is_blocked(&self) -> bool {
        matches!(self, GateDecision::Blocked { .. })
    }
}

pub struct ResourceGate {
    config: GateConfig,
    store: Arc<dyn ResourceStore>,
    /// resource name -> effective flag
    cache: Cache<String, bool>,
}

impl ResourceGate {
    pub fn new(config: GateConfig, store: Arc<dyn ResourceStore>, settings: &GateSettings) -> Self {
        let cache = Cache::builder()
            .max_capacity(settings.cache_capacity)
            .time_to_live(settings.cache_ttl)
            .build();

        Self {
            config,
            store,
            cache,
        }
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    pub fn store(&self) -> &dyn ResourceStore {
        self.store.as_ref()
    }

    /// Own flag only. Unregistered resources are active.
    pub async fn is_active(&self, name: &str) -> Result<bool, sqlx::Error> {
        Ok(self.store.find_flag(name).await?.unwrap_or(true))
    }

    /// Own flag combined with the direct parent's flag. Uncached.
    pub async fn effective_is_active(&self, name: &str) -> Result<bool, sqlx::Error> {
        if !self.is_active(name).await? {
            return Ok(false);
        }

        let Some(parent) = self.config.parent_of(name) else {
            return Ok(true);
        };
        let parent_active = self.is_active(parent).await?;
        if !parent_active {
            tracing::debug!(resource = name, parent, "Parent module inactive");
        }
        Ok(effective_active(true, Some(parent_active)))
    }

    /// [`Self::effective_is_active`] through the cache.
    pub async fn cached_effective_is_active(&self, name: &str) -> Result<bool, sqlx::Error> {
        self.cache
            .try_get_with(name.to_string(), self.effective_is_active(name))
            .await
            .map_err(|e: Arc<sqlx::Error>| {
                Arc::try_unwrap(e).unwrap_or_else(|shared| sqlx::Error::Protocol(shared.to_string()))
            })
    }

    /// Decide whether a request path may proceed.
    ///
    /// Storage errors are logged and treated as allowed.
    pub async fn check_path(&self, path: &str) -> GateDecision {
        let Some(resource) = self.config.resolve(path) else {
            return GateDecision::Unmapped;
        };
        let resource = resource.to_string();

        match self.cached_effective_is_active(&resource).await {
            Ok(true) => GateDecision::Allowed { resource },
            Ok(false) => GateDecision::Blocked { resource },
            Err(e) => {
                tracing::error!(path, resource, error = %e, "Resource check failed, allowing request");
                GateDecision::Allowed { resource }
            }
        }
    }

    /// Drop every cached decision.
    pub fn invalidate(&self) {
        self.cache.invalidate_all();
        tracing::debug!("Resource gate cache cleared");
    }

    /// Active resources of one category, by rank then display name.
    pub async fn list_by_category(
        &self,
        category: ResourceCategory,
    ) -> Result<Vec<Resource>, sqlx::Error> {
        self.store.list_by_category(category.as_str(), true).await
    }

    /// Every resource keyed by category, categories in storage order.
    pub async fn all_grouped_by_category(
        &self,
    ) -> Result<IndexMap<String, Vec<Resource>>, sqlx::Error> {
        let mut grouped: IndexMap<String, Vec<Resource>> = IndexMap::new();
        for resource in self.store.list_all().await? {
            grouped
                .entry(resource.category.clone())
                .or_default()
                .push(resource);
        }
        Ok(grouped)
    }
}
