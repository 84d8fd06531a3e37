#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use chrono::Utc;
use http_body_util::BodyExt;
use portal_core::catalog::DEFAULT_CATALOG;
use portal_core::gate::GateConfig;
use portal_core::types::DbId;
use portal_db::models::character_sale::CharacterSale;
use portal_db::models::resource::Resource;
use portal_marketplace::ledger::{LedgerError, SaleLedger};
use tower::ServiceExt;

use portal_api::auth::jwt::{sign, Claims, JwtConfig};
use portal_api::config::{GateSettings, ServerConfig};
use portal_api::gate::store::ResourceStore;
use portal_api::gate::ResourceGate;
use portal_api::router::build_app_router;
use portal_api::state::AppState;

// ---------------------------------------------------------------------------
// In-memory resource table
// ---------------------------------------------------------------------------

/// `system_resources` held in memory, seeded from the default catalog.
pub struct MemoryResourceStore {
    resources: Mutex<Vec<Resource>>,
    /// Number of single-flag reads served.
    pub flag_reads: AtomicUsize,
}

impl MemoryResourceStore {
    pub fn seeded() -> Self {
        let now = Utc::now();
        let resources = DEFAULT_CATALOG
            .iter()
            .enumerate()
            .map(|(i, entry)| Resource {
                id: i as DbId + 1,
                name: entry.name.to_string(),
                display_name: entry.display_name.to_string(),
                description: Some(entry.description.to_string()),
                is_active: true,
                category: entry.category.as_str().to_string(),
                icon: Some(entry.icon.to_string()),
                sort_order: entry.sort_order,
                created_at: now,
                updated_at: now,
            })
            .collect();

        Self {
            resources: Mutex::new(resources),
            flag_reads: AtomicUsize::new(0),
        }
    }

    /// Change a flag directly, as another process writing the table would.
    pub fn set_flag(&self, name: &str, is_active: bool) {
        let mut resources = self.resources.lock().unwrap();
        let resource = resources
            .iter_mut()
            .find(|r| r.name == name)
            .unwrap_or_else(|| panic!("{name} is not seeded"));
        resource.is_active = is_active;
    }

    pub fn flag(&self, name: &str) -> Option<bool> {
        self.resources
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.name == name)
            .map(|r| r.is_active)
    }

    pub fn reads(&self) -> usize {
        self.flag_reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ResourceStore for MemoryResourceStore {
    async fn health_check(&self) -> Result<(), sqlx::Error> {
        Ok(())
    }

    async fn find_flag(&self, name: &str) -> Result<Option<bool>, sqlx::Error> {
        self.flag_reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.flag(name))
    }

    async fn list_all(&self) -> Result<Vec<Resource>, sqlx::Error> {
        let mut all = self.resources.lock().unwrap().clone();
        all.sort_by(|a, b| {
            (&a.category, a.sort_order, &a.display_name).cmp(&(
                &b.category,
                b.sort_order,
                &b.display_name,
            ))
        });
        Ok(all)
    }

    async fn list_by_category(
        &self,
        category: &str,
        active_only: bool,
    ) -> Result<Vec<Resource>, sqlx::Error> {
        let mut matching: Vec<Resource> = self
            .resources
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.category == category && (!active_only || r.is_active))
            .cloned()
            .collect();
        matching.sort_by(|a, b| (a.sort_order, &a.display_name).cmp(&(b.sort_order, &b.display_name)));
        Ok(matching)
    }

    async fn toggle(&self, name: &str) -> Result<Option<Resource>, sqlx::Error> {
        let mut resources = self.resources.lock().unwrap();
        Ok(resources.iter_mut().find(|r| r.name == name).map(|r| {
            r.is_active = !r.is_active;
            r.updated_at = Utc::now();
            r.clone()
        }))
    }

    async fn set_active_many(
        &self,
        names: &[String],
        is_active: bool,
    ) -> Result<u64, sqlx::Error> {
        let mut updated = 0;
        for resource in self.resources.lock().unwrap().iter_mut() {
            if names.contains(&resource.name) && resource.is_active != is_active {
                resource.is_active = is_active;
                updated += 1;
            }
        }
        Ok(updated)
    }
}

// ---------------------------------------------------------------------------
// In-memory sales
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct MemoryLedger {
    pub sales: Vec<CharacterSale>,
}

#[async_trait]
impl SaleLedger for MemoryLedger {
    async fn list_active(&self) -> Result<Vec<CharacterSale>, LedgerError> {
        Ok(self
            .sales
            .iter()
            .filter(|s| s.status().is_some_and(|st| st.is_active()))
            .cloned()
            .collect())
    }

    async fn cancel(&self, sale_id: DbId) -> Result<(), LedgerError> {
        Err(LedgerError::NotActive(sale_id))
    }
}

pub fn sale(id: DbId, char_name: &str, status: &str) -> CharacterSale {
    let now = Utc::now();
    CharacterSale {
        id,
        char_id: id * 10,
        char_name: char_name.to_string(),
        char_level: 60,
        seller_id: 3,
        seller_name: "seller".to_string(),
        price: rust_decimal::Decimal::new(9990, 2),
        status: status.to_string(),
        listed_at: now,
        updated_at: now,
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

pub fn test_jwt() -> JwtConfig {
    JwtConfig {
        secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
    }
}

pub fn test_gate_settings() -> GateSettings {
    GateSettings {
        templates_dir: concat!(env!("CARGO_MANIFEST_DIR"), "/../../templates").into(),
        ..GateSettings::default()
    }
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: test_jwt(),
        gate: test_gate_settings(),
    }
}

/// Everything a test needs to poke at the app and its backing stores.
pub struct TestApp {
    pub state: AppState,
    pub store: Arc<MemoryResourceStore>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with(test_config(), MemoryLedger::default())
    }

    pub fn with(config: ServerConfig, ledger: MemoryLedger) -> Self {
        let store = Arc::new(MemoryResourceStore::seeded());
        let gate = ResourceGate::new(GateConfig::default(), store.clone(), &config.gate);
        let state = AppState {
            config: Arc::new(config),
            gate: Arc::new(gate),
            sales: Arc::new(ledger),
        };
        Self { state, store }
    }

    /// The full production router.
    pub fn router(&self) -> Router {
        build_app_router(self.state.clone(), &self.state.config)
    }
}

pub fn token(role: &str) -> String {
    sign(&Claims::new(1, role, chrono::Duration::minutes(15)), &test_jwt()).expect("token signing")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::get(uri)
        .header("Authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Authorization", format!("Bearer {token}"))
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

/// Sleep past a cache TTL.
pub async fn wait_past(ttl: Duration) {
    tokio::time::sleep(ttl + Duration::from_millis(100)).await;
}
