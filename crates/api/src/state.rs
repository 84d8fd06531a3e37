use std::sync::Arc;

use portal_marketplace::ledger::SaleLedger;

use crate::config::ServerConfig;
use crate::gate::ResourceGate;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub gate: Arc<ResourceGate>,
    /// Marketplace sale records.
    pub sales: Arc<dyn SaleLedger>,
}
