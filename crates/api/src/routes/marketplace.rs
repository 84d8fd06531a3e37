use axum::middleware::from_fn_with_state;
use axum::routing::get;
use axum::Router;
use portal_core::catalog::MARKETPLACE_RESOURCE;

use crate::handlers::marketplace;
use crate::middleware::guard::{require_resource, ResourceGuard};
use crate::state::AppState;

/// Marketplace routes, mounted at `/marketplace`.
///
/// ```text
/// GET  /sales                    open sales (guarded by marketplace_module)
/// ```
pub fn router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/sales", get(marketplace::list_sales))
        .route_layer(from_fn_with_state(
            ResourceGuard::new(state.clone(), MARKETPLACE_RESOURCE),
            require_resource,
        ))
}
