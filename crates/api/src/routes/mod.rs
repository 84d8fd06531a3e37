pub mod health;
pub mod marketplace;
pub mod resources;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /resources                                   grouped list (public)
/// /resources/{name}/status                     flag lookup (public)
/// /resources/active/{category}                 active by category (public)
///
/// /admin/resources                             dashboard (staff/admin)
/// /admin/resources/category/{category}         category detail
/// /admin/resources/{name}/toggle               flip flag (POST)
/// /admin/resources/bulk                        set many flags (POST)
///
/// /marketplace/sales                           open sales (resource-guarded)
/// ```
pub fn api_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .nest("/resources", resources::public_router())
        .nest("/admin/resources", resources::admin_router())
        .nest("/marketplace", marketplace::router(state))
}
