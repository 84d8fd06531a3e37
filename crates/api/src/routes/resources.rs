use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{admin_resources, resources};
use crate::state::AppState;

/// Public resource lookups, mounted at `/resources`.
///
/// ```text
/// GET  /                         all resources grouped by category
/// GET  /{name}/status            own and effective flag
/// GET  /active/{category}        active resources of a category
/// ```
pub fn public_router() -> Router<AppState> {
    Router::new()
        .route("/", get(resources::grouped))
        .route("/{name}/status", get(resources::status))
        .route("/active/{category}", get(resources::active_in_category))
}

/// Resource management, mounted at `/admin/resources`.
///
/// ```text
/// GET  /                         dashboard
/// GET  /category/{category}      one category, active or not
/// POST /{name}/toggle            flip one flag
/// POST /bulk                     set flags on many resources
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/", get(admin_resources::dashboard))
        .route("/category/{category}", get(admin_resources::by_category))
        .route("/{name}/toggle", post(admin_resources::toggle))
        .route("/bulk", post(admin_resources::bulk_update))
}
