//! Public read-only resource lookups used by page templates.

use axum::extract::{Path, State};
use axum::Json;
use indexmap::IndexMap;
use portal_db::models::resource::Resource;
use serde::Serialize;

use super::admin_resources::parse_category;
use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ResourceStatus {
    pub name: String,
    pub is_active: bool,
    pub is_effectively_active: bool,
}

/// GET /api/v1/resources/{name}/status
///
/// Unregistered names report as active.
pub async fn status(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<DataResponse<ResourceStatus>>> {
    let is_active = state.gate.is_active(&name).await?;
    let is_effectively_active = state.gate.effective_is_active(&name).await?;

    Ok(Json(DataResponse {
        data: ResourceStatus {
            name,
            is_active,
            is_effectively_active,
        },
    }))
}

/// GET /api/v1/resources/active/{category}
pub async fn active_in_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> AppResult<Json<DataResponse<Vec<Resource>>>> {
    let category = parse_category(&category)?;
    let resources = state.gate.list_by_category(category).await?;
    Ok(Json(DataResponse { data: resources }))
}

/// GET /api/v1/resources
///
/// Every resource grouped by category.
pub async fn grouped(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<IndexMap<String, Vec<Resource>>>>> {
    let grouped = state.gate.all_grouped_by_category().await?;
    Ok(Json(DataResponse { data: grouped }))
}
