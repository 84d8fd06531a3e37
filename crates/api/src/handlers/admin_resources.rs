//! Handlers for `/admin/resources` (feature flag management).
//!
//! All handlers require the `admin` or `staff` role via [`RequireElevated`].

use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::Json;
use indexmap::IndexMap;
use portal_core::error::CoreError;
use portal_core::gate::{effective_active, GateConfig};
use portal_core::resources::ResourceCategory;
use portal_db::models::resource::Resource;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireElevated;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// A resource annotated with its position in the module hierarchy.
#[derive(Debug, Serialize)]
pub struct ResourceView {
    #[serde(flatten)]
    pub resource: Resource,
    pub is_master: bool,
    pub parent_module: Option<String>,
    pub is_parent_active: bool,
    pub is_effectively_active: bool,
}

/// Counts over the top-level modules only.
#[derive(Debug, Serialize, PartialEq)]
pub struct MasterStats {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
    /// Share of active master modules, rounded to one decimal.
    pub percentage: f64,
}

#[derive(Debug, Serialize)]
pub struct ResourceDashboard {
    pub resources_by_category: IndexMap<String, Vec<ResourceView>>,
    pub master_stats: MasterStats,
}

#[derive(Debug, Serialize)]
pub struct CategoryResources {
    pub category: ResourceCategory,
    pub total: usize,
    pub active: usize,
    pub resources: Vec<Resource>,
}

/// Body of the toggle response, kept flat for the dashboard's AJAX calls.
#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub success: bool,
    pub is_active: bool,
    pub message: String,
}

/// Request body for `POST /admin/resources/bulk`.
#[derive(Debug, Deserialize)]
pub struct BulkUpdateRequest {
    pub names: Vec<String>,
    pub is_active: bool,
}

#[derive(Debug, Serialize)]
pub struct BulkUpdateResult {
    pub updated: u64,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

pub(crate) fn parse_category(raw: &str) -> AppResult<ResourceCategory> {
    ResourceCategory::from_str(raw).ok_or_else(|| {
        AppError::Core(CoreError::Validation(format!(
            "Unknown category '{raw}'. Expected one of: {}",
            ResourceCategory::ALL.join(", ")
        )))
    })
}

fn master_stats(resources: &[Resource], config: &GateConfig) -> MasterStats {
    let masters: Vec<&Resource> = resources.iter().filter(|r| config.is_master(&r.name)).collect();
    let total = masters.len();
    let active = masters.iter().filter(|r| r.is_active).count();
    let percentage = if total == 0 {
        0.0
    } else {
        (active as f64 / total as f64 * 1000.0).round() / 10.0
    };

    MasterStats {
        total,
        active,
        inactive: total - active,
        percentage,
    }
}

/// Annotate every resource using flags from the same snapshot.
///
/// A parent module that is not registered counts as active.
fn annotate(resources: Vec<Resource>, config: &GateConfig) -> IndexMap<String, Vec<ResourceView>> {
    let flags: HashMap<String, bool> = resources
        .iter()
        .map(|r| (r.name.clone(), r.is_active))
        .collect();

    let mut grouped: IndexMap<String, Vec<ResourceView>> = IndexMap::new();
    for resource in resources {
        let parent_module = config.parent_of(&resource.name).map(str::to_string);
        let parent_flag = parent_module
            .as_deref()
            .map(|p| flags.get(p).copied().unwrap_or(true));
        let view = ResourceView {
            is_master: config.is_master(&resource.name),
            is_parent_active: parent_flag.unwrap_or(true),
            is_effectively_active: effective_active(resource.is_active, parent_flag),
            parent_module,
            resource,
        };
        grouped
            .entry(view.resource.category.clone())
            .or_default()
            .push(view);
    }
    grouped
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/resources
///
/// All resources grouped by category with hierarchy annotations and master
/// module statistics.
pub async fn dashboard(
    State(state): State<AppState>,
    RequireElevated(_user): RequireElevated,
) -> AppResult<Json<DataResponse<ResourceDashboard>>> {
    let config = state.gate.config();
    let resources = state.gate.store().list_all().await?;
    let master_stats = master_stats(&resources, config);

    Ok(Json(DataResponse {
        data: ResourceDashboard {
            resources_by_category: annotate(resources, config),
            master_stats,
        },
    }))
}

/// GET /api/v1/admin/resources/category/{category}
///
/// All resources of one category, active or not.
pub async fn by_category(
    State(state): State<AppState>,
    RequireElevated(_user): RequireElevated,
    Path(category): Path<String>,
) -> AppResult<Json<DataResponse<CategoryResources>>> {
    let category = parse_category(&category)?;
    let resources = state
        .gate
        .store()
        .list_by_category(category.as_str(), false)
        .await?;

    if resources.is_empty() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "resource category",
            key: category.to_string(),
        }));
    }

    Ok(Json(DataResponse {
        data: CategoryResources {
            category,
            total: resources.len(),
            active: resources.iter().filter(|r| r.is_active).count(),
            resources,
        },
    }))
}

/// POST /api/v1/admin/resources/{name}/toggle
///
/// Flip a resource's flag and clear the gate cache.
pub async fn toggle(
    State(state): State<AppState>,
    RequireElevated(user): RequireElevated,
    Path(name): Path<String>,
) -> AppResult<Json<ToggleResponse>> {
    let resource = state
        .gate
        .store()
        .toggle(&name)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "resource",
                key: name.clone(),
            })
        })?;
    state.gate.invalidate();

    tracing::info!(
        resource = %resource.name,
        is_active = resource.is_active,
        user_id = user.user_id,
        "Resource toggled"
    );

    let verb = if resource.is_active {
        "activated"
    } else {
        "deactivated"
    };
    Ok(Json(ToggleResponse {
        success: true,
        is_active: resource.is_active,
        message: format!("Resource {verb} successfully."),
    }))
}

/// POST /api/v1/admin/resources/bulk
///
/// Set the flag on every listed resource and clear the gate cache.
pub async fn bulk_update(
    State(state): State<AppState>,
    RequireElevated(user): RequireElevated,
    Json(input): Json<BulkUpdateRequest>,
) -> AppResult<Json<DataResponse<BulkUpdateResult>>> {
    if input.names.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "names must not be empty".into(),
        )));
    }

    let updated = state
        .gate
        .store()
        .set_active_many(&input.names, input.is_active)
        .await?;
    state.gate.invalidate();

    tracing::info!(
        requested = input.names.len(),
        updated,
        is_active = input.is_active,
        user_id = user.user_id,
        "Resources updated in bulk"
    );

    Ok(Json(DataResponse {
        data: BulkUpdateResult { updated },
    }))
}
