//! Handlers for `/marketplace`.

use axum::extract::State;
use axum::Json;
use portal_db::models::character_sale::CharacterSale;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/marketplace/sales
///
/// Sales currently open to buyers.
pub async fn list_sales(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<CharacterSale>>>> {
    let sales = state.sales.list_active().await?;
    Ok(Json(DataResponse { data: sales }))
}
