//! Import handlers
//!
//! Endpoints bridging the addon export file to the stored roster.

use axum::{extract::State, Json};
use roster_service::dto::{ApplyUpdateResponse, UpdateCheckResponse};
use roster_service::ImportService;

use crate::response::ApiResult;
use crate::state::AppState;

/// Check whether the export file is newer than the stored roster
///
/// GET /roster/updates
pub async fn check_for_updates(
    State(state): State<AppState>,
) -> ApiResult<Json<UpdateCheckResponse>> {
    let service = ImportService::new(state.service_context());
    let response = service.check_for_updates().await?;
    Ok(Json(response))
}

/// Apply the export file to the stored roster
///
/// POST /roster/updates/apply
pub async fn apply_update(State(state): State<AppState>) -> ApiResult<Json<ApplyUpdateResponse>> {
    let service = ImportService::new(state.service_context());
    let response = service.apply_update().await?;
    Ok(Json(response))
}
