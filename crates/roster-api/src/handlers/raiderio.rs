//! Raider.IO handlers

use axum::{extract::State, Json};
use roster_service::dto::RaiderIoSyncResponse;
use roster_service::RaiderIoService;

use crate::response::ApiResult;
use crate::state::AppState;

/// Fetch the Raider.IO guild profile and enrich the stored roster
///
/// POST /roster/raiderio/sync
pub async fn sync(State(state): State<AppState>) -> ApiResult<Json<RaiderIoSyncResponse>> {
    let service = RaiderIoService::new(state.service_context());
    let response = service.sync().await?;
    Ok(Json(response))
}
