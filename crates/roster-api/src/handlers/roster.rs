//! Roster handlers
//!
//! Endpoints for reading and mutating the stored roster.

use axum::{
    extract::{Path, State},
    Json,
};
use roster_service::dto::{
    MergePreviewRequest, MergePreviewResponse, RosterResponse, SaveRosterRequest,
    SaveRosterResponse, UpdateMemberNoteRequest, UpdateMemberResponse, UpdateMemberSpecRequest,
};
use roster_service::RosterService;

use crate::extractors::ValidatedJson;
use crate::response::ApiResult;
use crate::state::AppState;

/// Get the stored roster
///
/// GET /roster
pub async fn get_roster(State(state): State<AppState>) -> ApiResult<Json<RosterResponse>> {
    let service = RosterService::new(state.service_context());
    let response = service.get_roster().await?;
    Ok(Json(response))
}

/// Replace the stored roster
///
/// PUT /roster
pub async fn save_roster(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SaveRosterRequest>,
) -> ApiResult<Json<SaveRosterResponse>> {
    let service = RosterService::new(state.service_context());
    let response = service.save_roster(request).await?;
    Ok(Json(response))
}

/// Assign a member's main spec and role
///
/// PATCH /roster/members/{name}/spec
pub async fn update_member_spec(
    State(state): State<AppState>,
    Path(name): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateMemberSpecRequest>,
) -> ApiResult<Json<UpdateMemberResponse>> {
    let service = RosterService::new(state.service_context());
    let response = service.update_member_spec(&name, request).await?;
    Ok(Json(response))
}

/// Update a member's public note
///
/// PATCH /roster/members/{name}/note
pub async fn update_member_note(
    State(state): State<AppState>,
    Path(name): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateMemberNoteRequest>,
) -> ApiResult<Json<UpdateMemberResponse>> {
    let service = RosterService::new(state.service_context());
    let response = service.update_member_note(&name, request).await?;
    Ok(Json(response))
}

/// Dry-run merge of a candidate member list
///
/// POST /roster/merge/preview
pub async fn merge_preview(
    State(state): State<AppState>,
    Json(request): Json<MergePreviewRequest>,
) -> ApiResult<Json<MergePreviewResponse>> {
    let service = RosterService::new(state.service_context());
    let response = service.merge_preview(request).await?;
    Ok(Json(response))
}
