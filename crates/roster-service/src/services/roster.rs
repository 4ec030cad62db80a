//! Roster service
//!
//! Handles roster reads, saves, per-member mutations, and merge previews.

use chrono::Utc;
use tracing::{info, instrument};
use validator::Validate;

use roster_core::{reconcile, RosterData, RosterMember};

use crate::dto::{
    MergePreviewRequest, MergePreviewResponse, RosterResponse, SaveRosterRequest,
    SaveRosterResponse, UpdateMemberNoteRequest, UpdateMemberResponse, UpdateMemberSpecRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Roster service
pub struct RosterService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> RosterService<'a> {
    /// Create a new RosterService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Get the stored roster
    #[instrument(skip(self))]
    pub async fn get_roster(&self) -> ServiceResult<RosterResponse> {
        let data = self.ctx.store().load().await?;
        Ok(RosterResponse::from(data))
    }

    /// Replace the stored roster wholesale
    #[instrument(skip(self, request), fields(members = request.members.len()))]
    pub async fn save_roster(&self, request: SaveRosterRequest) -> ServiceResult<SaveRosterResponse> {
        request.validate()?;

        let data = RosterData::new(request.members, request.last_updated);
        self.ctx.store().save(&data).await?;

        info!(members = data.member_count(), last_updated = data.last_updated, "Roster saved");
        Ok(SaveRosterResponse { success: true })
    }

    /// Assign a member's main spec and role
    #[instrument(skip(self, request), fields(member = %name))]
    pub async fn update_member_spec(
        &self,
        name: &str,
        request: UpdateMemberSpecRequest,
    ) -> ServiceResult<UpdateMemberResponse> {
        request.validate()?;

        let member = self
            .mutate_member(name, request.realm_name.as_deref(), |member| {
                member.main_spec = Some(request.main_spec.clone());
                member.main_role = Some(request.main_role);
            })
            .await?;

        info!(member = %name, spec = %request.main_spec, role = %request.main_role, "Member spec updated");
        Ok(UpdateMemberResponse {
            success: true,
            member,
        })
    }

    /// Update a member's public note
    #[instrument(skip(self, request), fields(member = %name))]
    pub async fn update_member_note(
        &self,
        name: &str,
        request: UpdateMemberNoteRequest,
    ) -> ServiceResult<UpdateMemberResponse> {
        request.validate()?;

        let member = self
            .mutate_member(name, request.realm_name.as_deref(), |member| {
                member.note = request.note.clone();
            })
            .await?;

        info!(member = %name, "Member note updated");
        Ok(UpdateMemberResponse {
            success: true,
            member,
        })
    }

    /// Dry-run merge of a candidate member list against the stored roster
    #[instrument(skip(self, request), fields(candidates = request.members.len()))]
    pub async fn merge_preview(
        &self,
        request: MergePreviewRequest,
    ) -> ServiceResult<MergePreviewResponse> {
        let current = self.ctx.store().load().await?;
        let outcome = reconcile(&current.members, request.members);

        Ok(MergePreviewResponse::from_outcome(
            outcome,
            request.last_updated,
            Utc::now().timestamp(),
        ))
    }

    /// Load, apply `mutate` to the matching member, save, and return the
    /// updated member. The roster keeps its timestamp; only the version
    /// string is regenerated by the save.
    async fn mutate_member(
        &self,
        name: &str,
        realm: Option<&str>,
        mutate: impl Fn(&mut RosterMember),
    ) -> ServiceResult<RosterMember> {
        let mut data = self.ctx.store().load().await?;

        let member = data
            .members
            .iter_mut()
            .find(|m| match realm {
                Some(realm) => m.is_same_character(name, realm),
                None => m.name == name,
            })
            .ok_or_else(|| ServiceError::not_found("Member", name))?;

        mutate(member);
        let updated = member.clone();

        let data = RosterData::new(data.members, data.last_updated);
        self.ctx.store().save(&data).await?;
        Ok(updated)
    }
}
