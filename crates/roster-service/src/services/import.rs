//! Import service
//!
//! Bridges the addon's SavedVariables export to the stored roster: update
//! detection and the import itself, including the historical snapshot of
//! the superseded roster.

use tracing::{info, instrument, warn};

use roster_core::{parse_auto_export, reconcile, DomainError, RosterData, RosterMember};
use roster_store::read_export;

use crate::dto::{ApplyUpdateResponse, UpdateCheckResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Import service
pub struct ImportService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ImportService<'a> {
    /// Create a new ImportService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Compare the export file's newest `lastOnline` against the stored
    /// roster's timestamp.
    ///
    /// An unusable export (not configured, missing, or unparsable) is not
    /// an error: the response says no update is available and why.
    #[instrument(skip(self))]
    pub async fn check_for_updates(&self) -> ServiceResult<UpdateCheckResponse> {
        let current = self.ctx.store().load().await?;
        let current_last_updated = current.last_updated;

        let members = match self.read_export_members().await {
            Ok(members) => members,
            Err(reason) => {
                warn!(%reason, "export unusable for update check");
                return Ok(UpdateCheckResponse::unavailable(current_last_updated, reason));
            }
        };

        let Some(lua_last_updated) = members.iter().map(|m| m.last_online).max() else {
            return Ok(UpdateCheckResponse::unavailable(
                current_last_updated,
                "Export contains no members",
            ));
        };

        Ok(UpdateCheckResponse {
            has_update: lua_last_updated > current_last_updated,
            lua_last_updated: Some(lua_last_updated),
            current_last_updated,
            error: None,
        })
    }

    /// Import the export file into the stored roster.
    ///
    /// The superseded roster is archived first, then the import replaces it
    /// wholesale with user-assigned roles carried over.
    #[instrument(skip(self))]
    pub async fn apply_update(&self) -> ServiceResult<ApplyUpdateResponse> {
        let imported = self
            .read_export_members()
            .await
            .map_err(ServiceError::validation)?;
        if imported.is_empty() {
            return Err(DomainError::EmptyImport.into());
        }

        let current = self.ctx.store().load().await?;
        let snapshot = self.ctx.store().snapshot(&current).await?;

        let outcome = reconcile(&current.members, imported);
        // Non-empty import, so the timestamp is always present.
        let last_updated = outcome.last_updated.unwrap_or(current.last_updated);

        let data = RosterData::new(outcome.merged, last_updated);
        self.ctx.store().save(&data).await?;

        info!(
            members = data.member_count(),
            roles_preserved = outcome.roles_preserved,
            new_players = outcome.new_players,
            snapshot = snapshot.as_deref().unwrap_or("none"),
            "Roster updated from export"
        );

        Ok(ApplyUpdateResponse {
            success: true,
            member_count: data.member_count(),
            roles_preserved: outcome.roles_preserved,
            last_updated,
            historical_snapshot_saved: snapshot.is_some(),
        })
    }

    /// Read and parse the configured export file. The error is a
    /// human-readable reason suitable for both responses and logs.
    async fn read_export_members(&self) -> Result<Vec<RosterMember>, String> {
        let Some(path) = &self.ctx.config().storage.lua_export_path else {
            return Err("Export file not configured".to_string());
        };

        let lua_text = read_export(path)
            .await
            .map_err(|_| "Lua file not found".to_string())?;
        parse_auto_export(&lua_text).map_err(|e| format!("Could not parse Lua file: {e}"))
    }
}
