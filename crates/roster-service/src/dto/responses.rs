//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output, using the
//! camelCase wire convention the member data itself uses.

use roster_core::{MergeChange, MergeOutcome, RosterData, RosterMember};
use serde::Serialize;

// ============================================================================
// Roster Responses
// ============================================================================

/// The roster aggregate as served to clients
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterResponse {
    pub version: String,
    pub last_updated: i64,
    pub members: Vec<RosterMember>,
}

impl From<RosterData> for RosterResponse {
    fn from(data: RosterData) -> Self {
        Self {
            version: data.version,
            last_updated: data.last_updated,
            members: data.members,
        }
    }
}

/// Acknowledgement for a full roster save
#[derive(Debug, Serialize)]
pub struct SaveRosterResponse {
    pub success: bool,
}

/// Acknowledgement for a member mutation, echoing the updated member
#[derive(Debug, Serialize)]
pub struct UpdateMemberResponse {
    pub success: bool,
    pub member: RosterMember,
}

// ============================================================================
// Import Responses
// ============================================================================

/// Result of comparing the addon export against the stored roster
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCheckResponse {
    pub has_update: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lua_last_updated: Option<i64>,
    pub current_last_updated: i64,
    /// Why no update is available, when the export could not be used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl UpdateCheckResponse {
    /// An unusable export, with the reason.
    #[must_use]
    pub fn unavailable(current_last_updated: i64, error: impl Into<String>) -> Self {
        Self {
            has_update: false,
            lua_last_updated: None,
            current_last_updated,
            error: Some(error.into()),
        }
    }
}

/// Result of applying the addon export to the stored roster
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyUpdateResponse {
    pub success: bool,
    pub member_count: usize,
    pub roles_preserved: usize,
    pub last_updated: i64,
    pub historical_snapshot_saved: bool,
}

// ============================================================================
// Merge Responses
// ============================================================================

/// Dry-run merge result for client-side confirmation
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergePreviewResponse {
    pub merged: Vec<RosterMember>,
    pub roles_preserved: usize,
    pub new_players: usize,
    pub changes: Vec<MergeChange>,
    pub last_updated: i64,
}

impl MergePreviewResponse {
    /// Build from a reconcile outcome, with `fallback` standing in for the
    /// timestamp of an empty candidate list.
    #[must_use]
    pub fn from_outcome(outcome: MergeOutcome, explicit: Option<i64>, fallback: i64) -> Self {
        let last_updated = explicit.or(outcome.last_updated).unwrap_or(fallback);
        Self {
            merged: outcome.merged,
            roles_preserved: outcome.roles_preserved,
            new_players: outcome.new_players,
            changes: outcome.changes,
            last_updated,
        }
    }
}

// ============================================================================
// Raider.IO Responses
// ============================================================================

/// Result of enriching the roster from the Raider.IO guild profile
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RaiderIoSyncResponse {
    pub success: bool,
    pub updated_count: usize,
    pub role_updated_count: usize,
    pub total_members: usize,
    pub rio_members_found: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_crawled: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_check_wire_shape() {
        let response = UpdateCheckResponse {
            has_update: true,
            lua_last_updated: Some(200),
            current_last_updated: 100,
            error: None,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["hasUpdate"], true);
        assert_eq!(json["luaLastUpdated"], 200);
        assert_eq!(json["currentLastUpdated"], 100);
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_unavailable_check() {
        let response = UpdateCheckResponse::unavailable(100, "Lua file not found");
        assert!(!response.has_update);
        assert_eq!(response.error.as_deref(), Some("Lua file not found"));
    }

    #[test]
    fn test_apply_update_wire_shape() {
        let response = ApplyUpdateResponse {
            success: true,
            member_count: 42,
            roles_preserved: 7,
            last_updated: 1_700_000_000,
            historical_snapshot_saved: true,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["memberCount"], 42);
        assert_eq!(json["rolesPreserved"], 7);
        assert_eq!(json["historicalSnapshotSaved"], true);
    }
}
