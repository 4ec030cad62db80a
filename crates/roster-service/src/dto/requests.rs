//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize`; those carrying user input
//! also implement `Validate`.

use roster_core::{Role, RosterMember};
use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Roster Requests
// ============================================================================

/// Full roster save request
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SaveRosterRequest {
    pub members: Vec<RosterMember>,

    #[validate(range(min = 0, message = "lastUpdated must not be negative"))]
    pub last_updated: i64,
}

/// Assign a member's main spec and role
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMemberSpecRequest {
    #[validate(length(min = 1, max = 50, message = "mainSpec must be 1-50 characters"))]
    pub main_spec: String,

    pub main_role: Role,

    /// When set, only a member on this realm matches.
    pub realm_name: Option<String>,
}

/// Update a member's public note
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMemberNoteRequest {
    #[validate(length(max = 500, message = "note must be at most 500 characters"))]
    pub note: String,

    /// When set, only a member on this realm matches.
    pub realm_name: Option<String>,
}

// ============================================================================
// Merge Requests
// ============================================================================

/// Dry-run merge of a candidate member list against the stored roster
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergePreviewRequest {
    pub members: Vec<RosterMember>,

    /// Overrides the timestamp computed from the candidate list.
    #[serde(default)]
    pub last_updated: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_roster_wire_shape() {
        let request: SaveRosterRequest = serde_json::from_str(
            r#"{"members":[{"name":"Alice"}],"lastUpdated":1700000000}"#,
        )
        .unwrap();
        assert_eq!(request.members.len(), 1);
        assert_eq!(request.last_updated, 1_700_000_000);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_negative_last_updated_is_rejected() {
        let request: SaveRosterRequest =
            serde_json::from_str(r#"{"members":[],"lastUpdated":-5}"#).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_update_spec_validation() {
        let request: UpdateMemberSpecRequest =
            serde_json::from_str(r#"{"mainSpec":"Protection","mainRole":"Tank"}"#).unwrap();
        assert!(request.validate().is_ok());
        assert_eq!(request.main_role, Role::Tank);
        assert!(request.realm_name.is_none());

        let request: UpdateMemberSpecRequest =
            serde_json::from_str(r#"{"mainSpec":"","mainRole":"DPS"}"#).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_merge_preview_optional_timestamp() {
        let request: MergePreviewRequest =
            serde_json::from_str(r#"{"members":[{"name":"Alice"}]}"#).unwrap();
        assert!(request.last_updated.is_none());
    }
}
