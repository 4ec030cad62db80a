//! Roster member entity - one guild character

use serde::{Deserialize, Serialize};

use crate::value_objects::Role;

/// Seconds per day, used for the `daysOffline` derived field.
const SECONDS_PER_DAY: i64 = 86_400;

/// One guild character as exported by the addon.
///
/// Wire names are camelCase to stay compatible with the roster JSON file and
/// the addon export payload. Unknown fields in incoming JSON are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterMember {
    pub name: String,
    #[serde(default)]
    pub rank_name: String,
    #[serde(default)]
    pub rank_index: i64,
    #[serde(default)]
    pub level: i64,
    #[serde(default)]
    pub class: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub officer_note: String,
    #[serde(default)]
    pub status: i64,
    #[serde(default)]
    pub class_file_name: String,
    #[serde(default)]
    pub achievement_points: i64,
    #[serde(default)]
    pub achievement_rank: i64,
    /// Unix seconds; 0 means the member was never seen online.
    #[serde(default)]
    pub last_online: i64,
    #[serde(default)]
    pub realm_name: String,
    /// User-assigned; must survive re-imports.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_spec: Option<String>,
    /// User-assigned; must survive re-imports.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_role: Option<Role>,
    // Raider.IO enrichment fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rio_mythic_plus_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rio_raid_progress: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rio_active_spec_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rio_active_spec_role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rio_profile_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rio_last_crawled: Option<String>,
}

impl RosterMember {
    /// Check whether this record refers to the same character.
    ///
    /// `(name, realmName)` identifies a member across edits.
    #[inline]
    pub fn is_same_character(&self, name: &str, realm_name: &str) -> bool {
        self.name == name && self.realm_name == realm_name
    }

    /// Whether both user-assigned role fields are set.
    #[inline]
    pub fn has_assigned_role(&self) -> bool {
        self.main_spec.is_some() && self.main_role.is_some()
    }

    /// Days since last online, relative to `now` (Unix seconds).
    pub fn days_offline(&self, now: i64) -> i64 {
        days_offline(self.last_online, now)
    }
}

/// Days since `last_online`, relative to `now` (both Unix seconds).
///
/// A falsy `last_online` (0) yields the sentinel -1.
pub fn days_offline(last_online: i64, now: i64) -> i64 {
    if last_online == 0 {
        return -1;
    }
    (now - last_online).div_euclid(SECONDS_PER_DAY)
}
