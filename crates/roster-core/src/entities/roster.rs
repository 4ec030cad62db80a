//! Roster aggregate - the persisted roster file shape

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::RosterMember;

/// The persisted roster aggregate.
///
/// Replaced wholesale on every successful merge/save; a read-only copy is
/// written to the historical store before each overwrite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterData {
    /// Format `YYYY.MM.DD`, regenerated on every save.
    pub version: String,
    /// Unix seconds - the maximum `lastOnline` seen across the import.
    pub last_updated: i64,
    /// Member order = import order; not guaranteed sorted.
    pub members: Vec<RosterMember>,
}

impl RosterData {
    /// Build a roster with a freshly generated version string.
    pub fn new(members: Vec<RosterMember>, last_updated: i64) -> Self {
        Self {
            version: current_version_string(),
            last_updated,
            members,
        }
    }

    /// Roster for a legacy bare-array file (implicit version, no timestamp).
    pub fn legacy(members: Vec<RosterMember>) -> Self {
        Self {
            version: "1.0.0".to_string(),
            last_updated: 0,
            members,
        }
    }

    #[inline]
    pub fn member_count(&self) -> usize {
        self.members.len()
    }
}

/// Today's date as a `YYYY.MM.DD` version string.
pub fn current_version_string() -> String {
    Utc::now().format("%Y.%m.%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_string_format() {
        let version = current_version_string();
        let parts: Vec<&str> = version.split('.').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0].len(), 4);
        assert_eq!(parts[1].len(), 2);
        assert_eq!(parts[2].len(), 2);
        assert!(parts.iter().all(|p| p.chars().all(char::is_numeric)));
    }

    #[test]
    fn test_legacy_roster_defaults() {
        let roster = RosterData::legacy(vec![]);
        assert_eq!(roster.version, "1.0.0");
        assert_eq!(roster.last_updated, 0);
        assert_eq!(roster.member_count(), 0);
    }

    #[test]
    fn test_wire_shape() {
        let roster = RosterData {
            version: "2024.01.03".to_string(),
            last_updated: 1_704_240_000,
            members: vec![],
        };
        let json = serde_json::to_value(&roster).unwrap();
        assert_eq!(json["version"], "2024.01.03");
        assert_eq!(json["lastUpdated"], 1_704_240_000);
        assert!(json["members"].as_array().unwrap().is_empty());
    }
}
