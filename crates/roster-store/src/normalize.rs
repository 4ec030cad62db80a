//! Legacy roster format normalization
//!
//! Early roster files were a bare JSON array of members. Current files are
//! a versioned object with a `lastUpdated` timestamp. Reads accept both
//! shapes and normalize to the versioned one.

use roster_core::{RosterData, RosterMember};
use serde::Deserialize;

use crate::error::StoreResult;

/// A roster document as found on disk, either shape.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RawRoster {
    Versioned(RosterData),
    Legacy(Vec<RosterMember>),
}

impl RawRoster {
    /// Normalize to the versioned aggregate. Legacy arrays get version
    /// "1.0.0" and a zero timestamp.
    #[must_use]
    pub fn normalize(self) -> RosterData {
        match self {
            Self::Versioned(data) => data,
            Self::Legacy(members) => RosterData::legacy(members),
        }
    }
}

/// Parse roster JSON in either on-disk shape.
pub fn normalize_roster_json(json: &str) -> StoreResult<RosterData> {
    let raw: RawRoster = serde_json::from_str(json)?;
    Ok(raw.normalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_versioned_object_passes_through() {
        let data = normalize_roster_json(
            r#"{"version":"2024.03.01","lastUpdated":1700000000,"members":[{"name":"Alice"}]}"#,
        )
        .unwrap();
        assert_eq!(data.version, "2024.03.01");
        assert_eq!(data.last_updated, 1_700_000_000);
        assert_eq!(data.members.len(), 1);
    }

    #[test]
    fn test_legacy_array_is_normalized() {
        let data = normalize_roster_json(r#"[{"name":"Alice"},{"name":"Bob"}]"#).unwrap();
        assert_eq!(data.version, "1.0.0");
        assert_eq!(data.last_updated, 0);
        assert_eq!(data.members.len(), 2);
    }

    #[test]
    fn test_invalid_json_is_rejected() {
        let err = normalize_roster_json("{broken").unwrap_err();
        assert!(matches!(err, crate::StoreError::InvalidFormat(_)));
    }

    #[test]
    fn test_unknown_shape_is_rejected() {
        assert!(normalize_roster_json(r#"{"something":"else"}"#).is_err());
    }
}
