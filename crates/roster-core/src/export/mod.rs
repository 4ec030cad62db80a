//! Addon-export parser
//!
//! Extracts the JSON member payload embedded inside the guild addon's Lua
//! saved-variables file. The payload lives as one string value of the Lua
//! table, under the `autoExportSave` key.

use thiserror::Error;

use crate::entities::RosterMember;

/// Prefix of the embedded payload inside the saved-variables table.
const START_MARKER: &str = "[\"autoExportSave\"] = \"";

/// How far past a candidate `",` terminator we look for the next table key.
const LOOKAHEAD_BYTES: usize = 8;

/// Export parsing failures. These never escape the service boundary as
/// panics; callers convert them into structured failure responses.
#[derive(Debug, Error)]
pub enum ExportParseError {
    #[error("autoExportSave marker not found in export file")]
    MarkerNotFound,

    #[error("could not locate end of embedded payload")]
    TerminatorNotFound,

    #[error("embedded payload is not a valid member array: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

impl ExportParseError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::MarkerNotFound => "MARKER_NOT_FOUND",
            Self::TerminatorNotFound => "TERMINATOR_NOT_FOUND",
            Self::InvalidJson(_) => "INVALID_JSON",
        }
    }
}

/// Parse a raw saved-variables blob into the exported member list.
///
/// An export with zero members parses successfully into an empty list;
/// downstream reconciliation is responsible for rejecting empty imports.
pub fn parse_auto_export(lua_text: &str) -> Result<Vec<RosterMember>, ExportParseError> {
    let payload = extract_payload(lua_text)?;
    let json = unescape_lua_string(payload);
    Ok(serde_json::from_str(&json)?)
}

/// Locate the embedded payload between the start marker and the closing
/// quote of the Lua string value.
///
/// The terminator is a `",` sequence followed (within a few bytes) by
/// optional whitespace and a `[` opening the next table key. The lookahead
/// disambiguates the real closing quote from `",` sequences occurring inside
/// the payload's JSON. This heuristic is inherited from the export format
/// and is known to be fragile against payloads whose JSON content contains
/// exactly `",` + whitespace + `[`; it is preserved for compatibility.
fn extract_payload(lua_text: &str) -> Result<&str, ExportParseError> {
    let marker_pos = lua_text
        .find(START_MARKER)
        .ok_or(ExportParseError::MarkerNotFound)?;
    let json_start = marker_pos + START_MARKER.len();

    let bytes = lua_text.as_bytes();
    let mut search_pos = json_start;

    while let Some(rel) = lua_text[search_pos..].find("\",") {
        let quote_pos = search_pos + rel;
        let window_end = (quote_pos + 2 + LOOKAHEAD_BYTES).min(bytes.len());
        if starts_next_table_key(&bytes[quote_pos + 2..window_end]) {
            return Ok(&lua_text[json_start..quote_pos]);
        }
        search_pos = quote_pos + 2;
    }

    Err(ExportParseError::TerminatorNotFound)
}

/// Whether the lookahead window is optional whitespace followed by `[`.
fn starts_next_table_key(window: &[u8]) -> bool {
    window
        .iter()
        .find(|b| !b.is_ascii_whitespace())
        .is_some_and(|b| *b == b'[')
}

/// Undo the Lua string escaping around the embedded JSON.
///
/// Order matters: literal `\n` sequences are formatting-only line markers
/// and are removed first; `\\` must collapse before `\"` is unescaped so
/// escaped backslash-quote runs are not corrupted.
fn unescape_lua_string(raw: &str) -> String {
    raw.replace("\\n", "")
        .replace("\\\\", "\\")
        .replace("\\\"", "\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_synthetic_blob() {
        let lua = "[\"autoExportSave\"] = \"[{\\\"name\\\":\\\"Bob\\\",\\\"lastOnline\\\":100}]\",\n[\"other\"]=1";
        let members = parse_auto_export(lua).unwrap();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].name, "Bob");
        assert_eq!(members[0].last_online, 100);
    }

    #[test]
    fn test_missing_marker_is_typed_failure() {
        let err = parse_auto_export("[\"somethingElse\"] = \"[]\",\n[\"other\"]=1").unwrap_err();
        assert!(matches!(err, ExportParseError::MarkerNotFound));
        assert_eq!(err.code(), "MARKER_NOT_FOUND");
    }

    #[test]
    fn test_missing_terminator_is_typed_failure() {
        // Payload ends without any `",` followed by the next table key.
        let err = parse_auto_export("[\"autoExportSave\"] = \"[]").unwrap_err();
        assert!(matches!(err, ExportParseError::TerminatorNotFound));
    }

    #[test]
    fn test_invalid_payload_is_typed_failure() {
        let lua = "[\"autoExportSave\"] = \"not json at all\",\n[\"other\"]=1";
        let err = parse_auto_export(lua).unwrap_err();
        assert!(matches!(err, ExportParseError::InvalidJson(_)));
    }

    #[test]
    fn test_empty_member_array_parses() {
        let lua = "[\"autoExportSave\"] = \"[]\",\n[\"other\"]=1";
        let members = parse_auto_export(lua).unwrap();
        assert!(members.is_empty());
    }

    #[test]
    fn test_quote_comma_inside_payload_is_skipped() {
        // The note field contains a literal `",` that must not terminate the
        // payload because no table key follows it.
        let payload = r#"[{\"name\":\"Bob\",\"note\":\"a\\\",b\",\"lastOnline\":5}]"#;
        let lua = format!("[\"autoExportSave\"] = \"{payload}\",\n[\"other\"]=1");
        let members = parse_auto_export(&lua).unwrap();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].note, "a\",b");
    }

    #[test]
    fn test_literal_newline_escapes_are_stripped() {
        let lua = "[\"autoExportSave\"] = \"[{\\\"name\\\":\\n\\\"Ann\\\",\\\"lastOnline\\\":7}]\",\n  [\"other\"]=1";
        let members = parse_auto_export(lua).unwrap();
        assert_eq!(members[0].name, "Ann");
    }

    #[test]
    fn test_multiple_members_in_import_order() {
        let payload = r#"[{\"name\":\"Zed\",\"lastOnline\":1},{\"name\":\"Ann\",\"lastOnline\":2}]"#;
        let lua = format!("[\"autoExportSave\"] = \"{payload}\", [\"other\"]=1");
        let members = parse_auto_export(&lua).unwrap();
        assert_eq!(members.len(), 2);
        // Import order is preserved, no sorting
        assert_eq!(members[0].name, "Zed");
        assert_eq!(members[1].name, "Ann");
    }
}
