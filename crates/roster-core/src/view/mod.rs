//! Roster view state
//!
//! The observable aggregate behind the roster table: live member list,
//! filter set, sort key/direction, column visibility, and merge-preview
//! transient state. Derived values (`visible_columns`, `filtered_roster`,
//! `sorted_roster`) are plain recompute-on-read accessors; consumers mutate
//! only through the named operations.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::entities::{days_offline, RosterData, RosterMember};
use crate::query::{
    apply_filters_at, sort_members_at, MemberField, RosterFilter, SortDirection,
};
use crate::reconcile::{reconcile, MergeChange};
use crate::value_objects::Role;

/// One roster table column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnConfig {
    pub key: MemberField,
    pub label: String,
    pub visible: bool,
    #[serde(default)]
    pub always_visible: bool,
    pub sortable: bool,
}

impl ColumnConfig {
    fn new(key: MemberField, label: &str, visible: bool) -> Self {
        Self {
            key,
            label: label.to_string(),
            visible,
            always_visible: false,
            sortable: true,
        }
    }
}

/// Transient result of a dry-run merge; discarded on cancel, committed on
/// apply.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergePreview {
    pub merged: Vec<RosterMember>,
    pub roles_preserved: usize,
    pub new_players: usize,
    pub changes: Vec<MergeChange>,
    pub last_updated: i64,
}

/// Aggregate state for the roster table.
#[derive(Debug, Clone)]
pub struct RosterViewState {
    // Core data
    roster: Vec<RosterMember>,
    last_updated: i64,

    // Filter state
    filters: Vec<RosterFilter>,
    match_all: bool,
    filters_enabled: bool,

    // Sort state
    sort_key: MemberField,
    sort_direction: SortDirection,

    // Column state
    columns: Vec<ColumnConfig>,

    // Merge transient state
    new_roster_json: String,
    merge_error: Option<String>,
    merge_preview: Option<MergePreview>,
}

impl Default for RosterViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl RosterViewState {
    pub fn new() -> Self {
        Self {
            roster: Vec::new(),
            last_updated: 0,
            filters: Vec::new(),
            match_all: false,
            filters_enabled: true,
            sort_key: MemberField::Name,
            sort_direction: SortDirection::Asc,
            columns: default_columns(),
            new_roster_json: String::new(),
            merge_error: None,
            merge_preview: None,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn roster(&self) -> &[RosterMember] {
        &self.roster
    }

    pub fn last_updated(&self) -> i64 {
        self.last_updated
    }

    pub fn sort_key(&self) -> MemberField {
        self.sort_key
    }

    pub fn sort_direction(&self) -> SortDirection {
        self.sort_direction
    }

    pub fn filters_enabled(&self) -> bool {
        self.filters_enabled
    }

    pub fn columns(&self) -> &[ColumnConfig] {
        &self.columns
    }

    pub fn merge_error(&self) -> Option<&str> {
        self.merge_error.as_deref()
    }

    pub fn merge_preview(&self) -> Option<&MergePreview> {
        self.merge_preview.as_ref()
    }

    // ========================================================================
    // Derived values (recomputed on read)
    // ========================================================================

    /// Columns currently shown.
    pub fn visible_columns(&self) -> Vec<&ColumnConfig> {
        self.columns.iter().filter(|c| c.visible).collect()
    }

    /// Roster after the filter engine; identity when filters are disabled
    /// or absent.
    pub fn filtered_roster(&self) -> Vec<RosterMember> {
        self.filtered_roster_at(Utc::now().timestamp())
    }

    /// Filtered roster after the sort engine.
    pub fn sorted_roster(&self) -> Vec<RosterMember> {
        self.sorted_roster_at(Utc::now().timestamp())
    }

    fn filtered_roster_at(&self, now: i64) -> Vec<RosterMember> {
        if !self.filters_enabled || self.filters.is_empty() {
            return self.roster.clone();
        }
        apply_filters_at(&self.roster, &self.filters, self.match_all, now)
    }

    fn sorted_roster_at(&self, now: i64) -> Vec<RosterMember> {
        sort_members_at(
            &self.filtered_roster_at(now),
            self.sort_key,
            self.sort_direction,
            now,
        )
    }

    /// Resolve a cell for display; `None` for unset fields.
    pub fn cell_value(&self, member: &RosterMember, key: MemberField) -> Option<String> {
        key.resolve(member, Utc::now().timestamp())
            .map(|v| v.to_display_string())
    }

    /// Roster in the on-disk aggregate shape, with a fresh version string.
    pub fn export_data(&self) -> RosterData {
        RosterData::new(self.roster.clone(), self.last_updated)
    }

    // ========================================================================
    // Mutating operations
    // ========================================================================

    /// Initialize or replace roster data.
    pub fn set_roster(&mut self, members: Vec<RosterMember>, last_updated: i64) {
        self.roster = members;
        self.last_updated = last_updated;
    }

    /// Replace the member list, keeping the current timestamp.
    pub fn update_roster(&mut self, members: Vec<RosterMember>) {
        self.roster = members;
    }

    /// Toggle direction on the current sort key, or switch key and reset to
    /// ascending.
    pub fn toggle_sort(&mut self, key: MemberField) {
        if self.sort_key == key {
            self.sort_direction = self.sort_direction.toggled();
        } else {
            self.sort_key = key;
            self.sort_direction = SortDirection::Asc;
        }
    }

    /// Replace the filter configuration.
    pub fn update_filters(&mut self, filters: Vec<RosterFilter>, match_all: bool) {
        self.filters = filters;
        self.match_all = match_all;
    }

    /// Toggle the whole filter layer on/off.
    pub fn toggle_filters(&mut self) {
        self.filters_enabled = !self.filters_enabled;
    }

    /// Show or hide a column. Always-visible columns cannot be hidden.
    pub fn set_column_visible(&mut self, key: MemberField, visible: bool) {
        if let Some(column) = self.columns.iter_mut().find(|c| c.key == key) {
            if !visible && column.always_visible {
                return;
            }
            column.visible = visible;
        }
    }

    /// Restore the default column set.
    pub fn reset_columns(&mut self) {
        self.columns = default_columns();
    }

    /// Assign a member's spec and role, keyed by `(name, realmName)`.
    pub fn update_member_spec(&mut self, name: &str, realm_name: &str, spec: &str, role: Role) {
        for member in &mut self.roster {
            if member.is_same_character(name, realm_name) {
                member.main_spec = Some(spec.to_string());
                member.main_role = Some(role);
            }
        }
    }

    /// Update a member's note, keyed by `(name, realmName)`.
    pub fn update_member_note(&mut self, name: &str, realm_name: &str, note: &str) {
        for member in &mut self.roster {
            if member.is_same_character(name, realm_name) {
                member.note = note.to_string();
            }
        }
    }

    /// Build a merge preview from pasted roster JSON.
    ///
    /// On parse failure the error message is captured and no preview is
    /// produced. An explicit timestamp takes precedence over the import's
    /// computed maximum; an empty import falls back to "now".
    pub fn merge_rosters(&mut self, candidate_json: &str, explicit_last_updated: Option<i64>) {
        self.merge_rosters_at(candidate_json, explicit_last_updated, Utc::now().timestamp());
    }

    fn merge_rosters_at(&mut self, candidate_json: &str, explicit: Option<i64>, now: i64) {
        self.merge_error = None;
        self.new_roster_json = candidate_json.to_string();

        let imported: Vec<RosterMember> = match serde_json::from_str(candidate_json) {
            Ok(members) => members,
            Err(e) => {
                self.merge_error = Some(format!("Failed to parse JSON: {e}"));
                return;
            }
        };

        let outcome = reconcile(&self.roster, imported);
        let last_updated = explicit.or(outcome.last_updated).unwrap_or(now);

        self.merge_preview = Some(MergePreview {
            merged: outcome.merged,
            roles_preserved: outcome.roles_preserved,
            new_players: outcome.new_players,
            changes: outcome.changes,
            last_updated,
        });
    }

    /// Commit the pending merge preview.
    pub fn apply_merge(&mut self) {
        if let Some(preview) = self.merge_preview.take() {
            self.roster = preview.merged;
            self.last_updated = preview.last_updated;
            self.new_roster_json.clear();
            self.merge_error = None;
        }
    }

    /// Discard the pending merge preview.
    pub fn cancel_merge(&mut self) {
        self.merge_preview = None;
        self.merge_error = None;
    }
}

/// The default column set of the roster table. Raider.IO columns start
/// hidden.
fn default_columns() -> Vec<ColumnConfig> {
    let mut name = ColumnConfig::new(MemberField::Name, "Name", true);
    name.always_visible = true;
    vec![
        name,
        ColumnConfig::new(MemberField::Level, "Level", true),
        ColumnConfig::new(MemberField::Class, "Class", true),
        ColumnConfig::new(MemberField::MainSpec, "Spec", true),
        ColumnConfig::new(MemberField::MainRole, "Role", true),
        ColumnConfig::new(MemberField::RankName, "Rank", true),
        ColumnConfig::new(MemberField::Note, "Note", true),
        ColumnConfig::new(MemberField::LastOnline, "Last Online", true),
        ColumnConfig::new(MemberField::Zone, "Zone", true),
        ColumnConfig::new(MemberField::AchievementPoints, "Achievement Points", true),
        ColumnConfig::new(MemberField::DaysOffline, "Days Offline", true),
        ColumnConfig::new(MemberField::RealmName, "Realm", true),
        ColumnConfig::new(MemberField::RioMythicPlusScore, "M+ Score", false),
        ColumnConfig::new(MemberField::RioRaidProgress, "Raid Progress", false),
        ColumnConfig::new(MemberField::RioLastCrawled, "Last Crawled", false),
    ]
}

/// Human-readable rendering of a `lastOnline` timestamp, relative to `now`.
pub fn format_last_online(last_online: i64, now: i64) -> String {
    if last_online == 0 {
        return "Never".to_string();
    }
    let diff_days = days_offline(last_online, now);
    match diff_days {
        i64::MIN..=0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        2..=6 => format!("{diff_days} days ago"),
        7..=29 => format!("{} weeks ago", diff_days / 7),
        30..=364 => format!("{} months ago", diff_days / 30),
        _ => format!("{} years ago", diff_days / 365),
    }
}
