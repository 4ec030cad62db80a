//! Reconciliation engine
//!
//! Merges a freshly imported member list into the existing roster. The
//! imported list fully replaces the existing one (removed members vanish);
//! the only state carried forward is the user-assigned `mainSpec`/`mainRole`
//! pair, keyed by member name. Pure functions, no I/O, so a merge can be
//! previewed offline before committing.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::entities::RosterMember;
use crate::value_objects::Role;

/// One human-readable change produced by a merge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeChange {
    pub name: String,
    pub class_file_name: String,
    pub message: String,
}

/// Result of reconciling an import against the existing roster.
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    /// Candidate member list, in import order.
    pub merged: Vec<RosterMember>,
    pub roles_preserved: usize,
    pub new_players: usize,
    pub changes: Vec<MergeChange>,
    /// Maximum `lastOnline` across the import; `None` for an empty import.
    /// Computing a max over nothing is undefined, so the caller must decide
    /// the fallback (keep the prior timestamp, or reject the import).
    pub last_updated: Option<i64>,
}

/// Reconcile `imported` against `existing`.
///
/// For each imported member, in import order:
/// - a name with a fully assigned role in `existing` keeps that role and
///   spec (the imported record's own values are overwritten);
/// - a name absent from `existing` is counted as a new player;
/// - any other member passes through unchanged.
pub fn reconcile(existing: &[RosterMember], imported: Vec<RosterMember>) -> MergeOutcome {
    let existing_roles: HashMap<&str, (&str, Role)> = existing
        .iter()
        .filter(|m| m.has_assigned_role())
        .map(|m| {
            let spec = m.main_spec.as_deref().unwrap_or_default();
            let role = m.main_role.unwrap_or(Role::DPS);
            (m.name.as_str(), (spec, role))
        })
        .collect();

    let existing_names: HashSet<&str> = existing.iter().map(|m| m.name.as_str()).collect();

    let mut changes = Vec::new();
    let mut roles_preserved = 0;
    let mut new_players = 0;
    let mut last_updated: Option<i64> = None;

    let merged: Vec<RosterMember> = imported
        .into_iter()
        .map(|mut member| {
            last_updated = Some(last_updated.map_or(member.last_online, |current| {
                current.max(member.last_online)
            }));

            if let Some((spec, role)) = existing_roles.get(member.name.as_str()) {
                roles_preserved += 1;
                changes.push(MergeChange {
                    name: member.name.clone(),
                    class_file_name: member.class_file_name.clone(),
                    message: format!("Kept role: {spec} ({role})"),
                });
                member.main_spec = Some((*spec).to_string());
                member.main_role = Some(*role);
            } else if !existing_names.contains(member.name.as_str()) {
                new_players += 1;
                changes.push(MergeChange {
                    name: member.name.clone(),
                    class_file_name: member.class_file_name.clone(),
                    message: "New player (no role assigned)".to_string(),
                });
            }

            member
        })
        .collect();

    MergeOutcome {
        merged,
        roles_preserved,
        new_players,
        changes,
        last_updated,
    }
}
