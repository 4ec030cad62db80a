//! Comparator-based sorting

use std::cmp::Ordering;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::{FieldValue, MemberField};
use crate::entities::RosterMember;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Flip asc <-> desc.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Sort members by a field, returning a new ordered list.
///
/// Strings compare case-insensitively, numeric fields numerically. Members
/// with the field unset always sort to the end, in both directions. The
/// sort is stable, so ties keep their relative input order.
pub fn sort_members(
    members: &[RosterMember],
    field: MemberField,
    direction: SortDirection,
) -> Vec<RosterMember> {
    sort_members_at(members, field, direction, Utc::now().timestamp())
}

/// [`sort_members`] against an explicit `now` (Unix seconds) for the
/// derived `daysOffline` field.
pub fn sort_members_at(
    members: &[RosterMember],
    field: MemberField,
    direction: SortDirection,
    now: i64,
) -> Vec<RosterMember> {
    let mut sorted = members.to_vec();
    sorted.sort_by(|a, b| compare(a, b, field, direction, now));
    sorted
}

fn compare(
    a: &RosterMember,
    b: &RosterMember,
    field: MemberField,
    direction: SortDirection,
    now: i64,
) -> Ordering {
    let a_value = field.resolve(a, now);
    let b_value = field.resolve(b, now);

    match (a_value, b_value) {
        // Unset values sort last regardless of direction.
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a_value), Some(b_value)) => {
            let ordering = compare_values(&a_value, &b_value);
            match direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        }
    }
}

fn compare_values(a: &FieldValue, b: &FieldValue) -> Ordering {
    match (a, b) {
        (FieldValue::Num(a), FieldValue::Num(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
        (FieldValue::Str(a), FieldValue::Str(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
        // Mixed types only arise from inconsistent data; treat as a tie.
        _ => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_704_326_400;

    fn members() -> Vec<RosterMember> {
        serde_json::from_value(serde_json::json!([
            {"name": "Charlie", "class": "MAGE", "level": 79, "rankIndex": 4,
             "mainRole": "DPS", "lastOnline": 1_704_240_000},
            {"name": "alice", "class": "WARRIOR", "level": 80, "rankIndex": 2,
             "mainRole": "Tank", "lastOnline": 1_704_067_200},
            {"name": "Bob", "class": "PRIEST", "level": 80, "rankIndex": 3,
             "mainRole": "Healer", "lastOnline": 1_704_153_600}
        ]))
        .unwrap()
    }

    fn names(members: &[RosterMember]) -> Vec<&str> {
        members.iter().map(|m| m.name.as_str()).collect()
    }

    #[test]
    fn test_sort_by_name_is_case_insensitive() {
        let result = sort_members_at(&members(), MemberField::Name, SortDirection::Asc, NOW);
        assert_eq!(names(&result), vec!["alice", "Bob", "Charlie"]);
    }

    #[test]
    fn test_sort_by_name_desc() {
        let result = sort_members_at(&members(), MemberField::Name, SortDirection::Desc, NOW);
        assert_eq!(names(&result), vec!["Charlie", "Bob", "alice"]);
    }

    #[test]
    fn test_sort_by_level_numeric() {
        let result = sort_members_at(&members(), MemberField::Level, SortDirection::Asc, NOW);
        assert_eq!(result[0].level, 79);
        // Stable: alice and Bob keep input order on the level tie.
        assert_eq!(names(&result), vec!["Charlie", "alice", "Bob"]);
    }

    #[test]
    fn test_sort_by_rank_index() {
        let result = sort_members_at(&members(), MemberField::RankIndex, SortDirection::Asc, NOW);
        assert_eq!(names(&result), vec!["alice", "Bob", "Charlie"]);
    }

    #[test]
    fn test_sort_by_last_online() {
        let result = sort_members_at(&members(), MemberField::LastOnline, SortDirection::Asc, NOW);
        assert_eq!(names(&result), vec!["alice", "Bob", "Charlie"]);
    }

    #[test]
    fn test_sort_does_not_mutate_input() {
        let original = members();
        let _ = sort_members_at(&original, MemberField::Name, SortDirection::Desc, NOW);
        assert_eq!(names(&original), vec!["Charlie", "alice", "Bob"]);
    }

    #[test]
    fn test_direction_symmetry_without_missing_values() {
        let asc = sort_members_at(&members(), MemberField::RankIndex, SortDirection::Asc, NOW);
        let mut desc = sort_members_at(&members(), MemberField::RankIndex, SortDirection::Desc, NOW);
        desc.reverse();
        assert_eq!(names(&asc), names(&desc));
    }

    #[test]
    fn test_missing_values_sort_last_in_both_directions() {
        let mut with_missing = members();
        with_missing[1].main_role = None; // alice loses her role

        let asc = sort_members_at(&with_missing, MemberField::MainRole, SortDirection::Asc, NOW);
        assert_eq!(asc.last().unwrap().name, "alice");

        let desc = sort_members_at(&with_missing, MemberField::MainRole, SortDirection::Desc, NOW);
        assert_eq!(desc.last().unwrap().name, "alice");
    }

    #[test]
    fn test_sort_by_days_offline() {
        let roster: Vec<RosterMember> = serde_json::from_value(serde_json::json!([
            {"name": "Stale", "lastOnline": NOW - 10 * 86_400},
            {"name": "Fresh", "lastOnline": NOW - 86_400},
            {"name": "Never", "lastOnline": 0}
        ]))
        .unwrap();
        let result = sort_members_at(&roster, MemberField::DaysOffline, SortDirection::Asc, NOW);
        // "Never" is the -1 sentinel, which sorts first ascending.
        assert_eq!(names(&result), vec!["Never", "Fresh", "Stale"]);
    }

    #[test]
    fn test_direction_serde() {
        assert_eq!(serde_json::to_string(&SortDirection::Asc).unwrap(), "\"asc\"");
        let d: SortDirection = serde_json::from_str("\"desc\"").unwrap();
        assert_eq!(d, SortDirection::Desc);
        assert_eq!(d.toggled(), SortDirection::Asc);
    }
}
