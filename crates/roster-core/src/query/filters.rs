//! Filter predicate evaluation

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::{FieldValue, MemberField};
use crate::entities::RosterMember;

/// Filter comparison operators.
///
/// String-only operators (the `contains` family, `startsWith`, `endsWith`)
/// never match on numeric-classified fields, and the ordered comparisons
/// never match on string-classified fields; applicability follows the field
/// classification, not the operator alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterOperator {
    Equals,
    NotEquals,
    Contains,
    NotContains,
    StartsWith,
    EndsWith,
    GreaterThan,
    LessThan,
    GreaterThanOrEqual,
    LessThanOrEqual,
    IsEmpty,
    IsNotEmpty,
}

/// One filter row: field, operator, comparison value.
///
/// Ephemeral query state; not persisted with the roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterFilter {
    pub id: u32,
    pub field: MemberField,
    pub operator: FilterOperator,
    #[serde(default)]
    pub value: String,
}

/// Apply filters to a member list, returning the members that pass.
///
/// `match_all` = true requires every filter to match (AND); false requires
/// at least one (OR). Zero filters means everyone passes.
pub fn apply_filters(
    members: &[RosterMember],
    filters: &[RosterFilter],
    match_all: bool,
) -> Vec<RosterMember> {
    apply_filters_at(members, filters, match_all, Utc::now().timestamp())
}

/// [`apply_filters`] against an explicit `now` (Unix seconds), so the
/// derived `daysOffline` field evaluates deterministically.
pub fn apply_filters_at(
    members: &[RosterMember],
    filters: &[RosterFilter],
    match_all: bool,
    now: i64,
) -> Vec<RosterMember> {
    if filters.is_empty() {
        return members.to_vec();
    }

    members
        .iter()
        .filter(|member| {
            if match_all {
                filters.iter().all(|f| matches_filter_at(member, f, now))
            } else {
                filters.iter().any(|f| matches_filter_at(member, f, now))
            }
        })
        .cloned()
        .collect()
}

/// Evaluate a single filter against a member.
pub fn matches_filter_at(member: &RosterMember, filter: &RosterFilter, now: i64) -> bool {
    let field_value = filter.field.resolve(member, now);

    // Emptiness: unset, empty string, or whitespace-only string.
    let is_empty = match &field_value {
        None => true,
        Some(FieldValue::Str(s)) => s.trim().is_empty(),
        Some(FieldValue::Num(_)) => false,
    };

    match filter.operator {
        FilterOperator::IsEmpty => return is_empty,
        FilterOperator::IsNotEmpty => return !is_empty,
        _ => {}
    }

    // Every other operator treats an empty field value as "no match".
    if is_empty {
        return false;
    }
    let Some(field_value) = field_value else {
        return false;
    };

    if filter.field.is_numeric() {
        match_numeric(&field_value, &filter.value, filter.operator)
    } else {
        match_string(&field_value, &filter.value, filter.operator)
    }
}

/// Numeric comparison: both sides must parse as finite numbers, otherwise
/// the filter simply does not match.
fn match_numeric(field_value: &FieldValue, filter_value: &str, op: FilterOperator) -> bool {
    let member_value = match field_value {
        FieldValue::Num(n) => *n,
        FieldValue::Str(s) => match s.trim().parse::<f64>() {
            Ok(n) => n,
            Err(_) => return false,
        },
    };
    let Ok(compare_value) = filter_value.trim().parse::<f64>() else {
        return false;
    };
    if !member_value.is_finite() || !compare_value.is_finite() {
        return false;
    }

    match op {
        FilterOperator::Equals => (member_value - compare_value).abs() < f64::EPSILON,
        FilterOperator::NotEquals => (member_value - compare_value).abs() >= f64::EPSILON,
        FilterOperator::GreaterThan => member_value > compare_value,
        FilterOperator::LessThan => member_value < compare_value,
        FilterOperator::GreaterThanOrEqual => member_value >= compare_value,
        FilterOperator::LessThanOrEqual => member_value <= compare_value,
        _ => false,
    }
}

/// Case-insensitive string comparison.
fn match_string(field_value: &FieldValue, filter_value: &str, op: FilterOperator) -> bool {
    let member_value = field_value.to_display_string().to_lowercase();
    let compare_value = filter_value.to_lowercase();

    match op {
        FilterOperator::Equals => member_value == compare_value,
        FilterOperator::NotEquals => member_value != compare_value,
        FilterOperator::Contains => member_value.contains(&compare_value),
        FilterOperator::NotContains => !member_value.contains(&compare_value),
        FilterOperator::StartsWith => member_value.starts_with(&compare_value),
        FilterOperator::EndsWith => member_value.ends_with(&compare_value),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::Role;

    const NOW: i64 = 1_704_326_400;

    fn mock_members() -> Vec<RosterMember> {
        let raw = serde_json::json!([
            {
                "name": "Alice", "class": "WARRIOR", "mainRole": "Tank",
                "mainSpec": "Protection", "rankName": "Officer", "rankIndex": 2,
                "level": 80, "note": "Main tank", "officerNote": "Reliable",
                "achievementPoints": 10000, "lastOnline": 1_704_067_200,
                "realmName": "TestRealm"
            },
            {
                "name": "Bob", "class": "PRIEST", "mainRole": "Healer",
                "mainSpec": "Holy", "rankName": "Raider", "rankIndex": 3,
                "level": 80, "note": "Heals", "officerNote": "",
                "achievementPoints": 5000, "lastOnline": 1_704_153_600,
                "realmName": "TestRealm"
            },
            {
                "name": "Charlie", "class": "MAGE", "mainRole": "DPS",
                "mainSpec": "Fire", "rankName": "Member", "rankIndex": 4,
                "level": 79, "note": "Fire mage", "officerNote": "",
                "achievementPoints": 3000, "lastOnline": 1_704_240_000,
                "realmName": "TestRealm"
            },
            {
                "name": "Diana", "class": "DRUID", "mainRole": "DPS",
                "mainSpec": "Feral", "rankName": "Member", "rankIndex": 4,
                "level": 80, "note": "", "officerNote": "New member",
                "achievementPoints": 2000, "lastOnline": 1_704_326_400,
                "realmName": "TestRealm"
            }
        ]);
        serde_json::from_value(raw).unwrap()
    }

    fn filter(field: MemberField, operator: FilterOperator, value: &str) -> RosterFilter {
        RosterFilter {
            id: 1,
            field,
            operator,
            value: value.to_string(),
        }
    }

    fn names(members: &[RosterMember]) -> Vec<&str> {
        members.iter().map(|m| m.name.as_str()).collect()
    }

    #[test]
    fn test_no_filters_is_identity() {
        let members = mock_members();
        let result = apply_filters_at(&members, &[], true, NOW);
        assert_eq!(result, members);
    }

    #[test]
    fn test_equals() {
        let members = mock_members();
        let result = apply_filters_at(
            &members,
            &[filter(MemberField::Class, FilterOperator::Equals, "WARRIOR")],
            true,
            NOW,
        );
        assert_eq!(names(&result), vec!["Alice"]);
    }

    #[test]
    fn test_equals_is_case_insensitive() {
        let members = mock_members();
        let result = apply_filters_at(
            &members,
            &[filter(MemberField::Class, FilterOperator::Equals, "warrior")],
            true,
            NOW,
        );
        assert_eq!(names(&result), vec!["Alice"]);
    }

    #[test]
    fn test_not_equals() {
        let members = mock_members();
        let result = apply_filters_at(
            &members,
            &[filter(MemberField::Class, FilterOperator::NotEquals, "WARRIOR")],
            true,
            NOW,
        );
        assert_eq!(names(&result), vec!["Bob", "Charlie", "Diana"]);
    }

    #[test]
    fn test_contains_and_not_contains() {
        let members = mock_members();
        let result = apply_filters_at(
            &members,
            &[filter(MemberField::Note, FilterOperator::Contains, "mage")],
            true,
            NOW,
        );
        assert_eq!(names(&result), vec!["Charlie"]);

        let result = apply_filters_at(
            &members,
            &[filter(MemberField::Note, FilterOperator::NotContains, "mage")],
            true,
            NOW,
        );
        // Diana's note is empty, so even notContains does not match her.
        assert_eq!(names(&result), vec!["Alice", "Bob"]);
    }

    #[test]
    fn test_starts_with_and_ends_with() {
        let members = mock_members();
        let result = apply_filters_at(
            &members,
            &[filter(MemberField::Name, FilterOperator::StartsWith, "ali")],
            true,
            NOW,
        );
        assert_eq!(names(&result), vec!["Alice"]);

        let result = apply_filters_at(
            &members,
            &[filter(MemberField::Name, FilterOperator::EndsWith, "IE")],
            true,
            NOW,
        );
        assert_eq!(names(&result), vec!["Charlie"]);
    }

    #[test]
    fn test_greater_than_on_level() {
        let members: Vec<RosterMember> =
            serde_json::from_value(serde_json::json!([{"name":"A","level":80},{"name":"B","level":79}]))
                .unwrap();
        let result = apply_filters_at(
            &members,
            &[filter(MemberField::Level, FilterOperator::GreaterThan, "79")],
            true,
            NOW,
        );
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].level, 80);
    }

    #[test]
    fn test_ordered_comparisons_on_numeric_fields() {
        let members = mock_members();
        let lt = apply_filters_at(
            &members,
            &[filter(MemberField::Level, FilterOperator::LessThan, "80")],
            true,
            NOW,
        );
        assert_eq!(names(&lt), vec!["Charlie"]);

        let gte = apply_filters_at(
            &members,
            &[filter(
                MemberField::AchievementPoints,
                FilterOperator::GreaterThanOrEqual,
                "5000",
            )],
            true,
            NOW,
        );
        assert_eq!(names(&gte), vec!["Alice", "Bob"]);

        let lte = apply_filters_at(
            &members,
            &[filter(
                MemberField::AchievementPoints,
                FilterOperator::LessThanOrEqual,
                "2000",
            )],
            true,
            NOW,
        );
        assert_eq!(names(&lte), vec!["Diana"]);
    }

    #[test]
    fn test_unparseable_numeric_filter_value_never_matches() {
        let members = mock_members();
        let result = apply_filters_at(
            &members,
            &[filter(MemberField::Level, FilterOperator::GreaterThan, "high")],
            true,
            NOW,
        );
        assert!(result.is_empty());
    }

    #[test]
    fn test_match_all_and_logic() {
        let members = mock_members();
        let filters = vec![
            filter(MemberField::MainRole, FilterOperator::Equals, "DPS"),
            filter(MemberField::Level, FilterOperator::Equals, "80"),
        ];
        let result = apply_filters_at(&members, &filters, true, NOW);
        assert_eq!(names(&result), vec!["Diana"]);
    }

    #[test]
    fn test_match_any_or_logic() {
        let members = mock_members();
        let filters = vec![
            filter(MemberField::Class, FilterOperator::Equals, "WARRIOR"),
            filter(MemberField::Class, FilterOperator::Equals, "PRIEST"),
        ];
        let result = apply_filters_at(&members, &filters, false, NOW);
        assert_eq!(names(&result), vec!["Alice", "Bob"]);
    }

    #[test]
    fn test_empty_field_yields_no_match_for_regular_operators() {
        let members = mock_members();
        // Diana has an empty note; equality against anything fails for her.
        let result = apply_filters_at(
            &members,
            &[filter(MemberField::Note, FilterOperator::NotEquals, "something")],
            true,
            NOW,
        );
        assert_eq!(names(&result), vec!["Alice", "Bob", "Charlie"]);
    }

    #[test]
    fn test_is_empty_partition_is_complete() {
        let members = mock_members();
        let empty = apply_filters_at(
            &members,
            &[filter(MemberField::Note, FilterOperator::IsEmpty, "")],
            true,
            NOW,
        );
        let not_empty = apply_filters_at(
            &members,
            &[filter(MemberField::Note, FilterOperator::IsNotEmpty, "")],
            true,
            NOW,
        );
        assert_eq!(empty.len() + not_empty.len(), members.len());
        assert_eq!(names(&empty), vec!["Diana"]);
        assert_eq!(names(&not_empty), vec!["Alice", "Bob", "Charlie"]);
    }

    #[test]
    fn test_is_empty_on_unset_optional_field() {
        let members: Vec<RosterMember> = serde_json::from_value(serde_json::json!([
            {"name": "A", "mainSpec": "Fire"},
            {"name": "B"},
            {"name": "C", "mainSpec": "   "}
        ]))
        .unwrap();
        let result = apply_filters_at(
            &members,
            &[filter(MemberField::MainSpec, FilterOperator::IsEmpty, "")],
            true,
            NOW,
        );
        // Unset and whitespace-only both count as empty.
        assert_eq!(names(&result), vec!["B", "C"]);
    }

    #[test]
    fn test_days_offline_derived_field() {
        let members: Vec<RosterMember> = serde_json::from_value(serde_json::json!([
            {"name": "Fresh", "lastOnline": NOW - 86_400},
            {"name": "Stale", "lastOnline": NOW - 30 * 86_400},
            {"name": "Never", "lastOnline": 0}
        ]))
        .unwrap();
        let result = apply_filters_at(
            &members,
            &[filter(MemberField::DaysOffline, FilterOperator::GreaterThan, "7")],
            true,
            NOW,
        );
        // "Never" resolves to the -1 sentinel and does not match.
        assert_eq!(names(&result), vec!["Stale"]);
    }

    #[test]
    fn test_main_role_filters_by_display_name() {
        let members = mock_members();
        assert_eq!(members[0].main_role, Some(Role::Tank));
        let result = apply_filters_at(
            &members,
            &[filter(MemberField::MainRole, FilterOperator::Equals, "tank")],
            true,
            NOW,
        );
        assert_eq!(names(&result), vec!["Alice"]);
    }

    #[test]
    fn test_filter_deserializes_from_wire_shape() {
        let f: RosterFilter = serde_json::from_str(
            r#"{"id":3,"field":"achievementPoints","operator":"greaterThanOrEqual","value":"5000"}"#,
        )
        .unwrap();
        assert_eq!(f.field, MemberField::AchievementPoints);
        assert_eq!(f.operator, FilterOperator::GreaterThanOrEqual);
    }
}
