//! Filter/sort engine
//!
//! A pure, stateless query layer over an in-memory member list: predicate
//! evaluation for field/operator/value filters, comparator-based sorting,
//! and small count aggregations. Nothing here mutates its input.

mod filters;
mod sort;

pub use filters::{
    apply_filters, apply_filters_at, matches_filter_at, FilterOperator, RosterFilter,
};
pub use sort::{sort_members, sort_members_at, SortDirection};

use serde::{Deserialize, Serialize};

use crate::entities::{days_offline, RosterMember};

/// A filterable/sortable member field, including the derived `daysOffline`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MemberField {
    Name,
    Class,
    Level,
    RankName,
    RankIndex,
    MainSpec,
    MainRole,
    Zone,
    Note,
    OfficerNote,
    Status,
    AchievementPoints,
    AchievementRank,
    LastOnline,
    DaysOffline,
    RealmName,
    RioMythicPlusScore,
    RioRaidProgress,
    RioActiveSpecName,
    RioLastCrawled,
}

/// A resolved field value, before operator-specific coercion.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum FieldValue {
    Str(String),
    Num(f64),
}

impl FieldValue {
    /// Render the value the way the comparison layer stringifies it.
    /// Whole numbers print without a fractional part.
    pub(crate) fn to_display_string(&self) -> String {
        match self {
            Self::Str(s) => s.clone(),
            Self::Num(n) => {
                if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    n.to_string()
                }
            }
        }
    }
}

impl MemberField {
    /// The fixed set of fields compared numerically; everything else is
    /// compared as a case-insensitive string.
    #[must_use]
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            Self::Level | Self::AchievementPoints | Self::RioMythicPlusScore | Self::DaysOffline
        )
    }

    /// Resolve this field on a member. `now` (Unix seconds) feeds the
    /// derived `daysOffline` field. `None` means the field is unset.
    pub(crate) fn resolve(self, member: &RosterMember, now: i64) -> Option<FieldValue> {
        use FieldValue::{Num, Str};
        match self {
            Self::Name => Some(Str(member.name.clone())),
            Self::Class => Some(Str(member.class.clone())),
            Self::Level => Some(Num(member.level as f64)),
            Self::RankName => Some(Str(member.rank_name.clone())),
            Self::RankIndex => Some(Num(member.rank_index as f64)),
            Self::MainSpec => member.main_spec.clone().map(Str),
            Self::MainRole => member.main_role.map(|r| Str(r.as_str().to_string())),
            Self::Zone => member.zone.clone().map(Str),
            Self::Note => Some(Str(member.note.clone())),
            Self::OfficerNote => Some(Str(member.officer_note.clone())),
            Self::Status => Some(Num(member.status as f64)),
            Self::AchievementPoints => Some(Num(member.achievement_points as f64)),
            Self::AchievementRank => Some(Num(member.achievement_rank as f64)),
            Self::LastOnline => Some(Num(member.last_online as f64)),
            Self::DaysOffline => Some(Num(days_offline(member.last_online, now) as f64)),
            Self::RealmName => Some(Str(member.realm_name.clone())),
            Self::RioMythicPlusScore => member.rio_mythic_plus_score.map(Num),
            Self::RioRaidProgress => member.rio_raid_progress.clone().map(Str),
            Self::RioActiveSpecName => member.rio_active_spec_name.clone().map(Str),
            Self::RioLastCrawled => member.rio_last_crawled.clone().map(Str),
        }
    }
}

/// Members per role, counting only members with an assigned role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RoleCounts {
    pub tank: usize,
    pub dps: usize,
    pub healer: usize,
}

/// Count members by assigned main role.
pub fn role_counts(members: &[RosterMember]) -> RoleCounts {
    use crate::value_objects::Role;

    let mut counts = RoleCounts::default();
    for member in members {
        match member.main_role {
            Some(Role::Tank) => counts.tank += 1,
            Some(Role::DPS) => counts.dps += 1,
            Some(Role::Healer) => counts.healer += 1,
            None => {}
        }
    }
    counts
}

/// Count members by class.
pub fn class_counts(members: &[RosterMember]) -> std::collections::HashMap<String, usize> {
    let mut counts = std::collections::HashMap::new();
    for member in members {
        *counts.entry(member.class.clone()).or_insert(0) += 1;
    }
    counts
}
