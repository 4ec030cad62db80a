//! Domain entities

mod member;
mod roster;

pub use member::{days_offline, RosterMember};
pub use roster::{current_version_string, RosterData};
