//! Main-role value object

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// A member's user-assigned main role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Tank,
    #[allow(clippy::upper_case_acronyms)]
    DPS,
    Healer,
}

impl Role {
    /// All roles, in the order the roster UI lists them.
    pub const ALL: [Role; 3] = [Role::Tank, Role::DPS, Role::Healer];

    /// Map a Raider.IO `active_spec_role` value onto a roster role.
    ///
    /// Raider.IO reports `TANK`, `DPS`, and `HEALING`.
    pub fn from_rio(value: &str) -> Option<Self> {
        match value {
            "TANK" => Some(Self::Tank),
            "DPS" => Some(Self::DPS),
            "HEALING" => Some(Self::Healer),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tank => "Tank",
            Self::DPS => "DPS",
            Self::Healer => "Healer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Tank" => Ok(Self::Tank),
            "DPS" => Ok(Self::DPS),
            "Healer" => Ok(Self::Healer),
            other => Err(DomainError::UnknownRole(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_round_trip() {
        assert_eq!(serde_json::to_string(&Role::Tank).unwrap(), "\"Tank\"");
        assert_eq!(serde_json::to_string(&Role::DPS).unwrap(), "\"DPS\"");
        assert_eq!(serde_json::to_string(&Role::Healer).unwrap(), "\"Healer\"");
        let role: Role = serde_json::from_str("\"Healer\"").unwrap();
        assert_eq!(role, Role::Healer);
    }

    #[test]
    fn test_rio_mapping() {
        assert_eq!(Role::from_rio("TANK"), Some(Role::Tank));
        assert_eq!(Role::from_rio("DPS"), Some(Role::DPS));
        assert_eq!(Role::from_rio("HEALING"), Some(Role::Healer));
        assert_eq!(Role::from_rio("Healer"), None);
        assert_eq!(Role::from_rio(""), None);
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        assert!("Tank".parse::<Role>().is_ok());
        assert!("tank".parse::<Role>().is_err());
        assert!("Support".parse::<Role>().is_err());
    }
}
