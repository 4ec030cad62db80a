//! Class/spec lookup table
//!
//! Maps each WoW class to its specializations and their roles. Class keys
//! match the uppercase `class` field of the addon export.

use super::Role;

/// One specialization entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecInfo {
    pub name: &'static str,
    pub role: Role,
}

const fn spec(name: &'static str, role: Role) -> SpecInfo {
    SpecInfo { name, role }
}

static WOW_SPECS: &[(&str, &[SpecInfo])] = &[
    (
        "WARRIOR",
        &[
            spec("Arms", Role::DPS),
            spec("Fury", Role::DPS),
            spec("Protection", Role::Tank),
        ],
    ),
    (
        "PALADIN",
        &[
            spec("Holy", Role::Healer),
            spec("Protection", Role::Tank),
            spec("Retribution", Role::DPS),
        ],
    ),
    (
        "HUNTER",
        &[
            spec("Beast Mastery", Role::DPS),
            spec("Marksmanship", Role::DPS),
            spec("Survival", Role::DPS),
        ],
    ),
    (
        "ROGUE",
        &[
            spec("Assassination", Role::DPS),
            spec("Outlaw", Role::DPS),
            spec("Subtlety", Role::DPS),
        ],
    ),
    (
        "PRIEST",
        &[
            spec("Discipline", Role::Healer),
            spec("Holy", Role::Healer),
            spec("Shadow", Role::DPS),
        ],
    ),
    (
        "DEATHKNIGHT",
        &[
            spec("Blood", Role::Tank),
            spec("Frost", Role::DPS),
            spec("Unholy", Role::DPS),
        ],
    ),
    (
        "SHAMAN",
        &[
            spec("Elemental", Role::DPS),
            spec("Enhancement", Role::DPS),
            spec("Restoration", Role::Healer),
        ],
    ),
    (
        "MAGE",
        &[
            spec("Arcane", Role::DPS),
            spec("Fire", Role::DPS),
            spec("Frost", Role::DPS),
        ],
    ),
    (
        "WARLOCK",
        &[
            spec("Affliction", Role::DPS),
            spec("Demonology", Role::DPS),
            spec("Destruction", Role::DPS),
        ],
    ),
    (
        "MONK",
        &[
            spec("Brewmaster", Role::Tank),
            spec("Mistweaver", Role::Healer),
            spec("Windwalker", Role::DPS),
        ],
    ),
    (
        "DRUID",
        &[
            spec("Balance", Role::DPS),
            spec("Feral", Role::DPS),
            spec("Guardian", Role::Tank),
            spec("Restoration", Role::Healer),
        ],
    ),
    (
        "DEMONHUNTER",
        &[
            spec("Havoc", Role::DPS),
            spec("Vengeance", Role::Tank),
            spec("Devourer", Role::DPS),
        ],
    ),
    (
        "EVOKER",
        &[
            spec("Devastation", Role::DPS),
            spec("Preservation", Role::Healer),
            spec("Augmentation", Role::DPS),
        ],
    ),
];

/// Specializations for a class; class name matching is case-insensitive.
/// Unknown classes yield an empty slice.
pub fn specs_for_class(class: &str) -> &'static [SpecInfo] {
    let upper = class.to_uppercase();
    WOW_SPECS
        .iter()
        .find(|(name, _)| *name == upper)
        .map_or(&[], |(_, specs)| specs)
}

/// Role for a spec of a class, if the pair is known.
pub fn role_for_spec(class: &str, spec_name: &str) -> Option<Role> {
    specs_for_class(class)
        .iter()
        .find(|s| s.name == spec_name)
        .map(|s| s.role)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_class_has_specs() {
        assert_eq!(WOW_SPECS.len(), 13);
        for (class, specs) in WOW_SPECS {
            assert!(!specs.is_empty(), "{class} has no specs");
        }
    }

    #[test]
    fn test_role_for_spec() {
        assert_eq!(role_for_spec("WARRIOR", "Protection"), Some(Role::Tank));
        assert_eq!(role_for_spec("PALADIN", "Protection"), Some(Role::Tank));
        assert_eq!(role_for_spec("PRIEST", "Holy"), Some(Role::Healer));
        assert_eq!(role_for_spec("MAGE", "Fire"), Some(Role::DPS));
        assert_eq!(role_for_spec("MAGE", "Holy"), None);
        assert_eq!(role_for_spec("GNOME", "Tinker"), None);
    }

    #[test]
    fn test_class_lookup_is_case_insensitive() {
        assert_eq!(specs_for_class("druid").len(), 4);
        assert_eq!(specs_for_class("Druid").len(), 4);
        assert_eq!(role_for_spec("druid", "Guardian"), Some(Role::Tank));
    }
}
