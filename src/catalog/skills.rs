//! Skill catalog
//!
//! Simple skills scale off one stat: elemental skills off magical attack,
//! unelemental skills off physical attack. Combo skills blend both and are
//! gated by the independent physical and magical sub-levels.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::catalog::tags::{AttackType, Element};
use crate::catalog::weapons::WeaponDef;
use crate::core::error::GameError;

/// Key into the skill catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillKey {
    Fire,
    Ice,
    Thunder,
    Holy,
    PowerStrike,
    Heal,
    FlameSlash,
    ThunderCrush,
    FrostArrow,
}

impl SkillKey {
    pub const ALL: [SkillKey; 9] = [
        SkillKey::Fire,
        SkillKey::Ice,
        SkillKey::Thunder,
        SkillKey::Holy,
        SkillKey::PowerStrike,
        SkillKey::Heal,
        SkillKey::FlameSlash,
        SkillKey::ThunderCrush,
        SkillKey::FrostArrow,
    ];

    pub fn def(self) -> &'static SkillDef {
        // SKILLS is declared in variant order
        &SKILLS[self as usize]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SkillKey::Fire => "fire",
            SkillKey::Ice => "ice",
            SkillKey::Thunder => "thunder",
            SkillKey::Holy => "holy",
            SkillKey::PowerStrike => "power_strike",
            SkillKey::Heal => "heal",
            SkillKey::FlameSlash => "flame_slash",
            SkillKey::ThunderCrush => "thunder_crush",
            SkillKey::FrostArrow => "frost_arrow",
        }
    }
}

impl FromStr for SkillKey {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SkillKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| GameError::UnknownKey(s.to_string()))
    }
}

/// How a damaging skill converts stats into attack power
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SkillPower {
    Simple(f64),
    Combo { physical: f64, magical: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SkillEffect {
    Damage {
        power: SkillPower,
        element: Option<Element>,
    },
    /// Restores `max_hp * ratio * 0.5`
    Heal { ratio: f64 },
}

/// Immutable skill entry
#[derive(Debug, Clone, PartialEq)]
pub struct SkillDef {
    pub key: SkillKey,
    pub name: &'static str,
    pub icon: &'static str,
    pub cost: u32,
    pub effect: SkillEffect,
    pub required_physical_level: Option<u32>,
    pub required_magical_level: Option<u32>,
    pub required_weapon_type: Option<AttackType>,
}

impl SkillDef {
    pub fn element(&self) -> Option<Element> {
        match self.effect {
            SkillEffect::Damage { element, .. } => element,
            SkillEffect::Heal { .. } => None,
        }
    }

    pub fn is_combo(&self) -> bool {
        matches!(
            self.effect,
            SkillEffect::Damage {
                power: SkillPower::Combo { .. },
                ..
            }
        )
    }

    /// Unlock predicate over both sub-levels and the equipped weapon
    pub fn is_unlocked(&self, physical_level: u32, magical_level: u32, weapon: &WeaponDef) -> bool {
        let physical_ok = self
            .required_physical_level
            .map_or(true, |required| physical_level >= required);
        let magical_ok = self
            .required_magical_level
            .map_or(true, |required| magical_level >= required);
        let weapon_ok = self
            .required_weapon_type
            .map_or(true, |required| weapon.has_type(required));
        physical_ok && magical_ok && weapon_ok
    }
}

pub static SKILLS: [SkillDef; 9] = [
    SkillDef {
        key: SkillKey::Fire,
        name: "Fire",
        icon: "🔥",
        cost: 10,
        effect: SkillEffect::Damage {
            power: SkillPower::Simple(1.8),
            element: Some(Element::Fire),
        },
        required_physical_level: None,
        required_magical_level: None,
        required_weapon_type: None,
    },
    SkillDef {
        key: SkillKey::Ice,
        name: "Ice",
        icon: "❄️",
        cost: 12,
        effect: SkillEffect::Damage { power: SkillPower::Simple(1.6), element: Some(Element::Ice) },
        required_physical_level: None,
        required_magical_level: None,
        required_weapon_type: None,
    },
    SkillDef {
        key: SkillKey::Thunder,
        name: "Thunder",
        icon: "⚡",
        cost: 20,
        effect: SkillEffect::Damage {
            power: SkillPower::Simple(2.2),
            element: Some(Element::Lightning),
        },
        required_physical_level: None,
        required_magical_level: None,
        required_weapon_type: None,
    },
    SkillDef {
        key: SkillKey::Holy,
        name: "Holy Light",
        icon: "✨",
        cost: 18,
        effect: SkillEffect::Damage {
            power: SkillPower::Simple(2.0),
            element: Some(Element::Holy),
        },
        required_physical_level: None,
        required_magical_level: Some(3),
        required_weapon_type: None,
    },
    SkillDef {
        key: SkillKey::PowerStrike,
        name: "Power Strike",
        icon: "💥",
        cost: 25,
        effect: SkillEffect::Damage { power: SkillPower::Simple(3.0), element: None },
        required_physical_level: None,
        required_magical_level: None,
        required_weapon_type: None,
    },
    SkillDef {
        key: SkillKey::Heal,
        name: "Heal",
        icon: "💚",
        cost: 15,
        effect: SkillEffect::Heal { ratio: 0.8 },
        required_physical_level: None,
        required_magical_level: None,
        required_weapon_type: None,
    },
    SkillDef {
        key: SkillKey::FlameSlash,
        name: "Flame Slash",
        icon: "🔥",
        cost: 22,
        effect: SkillEffect::Damage {
            power: SkillPower::Combo { physical: 1.2, magical: 1.0 },
            element: Some(Element::Fire),
        },
        required_physical_level: Some(3),
        required_magical_level: Some(2),
        required_weapon_type: Some(AttackType::Slash),
    },
    SkillDef {
        key: SkillKey::ThunderCrush,
        name: "Thunder Crush",
        icon: "⚡",
        cost: 28,
        effect: SkillEffect::Damage {
            power: SkillPower::Combo { physical: 1.5, magical: 1.2 },
            element: Some(Element::Lightning),
        },
        required_physical_level: Some(4),
        required_magical_level: Some(3),
        required_weapon_type: Some(AttackType::Blunt),
    },
    SkillDef {
        key: SkillKey::FrostArrow,
        name: "Frost Arrow",
        icon: "❄️",
        cost: 20,
        effect: SkillEffect::Damage {
            power: SkillPower::Combo { physical: 1.0, magical: 1.3 },
            element: Some(Element::Ice),
        },
        required_physical_level: Some(2),
        required_magical_level: Some(3),
        required_weapon_type: Some(AttackType::Pierce),
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::weapons::WeaponKey;

    #[test]
    fn test_catalog_keys_line_up() {
        for key in SkillKey::ALL {
            assert_eq!(key.def().key, key);
            assert_eq!(key.as_str().parse::<SkillKey>().unwrap(), key);
        }
    }

    #[test]
    fn test_simple_skills_unlocked_from_start() {
        let sword = WeaponKey::Sword.def();
        assert!(SkillKey::Fire.def().is_unlocked(1, 1, sword));
        assert!(SkillKey::Heal.def().is_unlocked(1, 1, sword));
        assert!(!SkillKey::Holy.def().is_unlocked(1, 1, sword));
        assert!(SkillKey::Holy.def().is_unlocked(1, 3, sword));
    }

    #[test]
    fn test_combo_skill_needs_levels_and_weapon_type() {
        let flame_slash = SkillKey::FlameSlash.def();
        assert!(flame_slash.is_combo());
        assert!(!flame_slash.is_unlocked(2, 2, WeaponKey::Sword.def()));
        assert!(!flame_slash.is_unlocked(3, 1, WeaponKey::Sword.def()));
        assert!(flame_slash.is_unlocked(3, 2, WeaponKey::Sword.def()));
        assert!(!flame_slash.is_unlocked(3, 2, WeaponKey::Club.def()));
    }

    #[test]
    fn test_heal_has_no_element() {
        assert_eq!(SkillKey::Heal.def().element(), None);
        assert_eq!(SkillKey::Thunder.def().element(), Some(Element::Lightning));
    }
}
