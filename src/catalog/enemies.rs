//! Enemy species templates and level scaling

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::catalog::tags::{AttackType, Element};

/// Attack types and elements a species is vulnerable to
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Weaknesses {
    #[serde(default)]
    pub attack_types: BTreeSet<AttackType>,
    #[serde(default)]
    pub elements: BTreeSet<Element>,
}

impl Weaknesses {
    pub fn new(attack_types: &[AttackType], elements: &[Element]) -> Self {
        Self {
            attack_types: attack_types.iter().copied().collect(),
            elements: elements.iter().copied().collect(),
        }
    }

    pub fn is_weak_to_attack(&self, attack: AttackType) -> bool {
        self.attack_types.contains(&attack)
    }

    pub fn is_weak_to_element(&self, element: Element) -> bool {
        self.elements.contains(&element)
    }
}

/// Immutable species entry; stats are at level 1
#[derive(Debug, Clone, PartialEq)]
pub struct EnemyTemplate {
    pub name: &'static str,
    pub sprite: &'static str,
    pub hp: u32,
    pub attack: u32,
    pub physical_defense: u32,
    pub magical_defense: u32,
    pub exp: u32,
    pub gold: u32,
    pub weak_attack_types: &'static [AttackType],
    pub weak_elements: &'static [Element],
}

impl EnemyTemplate {
    pub fn weaknesses(&self) -> Weaknesses {
        Weaknesses::new(self.weak_attack_types, self.weak_elements)
    }
}

pub static ENEMY_TEMPLATES: [EnemyTemplate; 5] = [
    EnemyTemplate {
        name: "Slime",
        sprite: "🟢",
        hp: 60,
        attack: 15,
        physical_defense: 5,
        magical_defense: 3,
        exp: 25,
        gold: 50,
        weak_attack_types: &[AttackType::Slash],
        weak_elements: &[Element::Fire],
    },
    EnemyTemplate {
        name: "Goblin",
        sprite: "👺",
        hp: 80,
        attack: 22,
        physical_defense: 8,
        magical_defense: 6,
        exp: 35,
        gold: 75,
        weak_attack_types: &[AttackType::Pierce],
        weak_elements: &[Element::Lightning],
    },
    EnemyTemplate {
        name: "Orc",
        sprite: "👹",
        hp: 120,
        attack: 28,
        physical_defense: 12,
        magical_defense: 8,
        exp: 50,
        gold: 100,
        weak_attack_types: &[AttackType::Blunt],
        weak_elements: &[Element::Fire],
    },
    EnemyTemplate {
        name: "Dragon",
        sprite: "🐉",
        hp: 200,
        attack: 45,
        physical_defense: 20,
        magical_defense: 18,
        exp: 100,
        gold: 200,
        weak_attack_types: &[AttackType::Pierce],
        weak_elements: &[Element::Ice],
    },
    EnemyTemplate {
        name: "Demon",
        sprite: "😈",
        hp: 300,
        attack: 60,
        physical_defense: 25,
        magical_defense: 30,
        exp: 150,
        gold: 300,
        weak_attack_types: &[AttackType::Slash, AttackType::Blunt],
        weak_elements: &[Element::Holy],
    },
];

/// Species faced at a given character level: one step every two levels
pub fn template_for_level(level: u32) -> &'static EnemyTemplate {
    let index = ((level / 2) as usize).min(ENEMY_TEMPLATES.len() - 1);
    &ENEMY_TEMPLATES[index]
}

/// Stat scalar at a given character level, in percent: +20 per level above 1
pub fn level_multiplier_percent(level: u32) -> u32 {
    100 + level.saturating_sub(1).saturating_mul(20)
}

/// Scale a template stat by a percent scalar, flooring the result
pub fn scale(stat: u32, percent: u32) -> u32 {
    (stat as u64 * percent as u64 / 100).min(u32::MAX as u64) as u32
}

pub fn template_by_name(name: &str) -> Option<&'static EnemyTemplate> {
    ENEMY_TEMPLATES.iter().find(|template| template.name == name)
}
