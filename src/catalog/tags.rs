//! Damage tags: physical attack types, elements, and the wound channels they feed

use serde::{Deserialize, Serialize};

/// Physical attack type carried by weapons
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttackType {
    Slash,
    Blunt,
    Pierce,
}

/// Magical element carried by skills
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Fire,
    Lightning,
    Holy,
    Ice,
}

/// One of the seven per-enemy wound counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WoundChannel {
    Slash,
    Blunt,
    Pierce,
    Fire,
    Lightning,
    Holy,
    Ice,
}

impl WoundChannel {
    pub const ALL: [WoundChannel; 7] = [
        WoundChannel::Slash,
        WoundChannel::Blunt,
        WoundChannel::Pierce,
        WoundChannel::Fire,
        WoundChannel::Lightning,
        WoundChannel::Holy,
        WoundChannel::Ice,
    ];

    /// Physical channels erode physical defense, the rest erode magical defense
    pub fn is_physical(&self) -> bool {
        matches!(
            self,
            WoundChannel::Slash | WoundChannel::Blunt | WoundChannel::Pierce
        )
    }
}

impl From<AttackType> for WoundChannel {
    fn from(attack: AttackType) -> Self {
        match attack {
            AttackType::Slash => WoundChannel::Slash,
            AttackType::Blunt => WoundChannel::Blunt,
            AttackType::Pierce => WoundChannel::Pierce,
        }
    }
}

impl From<Element> for WoundChannel {
    fn from(element: Element) -> Self {
        match element {
            Element::Fire => WoundChannel::Fire,
            Element::Lightning => WoundChannel::Lightning,
            Element::Holy => WoundChannel::Holy,
            Element::Ice => WoundChannel::Ice,
        }
    }
}
