use thiserror::Error;

use crate::catalog::{ItemKey, SkillKey, WeaponKey};

#[derive(Error, Debug)]
pub enum GameError {
    #[error("It is not the player's turn")]
    NotPlayerTurn,

    #[error("No battle is active")]
    NoActiveBattle,

    #[error("Cannot do that while a battle is in progress")]
    BattleInProgress,

    #[error("The hero has fallen; restart to play again")]
    PlayerDefeated,

    #[error("Not enough MP for {skill:?}: need {need}, have {have}")]
    InsufficientMp { skill: SkillKey, need: u32, have: u32 },

    #[error("Skill {0:?} is not unlocked yet")]
    SkillLocked(SkillKey),

    #[error("No {0:?} left")]
    ItemEmpty(ItemKey),

    #[error("Not enough gold: need {need}, have {have}")]
    InsufficientGold { need: u32, have: u32 },

    #[error("Cannot carry more {0:?}")]
    InventoryFull(ItemKey),

    #[error("Weapon {0:?} is not owned")]
    WeaponNotOwned(WeaponKey),

    #[error("Weapon {0:?} is already owned")]
    WeaponAlreadyOwned(WeaponKey),

    #[error("The default weapon cannot be sold")]
    CannotSellDefaultWeapon,

    #[error("Weapon {0:?} is not for sale")]
    NotForSale(WeaponKey),

    #[error("Unknown key: {0}")]
    UnknownKey(String),

    #[error("No save data in slot")]
    NoSaveData,

    #[error("Corrupt save data: {0}")]
    CorruptSave(#[from] serde_json::Error),

    #[error("Save schema version {found} is newer than supported version {supported}")]
    UnsupportedSchema { found: u32, supported: u32 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

impl GameError {
    /// Command rejected by game rules (as opposed to a storage or config failure)
    pub fn is_rejection(&self) -> bool {
        !matches!(
            self,
            GameError::NoSaveData
                | GameError::CorruptSave(_)
                | GameError::UnsupportedSchema { .. }
                | GameError::Io(_)
                | GameError::InvalidConfig(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, GameError>;
