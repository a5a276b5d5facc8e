//! Static catalogs: weapons, skills, enemy species and items
//!
//! Pure data plus lookups. Nothing here holds game state.

pub mod enemies;
pub mod items;
pub mod skills;
pub mod tags;
pub mod weapons;

pub use enemies::{
    level_multiplier_percent, scale, template_by_name, template_for_level, EnemyTemplate,
    Weaknesses, ENEMY_TEMPLATES,
};
pub use items::{ItemDef, ItemEffect, ItemKey, ITEMS};
pub use skills::{SkillDef, SkillEffect, SkillKey, SkillPower, SKILLS};
pub use tags::{AttackType, Element, WoundChannel};
pub use weapons::{WeaponDef, WeaponKey, WEAPONS};
