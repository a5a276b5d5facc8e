//! Game engine: the turn controller and the battle command surface
//!
//! `Game` owns every piece of session state and is the only mutator. Each
//! command validates its preconditions first; a refused command pushes a
//! `Rejected` event and leaves state unchanged. Enemy turns are not run
//! inline: after a player action the phase becomes `EnemyDeciding` and the
//! adapter calls `advance_turn` once `pending_delay` has elapsed.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::{debug, info, warn};

use crate::battle::events::{EventLog, EventSink, GameEvent};
use crate::battle::phase::TurnPhase;
use crate::catalog::{ItemEffect, ItemKey, SkillEffect, SkillKey};
use crate::combat::constants::{COMBO_PER_ATTACK, COMBO_PER_SKILL, GUARD_MP_RESTORE};
use crate::combat::{
    heal_amount, resolve_enemy_turn, resolve_item_damage, resolve_physical_attack, resolve_skill,
    DamageResult, EnemyMove, LandedWounds,
};
use crate::core::types::{BattleOutcome, Screen, Target};
use crate::core::{GameConfig, GameError, Result};
use crate::entity::{Enemy, Inventory, Player};
use crate::persistence::{self, LoadWarning, Restored, SaveSlot};
use crate::progression::{award_victory, gain_magical_exp, gain_physical_exp, GameState, LevelUp};

pub struct Game {
    pub(crate) config: GameConfig,
    pub(crate) state: GameState,
    pub(crate) player: Player,
    pub(crate) items: Inventory,
    pub(crate) enemy: Option<Enemy>,
    pub(crate) phase: TurnPhase,
    pub(crate) screen: Screen,
    rng: ChaCha8Rng,
    events: EventLog,
}

impl Game {
    /// Fresh session; the first battle starts immediately
    ///
    /// Fails with `InvalidConfig` before any state is built.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        Ok(Self::start(config, seed))
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::start(GameConfig::default(), seed)
    }

    fn start(config: GameConfig, seed: u64) -> Self {
        let mut game = Self {
            config,
            state: GameState::default(),
            player: Player::default(),
            items: Inventory::starting(),
            enemy: None,
            phase: TurnPhase::default(),
            screen: Screen::Battle,
            rng: ChaCha8Rng::seed_from_u64(seed),
            events: EventLog::new(),
        };
        game.begin_battle();
        game
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn items(&self) -> &Inventory {
        &self.items
    }

    pub fn enemy(&self) -> Option<&Enemy> {
        self.enemy.as_ref()
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Direct access for harnesses and cheats; invariants are the caller's job
    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn enemy_mut(&mut self) -> Option<&mut Enemy> {
        self.enemy.as_mut()
    }

    /// An enemy is alive and the battle has not ended
    pub fn battle_in_progress(&self) -> bool {
        self.enemy.is_some() && !self.phase.is_over()
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain()
    }

    pub fn forward_events(&mut self, sink: &mut impl EventSink) {
        for event in self.events.drain() {
            sink.emit(event);
        }
    }

    pub(crate) fn log(&mut self, message: impl Into<String>) {
        self.events.log(message);
    }

    pub(crate) fn reject<T>(&mut self, error: GameError) -> Result<T> {
        debug!(%error, "command rejected");
        self.events.push(GameEvent::Rejected {
            reason: error.to_string(),
        });
        self.events.log(format!("❌ {}", error));
        Err(error)
    }

    fn require_actionable(&mut self) -> Result<()> {
        if !self.battle_in_progress() {
            return self.reject(GameError::NoActiveBattle);
        }
        if !self.phase.accepts_player_action() {
            return self.reject(GameError::NotPlayerTurn);
        }
        Ok(())
    }

    // === BATTLE LIFECYCLE ===

    pub(crate) fn begin_battle(&mut self) {
        let enemy = Enemy::spawn(self.state.level);
        info!(enemy = %enemy.name, level = self.state.level, "battle started");
        self.events
            .log(format!("⚔️ A wild {} {} appears!", enemy.sprite, enemy.name));
        self.enemy = Some(enemy);
        self.player.reset_for_battle();
        self.phase = TurnPhase::PlayerActionable;
        self.screen = Screen::Battle;
    }

    /// Leave the result screen for a new battle; items may restock
    pub fn next_battle(&mut self) -> Result<()> {
        if self.battle_in_progress() {
            return self.reject(GameError::BattleInProgress);
        }
        if self.player.is_defeated() {
            return self.reject(GameError::PlayerDefeated);
        }

        let restocked = self.items.restock(
            &mut self.rng,
            self.config.restock_chance,
            self.config.restock_cap,
        );
        for key in restocked {
            self.events.log(format!("📦 Found a {}!", key.def().name));
        }
        self.begin_battle();
        Ok(())
    }

    pub fn return_to_town(&mut self) -> Result<()> {
        if self.battle_in_progress() {
            return self.reject(GameError::BattleInProgress);
        }
        if self.player.is_defeated() {
            return self.reject(GameError::PlayerDefeated);
        }
        self.enemy = None;
        self.screen = Screen::Town;
        self.log("🏘️ Back in town.");
        Ok(())
    }

    /// Reset progression, the hero and items; starts a new battle
    pub fn restart(&mut self) {
        self.state = GameState::default();
        self.player = Player::default();
        self.items = Inventory::starting();
        info!("game restarted");
        self.log("🎮 A new adventure begins!");
        self.begin_battle();
    }

    // === PLAYER ACTIONS ===

    pub fn attack(&mut self) -> Result<()> {
        self.require_actionable()?;
        let (result, landed) = match self.enemy.as_mut() {
            Some(enemy) => {
                resolve_physical_attack(&self.player, enemy, &mut self.rng, &self.config)
            }
            None => return self.reject(GameError::NoActiveBattle),
        };
        self.phase = TurnPhase::PlayerResolving;

        self.player.extend_combo(COMBO_PER_ATTACK);
        self.emit_strike(&result, &landed);
        let crit = if result.critical { "💥 Critical! " } else { "" };
        self.log(format!(
            "{}⚔️ {} deals {} damage with the {} (combo {})",
            crit,
            self.player.name,
            result.total,
            self.player.weapon().name,
            self.player.combo
        ));

        let ups = gain_physical_exp(&mut self.player, self.config.physical_exp_per_attack);
        self.emit_level_ups(&ups);
        self.finish_player_action();
        Ok(())
    }

    pub fn use_skill(&mut self, key: SkillKey) -> Result<()> {
        self.require_actionable()?;
        let skill = key.def();
        if !skill.is_unlocked(
            self.player.physical_level,
            self.player.magical_level,
            self.player.weapon(),
        ) {
            return self.reject(GameError::SkillLocked(key));
        }
        if !self.player.spend_mp(skill.cost) {
            let have = self.player.mp;
            return self.reject(GameError::InsufficientMp {
                skill: key,
                need: skill.cost,
                have,
            });
        }
        self.phase = TurnPhase::PlayerResolving;

        match skill.effect {
            SkillEffect::Heal { ratio } => {
                let amount = heal_amount(&self.player, ratio);
                self.player.heal(amount);
                self.events.push(GameEvent::Damage {
                    target: Target::Player,
                    amount,
                    critical: false,
                    heal: true,
                });
                self.log(format!("{} {} restores {} HP", skill.icon, skill.name, amount));
            }
            SkillEffect::Damage { .. } => {
                let outcome = match self.enemy.as_mut() {
                    Some(enemy) => {
                        resolve_skill(&self.player, skill, enemy, &mut self.rng, &self.config)
                    }
                    None => None,
                };
                if let Some((result, landed)) = outcome {
                    self.player.extend_combo(COMBO_PER_SKILL);
                    self.emit_strike(&result, &landed);
                    let crit = if result.critical { " Critical!" } else { "" };
                    self.log(format!(
                        "{} {} deals {} damage!{} (combo {})",
                        skill.icon, skill.name, result.total, crit, self.player.combo
                    ));

                    let mut ups =
                        gain_magical_exp(&mut self.player, self.config.magical_exp_per_skill);
                    if skill.is_combo() {
                        ups.extend(gain_physical_exp(
                            &mut self.player,
                            self.config.physical_exp_per_attack,
                        ));
                    }
                    self.emit_level_ups(&ups);
                }
            }
        }

        self.finish_player_action();
        Ok(())
    }

    pub fn use_item(&mut self, key: ItemKey) -> Result<()> {
        self.require_actionable()?;
        if !self.items.consume(key) {
            return self.reject(GameError::ItemEmpty(key));
        }
        self.phase = TurnPhase::PlayerResolving;

        let item = key.def();
        match item.effect {
            ItemEffect::RestoreHp(amount) => {
                self.player.heal(amount);
                self.push_heal(amount);
                self.log(format!("{} {} restores {} HP", item.icon, item.name, amount));
            }
            ItemEffect::RestoreMp(amount) => {
                self.player.restore_mp(amount);
                self.push_heal(amount);
                self.log(format!("{} {} restores {} MP", item.icon, item.name, amount));
            }
            ItemEffect::Damage(power) => {
                let dealt = match self.enemy.as_mut() {
                    Some(enemy) => resolve_item_damage(power, enemy, &mut self.rng, &self.config),
                    None => 0,
                };
                self.events.push(GameEvent::Damage {
                    target: Target::Enemy,
                    amount: dealt,
                    critical: false,
                    heal: false,
                });
                self.log(format!("{} {} deals {} damage!", item.icon, item.name, dealt));
            }
        }

        self.finish_player_action();
        Ok(())
    }

    /// Halve the next enemy hit and recover a little MP
    pub fn guard(&mut self) -> Result<()> {
        self.require_actionable()?;
        self.phase = TurnPhase::PlayerResolving;
        self.player.is_guarding = true;
        let restored = self.player.restore_mp(GUARD_MP_RESTORE);
        self.log(format!(
            "🛡️ {} takes a defensive stance (+{} MP)",
            self.player.name, restored
        ));
        self.finish_player_action();
        Ok(())
    }

    fn push_heal(&mut self, amount: u32) {
        self.events.push(GameEvent::Damage {
            target: Target::Player,
            amount,
            critical: false,
            heal: true,
        });
    }

    fn emit_strike(&mut self, result: &DamageResult, landed: &LandedWounds) {
        for &amount in &result.hits {
            self.events.push(GameEvent::Damage {
                target: Target::Enemy,
                amount,
                critical: result.critical,
                heal: false,
            });
        }
        if result.hit_weakness() {
            self.log(format!(
                "🎯 Weakness! x{} damage",
                result.weakness_multiplier
            ));
        }
        for &(channel, count) in &landed.opened {
            self.events.push(GameEvent::Wound { channel, count });
            self.log(format!("🩸 {:?} wound x{}", channel, count));
        }
    }

    fn emit_level_ups(&mut self, ups: &[LevelUp]) {
        for up in ups {
            self.events.push(GameEvent::LevelUp {
                kind: up.kind,
                level: up.level,
                deltas: up.deltas,
            });
            self.log(format!("🌟 {:?} level {}!", up.kind, up.level));
        }
    }

    /// Victory if the enemy fell, otherwise hand the turn to the enemy
    fn finish_player_action(&mut self) {
        let enemy_down = self.enemy.as_ref().map_or(false, Enemy::is_defeated);
        if enemy_down {
            self.conclude_victory();
        } else {
            self.phase = TurnPhase::EnemyDeciding;
        }
    }

    fn conclude_victory(&mut self) {
        let Some(enemy) = self.enemy.take() else {
            return;
        };
        let report = award_victory(&mut self.state, &mut self.player, &enemy, &mut self.rng);
        self.emit_level_ups(&report.level_ups);
        self.log(format!(
            "🎉 {} defeated! +{} exp, +{} gold",
            enemy.name, report.exp, report.gold
        ));
        if report.combo_bonus > 0 {
            self.log(format!("🔥 Combo bonus! +{} gold", report.combo_bonus));
        }
        self.events.push(GameEvent::BattleEnd {
            outcome: BattleOutcome::Victory,
            rewards: Some(report),
        });
        self.phase = TurnPhase::BattleOver(BattleOutcome::Victory);
    }

    // === ENEMY TURN ===

    /// How long the adapter should wait before calling `advance_turn`
    pub fn pending_delay(&self) -> Option<Duration> {
        (self.phase == TurnPhase::EnemyDeciding).then(|| self.config.enemy_turn_delay())
    }

    /// Resolve the enemy's action; false when no enemy turn is pending
    pub fn advance_turn(&mut self) -> bool {
        if self.phase != TurnPhase::EnemyDeciding {
            return false;
        }
        self.phase = TurnPhase::EnemyResolving;

        let combo_before = self.player.combo;
        let strike = match self.enemy.as_ref() {
            Some(enemy) => {
                resolve_enemy_turn(enemy, &mut self.player, &mut self.rng, &self.config)
            }
            None => {
                self.phase = TurnPhase::PlayerActionable;
                return false;
            }
        };
        let enemy_name = self
            .enemy
            .as_ref()
            .map(|enemy| enemy.name.clone())
            .unwrap_or_default();

        if strike.dodged {
            self.log(format!("💨 {} dodged the attack!", self.player.name));
        } else {
            self.events.push(GameEvent::Damage {
                target: Target::Player,
                amount: strike.damage,
                critical: false,
                heal: false,
            });
            let verb = match strike.mv {
                EnemyMove::Attack => "attacks",
                EnemyMove::Special => "unleashes a special attack",
            };
            let guarded = if strike.guarded { " (guarded)" } else { "" };
            self.log(format!(
                "👹 {} {} for {} damage{}",
                enemy_name, verb, strike.damage, guarded
            ));
        }
        if strike.breaks_combo() && combo_before > 0 {
            self.log(format!("💔 Combo broken at {}", combo_before));
        }

        if self.player.is_defeated() {
            self.enemy = None;
            self.phase = TurnPhase::BattleOver(BattleOutcome::Defeat);
            info!(enemy = %enemy_name, battles = self.state.battle_count, "defeat");
            self.log(format!("💀 {} has fallen...", self.player.name));
            self.events.push(GameEvent::BattleEnd {
                outcome: BattleOutcome::Defeat,
                rewards: None,
            });
        } else {
            self.phase = TurnPhase::PlayerActionable;
        }
        true
    }

    // === PERSISTENCE ===

    /// Write a snapshot of the session to the slot
    pub fn save(&mut self, slot: &mut impl SaveSlot) -> Result<()> {
        let saved_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or(0);
        let blob = persistence::snapshot(self, saved_at);
        let written = persistence::encode(&blob).and_then(|json| slot.write(&json));
        match written {
            Ok(()) => {
                info!(slot = slot.name(), "game saved");
                self.log("💾 Game saved.");
                Ok(())
            }
            Err(error) => {
                warn!(%error, "save failed");
                self.log(format!("❌ Save failed: {}", error));
                Err(error)
            }
        }
    }

    /// Replace the session with the slot's snapshot
    ///
    /// Fully parses and reconciles before touching any state; on failure the
    /// session is unchanged.
    pub fn load(&mut self, slot: &impl SaveSlot) -> Result<Vec<LoadWarning>> {
        let decoded = slot
            .read()
            .and_then(|contents| contents.ok_or(GameError::NoSaveData))
            .and_then(|json| persistence::decode(&json));

        match decoded {
            Ok((restored, warnings)) => {
                self.apply_restored(restored);
                for warning in &warnings {
                    warn!(%warning, "save reconciled");
                    self.log(format!("⚠️ {}", warning));
                }
                info!(slot = slot.name(), warnings = warnings.len(), "game loaded");
                self.log("📂 Game loaded.");
                Ok(warnings)
            }
            Err(error) => {
                warn!(%error, "load failed");
                self.log(format!("❌ Load failed: {}", error));
                Err(error)
            }
        }
    }

    fn apply_restored(&mut self, restored: Restored) {
        self.state = restored.state;
        self.player = restored.player;
        self.items = restored.items;
        self.enemy = restored.enemy;
        self.screen = restored.screen;
        self.phase = restored.phase;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game_starts_in_battle() {
        let game = Game::with_seed(1);
        assert_eq!(game.phase(), TurnPhase::PlayerActionable);
        assert_eq!(game.screen(), Screen::Battle);
        assert_eq!(game.enemy().unwrap().name, "Slime");
        assert!(game.battle_in_progress());
    }

    #[test]
    fn test_new_rejects_config_that_would_panic_mid_battle() {
        let inverted = GameConfig {
            variance_min: 1.2,
            variance_max: 0.8,
            ..GameConfig::default()
        };
        assert!(matches!(
            Game::new(inverted, 1),
            Err(GameError::InvalidConfig(_))
        ));

        let certain_crit = GameConfig {
            crit_chance_cap: 1.5,
            ..GameConfig::default()
        };
        assert!(matches!(
            Game::new(certain_crit, 1),
            Err(GameError::InvalidConfig(_))
        ));

        let nan_band = GameConfig {
            variance_max: f64::NAN,
            ..GameConfig::default()
        };
        assert!(Game::new(nan_band, 1).is_err());
    }

    #[test]
    fn test_new_accepts_valid_config() {
        let mut game = Game::new(GameConfig::default(), 1).unwrap();
        game.player_mut().combo = 40;
        if let Some(enemy) = game.enemy_mut() {
            enemy.max_hp = 10_000;
            enemy.hp = 10_000;
        }
        game.attack().unwrap();
        assert!(game.enemy().unwrap().hp < game.enemy().unwrap().max_hp);
    }

    #[test]
    fn test_guard_hands_turn_to_enemy() {
        let mut game = Game::with_seed(1);
        game.player_mut().mp = 10;
        game.guard().unwrap();
        assert!(game.player().is_guarding);
        assert_eq!(game.player().mp, 15);
        assert_eq!(game.phase(), TurnPhase::EnemyDeciding);
        assert_eq!(game.pending_delay(), Some(Duration::from_millis(2300)));
    }

    #[test]
    fn test_action_during_enemy_turn_is_rejected() {
        let mut game = Game::with_seed(1);
        game.guard().unwrap();
        game.drain_events();
        let hp = game.enemy().unwrap().hp;
        assert!(matches!(game.attack(), Err(GameError::NotPlayerTurn)));
        assert_eq!(game.enemy().unwrap().hp, hp);
        assert!(game
            .drain_events()
            .iter()
            .any(|event| matches!(event, GameEvent::Rejected { .. })));
    }

    #[test]
    fn test_advance_turn_returns_control() {
        let mut game = Game::with_seed(1);
        assert!(!game.advance_turn());
        game.guard().unwrap();
        assert!(game.advance_turn());
        assert!(!game.player().is_guarding);
        assert_eq!(game.phase(), TurnPhase::PlayerActionable);
        assert_eq!(game.pending_delay(), None);
    }

    #[test]
    fn test_heal_skill_restores_hp() {
        let mut game = Game::with_seed(1);
        game.player_mut().hp = 20;
        game.use_skill(SkillKey::Heal).unwrap();
        assert_eq!(game.player().hp, 60);
        assert_eq!(game.player().mp, 35);
        assert_eq!(game.player().combo, 0);
    }

    #[test]
    fn test_locked_skill_is_rejected() {
        let mut game = Game::with_seed(1);
        let result = game.use_skill(SkillKey::Holy);
        assert!(matches!(result, Err(GameError::SkillLocked(SkillKey::Holy))));
        assert_eq!(game.player().mp, 50);
        assert_eq!(game.phase(), TurnPhase::PlayerActionable);
    }
}
