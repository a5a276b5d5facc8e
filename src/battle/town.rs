//! Town hub: shops, the weapon rack and the inn
//!
//! Every command here is refused while a battle is in progress.

use tracing::{info, warn};

use crate::battle::game::Game;
use crate::catalog::{ItemKey, WeaponKey};
use crate::core::types::Screen;
use crate::core::{GameError, Result};

impl Game {
    fn require_town(&mut self) -> Result<()> {
        if self.battle_in_progress() {
            return self.reject(GameError::BattleInProgress);
        }
        if self.player.is_defeated() {
            return self.reject(GameError::PlayerDefeated);
        }
        Ok(())
    }

    fn charge(&mut self, price: u32) -> Result<()> {
        if self.state.score < price {
            let have = self.state.score;
            return self.reject(GameError::InsufficientGold { need: price, have });
        }
        self.state.spend(price);
        Ok(())
    }

    /// Move between hub screens; visiting `Battle` starts the next battle
    pub fn visit(&mut self, screen: Screen) -> Result<()> {
        self.require_town()?;
        if screen == Screen::Battle {
            return self.next_battle();
        }
        self.enemy = None;
        self.screen = screen;
        Ok(())
    }

    pub fn buy_item(&mut self, key: ItemKey) -> Result<()> {
        self.require_town()?;
        let item = key.def();
        if self.items.count(key) >= self.config.item_carry_limit {
            return self.reject(GameError::InventoryFull(key));
        }
        self.charge(item.price)?;
        self.items.add(key, 1, self.config.item_carry_limit);
        info!(item = item.name, price = item.price, "item bought");
        self.log(format!("🛒 Bought a {} for {} G", item.name, item.price));
        Ok(())
    }

    pub fn buy_weapon(&mut self, key: WeaponKey) -> Result<()> {
        self.require_town()?;
        let weapon = key.def();
        let Some(price) = weapon.price else {
            return self.reject(GameError::NotForSale(key));
        };
        if self.player.owns(key) {
            return self.reject(GameError::WeaponAlreadyOwned(key));
        }
        self.charge(price)?;
        self.player.owned_weapons.insert(key);
        info!(weapon = weapon.name, price, "weapon bought");
        self.log(format!("{} Bought the {} for {} G", weapon.icon, weapon.name, price));
        Ok(())
    }

    /// Sell back for a fraction of the price
    ///
    /// Selling the equipped weapon falls back to the default weapon.
    pub fn sell_weapon(&mut self, key: WeaponKey) -> Result<()> {
        self.require_town()?;
        if key == WeaponKey::DEFAULT {
            return self.reject(GameError::CannotSellDefaultWeapon);
        }
        if !self.player.owns(key) {
            return self.reject(GameError::WeaponNotOwned(key));
        }
        let weapon = key.def();
        let Some(price) = weapon.price else {
            return self.reject(GameError::NotForSale(key));
        };

        let refund = (price as f64 * self.config.weapon_sell_ratio).floor() as u32;
        self.player.owned_weapons.remove(&key);
        self.state.earn(refund);
        self.log(format!("💰 Sold the {} for {} G", weapon.name, refund));

        if let Some(sold) = self.player.ensure_valid_weapon() {
            warn!(weapon = sold.as_str(), "equipped weapon sold, re-equipping default");
            self.log(format!(
                "⚠️ {} was equipped; switched to the {}",
                weapon.name,
                WeaponKey::DEFAULT.def().name
            ));
        }
        Ok(())
    }

    pub fn equip_weapon(&mut self, key: WeaponKey) -> Result<()> {
        self.require_town()?;
        if !self.player.owns(key) {
            return self.reject(GameError::WeaponNotOwned(key));
        }
        self.player.current_weapon = key;
        let weapon = key.def();
        self.log(format!("{} Equipped the {}", weapon.icon, weapon.name));
        Ok(())
    }

    /// Full HP and MP for `inn_price_per_level * level` gold
    pub fn rest_at_inn(&mut self) -> Result<()> {
        self.require_town()?;
        let price = self.config.inn_price_per_level * self.state.level;
        self.charge(price)?;
        self.player.restore_fully();
        self.log(format!("🛏️ Rested at the inn for {} G. HP and MP restored.", price));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::TurnPhase;
    use crate::core::types::BattleOutcome;

    fn in_town(gold: u32) -> Game {
        let mut game = Game::with_seed(4);
        game.enemy = None;
        game.phase = TurnPhase::BattleOver(BattleOutcome::Victory);
        game.state.score = gold;
        game.return_to_town().unwrap();
        game
    }

    #[test]
    fn test_town_commands_blocked_in_battle() {
        let mut game = Game::with_seed(4);
        game.state.score = 1000;
        assert!(matches!(game.buy_item(ItemKey::Potion), Err(GameError::BattleInProgress)));
        assert!(matches!(game.visit(Screen::Inn), Err(GameError::BattleInProgress)));
        assert_eq!(game.state().score, 1000);
    }

    #[test]
    fn test_buy_item_charges_gold() {
        let mut game = in_town(100);
        game.buy_item(ItemKey::Potion).unwrap();
        assert_eq!(game.items().count(ItemKey::Potion), 4);
        assert_eq!(game.state().score, 50);
        assert!(matches!(
            game.buy_item(ItemKey::Bomb),
            Err(GameError::InsufficientGold { need: 120, have: 50 })
        ));
        assert_eq!(game.items().count(ItemKey::Bomb), 1);
    }

    #[test]
    fn test_weapon_purchase_and_equip() {
        let mut game = in_town(500);
        assert!(matches!(game.equip_weapon(WeaponKey::Bow), Err(GameError::WeaponNotOwned(_))));
        game.buy_weapon(WeaponKey::Bow).unwrap();
        assert_eq!(game.state().score, 100);
        assert!(matches!(game.buy_weapon(WeaponKey::Bow), Err(GameError::WeaponAlreadyOwned(_))));
        game.equip_weapon(WeaponKey::Bow).unwrap();
        assert_eq!(game.player().current_weapon, WeaponKey::Bow);
    }

    #[test]
    fn test_selling_equipped_weapon_falls_back_to_default() {
        let mut game = in_town(300);
        game.buy_weapon(WeaponKey::Axe).unwrap();
        game.equip_weapon(WeaponKey::Axe).unwrap();
        game.sell_weapon(WeaponKey::Axe).unwrap();
        assert_eq!(game.state().score, 150);
        assert_eq!(game.player().current_weapon, WeaponKey::DEFAULT);
        assert!(!game.player().owns(WeaponKey::Axe));
    }

    #[test]
    fn test_default_weapon_cannot_be_sold() {
        let mut game = in_town(0);
        assert!(matches!(
            game.sell_weapon(WeaponKey::Sword),
            Err(GameError::CannotSellDefaultWeapon)
        ));
        assert!(game.player().owns(WeaponKey::Sword));
    }

    #[test]
    fn test_inn_price_scales_with_level() {
        let mut game = in_town(100);
        game.state.level = 3;
        game.player.hp = 1;
        game.rest_at_inn().unwrap();
        assert_eq!(game.state().score, 70);
        assert_eq!(game.player().hp, game.player().max_hp);
    }

    #[test]
    fn test_visit_battle_starts_next_fight() {
        let mut game = in_town(0);
        game.visit(Screen::Inn).unwrap();
        assert_eq!(game.screen(), Screen::Inn);
        game.visit(Screen::Battle).unwrap();
        assert!(game.battle_in_progress());
        assert_eq!(game.screen(), Screen::Battle);
    }
}
