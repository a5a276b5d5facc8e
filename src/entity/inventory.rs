//! Consumable item stock

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::catalog::ItemKey;

/// Stored count of one item
///
/// Older saves also stored the item's name, effect and power; those are
/// catalog data now and are ignored when read back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ItemStock {
    #[serde(default)]
    pub count: u32,
}

/// Item counts keyed by item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inventory {
    stock: BTreeMap<ItemKey, ItemStock>,
}

impl Default for Inventory {
    fn default() -> Self {
        Self::starting()
    }
}

impl Inventory {
    pub fn empty() -> Self {
        Self {
            stock: BTreeMap::new(),
        }
    }

    /// Starting counts from the item catalog
    pub fn starting() -> Self {
        let stock = ItemKey::ALL
            .into_iter()
            .map(|key| (key, ItemStock { count: key.def().starting_count }))
            .collect();
        Self { stock }
    }

    pub fn count(&self, key: ItemKey) -> u32 {
        self.stock.get(&key).map_or(0, |stock| stock.count)
    }

    /// Overwrite a count; limits are the caller's concern
    pub fn set(&mut self, key: ItemKey, count: u32) {
        self.stock.insert(key, ItemStock { count });
    }

    /// Use one; false if none are left
    pub fn consume(&mut self, key: ItemKey) -> bool {
        match self.stock.get_mut(&key) {
            Some(stock) if stock.count > 0 => {
                stock.count -= 1;
                true
            }
            _ => false,
        }
    }

    /// Add `amount` unless that would exceed `limit`; false if refused
    pub fn add(&mut self, key: ItemKey, amount: u32, limit: u32) -> bool {
        let current = self.count(key);
        if current.saturating_add(amount) > limit {
            return false;
        }
        self.stock.entry(key).or_default().count = current + amount;
        true
    }

    /// Each item independently gains one with probability `chance`, up to `cap`
    ///
    /// Returns the items that were restocked.
    pub fn restock(&mut self, rng: &mut impl Rng, chance: f64, cap: u32) -> Vec<ItemKey> {
        let mut restocked = Vec::new();
        for key in ItemKey::ALL {
            if rng.gen_bool(chance) && self.count(key) < cap {
                self.stock.entry(key).or_default().count += 1;
                restocked.push(key);
            }
        }
        restocked
    }

    pub fn iter(&self) -> impl Iterator<Item = (ItemKey, u32)> + '_ {
        ItemKey::ALL.into_iter().map(move |key| (key, self.count(key)))
    }
}
