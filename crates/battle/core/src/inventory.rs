//! Inventory collaborator consumed by item abilities.
//!
//! The engine only ever reads counts and removes stock; adding stock is the
//! business of whoever owns the inventory between battles.

use std::collections::BTreeMap;

/// Consumable items known to the battle engine.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::EnumIter,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum ItemId {
    Potion,
    Ether,
    Antidote,
    PhoenixDown,
}

impl ItemId {
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Potion => "Potion",
            Self::Ether => "Ether",
            Self::Antidote => "Antidote",
            Self::PhoenixDown => "Phoenix Down",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Potion => "Restores 50 HP",
            Self::Ether => "Restores 20 MP",
            Self::Antidote => "Cures POISON",
            Self::PhoenixDown => "Revives with 1 HP",
        }
    }
}

impl core::fmt::Display for ItemId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Read/write access to the party's item stock.
pub trait Inventory: Send {
    /// Consumes one unit. Returns false when none is left.
    fn use_item(&mut self, id: ItemId) -> bool;

    /// Removes `count` units at once. Returns false (removing nothing) when short.
    fn remove_item(&mut self, id: ItemId, count: u32) -> bool;

    fn item_count(&self, id: ItemId) -> u32;
}

/// Default in-memory inventory with a per-item stack cap.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stockpile {
    counts: BTreeMap<ItemId, u32>,
    max_stack: u32,
}

impl Stockpile {
    pub const DEFAULT_MAX_STACK: u32 = 9;

    pub fn empty() -> Self {
        Self {
            counts: BTreeMap::new(),
            max_stack: Self::DEFAULT_MAX_STACK,
        }
    }

    /// The stock a new game starts with.
    pub fn starter() -> Self {
        let mut stock = Self::empty();
        stock.add_item(ItemId::Potion, 5);
        stock.add_item(ItemId::Ether, 2);
        stock.add_item(ItemId::Antidote, 3);
        stock.add_item(ItemId::PhoenixDown, 1);
        stock
    }

    /// Adds stock, capped at the stack limit. Returns the resulting count.
    pub fn add_item(&mut self, id: ItemId, count: u32) -> u32 {
        let slot = self.counts.entry(id).or_insert(0);
        *slot = slot.saturating_add(count).min(self.max_stack);
        *slot
    }

    pub fn iter(&self) -> impl Iterator<Item = (ItemId, u32)> + '_ {
        self.counts.iter().map(|(id, count)| (*id, *count))
    }
}

impl Default for Stockpile {
    fn default() -> Self {
        Self::empty()
    }
}

impl Inventory for Stockpile {
    fn use_item(&mut self, id: ItemId) -> bool {
        self.remove_item(id, 1)
    }

    fn remove_item(&mut self, id: ItemId, count: u32) -> bool {
        let Some(slot) = self.counts.get_mut(&id) else {
            return false;
        };
        if *slot < count {
            return false;
        }
        *slot -= count;
        if *slot == 0 {
            self.counts.remove(&id);
        }
        true
    }

    fn item_count(&self, id: ItemId) -> u32 {
        self.counts.get(&id).copied().unwrap_or(0)
    }
}
