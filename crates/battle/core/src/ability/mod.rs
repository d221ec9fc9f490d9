//! Ability catalog.
//!
//! Every ability is a closed [`AbilityId`] with a static [`AbilityDescriptor`]
//! (cost, category, targeting) and an effect contract in [`effect`].

pub mod effect;

pub use effect::{EffectChange, EffectOutcome};

use crate::inventory::ItemId;

/// Broad kind of an ability. Passives are never used directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AbilityCategory {
    Physical,
    Magic,
    Special,
    Item,
    Passive,
}

/// Which combatants an ability may be aimed at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetKind {
    /// A living member of the opposing side.
    Enemy,
    /// A member of the user's own side (the user included).
    Ally,
    /// The user itself.
    SelfOnly,
}

/// Static description of an ability.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AbilityDescriptor {
    pub id: AbilityId,
    pub name: &'static str,
    /// MP cost, deducted before the effect runs.
    pub cost: u32,
    pub category: AbilityCategory,
    pub target: TargetKind,
}

/// Every ability known to the engine.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::EnumIter,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum AbilityId {
    FireSlash,
    Headstrong,
    Heal,
    CurePoison,
    Protect,
    Prayer,
    Override,
    UsePotion,
    UseEther,
    UseAntidote,
    PhoenixDown,
    Scan,
}

impl AbilityId {
    pub const fn descriptor(self) -> AbilityDescriptor {
        use AbilityCategory::*;
        use TargetKind::*;

        let (name, cost, category, target) = match self {
            Self::FireSlash => ("Fire Slash", 8, Physical, Enemy),
            Self::Headstrong => ("Headstrong", 0, Passive, SelfOnly),
            Self::Heal => ("Heal", 4, Magic, Ally),
            Self::CurePoison => ("CurePoison", 3, Magic, Ally),
            Self::Protect => ("Protect", 6, Magic, Ally),
            Self::Prayer => ("Prayer", 0, Passive, SelfOnly),
            Self::Override => ("Override", 0, Special, Ally),
            Self::UsePotion => ("Use Potion", 0, Item, Ally),
            Self::UseEther => ("Use Ether", 0, Item, Ally),
            Self::UseAntidote => ("Use Antidote", 0, Item, Ally),
            Self::PhoenixDown => ("Phoenix Down", 0, Item, Ally),
            Self::Scan => ("Scan", 5, Magic, Enemy),
        };
        AbilityDescriptor {
            id: self,
            name,
            cost,
            category,
            target,
        }
    }

    pub const fn name(self) -> &'static str {
        self.descriptor().name
    }

    pub const fn is_passive(self) -> bool {
        matches!(self.descriptor().category, AbilityCategory::Passive)
    }

    /// The item an item ability consumes.
    pub const fn consumes(self) -> Option<ItemId> {
        match self {
            Self::UsePotion => Some(ItemId::Potion),
            Self::UseEther => Some(ItemId::Ether),
            Self::UseAntidote => Some(ItemId::Antidote),
            Self::PhoenixDown => Some(ItemId::PhoenixDown),
            _ => None,
        }
    }

    /// True for abilities aimed at a fallen ally rather than a living one.
    pub const fn targets_fallen(self) -> bool {
        matches!(self, Self::PhoenixDown)
    }
}

impl core::fmt::Display for AbilityId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn passives_are_free_and_self_targeted() {
        for id in AbilityId::iter().filter(|id| id.is_passive()) {
            let descriptor = id.descriptor();
            assert_eq!(descriptor.cost, 0, "{id}");
            assert_eq!(descriptor.target, TargetKind::SelfOnly, "{id}");
        }
    }

    #[test]
    fn item_abilities_name_their_item() {
        for id in AbilityId::iter() {
            let is_item = id.descriptor().category == AbilityCategory::Item;
            assert_eq!(is_item, id.consumes().is_some(), "{id}");
        }
    }

    #[test]
    fn parses_screaming_case_ids() {
        assert_eq!("FIRE_SLASH".parse::<AbilityId>(), Ok(AbilityId::FireSlash));
        assert_eq!(AbilityId::CurePoison.to_string(), "CurePoison");
    }
}
