//! The combatant record.

use arrayvec::ArrayVec;
use bitflags::bitflags;

use super::stats::Stats;
use super::status::{StatusEffects, StatusKind};
use crate::ability::{AbilityCategory, AbilityId};
use crate::action::Action;
use crate::ai::PolicyKind;
use crate::config::BattleConfig;

/// Stable handle of a combatant within one roster.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub u32);

impl core::fmt::Display for EntityId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where a combatant's actions come from.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ControlMode {
    /// Actions are supplied from outside, one per turn.
    Player,
    /// Actions are produced by the attached policy.
    Policy(PolicyKind),
}

/// Growth/role class of a combatant.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumIter, strum::EnumString, strum::Display,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum Archetype {
    Hero,
    Healer,
    Realist,
    Strategist,
    Monster,
}

/// Equipment slots. Items are opaque names; stat bonuses are not modeled.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Equipment {
    pub weapon: Option<String>,
    pub armor: Option<String>,
    pub accessory: Option<String>,
}

bitflags! {
    /// Transient per-battle markers.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct CombatFlags: u8 {
        /// Chose Defend on its last turn. Cleared when its next turn begins.
        const DEFENDING = 1 << 0;
        /// Revealed by Scan; front-ends may show exact HP.
        const SCANNED = 1 << 1;
    }
}

/// A combatant.
///
/// # Invariants
///
/// - `stats.hp <= stats.max_hp` and `stats.mp <= stats.max_mp`
/// - at most one status per [`StatusKind`]
/// - `exp < exp_to_next` outside of [`crate::engine::progression::gain_exp`]
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entity {
    pub id: EntityId,
    /// Identity key: unique within a roster.
    pub name: String,
    pub level: u32,
    pub control: ControlMode,
    pub archetype: Archetype,

    // === Experience ===
    pub exp: u32,
    pub exp_to_next: u32,
    /// Experience granted to the winners when this combatant is defeated.
    /// `None` falls back to [`BattleConfig::default_exp_reward`].
    pub exp_reward: Option<u32>,

    pub stats: Stats,
    pub statuses: StatusEffects,
    pub abilities: ArrayVec<AbilityId, { BattleConfig::MAX_ABILITIES }>,
    pub equipment: Equipment,

    // === Transient ===
    pub flags: CombatFlags,
    /// Action queued by an ally's Override, consumed on the next policy turn.
    pub pending_override: Option<Box<Action>>,
}

impl Entity {
    /// Creates a level 1, player-controlled combatant with full pools.
    pub fn new(id: EntityId, name: impl Into<String>, archetype: Archetype, stats: Stats) -> Self {
        Self {
            id,
            name: name.into(),
            level: 1,
            control: ControlMode::Player,
            archetype,
            exp: 0,
            exp_to_next: BattleConfig::EXP_PER_LEVEL,
            exp_reward: None,
            stats,
            statuses: StatusEffects::empty(),
            abilities: ArrayVec::new(),
            equipment: Equipment::default(),
            flags: CombatFlags::empty(),
            pending_override: None,
        }
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level.max(1);
        self.exp_to_next = Self::exp_needed(self.level);
        self
    }

    pub fn with_exp(mut self, exp: u32) -> Self {
        self.exp = exp;
        self
    }

    pub fn with_policy(mut self, policy: PolicyKind) -> Self {
        self.control = ControlMode::Policy(policy);
        self
    }

    pub fn with_control(mut self, control: ControlMode) -> Self {
        self.control = control;
        self
    }

    /// Appends abilities; entries beyond [`BattleConfig::MAX_ABILITIES`] are ignored.
    pub fn with_abilities(mut self, abilities: impl IntoIterator<Item = AbilityId>) -> Self {
        for ability in abilities {
            if self.abilities.try_push(ability).is_err() {
                break;
            }
        }
        self
    }

    pub fn with_exp_reward(mut self, reward: u32) -> Self {
        self.exp_reward = Some(reward);
        self
    }

    pub fn with_equipment(mut self, equipment: Equipment) -> Self {
        self.equipment = equipment;
        self
    }

    /// Experience required to leave `level`.
    pub const fn exp_needed(level: u32) -> u32 {
        level.saturating_mul(BattleConfig::EXP_PER_LEVEL)
    }

    pub fn is_alive(&self) -> bool {
        self.stats.is_alive()
    }

    pub fn is_player_controlled(&self) -> bool {
        matches!(self.control, ControlMode::Player)
    }

    pub fn policy(&self) -> Option<&PolicyKind> {
        match &self.control {
            ControlMode::Player => None,
            ControlMode::Policy(policy) => Some(policy),
        }
    }

    // === Statuses ===

    pub fn has_status(&self, kind: StatusKind) -> bool {
        self.statuses.has(kind)
    }

    /// Adds (or overwrites) a status for `turns` turns.
    pub fn add_status(&mut self, kind: StatusKind, turns: u32) {
        self.statuses.add(kind, turns);
    }

    pub fn remove_status(&mut self, kind: StatusKind) -> bool {
        self.statuses.remove(kind)
    }

    // === Abilities ===

    pub fn knows(&self, ability: AbilityId) -> bool {
        self.abilities.contains(&ability)
    }

    pub fn can_afford(&self, ability: AbilityId) -> bool {
        self.stats.mp >= ability.descriptor().cost
    }

    /// Known, usable (non-passive) abilities the combatant can currently pay for.
    pub fn available_abilities(&self) -> Vec<AbilityId> {
        self.abilities
            .iter()
            .copied()
            .filter(|a| a.descriptor().category != AbilityCategory::Passive)
            .filter(|a| self.can_afford(*a))
            .collect()
    }

    // === Flags ===

    pub fn is_defending(&self) -> bool {
        self.flags.contains(CombatFlags::DEFENDING)
    }

    pub fn set_defending(&mut self, defending: bool) {
        self.flags.set(CombatFlags::DEFENDING, defending);
    }

    pub fn is_scanned(&self) -> bool {
        self.flags.contains(CombatFlags::SCANNED)
    }

    pub fn take_override(&mut self) -> Option<Action> {
        self.pending_override.take().map(|action| *action)
    }
}
