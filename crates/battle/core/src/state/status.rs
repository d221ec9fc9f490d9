//! Status effects carried by combatants.
//!
//! Durations count the owner's own turns: the status engine decrements every
//! non-persistent status once per visit (see [`crate::engine::status`]).
//! Persistent statuses never age out on their own and must be cured.

use arrayvec::ArrayVec;

use crate::config::BattleConfig;

/// Types of status effects.
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
pub enum StatusKind {
    /// Loses a share of max HP every tick. Persistent.
    Poison,
    /// Cannot act until woken by a hit or until it wears off.
    Sleep,
    /// Acts only when a coin flip succeeds.
    Paralysis,
    /// Incoming physical damage is divided by 1.5.
    Protect,
    /// SPD counts ×1.5 when turn order is computed.
    Haste,
    /// Recovers a share of max HP every tick.
    Regen,
}

/// Static description of a status kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatusDescriptor {
    pub kind: StatusKind,
    pub label: &'static str,
    /// Persistent statuses are skipped by turn countdown.
    pub persistent: bool,
    /// Display color hint for front-ends.
    pub color: &'static str,
}

impl StatusKind {
    pub const fn descriptor(self) -> StatusDescriptor {
        let (label, persistent, color) = match self {
            Self::Poison => ("POISON", true, "#9b59b6"),
            Self::Sleep => ("SLEEP", false, "#3498db"),
            Self::Paralysis => ("PARALYSIS", false, "#f39c12"),
            Self::Protect => ("PROTECT", false, "#2ecc71"),
            Self::Haste => ("HASTE", false, "#e74c3c"),
            Self::Regen => ("REGEN", false, "#1abc9c"),
        };
        StatusDescriptor {
            kind: self,
            label,
            persistent,
            color,
        }
    }

    pub const fn is_persistent(self) -> bool {
        self.descriptor().persistent
    }

    pub const fn label(self) -> &'static str {
        self.descriptor().label
    }
}

impl core::fmt::Display for StatusKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// A single active status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub kind: StatusKind,
    pub turns_remaining: u32,
}

impl StatusEffect {
    pub fn is_persistent(&self) -> bool {
        self.kind.is_persistent()
    }
}

/// Active statuses on a combatant; at most one instance per kind.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    effects: ArrayVec<StatusEffect, { BattleConfig::MAX_STATUS_EFFECTS }>,
}

impl StatusEffects {
    pub fn empty() -> Self {
        Self {
            effects: ArrayVec::new(),
        }
    }

    pub fn has(&self, kind: StatusKind) -> bool {
        self.effects.iter().any(|e| e.kind == kind)
    }

    pub fn get(&self, kind: StatusKind) -> Option<&StatusEffect> {
        self.effects.iter().find(|e| e.kind == kind)
    }

    /// Adds a status, overwriting any existing instance of the same kind.
    ///
    /// Re-applying never stacks: the duration is replaced, not extended.
    pub fn add(&mut self, kind: StatusKind, turns: u32) {
        if let Some(existing) = self.effects.iter_mut().find(|e| e.kind == kind) {
            existing.turns_remaining = turns;
            return;
        }

        // One slot per kind, so this only fails if the capacity is misconfigured.
        let _ = self.effects.try_push(StatusEffect {
            kind,
            turns_remaining: turns,
        });
    }

    /// Removes a status. Returns true if it was active.
    pub fn remove(&mut self, kind: StatusKind) -> bool {
        let before = self.effects.len();
        self.effects.retain(|e| e.kind != kind);
        self.effects.len() != before
    }

    /// Counts every non-persistent status down by one turn.
    ///
    /// Returns the kinds that reached zero and were removed, in slot order.
    pub fn decay(&mut self) -> Vec<StatusKind> {
        let mut expired = Vec::new();
        for effect in self.effects.iter_mut().filter(|e| !e.is_persistent()) {
            effect.turns_remaining = effect.turns_remaining.saturating_sub(1);
            if effect.turns_remaining == 0 {
                expired.push(effect.kind);
            }
        }
        self.effects
            .retain(|e| e.is_persistent() || e.turns_remaining > 0);
        expired
    }

    /// Removes every non-persistent status.
    pub fn clear_transient(&mut self) {
        self.effects.retain(|e| e.is_persistent());
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_overwrites_instead_of_stacking() {
        let mut statuses = StatusEffects::empty();
        statuses.add(StatusKind::Protect, 3);
        statuses.add(StatusKind::Protect, 1);

        assert_eq!(statuses.len(), 1);
        assert_eq!(
            statuses.get(StatusKind::Protect).map(|e| e.turns_remaining),
            Some(1)
        );
    }

    #[test]
    fn decay_skips_persistent_kinds() {
        let mut statuses = StatusEffects::empty();
        statuses.add(StatusKind::Poison, 1);
        statuses.add(StatusKind::Haste, 1);

        let expired = statuses.decay();

        assert_eq!(expired, vec![StatusKind::Haste]);
        assert!(statuses.has(StatusKind::Poison));
        assert_eq!(
            statuses.get(StatusKind::Poison).map(|e| e.turns_remaining),
            Some(1)
        );
    }

    #[test]
    fn clear_transient_keeps_poison() {
        let mut statuses = StatusEffects::empty();
        statuses.add(StatusKind::Poison, 3);
        statuses.add(StatusKind::Sleep, 3);
        statuses.add(StatusKind::Regen, 3);

        statuses.clear_transient();

        assert!(statuses.has(StatusKind::Poison));
        assert_eq!(statuses.len(), 1);
    }

    #[test]
    fn every_kind_fits() {
        use strum::IntoEnumIterator;

        let mut statuses = StatusEffects::empty();
        for kind in StatusKind::iter() {
            statuses.add(kind, 2);
        }
        assert_eq!(statuses.len(), BattleConfig::MAX_STATUS_EFFECTS);
    }
}
