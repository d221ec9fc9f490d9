//! Read-only view of a battle handed to clients and action providers.

use battle_core::{Battle, EntityId, Inventory, ItemId, LogEntry, Phase, Roster};
use serde::Serialize;
use strum::IntoEnumIterator;

/// Copy of everything a client needs to render the battle or pick an action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BattleSnapshot {
    pub roster: Roster,
    pub phase: Phase,
    /// Turn order fixed at battle start; empty before.
    pub order: Vec<EntityId>,
    pub turn: u32,
    /// Most recent log entries, oldest first.
    pub log: Vec<LogEntry>,
    /// Stock of every item, including empty ones.
    pub items: Vec<(ItemId, u32)>,
}

impl BattleSnapshot {
    pub fn capture(battle: &Battle, inventory: &dyn Inventory) -> Self {
        Self {
            roster: battle.roster().clone(),
            phase: battle.phase(),
            order: battle.order().to_vec(),
            turn: battle.turn(),
            log: battle.log().iter().cloned().collect(),
            items: ItemId::iter()
                .map(|id| (id, inventory.item_count(id)))
                .collect(),
        }
    }

    /// The combatant the battle is currently waiting on, if any.
    pub fn awaiting(&self) -> Option<EntityId> {
        match self.phase {
            Phase::SelectingAction { actor } => Some(actor),
            _ => None,
        }
    }

    pub fn item_count(&self, id: ItemId) -> u32 {
        self.items
            .iter()
            .find(|(item, _)| *item == id)
            .map_or(0, |(_, count)| *count)
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, Phase::BattleEnd(_))
    }
}
