//! Event types for different topics.

use battle_core::{BattleOutcome, EntityId, LogEntry};
use serde::{Deserialize, Serialize};

/// Turn progression (lightweight).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnEvent {
    /// A player-controlled combatant must choose an action.
    AwaitingInput { actor: EntityId, turn: u32 },
    /// An action was resolved; the presentation delay has started.
    Executed { actor: EntityId, turn: u32 },
}

impl TurnEvent {
    pub fn actor(&self) -> EntityId {
        match self {
            Self::AwaitingInput { actor, .. } | Self::Executed { actor, .. } => *actor,
        }
    }

    pub fn turn(&self) -> u32 {
        match self {
            Self::AwaitingInput { turn, .. } | Self::Executed { turn, .. } => *turn,
        }
    }
}

/// Battle lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleEvent {
    /// Turn order fixed for the rest of the battle.
    Started { order: Vec<EntityId> },
    Ended(BattleOutcome),
}

/// One battle log line, in the order the battle produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEvent {
    /// Position of the entry in the whole battle (not bounded by the ring log).
    pub seq: u64,
    pub entry: LogEntry,
}
