//! Actions a combatant can take on its turn.
//!
//! An [`Action`] is produced either by a player selection or by an AI policy
//! and handed to [`crate::engine::ActionResolver`]. The acting combatant is
//! never part of the action: it is always the combatant whose turn it is.

pub mod error;

pub use error::{ActionError, TurnError};

use crate::ability::AbilityId;
use crate::state::EntityId;

/// A chosen action.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    /// Basic physical attack.
    Attack { target: EntityId },
    /// Brace for the round. Only raises the defending flag.
    Defend,
    /// Spend MP (or an item) on an ability.
    UseAbility { ability: AbilityId, target: EntityId },
    /// Flavor only; chosen by the support policy, never offered in menus.
    Pray,
    /// Queue `queued` as the next action of a policy-controlled ally.
    Override { target: EntityId, queued: Box<Action> },
}

impl Action {
    pub fn attack(target: EntityId) -> Self {
        Self::Attack { target }
    }

    pub fn ability(ability: AbilityId, target: EntityId) -> Self {
        Self::UseAbility { ability, target }
    }

    pub fn override_with(target: EntityId, queued: Action) -> Self {
        Self::Override {
            target,
            queued: Box::new(queued),
        }
    }

    /// The combatant this action is aimed at, if any.
    pub fn target(&self) -> Option<EntityId> {
        match self {
            Self::Attack { target }
            | Self::UseAbility { target, .. }
            | Self::Override { target, .. } => Some(*target),
            Self::Defend | Self::Pray => None,
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Attack { .. } => "attack",
            Self::Defend => "defend",
            Self::UseAbility { .. } => "ability",
            Self::Pray => "pray",
            Self::Override { .. } => "override",
        }
    }
}
