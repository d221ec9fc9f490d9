//! Action resolution and turn scheduling errors.
//!
//! The Display text of an [`ActionError`] is what the player reads in the
//! battle log, so every message is phrased as battle narration.

use crate::ability::AbilityId;
use crate::error::{ErrorSeverity, GameError};
use crate::inventory::ItemId;

// ============================================================================
// Action Resolution Errors
// ============================================================================

/// Reasons an action resolves to a no-op.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    /// Acting combatant is missing or defeated.
    #[error("{actor} is unable to act!")]
    ActorUnable { actor: String },

    /// Ability is not in the actor's ability list.
    #[error("{actor} doesn't know {ability}!")]
    UnknownAbility { actor: String, ability: AbilityId },

    /// Passive abilities are never used directly.
    #[error("{ability} can't be used directly!")]
    PassiveAbility { ability: AbilityId },

    #[error("{actor} doesn't have enough MP for {ability}!")]
    InsufficientMp { actor: String, ability: AbilityId },

    /// Target is missing, defeated (or not defeated, for revival), or on the wrong side.
    #[error("{actor}'s {action} has no valid target!")]
    InvalidTarget { actor: String, action: &'static str },

    #[error("No {item}s available!")]
    OutOfItems { item: ItemId },

    /// Override aimed at a combatant that is not a policy-controlled ally.
    #[error("{actor} can't override {target}!")]
    OverrideRejected { actor: String, target: String },

    /// An effect contract failed unexpectedly.
    #[error("{ability} failed: {reason}")]
    EffectFailed { ability: AbilityId, reason: String },
}

impl GameError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        use ActionError::*;
        match self {
            ActorUnable { .. } => ErrorSeverity::Recoverable,
            UnknownAbility { .. } | PassiveAbility { .. } | InsufficientMp { .. } => {
                ErrorSeverity::Validation
            }
            InvalidTarget { .. } | OutOfItems { .. } | OverrideRejected { .. } => {
                ErrorSeverity::Validation
            }
            EffectFailed { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        use ActionError::*;
        match self {
            ActorUnable { .. } => "ACTION_ACTOR_UNABLE",
            UnknownAbility { .. } => "ACTION_UNKNOWN_ABILITY",
            PassiveAbility { .. } => "ACTION_PASSIVE_ABILITY",
            InsufficientMp { .. } => "ACTION_INSUFFICIENT_MP",
            InvalidTarget { .. } => "ACTION_INVALID_TARGET",
            OutOfItems { .. } => "ACTION_OUT_OF_ITEMS",
            OverrideRejected { .. } => "ACTION_OVERRIDE_REJECTED",
            EffectFailed { .. } => "ACTION_EFFECT_FAILED",
        }
    }
}

// ============================================================================
// Turn Scheduling Errors
// ============================================================================

/// Errors raised while looking for the next combatant to act.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TurnError {
    /// Nobody could act within the scan guard.
    #[error("no combatant could act after {iterations} turn checks")]
    StuckTurnLoop { iterations: usize },
}

impl GameError for TurnError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::StuckTurnLoop { .. } => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::StuckTurnLoop { .. } => "TURN_STUCK_LOOP",
        }
    }
}
