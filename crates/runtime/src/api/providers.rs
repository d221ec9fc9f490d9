//! Asynchronous abstraction for sourcing player intent.
//!
//! Runtime users plug in [`ActionProvider`] implementations so player-controlled
//! combatants can be driven by human input, scripted fixtures, or a policy.
use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::Mutex;

use battle_core::{Action, BattleConfig, DecisionContext, EntityId, HostilePolicy, Policy};

use super::errors::{Result, RuntimeError};
use super::snapshot::BattleSnapshot;
use crate::rng::EntropyRng;

/// Trait for choosing the action of a player-controlled combatant.
///
/// Different implementations can handle:
/// - Player input (from a terminal or UI)
/// - Autopilot decisions
/// - Scripted actions for tests
#[async_trait]
pub trait ActionProvider: Send + Sync {
    /// Provide an action for `actor`, which the battle is currently waiting on.
    async fn provide_action(&self, actor: EntityId, snapshot: &BattleSnapshot) -> Result<Action>;
}

/// Plays party members with the hostile policy: attack a random living enemy.
pub struct AutopilotProvider {
    rng: Mutex<EntropyRng>,
    config: BattleConfig,
}

impl AutopilotProvider {
    pub fn new(config: BattleConfig) -> Self {
        Self::with_rng(EntropyRng::new(), config)
    }

    pub fn with_rng(rng: EntropyRng, config: BattleConfig) -> Self {
        Self {
            rng: Mutex::new(rng),
            config,
        }
    }
}

#[async_trait]
impl ActionProvider for AutopilotProvider {
    async fn provide_action(&self, actor: EntityId, snapshot: &BattleSnapshot) -> Result<Action> {
        let roster = &snapshot.roster;
        let (Some(me), Some(side)) = (roster.get(actor), roster.side_of(actor)) else {
            return Err(RuntimeError::UnknownActor { actor });
        };

        let mut rng = self.rng.lock().await;
        let mut ctx = DecisionContext {
            rng: &mut *rng,
            config: &self.config,
        };
        Ok(HostilePolicy.decide(
            me,
            roster.side(side),
            roster.side(side.opposing()),
            &mut ctx,
        ))
    }
}

/// Replays a fixed list of actions, then defends.
#[derive(Default)]
pub struct ScriptedProvider {
    actions: Mutex<VecDeque<Action>>,
}

impl ScriptedProvider {
    pub fn new(actions: impl IntoIterator<Item = Action>) -> Self {
        Self {
            actions: Mutex::new(actions.into_iter().collect()),
        }
    }

    pub async fn remaining(&self) -> usize {
        self.actions.lock().await.len()
    }
}

#[async_trait]
impl ActionProvider for ScriptedProvider {
    async fn provide_action(&self, _actor: EntityId, _snapshot: &BattleSnapshot) -> Result<Action> {
        Ok(self.actions.lock().await.pop_front().unwrap_or(Action::Defend))
    }
}
