//! Feeds an [`ActionProvider`]'s choices into a running battle.

use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, warn};

use battle_core::{BattleOutcome, EntityId, Submission};

use super::errors::{Result, RuntimeError};
use super::handle::BattleHandle;
use super::providers::ActionProvider;
use super::snapshot::BattleSnapshot;
use crate::events::{BattleEvent, Event, Topic, TurnEvent};

/// Answers every player hand-off with `provider` until the battle ends.
///
/// Works whether or not the battle has started yet; a battle already waiting
/// on a player is picked up from a snapshot.
pub async fn drive_players(
    handle: &BattleHandle,
    provider: &dyn ActionProvider,
) -> Result<BattleOutcome> {
    let mut topics = handle.subscribe_multiple(&[Topic::Turn, Topic::Battle]);
    let (Some(mut turns), Some(mut battle)) =
        (topics.remove(&Topic::Turn), topics.remove(&Topic::Battle))
    else {
        return Err(RuntimeError::EventStreamClosed);
    };

    let mut last_turn = 0;
    if let Some(outcome) = catch_up(handle, provider, &mut last_turn).await? {
        return Ok(outcome);
    }

    loop {
        tokio::select! {
            event = battle.recv() => match event {
                Ok(Event::Battle(BattleEvent::Ended(outcome))) => return Ok(outcome),
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Battle event stream lagged by {} events", skipped);
                }
                Err(RecvError::Closed) => return Err(RuntimeError::EventStreamClosed),
            },
            event = turns.recv() => match event {
                Ok(Event::Turn(TurnEvent::AwaitingInput { actor, turn })) if turn > last_turn => {
                    last_turn = turn;
                    let snapshot = handle.snapshot().await?;
                    act(handle, provider, actor, &snapshot).await?;
                }
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Turn event stream lagged by {} events; resyncing", skipped);
                    if let Some(outcome) = catch_up(handle, provider, &mut last_turn).await? {
                        return Ok(outcome);
                    }
                }
                Err(RecvError::Closed) => return Err(RuntimeError::EventStreamClosed),
            },
        }
    }
}

/// Acts on whatever the battle is waiting for right now.
async fn catch_up(
    handle: &BattleHandle,
    provider: &dyn ActionProvider,
    last_turn: &mut u32,
) -> Result<Option<BattleOutcome>> {
    let snapshot = handle.snapshot().await?;
    if let battle_core::Phase::BattleEnd(outcome) = snapshot.phase {
        return Ok(Some(outcome));
    }
    if let Some(actor) = snapshot.awaiting()
        && snapshot.turn > *last_turn
    {
        *last_turn = snapshot.turn;
        act(handle, provider, actor, &snapshot).await?;
    }
    Ok(None)
}

async fn act(
    handle: &BattleHandle,
    provider: &dyn ActionProvider,
    actor: EntityId,
    snapshot: &BattleSnapshot,
) -> Result<()> {
    let action = provider.provide_action(actor, snapshot).await?;
    debug!("{} chose {}", actor, action.label());

    match handle.submit_action(actor, action).await {
        Ok(Submission::Accepted) => Ok(()),
        Ok(other) => {
            warn!("Action for {} was not applied: {:?}", actor, other);
            Ok(())
        }
        Err(err @ RuntimeError::NotAwaitingActor { .. }) => {
            warn!("{}", err);
            Ok(())
        }
        Err(err) => Err(err),
    }
}
