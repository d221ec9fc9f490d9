//! Cloneable façade for issuing commands to the battle worker.
//!
//! [`BattleHandle`] hides channel plumbing and offers async helpers for
//! starting the battle, submitting player actions, or streaming events from
//! specific topics.
use std::collections::HashMap;

use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::debug;

use battle_core::{Action, EntityId, Submission};

use super::errors::{Result, RuntimeError};
use super::snapshot::BattleSnapshot;
use crate::events::{Event, EventBus, Topic};
use crate::latch::ExecutionLatch;
use crate::workers::Command;

/// Client-facing handle to interact with a running battle
#[derive(Clone)]
pub struct BattleHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
    latch: ExecutionLatch,
}

impl BattleHandle {
    pub(crate) fn new(
        command_tx: mpsc::Sender<Command>,
        event_bus: EventBus,
        latch: ExecutionLatch,
    ) -> Self {
        Self {
            command_tx,
            event_bus,
            latch,
        }
    }

    /// Start the battle and return the frozen turn order.
    ///
    /// Subscribe before calling this to observe the opening events.
    pub async fn start(&self) -> Result<Vec<EntityId>> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.send(Command::Start { reply: reply_tx }).await?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Submit the chosen action of the combatant the battle is waiting on.
    ///
    /// Returns [`Submission::Dropped`] while a previous action is still
    /// executing; the action is never applied in that case. Submitting for
    /// any other combatant fails with [`RuntimeError::NotAwaitingActor`].
    pub async fn submit_action(&self, actor: EntityId, action: Action) -> Result<Submission> {
        if self.latch.is_set() {
            debug!("Dropping action from {} while an action is executing", actor);
            return Ok(Submission::Dropped);
        }

        let (reply_tx, reply_rx) = oneshot::channel();

        self.send(Command::SubmitAction {
            actor,
            action,
            reply: reply_tx,
        })
        .await?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Query the current battle (read-only snapshot)
    pub async fn snapshot(&self) -> Result<BattleSnapshot> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.send(Command::Query { reply: reply_tx }).await?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// True while an executed action is being presented.
    pub fn is_executing(&self) -> bool {
        self.latch.is_set()
    }

    /// Ask the worker to stop, whether or not the battle is over.
    pub async fn shutdown(&self) -> Result<()> {
        self.send(Command::Shutdown).await
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Battle` - Battle start and end
    /// - `Topic::Turn` - Player hand-offs and executed actions
    /// - `Topic::Log` - Every battle log line, in order
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use runtime::{Event, Topic, TurnEvent};
    ///
    /// let mut turns = handle.subscribe(Topic::Turn);
    /// while let Ok(Event::Turn(TurnEvent::AwaitingInput { actor, .. })) = turns.recv().await {
    ///     // Ask the player what `actor` should do
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    ///
    /// Returns a map of topic to receiver for each requested topic.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    async fn send(&self, command: Command) -> Result<()> {
        self.command_tx
            .send(command)
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)
    }
}
