//! Battle worker that owns the authoritative [`battle_core::Battle`].
//!
//! Receives commands from [`crate::BattleHandle`], drives the battle state
//! machine through its two suspension points, and publishes events to the
//! [`EventBus`].

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use battle_core::{
    Action, Battle, BattleContext, EntityId, RngSource, Step, Stockpile, Submission,
};

use crate::api::{BattleSnapshot, Result, RuntimeError};
use crate::clock::Clock;
use crate::events::{BattleEvent, Event, EventBus, TurnEvent};
use crate::latch::ExecutionLatch;
use crate::sink::BusSink;

/// Commands that can be sent to the battle worker.
pub enum Command {
    /// Announce the battle and fix the turn order.
    Start {
        reply: oneshot::Sender<Result<Vec<EntityId>>>,
    },
    /// Deliver the chosen action of a player-controlled combatant.
    SubmitAction {
        actor: EntityId,
        action: Action,
        reply: oneshot::Sender<Result<Submission>>,
    },
    /// Read-only copy of the battle.
    Query {
        reply: oneshot::Sender<BattleSnapshot>,
    },
    /// Stop the worker without finishing the battle.
    Shutdown,
}

/// Whether the worker should keep running after handling a command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Stop,
}

/// Background task that sequences one battle.
pub struct BattleWorker {
    battle: Battle,
    inventory: Stockpile,
    rng: Box<dyn RngSource>,
    sink: BusSink,
    clock: Arc<dyn Clock>,
    latch: ExecutionLatch,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
}

impl BattleWorker {
    pub fn new(
        battle: Battle,
        inventory: Stockpile,
        rng: Box<dyn RngSource>,
        clock: Arc<dyn Clock>,
        latch: ExecutionLatch,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
    ) -> Self {
        info!(
            target: "runtime::worker",
            "BattleWorker initialized with {} party members and {} enemies",
            battle.roster().party().len(),
            battle.roster().enemies().len()
        );

        Self {
            battle,
            inventory,
            rng,
            sink: BusSink::new(event_bus.clone()),
            clock,
            latch,
            command_rx,
            event_bus,
        }
    }

    /// Main worker loop.
    pub async fn run(mut self) {
        if self.wait_for_start().await == Flow::Stop {
            return;
        }

        loop {
            let step = self.with_ctx(|battle, ctx| battle.advance(ctx));
            let flow = match step {
                Step::AwaitingInput(actor) => {
                    self.publish_turn(TurnEvent::AwaitingInput {
                        actor,
                        turn: self.battle.turn(),
                    });
                    self.await_input(actor).await
                }
                Step::Executed { actor } => self.present(actor).await,
                Step::Ended(outcome) => {
                    info!(
                        target: "runtime::worker",
                        "Battle ended: {:?} (experience {}, forced {})",
                        outcome.result, outcome.experience, outcome.forced
                    );
                    self.event_bus
                        .publish(Event::Battle(BattleEvent::Ended(outcome)));
                    self.serve_finished().await;
                    Flow::Stop
                }
            };

            if flow == Flow::Stop {
                break;
            }
        }

        debug!(target: "runtime::worker", "BattleWorker stopped");
    }

    // ========================================================================
    // Lifecycle stages
    // ========================================================================

    /// Answers queries until the battle is started.
    async fn wait_for_start(&mut self) -> Flow {
        while let Some(cmd) = self.command_rx.recv().await {
            match cmd {
                Command::Start { reply } => {
                    self.with_ctx(|battle, ctx| battle.start(ctx));
                    let order = self.battle.order().to_vec();
                    self.event_bus
                        .publish(Event::Battle(BattleEvent::Started {
                            order: order.clone(),
                        }));
                    send_reply(reply, Ok(order), "Start");
                    return Flow::Continue;
                }
                Command::SubmitAction { reply, .. } => {
                    send_reply(reply, Err(RuntimeError::NotStarted), "SubmitAction");
                }
                Command::Query { reply } => self.reply_snapshot(reply),
                Command::Shutdown => return Flow::Stop,
            }
        }
        Flow::Stop
    }

    /// Waits until `actor`'s action is accepted.
    async fn await_input(&mut self, actor: EntityId) -> Flow {
        while let Some(cmd) = self.command_rx.recv().await {
            match cmd {
                Command::SubmitAction {
                    actor: submitter,
                    action,
                    reply,
                } => {
                    let result = self.submit(submitter, action);
                    let accepted = matches!(result, Ok(Submission::Accepted));
                    send_reply(reply, result, "SubmitAction");
                    if accepted {
                        return Flow::Continue;
                    }
                }
                Command::Start { reply } => {
                    send_reply(reply, Err(RuntimeError::AlreadyStarted), "Start");
                }
                Command::Query { reply } => self.reply_snapshot(reply),
                Command::Shutdown => return Flow::Stop,
            }
        }
        debug!(target: "runtime::worker", "Command channel closed while awaiting {}", actor);
        Flow::Stop
    }

    /// Runs the presentation delay of the action `actor` just executed.
    ///
    /// Submissions arriving before the delay elapses are dropped.
    async fn present(&mut self, actor: EntityId) -> Flow {
        self.latch.set();
        self.publish_turn(TurnEvent::Executed {
            actor,
            turn: self.battle.turn(),
        });

        let delay = Duration::from_millis(self.battle.config().presentation_delay_ms);
        let clock = Arc::clone(&self.clock);
        let mut sleep = clock.sleep(delay);
        let mut open = true;
        let mut flow = Flow::Continue;

        loop {
            tokio::select! {
                _ = &mut sleep => break,
                cmd = self.command_rx.recv(), if open => match cmd {
                    Some(cmd) => {
                        if self.handle_while_executing(cmd) == Flow::Stop {
                            flow = Flow::Stop;
                            break;
                        }
                    }
                    None => {
                        open = false;
                        flow = Flow::Stop;
                    }
                },
            }
        }

        // Anything queued while the delay ran belongs to the executed turn.
        while let Ok(cmd) = self.command_rx.try_recv() {
            if self.handle_while_executing(cmd) == Flow::Stop {
                flow = Flow::Stop;
            }
        }

        self.latch.clear();
        self.battle.complete_execution();
        flow
    }

    /// Keeps answering queries after the battle is over.
    async fn serve_finished(&mut self) {
        while let Some(cmd) = self.command_rx.recv().await {
            match cmd {
                Command::SubmitAction { reply, .. } => {
                    send_reply(reply, Err(RuntimeError::BattleOver), "SubmitAction");
                }
                Command::Start { reply } => {
                    send_reply(reply, Err(RuntimeError::BattleOver), "Start");
                }
                Command::Query { reply } => self.reply_snapshot(reply),
                Command::Shutdown => return,
            }
        }
    }

    // ========================================================================
    // Command handling
    // ========================================================================

    fn submit(&mut self, actor: EntityId, action: Action) -> Result<Submission> {
        if self.battle.roster().get(actor).is_none() {
            return Err(RuntimeError::UnknownActor { actor });
        }

        let submission = self.with_ctx(|battle, ctx| battle.submit_action(actor, action, ctx));
        match submission {
            Submission::Accepted => {
                self.latch.set();
                Ok(Submission::Accepted)
            }
            Submission::Dropped => Ok(Submission::Dropped),
            Submission::Rejected => {
                let expected = self.battle.current_actor();
                warn!(
                    target: "runtime::worker",
                    "Rejected action from {} (awaiting {:?})",
                    actor, expected
                );
                Err(RuntimeError::NotAwaitingActor {
                    expected,
                    provided: actor,
                })
            }
        }
    }

    fn handle_while_executing(&mut self, cmd: Command) -> Flow {
        match cmd {
            Command::SubmitAction { actor, reply, .. } => {
                debug!(
                    target: "runtime::worker",
                    "Dropping action from {} while an action is executing", actor
                );
                send_reply(reply, Ok(Submission::Dropped), "SubmitAction");
            }
            Command::Start { reply } => {
                send_reply(reply, Err(RuntimeError::AlreadyStarted), "Start");
            }
            Command::Query { reply } => self.reply_snapshot(reply),
            Command::Shutdown => return Flow::Stop,
        }
        Flow::Continue
    }

    fn reply_snapshot(&self, reply: oneshot::Sender<BattleSnapshot>) {
        let snapshot = BattleSnapshot::capture(&self.battle, &self.inventory);
        if reply.send(snapshot).is_err() {
            debug!(target: "runtime::worker", "Query reply channel closed (caller dropped)");
        }
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    /// Lends the battle and a context built from the worker's collaborators.
    fn with_ctx<R>(&mut self, f: impl FnOnce(&mut Battle, &mut BattleContext<'_>) -> R) -> R {
        let mut ctx = BattleContext::new(self.rng.as_mut(), &mut self.inventory, &mut self.sink);
        f(&mut self.battle, &mut ctx)
    }

    fn publish_turn(&self, event: TurnEvent) {
        debug!(target: "runtime::worker", "{:?}", event);
        self.event_bus.publish(Event::Turn(event));
    }
}

fn send_reply<T>(reply: oneshot::Sender<T>, value: T, command: &str) {
    if reply.send(value).is_err() {
        debug!(target: "runtime::worker", "{} reply channel closed (caller dropped)", command);
    }
}
