//! High-level runtime orchestrator.
//!
//! The runtime owns background workers, wires up command/event channels, and
//! exposes a builder-based API for clients to drive a battle.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::task::JoinHandle;

use battle_core::{Battle, BattleConfig, RngSource, Roster, Stockpile};

use crate::api::{BattleHandle, Result, RuntimeError};
use crate::clock::{Clock, TokioClock};
use crate::events::{Event, EventBus, Topic};
use crate::latch::ExecutionLatch;
use crate::rng::EntropyRng;
use crate::workers::{BattleWorker, Command, JournalWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub battle: BattleConfig,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Write every log and battle event to this file as JSON lines.
    pub journal_path: Option<PathBuf>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            battle: BattleConfig::default(),
            event_buffer_size: 100,
            command_buffer_size: 32,
            journal_path: None,
        }
    }
}

/// Main runtime that hosts one battle.
///
/// [`BattleHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: BattleHandle,
    battle_worker: JoinHandle<()>,
    journal: Option<(oneshot::Sender<()>, JoinHandle<Result<()>>)>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> BattleHandle {
        self.handle.clone()
    }

    /// Subscribe to events from a specific topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.handle.subscribe(topic)
    }

    /// Wait for the battle worker to finish, then close the journal.
    ///
    /// The worker keeps serving queries after the battle ends; this stops it.
    pub async fn shutdown(self) -> Result<()> {
        // The worker may already be gone; that is the state we want.
        let _ = self.handle.shutdown().await;
        drop(self.handle);

        self.battle_worker
            .await
            .map_err(RuntimeError::WorkerJoin)?;

        if let Some((stop_tx, journal)) = self.journal {
            let _ = stop_tx.send(());
            journal.await.map_err(RuntimeError::WorkerJoin)??;
        }

        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    roster: Option<Roster>,
    inventory: Option<Stockpile>,
    rng: Option<Box<dyn RngSource>>,
    clock: Option<Arc<dyn Clock>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            roster: None,
            inventory: None,
            rng: None,
            clock: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Override only the battle rules
    pub fn battle_config(mut self, battle: BattleConfig) -> Self {
        self.config.battle = battle;
        self
    }

    /// Provide the combatants (required)
    pub fn roster(mut self, roster: Roster) -> Self {
        self.roster = Some(roster);
        self
    }

    /// Provide the party inventory (defaults to [`Stockpile::starter`])
    pub fn inventory(mut self, inventory: Stockpile) -> Self {
        self.inventory = Some(inventory);
        self
    }

    /// Provide the random source (defaults to [`EntropyRng`])
    pub fn rng(mut self, rng: impl RngSource + 'static) -> Self {
        self.rng = Some(Box::new(rng));
        self
    }

    /// Provide the time source for the presentation delay (defaults to [`TokioClock`])
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Arc::new(clock));
        self
    }

    /// Write a JSON-lines journal of the battle to `path`
    pub fn journal(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.journal_path = Some(path.into());
        self
    }

    /// Build the runtime and spawn its workers. The battle waits for
    /// [`BattleHandle::start`].
    pub async fn build(self) -> Result<Runtime> {
        let roster = self.roster.ok_or(RuntimeError::MissingRoster)?;

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);
        let latch = ExecutionLatch::new();

        let journal = match &self.config.journal_path {
            Some(path) => {
                let (stop_tx, stop_rx) = oneshot::channel();
                let worker = JournalWorker::new(path, &event_bus, stop_rx)?;
                Some((stop_tx, tokio::spawn(worker.run())))
            }
            None => None,
        };

        let handle = BattleHandle::new(command_tx, event_bus.clone(), latch.clone());

        let worker = BattleWorker::new(
            Battle::new(roster, self.config.battle),
            self.inventory.unwrap_or_else(Stockpile::starter),
            self.rng.unwrap_or_else(|| Box::new(EntropyRng::new())),
            self.clock.unwrap_or_else(|| Arc::new(TokioClock)),
            latch,
            command_rx,
            event_bus,
        );

        let battle_worker = tokio::spawn(async move {
            worker.run().await;
        });

        Ok(Runtime {
            handle,
            battle_worker,
            journal,
        })
    }
}
