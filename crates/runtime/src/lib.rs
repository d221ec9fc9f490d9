//! Async orchestration for turn-based battles.
//!
//! This crate wires a [`battle_core::Battle`] into a tokio worker task, a
//! command channel, and a topic-based event bus. Consumers embed [`Runtime`]
//! to host a battle, subscribe to its events, and feed player actions through
//! [`BattleHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides the topic-based event bus
//! - [`clock`], [`rng`], [`sink`] and [`latch`] adapt the battle's
//!   collaborators to an async host
//! - `workers` keeps background tasks internal to the crate
pub mod api;
pub mod clock;
pub mod events;
pub mod latch;
pub mod rng;
pub mod runtime;
pub mod sink;

mod workers;

pub use api::{
    ActionProvider, AutopilotProvider, BattleHandle, BattleSnapshot, Result, RuntimeError,
    ScriptedProvider, drive_players,
};
pub use clock::{Clock, ImmediateClock, TokioClock};
pub use events::{BattleEvent, Event, EventBus, LogEvent, Topic, TurnEvent};
pub use latch::ExecutionLatch;
pub use rng::EntropyRng;
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
pub use sink::BusSink;
