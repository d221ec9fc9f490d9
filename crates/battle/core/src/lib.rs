//! Deterministic turn-based battle rules.
//!
//! `battle-core` holds the combatant model, the status engine, the ability
//! catalog, turn scheduling, action resolution, decision policies and the
//! [`Battle`] state machine that sequences them. It performs no I/O and never
//! waits; randomness, the inventory and log delivery are supplied by the
//! caller through [`BattleContext`].
pub mod ability;
pub mod action;
pub mod ai;
pub mod battle;
pub mod combat;
pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod inventory;
pub mod log;
pub mod rng;
pub mod state;

pub use ability::{
    AbilityCategory, AbilityDescriptor, AbilityId, EffectChange, EffectOutcome, TargetKind,
};
pub use action::{Action, ActionError, TurnError};
pub use ai::{
    AggressivePolicy, DecisionContext, HostilePolicy, Policy, PolicyKind, SupportPolicy,
};
pub use battle::{Battle, BattleOutcome, BattleResult, Phase, Step, Submission};
pub use config::BattleConfig;
pub use context::BattleContext;
pub use engine::{ActionResolver, Growth, compute_order, effective_speed, gain_exp};
pub use error::{ErrorSeverity, GameError};
pub use inventory::{Inventory, ItemId, Stockpile};
pub use log::{BattleLog, LogEntry, LogKind, LogSink, NullSink};
pub use rng::{PcgRng, RngSource, SequenceRng};
pub use state::{
    Archetype, CombatFlags, ControlMode, Entity, EntityId, Equipment, Roster, RosterError, Side,
    Stats, StatusDescriptor, StatusEffect, StatusEffects, StatusKind,
};
