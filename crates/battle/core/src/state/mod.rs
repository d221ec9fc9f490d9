//! Battle state types: combatants, their stats and statuses, and the roster.

pub mod entity;
pub mod roster;
pub mod stats;
pub mod status;

pub use entity::{Archetype, CombatFlags, ControlMode, Entity, EntityId, Equipment};
pub use roster::{Roster, RosterError, Side};
pub use stats::Stats;
pub use status::{StatusDescriptor, StatusEffect, StatusEffects, StatusKind};
