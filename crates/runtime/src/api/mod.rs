//! Public runtime API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate so
//! other layers can stay focused on orchestration and workers.

pub mod driver;
pub mod errors;
pub mod handle;
pub mod providers;
pub mod snapshot;

pub use driver::drive_players;
pub use errors::{Result, RuntimeError};
pub use handle::BattleHandle;
pub use providers::{ActionProvider, AutopilotProvider, ScriptedProvider};
pub use snapshot::BattleSnapshot;
