//! Battle content: the built-in demo roster and loaders for RON/TOML data.
//!
//! - Party and encounter rosters (data-driven via RON)
//! - Battle tuning (data-driven via TOML)
//!
//! Loaders produce battle-core types directly; name references inside data
//! files (such as a support policy's ward) are resolved while loading.

pub mod roster;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use roster::{demo_roster, encounter, party};

#[cfg(feature = "loaders")]
pub use loaders::{
    CombatantSpec, ConfigLoader, ContentFactory, ControlSpec, RosterLoader, StatusSpec,
};
