//! Worker tasks that back the runtime orchestration.
//!
//! The battle worker owns the battle and executes commands, while the journal
//! worker mirrors the event stream to disk.

mod battle;
mod journal;

pub use battle::{BattleWorker, Command};
pub use journal::JournalWorker;
