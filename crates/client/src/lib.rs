//! Terminal client for the battle runtime.
//!
//! # Architecture
//!
//! ```text
//! main (composition root)
//!   ├─→ config   (environment)
//!   ├─→ logging  (tracing to a per-session file)
//!   ├─→ content  (demo roster or data directory)
//!   ├─→ runtime  (battle worker, via BattleHandle)
//!   └─→ input    (stdin menus or autopilot)
//! ```

pub mod config;
pub mod content;
pub mod input;
pub mod logging;
pub mod render;

pub use config::ClientConfig;
pub use input::{PromptProvider, StdinProvider};
