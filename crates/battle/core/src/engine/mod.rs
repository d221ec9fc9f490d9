//! Rules that move a battle forward: status ticking, turn order, action
//! resolution and progression.

pub mod progression;
pub mod resolver;
pub mod scheduler;
pub mod status;

pub use progression::{Growth, gain_exp};
pub use resolver::ActionResolver;
pub use scheduler::{compute_order, effective_speed};
