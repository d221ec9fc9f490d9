//! Decision policies for policy-controlled combatants.
//!
//! A policy sees the deciding combatant, its own side and the opposing side
//! (defeated members included) and returns the action to resolve. Policies
//! never fail: when nothing sensible is possible they defend.

mod aggressive;
mod hostile;
mod support;

pub use aggressive::AggressivePolicy;
pub use hostile::HostilePolicy;
pub use support::SupportPolicy;

use crate::action::Action;
use crate::config::BattleConfig;
use crate::rng::RngSource;
use crate::state::Entity;

/// Inputs a policy may draw on besides the combatants.
pub struct DecisionContext<'a> {
    pub rng: &'a mut dyn RngSource,
    pub config: &'a BattleConfig,
}

/// A decision strategy.
pub trait Policy {
    fn decide(
        &self,
        me: &Entity,
        allies: &[Entity],
        foes: &[Entity],
        ctx: &mut DecisionContext<'_>,
    ) -> Action;
}

/// The policy attached to a [`crate::ControlMode::Policy`] combatant.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PolicyKind {
    Aggressive(AggressivePolicy),
    Support(SupportPolicy),
    Hostile(HostilePolicy),
}

impl PolicyKind {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Aggressive(_) => "aggressive",
            Self::Support(_) => "support",
            Self::Hostile(_) => "hostile",
        }
    }
}

impl Policy for PolicyKind {
    fn decide(
        &self,
        me: &Entity,
        allies: &[Entity],
        foes: &[Entity],
        ctx: &mut DecisionContext<'_>,
    ) -> Action {
        match self {
            Self::Aggressive(policy) => policy.decide(me, allies, foes, ctx),
            Self::Support(policy) => policy.decide(me, allies, foes, ctx),
            Self::Hostile(policy) => policy.decide(me, allies, foes, ctx),
        }
    }
}

/// Uniformly picks a living combatant from `candidates`.
pub(crate) fn random_living<'e>(
    candidates: &'e [Entity],
    rng: &mut dyn RngSource,
) -> Option<&'e Entity> {
    let living: Vec<&Entity> = candidates.iter().filter(|e| e.is_alive()).collect();
    let index = rng.pick_index(living.len())?;
    living.get(index).copied()
}
