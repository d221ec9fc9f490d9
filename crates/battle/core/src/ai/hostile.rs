use super::{DecisionContext, Policy, random_living};
use crate::action::Action;
use crate::state::Entity;

/// Attacks a random living opponent every turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HostilePolicy;

impl Policy for HostilePolicy {
    fn decide(
        &self,
        _me: &Entity,
        _allies: &[Entity],
        foes: &[Entity],
        ctx: &mut DecisionContext<'_>,
    ) -> Action {
        random_living(foes, ctx.rng)
            .map(|target| Action::attack(target.id))
            .unwrap_or(Action::Defend)
    }
}
