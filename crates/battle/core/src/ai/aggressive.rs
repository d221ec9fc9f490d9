use super::{DecisionContext, Policy, random_living};
use crate::ability::AbilityId;
use crate::action::Action;
use crate::state::Entity;

/// Spends MP on a signature move whenever possible, otherwise swings.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AggressivePolicy {
    pub signature: AbilityId,
}

impl AggressivePolicy {
    pub fn new(signature: AbilityId) -> Self {
        Self { signature }
    }
}

impl Policy for AggressivePolicy {
    fn decide(
        &self,
        me: &Entity,
        _allies: &[Entity],
        foes: &[Entity],
        ctx: &mut DecisionContext<'_>,
    ) -> Action {
        let Some(target) = random_living(foes, ctx.rng) else {
            return Action::Defend;
        };

        if me.knows(self.signature) && me.can_afford(self.signature) {
            Action::ability(self.signature, target.id)
        } else {
            Action::attack(target.id)
        }
    }
}
