use super::{DecisionContext, Policy};
use crate::ability::AbilityId;
use crate::action::Action;
use crate::state::{Entity, EntityId};

/// Heals whoever is hurt first, otherwise buffs its ward, otherwise defends.
///
/// A defending supporter that knows [`AbilityId::Prayer`] may instead spend
/// the turn praying.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SupportPolicy {
    pub heal: AbilityId,
    pub buff: AbilityId,
    /// The ally that receives the buff.
    pub ward: Option<EntityId>,
}

impl SupportPolicy {
    pub fn new(heal: AbilityId, buff: AbilityId, ward: Option<EntityId>) -> Self {
        Self { heal, buff, ward }
    }
}

impl Policy for SupportPolicy {
    fn decide(
        &self,
        me: &Entity,
        allies: &[Entity],
        _foes: &[Entity],
        ctx: &mut DecisionContext<'_>,
    ) -> Action {
        if me.is_defending()
            && me.knows(AbilityId::Prayer)
            && ctx.rng.chance(ctx.config.prayer_chance)
        {
            return Action::Pray;
        }

        // First ally below max HP in list order. A fallen one is still picked
        // and the resolver turns the heal into a no-op.
        if me.knows(self.heal) && me.can_afford(self.heal) {
            let wounded = allies.iter().find(|a| a.stats.is_wounded());
            if let Some(ally) = wounded {
                return Action::ability(self.heal, ally.id);
            }
        }

        // The buff is recast even if it is already active.
        let ward = self
            .ward
            .and_then(|id| allies.iter().find(|a| a.id == id))
            .filter(|a| a.is_alive());
        if let Some(ward) = ward
            && me.knows(self.buff)
            && me.can_afford(self.buff)
        {
            return Action::ability(self.buff, ward.id);
        }

        Action::Defend
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::fixtures::{healer, hero};
    use crate::config::BattleConfig;
    use crate::rng::SequenceRng;
    use crate::state::StatusKind;

    fn policy() -> SupportPolicy {
        SupportPolicy::new(AbilityId::Heal, AbilityId::Protect, Some(EntityId(0)))
    }

    fn decide(me: &Entity, allies: &[Entity], draw: u32) -> Action {
        let config = BattleConfig::default();
        let mut rng = SequenceRng::new([draw]);
        let mut ctx = DecisionContext {
            rng: &mut rng,
            config: &config,
        };
        policy().decide(me, allies, &[], &mut ctx)
    }

    #[test]
    fn heals_first_wounded_ally() {
        let mut blayde = hero();
        blayde.stats.hp -= 1;
        let me = healer();
        let allies = [blayde, me.clone()];

        assert_eq!(
            decide(&me, &allies, 99),
            Action::ability(AbilityId::Heal, EntityId(0))
        );
    }

    #[test]
    fn fallen_ally_first_in_line_is_still_chosen() {
        let mut blayde = hero();
        blayde.stats.hp = 0;
        let me = healer();
        let mut leo = hero();
        leo.id = EntityId(2);
        leo.name = "Leo".into();
        leo.stats.hp = 10;
        let allies = [blayde, me.clone(), leo];

        assert_eq!(
            decide(&me, &allies, 99),
            Action::ability(AbilityId::Heal, EntityId(0))
        );
    }

    #[test]
    fn buffs_ward_when_nobody_is_hurt() {
        let me = healer();
        let mut blayde = hero();
        blayde.add_status(StatusKind::Protect, 3);
        let allies = [blayde, me.clone()];

        assert_eq!(
            decide(&me, &allies, 99),
            Action::ability(AbilityId::Protect, EntityId(0))
        );
    }

    #[test]
    fn defends_when_out_of_mp() {
        let mut me = healer();
        me.stats.mp = 3;
        let mut blayde = hero();
        blayde.stats.hp = 10;
        let allies = [blayde, me.clone()];

        assert_eq!(decide(&me, &allies, 99), Action::Defend);
    }

    #[test]
    fn defending_supporter_may_pray() {
        let mut me = healer();
        me.set_defending(true);
        let allies = [hero(), me.clone()];

        assert_eq!(decide(&me, &allies, 14), Action::Pray);
        assert_eq!(
            decide(&me, &allies, 15),
            Action::ability(AbilityId::Protect, EntityId(0))
        );
    }

    #[test]
    fn prayer_needs_the_passive() {
        let mut me = healer();
        me.abilities.retain(|a| *a != AbilityId::Prayer);
        me.set_defending(true);
        let allies = [hero(), me.clone()];

        assert_ne!(decide(&me, &allies, 0), Action::Pray);
    }
}
