//! Built-in demo party and encounter.
//!
//! Mirrors `data/party.ron` and `data/encounter.ron` so the game runs without
//! a data directory.

use battle_core::{
    AbilityId, AggressivePolicy, Archetype, Entity, EntityId, Equipment, HostilePolicy,
    PolicyKind, Roster, RosterError, Stats, SupportPolicy,
};

pub const BLAYDE: EntityId = EntityId(0);
pub const SERAPHA: EntityId = EntityId(1);
pub const LEO: EntityId = EntityId(2);
pub const ELIZA: EntityId = EntityId(3);
pub const SHADOW_BEAST: EntityId = EntityId(4);

/// The four heroes of the demo.
pub fn party() -> Vec<Entity> {
    vec![
        Entity::new(
            BLAYDE,
            "Blayde",
            Archetype::Hero,
            Stats::new(80, 20, 25, 15, 5, 5, 15),
        )
        .with_level(5)
        .with_abilities([AbilityId::FireSlash, AbilityId::Headstrong])
        .with_policy(PolicyKind::Aggressive(AggressivePolicy::new(
            AbilityId::FireSlash,
        )))
        .with_equipment(Equipment {
            weapon: Some("Bronze Sword".into()),
            armor: Some("Leather Vest".into()),
            accessory: None,
        }),
        Entity::new(
            SERAPHA,
            "Serapha",
            Archetype::Healer,
            Stats::new(50, 40, 8, 10, 12, 25, 18),
        )
        .with_level(5)
        .with_abilities([
            AbilityId::Heal,
            AbilityId::CurePoison,
            AbilityId::Protect,
            AbilityId::Prayer,
        ])
        .with_policy(PolicyKind::Support(SupportPolicy::new(
            AbilityId::Heal,
            AbilityId::Protect,
            Some(BLAYDE),
        )))
        .with_equipment(Equipment {
            weapon: Some("Oak Staff".into()),
            armor: Some("Silk Robe".into()),
            accessory: None,
        }),
        Entity::new(
            LEO,
            "Leo",
            Archetype::Realist,
            Stats::new(70, 25, 18, 22, 12, 12, 14),
        )
        .with_level(5)
        .with_abilities([AbilityId::Override, AbilityId::UsePotion]),
        Entity::new(
            ELIZA,
            "Eliza",
            Archetype::Strategist,
            Stats::new(60, 30, 14, 16, 22, 20, 16),
        )
        .with_level(5)
        .with_abilities([AbilityId::Override, AbilityId::Scan]),
    ]
}

/// The demo encounter: a single Shadow Beast.
pub fn encounter() -> Vec<Entity> {
    vec![
        Entity::new(
            SHADOW_BEAST,
            "Shadow Beast",
            Archetype::Monster,
            Stats::new(60, 0, 18, 12, 5, 5, 14),
        )
        .with_level(4)
        .with_exp_reward(80)
        .with_policy(PolicyKind::Hostile(HostilePolicy)),
    ]
}

pub fn demo_roster() -> Result<Roster, RosterError> {
    Roster::new(party(), encounter())
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::compute_order;

    #[test]
    fn demo_roster_is_valid() {
        let roster = demo_roster().unwrap();
        assert_eq!(roster.party().len(), 4);
        assert_eq!(roster.enemies().len(), 1);
    }

    #[test]
    fn demo_turn_order() {
        let roster = demo_roster().unwrap();
        // Serapha 18, Eliza 16, Blayde 15, Leo 14, Shadow Beast 14
        assert_eq!(
            compute_order(&roster),
            vec![SERAPHA, ELIZA, BLAYDE, LEO, SHADOW_BEAST]
        );
    }
}
