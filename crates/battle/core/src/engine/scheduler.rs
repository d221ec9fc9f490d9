//! Turn order.

use core::cmp::Ordering;

use crate::config::BattleConfig;
use crate::state::{Entity, EntityId, Roster, StatusKind};

/// Orders the living combatants by descending effective speed.
///
/// Party members come before enemies on ties, and within a side the roster
/// order is kept. The order is computed once per battle; later HASTE changes
/// do not reshuffle it.
pub fn compute_order(roster: &Roster) -> Vec<EntityId> {
    let mut living: Vec<&Entity> = roster.iter().filter(|e| e.is_alive()).collect();
    // `sort_by` is stable, so ties keep the concatenation order.
    living.sort_by(|a, b| compare_speed(b, a));
    living.into_iter().map(|e| e.id).collect()
}

/// Compares effective speeds (SPD, ×1.5 under HASTE) without leaving integers.
fn compare_speed(a: &Entity, b: &Entity) -> Ordering {
    scaled_speed(a).cmp(&scaled_speed(b))
}

/// Effective speed scaled by the HASTE denominator.
fn scaled_speed(entity: &Entity) -> u64 {
    let spd = u64::from(entity.stats.spd);
    if entity.has_status(StatusKind::Haste) {
        spd * u64::from(BattleConfig::HASTE_NUM)
    } else {
        spd * u64::from(BattleConfig::HASTE_DEN)
    }
}

/// Effective speed as shown to players.
pub fn effective_speed(entity: &Entity) -> f64 {
    scaled_speed(entity) as f64 / f64::from(BattleConfig::HASTE_DEN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Archetype, Stats};

    fn unit(id: u32, spd: u32) -> Entity {
        Entity::new(
            EntityId(id),
            format!("Unit {id}"),
            Archetype::Monster,
            Stats::new(10, 0, 1, 1, 1, 1, spd),
        )
    }

    #[test]
    fn faster_first_ties_keep_roster_order() {
        let roster = Roster::new(vec![unit(0, 10), unit(1, 20)], vec![unit(2, 20)]).unwrap();
        assert_eq!(
            compute_order(&roster),
            vec![EntityId(1), EntityId(2), EntityId(0)]
        );
    }

    #[test]
    fn haste_counts_half_again() {
        let mut hasted = unit(0, 14);
        hasted.add_status(StatusKind::Haste, 3);
        let roster = Roster::new(vec![hasted], vec![unit(1, 20)]).unwrap();

        // 14 × 1.5 = 21 beats 20
        assert_eq!(compute_order(&roster), vec![EntityId(0), EntityId(1)]);
        assert_eq!(effective_speed(roster.get(EntityId(0)).unwrap()), 21.0);
    }

    #[test]
    fn fallen_are_left_out() {
        let mut fallen = unit(0, 99);
        fallen.stats.hp = 0;
        let roster = Roster::new(vec![fallen, unit(1, 5)], vec![unit(2, 1)]).unwrap();
        assert_eq!(compute_order(&roster), vec![EntityId(1), EntityId(2)]);
    }
}
