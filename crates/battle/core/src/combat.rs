//! Damage and healing formulas.
//!
//! All formulas take the random bonus as a unit draw in `[0, 1)` so callers
//! decide where randomness comes from.

use crate::state::{Entity, StatusKind};

/// Upper bound (exclusive) of the random bonus added to raw damage.
pub const DAMAGE_SPREAD: f64 = 10.0;

/// Divisor applied to raw damage when the target has PROTECT.
pub const PROTECT_DIVISOR: f64 = 1.5;

/// Raw damage of a basic attack.
///
/// ```text
/// raw = floor(STR × 0.8 + unit × 10)
/// ```
pub fn attack_raw(strength: u32, unit: f64) -> f64 {
    (f64::from(strength) * 0.8 + unit * DAMAGE_SPREAD).floor()
}

/// Raw damage of Fire Slash.
///
/// ```text
/// raw = floor(STR × 1.5 + unit × 10)
/// ```
pub fn fire_slash_raw(strength: u32, unit: f64) -> f64 {
    (f64::from(strength) * 1.5 + unit * DAMAGE_SPREAD).floor()
}

/// Damage actually dealt to `target` by a physical hit of `raw` strength.
///
/// ```text
/// raw' = raw / 1.5            (PROTECT only, not floored)
/// actual = max(1, floor(raw' × 100 / (100 + DEF)))
/// ```
pub fn mitigate(raw: f64, target: &Entity) -> u32 {
    let raw = if target.has_status(StatusKind::Protect) {
        raw / PROTECT_DIVISOR
    } else {
        raw
    };
    let reduced = (raw * 100.0 / (100.0 + f64::from(target.stats.def))).floor();

    // Float-to-int casts saturate, so oversized values land on u32::MAX.
    (reduced as u32).max(1)
}

/// HP restored by Heal.
///
/// ```text
/// heal = floor(MND × 1.5 + 20)
/// ```
pub fn heal_amount(mind: u32) -> u32 {
    (f64::from(mind) * 1.5 + 20.0).floor() as u32
}

/// Share of max HP moved by a POISON or REGEN tick.
pub fn tick_amount(max_hp: u32, percent: u32) -> u32 {
    let amount = u64::from(max_hp) * u64::from(percent) / 100;
    u32::try_from(amount).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Archetype, EntityId, Stats};

    fn target(def: u32) -> Entity {
        Entity::new(
            EntityId(9),
            "Dummy",
            Archetype::Monster,
            Stats::new(200, 0, 0, def, 0, 0, 0),
        )
    }

    #[test]
    fn attack_with_no_defense_deals_raw() {
        let dummy = target(0);
        for unit in [0.0, 0.35, 0.999_999] {
            let raw = attack_raw(25, unit);
            assert!((20.0..=29.0).contains(&raw));
            assert_eq!(f64::from(mitigate(raw, &dummy)), raw);
        }
    }

    #[test]
    fn protect_divides_before_flooring() {
        let mut dummy = target(0);
        dummy.add_status(StatusKind::Protect, 3);
        assert_eq!(mitigate(90.0, &dummy), 60);
        // 50 / 1.5 = 33.33.. stays fractional until the final floor
        assert_eq!(mitigate(50.0, &dummy), 33);
    }

    #[test]
    fn defense_mitigates_but_never_below_one() {
        assert_eq!(mitigate(40.0, &target(100)), 20);
        assert_eq!(mitigate(0.0, &target(15)), 1);
    }

    #[test]
    fn heal_and_tick_amounts() {
        assert_eq!(heal_amount(25), 57);
        assert_eq!(tick_amount(80, 5), 4);
        assert_eq!(tick_amount(19, 5), 0);
    }
}
