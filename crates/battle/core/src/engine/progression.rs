//! Experience and level growth.

use crate::state::{Archetype, Entity};

/// Stat increases granted per level gained.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Growth {
    pub max_hp: u32,
    pub max_mp: u32,
    pub str: u32,
    pub def: u32,
    pub int: u32,
    pub mnd: u32,
    pub spd: u32,
}

impl Growth {
    pub const fn of(archetype: Archetype) -> Self {
        let (max_hp, max_mp, str, def, int, mnd, spd) = match archetype {
            Archetype::Hero => (10, 2, 5, 3, 1, 1, 2),
            Archetype::Healer => (5, 8, 1, 2, 2, 5, 3),
            Archetype::Realist => (8, 3, 3, 5, 2, 2, 2),
            Archetype::Strategist => (6, 5, 2, 3, 5, 4, 3),
            Archetype::Monster => (0, 0, 0, 0, 0, 0, 0),
        };
        Self {
            max_hp,
            max_mp,
            str,
            def,
            int,
            mnd,
            spd,
        }
    }
}

/// Grants experience, levelling up as many times as it pays for.
///
/// Every level gained applies the archetype's growth and fully restores HP
/// and MP. Returns one message per level gained.
pub fn gain_exp(entity: &mut Entity, amount: u32) -> Vec<String> {
    let mut messages = Vec::new();
    entity.exp = entity.exp.saturating_add(amount);

    while entity.exp_to_next > 0 && entity.exp >= entity.exp_to_next {
        entity.exp -= entity.exp_to_next;
        level_up(entity);
        messages.push(format!("{} reached Level {}!", entity.name, entity.level));
    }

    messages
}

fn level_up(entity: &mut Entity) {
    let growth = Growth::of(entity.archetype);
    let stats = &mut entity.stats;

    entity.level += 1;
    stats.max_hp += growth.max_hp;
    stats.max_mp += growth.max_mp;
    stats.str += growth.str;
    stats.def += growth.def;
    stats.int += growth.int;
    stats.mnd += growth.mnd;
    stats.spd += growth.spd;
    stats.restore_all();

    entity.exp_to_next = Entity::exp_needed(entity.level);
}
