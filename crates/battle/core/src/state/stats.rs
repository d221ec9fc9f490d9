//! Stat block and resource pools.
//!
//! Current HP and MP are clamped into `0..=max` by every mutator, so no caller
//! ever observes an out-of-range pool.

/// The stat block of a combatant.
///
/// - **STR** (Strength): physical attack and physical abilities
/// - **DEF** (Defense): mitigates incoming physical damage
/// - **INT** (Intelligence): reserved for offensive magic
/// - **MND** (Mind): healing power
/// - **SPD** (Speed): turn order
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stats {
    pub hp: u32,
    pub max_hp: u32,
    pub mp: u32,
    pub max_mp: u32,
    pub str: u32,
    pub def: u32,
    pub int: u32,
    pub mnd: u32,
    pub spd: u32,
}

impl Stats {
    /// Full pools: `hp = max_hp`, `mp = max_mp`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        max_hp: u32,
        max_mp: u32,
        str: u32,
        def: u32,
        int: u32,
        mnd: u32,
        spd: u32,
    ) -> Self {
        Self {
            hp: max_hp,
            max_hp,
            mp: max_mp,
            max_mp,
            str,
            def,
            int,
            mnd,
            spd,
        }
    }

    /// Overrides the current pools, clamped to their maximums.
    pub fn with_current(mut self, hp: u32, mp: u32) -> Self {
        self.hp = hp.min(self.max_hp);
        self.mp = mp.min(self.max_mp);
        self
    }

    /// Reduces HP, never below zero. Returns the HP actually lost.
    pub fn lose_hp(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.hp);
        self.hp -= lost;
        lost
    }

    /// Restores HP, never above `max_hp`. Returns the HP actually gained.
    pub fn gain_hp(&mut self, amount: u32) -> u32 {
        let gained = amount.min(self.max_hp - self.hp.min(self.max_hp));
        self.hp = (self.hp + gained).min(self.max_hp);
        gained
    }

    /// Restores MP, never above `max_mp`. Returns the MP actually gained.
    pub fn gain_mp(&mut self, amount: u32) -> u32 {
        let gained = amount.min(self.max_mp - self.mp.min(self.max_mp));
        self.mp = (self.mp + gained).min(self.max_mp);
        gained
    }

    /// Deducts MP if affordable. Returns false (and changes nothing) otherwise.
    pub fn spend_mp(&mut self, cost: u32) -> bool {
        if self.mp < cost {
            return false;
        }
        self.mp -= cost;
        true
    }

    pub fn restore_all(&mut self) {
        self.hp = self.max_hp;
        self.mp = self.max_mp;
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn is_wounded(&self) -> bool {
        self.hp < self.max_hp
    }

    /// True when both pools respect `0 ..= max`.
    pub fn in_bounds(&self) -> bool {
        self.hp <= self.max_hp && self.mp <= self.max_mp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Stats {
        Stats::new(80, 20, 25, 15, 5, 5, 15)
    }

    #[test]
    fn pools_clamp() {
        let mut stats = sample();

        assert_eq!(stats.lose_hp(500), 80);
        assert_eq!(stats.hp, 0);

        assert_eq!(stats.gain_hp(500), 80);
        assert_eq!(stats.hp, 80);

        assert!(!stats.spend_mp(21));
        assert_eq!(stats.mp, 20);
        assert!(stats.spend_mp(20));
        assert_eq!(stats.gain_mp(99), 20);
        assert!(stats.in_bounds());
    }

    #[test]
    fn with_current_clamps_to_max() {
        let stats = sample().with_current(999, 3);
        assert_eq!(stats.hp, 80);
        assert_eq!(stats.mp, 3);
    }
}
