/// Battle tuning constants and tunable parameters.
///
/// Percentages are whole numbers in `0..=100`; a draw succeeds when a uniform
/// roll in `0..100` lands below the configured value.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleConfig {
    /// Number of entries the ring log keeps before discarding the oldest.
    pub log_capacity: usize,
    /// Pause after each resolved action, in milliseconds.
    pub presentation_delay_ms: u64,
    /// Experience granted per defeated enemy that does not declare its own reward.
    pub default_exp_reward: u32,
    /// Chance that a paralyzed combatant still gets to act.
    pub paralysis_act_chance: u32,
    /// Chance that a HEADSTRONG combatant throws away a queued override.
    pub stubborn_chance: u32,
    /// Chance that a defending PRAYER user wastes the turn praying.
    pub prayer_chance: u32,
    /// Share of max HP removed by POISON / restored by REGEN on every tick.
    pub tick_percent: u32,
    /// Scan guard: iterations allowed per turn = order length × this factor.
    pub scan_guard_factor: usize,
    /// Turns a status granted by an ability (or listed in a roster file
    /// without a duration) lasts.
    pub default_status_turns: u32,
}

impl BattleConfig {
    // ===== compile-time constants used as type parameters =====
    pub const MAX_ABILITIES: usize = 8;
    /// One slot per [`crate::StatusKind`] variant.
    pub const MAX_STATUS_EFFECTS: usize = 6;

    // ===== fixed rules =====
    /// HASTE multiplies SPD by `NUM / DEN` when computing turn order.
    pub const HASTE_NUM: u32 = 3;
    pub const HASTE_DEN: u32 = 2;
    /// Experience needed per level: `level × EXP_PER_LEVEL`.
    pub const EXP_PER_LEVEL: u32 = 100;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_LOG_CAPACITY: usize = 10;
    pub const DEFAULT_PRESENTATION_DELAY_MS: u64 = 1500;
    pub const DEFAULT_EXP_REWARD: u32 = 50;
    pub const DEFAULT_PARALYSIS_ACT_CHANCE: u32 = 50;
    pub const DEFAULT_STUBBORN_CHANCE: u32 = 10;
    pub const DEFAULT_PRAYER_CHANCE: u32 = 15;
    pub const DEFAULT_TICK_PERCENT: u32 = 5;
    pub const DEFAULT_SCAN_GUARD_FACTOR: usize = 2;
    pub const DEFAULT_STATUS_TURNS: u32 = 3;

    pub fn new() -> Self {
        Self {
            log_capacity: Self::DEFAULT_LOG_CAPACITY,
            presentation_delay_ms: Self::DEFAULT_PRESENTATION_DELAY_MS,
            default_exp_reward: Self::DEFAULT_EXP_REWARD,
            paralysis_act_chance: Self::DEFAULT_PARALYSIS_ACT_CHANCE,
            stubborn_chance: Self::DEFAULT_STUBBORN_CHANCE,
            prayer_chance: Self::DEFAULT_PRAYER_CHANCE,
            tick_percent: Self::DEFAULT_TICK_PERCENT,
            scan_guard_factor: Self::DEFAULT_SCAN_GUARD_FACTOR,
            default_status_turns: Self::DEFAULT_STATUS_TURNS,
        }
    }

    pub fn with_presentation_delay_ms(mut self, delay_ms: u64) -> Self {
        self.presentation_delay_ms = delay_ms;
        self
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}
