//! Status effect engine.
//!
//! Runs once every time a living combatant is visited by the turn scan, right
//! before it is checked for act-eligibility.

use crate::combat;
use crate::config::BattleConfig;
use crate::log::LogEntry;
use crate::state::{Entity, StatusKind};

/// Applies periodic effects, then ages out timed statuses.
///
/// Order is fixed: POISON, then REGEN, then duration decay. A combatant that
/// drops to 0 HP from poison still has its other statuses decremented.
pub fn tick(entity: &mut Entity, config: &BattleConfig) -> Vec<LogEntry> {
    let mut messages = Vec::new();
    let amount = combat::tick_amount(entity.stats.max_hp, config.tick_percent);

    if entity.has_status(StatusKind::Poison) {
        entity.stats.lose_hp(amount);
        messages.push(LogEntry::info(format!(
            "{} takes {amount} damage from POISON!",
            entity.name
        )));
    }

    if entity.has_status(StatusKind::Regen) {
        entity.stats.gain_hp(amount);
        messages.push(LogEntry::info(format!(
            "{} recovers {amount} HP from REGEN!",
            entity.name
        )));
    }

    for kind in entity.statuses.decay() {
        messages.push(LogEntry::info(format!("{}'s {kind} wore off!", entity.name)));
    }

    messages
}
