//! Plain-text rendering of snapshots and log lines.

use battle_core::{BattleOutcome, BattleResult, Entity, LogEntry, Side};
use runtime::BattleSnapshot;

/// One status line per combatant, party first.
///
/// Enemy HP stays hidden until the enemy has been scanned.
pub fn roster_lines(snapshot: &BattleSnapshot) -> Vec<String> {
    let roster = &snapshot.roster;
    roster
        .party()
        .iter()
        .map(|e| entity_line(e, Side::Party))
        .chain(roster.enemies().iter().map(|e| entity_line(e, Side::Enemies)))
        .collect()
}

pub fn entity_line(entity: &Entity, side: Side) -> String {
    let hp = if side == Side::Enemies && !entity.is_scanned() {
        "HP ???".to_string()
    } else {
        format!("HP {}/{}", entity.stats.hp, entity.stats.max_hp)
    };

    let mut line = format!("{:<14} Lv{:<3} {}", entity.name, entity.level, hp);
    if side == Side::Party {
        line.push_str(&format!("  MP {}/{}", entity.stats.mp, entity.stats.max_mp));
    }
    if !entity.is_alive() {
        line.push_str("  [KO]");
    }

    let statuses: Vec<String> = entity
        .statuses
        .iter()
        .map(|s| s.kind.label().to_string())
        .collect();
    if !statuses.is_empty() {
        line.push_str(&format!("  ({})", statuses.join(", ")));
    }
    line
}

pub fn log_line(entry: &LogEntry) -> String {
    if entry.is_error() {
        format!("!! {}", entry.message)
    } else {
        entry.message.clone()
    }
}

pub fn outcome_line(outcome: &BattleOutcome) -> String {
    match (outcome.result, outcome.forced) {
        (BattleResult::Victory, _) => {
            format!("The party is victorious! (+{} EXP)", outcome.experience)
        }
        (BattleResult::Defeat, true) => "The battle stalled and was called off.".to_string(),
        (BattleResult::Defeat, false) => "The party has fallen.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{Archetype, EntityId, Stats, StatusKind};

    fn beast() -> Entity {
        Entity::new(
            EntityId(4),
            "Shadow Beast",
            Archetype::Monster,
            Stats::new(60, 0, 18, 12, 5, 5, 14),
        )
    }

    #[test]
    fn enemy_hp_is_hidden_until_scanned() {
        let line = entity_line(&beast(), Side::Enemies);
        assert!(line.contains("HP ???"));
        assert!(!line.contains("MP"));
    }

    #[test]
    fn party_lines_show_pools_and_statuses() {
        let mut hero = Entity::new(
            EntityId(0),
            "Blayde",
            Archetype::Hero,
            Stats::new(80, 20, 25, 15, 5, 5, 15),
        );
        hero.add_status(StatusKind::Poison, 3);

        let line = entity_line(&hero, Side::Party);
        assert!(line.contains("HP 80/80"));
        assert!(line.contains("MP 20/20"));
        assert!(line.contains(StatusKind::Poison.label()));
    }

    #[test]
    fn error_entries_are_marked() {
        assert_eq!(log_line(&LogEntry::error("stuck")), "!! stuck");
        assert_eq!(log_line(&LogEntry::info("Victory!")), "Victory!");
    }
}
