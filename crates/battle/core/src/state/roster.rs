//! The two sides of an encounter.

use std::collections::HashSet;

use super::entity::{Entity, EntityId};
use crate::error::{ErrorSeverity, GameError};

/// Which side of the encounter a combatant fights on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Party,
    Enemies,
}

impl Side {
    pub const fn opposing(self) -> Self {
        match self {
            Side::Party => Side::Enemies,
            Side::Enemies => Side::Party,
        }
    }
}

/// Errors raised while assembling a roster.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RosterError {
    #[error("entity id {0} is used more than once")]
    DuplicateId(EntityId),

    #[error("entity name {0:?} is used more than once")]
    DuplicateName(String),

    #[error("the party is empty")]
    EmptyParty,

    #[error("the encounter has no enemies")]
    NoEnemies,
}

impl GameError for RosterError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateId(_) => "ROSTER_DUPLICATE_ID",
            Self::DuplicateName(_) => "ROSTER_DUPLICATE_NAME",
            Self::EmptyParty => "ROSTER_EMPTY_PARTY",
            Self::NoEnemies => "ROSTER_NO_ENEMIES",
        }
    }
}

/// Every combatant of one battle, party first.
///
/// Defeated combatants stay in the roster; they are only filtered out of turns
/// and target selection.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Roster {
    party: Vec<Entity>,
    enemies: Vec<Entity>,
}

impl Roster {
    /// Assembles a roster, rejecting empty sides and duplicate ids or names.
    pub fn new(party: Vec<Entity>, enemies: Vec<Entity>) -> Result<Self, RosterError> {
        if party.is_empty() {
            return Err(RosterError::EmptyParty);
        }
        if enemies.is_empty() {
            return Err(RosterError::NoEnemies);
        }

        let mut ids = HashSet::new();
        let mut names = HashSet::new();
        for entity in party.iter().chain(enemies.iter()) {
            if !ids.insert(entity.id) {
                return Err(RosterError::DuplicateId(entity.id));
            }
            if !names.insert(entity.name.as_str()) {
                return Err(RosterError::DuplicateName(entity.name.clone()));
            }
        }

        Ok(Self { party, enemies })
    }

    pub fn party(&self) -> &[Entity] {
        &self.party
    }

    pub fn enemies(&self) -> &[Entity] {
        &self.enemies
    }

    pub fn side(&self, side: Side) -> &[Entity] {
        match side {
            Side::Party => &self.party,
            Side::Enemies => &self.enemies,
        }
    }

    /// Party followed by enemies.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.party.iter().chain(self.enemies.iter())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.party.iter_mut().chain(self.enemies.iter_mut())
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.iter_mut().find(|e| e.id == id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Entity> {
        self.iter().find(|e| e.name == name)
    }

    pub fn side_of(&self, id: EntityId) -> Option<Side> {
        if self.party.iter().any(|e| e.id == id) {
            Some(Side::Party)
        } else if self.enemies.iter().any(|e| e.id == id) {
            Some(Side::Enemies)
        } else {
            None
        }
    }

    pub fn name_of(&self, id: EntityId) -> &str {
        self.get(id).map(|e| e.name.as_str()).unwrap_or("???")
    }

    pub fn all_defeated(&self, side: Side) -> bool {
        self.side(side).iter().all(|e| !e.is_alive())
    }

    pub fn living(&self, side: Side) -> impl Iterator<Item = &Entity> {
        self.side(side).iter().filter(|e| e.is_alive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Archetype, Stats};

    fn unit(id: u32, name: &str) -> Entity {
        Entity::new(
            EntityId(id),
            name,
            Archetype::Monster,
            Stats::new(10, 0, 5, 5, 5, 5, 5),
        )
    }

    #[test]
    fn rejects_duplicate_names() {
        let err = Roster::new(vec![unit(0, "A")], vec![unit(1, "A")]).unwrap_err();
        assert_eq!(err, RosterError::DuplicateName("A".into()));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = Roster::new(vec![unit(0, "A")], vec![unit(0, "B")]).unwrap_err();
        assert_eq!(err, RosterError::DuplicateId(EntityId(0)));
    }

    #[test]
    fn sides_resolve() {
        let roster = Roster::new(vec![unit(0, "A")], vec![unit(1, "B")]).unwrap();
        assert_eq!(roster.side_of(EntityId(0)), Some(Side::Party));
        assert_eq!(roster.side_of(EntityId(1)), Some(Side::Enemies));
        assert_eq!(roster.side_of(EntityId(9)), None);
        assert_eq!(roster.name_of(EntityId(1)), "B");
    }
}
