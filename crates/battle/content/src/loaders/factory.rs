//! Content factory for building rosters and configuration from data files.

use std::path::{Path, PathBuf};

use battle_core::{BattleConfig, Entity, Roster};

use crate::loaders::{ConfigLoader, LoadResult, RosterLoader};

/// Content factory that loads all battle content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── party.ron
/// └── encounter.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load battle configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<BattleConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    /// Load the party from `party.ron`.
    pub fn load_party(&self, config: &BattleConfig) -> LoadResult<Vec<Entity>> {
        RosterLoader::load(&self.data_dir.join("party.ron"), config)
    }

    /// Load the enemies from `encounter.ron`.
    pub fn load_encounter(&self, config: &BattleConfig) -> LoadResult<Vec<Entity>> {
        RosterLoader::load(&self.data_dir.join("encounter.ron"), config)
    }

    /// Load party and encounter and validate them as one roster.
    ///
    /// Statuses declared without a duration last `config.default_status_turns`.
    pub fn load_roster(&self, config: &BattleConfig) -> LoadResult<Roster> {
        let roster = Roster::new(self.load_party(config)?, self.load_encounter(config)?)?;
        Ok(roster)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
