//! Chooses where the roster and battle tuning come from.

use anyhow::Result;
use battle_core::{BattleConfig, Roster};

use crate::config::ClientConfig;

/// Loads `BATTLE_DATA_DIR` content when configured, otherwise the demo battle.
/// The configured presentation delay overrides the loaded one.
pub fn load(config: &ClientConfig) -> Result<(Roster, BattleConfig)> {
    let (roster, mut battle) = match &config.data_dir {
        Some(dir) => from_dir(dir)?,
        None => (battle_content::demo_roster()?, BattleConfig::default()),
    };

    if let Some(delay_ms) = config.delay_ms {
        battle = battle.with_presentation_delay_ms(delay_ms);
    }
    Ok((roster, battle))
}

#[cfg(feature = "content-files")]
fn from_dir(dir: &std::path::Path) -> Result<(Roster, BattleConfig)> {
    let factory = battle_content::ContentFactory::new(dir);
    tracing::info!("Loading content from {}", factory.data_dir().display());
    let battle = factory.load_config()?;
    Ok((factory.load_roster(&battle)?, battle))
}

#[cfg(not(feature = "content-files"))]
fn from_dir(dir: &std::path::Path) -> Result<(Roster, BattleConfig)> {
    anyhow::bail!(
        "cannot load {}: built without the content-files feature",
        dir.display()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_battle_by_default() {
        let config = ClientConfig {
            delay_ms: Some(0),
            ..ClientConfig::default()
        };
        let (roster, battle) = load(&config).unwrap();

        assert_eq!(roster.party().len(), 4);
        assert_eq!(roster.enemies().len(), 1);
        assert_eq!(battle.presentation_delay_ms, 0);
    }

    #[cfg(feature = "content-files")]
    #[test]
    fn missing_data_dir_is_reported() {
        let config = ClientConfig {
            data_dir: Some("/nonexistent/battle-data".into()),
            ..ClientConfig::default()
        };
        assert!(load(&config).is_err());
    }
}
