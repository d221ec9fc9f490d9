//! Battle configuration loader.

use std::path::Path;

use battle_core::BattleConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for battle configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys fall back to [`BattleConfig::default`].
    pub fn load(path: &Path) -> LoadResult<BattleConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<BattleConfig> {
        let config: BattleConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.log_capacity == 0 {
            anyhow::bail!("log_capacity must be at least 1");
        }
        if config.scan_guard_factor == 0 {
            anyhow::bail!("scan_guard_factor must be at least 1");
        }
        for (key, percent) in [
            ("paralysis_act_chance", config.paralysis_act_chance),
            ("stubborn_chance", config.stubborn_chance),
            ("prayer_chance", config.prayer_chance),
            ("tick_percent", config.tick_percent),
        ] {
            if percent > 100 {
                anyhow::bail!("{key} is a percentage, got {percent}");
            }
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config =
            ConfigLoader::parse("presentation_delay_ms = 0\nprayer_chance = 30\n").unwrap();
        assert_eq!(config.presentation_delay_ms, 0);
        assert_eq!(config.prayer_chance, 30);
        assert_eq!(config.log_capacity, BattleConfig::DEFAULT_LOG_CAPACITY);
    }

    #[test]
    fn rejects_out_of_range_percentages() {
        let err = ConfigLoader::parse("stubborn_chance = 150").unwrap_err();
        assert!(err.to_string().contains("stubborn_chance"));
    }

    #[test]
    fn load_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "log_capacity = 4").unwrap();

        assert_eq!(ConfigLoader::load(&path).unwrap().log_capacity, 4);
        assert!(ConfigLoader::load(&dir.path().join("missing.toml")).is_err());
    }
}
