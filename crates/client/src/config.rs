//! Client configuration read from the process environment.
use std::env;
use std::path::PathBuf;

/// Settings that select content, input mode and logging for one session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClientConfig {
    /// Directory holding `party.ron`, `encounter.ron` and `config.toml`.
    /// The built-in demo roster is used when unset.
    pub data_dir: Option<PathBuf>,
    /// Let the autopilot play the party instead of prompting on stdin.
    pub autoplay: bool,
    /// Overrides the presentation delay from the battle config.
    pub delay_ms: Option<u64>,
    pub session_id: Option<String>,
    /// Write a JSON-lines journal next to the session log.
    pub journal: bool,
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `BATTLE_DATA_DIR` - Content directory (default: built-in demo roster)
    /// - `BATTLE_AUTOPLAY` - Autopilot plays the party (default: false)
    /// - `BATTLE_DELAY_MS` - Presentation delay in milliseconds (default: from config)
    /// - `BATTLE_SESSION_ID` - Session identifier for log files (default: timestamp)
    /// - `BATTLE_JOURNAL` - Journal battle events to the session directory (default: false)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            data_dir: lookup("BATTLE_DATA_DIR")
                .filter(|dir| !dir.is_empty())
                .map(PathBuf::from),
            autoplay: flag(lookup("BATTLE_AUTOPLAY")),
            delay_ms: lookup("BATTLE_DELAY_MS").and_then(|v| v.trim().parse().ok()),
            session_id: lookup("BATTLE_SESSION_ID").filter(|id| !id.is_empty()),
            journal: flag(lookup("BATTLE_JOURNAL")),
        }
    }
}

/// Accepts `true`/`false` and `1`/`0`; a variable set without a value counts as true.
fn flag(value: Option<String>) -> bool {
    match value {
        Some(value) => match value.trim() {
            "" => true,
            v => v.parse::<bool>().unwrap_or(v == "1"),
        },
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> ClientConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ClientConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        assert_eq!(config(&[]), ClientConfig::default());
    }

    #[test]
    fn reads_every_variable() {
        let config = config(&[
            ("BATTLE_DATA_DIR", "./data"),
            ("BATTLE_AUTOPLAY", "1"),
            ("BATTLE_DELAY_MS", "250"),
            ("BATTLE_SESSION_ID", "demo"),
            ("BATTLE_JOURNAL", "true"),
        ]);

        assert_eq!(config.data_dir, Some(PathBuf::from("./data")));
        assert!(config.autoplay);
        assert_eq!(config.delay_ms, Some(250));
        assert_eq!(config.session_id.as_deref(), Some("demo"));
        assert!(config.journal);
    }

    #[test]
    fn malformed_values_fall_back() {
        let config = config(&[("BATTLE_AUTOPLAY", "nope"), ("BATTLE_DELAY_MS", "soon")]);
        assert!(!config.autoplay);
        assert_eq!(config.delay_ms, None);
    }
}
