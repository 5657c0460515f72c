use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::engine::suggest::DEFAULT_SUGGESTION_COUNT;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// How many ranked swap suggestions to surface.
    #[serde(default = "default_suggestion_count")]
    pub suggestion_count: usize,
    /// Optional word-list overrides; the bundled lists are used when unset.
    /// A path that fails to load disables that length only.
    #[serde(default)]
    pub words_two: Option<String>,
    #[serde(default)]
    pub words_three: Option<String>,
    #[serde(default)]
    pub words_four: Option<String>,
}

fn default_suggestion_count() -> usize {
    DEFAULT_SUGGESTION_COUNT
}

impl Default for Config {
    fn default() -> Self {
        Self {
            suggestion_count: default_suggestion_count(),
            words_two: None,
            words_three: None,
            words_four: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("quipsolve")
            .join("config.toml")
    }

    /// Word-list override for a length, if configured.
    pub fn word_list_override(&self, length: usize) -> Option<&str> {
        match length {
            2 => self.words_two.as_deref(),
            3 => self.words_three.as_deref(),
            4 => self.words_four.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_from_empty_file() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.suggestion_count, 5);
        assert!(config.words_two.is_none());
        assert!(config.words_three.is_none());
        assert!(config.words_four.is_none());
    }

    #[test]
    fn partial_file_keeps_defaults_for_the_rest() {
        let config: Config = toml::from_str(
            r#"
suggestion_count = 8
words_three = "/data/three.txt"
"#,
        )
        .unwrap();
        assert_eq!(config.suggestion_count, 8);
        assert_eq!(config.word_list_override(3), Some("/data/three.txt"));
        assert_eq!(config.word_list_override(2), None);
    }

    #[test]
    fn serde_roundtrip() {
        let mut config = Config::default();
        config.words_four = Some("four.txt".to_string());
        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(deserialized.suggestion_count, config.suggestion_count);
        assert_eq!(deserialized.words_four, config.words_four);
    }
}
