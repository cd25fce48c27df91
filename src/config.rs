use std::env;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// User configuration, loaded from `~/.config/argand/config.toml`.
/// Every field is defaulted so a missing or partial file just works.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Fixed number of decimal places for the displays; `None` lets the
    /// formatter pick the shortest representation.
    #[serde(default)]
    pub precision: Option<usize>,

    /// Where Ctrl+S / Ctrl+O persist and restore the operation history.
    #[serde(default = "default_history_file")]
    pub history_file: PathBuf,
}

fn default_history_file() -> PathBuf {
    PathBuf::from("argand-history.txt")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            precision: None,
            history_file: default_history_file(),
        }
    }
}

impl Config {
    /// Load the config file, falling back to defaults when the file is
    /// missing. A file that exists but fails to parse is reported and
    /// ignored rather than aborting startup.
    pub fn load() -> Config {
        let Some(path) = Config::config_path() else {
            return Config::default();
        };

        let Ok(content) = fs::read_to_string(&path) else {
            return Config::default();
        };

        match toml::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring unparseable config");
                Config::default()
            }
        }
    }

    fn config_path() -> Option<PathBuf> {
        let home = env::var_os("HOME")?;
        Some(PathBuf::from(home).join(".config/argand/config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.precision, None);
        assert_eq!(config.history_file, PathBuf::from("argand-history.txt"));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: Config = toml::from_str("precision = 3").unwrap();
        assert_eq!(config.precision, Some(3));
        assert_eq!(config.history_file, PathBuf::from("argand-history.txt"));
    }

    #[test]
    fn test_full_file() {
        let config: Config =
            toml::from_str("precision = 2\nhistory_file = \"/tmp/h.txt\"").unwrap();
        assert_eq!(config.precision, Some(2));
        assert_eq!(config.history_file, PathBuf::from("/tmp/h.txt"));
    }
}
