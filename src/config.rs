use crate::error::{Result, SecurityError};
use crate::model::ArmingStatus;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Load environment variables from .env file with robust parsing.
/// Handles values with spaces without requiring quotes.
pub fn load_dotenv() {
    load_dotenv_from(Path::new(".env"));
}

fn load_dotenv_from(env_path: &Path) {
    let content = match fs::read_to_string(env_path) {
        Ok(c) => c,
        Err(_) => return,
    };

    for (key, value) in parse_dotenv(&content) {
        // Only set if not already set (env vars take precedence)
        if std::env::var(&key).is_err() {
            // SAFETY: called once at startup before any other thread is spawned
            unsafe { std::env::set_var(key, value) };
        }
    }
}

fn parse_dotenv(content: &str) -> Vec<(String, String)> {
    let mut pairs = Vec::new();

    for line in content.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(eq_pos) = line.find('=') {
            let key = line[..eq_pos].trim();
            let mut value = line[eq_pos + 1..].trim();

            if value.len() >= 2
                && ((value.starts_with('"') && value.ends_with('"'))
                    || (value.starts_with('\'') && value.ends_with('\'')))
            {
                value = &value[1..value.len() - 1];
            }

            pairs.push((key.to_string(), value.to_string()));
        }
    }

    pairs
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub storage: StorageConfig,
    pub simulation: SimulationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// JSON file holding sensors and alarm/arming status.
    pub data_file: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub interval_secs: u64,
    /// Arming mode applied on startup; `None` keeps the stored mode.
    pub initial_arming: Option<ArmingStatus>,
}

/// `<data dir>/catpoint/security.json`, falling back to the working directory.
pub fn default_data_file() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("catpoint")
        .join("security.json")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage: StorageConfig {
                data_file: default_data_file(),
            },
            simulation: SimulationConfig {
                interval_secs: 5,
                initial_arming: None,
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(path) = lookup("CATPOINT_DATA_FILE") {
            config.storage.data_file = PathBuf::from(path);
        }
        if let Some(interval) = lookup("CATPOINT_SIM_INTERVAL_SECS")
            && let Ok(secs) = interval.parse::<u64>()
        {
            if secs == 0 {
                return Err(SecurityError::InvalidValue(
                    "CATPOINT_SIM_INTERVAL_SECS must be at least 1".to_string(),
                ));
            }
            config.simulation.interval_secs = secs;
        }
        if let Some(arming) = lookup("CATPOINT_INITIAL_ARMING") {
            config.simulation.initial_arming = Some(ArmingStatus::from_str(arming.trim())?);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.simulation.interval_secs, 5);
        assert_eq!(config.simulation.initial_arming, None);
        assert!(config.storage.data_file.ends_with("catpoint/security.json"));
    }

    #[test]
    fn test_env_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("CATPOINT_DATA_FILE", "/var/lib/catpoint/state.json"),
            ("CATPOINT_SIM_INTERVAL_SECS", "2"),
            ("CATPOINT_INITIAL_ARMING", "armed_home"),
        ]))
        .unwrap();
        assert_eq!(
            config.storage.data_file,
            PathBuf::from("/var/lib/catpoint/state.json")
        );
        assert_eq!(config.simulation.interval_secs, 2);
        assert_eq!(
            config.simulation.initial_arming,
            Some(ArmingStatus::ArmedHome)
        );
    }

    #[test]
    fn test_unparsable_interval_keeps_default() {
        let config = Config::from_lookup(lookup(&[("CATPOINT_SIM_INTERVAL_SECS", "soon")])).unwrap();
        assert_eq!(config.simulation.interval_secs, 5);
    }

    #[test]
    fn test_zero_interval_is_rejected() {
        let result = Config::from_lookup(lookup(&[("CATPOINT_SIM_INTERVAL_SECS", "0")]));
        assert!(matches!(result, Err(SecurityError::InvalidValue(_))));
    }

    #[test]
    fn test_invalid_arming_is_rejected() {
        let result = Config::from_lookup(lookup(&[("CATPOINT_INITIAL_ARMING", "panic_mode")]));
        assert!(matches!(result, Err(SecurityError::InvalidValue(_))));
    }

    #[test]
    fn test_parse_dotenv() {
        let pairs = parse_dotenv(
            "# comment\n\nCATPOINT_DATA_FILE = /tmp/my state.json\nQUOTED=\"armed_away\"\nSINGLE='x'\nnot a pair\n",
        );
        assert_eq!(
            pairs,
            vec![
                ("CATPOINT_DATA_FILE".to_string(), "/tmp/my state.json".to_string()),
                ("QUOTED".to_string(), "armed_away".to_string()),
                ("SINGLE".to_string(), "x".to_string()),
            ]
        );
    }
}
