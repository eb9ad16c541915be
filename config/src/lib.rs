//! Configuration for the push-up ledger.
//!
//! The config file is optional. Every field has a default, so a missing file
//! and an empty file behave the same way. Lookup order for the file itself:
//! `GOL_CONFIG`, then `~/.gol/config.toml`.
//!
//! ```toml
//! [counter]
//! save_file = "${HOME}/gol/push_ups_save.json"
//! autosave = true
//!
//! [calendar]
//! special_days = ["fri", "sat", "sun"]
//! ```

use std::path::{Path, PathBuf};
use std::{env, fs};

use serde::Deserialize;
use thiserror::Error;

pub const CONFIG_ENV: &str = "GOL_CONFIG";
pub const SAVE_FILE_ENV: &str = "GOL_SAVE_FILE";
const SAVE_FILE_NAME: &str = "push_ups_save.json";

/// Weekday names used when `[calendar] special_days` is absent.
///
/// Friday through Sunday, matching the cutoff the counter has always used.
pub const DEFAULT_SPECIAL_DAYS: [&str; 3] = ["fri", "sat", "sun"];

// Default value function for serde (bool::default() is false, so only true needs a fn)
const fn default_true() -> bool {
    true
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl ConfigError {
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct GolConfig {
    pub counter: Option<CounterConfig>,
    pub calendar: Option<CalendarConfig>,
}

#[derive(Debug, Deserialize)]
pub struct CounterConfig {
    /// Where the ledger record lives. `${VAR}` references are expanded.
    pub save_file: Option<String>,
    /// Persist after every successful rule call. Default: true.
    #[serde(default = "default_true")]
    pub autosave: bool,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            save_file: None,
            autosave: true,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CalendarConfig {
    /// Weekday names (`"mon"`, `"Friday"`, ...) that count as special days.
    pub special_days: Option<Vec<String>>,
}

pub fn expand_env_vars(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) => {
                let var = &after[..end];
                if !var.is_empty() {
                    out.push_str(&env::var(var).unwrap_or_default());
                }
                rest = &after[end + 1..];
            }
            None => {
                // Unterminated reference: keep it verbatim.
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);

    out
}

impl GolConfig {
    /// Load the config file. A missing file is `Ok(None)`.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(None),
        }
    }

    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        match Self::from_toml_str(&content) {
            Ok(config) => Ok(Some(config)),
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }

    /// Resolved save file: `GOL_SAVE_FILE`, then `[counter] save_file`, then
    /// the platform data directory.
    #[must_use]
    pub fn save_file(&self) -> PathBuf {
        if let Ok(raw) = env::var(SAVE_FILE_ENV)
            && !raw.trim().is_empty()
        {
            return PathBuf::from(expand_env_vars(raw.trim()));
        }
        self.configured_save_file().unwrap_or_else(default_save_file)
    }

    fn configured_save_file(&self) -> Option<PathBuf> {
        let raw = self.counter.as_ref()?.save_file.as_deref()?;
        let expanded = expand_env_vars(raw.trim());
        if expanded.is_empty() {
            tracing::warn!("[counter] save_file is empty after expansion; using default");
            return None;
        }
        Some(PathBuf::from(expanded))
    }

    #[must_use]
    pub fn autosave(&self) -> bool {
        self.counter.as_ref().is_none_or(|counter| counter.autosave)
    }

    /// Special-day names as written in the config, or the defaults.
    #[must_use]
    pub fn special_days(&self) -> Vec<String> {
        self.calendar
            .as_ref()
            .and_then(|calendar| calendar.special_days.clone())
            .unwrap_or_else(|| DEFAULT_SPECIAL_DAYS.map(String::from).to_vec())
    }
}

#[must_use]
pub fn config_path() -> Option<PathBuf> {
    if let Ok(raw) = env::var(CONFIG_ENV)
        && !raw.trim().is_empty()
    {
        return Some(PathBuf::from(raw.trim()));
    }
    dirs::home_dir().map(|home| home.join(".gol").join("config.toml"))
}

/// `<data_dir>/gol/push_ups_save.json`, or `.gol/push_ups_save.json` when
/// the platform has no data directory.
#[must_use]
pub fn default_save_file() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("gol"))
        .unwrap_or_else(|| PathBuf::from(".gol"))
        .join(SAVE_FILE_NAME)
}
