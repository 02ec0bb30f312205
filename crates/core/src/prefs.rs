//! Persisted preferences: the color theme and the last-used-tool marker.
//!
//! A single TOML file in the user's config directory, no schema versioning
//! and no migrations. Loading is best-effort: a missing or unreadable file
//! falls back to defaults.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

pub const PREFS_FILE: &str = "preferences.toml";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    Auto,
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
            Theme::Auto => write!(f, "auto"),
        }
    }
}

impl FromStr for Theme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            "auto" => Ok(Theme::Auto),
            _ => Err(Error::Validation(format!(
                "theme must be light, dark, or auto, not {s:?}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub theme: Theme,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_tool: Option<String>,
}

pub fn encode(prefs: &Preferences) -> Result<String, Error> {
    toml::to_string_pretty(prefs).map_err(|e| Error::Conversion(e.to_string()))
}

pub fn decode(text: &str) -> Result<Preferences, Error> {
    toml::from_str(text).map_err(|e| Error::invalid("TOML", e.to_string()))
}

/// Best-effort load from `dir`; any failure falls back to defaults.
pub fn load(dir: &Path) -> Preferences {
    match fs::read_to_string(dir.join(PREFS_FILE)) {
        Ok(text) => decode(&text).unwrap_or_default(),
        Err(_) => Preferences::default(),
    }
}

/// Overwrite the whole preferences file.
pub fn store(dir: &Path, prefs: &Preferences) -> Result<(), Error> {
    fs::create_dir_all(dir).map_err(|e| Error::Conversion(e.to_string()))?;
    fs::write(dir.join(PREFS_FILE), encode(prefs)?)
        .map_err(|e| Error::Conversion(e.to_string()))
}
