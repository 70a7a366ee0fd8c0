//! Configuration to acknowledge developer preferences as well as set defaults.
//!
//! Specifically, we try to find a notebridge.toml, and if present we load settings from there.
//! This provides the edit debounce delay, the tree depth bound, and the board URL used in
//! back-links on created issues.

use facet::Facet;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// File looked for in the working directory.
pub const CONFIG_FILE: &str = "notebridge.toml";

const DEFAULT_DEBOUNCE_MS: u64 = 300;
const DEFAULT_MAX_DEPTH: usize = crate::extract::DEFAULT_MAX_DEPTH;
const DEFAULT_BOARD_BASE_URL: &str = "https://www.figma.com";

#[derive(Facet, Clone, Debug, PartialEq)]
/// User preferences loaded from notebridge.toml or falling back to defaults.
pub struct Config {
    #[facet(default = DEFAULT_DEBOUNCE_MS)]
    /// Quiet period in milliseconds before a draft edit is reported.
    pub debounce_ms: u64,
    #[facet(default = DEFAULT_MAX_DEPTH)]
    /// Deepest nesting accepted below the board root.
    pub max_depth: usize,
    #[facet(default = DEFAULT_BOARD_BASE_URL.to_string())]
    /// Origin of the whiteboard app, used to link issues back to their note.
    pub board_base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            max_depth: DEFAULT_MAX_DEPTH,
            board_base_url: DEFAULT_BOARD_BASE_URL.to_string(),
        }
    }
}

impl Config {
    #[must_use]
    /// Load configuration from notebridge.toml if present.
    pub fn load() -> Self {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    #[must_use]
    /// Load configuration from `path`, using defaults if it is missing or invalid.
    pub fn load_from(path: &Path) -> Self {
        if let Ok(contents) = fs::read_to_string(path) {
            if let Ok(config) = facet_toml::from_str::<Self>(&contents) {
                return config;
            }
            log::warn!("ignoring invalid config file {}", path.display());
        }
        Self::default()
    }

    #[must_use]
    /// The debounce delay as a duration.
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

#[cfg(test)]
#[path = "tests/config.rs"]
mod tests;
