use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{HudError, Result};

const DEFAULT_TRACE_FILTER: &str = "info";

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct HudConfig {
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl HudConfig {
    pub fn from_path(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path).map_err(|source| HudError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&data).map_err(|source| HudError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml_str(data: &str) -> Result<Self> {
        toml::from_str(data).map_err(|source| HudError::Config {
            path: PathBuf::from("<inline>"),
            source,
        })
    }

    /// Applies `HUD_FEED_PATH` and `HUD_TRACE_FILTER` from the process
    /// environment.
    pub fn with_env_overrides(mut self) -> Self {
        self.apply_overrides(|key| std::env::var(key).ok());
        self
    }

    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup("HUD_FEED_PATH").filter(|val| !val.is_empty()) {
            self.feed.path = Some(PathBuf::from(path));
        }
        if let Some(filter) = lookup("HUD_TRACE_FILTER").filter(|val| !val.is_empty()) {
            self.telemetry.trace_filter = Some(filter);
        }
    }

    pub fn trace_filter(&self) -> &str {
        self.telemetry
            .trace_filter
            .as_deref()
            .unwrap_or(DEFAULT_TRACE_FILTER)
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct FeedConfig {
    /// JSON-lines file replayed when no input is given on the command line.
    #[serde(default)]
    pub path: Option<PathBuf>,
    #[serde(default)]
    pub skip_invalid: bool,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct TelemetryConfig {
    #[serde(default)]
    pub trace_filter: Option<String>,
}
