//! Shell configuration.
//!
//! Loaded from an optional JSON file. Every field has a default, so an empty
//! object (or no file at all) yields the stock behaviour.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level configuration for the shell.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    pub theme: ThemeConfig,
    pub navigation: NavigationConfig,
}

/// Settings for [`ThemePreferenceEngine`](crate::ThemePreferenceEngine).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Storage key the selected mode is persisted under.
    pub storage_key: String,
    /// How long the transition marker stays on after a swap.
    pub transition_ms: u64,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            storage_key: "theme".to_string(),
            transition_ms: 200,
        }
    }
}

impl ThemeConfig {
    pub fn transition_delay(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }
}

/// Settings for [`NavigationCoordinator`](crate::NavigationCoordinator).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Location displayed at startup.
    pub initial_path: String,
    /// Delay between the location settling and the progress indicator clearing.
    pub settle_ms: u64,
    /// Force-clear an in-flight navigation after this long. Disabled when absent.
    pub timeout_ms: Option<u64>,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            initial_path: "/dashboard".to_string(),
            settle_ms: 200,
            timeout_ms: None,
        }
    }
}

impl NavigationConfig {
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

impl ShellConfig {
    /// Parses a configuration from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("Failed to parse shell configuration")
    }

    /// Loads a configuration file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("Invalid config file {}", path.display()))
    }
}
