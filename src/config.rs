// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: (C) 2025 Cranky Kernel <crankykernel@proton.me>

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::api::DEFAULT_BASE_URL;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Start with the log pane visible.
    pub show_logs: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: DEFAULT_BASE_URL.to_string(),
            },
            ui: UiConfig { show_logs: true },
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Config =
            toml::from_str(&content).with_context(|| "Failed to parse TOML configuration")?;

        Ok(config)
    }

    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Config {
        Self::load(&path).unwrap_or_else(|_| {
            eprintln!("Warning: Could not load config file, using defaults");
            Self::default()
        })
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content =
            toml::to_string_pretty(self).with_context(|| "Failed to serialize config to TOML")?;

        fs::write(&path, content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_the_public_api() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "https://api.tvmaze.com");
        assert!(config.ui.show_logs);
    }

    #[test]
    fn parses_a_full_config_file() {
        let config: Config = toml::from_str(
            "[api]\nbase_url = \"http://localhost:8080\"\n\n[ui]\nshow_logs = false\n",
        )
        .unwrap();

        assert_eq!(config.api.base_url, "http://localhost:8080");
        assert!(!config.ui.show_logs);
    }
}
