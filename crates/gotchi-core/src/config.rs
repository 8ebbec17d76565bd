//! Configuration management for gotchi

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// gotchi configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Name given to the pet
    #[serde(default = "default_pet_name")]
    pub pet_name: String,

    /// IANA timezone used to bucket commits (host local zone when absent)
    #[serde(default)]
    pub timezone: Option<String>,

    /// Length of the reporting window in days
    #[serde(default = "default_window_days")]
    pub window_days: u32,

    /// Width of the bar charts in characters
    #[serde(default = "default_bar_width")]
    pub bar_width: usize,

    /// SVG embedded at the top of the README
    #[serde(default)]
    pub avatar: Option<PathBuf>,
}

fn default_pet_name() -> String {
    "Gotchi".to_string()
}

fn default_window_days() -> u32 {
    7
}

fn default_bar_width() -> usize {
    21
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pet_name: default_pet_name(),
            timezone: None,
            window_days: default_window_days(),
            bar_width: default_bar_width(),
            avatar: None,
        }
    }
}

impl Config {
    /// Load config from file, falling back to defaults when it doesn't exist
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config: {}", path.display()))?;
            let config: Self = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config: {}", path.display()))?;
            config
                .validate()
                .with_context(|| format!("Invalid config: {}", path.display()))?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Reject settings no report can be drawn with
    pub fn validate(&self) -> Result<()> {
        if self.bar_width == 0 {
            bail!("bar_width must be at least 1");
        }
        if self.window_days == 0 {
            bail!("window_days must be at least 1");
        }
        Ok(())
    }

    /// Save config to file
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }
}
