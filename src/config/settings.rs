//! Bar configuration file

use anyhow::{anyhow, bail, Context, Result};
use log::info;
use rg_status_types::BlockConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::defaults::default_blocks;

/// Current config format version
pub const CONFIG_VERSION: u32 = 1;

fn default_version() -> u32 {
    CONFIG_VERSION
}

/// The blocks of the bar, in display order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarConfig {
    /// Version of the config format
    #[serde(default = "default_version")]
    pub version: u32,
    pub blocks: Vec<BlockConfig>,
}

impl BarConfig {
    /// Load the configuration from the platform config directory, falling
    /// back to the built-in bar when there is no file
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            info!(
                "No config at {}, using the built-in bar",
                config_path.display()
            );
            return Ok(Self::default());
        }

        Self::load_from_path(&config_path)
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("com", "github.hilgardt_collab", "rg-status")
            .ok_or_else(|| anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("config.json"))
    }

    /// Load and validate configuration from a specific file path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid config {}", path.display()))?;

        info!(
            "Loaded {} blocks from {}",
            config.blocks.len(),
            path.display()
        );
        Ok(config)
    }

    /// Reject configurations the bar cannot run
    pub fn validate(&self) -> Result<()> {
        if self.version > CONFIG_VERSION {
            bail!(
                "config version {} is newer than supported version {}",
                self.version,
                CONFIG_VERSION
            );
        }
        if self.blocks.is_empty() {
            bail!("no blocks configured");
        }

        for (index, block) in self.blocks.iter().enumerate() {
            if let Some(interval) = block.options().interval {
                if !(interval.is_finite() && interval > 0.0) {
                    bail!(
                        "block #{} ({}) has invalid interval {}",
                        index + 1,
                        block.block_type(),
                        interval
                    );
                }
            }
        }
        Ok(())
    }

    /// Pretty JSON, as written by `--print-config`
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Default for BarConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            blocks: default_blocks(),
        }
    }
}
