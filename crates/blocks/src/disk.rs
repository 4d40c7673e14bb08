//! Free disk space block

use crate::format::format_bytes;
use anyhow::{anyhow, Result};
use rg_status_core::Block;
use rg_status_types::block_configs::DiskConfig;
use rg_status_types::{BlockSettings, Markup};
use std::path::Path;
use std::time::Duration;
use sysinfo::Disks;

const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);

/// Free space on one mounted filesystem, labelled with its mount point unless
/// configured otherwise
pub struct DiskBlock {
    settings: BlockSettings,
    path: String,
    disks: Disks,
    free: Option<u64>,
}

impl DiskBlock {
    pub fn new(config: &DiskConfig) -> Self {
        Self {
            settings: config
                .options
                .resolve(Some(&config.path), DEFAULT_INTERVAL, Markup::None),
            path: config.path.clone(),
            disks: Disks::new_with_refreshed_list(),
            free: None,
        }
    }

    fn available_space(&self) -> Option<u64> {
        let path = Path::new(&self.path);
        self.disks
            .iter()
            .find(|disk| disk.mount_point() == path)
            .map(|disk| disk.available_space())
    }
}

impl Block for DiskBlock {
    fn settings(&self) -> &BlockSettings {
        &self.settings
    }

    fn update(&mut self) -> Result<()> {
        self.disks.refresh();

        let free = match self.available_space() {
            Some(free) => free,
            None => {
                // The filesystem may have been mounted after startup
                self.disks.refresh_list();
                self.available_space()
                    .ok_or_else(|| anyhow!("nothing is mounted at {}", self.path))?
            }
        };

        self.free = Some(free);
        Ok(())
    }

    fn value(&self) -> Option<String> {
        self.free.map(|bytes| format_bytes(bytes as f64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_defaults_to_mount_point() {
        let config = DiskConfig {
            path: "/home".to_string(),
            ..Default::default()
        };
        let block = DiskBlock::new(&config);
        assert_eq!(block.settings().label.as_deref(), Some("/home"));
        assert_eq!(block.settings().interval, Duration::from_secs(5));
    }

    #[test]
    fn test_unknown_mount_point_is_an_error() {
        let config = DiskConfig {
            path: "/definitely/not/mounted".to_string(),
            ..Default::default()
        };
        let mut block = DiskBlock::new(&config);
        let err = block.update().unwrap_err();
        assert!(err.to_string().contains("/definitely/not/mounted"));
        assert!(block.value().is_none());
    }
}
