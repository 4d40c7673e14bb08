//! Memory and swap blocks

use crate::format::format_bytes;
use crate::shared;
use anyhow::Result;
use rg_status_core::Block;
use rg_status_types::block_configs::{MemoryConfig, SwapConfig};
use rg_status_types::{BlockSettings, Markup};
use std::time::Duration;

const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);

/// Available RAM
pub struct MemoryBlock {
    settings: BlockSettings,
    available: Option<u64>,
}

impl MemoryBlock {
    pub fn new(config: &MemoryConfig) -> Self {
        Self {
            settings: config
                .options
                .resolve(Some("MEM"), DEFAULT_INTERVAL, Markup::None),
            available: None,
        }
    }
}

impl Block for MemoryBlock {
    fn settings(&self) -> &BlockSettings {
        &self.settings
    }

    fn update(&mut self) -> Result<()> {
        self.available = Some(shared::memory().available_memory);
        Ok(())
    }

    fn value(&self) -> Option<String> {
        self.available.map(|bytes| format_bytes(bytes as f64))
    }
}

/// Free swap space
pub struct SwapBlock {
    settings: BlockSettings,
    free: Option<u64>,
}

impl SwapBlock {
    pub fn new(config: &SwapConfig) -> Self {
        Self {
            settings: config
                .options
                .resolve(Some("SWAP"), DEFAULT_INTERVAL, Markup::None),
            free: None,
        }
    }
}

impl Block for SwapBlock {
    fn settings(&self) -> &BlockSettings {
        &self.settings
    }

    fn update(&mut self) -> Result<()> {
        self.free = Some(shared::memory().free_swap);
        Ok(())
    }

    fn value(&self) -> Option<String> {
        self.free.map(|bytes| format_bytes(bytes as f64))
    }
}
