//! rg-status: a fast i3bar/swaybar status line for Linux
//!
//! This library provides:
//! - Configuration loading and the built-in default bar
//! - Construction of the configured blocks
//!
//! The engine itself lives in `rg-status-core`, the blocks in
//! `rg-status-blocks`.

pub mod config;

use anyhow::Result;
use rg_status_core::Bar;

// Re-export commonly used types
pub use config::BarConfig;
pub use rg_status_blocks::{build_block, build_blocks};
pub use rg_status_core::{Block, BlockId, BoxedBlock};

/// Build the bar described by a configuration
pub fn build_bar(config: &BarConfig) -> Result<Bar> {
    let blocks = build_blocks(&config.blocks)?;
    Ok(Bar::new(blocks)?)
}
