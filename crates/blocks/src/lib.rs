//! rg-status-blocks: Block implementations for the rg-status bar.

mod battery;
mod cpu;
mod datetime;
mod disk;
pub mod format;
pub mod markup;
mod memory;
mod network;
mod script;
mod shared;
mod temperature;

pub use battery::BatteryBlock;
pub use cpu::CpuBlock;
pub use datetime::DateTimeBlock;
pub use disk::DiskBlock;
pub use memory::{MemoryBlock, SwapBlock};
pub use network::{NetIoBlock, NetworkBlock};
pub use script::{ScriptBlock, StaticTextBlock};
pub use temperature::TemperatureBlock;

use anyhow::{Context, Result};
use rg_status_core::BoxedBlock;
use rg_status_types::BlockConfig;

/// Initialize shared sensor caches (call once at startup)
pub fn initialize_sensors() {
    shared::initialize();
}

/// Construct the block described by a config entry
pub fn build_block(config: &BlockConfig) -> Result<BoxedBlock> {
    let block: BoxedBlock = match config {
        BlockConfig::Cpu(cfg) => Box::new(CpuBlock::new(cfg)),
        BlockConfig::Memory(cfg) => Box::new(MemoryBlock::new(cfg)),
        BlockConfig::Swap(cfg) => Box::new(SwapBlock::new(cfg)),
        BlockConfig::Disk(cfg) => Box::new(DiskBlock::new(cfg)),
        BlockConfig::Network(cfg) => Box::new(NetworkBlock::new(cfg)),
        BlockConfig::NetIo(cfg) => Box::new(NetIoBlock::new(cfg)),
        BlockConfig::Battery(cfg) => Box::new(BatteryBlock::new(cfg)),
        BlockConfig::DateTime(cfg) => Box::new(DateTimeBlock::new(cfg)?),
        BlockConfig::Temperature(cfg) => Box::new(TemperatureBlock::new(cfg)),
        BlockConfig::Script(cfg) => Box::new(ScriptBlock::new(cfg)?),
        BlockConfig::StaticText(cfg) => Box::new(StaticTextBlock::new(cfg)),
    };
    Ok(block)
}

/// Construct every configured block, in order
pub fn build_blocks(configs: &[BlockConfig]) -> Result<Vec<BoxedBlock>> {
    let needs_sensors = configs
        .iter()
        .any(|config| matches!(config, BlockConfig::Temperature(_)));
    if needs_sensors {
        initialize_sensors();
    }

    configs
        .iter()
        .enumerate()
        .map(|(index, config)| {
            build_block(config)
                .with_context(|| format!("block #{} ({})", index + 1, config.block_type()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rg_status_core::Block;
    use rg_status_types::block_configs::{ScriptConfig, StaticTextConfig};

    #[test]
    fn test_build_keeps_order_and_settings() {
        let configs: Vec<BlockConfig> = serde_json::from_str(
            r#"[
                {"type": "static", "text": "a", "label": "A"},
                {"type": "memory", "interval": 10},
                {"type": "datetime", "format": "%H:%M"}
            ]"#,
        )
        .unwrap();

        let blocks = build_blocks(&configs).unwrap();
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0].settings().label.as_deref(), Some("A"));
        assert_eq!(blocks[1].settings().interval.as_secs(), 10);
        assert_eq!(blocks[2].settings().label, None);
    }

    #[test]
    fn test_build_errors_name_the_block() {
        let configs = vec![
            BlockConfig::StaticText(StaticTextConfig::default()),
            BlockConfig::Script(ScriptConfig::default()),
        ];
        let err = match build_blocks(&configs) {
            Ok(_) => panic!("empty script command should be rejected"),
            Err(err) => err,
        };
        assert!(err.to_string().contains("block #2 (script)"), "{}", err);
    }
}
