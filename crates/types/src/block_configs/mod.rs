//! Configuration types for all block kinds.

pub mod battery;
pub mod datetime;
pub mod network;
pub mod script;
pub mod system;

pub use battery::BatteryConfig;
pub use datetime::DateTimeConfig;
pub use network::{NetIoConfig, NetworkConfig};
pub use script::{ScriptConfig, StaticTextConfig};
pub use system::{CpuConfig, DiskConfig, MemoryConfig, SwapConfig, TemperatureConfig};

use crate::settings::BlockOptions;
use serde::{Deserialize, Serialize};

/// Type-safe enum for all block configurations.
/// Uses serde tag for JSON serialization: {"type": "cpu", ...}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BlockConfig {
    #[serde(rename = "cpu")]
    Cpu(CpuConfig),

    #[serde(rename = "memory")]
    Memory(MemoryConfig),

    #[serde(rename = "swap")]
    Swap(SwapConfig),

    #[serde(rename = "disk")]
    Disk(DiskConfig),

    #[serde(rename = "network")]
    Network(NetworkConfig),

    #[serde(rename = "net_io")]
    NetIo(NetIoConfig),

    #[serde(rename = "battery")]
    Battery(BatteryConfig),

    #[serde(rename = "datetime")]
    DateTime(DateTimeConfig),

    #[serde(rename = "temperature")]
    Temperature(TemperatureConfig),

    #[serde(rename = "script")]
    Script(ScriptConfig),

    #[serde(rename = "static")]
    StaticText(StaticTextConfig),
}

impl BlockConfig {
    /// Get the block type ID string
    pub fn block_type(&self) -> &'static str {
        match self {
            BlockConfig::Cpu(_) => "cpu",
            BlockConfig::Memory(_) => "memory",
            BlockConfig::Swap(_) => "swap",
            BlockConfig::Disk(_) => "disk",
            BlockConfig::Network(_) => "network",
            BlockConfig::NetIo(_) => "net_io",
            BlockConfig::Battery(_) => "battery",
            BlockConfig::DateTime(_) => "datetime",
            BlockConfig::Temperature(_) => "temperature",
            BlockConfig::Script(_) => "script",
            BlockConfig::StaticText(_) => "static",
        }
    }

    /// Options shared by every block type
    pub fn options(&self) -> &BlockOptions {
        match self {
            BlockConfig::Cpu(cfg) => &cfg.options,
            BlockConfig::Memory(cfg) => &cfg.options,
            BlockConfig::Swap(cfg) => &cfg.options,
            BlockConfig::Disk(cfg) => &cfg.options,
            BlockConfig::Network(cfg) => &cfg.options,
            BlockConfig::NetIo(cfg) => &cfg.options,
            BlockConfig::Battery(cfg) => &cfg.options,
            BlockConfig::DateTime(cfg) => &cfg.options,
            BlockConfig::Temperature(cfg) => &cfg.options,
            BlockConfig::Script(cfg) => &cfg.options,
            BlockConfig::StaticText(cfg) => &cfg.options,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_config_serialization() {
        let config = BlockConfig::Cpu(CpuConfig::default());
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"type\":\"cpu\""));

        let deserialized: BlockConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.block_type(), "cpu");
    }

    #[test]
    fn test_flattened_options() {
        let config: BlockConfig =
            serde_json::from_str(r#"{"type": "disk", "path": "/home", "label": "HOME", "interval": 10}"#)
                .unwrap();

        let BlockConfig::Disk(disk) = &config else {
            panic!("expected a disk block, got {:?}", config);
        };
        assert_eq!(disk.path, "/home");
        assert_eq!(config.options().label.as_deref(), Some("HOME"));
        assert_eq!(config.options().interval, Some(10.0));
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        assert!(serde_json::from_str::<BlockConfig>(r#"{"type": "volume"}"#).is_err());
    }
}
