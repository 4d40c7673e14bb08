//! Built-in bar used when no configuration file exists

use rg_status_types::block_configs::{
    CpuConfig, DateTimeConfig, DiskConfig, MemoryConfig, NetIoConfig, NetworkConfig,
};
use rg_status_types::BlockConfig;

/// Network, throughput, CPU, memory, root filesystem and clock
pub fn default_blocks() -> Vec<BlockConfig> {
    vec![
        BlockConfig::Network(NetworkConfig::default()),
        BlockConfig::NetIo(NetIoConfig::default()),
        BlockConfig::Cpu(CpuConfig::default()),
        BlockConfig::Memory(MemoryConfig::default()),
        BlockConfig::Disk(DiskConfig::default()),
        BlockConfig::DateTime(DateTimeConfig::default()),
    ]
}
