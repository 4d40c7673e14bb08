//! Configuration for network blocks.

use crate::settings::BlockOptions;
use serde::{Deserialize, Serialize};

/// Name and IPv4 address of the first active interface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct NetworkConfig {
    #[serde(flatten)]
    pub options: BlockOptions,
    /// Interfaces never reported (loopback and sit0 are always skipped)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ignore: Vec<String>,
}

/// Upload and download rate summed over active interfaces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct NetIoConfig {
    #[serde(flatten)]
    pub options: BlockOptions,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ignore: Vec<String>,
}
