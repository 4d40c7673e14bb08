//! Configuration for blocks backed by sysinfo readings.

use crate::settings::BlockOptions;
use serde::{Deserialize, Serialize};

/// Average CPU usage across all cores
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CpuConfig {
    #[serde(flatten)]
    pub options: BlockOptions,
}

/// Available RAM
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MemoryConfig {
    #[serde(flatten)]
    pub options: BlockOptions,
}

/// Free swap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SwapConfig {
    #[serde(flatten)]
    pub options: BlockOptions,
}

fn default_disk_path() -> String {
    "/".to_string()
}

/// Free space on the filesystem mounted at `path`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiskConfig {
    #[serde(flatten)]
    pub options: BlockOptions,
    #[serde(default = "default_disk_path")]
    pub path: String,
}

impl Default for DiskConfig {
    fn default() -> Self {
        Self {
            options: BlockOptions::default(),
            path: default_disk_path(),
        }
    }
}

/// A single hardware temperature sensor, matched by its sysinfo label
/// (e.g. `"coretemp Package id 0"`, `"k10temp Tctl"`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TemperatureConfig {
    #[serde(flatten)]
    pub options: BlockOptions,
    pub sensor: String,
    /// Readings at or above this (°C) are shown red and urgent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub critical: Option<f64>,
}
