//! Battery block configuration.

use crate::settings::BlockOptions;
use serde::{Deserialize, Serialize};

fn default_battery_name() -> String {
    "BAT0".to_string()
}

fn default_power_supply_dir() -> String {
    "/sys/class/power_supply".to_string()
}

/// Battery read from the kernel power_supply class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatteryConfig {
    #[serde(flatten)]
    pub options: BlockOptions,
    /// Device name under the power_supply directory; also the default label
    #[serde(default = "default_battery_name")]
    pub name: String,
    #[serde(default = "default_power_supply_dir")]
    pub power_supply_dir: String,
}

impl Default for BatteryConfig {
    fn default() -> Self {
        Self {
            options: BlockOptions::default(),
            name: default_battery_name(),
            power_supply_dir: default_power_supply_dir(),
        }
    }
}
