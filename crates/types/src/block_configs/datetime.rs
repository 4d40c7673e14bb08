//! Date/time block configuration.

use crate::settings::BlockOptions;
use serde::{Deserialize, Serialize};

pub const DEFAULT_DATETIME_FORMAT: &str = "%a %d-%m-%Y %H:%M:%S";

fn default_format() -> String {
    DEFAULT_DATETIME_FORMAT.to_string()
}

/// Wall clock formatted with strftime syntax
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateTimeConfig {
    #[serde(flatten)]
    pub options: BlockOptions,
    #[serde(default = "default_format")]
    pub format: String,
    /// Format shown after a left click, until the next left click
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_format: Option<String>,
    /// IANA timezone name (e.g. "Europe/Amsterdam"); local time when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

impl Default for DateTimeConfig {
    fn default() -> Self {
        Self {
            options: BlockOptions::default(),
            format: default_format(),
            alt_format: None,
            timezone: None,
        }
    }
}
