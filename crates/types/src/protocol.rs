//! i3bar/swaybar wire protocol records.
//!
//! See the `i3bar-protocol` man page. Only the subset of fields rg-status
//! emits is modelled here.

use crate::color::Color;
use serde::{Deserialize, Serialize};

/// Protocol version announced in the header
pub const PROTOCOL_VERSION: u32 = 1;

/// First line written to the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub version: u32,
    pub click_events: bool,
}

impl Default for Header {
    fn default() -> Self {
        Self {
            version: PROTOCOL_VERSION,
            click_events: true,
        }
    }
}

/// How the host should interpret `full_text`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Markup {
    Pango,
    #[default]
    None,
}

/// Text alignment inside a block that is wider than its text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// One block's entry in a frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderRecord {
    /// Block identity, echoed back by the host in click events
    pub instance: String,
    /// `None` serializes as `null`; the host then draws nothing for the block
    pub full_text: Option<String>,
    pub color: Color,
    pub urgent: bool,
    pub markup: Markup,
    pub separator: bool,
    pub align: Align,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_width: Option<String>,
}

/// Compose the text shown for a block: `" {value} "` or `" {label} {value} "`.
///
/// An empty value yields `None` so the block renders as `null`.
pub fn compose_text(label: Option<&str>, value: &str) -> Option<String> {
    if value.is_empty() {
        return None;
    }
    match label {
        Some(label) if !label.is_empty() => Some(format!(" {} {} ", label, value)),
        _ => Some(format!(" {} ", value)),
    }
}
