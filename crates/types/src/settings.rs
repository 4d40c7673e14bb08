//! Presentation and scheduling settings shared by every block.

use crate::protocol::{Align, Markup};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// User-facing options accepted by every block type.
///
/// Each field is optional so that a block type can supply its own defaults
/// (memory refreshes every 5 s, the clock every second, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct BlockOptions {
    /// Text shown before the value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Refresh interval in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub separator: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<Align>,
}

impl BlockOptions {
    /// Resolve against the defaults of a block type.
    ///
    /// Intervals that cannot be represented (negative, NaN, infinite) resolve
    /// to zero, which the bar rejects at startup.
    pub fn resolve(
        &self,
        default_label: Option<&str>,
        default_interval: Duration,
        markup: Markup,
    ) -> BlockSettings {
        let interval = match self.interval {
            Some(secs) => Duration::try_from_secs_f64(secs).unwrap_or(Duration::ZERO),
            None => default_interval,
        };

        BlockSettings {
            label: self
                .label
                .clone()
                .or_else(|| default_label.map(str::to_string)),
            interval,
            markup,
            separator: self.separator.unwrap_or(true),
            align: self.align.unwrap_or_default(),
        }
    }
}

/// Resolved settings of a constructed block
#[derive(Debug, Clone, PartialEq)]
pub struct BlockSettings {
    pub label: Option<String>,
    pub interval: Duration,
    pub markup: Markup,
    pub separator: bool,
    pub align: Align,
}

impl BlockSettings {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            ..Self::default()
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_markup(mut self, markup: Markup) -> Self {
        self.markup = markup;
        self
    }
}

impl Default for BlockSettings {
    fn default() -> Self {
        Self {
            label: None,
            interval: Duration::from_secs(1),
            markup: Markup::None,
            separator: true,
            align: Align::Left,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_defaults() {
        let settings = BlockOptions::default().resolve(
            Some("MEM"),
            Duration::from_secs(5),
            Markup::None,
        );
        assert_eq!(settings.label.as_deref(), Some("MEM"));
        assert_eq!(settings.interval, Duration::from_secs(5));
        assert!(settings.separator);
        assert_eq!(settings.align, Align::Left);
    }

    #[test]
    fn test_resolve_overrides() {
        let options: BlockOptions = serde_json::from_str(
            r#"{"label": "RAM", "interval": 0.5, "separator": false, "align": "center"}"#,
        )
        .unwrap();
        let settings = options.resolve(Some("MEM"), Duration::from_secs(5), Markup::Pango);
        assert_eq!(settings.label.as_deref(), Some("RAM"));
        assert_eq!(settings.interval, Duration::from_millis(500));
        assert_eq!(settings.markup, Markup::Pango);
        assert!(!settings.separator);
        assert_eq!(settings.align, Align::Center);
    }

    #[test]
    fn test_negative_interval_resolves_to_zero() {
        let options = BlockOptions {
            interval: Some(-1.0),
            ..Default::default()
        };
        let settings = options.resolve(None, Duration::from_secs(1), Markup::None);
        assert_eq!(settings.interval, Duration::ZERO);
    }
}
