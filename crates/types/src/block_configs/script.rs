//! Configuration for command-driven and static blocks.

use crate::settings::BlockOptions;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Shows the first line printed by a command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ScriptConfig {
    #[serde(flatten)]
    pub options: BlockOptions,
    /// Program and arguments, executed without a shell
    pub command: Vec<String>,
    /// Commands run on click, keyed by button number ("1" = left, "3" = right);
    /// the block refreshes afterwards
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub on_click: BTreeMap<String, Vec<String>>,
}

/// Fixed text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct StaticTextConfig {
    #[serde(flatten)]
    pub options: BlockOptions,
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_on_click_keys_are_button_numbers() {
        let config: ScriptConfig = serde_json::from_str(
            r#"{"command": ["date"], "on_click": {"1": ["notify-send", "hi"], "3": ["true"]}}"#,
        )
        .unwrap();
        assert_eq!(config.on_click.len(), 2);
        assert_eq!(config.on_click["1"], vec!["notify-send".to_string(), "hi".to_string()]);
        assert!(config.on_click.contains_key("3"));
    }
}
