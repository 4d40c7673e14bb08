//! Command-driven and static text blocks

use anyhow::{anyhow, bail, Context, Result};
use rg_status_core::Block;
use rg_status_types::block_configs::{ScriptConfig, StaticTextConfig};
use rg_status_types::{BlockSettings, ClickEvent, Markup, MouseButton};
use std::collections::HashMap;
use std::process::Command;
use std::time::Duration;

const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);

/// Static text never needs polling; one refresh a day keeps it in the schedule
const STATIC_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

/// Shows the first line a command prints
///
/// Commands run without a shell. Click commands see the event in
/// `BLOCK_BUTTON`, `BLOCK_X` and `BLOCK_Y`; the block refreshes after they
/// finish.
pub struct ScriptBlock {
    settings: BlockSettings,
    command: Vec<String>,
    on_click: HashMap<MouseButton, Vec<String>>,
    output: Option<String>,
}

impl ScriptBlock {
    /// Fails on an empty command or a click binding that isn't a button number
    pub fn new(config: &ScriptConfig) -> Result<Self> {
        if config.command.is_empty() {
            bail!("script block needs a command");
        }

        let mut on_click = HashMap::new();
        for (key, command) in &config.on_click {
            let code: u8 = key
                .trim()
                .parse()
                .with_context(|| format!("on_click key {:?} is not a button number", key))?;
            if command.is_empty() {
                bail!("on_click command for button {} is empty", code);
            }
            on_click.insert(MouseButton::from(code), command.clone());
        }

        Ok(Self {
            settings: config.options.resolve(None, DEFAULT_INTERVAL, Markup::None),
            command: config.command.clone(),
            on_click,
            output: None,
        })
    }
}

impl Block for ScriptBlock {
    fn settings(&self) -> &BlockSettings {
        &self.settings
    }

    fn update(&mut self) -> Result<()> {
        let stdout = run(&self.command, &[])?;
        self.output = Some(stdout.lines().next().unwrap_or_default().to_string());
        Ok(())
    }

    fn value(&self) -> Option<String> {
        self.output.clone()
    }

    fn on_button(&mut self, button: MouseButton, event: &ClickEvent) -> Option<Result<bool>> {
        let command = self.on_click.get(&button)?.clone();
        let env = [
            ("BLOCK_BUTTON", button.code().to_string()),
            ("BLOCK_X", event.x.map(|x| x.to_string()).unwrap_or_default()),
            ("BLOCK_Y", event.y.map(|y| y.to_string()).unwrap_or_default()),
        ];

        let result = run(&command, &env).and_then(|_| self.update()).map(|()| true);
        Some(result)
    }
}

/// Run a command to completion and return its stdout. A non-zero exit is an
/// error carrying the first line of stderr.
fn run(command: &[String], env: &[(&str, String)]) -> Result<String> {
    let (program, args) = command
        .split_first()
        .ok_or_else(|| anyhow!("empty command"))?;

    let output = Command::new(program)
        .args(args)
        .envs(env.iter().map(|(key, value)| (*key, value.as_str())))
        .output()
        .with_context(|| format!("failed to run {}", program))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!(
            "{} exited with {}: {}",
            program,
            output.status,
            stderr.lines().next().unwrap_or_default()
        );
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Fixed text
pub struct StaticTextBlock {
    settings: BlockSettings,
    text: String,
    shown: bool,
}

impl StaticTextBlock {
    pub fn new(config: &StaticTextConfig) -> Self {
        Self {
            settings: config.options.resolve(None, STATIC_INTERVAL, Markup::None),
            text: config.text.clone(),
            shown: false,
        }
    }
}

impl Block for StaticTextBlock {
    fn settings(&self) -> &BlockSettings {
        &self.settings
    }

    fn update(&mut self) -> Result<()> {
        self.shown = true;
        Ok(())
    }

    fn value(&self) -> Option<String> {
        self.shown.then(|| self.text.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn args(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|part| part.to_string()).collect()
    }

    fn script(command: &[&str]) -> ScriptConfig {
        ScriptConfig {
            command: args(command),
            ..Default::default()
        }
    }

    #[test]
    fn test_shows_first_line_of_output() {
        let mut block = ScriptBlock::new(&script(&["printf", "first\\nsecond\\n"])).unwrap();
        assert!(block.value().is_none());
        block.update().unwrap();
        assert_eq!(block.value().as_deref(), Some("first"));
    }

    #[test]
    fn test_non_zero_exit_is_an_error() {
        let mut block =
            ScriptBlock::new(&script(&["sh", "-c", "echo broken >&2; exit 3"])).unwrap();
        let err = block.update().unwrap_err();
        assert!(err.to_string().contains("broken"), "unexpected error: {}", err);
        assert!(block.value().is_none());
    }

    #[test]
    fn test_missing_program_is_an_error() {
        let mut block = ScriptBlock::new(&script(&["/nonexistent/rg-status-script"])).unwrap();
        assert!(block.update().is_err());
    }

    #[test]
    fn test_rejects_bad_configs() {
        assert!(ScriptBlock::new(&script(&[])).is_err());

        let mut config = script(&["true"]);
        config.on_click = BTreeMap::from([("left".to_string(), args(&["true"]))]);
        assert!(ScriptBlock::new(&config).is_err());
    }

    #[test]
    fn test_click_command_receives_button() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("clicked");
        let marker_str = marker.to_string_lossy().into_owned();

        let mut config = script(&["echo", "idle"]);
        config.on_click = BTreeMap::from([(
            "3".to_string(),
            args(&["sh", "-c", &format!("echo $BLOCK_BUTTON > {}", marker_str)]),
        )]);
        let mut block = ScriptBlock::new(&config).unwrap();

        let click = ClickEvent::new(MouseButton::Right);
        assert!(block.on_button(MouseButton::Right, &click).unwrap().unwrap());
        assert_eq!(std::fs::read_to_string(&marker).unwrap().trim(), "3");
        assert_eq!(block.value().as_deref(), Some("idle"));

        assert!(block.on_button(MouseButton::Left, &click).is_none());
    }

    #[test]
    fn test_static_text() {
        let mut block = StaticTextBlock::new(&StaticTextConfig {
            text: "hello".to_string(),
            ..Default::default()
        });
        assert!(block.value().is_none());
        block.update().unwrap();
        assert_eq!(block.value().as_deref(), Some("hello"));
        assert_eq!(block.settings().interval, STATIC_INTERVAL);
    }
}
