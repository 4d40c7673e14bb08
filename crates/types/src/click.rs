//! Click events sent by the host on stdin.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Envelope keys used to route an event; stripped before dispatch
pub const ENVELOPE_KEYS: &[&str] = &["instance", "name"];

/// X11 button number reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    WheelUp,
    WheelDown,
    WheelLeft,
    WheelRight,
    Back,
    Forward,
    Other(u8),
}

impl MouseButton {
    pub fn code(self) -> u8 {
        match self {
            MouseButton::Left => 1,
            MouseButton::Middle => 2,
            MouseButton::Right => 3,
            MouseButton::WheelUp => 4,
            MouseButton::WheelDown => 5,
            MouseButton::WheelLeft => 6,
            MouseButton::WheelRight => 7,
            MouseButton::Back => 8,
            MouseButton::Forward => 9,
            MouseButton::Other(code) => code,
        }
    }
}

impl From<u8> for MouseButton {
    fn from(code: u8) -> Self {
        match code {
            1 => MouseButton::Left,
            2 => MouseButton::Middle,
            3 => MouseButton::Right,
            4 => MouseButton::WheelUp,
            5 => MouseButton::WheelDown,
            6 => MouseButton::WheelLeft,
            7 => MouseButton::WheelRight,
            8 => MouseButton::Back,
            9 => MouseButton::Forward,
            other => MouseButton::Other(other),
        }
    }
}

impl From<MouseButton> for u8 {
    fn from(button: MouseButton) -> Self {
        button.code()
    }
}

/// Click payload handed to a block after the envelope has been stripped
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClickEvent {
    pub button: MouseButton,
    #[serde(default)]
    pub x: Option<i64>,
    #[serde(default)]
    pub y: Option<i64>,
    #[serde(default)]
    pub relative_x: Option<i64>,
    #[serde(default)]
    pub relative_y: Option<i64>,
    #[serde(default)]
    pub width: Option<i64>,
    #[serde(default)]
    pub height: Option<i64>,
    #[serde(default)]
    pub modifiers: Vec<String>,
    /// Anything else the host sent (sway adds `scale`, `output_x`, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ClickEvent {
    pub fn new(button: MouseButton) -> Self {
        Self {
            button,
            x: None,
            y: None,
            relative_x: None,
            relative_y: None,
            width: None,
            height: None,
            modifiers: Vec::new(),
            extra: Map::new(),
        }
    }

    /// Strip the routing envelope from a raw event object and parse the rest
    pub fn from_payload(mut payload: Map<String, Value>) -> Result<Self, serde_json::Error> {
        for key in ENVELOPE_KEYS {
            payload.remove(*key);
        }
        serde_json::from_value(Value::Object(payload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_button_codes() {
        assert_eq!(MouseButton::from(1), MouseButton::Left);
        assert_eq!(MouseButton::from(5), MouseButton::WheelDown);
        assert_eq!(MouseButton::from(12), MouseButton::Other(12));
        assert_eq!(MouseButton::Other(12).code(), 12);
        assert_eq!(MouseButton::Right.code(), 3);
    }

    #[test]
    fn test_from_payload_strips_envelope() {
        let payload = json!({
            "name": "cpu",
            "instance": "3",
            "button": 3,
            "x": 1200,
            "y": 10,
            "modifiers": ["Shift"],
            "scale": 1
        });
        let Value::Object(map) = payload else { unreachable!() };

        let event = ClickEvent::from_payload(map).unwrap();
        assert_eq!(event.button, MouseButton::Right);
        assert_eq!(event.x, Some(1200));
        assert_eq!(event.relative_x, None);
        assert_eq!(event.modifiers, vec!["Shift".to_string()]);
        assert!(!event.extra.contains_key("instance"));
        assert!(!event.extra.contains_key("name"));
        assert_eq!(event.extra.get("scale"), Some(&json!(1)));
    }

    #[test]
    fn test_missing_button_is_an_error() {
        let Value::Object(map) = json!({"instance": "1", "x": 4}) else {
            unreachable!()
        };
        assert!(ClickEvent::from_payload(map).is_err());
    }
}
