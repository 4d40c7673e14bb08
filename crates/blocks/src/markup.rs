//! Pango markup helpers for blocks rendered with `markup: pango`

use rg_status_types::Color;

/// Escape text so pango shows it literally
pub fn escape(text: &str) -> String {
    glib::markup_escape_text(text).to_string()
}

/// Wrap already escaped markup in a foreground color span
pub fn color(markup: &str, color: Color) -> String {
    format!("<span fgcolor=\"{}\">{}</span>", color, markup)
}

/// Wrap already escaped markup in a font weight span (`bold`, `light`, ...)
pub fn weight(markup: &str, weight: &str) -> String {
    format!("<span font_weight=\"{}\">{}</span>", weight, markup)
}
