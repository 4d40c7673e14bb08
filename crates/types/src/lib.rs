//! rg-status-types: Shared data types for the rg-status bar.
//!
//! This crate contains pure data types (wire protocol records, click events,
//! block settings and block configs) shared across all rg-status crates.
//! Nothing here touches the system or the runtime.

pub mod block_configs;
pub mod click;
pub mod color;
pub mod protocol;
pub mod settings;

// Re-export commonly used types at the crate root for convenience
pub use block_configs::BlockConfig;
pub use click::{ClickEvent, MouseButton};
pub use color::{Color, ParseColorError};
pub use protocol::{compose_text, Align, Header, Markup, RenderRecord};
pub use settings::{BlockOptions, BlockSettings};
