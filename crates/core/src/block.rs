//! Block trait and related types

use anyhow::Result;
use rg_status_types::{BlockSettings, ClickEvent, Color, MouseButton};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

/// Source of identities handed out by [`BlockId::next`]
static NEXT_BLOCK_ID: AtomicU64 = AtomicU64::new(1);

/// Stable identity of a block for the lifetime of the process.
///
/// Serialized on the wire as the block's `instance` string, and echoed back by
/// the host in click events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(u64);

impl BlockId {
    /// Allocate the next process-unique id
    pub fn next() -> Self {
        Self(NEXT_BLOCK_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Use an explicit id. The bar rejects duplicates at startup.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BlockId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

/// Trait for all blocks
///
/// A block produces one piece of the status line. The engine owns the
/// scheduling, locking and serialization; a block only knows how to poll its
/// value, describe how it looks, and react to clicks.
///
/// Methods are called from the blocking worker pool while the engine holds
/// the block's exclusive guard, so `update` may block (file reads,
/// subprocesses) and never runs concurrently with itself or a click handler.
pub trait Block: Send {
    /// Presentation and scheduling settings, fixed at construction
    fn settings(&self) -> &BlockSettings;

    /// Poll the underlying resource and store the new value.
    ///
    /// An error leaves the previous value in place; the engine then renders
    /// [`Block::error_value`] until the next successful update.
    fn update(&mut self) -> Result<()>;

    /// Current value text, without the label.
    ///
    /// `None` means no value has been produced yet; the block is left out of
    /// the frame until it has one.
    fn value(&self) -> Option<String>;

    /// Widest expected value, used as `min_width` so the bar doesn't jitter
    fn width_hint(&self) -> Option<String> {
        None
    }

    fn color(&self) -> Color {
        Color::WHITE
    }

    fn urgent(&self) -> bool {
        false
    }

    /// Text shown in place of the value after a failed update or click
    fn error_value(&self, _error: &anyhow::Error) -> String {
        "ERROR".to_string()
    }

    /// Handler bound to a specific button.
    ///
    /// Return `None` for buttons without a dedicated handler; those fall back
    /// to [`Block::on_click`]. `Some(Ok(changed))` reports whether the
    /// rendered output may have changed.
    fn on_button(&mut self, _button: MouseButton, _event: &ClickEvent) -> Option<Result<bool>> {
        None
    }

    /// Default click handler: refresh the block
    fn on_click(&mut self, _event: &ClickEvent) -> Result<bool> {
        self.update()?;
        Ok(true)
    }
}

/// Type-erased block for dynamic dispatch
pub type BoxedBlock = Box<dyn Block>;
