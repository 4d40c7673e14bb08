//! rg-status-core: the status-line engine.
//!
//! This crate contains the Block trait, per-block handles and guards, the
//! tick scheduler, the refresh executor, the click router and the output
//! serializer, plus the `Bar` that runs them together.

mod bar;
mod block;
mod error;
mod executor;
mod handle;
mod output;
mod router;
mod scheduler;
#[cfg(test)]
mod testing;

pub use bar::Bar;
pub use block::{Block, BlockId, BoxedBlock};
pub use error::{BarError, RouteError};
pub use executor::{ChangeSender, RefreshExecutor, RefreshOutcome};
pub use handle::{BlockGuard, BlockHandle, BlockSnapshot};
pub use output::{render_frame, OutputSerializer};
pub use router::{decode_line, ClickRouter};
pub use scheduler::{global_tick, BlockList, Scheduler, TickReport};

// Re-export types used in trait signatures for convenience
pub use rg_status_types::{BlockSettings, ClickEvent, Color, MouseButton, RenderRecord};
