//! Block handles: identity, per-block guard and the published render snapshot

use crate::block::{BlockId, BoxedBlock};
use anyhow::{anyhow, Result};
use arc_swap::ArcSwap;
use log::{debug, warn};
use rg_status_types::{compose_text, ClickEvent, Color, Markup, RenderRecord};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tokio::time::Instant;

/// What the rest of the engine may read about a block without its guard
#[derive(Debug, Clone, Default)]
pub struct BlockSnapshot {
    /// Instant of the tick that dispatched the last refresh
    pub last_refresh: Option<Instant>,
    /// `None` until the block has a value or an error to show
    pub render: Option<RenderRecord>,
}

/// Mutable state behind the guard
struct BlockCell {
    block: BoxedBlock,
    /// Error text replacing the value after a failed update
    fault: Option<String>,
}

/// A block as owned by the bar
///
/// The block itself lives behind an async mutex that acts as the per-block
/// guard: refreshes take it with `try_lock` and skip when it is held, clicks
/// wait for it. The latest render is published through an `ArcSwap` so that
/// the output task never has to wait for a slow block.
pub struct BlockHandle {
    id: BlockId,
    interval: Duration,
    cell: Arc<Mutex<BlockCell>>,
    busy: AtomicBool,
    snapshot: ArcSwap<BlockSnapshot>,
}

impl BlockHandle {
    /// Wrap a block, allocating a fresh identity
    pub fn new(block: BoxedBlock) -> Arc<Self> {
        Self::with_id(BlockId::next(), block)
    }

    pub fn with_id(id: BlockId, block: BoxedBlock) -> Arc<Self> {
        let interval = block.settings().interval;
        Arc::new(Self {
            id,
            interval,
            cell: Arc::new(Mutex::new(BlockCell { block, fault: None })),
            busy: AtomicBool::new(false),
            snapshot: ArcSwap::from_pointee(BlockSnapshot::default()),
        })
    }

    pub fn id(&self) -> BlockId {
        self.id
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// True once `interval` has elapsed since the last refresh, or if the
    /// block has never been refreshed
    pub fn needs_refresh(&self, now: Instant) -> bool {
        match self.snapshot.load().last_refresh {
            Some(last) => now.saturating_duration_since(last) >= self.interval,
            None => true,
        }
    }

    /// True while a refresh or click handler holds the guard
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    pub fn last_refresh(&self) -> Option<Instant> {
        self.snapshot.load().last_refresh
    }

    /// Latest published render record
    pub fn render(&self) -> Option<RenderRecord> {
        self.snapshot.load().render.clone()
    }

    /// Take the guard if nobody holds it
    pub fn try_guard(self: &Arc<Self>) -> Option<BlockGuard> {
        let cell = Arc::clone(&self.cell).try_lock_owned().ok()?;
        Some(self.acquired(cell))
    }

    /// Wait for the guard
    pub async fn guard(self: &Arc<Self>) -> BlockGuard {
        let cell = Arc::clone(&self.cell).lock_owned().await;
        self.acquired(cell)
    }

    fn acquired(self: &Arc<Self>, cell: OwnedMutexGuard<BlockCell>) -> BlockGuard {
        self.busy.store(true, Ordering::Release);
        BlockGuard {
            handle: Arc::clone(self),
            cell,
        }
    }
}

/// Exclusive access to one block.
///
/// Methods block the calling thread for as long as the block's own work
/// takes; run them on the blocking pool.
pub struct BlockGuard {
    handle: Arc<BlockHandle>,
    cell: OwnedMutexGuard<BlockCell>,
}

impl BlockGuard {
    pub fn id(&self) -> BlockId {
        self.handle.id
    }

    /// Update the block, publish its new render stamped with `now`, and
    /// report whether the render changed
    pub fn refresh(&mut self, now: Instant) -> bool {
        let id = self.handle.id;
        let cell = &mut *self.cell;

        match contain(|| cell.block.update()) {
            Ok(()) => cell.fault = None,
            Err(e) => {
                warn!("Block {} refresh failed: {:#}", id, e);
                cell.fault = Some(cell.block.error_value(&e));
            }
        }

        self.publish(Some(now))
    }

    /// Dispatch a click to the handler bound to its button, falling back to
    /// the block's default handler. Returns whether the render changed.
    pub fn click(&mut self, event: &ClickEvent) -> bool {
        let id = self.handle.id;
        let cell = &mut *self.cell;

        let result = contain(|| match cell.block.on_button(event.button, event) {
            Some(result) => result,
            None => cell.block.on_click(event),
        });

        match result {
            Ok(false) => {
                debug!("Block {} ignored button {}", id, event.button.code());
                return false;
            }
            Ok(true) => cell.fault = None,
            Err(e) => {
                warn!("Block {} click handler failed: {:#}", id, e);
                cell.fault = Some(cell.block.error_value(&e));
            }
        }

        let last_refresh = self.handle.last_refresh();
        self.publish(last_refresh)
    }

    fn publish(&self, last_refresh: Option<Instant>) -> bool {
        let render = render_cell(self.handle.id, &self.cell);
        let changed = self.handle.snapshot.load().render != render;
        self.handle.snapshot.store(Arc::new(BlockSnapshot {
            last_refresh,
            render,
        }));
        changed
    }
}

impl Drop for BlockGuard {
    fn drop(&mut self) {
        self.handle.busy.store(false, Ordering::Release);
    }
}

/// Run block code, turning a panic into an error so that it stays inside the
/// block like any other failure
fn contain<T>(f: impl FnOnce() -> Result<T>) -> Result<T> {
    panic::catch_unwind(AssertUnwindSafe(f))
        .unwrap_or_else(|payload| Err(anyhow!("panicked: {}", panic_message(payload.as_ref()))))
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg
    } else {
        "unknown panic"
    }
}

fn render_cell(id: BlockId, cell: &BlockCell) -> Option<RenderRecord> {
    let block = &cell.block;
    let settings = block.settings();
    let label = settings.label.as_deref();

    if let Some(fault) = &cell.fault {
        return Some(RenderRecord {
            instance: id.to_string(),
            full_text: compose_text(label, fault),
            color: Color::RED,
            urgent: true,
            markup: Markup::None,
            separator: settings.separator,
            align: settings.align,
            min_width: None,
        });
    }

    let value = block.value()?;
    Some(RenderRecord {
        instance: id.to_string(),
        full_text: compose_text(label, &value),
        color: block.color(),
        urgent: block.urgent(),
        markup: settings.markup,
        separator: settings.separator,
        align: settings.align,
        min_width: block.width_hint().and_then(|hint| compose_text(label, &hint)),
    })
}
