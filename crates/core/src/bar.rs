//! The bar: wires the scheduler, click router and output serializer together

use crate::block::{BlockId, BoxedBlock};
use crate::error::BarError;
use crate::executor::RefreshExecutor;
use crate::handle::BlockHandle;
use crate::output::OutputSerializer;
use crate::router::ClickRouter;
use crate::scheduler::{global_tick, BlockList, Scheduler};
use log::{info, trace, warn};
use std::collections::HashSet;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncBufRead;
use tokio::sync::mpsc::{self, UnboundedReceiver};

/// A fixed, ordered set of blocks and the loops that drive them
pub struct Bar {
    blocks: BlockList,
    tick: Duration,
}

impl Bar {
    /// Build a bar, giving every block a fresh identity
    pub fn new(blocks: Vec<BoxedBlock>) -> Result<Self, BarError> {
        Self::from_handles(blocks.into_iter().map(BlockHandle::new).collect())
    }

    /// Build a bar from prepared handles.
    ///
    /// Fails when there are no blocks, an interval is zero, or two handles
    /// share an id.
    pub fn from_handles(handles: Vec<Arc<BlockHandle>>) -> Result<Self, BarError> {
        let mut seen = HashSet::new();
        if let Some(duplicate) = handles.iter().find(|handle| !seen.insert(handle.id())) {
            return Err(BarError::DuplicateId(duplicate.id()));
        }

        let tick = global_tick(&handles)?;
        Ok(Self {
            blocks: handles.into(),
            tick,
        })
    }

    pub fn blocks(&self) -> &[Arc<BlockHandle>] {
        &self.blocks
    }

    pub fn tick(&self) -> Duration {
        self.tick
    }

    /// Run until writing to the host fails.
    ///
    /// `input` carries the host's click events, `output` receives the
    /// protocol stream. The tick loop and the click router run as their own
    /// tasks; this future owns the output and emits a frame whenever a block's
    /// render changes.
    pub async fn run<R, W>(self, input: R, output: W) -> Result<(), BarError>
    where
        R: AsyncBufRead + Unpin + Send + 'static,
        W: Write,
    {
        let (changes, mut changed) = mpsc::unbounded_channel();
        let executor = RefreshExecutor::new(changes);

        let mut serializer = OutputSerializer::new(output);
        serializer.start()?;

        let scheduler = Scheduler::new(Arc::clone(&self.blocks), executor.clone())?;
        let router = ClickRouter::new(&self.blocks, executor);

        info!(
            "Running {} blocks, tick every {:?}",
            self.blocks.len(),
            self.tick
        );

        let ticking = tokio::spawn(scheduler.run());
        let routing = tokio::spawn(async move {
            if let Err(e) = router.run(input).await {
                warn!("Stopped reading click events: {}", e);
            }
        });

        let result = emit_changes(&mut serializer, &self.blocks, &mut changed).await;

        ticking.abort();
        routing.abort();
        result
    }
}

/// Emit a frame for every batch of change notifications
async fn emit_changes<W: Write>(
    serializer: &mut OutputSerializer<W>,
    blocks: &[Arc<BlockHandle>],
    changed: &mut UnboundedReceiver<BlockId>,
) -> Result<(), BarError> {
    while let Some(id) = changed.recv().await {
        let mut pending = 1;
        while changed.try_recv().is_ok() {
            pending += 1;
        }
        trace!("Block {} changed ({} notifications batched)", id, pending);
        serializer.emit(blocks)?;
    }
    Ok(())
}
