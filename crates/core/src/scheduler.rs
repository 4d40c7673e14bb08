//! Scheduler: drives block refreshes from a single global tick

use crate::block::BlockId;
use crate::error::BarError;
use crate::executor::{RefreshExecutor, RefreshOutcome};
use crate::handle::BlockHandle;
use log::{info, trace};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// Ordered, fixed list of blocks shared by every task of the bar
pub type BlockList = Arc<[Arc<BlockHandle>]>;

/// The global tick: the shortest refresh interval of all blocks
pub fn global_tick(blocks: &[Arc<BlockHandle>]) -> Result<Duration, BarError> {
    if let Some(handle) = blocks.iter().find(|handle| handle.interval().is_zero()) {
        return Err(BarError::InvalidInterval {
            id: handle.id(),
            interval: handle.interval(),
        });
    }

    blocks
        .iter()
        .map(|handle| handle.interval())
        .min()
        .ok_or(BarError::NoBlocks)
}

/// What one tick did
#[derive(Debug, Default)]
pub struct TickReport {
    pub started: Vec<(BlockId, JoinHandle<bool>)>,
    pub skipped: Vec<BlockId>,
}

/// Decides on every tick which blocks are due and hands them to the executor
pub struct Scheduler {
    blocks: BlockList,
    executor: RefreshExecutor,
    tick: Duration,
}

impl Scheduler {
    pub fn new(blocks: BlockList, executor: RefreshExecutor) -> Result<Self, BarError> {
        let tick = global_tick(&blocks)?;
        Ok(Self {
            blocks,
            executor,
            tick,
        })
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick
    }

    /// Blocks whose interval has elapsed and that are not mid-refresh
    pub fn due(&self, now: Instant) -> Vec<&Arc<BlockHandle>> {
        self.blocks
            .iter()
            .filter(|handle| handle.needs_refresh(now) && !handle.is_busy())
            .collect()
    }

    /// Start a refresh of every due block
    pub fn tick(&self, now: Instant) -> TickReport {
        let mut report = TickReport::default();

        for handle in self.due(now) {
            match self.executor.refresh(handle, now) {
                RefreshOutcome::Started(task) => report.started.push((handle.id(), task)),
                RefreshOutcome::Skipped => report.skipped.push(handle.id()),
            }
        }

        report
    }

    /// Start the tick loop
    ///
    /// This runs indefinitely. The first tick fires immediately, so every
    /// block gets its initial refresh at startup. Refreshes are not awaited;
    /// a slow block is simply skipped until it finishes.
    pub async fn run(self) {
        let mut interval = tokio::time::interval(self.tick);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!("Starting tick loop every {:?}", self.tick);

        loop {
            let now = interval.tick().await;
            let report = self.tick(now);
            trace!(
                "Tick started {} refreshes, skipped {}",
                report.started.len(),
                report.skipped.len()
            );
        }
    }
}
