//! Refresh executor: runs block work on the blocking pool under each block's guard

use crate::block::BlockId;
use crate::handle::BlockHandle;
use log::{error, trace};
use rg_status_types::ClickEvent;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Channel end used to tell the output task that a block's render changed
pub type ChangeSender = UnboundedSender<BlockId>;

/// Result of asking for a refresh
#[derive(Debug)]
pub enum RefreshOutcome {
    /// The refresh is running; the task yields whether the render changed
    Started(JoinHandle<bool>),
    /// Another refresh or click of the same block is in flight
    Skipped,
}

impl RefreshOutcome {
    pub fn is_skipped(&self) -> bool {
        matches!(self, RefreshOutcome::Skipped)
    }
}

/// Dispatches refresh and click work items.
///
/// Work for distinct blocks runs concurrently; work for one block is
/// serialized by its guard.
#[derive(Clone)]
pub struct RefreshExecutor {
    changes: ChangeSender,
}

impl RefreshExecutor {
    pub fn new(changes: ChangeSender) -> Self {
        Self { changes }
    }

    /// Refresh a block unless it is already busy. Must be called from within
    /// a tokio runtime.
    pub fn refresh(&self, handle: &Arc<BlockHandle>, now: Instant) -> RefreshOutcome {
        let Some(mut guard) = handle.try_guard() else {
            trace!("Block {} is busy, skipping refresh", handle.id());
            return RefreshOutcome::Skipped;
        };

        let changes = self.changes.clone();
        RefreshOutcome::Started(tokio::task::spawn_blocking(move || {
            let id = guard.id();
            let changed = guard.refresh(now);
            drop(guard);
            if changed {
                notify(&changes, id);
            }
            changed
        }))
    }

    /// Deliver a click once the block's guard is free.
    ///
    /// Returns immediately; the caller can keep reading input while the
    /// handler waits for an in-flight refresh or runs for a long time.
    pub fn click(&self, handle: Arc<BlockHandle>, event: ClickEvent) -> JoinHandle<bool> {
        let changes = self.changes.clone();
        tokio::spawn(async move {
            let id = handle.id();
            let mut guard = handle.guard().await;
            let work = tokio::task::spawn_blocking(move || guard.click(&event));

            match work.await {
                Ok(true) => {
                    notify(&changes, id);
                    true
                }
                Ok(false) => false,
                Err(e) => {
                    error!("Click task for block {} failed: {}", id, e);
                    false
                }
            }
        })
    }
}

fn notify(changes: &ChangeSender, id: BlockId) {
    if changes.send(id).is_err() {
        trace!("Output task gone, dropping change of block {}", id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ClickRecorder, SlowBlock, ValueBlock};
    use rg_status_types::MouseButton;
    use std::sync::atomic::Ordering;
    use std::time::Duration;
    use tokio::sync::mpsc;

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_triggers_run_one_refresh() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let executor = RefreshExecutor::new(tx);
        let (block, stats) = SlowBlock::boxed(Duration::from_millis(300));
        let handle = BlockHandle::new(block);

        let now = Instant::now();
        let triggers: Vec<_> = (0..16)
            .map(|_| {
                let executor = executor.clone();
                let handle = Arc::clone(&handle);
                tokio::spawn(async move { executor.refresh(&handle, now) })
            })
            .collect();

        let mut started = Vec::new();
        let mut skipped = 0;
        for trigger in triggers {
            match trigger.await.unwrap() {
                RefreshOutcome::Started(task) => started.push(task),
                RefreshOutcome::Skipped => skipped += 1,
            }
        }
        assert_eq!(started.len(), 1);
        assert_eq!(skipped, 15);

        for task in started {
            assert!(task.await.unwrap());
        }
        assert_eq!(stats.updates.load(Ordering::SeqCst), 1);
        assert_eq!(stats.max_running.load(Ordering::SeqCst), 1);
        assert_eq!(rx.recv().await, Some(handle.id()));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_repeated_triggers_never_overlap() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let executor = RefreshExecutor::new(tx);
        let (block, stats) = SlowBlock::boxed(Duration::from_millis(5));
        let handle = BlockHandle::new(block);

        let mut tasks = Vec::new();
        for _ in 0..50 {
            if let RefreshOutcome::Started(task) = executor.refresh(&handle, Instant::now()) {
                tasks.push(task);
            }
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
        for task in tasks {
            task.await.unwrap();
        }

        assert!(stats.updates.load(Ordering::SeqCst) >= 1);
        assert_eq!(stats.max_running.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unchanged_refresh_sends_nothing() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let executor = RefreshExecutor::new(tx);
        let handle = BlockHandle::new(ValueBlock::boxed("same", Duration::from_secs(1)));

        for _ in 0..3 {
            let RefreshOutcome::Started(task) = executor.refresh(&handle, Instant::now()) else {
                panic!("block should be idle");
            };
            task.await.unwrap();
        }

        assert_eq!(rx.try_recv().ok(), Some(handle.id()));
        assert!(rx.try_recv().is_err(), "only the first refresh changes the render");
    }

    #[tokio::test]
    async fn test_click_waits_for_guard() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let executor = RefreshExecutor::new(tx);
        let (block, clicks, _) = ClickRecorder::boxed();
        let handle = BlockHandle::new(block);

        let guard = handle.try_guard().unwrap();
        let task = executor.click(Arc::clone(&handle), ClickEvent::new(MouseButton::Left));
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(clicks.lock().unwrap().is_empty(), "click must wait for the guard");

        drop(guard);
        assert!(task.await.unwrap());
        assert_eq!(*clicks.lock().unwrap(), vec![MouseButton::Left]);
        assert_eq!(rx.recv().await, Some(handle.id()));
    }
}
