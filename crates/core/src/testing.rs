//! Blocks used by the engine's unit tests

use crate::block::{Block, BoxedBlock};
use anyhow::{bail, Result};
use rg_status_types::{BlockSettings, ClickEvent, MouseButton};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Shows whatever string the test puts in its shared cell
pub struct ValueBlock {
    settings: BlockSettings,
    source: Arc<Mutex<String>>,
    value: Option<String>,
}

impl ValueBlock {
    pub fn boxed(value: &str, interval: Duration) -> BoxedBlock {
        Self::shared(value, interval).0
    }

    pub fn shared(value: &str, interval: Duration) -> (BoxedBlock, Arc<Mutex<String>>) {
        let source = Arc::new(Mutex::new(value.to_string()));
        let block = Self {
            settings: BlockSettings::new(interval),
            source: Arc::clone(&source),
            value: None,
        };
        (Box::new(block), source)
    }
}

impl Block for ValueBlock {
    fn settings(&self) -> &BlockSettings {
        &self.settings
    }

    fn update(&mut self) -> Result<()> {
        self.value = Some(self.source.lock().unwrap().clone());
        Ok(())
    }

    fn value(&self) -> Option<String> {
        self.value.clone()
    }
}

/// Always fails to update
pub struct FailingBlock {
    settings: BlockSettings,
}

impl FailingBlock {
    pub fn boxed(label: &str) -> BoxedBlock {
        Box::new(Self {
            settings: BlockSettings::new(Duration::from_secs(1)).with_label(label),
        })
    }
}

impl Block for FailingBlock {
    fn settings(&self) -> &BlockSettings {
        &self.settings
    }

    fn update(&mut self) -> Result<()> {
        bail!("sensor missing")
    }

    fn value(&self) -> Option<String> {
        None
    }
}

/// Panics on update
pub struct PanickingBlock {
    settings: BlockSettings,
}

impl PanickingBlock {
    pub fn boxed() -> BoxedBlock {
        Box::new(Self {
            settings: BlockSettings::default(),
        })
    }
}

impl Block for PanickingBlock {
    fn settings(&self) -> &BlockSettings {
        &self.settings
    }

    fn update(&mut self) -> Result<()> {
        panic!("block bug")
    }

    fn value(&self) -> Option<String> {
        None
    }
}

/// Counts updates and tracks how many run at the same time
pub struct SlowBlock {
    settings: BlockSettings,
    delay: Duration,
    pub stats: Arc<SlowStats>,
}

#[derive(Default)]
pub struct SlowStats {
    pub running: AtomicUsize,
    pub max_running: AtomicUsize,
    pub updates: AtomicUsize,
}

impl SlowBlock {
    pub fn boxed(delay: Duration) -> (BoxedBlock, Arc<SlowStats>) {
        let stats = Arc::new(SlowStats::default());
        let block = Self {
            settings: BlockSettings::default(),
            delay,
            stats: Arc::clone(&stats),
        };
        (Box::new(block), stats)
    }
}

impl Block for SlowBlock {
    fn settings(&self) -> &BlockSettings {
        &self.settings
    }

    fn update(&mut self) -> Result<()> {
        let running = self.stats.running.fetch_add(1, Ordering::SeqCst) + 1;
        self.stats.max_running.fetch_max(running, Ordering::SeqCst);
        std::thread::sleep(self.delay);
        self.stats.updates.fetch_add(1, Ordering::SeqCst);
        self.stats.running.fetch_sub(1, Ordering::SeqCst);
        Ok(())
    }

    fn value(&self) -> Option<String> {
        Some(self.stats.updates.load(Ordering::SeqCst).to_string())
    }
}

/// Records the buttons it was clicked with; only the left button is bound
pub struct ClickRecorder {
    settings: BlockSettings,
    pub clicks: Arc<Mutex<Vec<MouseButton>>>,
    fallbacks: Arc<AtomicUsize>,
}

impl ClickRecorder {
    pub fn boxed() -> (BoxedBlock, Arc<Mutex<Vec<MouseButton>>>, Arc<AtomicUsize>) {
        let clicks = Arc::new(Mutex::new(Vec::new()));
        let fallbacks = Arc::new(AtomicUsize::new(0));
        let block = Self {
            settings: BlockSettings::default(),
            clicks: Arc::clone(&clicks),
            fallbacks: Arc::clone(&fallbacks),
        };
        (Box::new(block), clicks, fallbacks)
    }
}

impl Block for ClickRecorder {
    fn settings(&self) -> &BlockSettings {
        &self.settings
    }

    fn update(&mut self) -> Result<()> {
        Ok(())
    }

    fn value(&self) -> Option<String> {
        Some(format!("{} clicks", self.clicks.lock().unwrap().len()))
    }

    fn on_button(&mut self, button: MouseButton, _event: &ClickEvent) -> Option<Result<bool>> {
        if button != MouseButton::Left {
            return None;
        }
        self.clicks.lock().unwrap().push(button);
        Some(Ok(true))
    }

    fn on_click(&mut self, event: &ClickEvent) -> Result<bool> {
        self.fallbacks.fetch_add(1, Ordering::SeqCst);
        self.clicks.lock().unwrap().push(event.button);
        Ok(true)
    }
}

/// In-memory output that tests can read while the bar keeps writing
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn lines(&self) -> Vec<String> {
        String::from_utf8_lossy(&self.0.lock().unwrap())
            .lines()
            .map(str::to_string)
            .collect()
    }
}

impl std::io::Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
