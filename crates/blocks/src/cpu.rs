//! CPU usage block

use anyhow::{anyhow, Result};
use rg_status_core::Block;
use rg_status_types::block_configs::CpuConfig;
use rg_status_types::{BlockSettings, Markup};
use std::time::Duration;
use sysinfo::{CpuRefreshKind, RefreshKind, System};

const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);

/// Average usage across all cores
///
/// Keeps its own `System`: usage is computed from the difference between two
/// consecutive refreshes, which a shared instance would disturb.
pub struct CpuBlock {
    settings: BlockSettings,
    system: System,
    usage: Option<f32>,
}

impl CpuBlock {
    pub fn new(config: &CpuConfig) -> Self {
        let system = System::new_with_specifics(
            RefreshKind::new().with_cpu(CpuRefreshKind::new().with_cpu_usage()),
        );

        Self {
            settings: config
                .options
                .resolve(Some("CPU"), DEFAULT_INTERVAL, Markup::None),
            system,
            usage: None,
        }
    }
}

impl Block for CpuBlock {
    fn settings(&self) -> &BlockSettings {
        &self.settings
    }

    fn update(&mut self) -> Result<()> {
        self.system.refresh_cpu_usage();

        let cpus = self.system.cpus();
        if cpus.is_empty() {
            return Err(anyhow!("no CPUs reported"));
        }
        let total: f32 = cpus.iter().map(|cpu| cpu.cpu_usage()).sum();
        self.usage = Some(total / cpus.len() as f32);
        Ok(())
    }

    fn value(&self) -> Option<String> {
        self.usage.map(format_usage)
    }

    fn width_hint(&self) -> Option<String> {
        Some(format_usage(100.0))
    }
}

fn format_usage(percent: f32) -> String {
    format!("{:.2}%", percent)
}
