//! Hardware temperature block

use crate::shared;
use anyhow::Result;
use rg_status_core::Block;
use rg_status_types::block_configs::TemperatureConfig;
use rg_status_types::{BlockSettings, Color, Markup};
use std::time::Duration;

const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);

/// Reading of one sensor from the shared component cache
pub struct TemperatureBlock {
    settings: BlockSettings,
    sensor: String,
    critical: Option<f64>,
    /// `Some(None)` while the sensor is not found
    reading: Option<Option<f32>>,
}

impl TemperatureBlock {
    pub fn new(config: &TemperatureConfig) -> Self {
        Self {
            settings: config.options.resolve(None, DEFAULT_INTERVAL, Markup::None),
            sensor: config.sensor.clone(),
            critical: config.critical,
            reading: None,
        }
    }

    fn record(&mut self, reading: Option<f32>) {
        if reading.is_none() && self.reading != Some(None) {
            log::warn!(
                "No temperature sensor labelled {:?}, known sensors: {:?}",
                self.sensor,
                shared::sensor_labels()
            );
        }
        self.reading = Some(reading);
    }

    fn is_critical(&self) -> bool {
        match (self.reading, self.critical) {
            (Some(Some(celsius)), Some(critical)) => f64::from(celsius) >= critical,
            _ => false,
        }
    }
}

impl Block for TemperatureBlock {
    fn settings(&self) -> &BlockSettings {
        &self.settings
    }

    fn update(&mut self) -> Result<()> {
        let reading = shared::temperature(&self.sensor);
        self.record(reading);
        Ok(())
    }

    fn value(&self) -> Option<String> {
        self.reading.map(|reading| match reading {
            Some(celsius) => format!("{:.1}°C", celsius),
            None => "N/A".to_string(),
        })
    }

    fn color(&self) -> Color {
        if self.is_critical() {
            Color::RED
        } else {
            Color::WHITE
        }
    }

    fn urgent(&self) -> bool {
        self.is_critical()
    }
}
