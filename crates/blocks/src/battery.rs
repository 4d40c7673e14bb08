//! Battery block reading the kernel's power supply class

use anyhow::{anyhow, Context, Result};
use rg_status_core::Block;
use rg_status_types::block_configs::BatteryConfig;
use rg_status_types::{BlockSettings, Markup};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_INTERVAL: Duration = Duration::from_secs(2);

/// Charging state as reported in `status`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Full,
    Charging,
    Discharging,
    Other,
}

impl Status {
    fn parse(raw: &str) -> Self {
        match raw {
            "Full" => Status::Full,
            "Charging" => Status::Charging,
            "Discharging" => Status::Discharging,
            _ => Status::Other,
        }
    }

    fn abbreviation(self) -> Option<&'static str> {
        match self {
            Status::Full => Some("FULL"),
            Status::Charging => Some("CHR"),
            Status::Discharging => Some("DIS"),
            Status::Other => None,
        }
    }
}

/// Capacity, charging state and time to full/empty of one battery
///
/// Shown as `85% DIS (02:41)`.
pub struct BatteryBlock {
    settings: BlockSettings,
    dir: PathBuf,
    value: Option<String>,
}

impl BatteryBlock {
    pub fn new(config: &BatteryConfig) -> Self {
        Self {
            settings: config
                .options
                .resolve(Some(&config.name), DEFAULT_INTERVAL, Markup::None),
            dir: Path::new(&config.power_supply_dir).join(&config.name),
            value: None,
        }
    }

    fn read(&self, file: &str) -> Result<String> {
        let path = self.dir.join(file);
        let content =
            fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
        Ok(content.trim_end_matches('\n').to_string())
    }

    fn read_number(&self, file: &str) -> Result<f64> {
        let raw = self.read(file)?;
        raw.trim()
            .parse::<f64>()
            .with_context(|| format!("{} is not a number: {:?}", file, raw))
    }

    /// Stored and full charge plus the present rate, in units that only need
    /// to agree with each other.
    ///
    /// Drivers report either energy (µWh, µW) or charge (µAh, µA). Energy is
    /// divided by the voltage as the charge figures already are.
    fn charge(&self) -> Result<(f64, f64, f64)> {
        if self.dir.join("energy_now").exists() {
            let voltage = self.read_number("voltage_now")? / 1000.0;
            if voltage <= 0.0 {
                return Err(anyhow!("voltage_now is zero"));
            }
            Ok((
                self.read_number("energy_now")? / voltage,
                self.read_number("energy_full")? / voltage,
                self.read_number("power_now")? / voltage,
            ))
        } else {
            Ok((
                self.read_number("charge_now")?,
                self.read_number("charge_full")?,
                self.read_number("current_now")?,
            ))
        }
    }
}

impl Block for BatteryBlock {
    fn settings(&self) -> &BlockSettings {
        &self.settings
    }

    fn update(&mut self) -> Result<()> {
        let capacity = self.read("capacity")?;
        let status = Status::parse(&self.read("status")?);
        let (now, full, rate) = self.charge()?;

        let mut value = format!("{}%", capacity.trim());
        if let Some(abbreviation) = status.abbreviation() {
            value.push(' ');
            value.push_str(abbreviation);
        }
        if let Some(remaining) = time_remaining(status, now, full, rate) {
            value.push_str(&format!(" ({})", format_hours_minutes(remaining)));
        }

        self.value = Some(value);
        Ok(())
    }

    fn value(&self) -> Option<String> {
        self.value.clone()
    }
}

/// Time until full while charging, until empty while discharging
fn time_remaining(status: Status, now: f64, full: f64, rate: f64) -> Option<Duration> {
    if rate <= 0.0 {
        return None;
    }
    let hours = match status {
        Status::Charging => (full - now) / rate,
        Status::Discharging => now / rate,
        _ => return None,
    };
    Duration::try_from_secs_f64(hours * 3600.0)
        .ok()
        .filter(|remaining| remaining.as_secs() > 0)
}

/// `HH:MM`, wrapping past a day
fn format_hours_minutes(duration: Duration) -> String {
    let secs = duration.as_secs();
    format!("{:02}:{:02}", (secs / 3600) % 24, (secs % 3600) / 60)
}
