//! Clock block

use crate::markup;
use anyhow::{anyhow, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, TimeZone, Utc};
use chrono_tz::Tz;
use rg_status_core::Block;
use rg_status_types::block_configs::DateTimeConfig;
use rg_status_types::{BlockSettings, ClickEvent, Markup, MouseButton};
use std::fmt::{Display, Write};
use std::time::Duration;

const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);

enum Zone {
    Local,
    Named(Tz),
}

/// Current time in bold, formatted with strftime syntax
///
/// A left click switches to `alt_format` and back when one is configured.
pub struct DateTimeBlock {
    settings: BlockSettings,
    format: String,
    alt_format: Option<String>,
    zone: Zone,
    showing_alt: bool,
    stamp: Option<String>,
}

impl DateTimeBlock {
    /// Fails on a format with unknown specifiers or an unknown timezone
    pub fn new(config: &DateTimeConfig) -> Result<Self> {
        check_format(&config.format)?;
        if let Some(alt) = &config.alt_format {
            check_format(alt)?;
        }

        let zone = match &config.timezone {
            Some(name) => Zone::Named(
                name.parse::<Tz>()
                    .map_err(|e| anyhow!("unknown timezone {:?}: {}", name, e))?,
            ),
            None => Zone::Local,
        };

        Ok(Self {
            settings: config.options.resolve(None, DEFAULT_INTERVAL, Markup::Pango),
            format: config.format.clone(),
            alt_format: config.alt_format.clone(),
            zone,
            showing_alt: false,
            stamp: None,
        })
    }

    fn active_format(&self) -> &str {
        match (&self.alt_format, self.showing_alt) {
            (Some(alt), true) => alt,
            _ => &self.format,
        }
    }
}

impl Block for DateTimeBlock {
    fn settings(&self) -> &BlockSettings {
        &self.settings
    }

    fn update(&mut self) -> Result<()> {
        let format = self.active_format();
        let stamp = match &self.zone {
            Zone::Local => format_time(&Local::now(), format)?,
            Zone::Named(tz) => format_time(&Utc::now().with_timezone(tz), format)?,
        };
        self.stamp = Some(stamp);
        Ok(())
    }

    fn value(&self) -> Option<String> {
        self.stamp
            .as_ref()
            .map(|stamp| markup::weight(&markup::escape(stamp), "bold"))
    }

    fn on_button(&mut self, button: MouseButton, _event: &ClickEvent) -> Option<Result<bool>> {
        if button != MouseButton::Left || self.alt_format.is_none() {
            return None;
        }
        self.showing_alt = !self.showing_alt;
        Some(self.update().map(|()| true))
    }
}

fn check_format(format: &str) -> Result<()> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(anyhow!("invalid time format {:?}", format));
    }
    Ok(())
}

fn format_time<Z>(time: &DateTime<Z>, format: &str) -> Result<String>
where
    Z: TimeZone,
    Z::Offset: Display,
{
    let mut out = String::new();
    write!(out, "{}", time.format(format))
        .map_err(|_| anyhow!("cannot format time with {:?}", format))?;
    Ok(out)
}
