//! Network interface and throughput blocks

use crate::format::format_rate;
use crate::markup;
use crate::shared::{self, Interface};
use anyhow::Result;
use rg_status_core::Block;
use rg_status_types::block_configs::{NetIoConfig, NetworkConfig};
use rg_status_types::{BlockSettings, Color, Markup};
use std::time::{Duration, Instant};

const DEFAULT_INTERVAL: Duration = Duration::from_secs(2);

/// Name and IPv4 address of the first active interface
pub struct NetworkBlock {
    settings: BlockSettings,
    ignore: Vec<String>,
    /// `Some(None)` once a refresh found no active interface
    current: Option<Option<(String, String)>>,
}

impl NetworkBlock {
    pub fn new(config: &NetworkConfig) -> Self {
        Self {
            settings: config
                .options
                .resolve(Some("NET"), DEFAULT_INTERVAL, Markup::Pango),
            ignore: config.ignore.clone(),
            current: None,
        }
    }

    fn show(&mut self, interfaces: &[Interface]) {
        self.current = Some(
            interfaces
                .first()
                .map(|iface| (iface.name.to_uppercase(), iface.address.to_string())),
        );
    }
}

impl Block for NetworkBlock {
    fn settings(&self) -> &BlockSettings {
        &self.settings
    }

    fn update(&mut self) -> Result<()> {
        let interfaces = shared::active_interfaces(&self.ignore);
        self.show(&interfaces);
        Ok(())
    }

    fn value(&self) -> Option<String> {
        match self.current.as_ref()? {
            Some((name, address)) => Some(format!(
                "({}) {}",
                markup::escape(name),
                markup::color(&markup::escape(address), Color::GREEN)
            )),
            None => Some(markup::color(" OFFLINE", Color::RED)),
        }
    }
}

/// Upload and download rate summed over active interfaces
pub struct NetIoBlock {
    settings: BlockSettings,
    ignore: Vec<String>,
    counters: Option<Counters>,
    rates: Option<(f64, f64)>,
}

/// Byte counters at one point in time
#[derive(Debug, Clone, Copy)]
struct Counters {
    transmitted: u64,
    received: u64,
    at: Instant,
}

impl NetIoBlock {
    pub fn new(config: &NetIoConfig) -> Self {
        Self {
            settings: config.options.resolve(None, DEFAULT_INTERVAL, Markup::None),
            ignore: config.ignore.clone(),
            counters: None,
            rates: None,
        }
    }

    /// Fold in a new sample. Counters that vanish (interfaces going down)
    /// reset both rates to zero.
    fn sample(&mut self, transmitted: u64, received: u64, at: Instant) {
        let previous = self.counters.take();

        if transmitted == 0 || received == 0 {
            self.rates = Some((0.0, 0.0));
            return;
        }
        self.counters = Some(Counters {
            transmitted,
            received,
            at,
        });

        let rates = match previous {
            Some(prev) => {
                let elapsed = at.saturating_duration_since(prev.at).as_secs_f64();
                if elapsed > 0.0 {
                    (
                        transmitted.saturating_sub(prev.transmitted) as f64 / elapsed,
                        received.saturating_sub(prev.received) as f64 / elapsed,
                    )
                } else {
                    (0.0, 0.0)
                }
            }
            None => (0.0, 0.0),
        };
        self.rates = Some(rates);
    }
}

impl Block for NetIoBlock {
    fn settings(&self) -> &BlockSettings {
        &self.settings
    }

    fn update(&mut self) -> Result<()> {
        let interfaces = shared::active_interfaces(&self.ignore);
        let transmitted = interfaces.iter().map(|iface| iface.total_transmitted).sum();
        let received = interfaces.iter().map(|iface| iface.total_received).sum();
        self.sample(transmitted, received, Instant::now());
        Ok(())
    }

    fn value(&self) -> Option<String> {
        self.rates.map(|(tx, rx)| format_io(tx, rx))
    }

    fn width_hint(&self) -> Option<String> {
        Some(format_io(100.0, 100.0))
    }
}

fn format_io(tx: f64, rx: f64) -> String {
    format!("{}   {}", format_rate(tx), format_rate(rx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    fn interface(name: &str, address: [u8; 4]) -> Interface {
        Interface {
            name: name.to_string(),
            address: Ipv4Addr::from(address),
            total_received: 0,
            total_transmitted: 0,
        }
    }

    #[test]
    fn test_first_interface_is_shown() {
        let mut block = NetworkBlock::new(&NetworkConfig::default());
        assert!(block.value().is_none());

        block.show(&[interface("wlan0", [192, 168, 1, 20]), interface("eth1", [10, 0, 0, 1])]);
        assert_eq!(
            block.value().as_deref(),
            Some("(WLAN0) <span fgcolor=\"#00ff00\">192.168.1.20</span>")
        );
        assert_eq!(block.settings().markup, Markup::Pango);
    }

    #[test]
    fn test_offline_when_nothing_is_up() {
        let mut block = NetworkBlock::new(&NetworkConfig::default());
        block.show(&[]);
        assert_eq!(
            block.value().as_deref(),
            Some("<span fgcolor=\"#ff0000\"> OFFLINE</span>")
        );
    }

    #[test]
    fn test_rates_from_counter_deltas() {
        let mut block = NetIoBlock::new(&NetIoConfig::default());
        let t0 = Instant::now();

        block.sample(1_000, 10_000, t0);
        assert_eq!(block.value().as_deref(), Some("0.0B/s   0.0B/s"));

        block.sample(3_000, 30_480, t0 + Duration::from_secs(2));
        assert_eq!(block.value().as_deref(), Some("1.0K/s   10.0K/s"));
    }

    #[test]
    fn test_vanished_counters_reset_rates() {
        let mut block = NetIoBlock::new(&NetIoConfig::default());
        let t0 = Instant::now();
        block.sample(1_000, 1_000, t0);
        block.sample(5_000, 5_000, t0 + Duration::from_secs(1));
        block.sample(0, 0, t0 + Duration::from_secs(2));
        assert_eq!(block.value().as_deref(), Some("0.0B/s   0.0B/s"));

        // Counting restarts from the next sample instead of diffing against stale totals
        block.sample(100, 100, t0 + Duration::from_secs(3));
        assert_eq!(block.value().as_deref(), Some("0.0B/s   0.0B/s"));
    }

    #[test]
    fn test_width_hint() {
        let block = NetIoBlock::new(&NetIoConfig::default());
        assert_eq!(block.width_hint().as_deref(), Some("100.0B/s   100.0B/s"));
    }
}
