//! Shared sysinfo caches
//!
//! sysinfo discovery is expensive, so memory, network and sensor data come
//! from one process-wide instance each. Blocks of the same kind refreshing on
//! the same tick reuse a refresh younger than `MIN_REFRESH_INTERVAL`.

use once_cell::sync::Lazy;
use std::net::Ipv4Addr;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};
use sysinfo::{Components, Networks, System};

/// Minimum interval between refreshes of a shared instance
const MIN_REFRESH_INTERVAL: Duration = Duration::from_millis(250);

/// Interfaces that are never reported
const ALWAYS_IGNORED: [&str; 2] = ["lo", "sit0"];

/// A sysinfo instance with its refresh timestamp
struct Cached<T> {
    inner: T,
    last_refresh: Option<Instant>,
}

impl<T> Cached<T> {
    fn new(inner: T) -> Self {
        Self {
            inner,
            last_refresh: None,
        }
    }

    /// Refresh only if enough time has passed since the last refresh
    fn refresh_if_needed(&mut self, refresh: impl FnOnce(&mut T)) -> &T {
        let stale = self
            .last_refresh
            .map_or(true, |last| last.elapsed() >= MIN_REFRESH_INTERVAL);
        if stale {
            refresh(&mut self.inner);
            self.last_refresh = Some(Instant::now());
        }
        &self.inner
    }
}

static SHARED_MEMORY: Lazy<Mutex<Cached<System>>> = Lazy::new(|| {
    log::info!("Creating shared memory sysinfo::System instance");
    Mutex::new(Cached::new(System::new()))
});

static SHARED_NETWORKS: Lazy<Mutex<Cached<Networks>>> = Lazy::new(|| {
    log::info!("Creating shared Networks sysinfo instance");
    Mutex::new(Cached::new(Networks::new_with_refreshed_list()))
});

static SHARED_COMPONENTS: Lazy<Mutex<Cached<Components>>> = Lazy::new(|| {
    let components = Components::new_with_refreshed_list();
    log::info!("Shared temperature sensors initialized: {} components", components.len());
    Mutex::new(Cached::new(components))
});

/// Lock a shared instance, recovering from a poisoned mutex since the data
/// is simply refreshed again
fn lock<T>(mutex: &'static Mutex<T>) -> MutexGuard<'static, T> {
    mutex.lock().unwrap_or_else(|poisoned| {
        log::warn!("Shared sysinfo mutex was poisoned, recovering");
        poisoned.into_inner()
    })
}

/// Memory and swap figures in bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryReading {
    pub available_memory: u64,
    pub free_swap: u64,
}

pub fn memory() -> MemoryReading {
    let mut cached = lock(&SHARED_MEMORY);
    let system = cached.refresh_if_needed(System::refresh_memory);
    MemoryReading {
        available_memory: system.available_memory(),
        free_swap: system.free_swap(),
    }
}

/// One active network interface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interface {
    pub name: String,
    pub address: Ipv4Addr,
    pub total_received: u64,
    pub total_transmitted: u64,
}

/// Interfaces that are up, not loopback and have an IPv4 address, sorted by
/// name
pub fn active_interfaces(ignore: &[String]) -> Vec<Interface> {
    let mut cached = lock(&SHARED_NETWORKS);
    let networks = cached.refresh_if_needed(|networks| networks.refresh_list());

    let mut active: Vec<Interface> = networks
        .iter()
        .filter(|(name, _)| {
            !ALWAYS_IGNORED.contains(&name.as_str()) && !ignore.iter().any(|i| i == *name)
        })
        .filter(|(name, _)| is_up(name))
        .filter_map(|(name, data)| {
            let address = data.ip_networks().iter().find_map(|net| match net.addr {
                std::net::IpAddr::V4(addr) if !addr.is_loopback() => Some(addr),
                _ => None,
            })?;
            Some(Interface {
                name: name.clone(),
                address,
                total_received: data.total_received(),
                total_transmitted: data.total_transmitted(),
            })
        })
        .collect();

    active.sort_by(|a, b| a.name.cmp(&b.name));
    active
}

/// Link state from sysfs. Interfaces without one (non-Linux, unusual drivers)
/// count as up.
fn is_up(name: &str) -> bool {
    match std::fs::read_to_string(format!("/sys/class/net/{}/operstate", name)) {
        Ok(state) => !matches!(state.trim(), "down" | "lowerlayerdown" | "notpresent"),
        Err(_) => true,
    }
}

/// Current reading of the sensor with the given label
pub fn temperature(label: &str) -> Option<f32> {
    let mut cached = lock(&SHARED_COMPONENTS);
    let components = cached.refresh_if_needed(Components::refresh);
    components
        .iter()
        .find(|c| c.label() == label)
        .map(|c| c.temperature())
}

/// Labels of every known sensor, for error messages
pub fn sensor_labels() -> Vec<String> {
    let cached = lock(&SHARED_COMPONENTS);
    cached.inner.iter().map(|c| c.label().to_string()).collect()
}

/// Force discovery of the shared sensors
///
/// Call this at startup so the first temperature refresh doesn't pay for it.
pub fn initialize() {
    let _ = &*SHARED_COMPONENTS;
}
