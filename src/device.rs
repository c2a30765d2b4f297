use crate::stats::TrafficStatistics;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::{Duration, SystemTime};

/// Raw interface counters read at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterSample {
    pub timestamp: SystemTime,
    pub bytes_in: u64,
    pub bytes_out: u64,
}

impl CounterSample {
    pub fn new(bytes_in: u64, bytes_out: u64) -> Self {
        Self {
            timestamp: SystemTime::now(),
            bytes_in,
            bytes_out,
        }
    }

    pub fn at(timestamp: SystemTime, bytes_in: u64, bytes_out: u64) -> Self {
        Self {
            timestamp,
            bytes_in,
            bytes_out,
        }
    }
}

/// Point-in-time rates (bytes/s) and totals (bytes) for one device.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrafficSnapshot {
    pub current_in: u64,
    pub current_out: u64,
    pub avg_in: u64,
    pub avg_out: u64,
    pub min_in: u64,
    pub min_out: u64,
    pub max_in: u64,
    pub max_out: u64,
    pub total_in: u64,
    pub total_out: u64,
}

/// Anything a device view can read traffic figures from.
pub trait StatisticsSource {
    fn exists(&self) -> bool;
    fn name(&self) -> &str;
    fn address(&self) -> Option<&str>;
    fn snapshot(&self) -> TrafficSnapshot;
}

impl<T: StatisticsSource + ?Sized> StatisticsSource for &T {
    fn exists(&self) -> bool {
        (**self).exists()
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn address(&self) -> Option<&str> {
        (**self).address()
    }

    fn snapshot(&self) -> TrafficSnapshot {
        (**self).snapshot()
    }
}

impl<T: StatisticsSource + ?Sized> StatisticsSource for Rc<T> {
    fn exists(&self) -> bool {
        (**self).exists()
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn address(&self) -> Option<&str> {
        (**self).address()
    }

    fn snapshot(&self) -> TrafficSnapshot {
        (**self).snapshot()
    }
}

/// A monitored interface backed by [`TrafficStatistics`].
///
/// Updates go through `&self` so the device list can keep feeding counters
/// while views hold shared references to it.
#[derive(Debug)]
pub struct Device {
    name: String,
    address: Option<String>,
    exists: Cell<bool>,
    stats: RefCell<TrafficStatistics>,
}

impl Device {
    pub fn new(name: impl Into<String>, average_window: Duration) -> Self {
        Self {
            name: name.into(),
            address: None,
            exists: Cell::new(false),
            stats: RefCell::new(TrafficStatistics::new(average_window)),
        }
    }

    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn record(&self, sample: CounterSample) {
        self.exists.set(true);
        self.stats.borrow_mut().add_sample(sample);
    }

    /// The interface vanished. Its counters restart if it comes back.
    pub fn mark_missing(&self) {
        if self.exists.replace(false) {
            tracing::debug!(device = %self.name, "device disappeared");
        }
        self.stats.borrow_mut().reset();
    }
}

impl StatisticsSource for Device {
    fn exists(&self) -> bool {
        self.exists.get()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    fn snapshot(&self) -> TrafficSnapshot {
        self.stats.borrow().snapshot()
    }
}
