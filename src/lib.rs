//! # trafficview
//!
//! The per-device view of an nload-style terminal traffic monitor.
//!
//! Given a device and its current traffic statistics, a [`DeviceView`]
//! lays out incoming and outgoing bar graphs, stat blocks and a big-digit
//! readout of the current rate on any character grid implementing
//! [`Surface`]. Statistics come from a [`StatisticsSource`]; options come
//! from a [`ViewConfig`] passed to every render.
//!
//! ## Example
//!
//! ```rust
//! use std::time::{Duration, SystemTime};
//! use trafficview::{CounterSample, Device, DeviceView, GridSurface, ViewConfig};
//!
//! let device = Device::new("eth0", Duration::from_secs(300)).with_address("192.168.1.20");
//! let start = SystemTime::now();
//! device.record(CounterSample::at(start, 0, 0));
//! device.record(CounterSample::at(start + Duration::from_secs(1), 2_500_000, 400_000));
//!
//! let mut view = DeviceView::new(&device);
//! view.set_total_devices(1);
//! view.update();
//!
//! let mut surface = GridSurface::new(100, 40);
//! view.render(&mut surface, &ViewConfig::default());
//!
//! assert_eq!(surface.row_text(0), "Device eth0 [192.168.1.20] (1/1):");
//! assert!(surface.contains("Avg: 20 Mbit/s"));
//! ```

pub mod config;
pub mod device;
pub mod error;
pub mod format;
pub mod glyph;
pub mod graph;
pub mod stats;
pub mod surface;
pub mod tui;
pub mod units;
pub mod view;

pub use config::{LayoutParams, ViewConfig};
pub use device::{CounterSample, Device, StatisticsSource, TrafficSnapshot};
pub use error::{Result, ViewError};
pub use graph::{round_up_scale, BarGraph};
pub use surface::{BufferSurface, GridSurface, Surface};
pub use units::DataUnit;
pub use view::DeviceView;
