//! Drives the device view with two simulated interfaces.
//!
//! Keys: left/right switch device, `c` toggles the combined view, `q` quits.
//! Set `RUST_LOG=trafficview=debug` and redirect stderr to see layout logs.

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::time::{Duration, Instant};
use trafficview::{tui::draw_device_view, CounterSample, Device, DeviceView, ViewConfig};

// wlan0 drops out for this many ticks out of every 60
const OUTAGE_TICKS: u64 = 15;

struct Simulator {
    tick: u64,
    counters: Vec<(u64, u64)>,
}

impl Simulator {
    fn new(devices: usize) -> Self {
        Self {
            tick: 0,
            counters: vec![(0, 0); devices],
        }
    }

    fn step(&mut self, devices: &[Device], interval: Duration) {
        self.tick += 1;
        let secs = interval.as_secs_f64();

        for (index, (device, counters)) in devices.iter().zip(&mut self.counters).enumerate() {
            if index == 1 && self.tick % 60 >= 60 - OUTAGE_TICKS {
                device.mark_missing();
                *counters = (0, 0);
                continue;
            }

            let phase = self.tick as f64 / 8.0 + index as f64;
            let rate_in = 2_000_000.0 * (1.2 + phase.sin()) / (index + 1) as f64;
            let rate_out = 300_000.0 * (1.1 + (phase / 3.0).cos());
            counters.0 += (rate_in * secs) as u64;
            counters.1 += (rate_out * secs) as u64;
            device.record(CounterSample::new(counters.0, counters.1));
        }
    }
}

fn init_logging() {
    if std::env::var_os("RUST_LOG").is_some() {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .compact()
            .init();
    }
}

fn main() -> Result<()> {
    init_logging();

    let mut config = ViewConfig::load().unwrap_or_else(|e| {
        tracing::warn!("falling back to default settings: {e}");
        ViewConfig::default()
    });
    let window = Duration::from_secs(u64::from(config.average_window));
    let devices = vec![
        Device::new("eth0", window).with_address("192.168.1.20"),
        Device::new("wlan0", window),
    ];

    let mut views: Vec<DeviceView<&Device>> = devices.iter().map(DeviceView::new).collect();
    let total = views.len();
    for (number, view) in views.iter_mut().enumerate() {
        view.set_device_number(number);
        view.set_total_devices(total);
    }

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = run(&mut terminal, &devices, &mut views, &mut config);

    disable_raw_mode()?;
    execute!(std::io::stdout(), LeaveAlternateScreen)?;
    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    devices: &[Device],
    views: &mut [DeviceView<&Device>],
    config: &mut ViewConfig,
) -> Result<()> {
    let interval = Duration::from_millis(config.refresh_interval);
    let mut simulator = Simulator::new(devices.len());
    let mut current = 0;
    let mut last_tick = Instant::now()
        .checked_sub(interval)
        .unwrap_or_else(Instant::now);

    loop {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Right => current = (current + 1) % views.len(),
                    KeyCode::Left => current = (current + views.len() - 1) % views.len(),
                    KeyCode::Char('c') => config.multiple_devices = !config.multiple_devices,
                    _ => {}
                }
            }
        }

        if last_tick.elapsed() >= interval {
            simulator.step(devices, interval);
            for view in views.iter_mut() {
                view.update();
            }
            last_tick = Instant::now();
        }

        terminal.draw(|f| {
            let area = f.area();
            draw_device_view(f, area, &mut views[current], config);
        })?;
    }
}
