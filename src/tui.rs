use crate::{
    config::ViewConfig, device::StatisticsSource, surface::BufferSurface, view::DeviceView,
};
use ratatui::{layout::Rect, Frame};

/// Renders `view` into `area` of a ratatui frame.
pub fn draw_device_view<D: StatisticsSource>(
    f: &mut Frame,
    area: Rect,
    view: &mut DeviceView<D>,
    config: &ViewConfig,
) {
    let mut surface = BufferSurface::new(f.buffer_mut(), area);
    view.render(&mut surface, config);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{CounterSample, Device};
    use ratatui::{backend::TestBackend, Terminal};
    use std::time::{Duration, SystemTime};

    fn row(terminal: &Terminal<TestBackend>, y: u16) -> String {
        let buffer = terminal.backend().buffer();
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol().to_string())
            .collect::<String>()
            .trim_end()
            .to_string()
    }

    #[test]
    fn draws_into_terminal_frame() {
        let device = Device::new("eth0", Duration::from_secs(60));
        let start = SystemTime::now();
        device.record(CounterSample::at(start, 0, 0));
        device.record(CounterSample::at(start + Duration::from_secs(1), 1_000_000, 0));

        let mut view = DeviceView::new(&device);
        view.set_total_devices(1);
        view.update();

        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        let config = ViewConfig::default();
        terminal
            .draw(|f| {
                let area = f.area();
                draw_device_view(f, area, &mut view, &config);
            })
            .unwrap();

        assert_eq!(row(&terminal, 0), "Device eth0 (1/1):");
        assert_eq!(row(&terminal, 1), "=".repeat(80));
        assert!(row(&terminal, 2).starts_with("Incoming (100% @ 8.38 Mbit/s):"));
    }
}
