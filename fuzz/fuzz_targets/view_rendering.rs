#![no_main]
use libfuzzer_sys::fuzz_target;
use trafficview::{glyph, round_up_scale, DeviceView, GridSurface, Surface, TrafficSnapshot, StatisticsSource};

struct Snapshot(TrafficSnapshot);

impl StatisticsSource for Snapshot {
    fn exists(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        "fuzz0"
    }

    fn address(&self) -> Option<&str> {
        None
    }

    fn snapshot(&self) -> TrafficSnapshot {
        self.0
    }
}

fn word(data: &[u8], index: usize) -> u64 {
    let mut bytes = [0u8; 8];
    for (offset, byte) in bytes.iter_mut().enumerate() {
        *byte = data.get(index * 8 + offset).copied().unwrap_or(0);
    }
    u64::from_le_bytes(bytes)
}

fuzz_target!(|data: &[u8]| {
    if data.len() < 4 {
        return;
    }
    let width = usize::from(data[0]);
    let height = usize::from(data[1]);

    let source = Snapshot(TrafficSnapshot {
        current_in: word(data, 1),
        current_out: word(data, 2),
        avg_in: word(data, 3),
        avg_out: word(data, 4),
        min_in: word(data, 5),
        min_out: word(data, 6),
        max_in: word(data, 7),
        max_out: word(data, 8),
        total_in: word(data, 9),
        total_out: word(data, 10),
    });
    let _ = round_up_scale(source.0.max_in);

    let mut view = DeviceView::new(&source);
    view.update();
    let mut surface = GridSurface::new(width, height);
    view.render(&mut surface, &Default::default());
    for write in surface.writes() {
        assert!(write.col < surface.width() && write.row < surface.height());
    }

    if let Ok(text) = std::str::from_utf8(&data[2..]) {
        let _ = glyph::render_rows(text);
    }
});
