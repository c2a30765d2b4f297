use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use std::time::{Duration, SystemTime};
use trafficview::{glyph, CounterSample, Device, DeviceView, GridSurface, ViewConfig};

fn busy_device() -> Device {
    let device = Device::new("eth0", Duration::from_secs(300)).with_address("192.168.0.10");
    let start = SystemTime::UNIX_EPOCH;
    for secs in 0..120u64 {
        let bytes = secs * secs * 40_000;
        device.record(CounterSample::at(
            start + Duration::from_secs(secs),
            bytes,
            bytes / 3,
        ));
    }
    device
}

fn benchmark_full_view(c: &mut Criterion) {
    let device = busy_device();
    let mut view = DeviceView::new(&device);
    view.set_total_devices(1);
    for _ in 0..200 {
        view.update();
    }
    let config = ViewConfig::default();

    c.bench_function("render_full_view_200x60", |b| {
        let mut surface = GridSurface::new(200, 60);
        b.iter(|| {
            surface.clear();
            view.render(black_box(&mut surface), &config);
        });
    });
}

fn benchmark_combined_view(c: &mut Criterion) {
    let device = busy_device();
    let mut view = DeviceView::new(&device);
    let config = ViewConfig {
        multiple_devices: true,
        ..ViewConfig::default()
    };

    c.bench_function("render_combined_view_80x24", |b| {
        let mut surface = GridSurface::new(80, 24);
        b.iter(|| {
            surface.clear();
            view.render(black_box(&mut surface), &config);
        });
    });
}

fn benchmark_big_digits(c: &mut Criterion) {
    c.bench_function("glyph_render_rows", |b| {
        b.iter(|| glyph::render_rows(black_box("12.3")));
    });
}

criterion_group!(
    benches,
    benchmark_full_view,
    benchmark_combined_view,
    benchmark_big_digits
);
criterion_main!(benches);
