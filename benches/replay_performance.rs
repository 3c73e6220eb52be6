use criterion::{Criterion, black_box, criterion_group, criterion_main};
use race_replay::track::ReferenceLap;
use race_replay::weather::WeatherTable;
use race_replay::{build_track_from_example_lap, build_weather_snapshot, resample_weather};

fn create_reference_lap(points: usize) -> ReferenceLap {
    let (x, y) = (0..points)
        .map(|i| {
            let angle = i as f64 / points as f64 * std::f64::consts::TAU;
            (3000. * angle.cos(), 1800. * angle.sin())
        })
        .unzip();
    ReferenceLap { x, y }
}

fn create_weather_table(samples: usize) -> WeatherTable {
    let time = (0..samples).map(|i| i as f64 * 60.).collect::<Vec<_>>();
    WeatherTable {
        track_temp: Some(time.iter().map(|t| 35. + (t / 600.).sin()).collect()),
        air_temp: Some(time.iter().map(|t| 22. + (t / 900.).cos()).collect()),
        humidity: Some(vec![55.; samples]),
        wind_speed: Some(vec![2.5; samples]),
        wind_direction: Some(time.iter().map(|t| t % 360.).collect()),
        rainfall: Some((0..samples).map(|i| i % 7 == 0).collect()),
        time,
    }
}

fn bench_track_geometry(c: &mut Criterion) {
    let mut group = c.benchmark_group("track_geometry");

    let lap = create_reference_lap(800);
    group.bench_function("build_track_800_points", |b| {
        b.iter(|| black_box(build_track_from_example_lap(&lap, 200.)));
    });

    group.finish();
}

fn bench_weather(c: &mut Criterion) {
    let mut group = c.benchmark_group("weather");

    let table = create_weather_table(120);
    // two hours at 25 fps
    let timeline = (0..180_000).map(|i| i as f64 / 25.).collect::<Vec<_>>();

    group.bench_function("resample_two_hours", |b| {
        b.iter(|| black_box(resample_weather(Some(&table), &timeline, 0.)));
    });

    let resampled = resample_weather(Some(&table), &timeline, 0.);
    group.bench_function("snapshot", |b| {
        b.iter(|| black_box(build_weather_snapshot(resampled.as_ref(), 90_000)));
    });

    group.finish();
}

criterion_group!(benches, bench_track_geometry, bench_weather);
criterion_main!(benches);
