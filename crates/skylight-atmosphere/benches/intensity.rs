use criterion::{Criterion, black_box, criterion_group, criterion_main};
use glam::DVec3;
use skylight_atmosphere::*;
use skylight_spectrum::LookupTable;

fn earth() -> Atmosphere {
    let constants = AtmosphereConstants::default();
    let grid = WavelengthGrid::new(&constants, &LookupTable::builtin_ozone().column(0));
    Atmosphere::new(constants, grid)
}

fn bench_intensity_zenith(c: &mut Criterion) {
    let atmosphere = earth();
    let camera = DVec3::new(0.0, 0.0, atmosphere.constants().planet_radius + 100.0);
    let sun = direction_from_lat_lon(60f64.to_radians(), 0.0);
    let settings = IntegratorSettings::default();
    c.bench_function("intensity_zenith", |bencher| {
        bencher.iter(|| {
            black_box(atmosphere.intensity(
                black_box(sun),
                black_box(camera),
                black_box(DVec3::Z),
                &settings,
            ))
        })
    });
}

fn bench_intensity_horizon(c: &mut Criterion) {
    let atmosphere = earth();
    let camera = DVec3::new(0.0, 0.0, atmosphere.constants().planet_radius + 100.0);
    let sun = direction_from_lat_lon(5f64.to_radians(), 0.0);
    let view = direction_from_lat_lon(1f64.to_radians(), 0.4);
    let settings = IntegratorSettings::default();
    c.bench_function("intensity_horizon", |bencher| {
        bencher.iter(|| {
            black_box(atmosphere.intensity(
                black_box(sun),
                black_box(camera),
                black_box(view),
                &settings,
            ))
        })
    });
}

fn bench_intensity_with_ozone(c: &mut Criterion) {
    let atmosphere = earth();
    let camera = DVec3::new(0.0, 0.0, atmosphere.constants().planet_radius + 100.0);
    let sun = direction_from_lat_lon(30f64.to_radians(), 0.0);
    let view = direction_from_lat_lon(20f64.to_radians(), 1.0);
    let settings = IntegratorSettings {
        ozone: true,
        ..IntegratorSettings::default()
    };
    c.bench_function("intensity_ozone", |bencher| {
        bencher.iter(|| {
            black_box(atmosphere.intensity(
                black_box(sun),
                black_box(camera),
                black_box(view),
                &settings,
            ))
        })
    });
}

criterion_group!(
    benches,
    bench_intensity_zenith,
    bench_intensity_horizon,
    bench_intensity_with_ozone
);
criterion_main!(benches);
