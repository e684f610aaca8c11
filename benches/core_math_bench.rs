use criterion::{Criterion, criterion_group, criterion_main};
use horizon_grid::api::{GridConfig, RenderSelection, build_grid_scene};
use horizon_grid::core::{Pollutant, RawRow, SeriesIndex, Viewport};
use std::hint::black_box;

const AREAS: [&str; 5] = [
    "1, Jong-ro, Jongno-gu, Seoul, Republic of Korea",
    "2, Sejong-daero, Jung-gu, Seoul, Republic of Korea",
    "3, Hangang-daero, Yongsan-gu, Seoul, Republic of Korea",
    "4, Wangsimni-ro, Seongdong-gu, Seoul, Republic of Korea",
    "5, Achasan-ro, Gwangjin-gu, Seoul, Republic of Korea",
];

fn synthetic_rows() -> Vec<RawRow> {
    let mut rows = Vec::with_capacity(AREAS.len() * 365 * 4);
    for (area_idx, address) in AREAS.iter().enumerate() {
        for day in 0..365u32 {
            let month = day / 31 + 1;
            let day_of_month = day % 28 + 1;
            for hour in [0, 6, 12, 18] {
                let wave = ((day as f64 + area_idx as f64) * 0.11).sin();
                rows.push(
                    RawRow::new(
                        *address,
                        format!("2019-{month:02}-{day_of_month:02} {hour:02}:00"),
                    )
                    .with_value(Pollutant::So2, format!("{:.4}", 0.004 + 0.002 * wave))
                    .with_value(Pollutant::No2, format!("{:.4}", 0.03 + 0.01 * wave))
                    .with_value(Pollutant::O3, format!("{:.4}", 0.02 - 0.01 * wave))
                    .with_value(Pollutant::Co, format!("{:.2}", 0.5 + 0.2 * wave))
                    .with_value(Pollutant::Pm10, format!("{:.1}", 40.0 + 20.0 * wave))
                    .with_value(Pollutant::Pm25, format!("{:.1}", 25.0 + 12.0 * wave)),
                );
            }
        }
    }
    rows
}

fn bench_series_index_build(c: &mut Criterion) {
    let rows = synthetic_rows();

    c.bench_function("series_index_build_7k_rows", |b| {
        b.iter(|| {
            let index = SeriesIndex::build(black_box(&rows));
            black_box(index.len());
        })
    });
}

fn bench_grid_scene_all_pollutants(c: &mut Criterion) {
    let index = SeriesIndex::build(&synthetic_rows());
    let selection = RenderSelection::new("2019").with_band_count(5);
    let config = GridConfig::new(Viewport::new(4000, 2000));

    c.bench_function("grid_scene_5x6_cells", |b| {
        b.iter(|| {
            let scene = build_grid_scene(black_box(&index), black_box(&selection), &config)
                .expect("scene build should succeed");
            black_box(scene.band_drawable_count());
        })
    });
}

fn bench_band_compositing(c: &mut Criterion) {
    let index = SeriesIndex::build(&synthetic_rows());
    let selection = RenderSelection::new("2019")
        .with_pollutants([Pollutant::Pm10])
        .with_band_count(8);
    let config = GridConfig::new(Viewport::new(4000, 2000));
    let scene = build_grid_scene(&index, &selection, &config).expect("scene");

    c.bench_function("cpu_band_compositing_pm10", |b| {
        b.iter(|| {
            for cell in &scene.cells {
                black_box(cell.horizon.composited());
            }
        })
    });
}

criterion_group!(
    benches,
    bench_series_index_build,
    bench_grid_scene_all_pollutants,
    bench_band_compositing
);
criterion_main!(benches);
