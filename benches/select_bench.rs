use criterion::{black_box, criterion_group, criterion_main, Criterion};
use stationbench::config::BenchConfig;
use stationbench::divider::is_feasible;
use stationbench::select::select_resistors;

fn bench_select_stock(c: &mut Criterion) {
    let config = BenchConfig::default();

    c.bench_function("select_stock_top_10", |b| {
        b.iter(|| {
            select_resistors(
                black_box(&config.vane_table),
                black_box(config.vin),
                black_box(config.target),
                &config.catalog,
                10,
            )
        })
    });
}

fn bench_feasibility(c: &mut Criterion) {
    let config = BenchConfig::default();

    c.bench_function("is_feasible_16_points", |b| {
        b.iter(|| {
            is_feasible(
                black_box(&config.vane_table),
                black_box(config.vin),
                black_box(config.target),
                black_box(47_000.0),
            )
        })
    });
}

criterion_group!(benches, bench_select_stock, bench_feasibility);
criterion_main!(benches);
