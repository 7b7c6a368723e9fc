//! Benchmarks for dataset generation and CSV export

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use sensor_events::{generate, GeneratorConfig};

fn bench_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("generation");

    // Default config: 24h at 5s, 17_281 samples per sensor
    for sensors in [1u32, 3, 10] {
        let config = GeneratorConfig::new().with_sensors(sensors).with_seed(42);
        let rows = config.grid_len().unwrap_or(0) as u64 * u64::from(sensors);

        group.throughput(Throughput::Elements(rows));
        group.bench_function(format!("generate_24h_{}_sensors", sensors), |b| {
            b.iter(|| black_box(generate(&config).unwrap()))
        });
    }

    group.finish();
}

fn bench_csv_export(c: &mut Criterion) {
    let mut group = c.benchmark_group("csv");

    let config = GeneratorConfig::new().with_sensors(3).with_seed(42);
    let table = generate(&config).unwrap().table;

    group.throughput(Throughput::Elements(table.len() as u64));
    group.bench_function("write_csv_3_sensors", |b| {
        b.iter(|| {
            let mut out = Vec::with_capacity(table.len() * 24);
            table.write_csv(&mut out).unwrap();
            black_box(out)
        })
    });

    group.finish();
}

criterion_group!(benches, bench_generation, bench_csv_export);
criterion_main!(benches);
