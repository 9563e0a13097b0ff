use criterion::{criterion_group, criterion_main, Criterion};
use evalgrid_core::report::{ReportTable, RowEntity, ValueLookup};
use evalgrid_core::{Quarter, ScoreGrid, Selection};
use evalgrid_protocol::{Metric, ScoreEntry};
use std::hint::black_box;

fn entries(departments: i64, metrics: i64) -> Vec<ScoreEntry> {
    let mut out = Vec::with_capacity((departments * metrics) as usize);
    for d in 1..=departments {
        for m in 1..=metrics {
            out.push(ScoreEntry::new(d, m, (d * m) as f64 % 10.0));
        }
    }
    out
}

fn bench_grid_load(c: &mut Criterion) {
    let records = entries(60, 30);
    let selection = Selection::new(1, 2025, Quarter::Q1);
    c.bench_function("grid_load_1800_cells", |b| {
        b.iter(|| ScoreGrid::load(selection, black_box(&records)))
    });
}

fn bench_report_build(c: &mut Criterion) {
    let mut lookup = ValueLookup::default();
    for e in entries(60, 30) {
        lookup.insert(e.department.id, e.metric.id, e.score);
    }
    let rows: Vec<RowEntity> = (1..=60)
        .map(|id| RowEntity {
            id,
            name: format!("Department {id}"),
        })
        .collect();
    let metrics: Vec<Metric> = (1..=30)
        .map(|id| Metric {
            metric_id: id,
            metric_number: Some(id),
            ..Metric::default()
        })
        .collect();

    c.bench_function("report_build_60x30", |b| {
        b.iter(|| ReportTable::build(black_box(&rows), black_box(&metrics), black_box(&lookup)))
    });
}

criterion_group!(benches, bench_grid_load, bench_report_build);
criterion_main!(benches);
