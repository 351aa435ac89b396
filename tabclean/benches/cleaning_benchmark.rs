use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use polars::prelude::*;
use std::hint::black_box;
use tabclean::transformations::{
    cast_to_integer, coerce_numeric, drop_fully_empty_rows, fill_missing_with_median,
    missing_value_report, round_columns,
};
use tabclean::Table;

fn sample_table(rows: usize) -> Table {
    let scores: Vec<Option<f64>> = (0..rows)
        .map(|i| (i % 7 != 0).then(|| i as f64 * 1.375))
        .collect();
    let raw: Vec<String> = (0..rows)
        .map(|i| {
            if i % 11 == 0 {
                "n/a".to_string()
            } else {
                format!("{}.5", i)
            }
        })
        .collect();
    let frame = df!("score" => scores, "raw" => raw).expect("columns have equal length");
    Table::from_frame(frame).expect("column names are unique")
}

fn bench_numeric_columns(c: &mut Criterion) {
    let mut group = c.benchmark_group("numeric_columns");

    for rows in [100usize, 10_000] {
        let table = sample_table(rows);
        let filled = fill_missing_with_median(&table, &["score"]).expect("score is numeric");

        group.bench_with_input(BenchmarkId::new("round_columns", rows), &table, |b, t| {
            b.iter(|| round_columns(black_box(t), &["score"]));
        });
        group.bench_with_input(BenchmarkId::new("coerce_numeric", rows), &table, |b, t| {
            b.iter(|| coerce_numeric(black_box(t), &["raw"]));
        });
        group.bench_with_input(BenchmarkId::new("fill_median", rows), &table, |b, t| {
            b.iter(|| fill_missing_with_median(black_box(t), &["score"]));
        });
        group.bench_with_input(BenchmarkId::new("cast_to_integer", rows), &filled, |b, t| {
            b.iter(|| cast_to_integer(black_box(t), &["score"]));
        });
    }

    group.finish();
}

fn bench_row_scans(c: &mut Criterion) {
    let mut group = c.benchmark_group("row_scans");

    let table = sample_table(10_000);
    group.bench_function("drop_fully_empty_rows", |b| {
        b.iter(|| drop_fully_empty_rows(black_box(&table)));
    });
    group.bench_function("missing_value_report", |b| {
        b.iter(|| missing_value_report(black_box(&table)));
    });

    group.finish();
}

criterion_group!(benches, bench_numeric_columns, bench_row_scans);
criterion_main!(benches);
