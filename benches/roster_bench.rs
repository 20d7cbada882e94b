//! Benchmarks for the roster core and dashboard views
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use tally::presentation::{CurrencyFormat, DashboardView};
use tally::roster::{rank, CommissionPolicy, Roster, RosterStats};

fn create_roster(count: usize) -> Roster {
    let mut roster = Roster::new(CommissionPolicy::default());
    for i in 0..count {
        // Spread sales across the threshold, with plenty of ties
        let sales = ((i * 7_919) % 100) as f64 * 1_000.0;
        roster.add_employee(format!("employee-{}", i), sales);
    }
    roster
}

fn bench_ranking(c: &mut Criterion) {
    let mut group = c.benchmark_group("ranking");

    for size in [100, 1_000, 10_000] {
        let roster = create_roster(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("rank", size), &roster, |b, roster| {
            b.iter(|| rank(black_box(roster.records())))
        });
    }

    group.finish();
}

fn bench_stats(c: &mut Criterion) {
    let mut group = c.benchmark_group("stats");

    for size in [100, 1_000, 10_000] {
        let roster = create_roster(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("compute", size), &roster, |b, roster| {
            b.iter(|| RosterStats::compute(black_box(roster.records())))
        });
    }

    group.finish();
}

fn bench_dashboard(c: &mut Criterion) {
    let mut group = c.benchmark_group("dashboard");
    let currency = CurrencyFormat::default();

    for size in [100, 1_000] {
        let snapshot = create_roster(size).snapshot();

        group.bench_with_input(BenchmarkId::new("build", size), &snapshot, |b, snapshot| {
            b.iter(|| DashboardView::build(black_box(snapshot), &currency))
        });
    }

    group.finish();
}

fn bench_add(c: &mut Criterion) {
    c.bench_function("add_employee_to_1000", |b| {
        b.iter_batched(
            || create_roster(1_000),
            |mut roster| roster.add_employee("bench", black_box(75_000.0)),
            criterion::BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_ranking, bench_stats, bench_dashboard, bench_add);
criterion_main!(benches);
