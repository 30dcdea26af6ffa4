use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;
use twab_state::{Account, PeriodConfig};

const CAPACITY: usize = 4_096;

/// Ring that has wrapped twice, one write per period
fn wrapped_account(config: &PeriodConfig) -> Account<CAPACITY> {
    let mut account = Account::<CAPACITY>::new();
    for i in 0..(2 * CAPACITY as u64 + 17) {
        account.increase(config, 0, u128::from(1 + i % 7), config.period_start(i + 1));
    }
    account
}

/// Benchmark both bisections against the live window of a full ring
fn bench_searches(c: &mut Criterion) {
    let config = PeriodConfig::new(3_600, 0).expect("valid period config");
    let account = wrapped_account(&config);
    let oldest = account.oldest().1.timestamp;
    let newest = account.newest().1.timestamp;
    let probes: Vec<u64> = (0..64)
        .map(|i| oldest + (newest - oldest) / 64 * i + 1_800)
        .collect();

    let mut group = c.benchmark_group("observation_search");
    group.throughput(Throughput::Elements(probes.len() as u64));
    group.bench_function("previous_or_at", |b| {
        b.iter(|| {
            for t in &probes {
                black_box(account.previous_or_at(black_box(*t)));
            }
        })
    });
    group.bench_function("next_or_newest", |b| {
        b.iter(|| {
            for t in &probes {
                black_box(account.next_or_newest(black_box(*t)));
            }
        })
    });
    group.finish();
}

/// Benchmark interval averages of growing width
fn bench_average_between(c: &mut Criterion) {
    let config = PeriodConfig::new(3_600, 0).expect("valid period config");
    let account = wrapped_account(&config);
    let newest = account.newest().1.timestamp;

    let mut group = c.benchmark_group("average_between");
    for periods in [1u64, 24, 720].iter() {
        group.bench_with_input(BenchmarkId::new("periods", periods), periods, |b, &periods| {
            let start = newest - periods * config.period_length;
            b.iter(|| account.average_between(black_box(start), black_box(newest)));
        });
    }
    group.finish();
}

/// Benchmark the write path when every call lands in a new period
fn bench_increase(c: &mut Criterion) {
    let config = PeriodConfig::new(3_600, 0).expect("valid period config");

    c.bench_function("increase_new_period", |b| {
        let mut account = Account::<CAPACITY>::new();
        let mut period = 1;
        b.iter(|| {
            period += 1;
            account.increase(&config, 1, 1, config.period_start(period))
        });
    });
}

criterion_group!(benches, bench_searches, bench_average_between, bench_increase);
criterion_main!(benches);
