use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use augury_oracle::{tally, Ballot, BallotVote, ValidatorPerformance, ValidatorPerformances};
use augury_types::{Dec, Pair, ValAddress};

fn addr(i: usize) -> ValAddress {
    let mut bytes = [0u8; 20];
    bytes[..8].copy_from_slice(&(i as u64).to_be_bytes());
    ValAddress::new(bytes)
}

fn setup(n: usize) -> (Ballot, ValidatorPerformances) {
    let pair: Pair = "BTC:USD".parse().unwrap();
    let mut performances = ValidatorPerformances::new();
    let votes = (0..n)
        .map(|i| {
            let power = 100 + (i as u64 % 17);
            performances.insert(ValidatorPerformance::new(power, addr(i)));
            let rate = Dec::from_u64(1_700 + (i as u64 * 7919) % 50);
            BallotVote::new(pair.clone(), rate, addr(i), power)
        })
        .collect();
    (Ballot::new(votes), performances)
}

fn bench_tally(c: &mut Criterion) {
    let mut group = c.benchmark_group("tally");
    for n in [10usize, 100, 1_000] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter_batched(
                || setup(n),
                |(mut ballot, mut performances)| {
                    tally(
                        black_box(&mut ballot),
                        Dec::from_raw(20_000_000_000_000_000),
                        &mut performances,
                    )
                    .unwrap()
                },
                criterion::BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_weighted_median(c: &mut Criterion) {
    let (mut ballot, _) = setup(1_000);
    ballot.sort();
    c.bench_function("weighted_median_1000", |b| {
        b.iter(|| black_box(&ballot).weighted_median().unwrap())
    });
}

criterion_group!(benches, bench_tally, bench_weighted_median);
criterion_main!(benches);
