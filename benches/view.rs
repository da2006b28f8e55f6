use std::collections::HashMap;

use alloy::primitives::{Address, U256};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use perch::positions::aggregator::derive_view;
use perch::positions::balances::BalanceSnapshot;
use perch::positions::liquidity::liquidity_token;
use perch::positions::pair::TokenPair;
use perch::positions::reserves::{PairReserves, ReserveBook, ReserveEntry};
use perch::positions::token::TokenId;

/// Generate a new random token address
fn generate_random_address() -> Address {
    let mut bytes = [0u8; 20];
    for byte in &mut bytes {
        *byte = fastrand::u8(..);
    }
    Address::from(bytes)
}

/// Generate a synthetic watchlist for benchmarking
fn generate_watchlist(pair_count: usize) -> Vec<TokenPair> {
    (0..pair_count)
        .map(|_| loop {
            let a = TokenId::new(generate_random_address());
            let b = TokenId::new(generate_random_address());
            if let Ok(pair) = TokenPair::new(a, b) {
                return pair;
            }
        })
        .collect()
}

/// Generate balance and reserve snapshots: every other pair funded and
/// resolved, the rest at zero
fn generate_inputs(pairs: &[TokenPair]) -> (BalanceSnapshot, ReserveBook) {
    let mut balances = HashMap::new();
    let mut reserves = ReserveBook::default();

    for (i, pair) in pairs.iter().enumerate() {
        let funded = i % 2 == 0;
        let balance = if funded {
            U256::from(1_000_000u64)
        } else {
            U256::ZERO
        };
        balances.insert(liquidity_token(pair), balance);

        if funded {
            reserves.record(
                *pair,
                ReserveEntry::Ready(PairReserves {
                    reserve0: U256::from(fastrand::u64(1_000..1_000_000)),
                    reserve1: U256::from(fastrand::u64(1_000..1_000_000)),
                    total_supply: U256::from(fastrand::u64(1_000..1_000_000)),
                }),
            );
        }
    }

    (BalanceSnapshot::settled(balances), reserves)
}

/// Benchmark the full derivation pipeline over growing watchlists
fn bench_derive_view(c: &mut Criterion) {
    let mut group = c.benchmark_group("derive_view");
    let account = Some(generate_random_address());

    for pair_count in [10usize, 100, 1_000] {
        let pairs = generate_watchlist(pair_count);
        let (balances, reserves) = generate_inputs(&pairs);

        group.throughput(criterion::Throughput::Elements(pair_count as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(pair_count),
            &pair_count,
            |b, _| b.iter(|| black_box(derive_view(account, &pairs, &balances, &reserves))),
        );
    }

    group.finish();
}

/// Benchmark the CREATE2 liquidity-token derivation on its own
fn bench_liquidity_token(c: &mut Criterion) {
    let pairs = generate_watchlist(100);
    let mut index = 0usize;

    c.bench_function("liquidity_token", |b| {
        b.iter(|| {
            index = (index + 1) % pairs.len();
            black_box(liquidity_token(&pairs[index]))
        })
    });
}

criterion_group!(benches, bench_derive_view, bench_liquidity_token);
criterion_main!(benches);
