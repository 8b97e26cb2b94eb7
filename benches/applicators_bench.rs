//! Benchmark for the formatter combinators.
//!
//! Measures positional application over growing sequences, keyed
//! application over mappings with a fixed formatter set, and first-match
//! selection.

use applicators::prelude::*;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::collections::{BTreeMap, HashMap};
use std::convert::Infallible;
use std::hint::black_box;

fn increment(value: u64) -> Result<u64, Infallible> {
    Ok(value.wrapping_add(1))
}

// =============================================================================
// 1. Positional Combinators
// =============================================================================

fn benchmark_formatter_to_array(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("formatter_to_array");

    for size in [10, 100, 1000] {
        let values: Vec<u64> = (0..size).collect();
        group.bench_with_input(BenchmarkId::new("vec", size), &values, |bencher, values| {
            bencher.iter(|| {
                let result = apply_formatter_to_array(increment, black_box(values.clone()));
                black_box(result)
            });
        });
    }

    group.bench_function("array_8", |bencher| {
        bencher.iter(|| {
            let result = apply_formatter_to_array(increment, black_box([0_u64; 8]));
            black_box(result)
        });
    });

    group.bench_function("tuple_8", |bencher| {
        bencher.iter(|| {
            let result =
                apply_formatter_to_array(increment, black_box((0_u64, 1, 2, 3, 4, 5, 6, 7)));
            black_box(result)
        });
    });

    group.finish();
}

fn benchmark_formatters_to_sequence(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("formatters_to_sequence");

    for size in [10, 100, 1000] {
        let values: Vec<u64> = (0..size).collect();
        let formatters = vec![increment; values.len()];
        group.bench_with_input(BenchmarkId::from_parameter(size), &values, |bencher, values| {
            bencher.iter(|| {
                let result =
                    apply_formatters_to_sequence(formatters.iter(), black_box(values.clone()));
                black_box(result)
            });
        });
    }

    group.finish();
}

fn benchmark_formatter_at_index(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("formatter_at_index");

    for size in [10, 100, 1000] {
        let values: Vec<u64> = (0..size).collect();
        let index = values.len() / 2;
        group.bench_with_input(BenchmarkId::from_parameter(size), &values, |bencher, values| {
            bencher.iter(|| {
                let result = apply_formatter_at_index(increment, index, black_box(values.clone()));
                black_box(result)
            });
        });
    }

    group.finish();
}

// =============================================================================
// 2. Keyed Combinators
// =============================================================================

fn benchmark_formatters_to_dict(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("formatters_to_dict");

    for size in [10_u64, 100, 1000] {
        let mapping: HashMap<String, u64> =
            (0..size).map(|key| (format!("field{key}"), key)).collect();
        let formatters: HashMap<String, fn(u64) -> Result<u64, Infallible>> = (0..size)
            .step_by(2)
            .map(|key| (format!("field{key}"), increment as fn(u64) -> Result<u64, Infallible>))
            .collect();

        group.bench_with_input(BenchmarkId::new("hash_map", size), &mapping, |bencher, mapping| {
            bencher.iter(|| {
                let result = apply_formatters_to_dict(&formatters, black_box(mapping.clone()));
                black_box(result)
            });
        });

        let sorted: BTreeMap<String, u64> = mapping.into_iter().collect();
        group.bench_with_input(BenchmarkId::new("btree_map", size), &sorted, |bencher, sorted| {
            bencher.iter(|| {
                let result = apply_formatters_to_dict(&formatters, black_box(sorted.clone()));
                black_box(result)
            });
        });
    }

    group.finish();
}

fn benchmark_key_map(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("key_map");

    let receipt: HashMap<&str, u64> = [
        ("blockHash", 1),
        ("blockNumber", 2),
        ("contractAddress", 3),
        ("cumulativeGasUsed", 4),
        ("gasUsed", 5),
        ("transactionHash", 6),
        ("transactionIndex", 7),
        ("status", 8),
    ]
    .into_iter()
    .collect();
    let renames = [
        ("blockHash", "block_hash"),
        ("blockNumber", "block_number"),
        ("contractAddress", "contract_address"),
        ("cumulativeGasUsed", "cumulative_gas_used"),
        ("gasUsed", "gas_used"),
        ("transactionHash", "transaction_hash"),
        ("transactionIndex", "transaction_index"),
    ];

    group.bench_function("receipt", |bencher| {
        bencher.iter(|| {
            let result = apply_key_map(&renames, black_box(receipt.clone()));
            black_box(result)
        });
    });

    group.finish();
}

// =============================================================================
// 3. Selection
// =============================================================================

fn benchmark_one_of_formatters(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("one_of_formatters");

    for position in [0_u64, 3, 7] {
        let pairs: Vec<(BoxedCondition<'_, u64>, BoxedFormatter<'_, u64, u64, Infallible>)> = (0..8_u64)
            .map(|candidate| {
                (
                    condition(move |value: &u64| *value == candidate),
                    boxed(increment),
                )
            })
            .collect();

        group.bench_with_input(
            BenchmarkId::from_parameter(position),
            &position,
            |bencher, &position| {
                bencher.iter(|| {
                    let pairs = pairs
                        .iter()
                        .map(|(predicate, formatter)| (predicate, formatter));
                    let result = apply_one_of_formatters(pairs, black_box(position));
                    black_box(result)
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_formatter_to_array,
    benchmark_formatters_to_sequence,
    benchmark_formatter_at_index,
    benchmark_formatters_to_dict,
    benchmark_key_map,
    benchmark_one_of_formatters,
);

criterion_main!(benches);
