//! Randomized equivalence tests against an exact hash-based reference tally.

use std::collections::HashMap;

use cardinality_counter::reader::count_values_parallel;
use cardinality_counter::{CardinalityCounter, Counts};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

const DOMAIN: u64 = 1 << 20;

fn reference_counts(values: &[u32]) -> Counts {
    let mut tally: HashMap<u32, u64> = HashMap::new();
    for &v in values {
        *tally.entry(v).or_default() += 1;
    }
    Counts {
        distinct: tally.len() as u64,
        unique: tally.values().filter(|&&n| n == 1).count() as u64,
    }
}

fn count(values: &[u32]) -> Counts {
    let mut counter = CardinalityCounter::with_domain(DOMAIN).unwrap();
    for &v in values {
        counter.observe(v).unwrap();
    }
    counter.finalize()
}

fn random_values(rng: &mut StdRng, len: usize, value_range: u32) -> Vec<u32> {
    (0..len).map(|_| rng.gen_range(0..value_range)).collect()
}

#[test]
fn test_matches_reference_tally() {
    let mut rng = StdRng::seed_from_u64(42);

    // vary stream length and value density so all three states are exercised:
    // sparse streams stay mostly "seen once", dense ones saturate to "seen >= 2"
    for (len, value_range) in [
        (0, 1),
        (1, 1),
        (100, 1 << 16),
        (1_000, 500),
        (10_000, 1 << 19),
        (50_000, 1_000),
    ] {
        let values = random_values(&mut rng, len, value_range);
        assert_eq!(count(&values), reference_counts(&values));
    }
}

#[test]
fn test_order_independence() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut values = random_values(&mut rng, 5_000, 2_000);
    let counts = count(&values);

    for _ in 0..4 {
        values.shuffle(&mut rng);
        assert_eq!(count(&values), counts);
    }
}

#[test]
fn test_parallel_matches_sequential() {
    let mut rng = StdRng::seed_from_u64(1234);
    let values = random_values(&mut rng, 20_000, 3_000);

    let sequential = count(&values);
    for chunk_len in [1, 64, 1024, values.len()] {
        let parallel = count_values_parallel(&values, DOMAIN, chunk_len).unwrap();
        assert_eq!(parallel, sequential);
    }
}

#[test]
fn test_sharded_merge_matches_single_counter() {
    let mut rng = StdRng::seed_from_u64(99);
    let values = random_values(&mut rng, 8_000, 1_500);

    let mut merged: Option<CardinalityCounter> = None;
    for shard in values.chunks(1_000) {
        let mut counter = CardinalityCounter::with_domain(DOMAIN).unwrap();
        for &v in shard {
            counter.observe(v).unwrap();
        }
        match merged.as_mut() {
            Some(acc) => acc.merge(&counter).unwrap(),
            None => merged = Some(counter),
        }
    }

    assert_eq!(merged.unwrap().finalize(), count(&values));
}
