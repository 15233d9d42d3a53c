//! Builds a tree from random intervals, runs containment queries against it
//! and against a linear scan, and checks both agree.

use std::time::Instant;

use rand::{rngs::StdRng, Rng, SeedableRng};
use rb_interval_tree::{Interval, IntervalTree};

const INTERVALS: usize = 10_000;
const QUERIES: usize = INTERVALS / 2;
const VALUE_LIMIT: u32 = 100_000;
const LENGTH_LIMIT: u32 = 1000;

fn random_interval(rng: &mut StdRng) -> Interval<u32> {
    let low = rng.gen_range(0..VALUE_LIMIT);
    let high = rng.gen_range(low..low + LENGTH_LIMIT).min(VALUE_LIMIT + 1);
    Interval::new(low, high).expect("high is drawn at or above low")
}

fn main() {
    // fixed seed: identical data and tree on every run
    let mut rng = StdRng::seed_from_u64(0);
    let intervals: Vec<_> = (0..INTERVALS).map(|_| random_interval(&mut rng)).collect();
    let queries: Vec<_> = (0..QUERIES).map(|_| random_interval(&mut rng)).collect();

    let t0 = Instant::now();
    let brute_force: Vec<usize> = queries
        .iter()
        .map(|q| intervals.iter().filter(|i| i.is_contained_in(q)).count())
        .collect();
    println!("brute force:\t{}ms", t0.elapsed().as_millis());

    let t0 = Instant::now();
    let tree: IntervalTree<u32, bool> = intervals.iter().cloned().map(|i| (i, true)).collect();
    println!("building interval tree:\t{}ms", t0.elapsed().as_millis());

    let t0 = Instant::now();
    let tree_counts: Vec<usize> = queries.iter().map(|q| tree.contained_in(q).len()).collect();
    println!("using interval tree:\t{}ms", t0.elapsed().as_millis());

    assert_eq!(brute_force, tree_counts);
    println!(
        "{} queries agree, tree height {} for {} intervals",
        queries.len(),
        tree.height(),
        tree.len()
    );
}
