use std::collections::HashSet;

use proptest::collection::vec;
use proptest::prelude::*;
use rand::seq::SliceRandom;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::index::{IndexType, NodeIndex};
use crate::node::{Color, Node};

use super::*;

struct IntervalGenerator {
    rng: StdRng,
    unique: HashSet<Interval<i32>>,
    limit: i32,
}

impl IntervalGenerator {
    fn new(seed: [u8; 32]) -> Self {
        const LIMIT: i32 = 1000;
        Self {
            rng: SeedableRng::from_seed(seed),
            unique: HashSet::new(),
            limit: LIMIT,
        }
    }

    fn next(&mut self) -> Interval<i32> {
        let low = self.rng.gen_range(0..self.limit);
        let high = self.rng.gen_range(low..self.limit);
        Interval::new(low, high).unwrap()
    }

    fn next_unique(&mut self) -> Interval<i32> {
        let mut interval = self.next();
        while self.unique.contains(&interval) {
            interval = self.next();
        }
        self.unique.insert(interval.clone());
        interval
    }

    fn next_with_range(&mut self, range: i32) -> Interval<i32> {
        let low = self.rng.gen_range(0..self.limit);
        let high = self.rng.gen_range(low..self.limit.min(low + 1 + range));
        Interval::new(low, high).unwrap()
    }

    fn next_point(&mut self) -> i32 {
        self.rng.gen_range(-1..=self.limit)
    }
}

impl<V, Ix: IndexType> IntervalTree<i32, V, Ix> {
    /// Recompute every subtree max from scratch and compare with the stored one.
    pub(crate) fn check_max(&self) {
        if let Some(root) = self.root {
            let _ignore = self.check_max_inner(root);
        }
    }

    fn check_max_inner(&self, x: NodeIndex<Ix>) -> i32 {
        let mut max = *self.node_ref(x, Node::high);
        for child in [self.node_ref(x, Node::left), self.node_ref(x, Node::right)]
            .into_iter()
            .flatten()
        {
            assert_eq!(self.node_ref(child, Node::parent), Some(x));
            max = max.max(self.check_max_inner(child));
        }
        assert_eq!(self.max(x), &max);
        max
    }

    /// 1. Every node is either red or black.
    /// 2. The root is black.
    /// 3. Every leaf (NIL) is black.
    /// 4. If a node is red, then both its children are black.
    /// 5. For each node, all simple paths from the node to descendant leaves contain the
    ///    same number of black nodes.
    pub(crate) fn check_rb_properties(&self) {
        let Some(root) = self.root else {
            return;
        };
        assert_eq!(self.node_ref(root, Node::color), Color::Black);
        assert_eq!(self.node_ref(root, Node::parent), None);
        self.check_children_color(root);
        let _ignore = self.check_black_height(Some(root));
        // 2 * log2(n + 1)
        let bound = 2.0 * ((self.len() + 1) as f64).log2();
        assert!(self.height() as f64 <= bound);
    }

    fn check_children_color(&self, x: NodeIndex<Ix>) {
        for child in [self.node_ref(x, Node::left), self.node_ref(x, Node::right)]
            .into_iter()
            .flatten()
        {
            if self.node_ref(x, Node::is_red) {
                assert_eq!(self.node_ref(child, Node::color), Color::Black);
            }
            self.check_children_color(child);
        }
    }

    fn check_black_height(&self, x: Option<NodeIndex<Ix>>) -> usize {
        let Some(x) = x else {
            return 0;
        };
        let lefth = self.check_black_height(self.node_ref(x, Node::left));
        let righth = self.check_black_height(self.node_ref(x, Node::right));
        assert_eq!(lefth, righth);
        if self.node_ref(x, Node::is_red) {
            return lefth;
        }
        lefth + 1
    }
}

fn with_tree_and_generator<V>(test_fn: impl Fn(IntervalTree<i32, V>, IntervalGenerator)) {
    let seeds = vec![[0; 32], [1; 32], [2; 32]];
    for seed in seeds {
        let gen = IntervalGenerator::new(seed);
        let tree = IntervalTree::new();
        test_fn(tree, gen);
    }
}

/// Linear scan reference, ordered the way the tree orders results.
fn scan<'a>(
    intervals: &'a [Interval<i32>],
    pred: impl Fn(&Interval<i32>) -> bool,
) -> Vec<(&'a Interval<i32>, usize)> {
    let mut hits: Vec<_> = intervals
        .iter()
        .enumerate()
        .filter(|(_, i)| pred(*i))
        .map(|(v, i)| (i, v))
        .collect();
    hits.sort_by_key(|(i, v)| (*i.low(), *v));
    hits
}

fn owned<'a>(result: Vec<(&'a Interval<i32>, &usize)>) -> Vec<(&'a Interval<i32>, usize)> {
    result.into_iter().map(|(i, v)| (i, *v)).collect()
}

#[test]
fn red_black_tree_properties_is_satisfied() {
    with_tree_and_generator(|mut tree, mut gen| {
        let intervals: Vec<_> = std::iter::repeat_with(|| gen.next_unique())
            .take(1000)
            .collect();
        for i in intervals {
            tree.insert_interval(i, ());
            tree.check_rb_properties();
        }
    });
}

#[test]
fn tree_len_will_update() {
    with_tree_and_generator(|mut tree, mut gen| {
        let intervals: Vec<_> = std::iter::repeat_with(|| gen.next()).take(100).collect();
        for (n, i) in intervals.into_iter().enumerate() {
            assert_eq!(tree.len(), n);
            tree.insert_interval(i, ());
        }
        assert_eq!(tree.len(), 100);
        assert!(!tree.is_empty());
    });
}

#[test]
fn check_max_is_ok() {
    with_tree_and_generator(|mut tree, mut gen| {
        let intervals: Vec<_> = std::iter::repeat_with(|| gen.next()).take(1000).collect();
        for i in intervals {
            tree.insert_interval(i, ());
            tree.check_max();
        }
        assert_eq!(tree.len(), 1000);
    });
}

#[test]
fn sorted_insertion_keeps_balance_and_max() {
    let mut ascending = IntervalTree::new();
    let mut descending = IntervalTree::new();
    for i in 0..2000 {
        ascending.insert(i, i + (i % 7) * 50, ()).unwrap();
        descending.insert(2000 - i, 2000 - i + (i % 5) * 30, ()).unwrap();
    }
    ascending.check_rb_properties();
    ascending.check_max();
    descending.check_rb_properties();
    descending.check_max();
}

#[test]
fn invalid_insert_leaves_tree_untouched() {
    let mut tree = IntervalTree::new();
    tree.insert(1, 4, 0).unwrap();
    tree.insert(2, 3, 1).unwrap();
    let before: Vec<_> = tree.iter().map(|(i, v)| (i.clone(), *v)).collect();
    assert_eq!(tree.insert(5, 4, 2), Err(Error::InvalidInterval));
    let after: Vec<_> = tree.iter().map(|(i, v)| (i.clone(), *v)).collect();
    assert_eq!(before, after);
    assert_eq!(tree.len(), 2);
}

#[test]
fn stabbing_is_ok() {
    with_tree_and_generator(|mut tree, mut gen| {
        let intervals: Vec<_> = std::iter::repeat_with(|| gen.next_with_range(50))
            .take(1000)
            .collect();
        for (v, i) in intervals.iter().enumerate() {
            tree.insert_interval(i.clone(), v);
        }
        for _ in 0..1000 {
            let point = gen.next_point();
            let expect = scan(&intervals, |i| i.contains_point(&point));
            assert_eq!(owned(tree.stabbing(&point)), expect);
        }
    });
}

#[test]
fn overlaps_is_ok() {
    with_tree_and_generator(|mut tree, mut gen| {
        let intervals: Vec<_> = std::iter::repeat_with(|| gen.next_with_range(50))
            .take(1000)
            .collect();
        for (v, i) in intervals.iter().enumerate() {
            tree.insert_interval(i.clone(), v);
        }
        let to_find: Vec<_> = std::iter::repeat_with(|| gen.next()).take(1000).collect();
        for q in to_find {
            let expect = scan(&intervals, |i| i.overlaps(&q));
            let result = tree.overlaps(*q.low(), *q.high()).unwrap();
            assert_eq!(!expect.is_empty(), tree.any_overlap(*q.low(), *q.high()).unwrap());
            assert_eq!(owned(result), expect);
        }
    });
}

#[test]
fn contained_within_is_ok() {
    with_tree_and_generator(|mut tree, mut gen| {
        let intervals: Vec<_> = std::iter::repeat_with(|| gen.next_with_range(100))
            .take(1000)
            .collect();
        for (v, i) in intervals.iter().enumerate() {
            tree.insert_interval(i.clone(), v);
        }
        let to_find: Vec<_> = std::iter::repeat_with(|| gen.next_with_range(300))
            .take(1000)
            .collect();
        for q in to_find {
            let expect = scan(&intervals, |i| i.is_contained_in(&q));
            let result = tree.contained_within(*q.low(), *q.high()).unwrap();
            assert_eq!(owned(result), expect);
        }
    });
}

#[test]
fn repeated_query_is_idempotent() {
    with_tree_and_generator(|mut tree, mut gen| {
        for v in 0..500 {
            tree.insert_interval(gen.next_with_range(80), v);
        }
        for _ in 0..100 {
            let q = gen.next_with_range(200);
            let first = tree.contained_within(*q.low(), *q.high()).unwrap();
            let second = tree.contained_within(*q.low(), *q.high()).unwrap();
            assert_eq!(first, second);
            assert_eq!(tree.overlapping(&q), tree.overlapping(&q));
        }
    });
}

#[test]
fn iterate_through_tree_is_sorted() {
    with_tree_and_generator(|mut tree, mut gen| {
        let intervals: Vec<_> = std::iter::repeat_with(|| gen.next()).take(1000).collect();
        for (v, i) in intervals.iter().enumerate() {
            tree.insert_interval(i.clone(), v);
        }
        let expect = scan(&intervals, |_| true);
        let result: Vec<_> = tree.iter().map(|(i, v)| (i, *v)).collect();
        assert_eq!(result, expect);
    });
}

#[test]
fn concurrent_readers_share_tree() {
    let mut gen = IntervalGenerator::new([3; 32]);
    let intervals: Vec<_> = std::iter::repeat_with(|| gen.next_with_range(40))
        .take(2000)
        .collect();
    let tree: IntervalTree<i32, usize> = intervals.iter().cloned().zip(0..).collect();
    let lock = std::sync::RwLock::new(tree);

    std::thread::scope(|s| {
        for t in 0..4 {
            let lock = &lock;
            let intervals = &intervals;
            let _ = s.spawn(move || {
                let tree = lock.read().unwrap();
                for point in (t..1000).step_by(4) {
                    let expect = scan(intervals, |i| i.contains_point(&point));
                    assert_eq!(owned(tree.stabbing(&point)), expect);
                }
            });
        }
    });

    lock.write().unwrap().insert(5000, 5001, 2000).unwrap();
    assert_eq!(lock.read().unwrap().len(), 2001);
}

#[cfg(feature = "serde")]
#[test]
fn test_serde_interval_tree() {
    use serde_json::{json, Value};

    let mut tree = IntervalTree::<i32, i32>::new();
    tree.insert(1, 5, 10).unwrap();
    tree.insert(3, 7, 20).unwrap();
    tree.insert(2, 6, 15).unwrap();

    let serialized = serde_json::to_string(&tree).unwrap();
    let expected = json!([
        [{"low": 1, "high": 5}, 10],
        [{"low": 2, "high": 6}, 15],
        [{"low": 3, "high": 7}, 20]
    ]);
    let actual: Value = serde_json::from_str(&serialized).unwrap();
    assert_eq!(expected, actual);

    let deserialized: IntervalTree<i32, i32> = serde_json::from_str(&serialized).unwrap();
    deserialized.check_rb_properties();
    deserialized.check_max();
    let dv: Vec<_> = deserialized.iter().collect();
    let ev: Vec<_> = tree.iter().collect();
    assert_eq!(ev, dv);

    let invalid = r#"[[{"low": 9, "high": 1}, 0]]"#;
    assert!(serde_json::from_str::<IntervalTree<i32, i32>>(invalid).is_err());
}

#[cfg(feature = "serde")]
#[test]
fn deserialize_beyond_index_capacity_is_rejected() {
    let entry = |i: usize| format!(r#"[{{"low":{i},"high":{i}}},null]"#);
    let encode = |n: usize| format!("[{}]", (0..n).map(entry).collect::<Vec<_>>().join(","));

    let full = u16::MAX as usize;
    let tree: IntervalTree<i32, (), u16> = serde_json::from_str(&encode(full)).unwrap();
    assert_eq!(tree.len(), full);

    let over = serde_json::from_str::<IntervalTree<i32, (), u16>>(&encode(full + 1));
    let err = over.unwrap_err().to_string();
    assert!(err.contains("too many intervals"));
}

prop_compose! {
    fn arbitrary_interval()(a in -50i32..50, b in -50i32..50) -> Interval<i32> {
        Interval::new(a.min(b), a.max(b)).unwrap()
    }
}

fn build(intervals: &[Interval<i32>]) -> IntervalTree<i32, usize> {
    intervals.iter().cloned().zip(0..).collect()
}

fn as_set(result: Vec<(&Interval<i32>, &usize)>) -> Vec<Interval<i32>> {
    let mut set: Vec<_> = result.into_iter().map(|(i, _)| i.clone()).collect();
    set.sort_unstable();
    set
}

proptest! {
    /// Balance and subtree max hold after every single insertion.
    #[test]
    fn prop_invariants_hold_after_each_insert(intervals in vec(arbitrary_interval(), 0..200)) {
        let mut tree = IntervalTree::new();
        for (v, i) in intervals.into_iter().enumerate() {
            tree.insert_interval(i, v);
            tree.check_rb_properties();
            tree.check_max();
        }
    }

    /// Every query kind returns exactly what a linear scan finds.
    #[test]
    fn prop_queries_match_linear_scan(
        intervals in vec(arbitrary_interval(), 0..200),
        query in arbitrary_interval(),
        point in -60i32..60,
    ) {
        let tree = build(&intervals);

        let stab = scan(&intervals, |i| i.contains_point(&point));
        prop_assert_eq!(owned(tree.stabbing(&point)), stab);

        let overlap = scan(&intervals, |i| i.overlaps(&query));
        prop_assert_eq!(owned(tree.overlapping(&query)), overlap);

        let contained = scan(&intervals, |i| i.is_contained_in(&query));
        prop_assert_eq!(owned(tree.contained_in(&query)), contained);
    }

    /// The set of matches does not depend on insertion order.
    #[test]
    fn prop_insertion_order_independent(
        intervals in vec(arbitrary_interval(), 0..150),
        query in arbitrary_interval(),
        seed in any::<u64>(),
    ) {
        let mut shuffled = intervals.clone();
        shuffled.shuffle(&mut StdRng::seed_from_u64(seed));
        let a = build(&intervals);
        let b = build(&shuffled);

        prop_assert_eq!(as_set(a.overlapping(&query)), as_set(b.overlapping(&query)));
        prop_assert_eq!(as_set(a.contained_in(&query)), as_set(b.contained_in(&query)));
        prop_assert_eq!(
            as_set(a.stabbing(query.low())),
            as_set(b.stabbing(query.low()))
        );
    }
}
