//! Range queries over an [`IntervalTree`].
//!
//! All three kinds share one pruned in-order walk. A query describes itself
//! through [`Query`]: the smallest `high` a match can have and the largest
//! `low` it can have. Any subtree whose max is below the first bound is
//! skipped, and the right subtree of a node whose `low` is above the second
//! bound is skipped, since lows only grow to the right.

use crate::error::{Error, Result};
use crate::index::{IndexType, NodeIndex};
use crate::interval::Interval;
use crate::node::Node;
use crate::tree::IntervalTree;

/// Bounds a query places on matching intervals.
pub(crate) trait Query<T> {
    /// Every match has `high >= min_high()`.
    fn min_high(&self) -> &T;

    /// Every match has `low <= max_low()`.
    fn max_low(&self) -> &T;

    /// Every match has `low >= min_low()`, when the query bounds it.
    fn min_low(&self) -> Option<&T> {
        None
    }

    fn matches(&self, interval: &Interval<T>) -> bool;
}

/// Intervals covering a point.
struct Stab<'q, T>(&'q T);

impl<T: Ord> Query<T> for Stab<'_, T> {
    fn min_high(&self) -> &T {
        self.0
    }

    fn max_low(&self) -> &T {
        self.0
    }

    fn matches(&self, interval: &Interval<T>) -> bool {
        interval.contains_point(self.0)
    }
}

/// Intervals sharing at least one point with the query.
struct Overlap<'q, T>(&'q Interval<T>);

impl<T: Ord> Query<T> for Overlap<'_, T> {
    fn min_high(&self) -> &T {
        self.0.low()
    }

    fn max_low(&self) -> &T {
        self.0.high()
    }

    fn matches(&self, interval: &Interval<T>) -> bool {
        interval.overlaps(self.0)
    }
}

/// Intervals lying entirely inside the query.
struct Containment<'q, T>(&'q Interval<T>);

impl<T: Ord> Query<T> for Containment<'_, T> {
    // low <= high, so a contained interval also has high >= query.low
    fn min_high(&self) -> &T {
        self.0.low()
    }

    fn max_low(&self) -> &T {
        self.0.high()
    }

    fn min_low(&self) -> Option<&T> {
        Some(self.0.low())
    }

    fn matches(&self, interval: &Interval<T>) -> bool {
        interval.is_contained_in(self.0)
    }
}

/// In-order walk yielding the entries matching `query`, skipping subtrees
/// that cannot hold one.
struct QueryIter<'a, T, V, Ix, Q> {
    /// Reference to the tree
    tree: &'a IntervalTree<T, V, Ix>,
    /// Nodes whose left side is done but which are not yet visited
    stack: Vec<NodeIndex<Ix>>,
    /// Filter criteria
    query: Q,
}

impl<'a, T, V, Ix, Q> QueryIter<'a, T, V, Ix, Q>
where
    T: Ord,
    Ix: IndexType,
    Q: Query<T>,
{
    fn new(tree: &'a IntervalTree<T, V, Ix>, query: Q) -> Self {
        let mut iter = QueryIter {
            tree,
            stack: Vec::new(),
            query,
        };
        iter.push_left_link(tree.root);
        iter
    }

    /// Pushes the chain of left descendants of `x` worth visiting.
    fn push_left_link(&mut self, mut x: Option<NodeIndex<Ix>>) {
        while let Some(xi) = x {
            if self.tree.max(xi) < self.query.min_high() {
                break;
            }
            self.stack.push(xi);
            // lows in the left subtree are at most this node's low
            if self
                .query
                .min_low()
                .is_some_and(|min| self.tree.node_ref(xi, Node::low) < min)
            {
                break;
            }
            x = self.tree.node_ref(xi, Node::left);
        }
    }
}

impl<'a, T, V, Ix, Q> Iterator for QueryIter<'a, T, V, Ix, Q>
where
    T: Ord,
    Ix: IndexType,
    Q: Query<T>,
{
    type Item = (&'a Interval<T>, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        while let Some(x) = self.stack.pop() {
            let tree = self.tree;
            if tree.node_ref(x, Node::low) <= self.query.max_low() {
                self.push_left_link(tree.node_ref(x, Node::right));
            }
            if self.query.matches(tree.node_ref(x, Node::interval)) {
                return Some(tree.node_ref(x, Node::entry));
            }
        }
        None
    }
}

impl<T, V, Ix> IntervalTree<T, V, Ix>
where
    T: Ord,
    Ix: IndexType,
{
    /// Find all intervals containing `point`, i.e. `low <= point <= high`.
    ///
    /// Results are ordered by low endpoint, then by insertion order.
    ///
    /// # Example
    /// ```rust
    /// use rb_interval_tree::IntervalTree;
    ///
    /// let mut tree = IntervalTree::new();
    /// tree.insert(0, 10, 'a').unwrap();
    /// tree.insert(5, 15, 'b').unwrap();
    /// tree.insert(20, 30, 'c').unwrap();
    /// tree.insert(8, 9, 'd').unwrap();
    /// let hits: Vec<_> = tree.stabbing(&9).into_iter().map(|(_, v)| *v).collect();
    /// assert_eq!(hits, vec!['a', 'b', 'd']);
    /// ```
    #[inline]
    pub fn stabbing(&self, point: &T) -> Vec<(&Interval<T>, &V)> {
        QueryIter::new(self, Stab(point)).collect()
    }

    /// Find all intervals sharing at least one point with `[low, high]`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidQueryRange`] when `low > high`.
    ///
    /// # Example
    /// ```rust
    /// use rb_interval_tree::IntervalTree;
    ///
    /// let mut tree = IntervalTree::new();
    /// tree.insert(1, 3, ()).unwrap();
    /// tree.insert(2, 4, ()).unwrap();
    /// tree.insert(6, 7, ()).unwrap();
    /// tree.insert(7, 11, ()).unwrap();
    /// assert_eq!(tree.overlaps(3, 6).unwrap().len(), 3);
    /// assert!(tree.overlaps(6, 3).is_err());
    /// ```
    #[inline]
    pub fn overlaps(&self, low: T, high: T) -> Result<Vec<(&Interval<T>, &V)>> {
        let query = Self::query_range(low, high)?;
        Ok(self.overlapping(&query))
    }

    /// Find all intervals lying entirely inside `[low, high]`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidQueryRange`] when `low > high`.
    ///
    /// # Example
    /// ```rust
    /// use rb_interval_tree::IntervalTree;
    ///
    /// let mut tree = IntervalTree::new();
    /// tree.insert(0, 10, ()).unwrap();
    /// tree.insert(5, 15, ()).unwrap();
    /// tree.insert(20, 30, ()).unwrap();
    /// tree.insert(8, 9, ()).unwrap();
    /// let hits: Vec<_> = tree
    ///     .contained_within(0, 12)
    ///     .unwrap()
    ///     .into_iter()
    ///     .map(|(i, _)| (*i.low(), *i.high()))
    ///     .collect();
    /// assert_eq!(hits, vec![(0, 10), (8, 9)]);
    /// ```
    #[inline]
    pub fn contained_within(&self, low: T, high: T) -> Result<Vec<(&Interval<T>, &V)>> {
        let query = Self::query_range(low, high)?;
        Ok(self.contained_in(&query))
    }

    /// Find all intervals overlapping `interval`.
    #[inline]
    pub fn overlapping(&self, interval: &Interval<T>) -> Vec<(&Interval<T>, &V)> {
        QueryIter::new(self, Overlap(interval)).collect()
    }

    /// Find all intervals contained in `interval`.
    #[inline]
    pub fn contained_in(&self, interval: &Interval<T>) -> Vec<(&Interval<T>, &V)> {
        QueryIter::new(self, Containment(interval)).collect()
    }

    /// Check if any interval in the tree overlaps `[low, high]`, stopping at
    /// the first hit.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidQueryRange`] when `low > high`.
    ///
    /// # Example
    /// ```rust
    /// use rb_interval_tree::IntervalTree;
    ///
    /// let mut tree = IntervalTree::new();
    /// tree.insert(1, 3, ()).unwrap();
    /// tree.insert(6, 7, ()).unwrap();
    /// tree.insert(9, 11, ()).unwrap();
    /// assert!(tree.any_overlap(2, 5).unwrap());
    /// assert!(tree.any_overlap(3, 6).unwrap());
    /// assert!(!tree.any_overlap(4, 5).unwrap());
    /// assert!(!tree.any_overlap(12, 23).unwrap());
    /// ```
    #[inline]
    pub fn any_overlap(&self, low: T, high: T) -> Result<bool> {
        let query = Self::query_range(low, high)?;
        Ok(QueryIter::new(self, Overlap(&query)).next().is_some())
    }

    fn query_range(low: T, high: T) -> Result<Interval<T>> {
        Interval::new(low, high).map_err(|_| Error::InvalidQueryRange)
    }
}
