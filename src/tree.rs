use log::{debug, trace};

use crate::error::Result;
use crate::index::{DefaultIx, IndexType, NodeIndex};
use crate::interval::Interval;
use crate::iter::{IntoIter, Iter};
use crate::node::{Color, Node};

/// An interval tree storing a value for each closed interval.
///
/// Intervals are kept in a red-black tree ordered by their low endpoint.
/// Every node also records where the largest high endpoint of its subtree
/// lives, which lets queries skip whole subtrees. Duplicate intervals are
/// allowed; each insert adds a new entry.
#[derive(Debug, Clone)]
pub struct IntervalTree<T, V, Ix = DefaultIx> {
    /// Vector that stores nodes
    pub(crate) nodes: Vec<Node<T, V, Ix>>,
    /// Root of the interval tree
    pub(crate) root: Option<NodeIndex<Ix>>,
}

impl<T, V, Ix> IntervalTree<T, V, Ix>
where
    T: Ord,
    Ix: IndexType,
{
    /// Creates a new `IntervalTree` with estimated capacity.
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        debug!("creating interval tree with capacity {capacity}");
        IntervalTree {
            nodes: Vec::with_capacity(capacity),
            root: None,
        }
    }

    /// Insert the interval `[low, high]` with its value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInterval`](crate::Error::InvalidInterval) when
    /// `low > high`. The tree is left untouched in that case.
    ///
    /// # Panics
    ///
    /// This method panics when the tree is at the maximum number of nodes for its index
    ///
    /// # Example
    /// ```rust
    /// use rb_interval_tree::{Error, IntervalTree};
    ///
    /// let mut tree = IntervalTree::new();
    /// assert!(tree.insert(1, 3, "a").is_ok());
    /// assert!(tree.insert(1, 3, "b").is_ok());
    /// assert_eq!(tree.insert(4, 2, "c"), Err(Error::InvalidInterval));
    /// assert_eq!(tree.len(), 2);
    /// ```
    #[inline]
    pub fn insert(&mut self, low: T, high: T, value: V) -> Result<()> {
        let interval = Interval::new(low, high)?;
        self.insert_interval(interval, value);
        Ok(())
    }

    /// Insert an already validated interval with its value.
    ///
    /// # Panics
    ///
    /// This method panics when the tree is at the maximum number of nodes for its index
    #[inline]
    pub fn insert_interval(&mut self, interval: Interval<T>, value: V) {
        assert!(
            NodeIndex::<Ix>::has_room(self.nodes.len()),
            "Reached maximum number of nodes"
        );
        let node_idx = NodeIndex::new(self.nodes.len());
        self.nodes.push(Node::new(interval, value, node_idx));
        self.attach(node_idx);
        self.insert_fixup(node_idx);
    }

    /// Get an iterator over the entries of the tree, sorted by low endpoint.
    /// Entries sharing a low endpoint come out in insertion order.
    #[inline]
    #[must_use]
    pub fn iter(&self) -> Iter<'_, T, V, Ix> {
        Iter::new(self)
    }

    /// Remove all elements from the tree
    #[inline]
    pub fn clear(&mut self) {
        debug!("clearing interval tree of {} entries", self.nodes.len());
        self.nodes.clear();
        self.root = None;
    }

    /// Return the number of intervals in the tree.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Return `true` if the tree contains no intervals.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of nodes on the longest path from the root to a leaf.
    ///
    /// # Example
    /// ```rust
    /// use rb_interval_tree::IntervalTree;
    ///
    /// let mut tree = IntervalTree::new();
    /// assert_eq!(tree.height(), 0);
    /// for i in 0..7 {
    ///     tree.insert(i, i + 1, ()).unwrap();
    /// }
    /// assert!(tree.height() <= 6);
    /// ```
    #[must_use]
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<_> = self.root.map(|r| (r, 1)).into_iter().collect();
        while let Some((x, depth)) = stack.pop() {
            height = height.max(depth);
            let children = [self.node_ref(x, Node::left), self.node_ref(x, Node::right)];
            stack.extend(children.into_iter().flatten().map(|c| (c, depth + 1)));
        }
        height
    }
}

impl<T, V> IntervalTree<T, V>
where
    T: Ord,
{
    /// Create an empty `IntervalTree`
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
        }
    }
}

impl<T, V, Ix> Default for IntervalTree<T, V, Ix>
where
    T: Ord,
    Ix: IndexType,
{
    #[inline]
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
        }
    }
}

impl<T, V, Ix> IntervalTree<T, V, Ix>
where
    T: Ord,
    Ix: IndexType,
{
    /// Link a freshly pushed node into the tree as a leaf and repair the
    /// subtree max on its ancestors. Equal lows descend right.
    pub(crate) fn attach(&mut self, z: NodeIndex<Ix>) {
        let mut y = None;
        let mut x = self.root;
        while let Some(xi) = x {
            y = Some(xi);
            x = if self.node_ref(z, Node::low) < self.node_ref(xi, Node::low) {
                self.node_ref(xi, Node::left)
            } else {
                self.node_ref(xi, Node::right)
            };
        }
        self.node_mut(z, Node::set_parent(y));
        match y {
            None => self.root = Some(z),
            Some(yi) => {
                if self.node_ref(z, Node::low) < self.node_ref(yi, Node::low) {
                    self.node_mut(yi, Node::set_left(Some(z)));
                } else {
                    self.node_mut(yi, Node::set_right(Some(z)));
                }
                self.update_max_bottom_up(yi);
            }
        }
    }

    /// Restore red-black tree properties after an insert.
    fn insert_fixup(&mut self, mut z: NodeIndex<Ix>) {
        while let Some(p) = self
            .node_ref(z, Node::parent)
            .filter(|&p| self.node_ref(p, Node::is_red))
        {
            // a red parent is never the root
            let Some(g) = self.node_ref(p, Node::parent) else {
                break;
            };
            if self.node_ref(g, Node::left) == Some(p) {
                let uncle = self.node_ref(g, Node::right);
                if let Some(u) = uncle.filter(|&u| self.node_ref(u, Node::is_red)) {
                    trace!("insert fixup: recolor below {g:?}");
                    self.node_mut(p, Node::set_color(Color::Black));
                    self.node_mut(u, Node::set_color(Color::Black));
                    self.node_mut(g, Node::set_color(Color::Red));
                    z = g;
                } else {
                    let mut p = p;
                    if self.node_ref(p, Node::right) == Some(z) {
                        self.left_rotate(p);
                        (z, p) = (p, z);
                    }
                    trace!("insert fixup: rotate right at {g:?}");
                    self.node_mut(p, Node::set_color(Color::Black));
                    self.node_mut(g, Node::set_color(Color::Red));
                    self.right_rotate(g);
                }
            } else {
                let uncle = self.node_ref(g, Node::left);
                if let Some(u) = uncle.filter(|&u| self.node_ref(u, Node::is_red)) {
                    trace!("insert fixup: recolor below {g:?}");
                    self.node_mut(p, Node::set_color(Color::Black));
                    self.node_mut(u, Node::set_color(Color::Black));
                    self.node_mut(g, Node::set_color(Color::Red));
                    z = g;
                } else {
                    let mut p = p;
                    if self.node_ref(p, Node::left) == Some(z) {
                        self.right_rotate(p);
                        (z, p) = (p, z);
                    }
                    trace!("insert fixup: rotate left at {g:?}");
                    self.node_mut(p, Node::set_color(Color::Black));
                    self.node_mut(g, Node::set_color(Color::Red));
                    self.left_rotate(g);
                }
            }
        }
        if let Some(root) = self.root {
            self.node_mut(root, Node::set_color(Color::Black));
        }
    }

    /// Binary tree left rotate. The right child of `x` takes its place.
    pub(crate) fn left_rotate(&mut self, x: NodeIndex<Ix>) {
        let Some(y) = self.node_ref(x, Node::right) else {
            return;
        };
        let y_left = self.node_ref(y, Node::left);
        self.node_mut(x, Node::set_right(y_left));
        if let Some(b) = y_left {
            self.node_mut(b, Node::set_parent(Some(x)));
        }

        self.replace_parent(x, y);
        self.node_mut(y, Node::set_left(Some(x)));

        self.rotate_update_max(x, y);
    }

    /// Binary tree right rotate. The left child of `x` takes its place.
    pub(crate) fn right_rotate(&mut self, x: NodeIndex<Ix>) {
        let Some(y) = self.node_ref(x, Node::left) else {
            return;
        };
        let y_right = self.node_ref(y, Node::right);
        self.node_mut(x, Node::set_left(y_right));
        if let Some(b) = y_right {
            self.node_mut(b, Node::set_parent(Some(x)));
        }

        self.replace_parent(x, y);
        self.node_mut(y, Node::set_right(Some(x)));

        self.rotate_update_max(x, y);
    }

    /// Replace parent during a rotation.
    fn replace_parent(&mut self, x: NodeIndex<Ix>, y: NodeIndex<Ix>) {
        let parent = self.node_ref(x, Node::parent);
        self.node_mut(y, Node::set_parent(parent));
        match parent {
            None => self.root = Some(y),
            Some(p) if self.node_ref(p, Node::left) == Some(x) => {
                self.node_mut(p, Node::set_left(Some(y)));
            }
            Some(p) => self.node_mut(p, Node::set_right(Some(y))),
        }
        self.node_mut(x, Node::set_parent(Some(y)));
    }

    /// Update the max after a rotation. `x` moved below `y`, so it goes first.
    fn rotate_update_max(&mut self, x: NodeIndex<Ix>, y: NodeIndex<Ix>) {
        trace!("rotation: {x:?} moved below {y:?}");
        let _ignore = self.recalculate_max(x);
        let _ignore = self.recalculate_max(y);
    }

    /// Update the max towards the root, stopping at the first unchanged node.
    fn update_max_bottom_up(&mut self, x: NodeIndex<Ix>) {
        let mut p = Some(x);
        while let Some(pi) = p {
            if !self.recalculate_max(pi) {
                break;
            }
            p = self.node_ref(pi, Node::parent);
        }
    }

    /// Recalculate the max of `x` from itself and its children.
    ///
    /// This is the only place the augmentation is computed. Returns whether it
    /// changed.
    fn recalculate_max(&mut self, x: NodeIndex<Ix>) -> bool {
        let mut max_index = x;
        let children = [self.node_ref(x, Node::left), self.node_ref(x, Node::right)];
        for child in children.into_iter().flatten() {
            let child_max = self.node_ref(child, Node::max_index);
            if self.node_ref(child_max, Node::high) > self.node_ref(max_index, Node::high) {
                max_index = child_max;
            }
        }
        let changed = self.node_ref(x, Node::max_index) != max_index;
        self.node_mut(x, Node::set_max_index(max_index));
        changed
    }
}

// Convenient methods for reference or mutate nodes
impl<T, V, Ix> IntervalTree<T, V, Ix>
where
    Ix: IndexType,
{
    pub(crate) fn node_ref<'a, F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<T, V, Ix>) -> R,
    {
        op(&self.nodes[node.index()])
    }

    pub(crate) fn node_mut<F, R>(&mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        F: FnOnce(&mut Node<T, V, Ix>) -> R,
    {
        op(&mut self.nodes[node.index()])
    }

    /// Largest high endpoint in the subtree rooted at `node`.
    pub(crate) fn max(&self, node: NodeIndex<Ix>) -> &T {
        self.node_ref(self.node_ref(node, Node::max_index), Node::high)
    }
}

impl<'a, T, V, Ix> IntoIterator for &'a IntervalTree<T, V, Ix>
where
    T: Ord,
    Ix: IndexType,
{
    type Item = (&'a Interval<T>, &'a V);
    type IntoIter = Iter<'a, T, V, Ix>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, V, Ix> IntoIterator for IntervalTree<T, V, Ix>
where
    T: Ord,
    Ix: IndexType,
{
    type Item = (Interval<T>, V);
    type IntoIter = IntoIter<T, V>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}

impl<T, V, Ix> Extend<(Interval<T>, V)> for IntervalTree<T, V, Ix>
where
    T: Ord,
    Ix: IndexType,
{
    fn extend<I: IntoIterator<Item = (Interval<T>, V)>>(&mut self, iter: I) {
        for (interval, value) in iter {
            self.insert_interval(interval, value);
        }
    }
}

impl<T, V, Ix> FromIterator<(Interval<T>, V)> for IntervalTree<T, V, Ix>
where
    T: Ord,
    Ix: IndexType,
{
    fn from_iter<I: IntoIterator<Item = (Interval<T>, V)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut tree = Self::with_capacity(iter.size_hint().0);
        tree.extend(iter);
        tree
    }
}

/// The tree serializes as its in-order sequence of `(interval, value)` pairs.
/// Deserializing re-inserts every pair, so balance and subtree max are rebuilt
/// rather than read back. More pairs than the index type can address is an error.
#[cfg(feature = "serde")]
mod serde_impl {
    use serde::de::{Deserialize, Deserializer, Error};
    use serde::ser::{Serialize, Serializer};

    use super::IntervalTree;
    use crate::index::{IndexType, NodeIndex};
    use crate::interval::Interval;

    impl<T, V, Ix> Serialize for IntervalTree<T, V, Ix>
    where
        T: Ord + Serialize,
        V: Serialize,
        Ix: IndexType,
    {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_seq(self.iter())
        }
    }

    impl<'de, T, V, Ix> Deserialize<'de> for IntervalTree<T, V, Ix>
    where
        T: Ord + Deserialize<'de>,
        V: Deserialize<'de>,
        Ix: IndexType,
    {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let entries = Vec::<(Interval<T>, V)>::deserialize(deserializer)?;
            let mut tree = IntervalTree::with_capacity(entries.len());
            for (interval, value) in entries {
                if !NodeIndex::<Ix>::has_room(tree.len()) {
                    return Err(D::Error::custom("too many intervals for index type"));
                }
                tree.insert_interval(interval, value);
            }
            Ok(tree)
        }
    }
}
