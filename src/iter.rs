use crate::index::{IndexType, NodeIndex};
use crate::interval::Interval;
use crate::node::Node;
use crate::tree::IntervalTree;

/// Pushes a link of nodes on the left to stack.
fn left_link<T, V, Ix>(
    tree: &IntervalTree<T, V, Ix>,
    mut x: Option<NodeIndex<Ix>>,
    stack: &mut Vec<NodeIndex<Ix>>,
) where
    Ix: IndexType,
{
    while let Some(xi) = x {
        stack.push(xi);
        x = tree.node_ref(xi, Node::left);
    }
}

/// An iterator over the entries of an `IntervalTree`, in tree order.
#[derive(Debug)]
pub struct Iter<'a, T, V, Ix> {
    /// Reference to the tree
    tree: &'a IntervalTree<T, V, Ix>,
    /// Stack for iteration
    stack: Vec<NodeIndex<Ix>>,
    /// Entries not yet yielded
    remaining: usize,
}

impl<'a, T, V, Ix> Iter<'a, T, V, Ix>
where
    Ix: IndexType,
{
    pub(crate) fn new(tree: &'a IntervalTree<T, V, Ix>) -> Self {
        let mut stack = Vec::new();
        left_link(tree, tree.root, &mut stack);
        Iter {
            tree,
            stack,
            remaining: tree.nodes.len(),
        }
    }

    /// Advance to the next node index in tree order.
    fn next_index(&mut self) -> Option<NodeIndex<Ix>> {
        let x = self.stack.pop()?;
        left_link(self.tree, self.tree.node_ref(x, Node::right), &mut self.stack);
        self.remaining -= 1;
        Some(x)
    }
}

impl<'a, T, V, Ix> Iterator for Iter<'a, T, V, Ix>
where
    Ix: IndexType,
{
    type Item = (&'a Interval<T>, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let x = self.next_index()?;
        Some(self.tree.node_ref(x, Node::entry))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, V, Ix> ExactSizeIterator for Iter<'_, T, V, Ix> where Ix: IndexType {}

/// An owning iterator over the entries of an `IntervalTree`, in tree order.
#[derive(Debug)]
pub struct IntoIter<T, V> {
    entries: std::vec::IntoIter<(Interval<T>, V)>,
}

impl<T, V> IntoIter<T, V> {
    pub(crate) fn new<Ix: IndexType>(tree: IntervalTree<T, V, Ix>) -> Self {
        let mut order = Vec::with_capacity(tree.nodes.len());
        let mut iter = Iter::new(&tree);
        while let Some(x) = iter.next_index() {
            order.push(x.index());
        }
        let mut slots: Vec<_> = tree.nodes.into_iter().map(Some).collect();
        let entries: Vec<_> = order
            .into_iter()
            .filter_map(|i| slots[i].take())
            .map(|node| (node.interval, node.value))
            .collect();
        IntoIter {
            entries: entries.into_iter(),
        }
    }
}

impl<T, V> Iterator for IntoIter<T, V> {
    type Item = (Interval<T>, V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl<T, V> ExactSizeIterator for IntoIter<T, V> {}
