use crate::index::{IndexType, NodeIndex};
use crate::interval::Interval;

/// Node of the interval tree
#[derive(Debug, Clone)]
pub(crate) struct Node<T, V, Ix> {
    /// Left child
    pub left: Option<NodeIndex<Ix>>,
    /// Right child
    pub right: Option<NodeIndex<Ix>>,
    /// Parent
    pub parent: Option<NodeIndex<Ix>>,
    /// Color of the node
    pub color: Color,

    /// Interval of the node
    pub interval: Interval<T>,
    /// The index of the node holding the largest `high` in this subtree
    pub max_index: NodeIndex<Ix>,
    /// Value of the node
    pub value: V,
}

impl<T, V, Ix> Node<T, V, Ix>
where
    Ix: IndexType,
{
    /// A fresh red leaf stored at `index`.
    pub fn new(interval: Interval<T>, value: V, index: NodeIndex<Ix>) -> Self {
        Node {
            left: None,
            right: None,
            parent: None,
            color: Color::Red,
            interval,
            max_index: index,
            value,
        }
    }
}

// Convenient getter/setter methods
impl<T, V, Ix> Node<T, V, Ix>
where
    Ix: IndexType,
{
    pub fn color(&self) -> Color {
        self.color
    }

    pub fn interval(&self) -> &Interval<T> {
        &self.interval
    }

    pub fn low(&self) -> &T {
        self.interval.low()
    }

    pub fn high(&self) -> &T {
        self.interval.high()
    }

    pub fn max_index(&self) -> NodeIndex<Ix> {
        self.max_index
    }

    pub fn left(&self) -> Option<NodeIndex<Ix>> {
        self.left
    }

    pub fn right(&self) -> Option<NodeIndex<Ix>> {
        self.right
    }

    pub fn parent(&self) -> Option<NodeIndex<Ix>> {
        self.parent
    }

    pub fn is_red(&self) -> bool {
        matches!(self.color(), Color::Red)
    }

    pub fn entry(&self) -> (&Interval<T>, &V) {
        (&self.interval, &self.value)
    }

    pub fn set_color(color: Color) -> impl FnOnce(&mut Node<T, V, Ix>) {
        move |node: &mut Node<T, V, Ix>| {
            node.color = color;
        }
    }

    pub fn set_max_index(max_index: NodeIndex<Ix>) -> impl FnOnce(&mut Node<T, V, Ix>) {
        move |node: &mut Node<T, V, Ix>| {
            node.max_index = max_index;
        }
    }

    pub fn set_left(left: Option<NodeIndex<Ix>>) -> impl FnOnce(&mut Node<T, V, Ix>) {
        move |node: &mut Node<T, V, Ix>| {
            node.left = left;
        }
    }

    pub fn set_right(right: Option<NodeIndex<Ix>>) -> impl FnOnce(&mut Node<T, V, Ix>) {
        move |node: &mut Node<T, V, Ix>| {
            node.right = right;
        }
    }

    pub fn set_parent(parent: Option<NodeIndex<Ix>>) -> impl FnOnce(&mut Node<T, V, Ix>) {
        move |node: &mut Node<T, V, Ix>| {
            node.parent = parent;
        }
    }
}

/// The color of the node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Color {
    /// Red node
    Red,
    /// Black node
    Black,
}
