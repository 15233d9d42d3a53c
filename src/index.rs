use std::fmt;
use std::hash::Hash;

/// Default index width of the node arena.
pub type DefaultIx = u32;

/// Integer types usable as arena indices.
///
/// `max()` is the capacity limit: an arena indexed by `Ix` holds at most
/// `Ix::max()` nodes.
pub trait IndexType: Copy + Default + Hash + Ord + fmt::Debug + 'static {
    fn new(x: usize) -> Self;
    fn index(&self) -> usize;
    fn max() -> Self;
}

macro_rules! impl_index_type {
    ($($t:ty),*) => {
        $(
            impl IndexType for $t {
                #[inline(always)]
                fn new(x: usize) -> Self {
                    x as $t
                }
                #[inline(always)]
                fn index(&self) -> usize {
                    *self as usize
                }
                #[inline(always)]
                fn max() -> Self {
                    <$t>::MAX
                }
            }
        )*
    };
}

impl_index_type!(u16, u32, u64, usize);

/// Stable handle of a node inside the arena.
#[derive(Copy, Clone, Default, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub(crate) struct NodeIndex<Ix = DefaultIx>(Ix);

impl<Ix: IndexType> NodeIndex<Ix> {
    #[inline]
    pub(crate) fn new(x: usize) -> Self {
        NodeIndex(IndexType::new(x))
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0.index()
    }

    /// Whether an arena of `len` nodes can take one more node.
    #[inline]
    pub(crate) fn has_room(len: usize) -> bool {
        <Ix as IndexType>::max().index() == usize::MAX || len < <Ix as IndexType>::max().index()
    }
}

impl<Ix: fmt::Debug> fmt::Debug for NodeIndex<Ix> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "NodeIndex({:?})", self.0)
    }
}
