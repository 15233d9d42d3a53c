//! `rb_interval_tree` is an interval tree answering containment, overlap and
//! stabbing queries over a growing set of closed intervals.
//!
//! Intervals live in a red-black tree keyed on their low endpoint, so each
//! insertion takes O(logN) time. Every node also tracks which node of its
//! subtree holds the largest high endpoint; queries use that to skip subtrees
//! that cannot hold a match.
//!
//! Nodes are kept in a vector and refer to each other by index rather than by
//! pointer, which keeps the tree free of `unsafe` and `Send`/`Sync` whenever its
//! keys and values are.
//!
//! Query results come back as a `Vec` ordered by low endpoint, with equal low
//! endpoints in insertion order.
//!
//! # Example
//!
//! ```rust
//! use rb_interval_tree::IntervalTree;
//!
//! let mut tree = IntervalTree::new();
//! tree.insert(0, 10, "a").unwrap();
//! tree.insert(5, 15, "b").unwrap();
//! tree.insert(20, 30, "c").unwrap();
//! tree.insert(8, 9, "d").unwrap();
//!
//! let inside: Vec<_> = tree
//!     .contained_within(0, 12)
//!     .unwrap()
//!     .into_iter()
//!     .map(|(_, v)| *v)
//!     .collect();
//! assert_eq!(inside, vec!["a", "d"]);
//!
//! let covering: Vec<_> = tree.stabbing(&9).into_iter().map(|(_, v)| *v).collect();
//! assert_eq!(covering, vec!["a", "b", "d"]);
//! ```
//!
//! # Sharing between threads
//!
//! Queries take `&self` and insertion takes `&mut self`, so the borrow checker
//! already enforces many readers or one writer. Wrap the tree in a
//! `std::sync::RwLock` to share it across threads.

mod error;
#[cfg(feature = "graphviz")]
mod graphviz;
mod index;
mod interval;
mod iter;
mod node;
mod query;
mod tree;

#[cfg(test)]
mod tests;

pub use error::{Error, Result};
pub use index::{DefaultIx, IndexType};
pub use interval::Interval;
pub use iter::{IntoIter, Iter};
pub use tree::IntervalTree;
