use std::cmp;

use rb_interval_tree::{Interval, IntervalTree};

/// A string key with an extra value above every string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StringAffine {
    /// String
    String(String),
    /// Unbounded
    Unbounded,
}

impl StringAffine {
    pub fn new_key(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl PartialOrd for StringAffine {
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for StringAffine {
    fn cmp(&self, other: &Self) -> cmp::Ordering {
        match (self, other) {
            (StringAffine::String(x), StringAffine::String(y)) => x.cmp(y),
            (StringAffine::String(_), StringAffine::Unbounded) => cmp::Ordering::Less,
            (StringAffine::Unbounded, StringAffine::String(_)) => cmp::Ordering::Greater,
            (StringAffine::Unbounded, StringAffine::Unbounded) => cmp::Ordering::Equal,
        }
    }
}

fn main() -> Result<(), rb_interval_tree::Error> {
    let mut tree = IntervalTree::<StringAffine, u32>::new();
    tree.insert(StringAffine::new_key("8"), StringAffine::Unbounded, 123)?;
    tree.insert(StringAffine::new_key("a"), StringAffine::new_key("c"), 7)?;

    assert_eq!(tree.stabbing(&StringAffine::new_key("9")).len(), 1);
    assert!(tree.stabbing(&StringAffine::new_key("7")).is_empty());
    assert_eq!(tree.stabbing(&StringAffine::new_key("b")).len(), 2);

    let inside = tree.contained_within(StringAffine::new_key("0"), StringAffine::new_key("z"))?;
    assert_eq!(inside.len(), 1);
    assert_eq!(inside[0].1, &7);

    let key = Interval::point(StringAffine::new_key("c"));
    assert_eq!(tree.overlapping(&key).len(), 2);
    Ok(())
}
