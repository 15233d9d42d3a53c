//! The `Interval` stored in `IntervalTree`, a closed range `[low, high]`.
//!
//! Both endpoints are inclusive, so `[3, 3]` is a valid interval covering the
//! single point 3. Inside the tree intervals are placed by `low` alone; two
//! intervals with the same `low` keep their insertion order.

use crate::error::{Error, Result};

/// A closed interval `[low, high]` with `low <= high`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Interval<T> {
    low: T,
    high: T,
}

impl<T: Ord> Interval<T> {
    /// Create a new `Interval`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInterval`] when `low > high`.
    ///
    /// # Example
    /// ```rust
    /// use rb_interval_tree::{Error, Interval};
    ///
    /// assert!(Interval::new(1, 3).is_ok());
    /// assert!(Interval::new(3, 3).is_ok());
    /// assert_eq!(Interval::new(4, 3), Err(Error::InvalidInterval));
    /// ```
    #[inline]
    pub fn new(low: T, high: T) -> Result<Self> {
        if low > high {
            return Err(Error::InvalidInterval);
        }
        Ok(Self { low, high })
    }

    /// Checks if `point` lies within `[low, high]`.
    #[inline]
    pub fn contains_point(&self, point: &T) -> bool {
        &self.low <= point && point <= &self.high
    }

    /// Checks if self overlaps with other interval. Touching endpoints overlap.
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.low <= other.high && other.low <= self.high
    }

    /// Checks if self lies entirely inside `other`.
    #[inline]
    pub fn is_contained_in(&self, other: &Self) -> bool {
        other.low <= self.low && self.high <= other.high
    }
}

impl<T: Clone> Interval<T> {
    /// Create the degenerate interval `[x, x]`.
    #[inline]
    pub fn point(x: T) -> Self {
        Self {
            low: x.clone(),
            high: x,
        }
    }
}

impl<T> Interval<T> {
    /// Low endpoint
    #[inline]
    pub fn low(&self) -> &T {
        &self.low
    }

    /// High endpoint
    #[inline]
    pub fn high(&self) -> &T {
        &self.high
    }

    /// Consume the interval, returning `(low, high)`.
    #[inline]
    pub fn into_inner(self) -> (T, T) {
        (self.low, self.high)
    }
}

impl<T: Ord> TryFrom<(T, T)> for Interval<T> {
    type Error = Error;

    #[inline]
    fn try_from((low, high): (T, T)) -> Result<Self> {
        Self::new(low, high)
    }
}

/// Deserializing re-checks `low <= high`.
#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for Interval<T>
where
    T: Ord + serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        struct RawInterval<T> {
            low: T,
            high: T,
        }

        let raw = <RawInterval<T> as serde::Deserialize>::deserialize(deserializer)?;
        Self::new(raw.low, raw.high).map_err(serde::de::Error::custom)
    }
}
