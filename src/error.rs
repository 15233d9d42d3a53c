use thiserror::Error;

/// Errors returned by [`IntervalTree`](crate::IntervalTree) and [`Interval`](crate::Interval).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Error {
    /// An interval was built with `low > high`.
    #[error("invalid interval: low endpoint is greater than high endpoint")]
    InvalidInterval,
    /// A range query was issued with `low > high`.
    #[error("invalid query range: low endpoint is greater than high endpoint")]
    InvalidQueryRange,
}

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;
