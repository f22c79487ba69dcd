//! Error types for buffer configuration and driving.

use core::convert::Infallible;
use core::fmt;

use snafu::Snafu;

/// Error returned when a buffer is configured with an unusable capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ConfigError {
    /// The capacity was zero or negative.
    #[snafu(display("capacity must be a positive integer, got {capacity}"))]
    InvalidConfiguration {
        /// The rejected value.
        capacity: i128,
    },
}

impl ConfigError {
    /// The rejected capacity value.
    #[must_use]
    pub fn capacity(&self) -> i128 {
        match self {
            ConfigError::InvalidConfiguration { capacity } => *capacity,
        }
    }
}

// An already validated `Capacity` converts through `TryInto` with `Infallible`.
impl From<Infallible> for ConfigError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}

/// Error returned by [`try_iterate`](crate::try_iterate).
#[derive(Clone, PartialEq, Eq)]
pub enum IterateError<E> {
    /// The capacity was rejected before the source was touched.
    Config(ConfigError),
    /// The flush callback failed. Iteration stopped at that point.
    Flush(E),
}

impl<E> IterateError<E> {
    /// Extract the callback error, if that is what stopped iteration.
    #[inline]
    #[must_use]
    pub fn into_flush(self) -> Option<E> {
        match self {
            IterateError::Flush(err) => Some(err),
            IterateError::Config(_) => None,
        }
    }
}

impl<E> From<ConfigError> for IterateError<E> {
    #[inline]
    fn from(err: ConfigError) -> Self {
        IterateError::Config(err)
    }
}

impl<E: fmt::Debug> fmt::Debug for IterateError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IterateError::Config(err) => f.debug_tuple("Config").field(err).finish(),
            IterateError::Flush(err) => f.debug_tuple("Flush").field(err).finish(),
        }
    }
}

impl<E: fmt::Display> fmt::Display for IterateError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IterateError::Config(err) => fmt::Display::fmt(err, f),
            IterateError::Flush(err) => write!(f, "flush callback failed: {err}"),
        }
    }
}

impl<E> core::error::Error for IterateError<E>
where
    E: core::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            IterateError::Config(err) => Some(err),
            IterateError::Flush(err) => Some(err),
        }
    }
}
