//! Validated buffer capacity.

use core::fmt;
use core::num::NonZeroUsize;

use snafu::{OptionExt, ensure};

use crate::error::{ConfigError, InvalidConfigurationSnafu};

/// Number of pending items at which a buffer flushes itself.
///
/// Always at least one. Any primitive integer converts with `TryFrom`; zero
/// and negative values are rejected with
/// [`ConfigError::InvalidConfiguration`]. Unsigned values wider than `usize`
/// saturate to `usize::MAX`.
///
/// ```
/// use batchbuf_core::Capacity;
///
/// assert_eq!(Capacity::try_from(8u32).unwrap().get(), 8);
/// assert!(Capacity::try_from(0).is_err());
/// assert!(Capacity::try_from(-3i64).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Capacity(NonZeroUsize);

impl Capacity {
    /// Validate a capacity.
    pub fn new(capacity: usize) -> Result<Self, ConfigError> {
        NonZeroUsize::new(capacity)
            .map(Self)
            .context(InvalidConfigurationSnafu { capacity: 0_i128 })
    }

    /// Wrap an already non-zero count.
    #[must_use]
    pub const fn from_nonzero(capacity: NonZeroUsize) -> Self {
        Self(capacity)
    }

    /// The capacity as a plain count.
    #[inline]
    #[must_use]
    pub const fn get(self) -> usize {
        self.0.get()
    }
}

impl From<NonZeroUsize> for Capacity {
    #[inline]
    fn from(capacity: NonZeroUsize) -> Self {
        Self(capacity)
    }
}

impl From<Capacity> for usize {
    #[inline]
    fn from(capacity: Capacity) -> Self {
        capacity.get()
    }
}

impl fmt::Display for Capacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

macro_rules! impl_try_from_unsigned {
    ($($ty:ty),* $(,)?) => {
        $(
            impl TryFrom<$ty> for Capacity {
                type Error = ConfigError;

                #[inline]
                fn try_from(value: $ty) -> Result<Self, Self::Error> {
                    Capacity::new(usize::try_from(value).unwrap_or(usize::MAX))
                }
            }
        )*
    };
}

macro_rules! impl_try_from_signed {
    ($($ty:ty),* $(,)?) => {
        $(
            impl TryFrom<$ty> for Capacity {
                type Error = ConfigError;

                #[inline]
                fn try_from(value: $ty) -> Result<Self, Self::Error> {
                    ensure!(value > 0, InvalidConfigurationSnafu { capacity: value as i128 });
                    Capacity::new(usize::try_from(value).unwrap_or(usize::MAX))
                }
            }
        )*
    };
}

impl_try_from_unsigned!(u8, u16, u32, u64, usize);
impl_try_from_signed!(i8, i16, i32, i64, isize);
