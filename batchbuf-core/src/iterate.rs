//! Drive a buffer over a whole input sequence.

use crate::buffer::Buffer;
use crate::capacity::Capacity;
use crate::error::{ConfigError, IterateError};
use crate::sink::{FnFlush, TryFnFlush};

/// Push every element of `source` through a buffer of `capacity`, then flush
/// the remainder.
///
/// `on_flush` sees full batches while the source lasts and one final partial
/// batch if any items are left over. An empty source never calls it.
///
/// ```
/// let mut batches = Vec::new();
/// batchbuf_core::iterate(["a", "b", "c"], 2, |batch| batches.push(batch.to_vec())).unwrap();
/// assert_eq!(batches, vec![vec!["a", "b"], vec!["c"]]);
/// ```
pub fn iterate<I, C, F>(source: I, capacity: C, on_flush: F) -> Result<(), ConfigError>
where
    I: IntoIterator,
    C: TryInto<Capacity>,
    C::Error: Into<ConfigError>,
    F: FnMut(&[I::Item]),
{
    let mut buffer: Buffer<I::Item, _> = Buffer::with_sink(capacity, FnFlush(on_flush))?;
    let Ok(()) = buffer.push_all(source);
    let Ok(()) = buffer.flush();
    Ok(())
}

/// Like [`iterate`], with a callback that can fail.
///
/// The first callback error stops iteration: no further source elements are
/// pulled and the error is returned as [`IterateError::Flush`].
pub fn try_iterate<I, C, F, E>(source: I, capacity: C, on_flush: F) -> Result<(), IterateError<E>>
where
    I: IntoIterator,
    C: TryInto<Capacity>,
    C::Error: Into<ConfigError>,
    F: FnMut(&[I::Item]) -> Result<(), E>,
{
    let mut buffer: Buffer<I::Item, _> = Buffer::with_sink(capacity, TryFnFlush(on_flush))?;
    buffer.push_all(source).map_err(IterateError::Flush)?;
    buffer.flush().map_err(IterateError::Flush)
}
