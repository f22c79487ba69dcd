//! Count-triggered batch buffer.

use alloc::vec::Vec;
use core::fmt;

use log::{debug, trace};

use crate::capacity::Capacity;
use crate::error::ConfigError;
use crate::sink::{FnFlush, OnFlush, TryFnFlush};

/// Upper bound on the pending storage reserved up front.
const MAX_PREALLOC: usize = 1024;

/// Buffer that hands its pending items to a sink once `capacity` is reached.
///
/// The batch is lent to the sink as a slice. Pending items are cleared only
/// after the sink returns `Ok`; a failed flush leaves them in place so the
/// caller can retry [`flush`](Self::flush) or drop them with
/// [`clear`](Self::clear). Dropping a buffer does not flush it.
///
/// ```
/// use batchbuf_core::Buffer;
///
/// let mut seen = Vec::new();
/// let mut buffer = Buffer::new(2, |batch: &[u32]| seen.push(batch.to_vec())).unwrap();
///
/// buffer.push(1).unwrap();
/// buffer.push(2).unwrap(); // flushes [1, 2]
/// buffer.push(3).unwrap();
/// buffer.flush().unwrap(); // flushes [3]
/// drop(buffer);
///
/// assert_eq!(seen, vec![vec![1, 2], vec![3]]);
/// ```
pub struct Buffer<T, S> {
    pending: Vec<T>,
    capacity: Capacity,
    sink: S,
}

impl<T, F: FnMut(&[T])> Buffer<T, FnFlush<F>> {
    /// Create a buffer that calls `on_flush` with every batch.
    ///
    /// Fails with [`ConfigError::InvalidConfiguration`] if `capacity` is not
    /// positive.
    pub fn new<C>(capacity: C, on_flush: F) -> Result<Self, ConfigError>
    where
        C: TryInto<Capacity>,
        C::Error: Into<ConfigError>,
    {
        Self::with_sink(capacity, FnFlush(on_flush))
    }
}

impl<T, E, F> Buffer<T, TryFnFlush<F>>
where
    F: FnMut(&[T]) -> Result<(), E>,
{
    /// Create a buffer whose flush callback can fail.
    ///
    /// Callback errors are returned from the [`push`](Self::push) or
    /// [`flush`](Self::flush) call that triggered them.
    pub fn try_new<C>(capacity: C, on_flush: F) -> Result<Self, ConfigError>
    where
        C: TryInto<Capacity>,
        C::Error: Into<ConfigError>,
    {
        Self::with_sink(capacity, TryFnFlush(on_flush))
    }
}

impl<T, S: OnFlush<T>> Buffer<T, S> {
    /// Create a buffer with a custom sink.
    pub fn with_sink<C>(capacity: C, sink: S) -> Result<Self, ConfigError>
    where
        C: TryInto<Capacity>,
        C::Error: Into<ConfigError>,
    {
        let capacity = capacity.try_into().map_err(Into::into)?;
        Ok(Self {
            pending: Vec::with_capacity(capacity.get().min(MAX_PREALLOC)),
            capacity,
            sink,
        })
    }

    /// Append an item, flushing if the buffer reaches capacity.
    #[inline]
    pub fn push(&mut self, item: T) -> Result<(), S::Error> {
        self.pending.push(item);
        if self.is_full() {
            self.flush()
        } else {
            Ok(())
        }
    }

    /// Push every item in order.
    ///
    /// Stops at the first failed flush. Pass `iter.by_ref()` to keep the
    /// items that were not reached.
    pub fn push_all<I: IntoIterator<Item = T>>(&mut self, items: I) -> Result<(), S::Error> {
        for item in items {
            self.push(item)?;
        }
        Ok(())
    }

    /// Hand the pending batch to the sink, then clear it.
    ///
    /// Does nothing when the buffer is empty. On error the batch stays
    /// pending.
    pub fn flush(&mut self) -> Result<(), S::Error> {
        if self.pending.is_empty() {
            return Ok(());
        }

        match self.sink.on_flush(&self.pending) {
            Ok(()) => {
                trace!("flushed batch of {} items", self.pending.len());
                self.pending.clear();
                Ok(())
            }
            Err(err) => {
                debug!(
                    "flush callback failed, retaining {} pending items",
                    self.pending.len()
                );
                Err(err)
            }
        }
    }
}

impl<T, S> Buffer<T, S> {
    /// Drop pending items without calling the sink.
    #[doc(alias = "clean")]
    #[doc(alias = "reset")]
    #[inline]
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Move the pending batch out without calling the sink.
    pub fn take(&mut self) -> Vec<T> {
        let reserve = self.capacity.get().min(MAX_PREALLOC);
        core::mem::replace(&mut self.pending, Vec::with_capacity(reserve))
    }

    /// Append an item. Once capacity is reached the batch is handed back
    /// to the caller instead of the sink.
    #[inline]
    pub fn push_take(&mut self, item: T) -> Option<Vec<T>> {
        self.pending.push(item);
        if self.is_full() {
            Some(self.take())
        } else {
            None
        }
    }

    /// Number of pending items.
    #[doc(alias = "count")]
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Returns `true` if nothing is pending.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Returns `true` if pending items have reached capacity.
    ///
    /// Only observable after a failed flush.
    #[inline]
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.pending.len() >= self.capacity.get()
    }

    /// Item count that triggers a flush.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    /// The pending batch, oldest first.
    #[inline]
    #[must_use]
    pub fn pending(&self) -> &[T] {
        &self.pending
    }

    /// Get a reference to the sink.
    pub fn inner(&self) -> &S {
        &self.sink
    }

    /// Get a mutable reference to the sink.
    pub fn inner_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Consume the buffer and return the sink. Pending items are dropped.
    pub fn into_inner(self) -> S {
        self.sink
    }
}

impl<T: fmt::Debug, S> fmt::Debug for Buffer<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("capacity", &self.capacity)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}
