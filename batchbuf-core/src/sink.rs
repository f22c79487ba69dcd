//! Flush callbacks.

use alloc::vec::Vec;
use core::convert::Infallible;

/// Receives each batch a [`Buffer`](crate::Buffer) flushes.
pub trait OnFlush<T> {
    /// Error reported by a failed flush.
    type Error;

    /// Handle one batch. Items arrive in push order.
    ///
    /// Returning `Err` leaves the batch pending in the buffer.
    fn on_flush(&mut self, batch: &[T]) -> Result<(), Self::Error>;
}

impl<T, S: OnFlush<T> + ?Sized> OnFlush<T> for &mut S {
    type Error = S::Error;

    #[inline]
    fn on_flush(&mut self, batch: &[T]) -> Result<(), Self::Error> {
        (**self).on_flush(batch)
    }
}

/// Discards all batches.
#[derive(Debug, Clone, Copy, Default)]
pub struct DropBatches;

impl<T> OnFlush<T> for DropBatches {
    type Error = Infallible;

    #[inline]
    fn on_flush(&mut self, _batch: &[T]) -> Result<(), Infallible> {
        Ok(())
    }
}

/// Records a copy of every flushed batch.
#[derive(Debug, Clone)]
pub struct CollectBatches<T> {
    batches: Vec<Vec<T>>,
}

impl<T> CollectBatches<T> {
    /// Create an empty collector.
    pub fn new() -> Self {
        Self {
            batches: Vec::new(),
        }
    }

    /// Batches received so far, oldest first.
    pub fn batches(&self) -> &[Vec<T>] {
        &self.batches
    }

    /// Take the recorded batches, leaving an empty Vec.
    pub fn take(&mut self) -> Vec<Vec<T>> {
        core::mem::take(&mut self.batches)
    }

    /// Consume the collector and return the recorded batches.
    pub fn into_batches(self) -> Vec<Vec<T>> {
        self.batches
    }
}

impl<T> Default for CollectBatches<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> OnFlush<T> for CollectBatches<T> {
    type Error = Infallible;

    #[inline]
    fn on_flush(&mut self, batch: &[T]) -> Result<(), Infallible> {
        self.batches.push(batch.to_vec());
        Ok(())
    }
}

/// Calls an infallible closure with each batch.
#[derive(Debug)]
pub struct FnFlush<F>(pub F);

impl<T, F: FnMut(&[T])> OnFlush<T> for FnFlush<F> {
    type Error = Infallible;

    #[inline]
    fn on_flush(&mut self, batch: &[T]) -> Result<(), Infallible> {
        (self.0)(batch);
        Ok(())
    }
}

/// Calls a fallible closure with each batch.
#[derive(Debug)]
pub struct TryFnFlush<F>(pub F);

impl<T, E, F> OnFlush<T> for TryFnFlush<F>
where
    F: FnMut(&[T]) -> Result<(), E>,
{
    type Error = E;

    #[inline]
    fn on_flush(&mut self, batch: &[T]) -> Result<(), E> {
        (self.0)(batch)
    }
}
