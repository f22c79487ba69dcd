//! Lazily relay values derived from each full batch.
//!
//! A [`Relay`] owns its source, a [`Buffer`] and a [`Transform`]. Whenever the
//! buffer fills up, the batch is moved out and handed to the transform, whose
//! output is queued. Each call to `next` drains that queue first and only
//! pulls another source element once the queue is empty, so dropping the
//! iterator early stops all further work.

use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::convert::Infallible;
use core::fmt;
use core::iter::FusedIterator;

use log::trace;

use crate::buffer::Buffer;
use crate::capacity::Capacity;
use crate::error::ConfigError;
use crate::sink::DropBatches;

/// Turns a batch into values to relay.
pub trait Transform<T> {
    /// Value handed on to the consumer.
    type Output;

    /// Error reported by a failed transform.
    type Error;

    /// Append the values derived from `batch` to `relay`, in order.
    ///
    /// The batch is owned, so items can be relayed without copying.
    fn transform(
        &mut self,
        batch: Vec<T>,
        relay: &mut VecDeque<Self::Output>,
    ) -> Result<(), Self::Error>;
}

/// Transform from an infallible closure returning any `IntoIterator`.
#[derive(Debug)]
pub struct FnTransform<F>(pub F);

impl<T, F, J> Transform<T> for FnTransform<F>
where
    F: FnMut(Vec<T>) -> J,
    J: IntoIterator,
{
    type Output = J::Item;
    type Error = Infallible;

    #[inline]
    fn transform(&mut self, batch: Vec<T>, relay: &mut VecDeque<J::Item>) -> Result<(), Infallible> {
        relay.extend((self.0)(batch));
        Ok(())
    }
}

/// Transform from a fallible closure.
#[derive(Debug)]
pub struct TryFnTransform<F>(pub F);

impl<T, E, F, J> Transform<T> for TryFnTransform<F>
where
    F: FnMut(Vec<T>) -> Result<J, E>,
    J: IntoIterator,
{
    type Output = J::Item;
    type Error = E;

    #[inline]
    fn transform(&mut self, batch: Vec<T>, relay: &mut VecDeque<J::Item>) -> Result<(), E> {
        relay.extend((self.0)(batch)?);
        Ok(())
    }
}

struct Pump<I: Iterator, X, U> {
    /// `None` once the source is exhausted or a transform failed.
    source: Option<I>,
    buffer: Buffer<I::Item, DropBatches>,
    transform: X,
    queue: VecDeque<U>,
}

impl<I, X, U> Pump<I, X, U>
where
    I: Iterator,
    X: Transform<I::Item, Output = U>,
{
    fn new<C>(source: I, capacity: C, transform: X) -> Result<Self, ConfigError>
    where
        C: TryInto<Capacity>,
        C::Error: Into<ConfigError>,
    {
        Ok(Self {
            source: Some(source),
            buffer: Buffer::with_sink(capacity, DropBatches)?,
            transform,
            queue: VecDeque::new(),
        })
    }

    fn advance(&mut self) -> Option<Result<U, X::Error>> {
        loop {
            if let Some(value) = self.queue.pop_front() {
                return Some(Ok(value));
            }

            let source = self.source.as_mut()?;
            let batch = match source.next() {
                Some(item) => match self.buffer.push_take(item) {
                    Some(batch) => batch,
                    None => continue,
                },
                None => {
                    self.source = None;
                    if self.buffer.is_empty() {
                        continue;
                    }
                    trace!(
                        "relay source exhausted, transforming {} pending items",
                        self.buffer.len()
                    );
                    self.buffer.take()
                }
            };

            if let Err(err) = self.transform.transform(batch, &mut self.queue) {
                self.source = None;
                self.queue.clear();
                return Some(Err(err));
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let queued = self.queue.len();
        match self.source {
            Some(_) => (queued, None),
            None => (queued, Some(queued)),
        }
    }
}

impl<I, X, U> Pump<I, X, U>
where
    I: Iterator,
    I::Item: fmt::Debug,
{
    fn debug_fields(&self, name: &str, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(name)
            .field("buffer", &self.buffer)
            .field("queued", &self.queue.len())
            .field("exhausted", &self.source.is_none())
            .finish_non_exhaustive()
    }
}

/// Iterator over the values a [`Transform`] derives from each batch.
///
/// Created by [`relay`] or [`Relay::new`]. Single pass: once it returns
/// `None` it stays exhausted.
pub struct Relay<I: Iterator, X, U> {
    pump: Pump<I, X, U>,
}

impl<I, X, U> Relay<I, X, U>
where
    I: Iterator,
    X: Transform<I::Item, Output = U, Error = Infallible>,
{
    /// Relay `source` through batches of `capacity` using a custom transform.
    ///
    /// Nothing is pulled from `source` until the first call to `next`.
    pub fn new<S, C>(source: S, capacity: C, transform: X) -> Result<Self, ConfigError>
    where
        S: IntoIterator<IntoIter = I>,
        C: TryInto<Capacity>,
        C::Error: Into<ConfigError>,
    {
        Ok(Self {
            pump: Pump::new(source.into_iter(), capacity, transform)?,
        })
    }
}

impl<I, X, U> Iterator for Relay<I, X, U>
where
    I: Iterator,
    X: Transform<I::Item, Output = U, Error = Infallible>,
{
    type Item = U;

    #[inline]
    fn next(&mut self) -> Option<U> {
        self.pump.advance().map(|step| match step {
            Ok(value) => value,
            Err(never) => match never {},
        })
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.pump.size_hint()
    }
}

impl<I, X, U> FusedIterator for Relay<I, X, U>
where
    I: Iterator,
    X: Transform<I::Item, Output = U, Error = Infallible>,
{
}

impl<I, X, U> fmt::Debug for Relay<I, X, U>
where
    I: Iterator,
    I::Item: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.pump.debug_fields("Relay", f)
    }
}

/// Fallible counterpart of [`Relay`].
///
/// A transform error is yielded once as `Some(Err(_))`. After that the
/// iterator is exhausted: the source is dropped unread and any values the
/// failing transform had already queued are discarded.
pub struct TryRelay<I: Iterator, X, U> {
    pump: Pump<I, X, U>,
}

impl<I, X, U> TryRelay<I, X, U>
where
    I: Iterator,
    X: Transform<I::Item, Output = U>,
{
    /// Relay `source` through batches of `capacity` using a custom transform.
    pub fn new<S, C>(source: S, capacity: C, transform: X) -> Result<Self, ConfigError>
    where
        S: IntoIterator<IntoIter = I>,
        C: TryInto<Capacity>,
        C::Error: Into<ConfigError>,
    {
        Ok(Self {
            pump: Pump::new(source.into_iter(), capacity, transform)?,
        })
    }
}

impl<I, X, U> Iterator for TryRelay<I, X, U>
where
    I: Iterator,
    X: Transform<I::Item, Output = U>,
{
    type Item = Result<U, X::Error>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.pump.advance()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.pump.size_hint()
    }
}

impl<I, X, U> FusedIterator for TryRelay<I, X, U>
where
    I: Iterator,
    X: Transform<I::Item, Output = U>,
{
}

impl<I, X, U> fmt::Debug for TryRelay<I, X, U>
where
    I: Iterator,
    I::Item: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.pump.debug_fields("TryRelay", f)
    }
}

/// Push `source` through batches of `capacity` and lazily yield whatever
/// `on_transform` derives from each batch.
///
/// The transform owns each batch, so it can hand items straight back.
/// Outputs of one batch are yielded in order before the next source element
/// is pulled. A batch may produce no values at all.
///
/// ```
/// let sums: Vec<u32> = batchbuf_core::relay(1..=5u32, 2, |batch| [batch.iter().sum::<u32>()])
///     .unwrap()
///     .collect();
/// assert_eq!(sums, vec![3, 7, 5]);
/// ```
pub fn relay<I, C, F, J>(
    source: I,
    capacity: C,
    on_transform: F,
) -> Result<Relay<I::IntoIter, FnTransform<F>, J::Item>, ConfigError>
where
    I: IntoIterator,
    C: TryInto<Capacity>,
    C::Error: Into<ConfigError>,
    F: FnMut(Vec<I::Item>) -> J,
    J: IntoIterator,
{
    Relay::new(source, capacity, FnTransform(on_transform))
}

/// Like [`relay`], with a transform that can fail.
pub fn try_relay<I, C, F, J, E>(
    source: I,
    capacity: C,
    on_transform: F,
) -> Result<TryRelay<I::IntoIter, TryFnTransform<F>, J::Item>, ConfigError>
where
    I: IntoIterator,
    C: TryInto<Capacity>,
    C::Error: Into<ConfigError>,
    F: FnMut(Vec<I::Item>) -> Result<J, E>,
    J: IntoIterator,
{
    TryRelay::new(source, capacity, TryFnTransform(on_transform))
}
