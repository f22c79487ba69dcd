//! Core implementation for batchbuf.
//!
//! A [`Buffer`] collects items until it holds [`Capacity`] of them, then lends
//! the whole batch to its [`OnFlush`] sink and starts over. [`iterate`] drives a
//! buffer over an input sequence, and [`relay`] turns every flushed batch into
//! values handed back lazily through an iterator.

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

mod buffer;
mod capacity;
mod error;
mod iterate;
mod relay;
mod sink;

#[cfg(test)]
mod tests;

pub use buffer::Buffer;
pub use capacity::Capacity;
pub use error::{ConfigError, IterateError};
pub use iterate::{iterate, try_iterate};
pub use relay::{FnTransform, Relay, Transform, TryFnTransform, TryRelay, relay, try_relay};
pub use sink::{CollectBatches, DropBatches, FnFlush, OnFlush, TryFnFlush};
