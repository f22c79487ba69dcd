//! A `no_std` item buffer that hands each full batch to a callback.
//!
//! # Buffer
//!
//! ```
//! use batchbuf::Buffer;
//!
//! let mut batches = Vec::new();
//! let mut buffer = Buffer::new(3, |batch: &[i32]| batches.push(batch.to_vec())).unwrap();
//!
//! buffer.push(1).unwrap();
//! buffer.push(2).unwrap();
//! buffer.push(3).unwrap(); // Flushes [1, 2, 3]
//! buffer.push(4).unwrap();
//! buffer.flush().unwrap(); // Flushes [4]
//! drop(buffer);
//!
//! assert_eq!(batches, vec![vec![1, 2, 3], vec![4]]);
//! ```
//!
//! # Driving a whole sequence
//!
//! ```
//! let mut sizes = Vec::new();
//! batchbuf::iterate(0..10, 4, |batch| sizes.push(batch.len())).unwrap();
//! assert_eq!(sizes, vec![4, 4, 2]);
//!
//! // Values derived from each batch, produced lazily
//! let maxima: Vec<i32> = batchbuf::relay([3, 9, 4, 1, 7], 2, |batch| batch.iter().max().copied())
//!     .unwrap()
//!     .collect();
//! assert_eq!(maxima, vec![9, 4, 7]);
//! ```
//!
//! # Failing callbacks
//!
//! A flush that returns `Err` leaves the batch pending, so it can be retried:
//!
//! ```
//! use batchbuf::Buffer;
//!
//! let online = false;
//! let mut buffer = Buffer::try_new(2, |_batch: &[&str]| {
//!     if online { Ok(()) } else { Err("offline") }
//! })
//! .unwrap();
//!
//! buffer.push("a").unwrap();
//! assert_eq!(buffer.push("b"), Err("offline"));
//! assert_eq!(buffer.pending(), ["a", "b"]);
//! ```

#![no_std]
#![warn(missing_docs)]

pub use batchbuf_core::{
    Buffer, Capacity, CollectBatches, ConfigError, DropBatches, FnFlush, FnTransform,
    IterateError, OnFlush, Relay, Transform, TryFnFlush, TryFnTransform, TryRelay,
    iterate, relay, try_iterate, try_relay,
};
