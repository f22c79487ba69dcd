extern crate std;

use core::cell::Cell;
use std::{format, vec, vec::Vec};

use super::Refused;
use crate::{Buffer, ConfigError, Relay, Transform, TryRelay, relay, try_relay};

use alloc::collections::VecDeque;

#[test]
fn empty_source_yields_nothing() {
    let calls = Cell::new(0);
    let out: Vec<&str> = relay(Vec::<&str>::new(), 2, |batch| {
        calls.set(calls.get() + 1);
        batch
    })
    .unwrap()
    .collect();

    assert!(out.is_empty());
    assert_eq!(calls.get(), 0);
}

#[test]
fn identity_transform_yields_every_input() {
    let items = ["value1", "value2", "value3"];
    let out: Vec<_> = relay(items, 2, |batch| batch).unwrap().collect();
    assert_eq!(out, items);
}

#[test]
fn outputs_follow_batch_order() {
    let out: Vec<_> = relay(1..=7, 3, |batch| {
        let sum: i32 = batch.iter().sum();
        [sum, batch.len() as i32]
    })
    .unwrap()
    .collect();

    assert_eq!(out, vec![6, 3, 15, 3, 7, 1]);
}

#[test]
fn silent_batches_are_skipped() {
    // Only batches containing an even number produce output
    let out: Vec<_> = relay([1, 3, 2, 5, 7, 9, 4], 2, |batch| {
        batch.iter().copied().filter(|n| n % 2 == 0).collect::<Vec<_>>()
    })
    .unwrap()
    .collect();

    assert_eq!(out, vec![2, 4]);
}

#[test]
fn nothing_pulled_before_first_next() {
    let pulled = Cell::new(0);
    let source = (0..10).inspect(|_| pulled.set(pulled.get() + 1));

    let mut relayed = relay(source, 2, |batch| batch).unwrap();
    assert_eq!(pulled.get(), 0);

    assert_eq!(relayed.next(), Some(0));
    assert_eq!(pulled.get(), 2);
}

#[test]
fn queue_drained_before_pulling_more() {
    let pulled = Cell::new(0);
    let source = (0..10).inspect(|_| pulled.set(pulled.get() + 1));

    let mut relayed = relay(source, 2, |batch| batch).unwrap();
    assert_eq!(relayed.next(), Some(0));
    assert_eq!(relayed.size_hint(), (1, None));
    assert_eq!(relayed.next(), Some(1));
    assert_eq!(pulled.get(), 2);

    assert_eq!(relayed.next(), Some(2));
    assert_eq!(pulled.get(), 4);
}

#[test]
fn dropping_early_stops_callbacks() {
    let pulled = Cell::new(0);
    let calls = Cell::new(0);
    let source = (0..100).inspect(|_| pulled.set(pulled.get() + 1));

    let first: Vec<_> = relay(source, 5, |batch| {
        calls.set(calls.get() + 1);
        batch
    })
    .unwrap()
    .take(3)
    .collect();

    assert_eq!(first, vec![0, 1, 2]);
    assert_eq!(pulled.get(), 5);
    assert_eq!(calls.get(), 1);
}

#[test]
fn trailing_partial_batch_is_relayed() {
    let out: Vec<Vec<char>> = relay("abcde".chars(), 2, |batch| [batch])
        .unwrap()
        .collect();
    assert_eq!(out, vec![vec!['a', 'b'], vec!['c', 'd'], vec!['e']]);
}

#[test]
fn fused_after_exhaustion() {
    let mut relayed = relay([1], 1, |batch| batch).unwrap();
    assert_eq!(relayed.next(), Some(1));
    assert_eq!(relayed.next(), None);
    assert_eq!(relayed.next(), None);
    assert_eq!(relayed.size_hint(), (0, Some(0)));
}

#[test]
fn invalid_capacity_rejected() {
    let result = relay([1, 2], 0, |batch| batch);
    assert_eq!(
        result.err(),
        Some(ConfigError::InvalidConfiguration { capacity: 0 })
    );
}

#[test]
fn try_relay_passes_values_through() {
    let out: Result<Vec<_>, Refused> =
        try_relay(1..=4, 2, |batch| Ok(batch)).unwrap().collect();
    assert_eq!(out, Ok(vec![1, 2, 3, 4]));
}

#[test]
fn try_relay_yields_error_once() {
    let pulled = Cell::new(0);
    let source = (0..10).inspect(|_| pulled.set(pulled.get() + 1));

    let mut relayed = try_relay(source, 2, |batch| {
        if batch[0] >= 2 {
            Err(Refused)
        } else {
            Ok(batch)
        }
    })
    .unwrap();

    assert_eq!(relayed.next(), Some(Ok(0)));
    assert_eq!(relayed.next(), Some(Ok(1)));
    assert_eq!(relayed.next(), Some(Err(Refused)));
    assert_eq!(relayed.next(), None);
    assert_eq!(relayed.next(), None);
    assert_eq!(pulled.get(), 4);
}

struct Chunked;

impl Transform<u8> for Chunked {
    type Output = u16;
    type Error = core::convert::Infallible;

    fn transform(&mut self, batch: Vec<u8>, relay: &mut VecDeque<u16>) -> Result<(), Self::Error> {
        relay.extend(batch.chunks(2).map(|pair| match pair {
            [hi, lo] => u16::from_be_bytes([*hi, *lo]),
            [hi] => u16::from(*hi) << 8,
            _ => unreachable!(),
        }));
        Ok(())
    }
}

#[test]
fn custom_transform_with_relay_new() {
    let out: Vec<u16> = Relay::new([0x12u8, 0x34, 0x56, 0x78, 0x9a], 4, Chunked)
        .unwrap()
        .collect();
    assert_eq!(out, vec![0x1234, 0x5678, 0x9a00]);
}

/// Items that can only be moved, never copied.
#[derive(Debug, PartialEq, Eq)]
struct Ticket(u32);

#[test]
fn identity_relays_non_clone_items() {
    let out: Vec<Ticket> = relay((1..=5).map(Ticket), 2, |batch| batch)
        .unwrap()
        .collect();
    assert_eq!(
        out,
        vec![Ticket(1), Ticket(2), Ticket(3), Ticket(4), Ticket(5)]
    );
}

#[test]
fn transform_can_return_lazy_iterator_over_batch() {
    let out: Vec<u32> = relay([1u32, 2, 3], 2, |batch| batch.into_iter().map(|n| n * 10))
        .unwrap()
        .collect();
    assert_eq!(out, vec![10, 20, 30]);
}

/// Queues the first item of every batch, then refuses batches holding 2 or more.
struct FirstThenRefuse;

impl Transform<i32> for FirstThenRefuse {
    type Output = i32;
    type Error = Refused;

    fn transform(&mut self, batch: Vec<i32>, relay: &mut VecDeque<i32>) -> Result<(), Refused> {
        relay.push_back(batch[0]);
        if batch.iter().any(|n| *n >= 2) {
            return Err(Refused);
        }
        Ok(())
    }
}

#[test]
fn failing_transform_output_is_discarded() {
    let out: Vec<Result<i32, Refused>> = TryRelay::new(0..6, 2, FirstThenRefuse)
        .unwrap()
        .collect();
    assert_eq!(out, vec![Ok(0), Err(Refused)]);
}

#[test]
fn buffer_hands_back_full_batches() {
    let mut buffer = Buffer::<Ticket, _>::with_sink(2, crate::DropBatches).unwrap();

    assert_eq!(buffer.push_take(Ticket(1)), None);
    assert_eq!(buffer.push_take(Ticket(2)), Some(vec![Ticket(1), Ticket(2)]));
    assert!(buffer.is_empty());

    assert_eq!(buffer.push_take(Ticket(3)), None);
    assert_eq!(buffer.take(), vec![Ticket(3)]);
    assert!(buffer.take().is_empty());
}

#[test]
fn debug_shows_buffer_and_queue() {
    let mut relayed = relay([1, 2, 3], 2, |batch| batch).unwrap();
    assert_eq!(
        format!("{relayed:?}"),
        "Relay { buffer: Buffer { capacity: Capacity(2), pending: [], .. }, queued: 0, exhausted: false, .. }"
    );

    assert_eq!(relayed.next(), Some(1));
    assert_eq!(
        format!("{relayed:?}"),
        "Relay { buffer: Buffer { capacity: Capacity(2), pending: [], .. }, queued: 1, exhausted: false, .. }"
    );

    let failing = try_relay([1], 1, |_| Err::<Vec<i32>, _>(Refused)).unwrap();
    assert!(format!("{failing:?}").starts_with("TryRelay { buffer: Buffer {"));
}
