//! A growable circular buffer with deque semantics.
//!
//! `RingBuffer` has `O(1)` pushes and pops at both ends and `O(1)` indexing
//! like a vector. Insertion and removal at an arbitrary position shift the
//! elements behind it. The contained elements are not required to be
//! copyable or default-constructible.
//!
//! Pushing onto a full buffer evicts the front element instead of failing;
//! the buffer only grows when asked to through `reserve`.
//!
//! # Feature Flags
//! The **ringdeque** crate has the following cargo feature flags:
//!
//! - `std`
//!   - Optional, enabled by default
//!   - Use libstd; without it the crate only needs `alloc`
//!
//!
//! - `serde`
//!   - Optional
//!   - Serialize a buffer as a sequence, front to back
//!
//! # Usage
//!
//! First, add the following to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! ringdeque = "0.1"
//! ```
//!
//! # Capacity
//!
//! The backing store always has one slot more than `capacity()`. The spare
//! slot lets the buffer tell "empty" from "full" by its two indices alone.
//! [Read more]
//!
//! [Read more]: https://en.wikipedia.org/wiki/Circular_buffer
//!
//! # Examples
//! ```
//! use ringdeque::RingBuffer;
//!
//! let mut ring = RingBuffer::with_capacity(4);
//! assert_eq!(ring.capacity(), 4);
//!
//! for i in 0..4 {
//!     ring.push_back(i);
//! }
//! assert_eq!(ring.front(), Some(&0));
//! assert_eq!(ring.back(), Some(&3));
//!
//! // full: the front makes room
//! ring.push_back(4);
//! assert_eq!(ring.len(), 4);
//! assert_eq!(ring.front(), Some(&1));
//! assert_eq!(ring.back(), Some(&4));
//! ```
//!
//! # Insert & Erase
//! ```
//! use ringdeque::RingBuffer;
//!
//! let mut ring = RingBuffer::from([0, 1, 2, 3]);
//!
//! // full: the back makes room
//! ring.insert(ring.begin().index(), 9);
//! assert_eq!(ring, [9, 0, 1, 2]);
//!
//! let next = ring.erase(1);
//! assert_eq!(ring[next], 1);
//! assert_eq!(ring, [9, 1, 2]);
//! ```
//!
//! # Growth
//! ```
//! use ringdeque::RingBuffer;
//!
//! let mut ring: RingBuffer<_> = (0..3).collect();
//! ring.reserve(6);
//! ring.extend(3..6);
//! assert_eq!(ring, [0, 1, 2, 3, 4, 5]);
//! ```

#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![deny(missing_docs)]

extern crate alloc;

mod behavior;
mod cursor;
pub mod error;
mod queue;
mod ringbuffer;
mod storage;
mod tracker;
mod utils;

pub use behavior::{Behavior, Saturating, Wrapping};
pub use cursor::Cursor;
pub use error::{CapacityError, ReserveError};
pub use queue::BoundedQueue;
pub use ringbuffer::{IntoIter, Iter, IterMut, RingBuffer};
pub use storage::{Global, RawAlloc};

/// Capacity used by `RingBuffer::new` and `BoundedQueue::new`.
pub const DEFAULT_CAPACITY: usize = 16;
