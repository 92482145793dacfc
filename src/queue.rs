//! A bounded FIFO queue over `RingBuffer`.

use core::fmt;
use core::marker::PhantomData;

use tracing::trace;

use crate::behavior::{Behavior, Saturating, Wrapping};
use crate::error::CapacityError;
use crate::ringbuffer::{Iter, RingBuffer};
use crate::DEFAULT_CAPACITY;

/// A first-in first-out queue with a fixed capacity.
///
/// What happens when pushing onto a full queue is chosen by `B`:
/// [`Saturating`] rejects the new element, [`Wrapping`] evicts the oldest.
///
/// The queue is not internally synchronized; wrap it in a lock to share it
/// between threads.
///
/// # Examples
///
/// ```
/// use ringdeque::{BoundedQueue, Saturating, Wrapping};
///
/// let mut strict: BoundedQueue<_, Saturating> = BoundedQueue::with_capacity(2);
/// assert!(strict.push(1).is_ok());
/// assert!(strict.push(2).is_ok());
/// assert_eq!(strict.push(3).unwrap_err().element, 3);
///
/// let mut lossy: BoundedQueue<_, Wrapping> = BoundedQueue::with_capacity(2);
/// lossy.push(1);
/// lossy.push(2);
/// assert_eq!(lossy.push(3), Some(1));
/// assert_eq!(lossy.pop(), Some(2));
/// ```
pub struct BoundedQueue<T, B: Behavior = Saturating> {
    ring: RingBuffer<T>,
    behavior: PhantomData<B>,
}

impl<T, B: Behavior> BoundedQueue<T, B> {
    /// Creates an empty queue holding up to `DEFAULT_CAPACITY` elements.
    #[inline]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty queue holding up to `capacity` elements.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        BoundedQueue {
            ring: RingBuffer::with_capacity(capacity),
            behavior: PhantomData,
        }
    }

    /// Removes the oldest element and returns it, or `None` if the queue is
    /// empty.
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        self.ring.pop_front()
    }

    /// The oldest element, without removing it.
    #[inline]
    pub fn peek(&self) -> Option<&T> {
        self.ring.front()
    }

    /// Number of queued elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.ring.len()
    }

    /// Maximum number of queued elements.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.ring.capacity()
    }

    /// Returns true if nothing is queued.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    /// Returns true if the next push overflows.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.ring.is_full()
    }

    /// Drops every queued element.
    #[inline]
    pub fn clear(&mut self) {
        self.ring.clear();
    }

    /// Oldest-to-newest iterator.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        self.ring.iter()
    }

    /// Unwraps the underlying buffer.
    #[inline]
    pub fn into_inner(self) -> RingBuffer<T> {
        self.ring
    }
}

impl<T> BoundedQueue<T, Saturating> {
    /// Appends an element, or hands it back inside a `CapacityError` if the
    /// queue is full.
    pub fn push(&mut self, element: T) -> Result<(), CapacityError<T>> {
        if self.ring.is_full() {
            trace!(capacity = self.ring.capacity(), "saturating queue rejected push");
            return Err(CapacityError { element });
        }
        self.ring.push_back(element);
        Ok(())
    }
}

impl<T> BoundedQueue<T, Wrapping> {
    /// Appends an element, returning the evicted oldest element if the queue
    /// was full.
    pub fn push(&mut self, element: T) -> Option<T> {
        let evicted = if self.ring.is_full() {
            self.ring.pop_front()
        } else {
            None
        };
        self.ring.push_back(element);
        evicted
    }
}

impl<T, B: Behavior> Default for BoundedQueue<T, B> {
    #[inline]
    fn default() -> Self {
        BoundedQueue::new()
    }
}

impl<T: fmt::Debug, B: Behavior> fmt::Debug for BoundedQueue<T, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundedQueue")
            .field("capacity", &self.capacity())
            .field("items", &self.ring)
            .finish()
    }
}
