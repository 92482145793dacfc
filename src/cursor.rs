//! Clamped random-access positions into a `RingBuffer`.

use core::cmp::{self, Ordering};
use core::fmt;
use core::ops::{Add, AddAssign, Sub, SubAssign};
use core::ptr;

use crate::ringbuffer::RingBuffer;
use crate::storage::{Global, RawAlloc};

/// A position in a `RingBuffer`: the buffer plus a logical index.
///
/// The element is looked up through the ring on every access, so a cursor
/// never caches a pointer into the backing store. Navigation never fails:
/// moving past `end()` stops at `end()`, moving before `begin()` stops at
/// `begin()`.
///
/// Cursors borrow their buffer, so none can outlive a structural mutation.
/// To mutate at a position, pass `index()` to the buffer.
///
/// # Examples
///
/// ```
/// use ringdeque::RingBuffer;
///
/// let ring = RingBuffer::from(['a', 'b', 'c']);
/// let mut cursor = ring.end();
/// cursor -= 1;
/// assert_eq!(cursor.get(), Some(&'c'));
/// assert_eq!(cursor.at(-2), Some(&'a'));
///
/// cursor -= 10;
/// assert!(cursor == ring.begin());
/// ```
pub struct Cursor<'a, T: 'a, A: RawAlloc + 'a = Global> {
    ring: &'a RingBuffer<T, A>,
    index: usize,
}

impl<'a, T, A: RawAlloc> Cursor<'a, T, A> {
    #[inline]
    pub(crate) fn new(ring: &'a RingBuffer<T, A>, index: usize) -> Self {
        debug_assert!(index <= ring.len());
        Cursor { ring, index }
    }

    /// Logical index of this position; `len()` for the end position.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// The element at this position, or `None` at the end.
    #[inline]
    pub fn get(&self) -> Option<&'a T> {
        self.ring.get(self.index)
    }

    /// The element `offset` places away, with the same clamping as `+`.
    #[inline]
    pub fn at(&self, offset: isize) -> Option<&'a T> {
        self.ring.get(self.clamped(offset))
    }

    /// Returns `true` if this is the end position.
    #[inline]
    pub fn is_end(&self) -> bool {
        self.index == self.ring.len()
    }

    /// Moves one place toward the back, stopping at the end.
    #[inline]
    pub fn step_forward(&mut self) -> &mut Self {
        self.index = self.clamped(1);
        self
    }

    /// Moves one place toward the front, stopping at the front.
    #[inline]
    pub fn step_back(&mut self) -> &mut Self {
        self.index = self.clamped(-1);
        self
    }

    /// Signed number of places from `self` to `other`, or `None` if they
    /// belong to different buffers.
    #[inline]
    pub fn distance_to(&self, other: &Self) -> Option<isize> {
        if !ptr::eq(self.ring, other.ring) {
            return None;
        }
        Some(other.index as isize - self.index as isize)
    }

    fn clamped(&self, offset: isize) -> usize {
        if offset >= 0 {
            cmp::min(self.index.saturating_add(offset as usize), self.ring.len())
        } else {
            self.index.saturating_sub(offset.unsigned_abs())
        }
    }
}

impl<'a, T, A: RawAlloc> Clone for Cursor<'a, T, A> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T, A: RawAlloc> Copy for Cursor<'a, T, A> {}

impl<'a, T, A: RawAlloc> Add<isize> for Cursor<'a, T, A> {
    type Output = Self;

    #[inline]
    fn add(mut self, offset: isize) -> Self {
        self += offset;
        self
    }
}

impl<'a, T, A: RawAlloc> Sub<isize> for Cursor<'a, T, A> {
    type Output = Self;

    #[inline]
    fn sub(mut self, offset: isize) -> Self {
        self -= offset;
        self
    }
}

impl<'a, T, A: RawAlloc> AddAssign<isize> for Cursor<'a, T, A> {
    #[inline]
    fn add_assign(&mut self, offset: isize) {
        self.index = self.clamped(offset);
    }
}

impl<'a, T, A: RawAlloc> SubAssign<isize> for Cursor<'a, T, A> {
    #[inline]
    fn sub_assign(&mut self, offset: isize) {
        self.index = match offset.checked_neg() {
            Some(back) => self.clamped(back),
            None => 0,
        };
    }
}

impl<'a, T, A: RawAlloc> PartialEq for Cursor<'a, T, A> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.ring, other.ring) && self.index == other.index
    }
}

impl<'a, T, A: RawAlloc> Eq for Cursor<'a, T, A> {}

impl<'a, T, A: RawAlloc> PartialOrd for Cursor<'a, T, A> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if ptr::eq(self.ring, other.ring) {
            Some(self.index.cmp(&other.index))
        } else {
            None
        }
    }
}

impl<'a, T, A: RawAlloc> fmt::Debug for Cursor<'a, T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("index", &self.index)
            .field("len", &self.ring.len())
            .finish()
    }
}
