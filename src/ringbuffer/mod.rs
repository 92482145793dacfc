use core::cmp;
use core::marker::PhantomData;
use core::mem;
use core::ptr::{self, NonNull};
use core::slice;

use tracing::{debug, trace};

use crate::cursor::Cursor;
use crate::error::ReserveError;
use crate::storage::{Global, RawAlloc};
use crate::tracker::{Construction, Tracker};
use crate::utils::{advance, span};
use crate::DEFAULT_CAPACITY;

use self::internal::handle_reserve_error;

mod internal;
mod iterator_impls;
mod trait_impls;

pub use self::iterator_impls::{IntoIter, Iter, IterMut};

/// A growable ring buffer.
///
/// The "default" usage of this type as a queue is to use `push_back` to add to
/// the queue, and `pop_front` to remove from the queue. `extend` pushes onto
/// the back in this manner, and iterating over `RingBuffer` goes front to
/// back.
///
/// Pushing onto a full buffer never fails and never grows it: the front
/// element is evicted instead. Growth only happens through `reserve`.
///
/// # Capacity
///
/// The backing store always has `capacity() + 1` slots. The spare slot lets
/// `start == write` mean "empty" without a separate length field.
pub struct RingBuffer<T, A: RawAlloc = Global> {
    buf: NonNull<T>,
    slots: usize,
    start: usize,
    write: usize,
    constructed: Construction,
    alloc: A,
    marker: PhantomData<T>,
}

unsafe impl<T: Send, A: RawAlloc + Send> Send for RingBuffer<T, A> {}
unsafe impl<T: Sync, A: RawAlloc + Sync> Sync for RingBuffer<T, A> {}

impl<T> RingBuffer<T> {
    /// Creates an empty `RingBuffer` holding up to `DEFAULT_CAPACITY`
    /// elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::{RingBuffer, DEFAULT_CAPACITY};
    ///
    /// let ring: RingBuffer<u32> = RingBuffer::new();
    /// assert_eq!(ring.capacity(), DEFAULT_CAPACITY);
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty `RingBuffer` holding up to `capacity` elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::RingBuffer;
    ///
    /// let ring: RingBuffer<String> = RingBuffer::with_capacity(4);
    /// assert_eq!(ring.capacity(), 4);
    /// assert!(ring.is_empty());
    /// ```
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_in(capacity, Global)
    }

    /// Creates a full `RingBuffer` of `capacity` clones of `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::RingBuffer;
    ///
    /// let ring = RingBuffer::filled(3, 'x');
    /// assert!(ring.is_full());
    /// assert_eq!(ring, ['x', 'x', 'x']);
    /// ```
    pub fn filled(capacity: usize, value: T) -> Self
        where T: Clone
    {
        let mut ring = Self::with_capacity(capacity);
        for _ in 0..capacity {
            ring.push_back(value.clone());
        }
        ring
    }
}

impl<T, A: RawAlloc> RingBuffer<T, A> {
    /// Creates an empty `RingBuffer` of `DEFAULT_CAPACITY` that takes its
    /// storage from `alloc`.
    #[inline]
    pub fn new_in(alloc: A) -> Self {
        Self::with_capacity_in(DEFAULT_CAPACITY, alloc)
    }

    /// Creates an empty `RingBuffer` holding up to `capacity` elements that
    /// takes its storage from `alloc`.
    ///
    /// # Panics
    ///
    /// Panics if the backing store size overflows; aborts through
    /// `handle_alloc_error` if the allocation fails.
    pub fn with_capacity_in(capacity: usize, alloc: A) -> Self {
        let slots = match capacity.checked_add(1) {
            Some(slots) => slots,
            None => handle_reserve_error(ReserveError::CapacityOverflow),
        };
        let buf = match alloc.allocate::<T>(slots) {
            Ok(buf) => buf,
            Err(err) => handle_reserve_error(err),
        };
        RingBuffer {
            buf,
            slots,
            start: 0,
            write: 0,
            constructed: Construction::for_type::<T>(slots),
            alloc,
            marker: PhantomData,
        }
    }

    /// Returns a reference to the allocation strategy.
    #[inline]
    pub fn allocator(&self) -> &A {
        &self.alloc
    }

    /// Returns the number of elements in the `RingBuffer`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::RingBuffer;
    ///
    /// let mut ring = RingBuffer::with_capacity(4);
    /// assert_eq!(ring.len(), 0);
    /// ring.push_back(1);
    /// assert_eq!(ring.len(), 1);
    /// ```
    #[inline]
    pub fn len(&self) -> usize {
        span(self.start, self.write, self.slots)
    }

    /// Return the capacity of the `RingBuffer`.
    ///
    /// This is always one less than the number of slots in the backing store.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots - 1
    }

    /// Largest capacity the allocation strategy could ever provide.
    #[inline]
    pub fn max_size(&self) -> usize {
        self.alloc.max_size::<T>().saturating_sub(1)
    }

    /// Returns true if the buffer contains no elements
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.write
    }

    /// Returns true if the buffer is full.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::RingBuffer;
    ///
    /// let mut ring = RingBuffer::with_capacity(1);
    /// assert!(!ring.is_full());
    /// ring.push_back(1);
    /// assert!(ring.is_full());
    /// ```
    #[inline]
    pub fn is_full(&self) -> bool {
        self.len() == self.capacity()
    }

    /// Grows the buffer so it can hold at least `new_capacity` elements.
    ///
    /// Does nothing if `new_capacity <= capacity()`. The threshold is the
    /// visible capacity, not the slot count, so `reserve(capacity() + 1)`
    /// always grows by one. Elements keep
    /// their values and order; the front moves to the first slot of the new
    /// store.
    ///
    /// # Panics
    ///
    /// Panics if the new capacity overflows; aborts through
    /// `handle_alloc_error` if the allocation fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::RingBuffer;
    ///
    /// let mut ring = RingBuffer::from([1, 2, 3]);
    /// assert!(ring.is_full());
    ///
    /// ring.reserve(8);
    /// assert_eq!(ring.capacity(), 8);
    /// assert_eq!(ring, [1, 2, 3]);
    /// ```
    pub fn reserve(&mut self, new_capacity: usize) {
        if let Err(err) = self.try_reserve(new_capacity) {
            handle_reserve_error(err);
        }
    }

    /// Fallible version of `reserve`.
    ///
    /// On error the buffer is left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::{RingBuffer, ReserveError};
    ///
    /// let mut ring: RingBuffer<u64> = RingBuffer::with_capacity(2);
    /// assert_eq!(ring.try_reserve(usize::MAX), Err(ReserveError::CapacityOverflow));
    /// assert_eq!(ring.try_reserve(10), Ok(()));
    /// assert_eq!(ring.capacity(), 10);
    /// ```
    pub fn try_reserve(&mut self, new_capacity: usize) -> Result<(), ReserveError> {
        if new_capacity <= self.capacity() {
            return Ok(());
        }
        let slots = new_capacity.checked_add(1).ok_or(ReserveError::CapacityOverflow)?;
        let buf = self.alloc.allocate::<T>(slots)?;
        let len = self.len();

        unsafe {
            for i in 0..len {
                let src = self.physical(i);
                let value = self.take(src);
                self.alloc.construct(buf.as_ptr().add(i), value);
            }
        }

        debug!(old_capacity = self.capacity(),
               new_capacity,
               len,
               "ring buffer grew");

        let old_buf = mem::replace(&mut self.buf, buf);
        let old_slots = mem::replace(&mut self.slots, slots);
        let mut old_constructed = mem::replace(&mut self.constructed,
                                               Construction::for_type::<T>(slots));
        self.start = 0;
        self.write = len;
        for i in 0..len {
            self.constructed.set_constructed(i, true);
        }

        // stale values left behind by eviction; a panic leaks the old store
        unsafe {
            for physical in 0..old_slots {
                if old_constructed.is_constructed(physical) {
                    old_constructed.set_constructed(physical, false);
                    self.alloc.destroy(old_buf.as_ptr().add(physical));
                }
            }
            self.alloc.deallocate(old_buf, old_slots);
        }
        Ok(())
    }

    /// Clears the buffer, removing all values.
    ///
    /// The capacity is unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::RingBuffer;
    ///
    /// let mut ring = RingBuffer::with_capacity(4);
    /// ring.push_back(1);
    /// ring.clear();
    /// assert!(ring.is_empty());
    /// assert_eq!(ring.capacity(), 4);
    /// ```
    pub fn clear(&mut self) {
        let len = self.len();
        let start = self.start;
        // empty first, so a panicking destructor leaves the rest as stale
        // values rather than as live elements
        self.write = start;
        for i in 0..len {
            let physical = advance(start, i, self.slots);
            unsafe { self.release(physical) }
        }
        self.start = 0;
        self.write = 0;
    }

    /// Appends an element to the back of the buffer.
    ///
    /// If the buffer is full the front element is evicted to make room.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::RingBuffer;
    ///
    /// let mut ring = RingBuffer::with_capacity(2);
    /// ring.push_back(1);
    /// ring.push_back(2);
    /// ring.push_back(3);
    /// assert_eq!(ring, [2, 3]);
    /// ```
    pub fn push_back(&mut self, element: T) {
        if self.is_full() {
            trace!(capacity = self.capacity(), "push onto full ring buffer evicts front");
        }
        let write = self.write;
        let stale = unsafe {
            let stale = self.vacate(write);
            self.place(write, element);
            stale
        };
        self.increment_indices();
        if let Some(stale) = stale {
            self.dispose(stale);
        }
    }

    /// Appends the element produced by `make` to the back of the buffer.
    ///
    /// Behaves like `push_back` otherwise.
    #[inline]
    pub fn emplace_back<F>(&mut self, make: F)
        where F: FnOnce() -> T
    {
        self.push_back(make());
    }

    /// Removes the first element and returns it, or `None` if the buffer is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::RingBuffer;
    ///
    /// let mut ring = RingBuffer::with_capacity(3);
    /// ring.push_back(1);
    /// ring.push_back(2);
    ///
    /// assert_eq!(ring.pop_front(), Some(1));
    /// assert_eq!(ring.pop_front(), Some(2));
    /// assert_eq!(ring.pop_front(), None);
    /// ```
    pub fn pop_front(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let start = self.start;
        let element = unsafe { self.take(start) };
        self.increment_start();
        Some(element)
    }

    /// Removes the last element and returns it, or `None` if the buffer is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::RingBuffer;
    ///
    /// let mut ring = RingBuffer::with_capacity(3);
    /// assert_eq!(ring.pop_back(), None);
    /// ring.push_back(1);
    /// ring.push_back(3);
    /// assert_eq!(ring.pop_back(), Some(3));
    /// ```
    pub fn pop_back(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        self.decrement_write();
        let write = self.write;
        Some(unsafe { self.take(write) })
    }

    /// Inserts an element at logical position `index`, shifting every
    /// element from `index` to the back one place toward the back.
    ///
    /// Returns the position of the inserted element. An `index` at or past
    /// the end appends like `push_back`.
    ///
    /// If the buffer is full the **back** element is evicted to make room.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::RingBuffer;
    ///
    /// let mut ring = RingBuffer::with_capacity(4);
    /// ring.extend([10, 12]);
    /// assert_eq!(ring.insert(1, 11), 1);
    /// assert_eq!(ring, [10, 11, 12]);
    ///
    /// ring.push_back(13);
    /// ring.insert(0, 9);
    /// assert_eq!(ring, [9, 10, 11, 12]);
    /// ```
    pub fn insert(&mut self, index: usize, element: T) -> usize {
        let len = self.len();
        if index >= len {
            self.push_back(element);
            return self.len().saturating_sub(1);
        }

        let full = self.is_full();
        let last = if full {
            trace!(capacity = self.capacity(), index, "insert into full ring buffer evicts back");
            len - 1
        } else {
            len
        };

        // the evicted back, or a stale value in the write slot
        let displaced = unsafe {
            let displaced = self.vacate(self.physical(last));
            for i in (index..last).rev() {
                let src = self.physical(i);
                let dst = self.physical(i + 1);
                self.relocate(src, dst);
            }
            let hole = self.physical(index);
            self.place(hole, element);
            displaced
        };

        if !full {
            self.increment_indices();
        }
        if let Some(displaced) = displaced {
            self.dispose(displaced);
        }
        index
    }

    /// Inserts the element produced by `make` at logical position `index`.
    ///
    /// Behaves like `insert` otherwise.
    #[inline]
    pub fn emplace<F>(&mut self, index: usize, make: F) -> usize
        where F: FnOnce() -> T
    {
        self.insert(index, make())
    }

    /// Removes and returns the element at `index`, shifting every later
    /// element one place toward the front.
    ///
    /// Returns `None` if `index` is out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::RingBuffer;
    ///
    /// let mut ring = RingBuffer::from([1, 2, 3]);
    /// assert_eq!(ring.remove(1), Some(2));
    /// assert_eq!(ring.remove(5), None);
    /// assert_eq!(ring, [1, 3]);
    /// ```
    pub fn remove(&mut self, index: usize) -> Option<T> {
        let len = self.len();
        if index >= len {
            return None;
        }
        unsafe {
            let element = self.take(self.physical(index));
            for i in index + 1..len {
                let src = self.physical(i);
                let dst = self.physical(i - 1);
                self.relocate(src, dst);
            }
            self.decrement_write();
            Some(element)
        }
    }

    /// Drops the element at `index` and returns the position of the element
    /// that followed it, which is `len()` once the back has been erased.
    ///
    /// An `index` past the end erases nothing and returns `len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::RingBuffer;
    ///
    /// let mut ring = RingBuffer::from([3, 5]);
    /// let next = ring.erase((ring.end() - 1).index());
    /// assert_eq!(ring, [3]);
    /// assert!(ring.cursor_at(next) == ring.end());
    /// ```
    pub fn erase(&mut self, index: usize) -> usize {
        match self.remove(index) {
            Some(element) => {
                self.dispose(element);
                index
            }
            None => self.len(),
        }
    }

    /// Drops the elements in `first..last` and returns the position of the
    /// element that followed them.
    ///
    /// `last` is clamped to `len()`; when `first >= last` nothing is erased
    /// and the clamped `last` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::RingBuffer;
    ///
    /// let mut ring: RingBuffer<_> = (0..6).collect();
    /// assert_eq!(ring.erase_range(1, 3), 1);
    /// assert_eq!(ring, [0, 3, 4, 5]);
    ///
    /// // running past the back truncates
    /// assert_eq!(ring.erase_range(2, 100), 2);
    /// assert_eq!(ring, [0, 3]);
    /// ```
    pub fn erase_range(&mut self, first: usize, last: usize) -> usize {
        let len = self.len();
        let last = cmp::min(last, len);
        if first >= last {
            return last;
        }
        let removed = last - first;
        // swap the doomed elements past the survivors, then cut them off
        // before any destructor runs
        for i in first..len - removed {
            let a = self.physical(i);
            let b = self.physical(i + removed);
            unsafe { self.exchange(a, b) }
        }
        let doomed = self.physical(len - removed);
        self.decrement_write_n(removed);
        for i in 0..removed {
            let physical = advance(doomed, i, self.slots);
            unsafe { self.release(physical) }
        }
        first
    }

    /// Retains only the elements specified by the predicate.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::RingBuffer;
    ///
    /// let mut ring: RingBuffer<_> = (1..5).collect();
    /// ring.retain(|&x| x % 2 == 0);
    /// assert_eq!(ring, [2, 4]);
    /// ```
    pub fn retain<F>(&mut self, mut f: F)
        where F: FnMut(&T) -> bool
    {
        let len = self.len();
        let mut del = 0;
        for i in 0..len {
            if !f(&self[i]) {
                del += 1;
            } else if del > 0 {
                self.swap(i - del, i);
            }
        }
        if del > 0 {
            self.erase_range(len - del, len);
        }
    }

    /// Retrieves an element by logical index, or `None` if it is out of
    /// bounds.
    ///
    /// Element at index 0 is the front of the queue.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        if index < self.len() {
            unsafe { Some(&*self.slot(self.physical(index))) }
        } else {
            None
        }
    }

    /// Retrieves an element mutably by logical index, or `None` if it is out
    /// of bounds.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index < self.len() {
            unsafe { Some(&mut *self.slot(self.physical(index))) }
        } else {
            None
        }
    }

    /// Unchecked-style access that never faults.
    ///
    /// An index at or past the end aliases the back element instead of
    /// failing; only an empty buffer yields `None`. Use `get` for checked
    /// access.
    ///
    /// **Note:** this aliases the last *live* element, not the physical slot
    /// `capacity() - 1`. The two coincide only while the buffer is full and
    /// its front sits in slot 0; an unfilled slot is never read.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::RingBuffer;
    ///
    /// let ring = RingBuffer::from([4, 5, 6]);
    /// assert_eq!(ring.at(1), Some(&5));
    /// assert_eq!(ring.at(9), Some(&6));
    /// ```
    #[inline]
    pub fn at(&self, index: usize) -> Option<&T> {
        let len = self.len();
        if len == 0 {
            return None;
        }
        self.get(cmp::min(index, len - 1))
    }

    /// Mutable counterpart of `at`.
    #[inline]
    pub fn at_mut(&mut self, index: usize) -> Option<&mut T> {
        let len = self.len();
        if len == 0 {
            return None;
        }
        self.get_mut(cmp::min(index, len - 1))
    }

    /// Provides a reference to the front element, or `None` if the buffer is
    /// empty.
    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.get(0)
    }

    /// Provides a mutable reference to the front element, or `None` if the
    /// buffer is empty.
    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.get_mut(0)
    }

    /// Provides a reference to the back element, or `None` if the buffer is
    /// empty.
    #[inline]
    pub fn back(&self) -> Option<&T> {
        self.len().checked_sub(1).and_then(|last| self.get(last))
    }

    /// Provides a mutable reference to the back element, or `None` if the
    /// buffer is empty.
    #[inline]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.len().checked_sub(1).and_then(move |last| self.get_mut(last))
    }

    /// Raw pointer to the first slot of the backing store.
    ///
    /// Slots are in physical order, which only matches logical order when the
    /// front sits in slot 0; slots outside the logical span may be
    /// uninitialized.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.buf.as_ptr()
    }

    /// Mutable counterpart of `as_ptr`.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.buf.as_ptr()
    }

    /// Swaps elements at indices `i` and `j`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn swap(&mut self, i: usize, j: usize) {
        assert!(i < self.len());
        assert!(j < self.len());
        let ri = self.physical(i);
        let rj = self.physical(j);
        unsafe { ptr::swap(self.slot(ri), self.slot(rj)) }
    }

    /// Returns `true` if the buffer contains an element equal to `x`.
    pub fn contains(&self, x: &T) -> bool
        where T: PartialEq
    {
        let (a, b) = self.as_slices();
        a.contains(x) || b.contains(x)
    }

    /// Returns a pair of slices which contain, in order, the contents of the
    /// buffer.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::RingBuffer;
    ///
    /// let mut ring = RingBuffer::with_capacity(3);
    /// ring.extend([0, 1, 2]);
    /// assert_eq!(ring.as_slices(), (&[0, 1, 2][..], &[][..]));
    ///
    /// ring.push_back(3);
    /// ring.push_back(4);
    /// assert_eq!(ring.as_slices(), (&[2, 3][..], &[4][..]));
    /// ```
    #[inline]
    pub fn as_slices(&self) -> (&[T], &[T]) {
        let base = self.buf.as_ptr() as *const T;
        unsafe {
            if self.start <= self.write {
                (slice::from_raw_parts(base.add(self.start), self.write - self.start), &[])
            } else {
                (slice::from_raw_parts(base.add(self.start), self.slots - self.start),
                 slice::from_raw_parts(base, self.write))
            }
        }
    }

    /// Returns a pair of mutable slices which contain, in order, the contents
    /// of the buffer.
    #[inline]
    pub fn as_mut_slices(&mut self) -> (&mut [T], &mut [T]) {
        let base = self.buf.as_ptr();
        unsafe {
            if self.start <= self.write {
                (slice::from_raw_parts_mut(base.add(self.start), self.write - self.start),
                 &mut [])
            } else {
                (slice::from_raw_parts_mut(base.add(self.start), self.slots - self.start),
                 slice::from_raw_parts_mut(base, self.write))
            }
        }
    }

    /// Returns a front-to-back iterator.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        let (first, second) = self.as_slices();
        Iter::new(first, second)
    }

    /// Returns a front-to-back iterator that returns mutable references.
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        let (first, second) = self.as_mut_slices();
        IterMut::new(first, second)
    }

    /// Cursor at the front element.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::RingBuffer;
    ///
    /// let ring = RingBuffer::from([1, 2, 3]);
    /// let mut cursor = ring.begin();
    /// assert_eq!(cursor.get(), Some(&1));
    /// cursor += 2;
    /// assert_eq!(cursor.get(), Some(&3));
    /// cursor += 7;
    /// assert!(cursor == ring.end());
    /// ```
    #[inline]
    pub fn begin(&self) -> Cursor<'_, T, A> {
        Cursor::new(self, 0)
    }

    /// Cursor one past the back element.
    #[inline]
    pub fn end(&self) -> Cursor<'_, T, A> {
        Cursor::new(self, self.len())
    }

    /// Same as `begin`.
    #[inline]
    pub fn cbegin(&self) -> Cursor<'_, T, A> {
        self.begin()
    }

    /// Same as `end`.
    #[inline]
    pub fn cend(&self) -> Cursor<'_, T, A> {
        self.end()
    }

    /// Cursor at logical position `index`, clamped to `end()`.
    #[inline]
    pub fn cursor_at(&self, index: usize) -> Cursor<'_, T, A> {
        Cursor::new(self, cmp::min(index, self.len()))
    }
}
