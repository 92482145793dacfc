use core::mem::ManuallyDrop;
use core::ptr;

use super::RingBuffer;
use crate::error::ReserveError;
use crate::storage::RawAlloc;
use crate::tracker::Tracker;
use crate::utils::{advance, retreat};

impl<T, A: RawAlloc> RingBuffer<T, A> {
    /// Maps a logical index onto its slot in the backing store.
    #[inline]
    pub(crate) fn physical(&self, index: usize) -> usize {
        advance(self.start, index, self.slots)
    }

    #[inline]
    pub(crate) fn slot(&self, physical: usize) -> *mut T {
        debug_assert!(physical < self.slots,
                      "slot={} slots={}",
                      physical,
                      self.slots);
        // SAFETY: the offset stays inside the allocation.
        unsafe { self.buf.as_ptr().add(physical) }
    }

    /// Constructs `value` in `physical`, which must be vacant.
    #[inline]
    pub(crate) unsafe fn place(&mut self, physical: usize, value: T) {
        self.alloc.construct(self.slot(physical), value);
        self.constructed.set_constructed(physical, true);
    }

    /// Moves the value out of `physical`, leaving the slot unconstructed.
    #[inline]
    pub(crate) unsafe fn take(&mut self, physical: usize) -> T {
        let value = ptr::read(self.slot(physical));
        self.constructed.set_constructed(physical, false);
        value
    }

    /// Moves the value out of `physical` if the slot is tracked as live.
    #[inline]
    pub(crate) unsafe fn vacate(&mut self, physical: usize) -> Option<T> {
        if self.constructed.is_constructed(physical) {
            Some(self.take(physical))
        } else {
            None
        }
    }

    /// Drops the value in `physical` if the slot is tracked as live.
    ///
    /// The slot is marked unconstructed before the destructor runs, so a
    /// panicking destructor never leaves it looking live.
    #[inline]
    pub(crate) unsafe fn release(&mut self, physical: usize) {
        if self.constructed.is_constructed(physical) {
            self.constructed.set_constructed(physical, false);
            self.alloc.destroy(self.slot(physical));
        }
    }

    /// Destroys a value that has already left the store.
    ///
    /// Only call this once the indices and tracker describe the buffer
    /// without `value`.
    pub(crate) fn dispose(&self, value: T) {
        let mut value = ManuallyDrop::new(value);
        unsafe { self.alloc.destroy(&mut *value as *mut T) }
    }

    /// Bitwise move of the value in `src` into the vacant `dst`; no
    /// destructor runs.
    #[inline]
    pub(crate) unsafe fn relocate(&mut self, src: usize, dst: usize) {
        debug_assert!(src != dst);
        ptr::copy_nonoverlapping(self.slot(src), self.slot(dst), 1);
        let live = self.constructed.is_constructed(src);
        self.constructed.set_constructed(src, false);
        self.constructed.set_constructed(dst, live);
    }

    /// Bitwise exchange of two live slots.
    #[inline]
    pub(crate) unsafe fn exchange(&mut self, a: usize, b: usize) {
        ptr::swap(self.slot(a), self.slot(b));
    }

    /// Drops every live value in the store, inside the logical span or not.
    pub(crate) unsafe fn release_all(&mut self) {
        if !self.constructed.is_tracked() {
            return;
        }
        for physical in 0..self.slots {
            self.release(physical);
        }
    }

    /// Advances `write`; pushing `start` along with it when the ring would
    /// otherwise look empty drops the front out of the logical span.
    #[inline]
    pub(crate) fn increment_indices(&mut self) {
        self.write = advance(self.write, 1, self.slots);
        if self.write == self.start {
            self.start = advance(self.start, 1, self.slots);
        }
    }

    #[inline]
    pub(crate) fn increment_start(&mut self) {
        debug_assert!(!self.is_empty());
        self.start = advance(self.start, 1, self.slots);
    }

    #[inline]
    pub(crate) fn decrement_write(&mut self) {
        self.decrement_write_n(1);
    }

    #[inline]
    pub(crate) fn decrement_write_n(&mut self, n: usize) {
        debug_assert!(n <= self.len(), "decrement n={} len={}", n, self.len());
        self.write = retreat(self.write, n, self.slots);
    }
}

/// Reports a failed reservation the way `Vec` does.
#[cold]
pub(crate) fn handle_reserve_error(err: ReserveError) -> ! {
    match err {
        ReserveError::CapacityOverflow => panic!("capacity overflow"),
        ReserveError::AllocError { layout } => alloc::alloc::handle_alloc_error(layout),
    }
}
