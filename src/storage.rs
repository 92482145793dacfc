//! Allocation strategy for the backing store.

use core::alloc::Layout;
use core::cmp;
use core::mem;
use core::ptr::{self, NonNull};

use crate::error::ReserveError;

/// Strategy used by `RingBuffer` to obtain and release its backing store,
/// and to construct and destroy individual slots inside it.
///
/// The default strategy is [`Global`].
///
/// # Safety
///
/// `allocate::<T>(n)` must return a pointer that is aligned for `T` and valid
/// for reads and writes of `n` consecutive `T`s until it is handed back to
/// `deallocate::<T>` with the same `n`.
pub unsafe trait RawAlloc {
    /// Obtains storage for `n` uninitialized slots of `T`.
    fn allocate<T>(&self, n: usize) -> Result<NonNull<T>, ReserveError>;

    /// Releases storage previously returned by `allocate::<T>(n)`.
    ///
    /// # Safety
    ///
    /// `ptr` must come from this allocator with the same `n`, and every slot
    /// must already have been destroyed or moved out.
    unsafe fn deallocate<T>(&self, ptr: NonNull<T>, n: usize);

    /// Constructs `value` in place at `slot`.
    ///
    /// # Safety
    ///
    /// `slot` must be valid for writes and must not hold a live value.
    #[inline]
    unsafe fn construct<T>(&self, slot: *mut T, value: T) {
        ptr::write(slot, value);
    }

    /// Runs the destructor of the live value at `slot`.
    ///
    /// # Safety
    ///
    /// `slot` must hold a live value, which is left uninitialized.
    #[inline]
    unsafe fn destroy<T>(&self, slot: *mut T) {
        ptr::drop_in_place(slot);
    }

    /// Largest number of `T`s a single allocation can hold.
    #[inline]
    fn max_size<T>(&self) -> usize {
        isize::MAX as usize / cmp::max(mem::size_of::<T>(), 1)
    }
}

/// The process-wide allocator.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Global;

unsafe impl RawAlloc for Global {
    fn allocate<T>(&self, n: usize) -> Result<NonNull<T>, ReserveError> {
        let layout = Layout::array::<T>(n).map_err(|_| ReserveError::CapacityOverflow)?;
        if layout.size() == 0 {
            return Ok(NonNull::dangling());
        }
        // SAFETY: the layout has a non-zero size.
        let raw = unsafe { alloc::alloc::alloc(layout) };
        NonNull::new(raw.cast::<T>()).ok_or(ReserveError::AllocError { layout })
    }

    unsafe fn deallocate<T>(&self, ptr: NonNull<T>, n: usize) {
        // allocate() already validated this layout
        if let Ok(layout) = Layout::array::<T>(n) {
            if layout.size() != 0 {
                alloc::alloc::dealloc(ptr.as_ptr().cast::<u8>(), layout);
            }
        }
    }
}
