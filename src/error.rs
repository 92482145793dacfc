//! Recoverable error values.

use core::alloc::Layout;
use core::fmt;

use thiserror::Error;

/// Error value indicating insufficient capacity
///
/// This error only occurs for `BoundedQueue<_, Saturating>`; it hands the
/// rejected element back to the caller.
#[derive(Clone, Copy, Eq, Ord, PartialEq, PartialOrd, Error)]
#[error("insufficient capacity")]
pub struct CapacityError<T = ()> {
    /// The element that caused the error.
    pub element: T,
}

impl<T> CapacityError<T> {
    /// Extracts the rejected element.
    #[inline]
    pub fn into_element(self) -> T {
        self.element
    }
}

impl<T> fmt::Debug for CapacityError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CapacityError: insufficient capacity")
    }
}

/// Error returned when the backing store cannot be obtained.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum ReserveError {
    /// The requested capacity does not fit in a valid allocation layout.
    #[error("capacity overflow")]
    CapacityOverflow,

    /// The allocation strategy could not satisfy the request.
    #[error("memory allocation of {} bytes failed", .layout.size())]
    AllocError {
        /// Layout of the allocation that failed.
        layout: Layout,
    },
}
