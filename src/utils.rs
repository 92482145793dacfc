//! Ring index arithmetic shared by the buffer and its iterators.

/// Moves `index` forward by `by` slots on a ring of `slots` slots.
#[inline]
pub fn advance(index: usize, by: usize, slots: usize) -> usize {
    debug_assert!(by <= slots, "advance by={} slots={}", by, slots);
    (index + by) % slots
}

/// Moves `index` backward by `by` slots on a ring of `slots` slots,
/// wrapping below zero onto the top of the ring.
#[inline]
pub fn retreat(index: usize, by: usize, slots: usize) -> usize {
    debug_assert!(by <= slots, "retreat by={} slots={}", by, slots);
    if by > index {
        slots - (by - index)
    } else {
        index - by
    }
}

/// Number of slots between `start` (inclusive) and `write` (exclusive).
#[inline]
pub fn span(start: usize, write: usize, slots: usize) -> usize {
    debug_assert!(start < slots);
    debug_assert!(write < slots);
    if write >= start {
        write - start
    } else {
        slots - (start - write)
    }
}
