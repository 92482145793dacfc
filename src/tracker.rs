//! Per-slot liveness bookkeeping.
//!
//! Growth, eviction and wraparound leave constructed values behind in slots
//! that are outside the logical `[start, write)` span. For element types whose
//! destructor has an observable effect every such slot has to be remembered so
//! that it is dropped exactly once: right before it is overwritten, or when the
//! buffer itself goes away. For element types without drop glue the
//! bookkeeping is skipped entirely.

use alloc::vec;
use alloc::vec::Vec;
use core::mem;

/// Records which slots of a backing store hold a live value.
pub(crate) trait Tracker {
    fn set_constructed(&mut self, slot: usize, live: bool);
    fn is_constructed(&self, slot: usize) -> bool;
}

/// One flag per slot.
pub(crate) struct SlotTracker {
    live: Vec<bool>,
}

impl SlotTracker {
    fn new(slots: usize) -> Self {
        SlotTracker { live: vec![false; slots] }
    }
}

impl Tracker for SlotTracker {
    #[inline]
    fn set_constructed(&mut self, slot: usize, live: bool) {
        self.live[slot] = live;
    }

    #[inline]
    fn is_constructed(&self, slot: usize) -> bool {
        self.live[slot]
    }
}

/// Stand-in for element types whose destruction is a no-op.
///
/// It never reports a slot as constructed; liveness for such types follows
/// from ring position alone.
pub(crate) struct NoTracker;

impl Tracker for NoTracker {
    #[inline(always)]
    fn set_constructed(&mut self, _slot: usize, _live: bool) {}

    #[inline(always)]
    fn is_constructed(&self, _slot: usize) -> bool {
        false
    }
}

/// The tracker a buffer of a given element type carries.
pub(crate) enum Construction {
    Tracked(SlotTracker),
    Untracked(NoTracker),
}

impl Construction {
    /// Picks the tracker for `T` over a store of `slots` slots, all initially
    /// unconstructed.
    pub fn for_type<T>(slots: usize) -> Self {
        if mem::needs_drop::<T>() {
            Construction::Tracked(SlotTracker::new(slots))
        } else {
            Construction::Untracked(NoTracker)
        }
    }

    #[inline]
    pub fn is_tracked(&self) -> bool {
        matches!(*self, Construction::Tracked(_))
    }
}

impl Tracker for Construction {
    #[inline]
    fn set_constructed(&mut self, slot: usize, live: bool) {
        match *self {
            Construction::Tracked(ref mut t) => t.set_constructed(slot, live),
            Construction::Untracked(ref mut t) => t.set_constructed(slot, live),
        }
    }

    #[inline]
    fn is_constructed(&self, slot: usize) -> bool {
        match *self {
            Construction::Tracked(ref t) => t.is_constructed(slot),
            Construction::Untracked(ref t) => t.is_constructed(slot),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_follows_drop_glue() {
        assert!(!Construction::for_type::<u32>(4).is_tracked());
        assert!(!Construction::for_type::<(u8, [i64; 3])>(4).is_tracked());
        assert!(Construction::for_type::<String>(4).is_tracked());
        assert!(Construction::for_type::<Vec<u8>>(4).is_tracked());
    }

    #[test]
    fn tracked_slots_start_unconstructed() {
        let mut tracker = Construction::for_type::<String>(3);
        assert!((0..3).all(|slot| !tracker.is_constructed(slot)));

        tracker.set_constructed(1, true);
        assert!(tracker.is_constructed(1));
        assert!(!tracker.is_constructed(0));

        tracker.set_constructed(1, false);
        assert!(!tracker.is_constructed(1));
    }

    #[test]
    fn untracked_never_reports_live() {
        let mut tracker = Construction::for_type::<u64>(3);
        tracker.set_constructed(2, true);
        assert!(!tracker.is_constructed(2));
    }
}
