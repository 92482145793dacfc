//! Overflow policies for `BoundedQueue`.

/// Tagging trait for providing behaviors to `BoundedQueue`.
pub trait Behavior {}

/// Behavior for `BoundedQueue` that specifies wrapping write semantics.
///
/// Pushing onto a queue that **has already reached its capacity** causes it
/// to **evict** the element at the front and hand it back.
#[derive(Clone, Copy, Debug)]
pub struct Wrapping;
impl Behavior for Wrapping {}

/// Behavior for `BoundedQueue` that specifies saturating write semantics.
///
/// Pushing onto a queue that **has already reached its capacity** causes it
/// to **exit early, without performing any mutation**, and return the
/// element inside a `CapacityError`.
#[derive(Clone, Copy, Debug)]
pub struct Saturating;
impl Behavior for Saturating {}
