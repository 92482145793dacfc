use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter;
use core::ops::{Index, IndexMut};

use super::{IntoIter, Iter, IterMut, RingBuffer};
use crate::storage::RawAlloc;

impl<T: Clone, A: RawAlloc + Clone> Clone for RingBuffer<T, A> {
    fn clone(&self) -> Self {
        let mut ring = RingBuffer::with_capacity_in(self.capacity(), self.alloc.clone());
        ring.extend(self.iter().cloned());
        ring
    }
}

impl<T, A: RawAlloc> Drop for RingBuffer<T, A> {
    fn drop(&mut self) {
        unsafe {
            self.release_all();
            self.alloc.deallocate(self.buf, self.slots);
        }
    }
}

impl<T> Default for RingBuffer<T> {
    #[inline]
    fn default() -> Self {
        RingBuffer::new()
    }
}

impl<T, U, A, B> PartialEq<RingBuffer<U, B>> for RingBuffer<T, A>
    where T: PartialEq<U>,
          A: RawAlloc,
          B: RawAlloc
{
    fn eq(&self, other: &RingBuffer<U, B>) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<T: Eq, A: RawAlloc> Eq for RingBuffer<T, A> {}

impl<T, U, A> PartialEq<Vec<U>> for RingBuffer<T, A>
    where T: PartialEq<U>,
          A: RawAlloc
{
    fn eq(&self, other: &Vec<U>) -> bool {
        *self == other[..]
    }
}

impl<T, U, A> PartialEq<[U]> for RingBuffer<T, A>
    where T: PartialEq<U>,
          A: RawAlloc
{
    fn eq(&self, other: &[U]) -> bool {
        self.len() == other.len() && self.iter().zip(other).all(|(a, b)| a == b)
    }
}

impl<'a, T, U, A> PartialEq<&'a [U]> for RingBuffer<T, A>
    where T: PartialEq<U>,
          A: RawAlloc
{
    fn eq(&self, other: &&'a [U]) -> bool {
        *self == **other
    }
}

impl<T, U, A, const N: usize> PartialEq<[U; N]> for RingBuffer<T, A>
    where T: PartialEq<U>,
          A: RawAlloc
{
    fn eq(&self, other: &[U; N]) -> bool {
        *self == other[..]
    }
}

impl<T: PartialOrd, A: RawAlloc> PartialOrd for RingBuffer<T, A> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<T: Ord, A: RawAlloc> Ord for RingBuffer<T, A> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<T: Hash, A: RawAlloc> Hash for RingBuffer<T, A> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for elem in self {
            elem.hash(state);
        }
    }
}

impl<T, A: RawAlloc> Index<usize> for RingBuffer<T, A> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        let len = self.len();
        match self.get(index) {
            Some(elem) => elem,
            None => panic!("index out of bounds: the len is {} but the index is {}", len, index),
        }
    }
}

impl<T, A: RawAlloc> IndexMut<usize> for RingBuffer<T, A> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        let len = self.len();
        match self.get_mut(index) {
            Some(elem) => elem,
            None => panic!("index out of bounds: the len is {} but the index is {}", len, index),
        }
    }
}

/// The capacity of the result equals the number of elements.
impl<T> From<Vec<T>> for RingBuffer<T> {
    fn from(vec: Vec<T>) -> Self {
        let mut ring = RingBuffer::with_capacity(vec.len());
        ring.extend(vec);
        ring
    }
}

/// The capacity of the result equals `N`.
impl<T, const N: usize> From<[T; N]> for RingBuffer<T> {
    fn from(arr: [T; N]) -> Self {
        let mut ring = RingBuffer::with_capacity(N);
        ring.extend(arr);
        ring
    }
}

/// The capacity of the result equals the number of elements.
impl<T> iter::FromIterator<T> for RingBuffer<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        RingBuffer::from(iter.into_iter().collect::<Vec<T>>())
    }
}

impl<T, A: RawAlloc> IntoIterator for RingBuffer<T, A> {
    type Item = T;
    type IntoIter = IntoIter<T, A>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { inner: self }
    }
}

impl<'a, T, A: RawAlloc> IntoIterator for &'a RingBuffer<T, A> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, A: RawAlloc> IntoIterator for &'a mut RingBuffer<T, A> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// Pushes every element onto the back, evicting from the front once full.
impl<T, A: RawAlloc> Extend<T> for RingBuffer<T, A> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for elt in iter {
            self.push_back(elt);
        }
    }
}

impl<'a, T: Copy + 'a, A: RawAlloc> Extend<&'a T> for RingBuffer<T, A> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T: fmt::Debug, A: RawAlloc> fmt::Debug for RingBuffer<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self).finish()
    }
}

#[cfg(feature = "serde")]
mod serde_impls {
    use alloc::vec::Vec;

    use serde::de::{Deserialize, Deserializer};
    use serde::ser::{Serialize, Serializer};

    use super::RingBuffer;
    use crate::storage::RawAlloc;

    impl<T: Serialize, A: RawAlloc> Serialize for RingBuffer<T, A> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_seq(self)
        }
    }

    /// The capacity of the result equals the sequence length.
    impl<'de, T: Deserialize<'de>> Deserialize<'de> for RingBuffer<T> {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            Vec::<T>::deserialize(deserializer).map(RingBuffer::from)
        }
    }
}
