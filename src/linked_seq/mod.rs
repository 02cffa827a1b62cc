pub mod iter;

use std::{
    fmt, hash,
    marker::PhantomData,
    mem::MaybeUninit,
    ptr::NonNull,
};

use crate::error::OutOfRange;

use iter::{IntoIter, Iter, IterMut};

/// A node in the circular chain. The sentinel is an ordinary `Node` whose
/// `value` is never initialized; every other node owns exactly one element.
struct Node<T> {
    prev: NonNull<Node<T>>,
    next: NonNull<Node<T>>,
    value: MaybeUninit<T>,
}

/// Points `first.next` and `second.prev` at each other.
#[inline]
fn link<T>(mut first: NonNull<Node<T>>, mut second: NonNull<Node<T>>) {
    unsafe {
        first.as_mut().next = second;
        second.as_mut().prev = first;
    }
}

/// A doubly linked sequence built around one permanent sentinel node.
///
/// The chain is always circular through the sentinel: `sentinel.next` is the
/// first element (or the sentinel itself when empty) and `sentinel.prev` is
/// the last. Insertion and removal therefore always operate on an existing
/// prev/next pair; there is no head, tail, or empty special case anywhere.
///
/// Tail append and tail removal are O(1); positional operations walk the
/// chain from whichever end is nearer, O(min(index, len - index)). The length
/// is tracked in a counter, never recomputed by walking.
pub struct LinkedSeq<T> {
    sentinel: NonNull<Node<T>>,
    len: usize,
    marker: PhantomData<Box<Node<T>>>,
}

unsafe impl<T: Send> Send for LinkedSeq<T> {}
unsafe impl<T: Sync> Sync for LinkedSeq<T> {}

impl<T> LinkedSeq<T> {
    pub fn new() -> Self {
        let node = Box::new(Node {
            prev: NonNull::dangling(),
            next: NonNull::dangling(),
            value: MaybeUninit::uninit(),
        });
        let sentinel = NonNull::from(Box::leak(node));
        link(sentinel, sentinel);
        Self {
            sentinel,
            len: 0,
            marker: PhantomData,
        }
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn get(&self, index: usize) -> Result<&T, OutOfRange> {
        self.range_check(index)?;
        let node = self.node_at(index);
        Ok(unsafe { node.as_ref().value.assume_init_ref() })
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, OutOfRange> {
        self.range_check(index)?;
        let mut node = self.node_at(index);
        Ok(unsafe { node.as_mut().value.assume_init_mut() })
    }

    /// Overwrites the element at `index`, dropping the old value. O(index).
    pub fn set(&mut self, index: usize, value: T) -> Result<(), OutOfRange> {
        self.range_check(index)?;
        let mut node = self.node_at(index);
        *unsafe { node.as_mut().value.assume_init_mut() } = value;
        Ok(())
    }

    /// Appends `value` in O(1) by splicing a new node in just before the
    /// sentinel. The node is fully constructed before it is linked.
    pub fn push(&mut self, value: T) {
        let tail = unsafe { self.sentinel.as_ref().prev };
        splice_new(value, tail, self.sentinel);
        self.len += 1;
    }

    /// Inserts `value` at `index`, shifting everything at or after `index`
    /// one position right. If `index` is past the end, a separate chain of
    /// default values ending in `value` is built first and grafted onto the
    /// tail in one relinking step.
    pub fn insert(&mut self, index: usize, value: T)
    where
        T: Default,
    {
        if index < self.len {
            let at = self.node_at(index);
            let prev = unsafe { at.as_ref().prev };
            splice_new(value, prev, at);
            self.len += 1;
        } else {
            let mut chain = Self::new();
            (self.len..index).for_each(|_| chain.push(T::default()));
            chain.push(value);

            let tail = unsafe { self.sentinel.as_ref().prev };
            let first = unsafe { chain.sentinel.as_ref().next };
            let last = unsafe { chain.sentinel.as_ref().prev };
            link(tail, first);
            link(last, self.sentinel);
            link(chain.sentinel, chain.sentinel);

            self.len = index + 1;
            chain.len = 0;
        }
    }

    /// Removes and returns the element at `index`. O(1) at the tail (via the
    /// sentinel) and at the head, O(index) otherwise.
    pub fn remove(&mut self, index: usize) -> Result<T, OutOfRange> {
        self.range_check(index)?;
        let node = self.node_at(index);
        Ok(unsafe { self.unlink(node) })
    }

    /// Unlinks and frees every real node. The sentinel stays; calling this
    /// repeatedly is a no-op after the first time.
    pub fn clear(&mut self) {
        while self.pop_head().is_some() {}
    }

    /// Exchanges the sentinel and length of two sequences in O(1).
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(&mut self.sentinel, &mut other.sentinel);
        std::mem::swap(&mut self.len, &mut other.len);
    }

    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(unsafe { self.sentinel.as_ref().next }, self.len)
    }

    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(unsafe { self.sentinel.as_ref().next }, self.len)
    }

    pub(crate) fn pop_head(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        let head = unsafe { self.sentinel.as_ref().next };
        Some(unsafe { self.unlink(head) })
    }

    /// Walks to the node at `index` from whichever end is nearer, so the
    /// tail is reached in O(1) through `sentinel.prev`.
    fn node_at(&self, index: usize) -> NonNull<Node<T>> {
        debug_assert!(index < self.len);
        if index < self.len / 2 {
            let mut cur = unsafe { self.sentinel.as_ref().next };
            for _ in 0..index {
                cur = unsafe { cur.as_ref().next };
            }
            cur
        } else {
            let mut cur = unsafe { self.sentinel.as_ref().prev };
            for _ in index + 1..self.len {
                cur = unsafe { cur.as_ref().prev };
            }
            cur
        }
    }

    /// Bypasses `node`, frees it, and returns its element.
    ///
    /// # Safety
    ///
    /// `node` must be a real (non-sentinel) node of this sequence.
    unsafe fn unlink(&mut self, node: NonNull<Node<T>>) -> T {
        unsafe {
            link(node.as_ref().prev, node.as_ref().next);
            self.len -= 1;
            let node = Box::from_raw(node.as_ptr());
            node.value.assume_init()
        }
    }

    #[inline]
    fn range_check(&self, index: usize) -> Result<(), OutOfRange> {
        if index >= self.len {
            return Err(OutOfRange {
                index,
                len: self.len,
            });
        }
        Ok(())
    }
}

/// Allocates a node holding `value` and links it in between `prev` and
/// `next`. The neighbors are only touched once the node exists.
fn splice_new<T>(value: T, prev: NonNull<Node<T>>, next: NonNull<Node<T>>) {
    let node = NonNull::from(Box::leak(Box::new(Node {
        prev,
        next,
        value: MaybeUninit::new(value),
    })));
    link(prev, node);
    link(node, next);
}

impl<T> Drop for LinkedSeq<T> {
    fn drop(&mut self) {
        self.clear();
        // The sentinel's value slot was never initialized; only the node
        // allocation itself is released here.
        drop(unsafe { Box::from_raw(self.sentinel.as_ptr()) });
    }
}

impl<T> Default for LinkedSeq<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for LinkedSeq<T> {
    fn clone(&self) -> Self {
        let mut seq = Self::new();
        seq.extend(self.iter().cloned());
        seq
    }
}

impl<T: PartialEq> PartialEq for LinkedSeq<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for LinkedSeq<T> {}

impl<T, U> PartialEq<[U]> for LinkedSeq<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &[U]) -> bool {
        self.len == other.len() && self.iter().zip(other).all(|(a, b)| a == b)
    }
}

impl<T, U, const N: usize> PartialEq<[U; N]> for LinkedSeq<T>
where
    T: PartialEq<U>,
{
    #[inline]
    fn eq(&self, other: &[U; N]) -> bool {
        PartialEq::eq(self, other.as_slice())
    }
}

impl<T: PartialOrd> PartialOrd for LinkedSeq<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<T: Ord> Ord for LinkedSeq<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<T: fmt::Debug> fmt::Debug for LinkedSeq<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: hash::Hash> hash::Hash for LinkedSeq<T> {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        state.write_usize(self.len);
        self.iter().for_each(|x| x.hash(state));
    }
}

impl<T> FromIterator<T> for LinkedSeq<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut seq = Self::new();
        seq.extend(iter);
        seq
    }
}

impl<T> Extend<T> for LinkedSeq<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        iter.into_iter().for_each(|value| self.push(value));
    }
}

impl<T, const N: usize> From<[T; N]> for LinkedSeq<T> {
    fn from(value: [T; N]) -> Self {
        Self::from_iter(value)
    }
}

impl<T> IntoIterator for LinkedSeq<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}

impl<'a, T> IntoIterator for &'a LinkedSeq<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut LinkedSeq<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
