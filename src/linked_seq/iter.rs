use core::fmt;
use core::iter::FusedIterator;
use core::marker::PhantomData;
use core::ptr::NonNull;

use super::{LinkedSeq, Node};

/// Forward-only borrowing iterator over a [`LinkedSeq`].
///
/// Bounded by the remaining length rather than a sentinel comparison, so it
/// never has to know which node is the sentinel.
pub struct Iter<'a, T> {
    cur: NonNull<Node<T>>,
    len: usize,
    marker: PhantomData<&'a T>,
}

unsafe impl<T: Sync> Send for Iter<'_, T> {}
unsafe impl<T: Sync> Sync for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            cur: self.cur,
            len: self.len,
            marker: PhantomData,
        }
    }
}

impl<'a, T> Iter<'a, T> {
    pub(super) fn new(cur: NonNull<Node<T>>, len: usize) -> Self {
        Self {
            cur,
            len,
            marker: PhantomData,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter").field("len", &self.len).finish()
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.len == 0 {
            return None;
        }
        let node = unsafe { self.cur.as_ref() };
        self.cur = node.next;
        self.len -= 1;
        Some(unsafe { node.value.assume_init_ref() })
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> ExactSizeIterator for Iter<'_, T> {
    #[inline]
    fn len(&self) -> usize {
        self.len
    }
}

/// Forward-only mutable iterator over a [`LinkedSeq`].
pub struct IterMut<'a, T> {
    cur: NonNull<Node<T>>,
    len: usize,
    marker: PhantomData<&'a mut T>,
}

unsafe impl<T: Send> Send for IterMut<'_, T> {}
unsafe impl<T: Sync> Sync for IterMut<'_, T> {}

impl<'a, T> IterMut<'a, T> {
    pub(super) fn new(cur: NonNull<Node<T>>, len: usize) -> Self {
        Self {
            cur,
            len,
            marker: PhantomData,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for IterMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IterMut").field("len", &self.len).finish()
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<&'a mut T> {
        if self.len == 0 {
            return None;
        }
        let mut node = self.cur;
        self.cur = unsafe { node.as_ref().next };
        self.len -= 1;
        Some(unsafe { node.as_mut().value.assume_init_mut() })
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<T> FusedIterator for IterMut<'_, T> {}

impl<T> ExactSizeIterator for IterMut<'_, T> {
    #[inline]
    fn len(&self) -> usize {
        self.len
    }
}

/// Owning iterator over a [`LinkedSeq`]; unlinks nodes from the head.
pub struct IntoIter<T> {
    inner: LinkedSeq<T>,
}

impl<T> IntoIter<T> {
    pub(super) fn new(inner: LinkedSeq<T>) -> Self {
        IntoIter { inner }
    }
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.inner).finish()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.inner.pop_head()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.inner.len();
        (len, Some(len))
    }

    #[inline]
    fn count(self) -> usize {
        self.inner.len()
    }
}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> ExactSizeIterator for IntoIter<T> {
    #[inline]
    fn len(&self) -> usize {
        self.inner.len()
    }
}
