use core::fmt;
use core::iter::FusedIterator;
use core::ptr;

use super::ArraySeq;

/// Owning iterator over an [`ArraySeq`].
///
/// Elements are read out of the buffer through a front cursor (and a back
/// cursor for reverse iteration); whatever remains when the iterator is
/// dropped is dropped in place.
pub struct IntoIter<T> {
    seq: ArraySeq<T>,
    front: usize,
}

impl<T> IntoIter<T> {
    pub(super) fn new(seq: ArraySeq<T>) -> Self {
        IntoIter { seq, front: 0 }
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        unsafe {
            std::slice::from_raw_parts(self.seq.as_ptr().add(self.front), self.remaining())
        }
    }

    #[inline]
    fn remaining(&self) -> usize {
        self.seq.len - self.front
    }
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        if self.front == self.seq.len {
            return None;
        }
        let value = unsafe { ptr::read(self.seq.as_ptr().add(self.front)) };
        self.front += 1;
        Some(value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.remaining();
        (len, Some(len))
    }

    #[inline]
    fn count(self) -> usize {
        self.remaining()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        if self.front == self.seq.len {
            return None;
        }
        self.seq.len -= 1;
        Some(unsafe { ptr::read(self.seq.as_ptr().add(self.seq.len)) })
    }
}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> ExactSizeIterator for IntoIter<T> {
    #[inline]
    fn len(&self) -> usize {
        self.remaining()
    }
}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        let remaining = ptr::slice_from_raw_parts_mut(
            unsafe { self.seq.as_mut_ptr().add(self.front) },
            self.remaining(),
        );
        // The slots before `front` were already read out; make sure the
        // sequence's own drop sees an empty buffer.
        self.seq.len = 0;
        unsafe { ptr::drop_in_place(remaining) };
    }
}
