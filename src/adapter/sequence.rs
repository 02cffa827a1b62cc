use std::collections::VecDeque;

use crate::{ArraySeq, LinkedSeq, error::OutOfRange};

/// The structural contract shared by the sequence containers: an ordered,
/// index-addressable collection. [`Stack`](crate::Stack) and
/// [`Queue`](crate::Queue) are generic over any implementer; they only need
/// `push`, `get`, `get_mut`, `remove`, and `len`.
///
/// Positional operations report [`OutOfRange`] for `index >= len()` and leave
/// the sequence untouched when they do.
pub trait Sequence<T> {
    fn len(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get(&self, index: usize) -> Result<&T, OutOfRange>;

    fn get_mut(&mut self, index: usize) -> Result<&mut T, OutOfRange>;

    fn set(&mut self, index: usize, value: T) -> Result<(), OutOfRange>;

    /// Appends `value` at the tail.
    fn push(&mut self, value: T);

    /// Inserts `value` at `index`; positions past the end are default-filled.
    fn insert(&mut self, index: usize, value: T)
    where
        T: Default;

    /// Removes and returns the element at `index`.
    fn remove(&mut self, index: usize) -> Result<T, OutOfRange>;
}

impl<T> Sequence<T> for ArraySeq<T> {
    #[inline]
    fn len(&self) -> usize {
        self.len()
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.is_empty()
    }

    #[inline]
    fn get(&self, index: usize) -> Result<&T, OutOfRange> {
        self.get(index)
    }

    #[inline]
    fn get_mut(&mut self, index: usize) -> Result<&mut T, OutOfRange> {
        self.get_mut(index)
    }

    #[inline]
    fn set(&mut self, index: usize, value: T) -> Result<(), OutOfRange> {
        self.set(index, value)
    }

    #[inline]
    fn push(&mut self, value: T) {
        self.push(value)
    }

    #[inline]
    fn insert(&mut self, index: usize, value: T)
    where
        T: Default,
    {
        self.insert(index, value)
    }

    #[inline]
    fn remove(&mut self, index: usize) -> Result<T, OutOfRange> {
        self.remove(index)
    }
}

impl<T> Sequence<T> for LinkedSeq<T> {
    #[inline]
    fn len(&self) -> usize {
        self.len()
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.is_empty()
    }

    #[inline]
    fn get(&self, index: usize) -> Result<&T, OutOfRange> {
        self.get(index)
    }

    #[inline]
    fn get_mut(&mut self, index: usize) -> Result<&mut T, OutOfRange> {
        self.get_mut(index)
    }

    #[inline]
    fn set(&mut self, index: usize, value: T) -> Result<(), OutOfRange> {
        self.set(index, value)
    }

    #[inline]
    fn push(&mut self, value: T) {
        self.push(value)
    }

    #[inline]
    fn insert(&mut self, index: usize, value: T)
    where
        T: Default,
    {
        self.insert(index, value)
    }

    #[inline]
    fn remove(&mut self, index: usize) -> Result<T, OutOfRange> {
        self.remove(index)
    }
}

impl<T> Sequence<T> for Vec<T> {
    #[inline]
    fn len(&self) -> usize {
        self.len()
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.is_empty()
    }

    #[inline]
    fn get(&self, index: usize) -> Result<&T, OutOfRange> {
        let len = self.len();
        self.as_slice()
            .get(index)
            .ok_or(OutOfRange { index, len })
    }

    #[inline]
    fn get_mut(&mut self, index: usize) -> Result<&mut T, OutOfRange> {
        let len = self.len();
        self.as_mut_slice()
            .get_mut(index)
            .ok_or(OutOfRange { index, len })
    }

    #[inline]
    fn set(&mut self, index: usize, value: T) -> Result<(), OutOfRange> {
        *Sequence::get_mut(self, index)? = value;
        Ok(())
    }

    #[inline]
    fn push(&mut self, value: T) {
        self.push(value)
    }

    fn insert(&mut self, index: usize, value: T)
    where
        T: Default,
    {
        if index > self.len() {
            self.resize_with(index, T::default);
        }
        self.insert(index, value)
    }

    fn remove(&mut self, index: usize) -> Result<T, OutOfRange> {
        let len = self.len();
        if index >= len {
            return Err(OutOfRange { index, len });
        }
        Ok(self.remove(index))
    }
}

impl<T> Sequence<T> for VecDeque<T> {
    #[inline]
    fn len(&self) -> usize {
        self.len()
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.is_empty()
    }

    #[inline]
    fn get(&self, index: usize) -> Result<&T, OutOfRange> {
        let len = self.len();
        self.get(index).ok_or(OutOfRange { index, len })
    }

    #[inline]
    fn get_mut(&mut self, index: usize) -> Result<&mut T, OutOfRange> {
        let len = self.len();
        self.get_mut(index).ok_or(OutOfRange { index, len })
    }

    #[inline]
    fn set(&mut self, index: usize, value: T) -> Result<(), OutOfRange> {
        *Sequence::get_mut(self, index)? = value;
        Ok(())
    }

    #[inline]
    fn push(&mut self, value: T) {
        self.push_back(value)
    }

    fn insert(&mut self, index: usize, value: T)
    where
        T: Default,
    {
        if index > self.len() {
            self.resize_with(index, T::default);
        }
        self.insert(index, value)
    }

    fn remove(&mut self, index: usize) -> Result<T, OutOfRange> {
        let len = self.len();
        self.remove(index).ok_or(OutOfRange { index, len })
    }
}
