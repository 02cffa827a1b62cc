pub mod into_iter;

use std::{
    cmp,
    mem::{self, MaybeUninit},
    ops::{Index, IndexMut},
    ptr,
    slice::SliceIndex,
};

use crate::error::OutOfRange;

use into_iter::IntoIter;

/// A growable array-backed sequence.
///
/// The buffer may hold more slots than `len()` implies; this excess capacity
/// makes `push` amortized O(1). Whenever an operation outgrows the buffer, a
/// fresh one of twice the resulting length (plus two, for `push`) is
/// allocated, the live elements are moved over, and the buffers are swapped.
/// Elements at `[0, len)` are initialized, `[len, capacity)` is scratch.
///
/// `ArraySeq` derefs to `[T]`, so the whole slice API (random access
/// iteration, indexing, unchecked access) is available over the live range.
/// Any structural mutation invalidates borrows obtained that way.
pub struct ArraySeq<T> {
    buf: Box<[MaybeUninit<T>]>,
    len: usize,
}

impl<T> ArraySeq<T> {
    #[inline]
    pub fn new() -> Self {
        Self {
            buf: Box::new_uninit_slice(0),
            len: 0,
        }
    }

    /// A sequence of `len` clones of `value`, with capacity `2 * len`.
    pub fn filled(len: usize, value: T) -> Self
    where
        T: Clone,
    {
        let mut buf = Box::new_uninit_slice(2 * len);
        buf.iter_mut().take(len).for_each(|dst| {
            dst.write(value.clone());
        });
        Self { buf, len }
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        unsafe { std::slice::from_raw_parts(self.buf.as_ptr() as *const T, self.len) }
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { std::slice::from_raw_parts_mut(self.buf.as_mut_ptr() as *mut T, self.len) }
    }

    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.buf.as_ptr() as *const T
    }

    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.buf.as_mut_ptr() as *mut T
    }

    pub fn get(&self, index: usize) -> Result<&T, OutOfRange> {
        self.range_check(index)?;
        Ok(unsafe { self.buf.get_unchecked(index).assume_init_ref() })
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, OutOfRange> {
        self.range_check(index)?;
        Ok(unsafe { self.buf.get_unchecked_mut(index).assume_init_mut() })
    }

    /// Overwrites the element at `index`, dropping the old value.
    pub fn set(&mut self, index: usize, value: T) -> Result<(), OutOfRange> {
        self.range_check(index)?;
        *unsafe { self.buf.get_unchecked_mut(index).assume_init_mut() } = value;
        Ok(())
    }

    /// Appends `value`. O(1) while excess capacity remains; otherwise the
    /// buffer is regrown to `2 * len + 2` slots first.
    pub fn push(&mut self, value: T) {
        if self.len == self.capacity() {
            self.grow(2 * self.len + 2);
        }
        unsafe { self.buf.get_unchecked_mut(self.len) }.write(value);
        self.len += 1;
    }

    /// Inserts `value` at `index`, shifting everything at or after `index`
    /// one position right. If `index` is past the end, the gap
    /// `[len, index)` is filled with default values. Always reallocates to
    /// `2 * (max(index, len) + 1)` slots; no tail-append fast path.
    pub fn insert(&mut self, index: usize, value: T)
    where
        T: Default,
    {
        // Drops the defaults finished so far if a later `Default` call
        // panics while the gap is being filled.
        struct GapFill<'a, T> {
            slots: &'a mut [MaybeUninit<T>],
            filled: usize,
        }

        impl<T> Drop for GapFill<'_, T> {
            fn drop(&mut self) {
                let finished = &mut self.slots[..self.filled];
                unsafe { ptr::drop_in_place(finished as *mut [MaybeUninit<T>] as *mut [T]) };
            }
        }

        let new_len = cmp::max(index, self.len) + 1;
        let mut new_buf = Box::new_uninit_slice(2 * new_len);

        // Fill the gap before moving anything out of the old buffer, so a
        // panicking `Default` leaves `self` untouched.
        if index > self.len {
            let mut gap = GapFill {
                slots: &mut new_buf[self.len..index],
                filled: 0,
            };
            while gap.filled < gap.slots.len() {
                gap.slots[gap.filled].write(T::default());
                gap.filled += 1;
            }
            mem::forget(gap);
        }

        let head = cmp::min(index, self.len);
        unsafe {
            ptr::copy_nonoverlapping(self.as_ptr(), new_buf.as_mut_ptr() as *mut T, head);
            if index < self.len {
                ptr::copy_nonoverlapping(
                    self.as_ptr().add(index),
                    (new_buf.as_mut_ptr() as *mut T).add(index + 1),
                    self.len - index,
                );
            }
            new_buf.get_unchecked_mut(index).write(value);
        }

        // The old buffer is freed without dropping its (moved-out) slots.
        self.buf = new_buf;
        self.len = new_len;
    }

    /// Removes and returns the element at `index`, shifting the tail down.
    /// O(1) for the last position. Capacity never shrinks.
    pub fn remove(&mut self, index: usize) -> Result<T, OutOfRange> {
        self.range_check(index)?;
        let value = unsafe { self.buf.get_unchecked(index).assume_init_read() };
        let ptr = self.as_mut_ptr();
        unsafe { ptr::copy(ptr.add(index + 1), ptr.add(index), self.len - index - 1) };
        self.len -= 1;
        Ok(value)
    }

    /// Drops every element and releases the buffer, returning the sequence
    /// to the freshly-constructed state.
    pub fn clear(&mut self) {
        let slice_to_drop = self.as_mut_slice() as *mut [T];
        self.len = 0;
        unsafe { ptr::drop_in_place(slice_to_drop) };
        self.buf = Box::new_uninit_slice(0);
    }

    /// Exchanges the contents of two sequences in O(1).
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(&mut self.buf, &mut other.buf);
        std::mem::swap(&mut self.len, &mut other.len);
    }

    fn grow(&mut self, new_capacity: usize) {
        debug_assert!(new_capacity >= self.len);
        let mut new_buf = Box::new_uninit_slice(new_capacity);
        unsafe {
            ptr::copy_nonoverlapping(self.buf.as_ptr(), new_buf.as_mut_ptr(), self.len);
        }
        // The live elements now belong to the new buffer; the old box frees
        // its storage without touching them.
        self.buf = new_buf;
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

impl<T> Drop for ArraySeq<T> {
    fn drop(&mut self) {
        let slice_to_drop = ptr::slice_from_raw_parts_mut(self.as_mut_ptr(), self.len);
        unsafe { ptr::drop_in_place(slice_to_drop) };
    }
}

impl<T> Default for ArraySeq<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for ArraySeq<T> {
    /// Copies only the logical elements; the clone's capacity equals its
    /// length regardless of `self`'s excess capacity.
    fn clone(&self) -> Self {
        let mut buf = Box::new_uninit_slice(self.len);
        buf.iter_mut().zip(self.as_slice()).for_each(|(dst, src)| {
            dst.write(src.clone());
        });
        Self { buf, len: self.len }
    }
}

impl<T: PartialEq> PartialEq for ArraySeq<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        PartialEq::eq(&**self, &**other)
    }
}

impl<T: Eq> Eq for ArraySeq<T> {}

impl<T, U> PartialEq<[U]> for ArraySeq<T>
where
    T: PartialEq<U>,
{
    #[inline]
    fn eq(&self, other: &[U]) -> bool {
        PartialEq::eq(&**self, other)
    }
}

impl<T, U> PartialEq<&[U]> for ArraySeq<T>
where
    T: PartialEq<U>,
{
    #[inline]
    fn eq(&self, other: &&[U]) -> bool {
        PartialEq::eq(&**self, *other)
    }
}

impl<T, U, const N: usize> PartialEq<[U; N]> for ArraySeq<T>
where
    T: PartialEq<U>,
{
    #[inline]
    fn eq(&self, other: &[U; N]) -> bool {
        PartialEq::eq(&**self, other.as_slice())
    }
}

impl<T: PartialOrd> PartialOrd for ArraySeq<T> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
        PartialOrd::partial_cmp(&**self, &**other)
    }
}

impl<T: Ord> Ord for ArraySeq<T> {
    #[inline]
    fn cmp(&self, other: &Self) -> cmp::Ordering {
        Ord::cmp(&**self, &**other)
    }
}

impl<T> std::ops::Deref for ArraySeq<T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T> std::ops::DerefMut for ArraySeq<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

impl<T, I: SliceIndex<[T]>> Index<I> for ArraySeq<T> {
    type Output = I::Output;

    #[inline]
    fn index(&self, index: I) -> &Self::Output {
        Index::index(&**self, index)
    }
}

impl<T, I: SliceIndex<[T]>> IndexMut<I> for ArraySeq<T> {
    #[inline]
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        IndexMut::index_mut(&mut **self, index)
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for ArraySeq<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(&**self, f)
    }
}

impl<T: std::hash::Hash> std::hash::Hash for ArraySeq<T> {
    #[inline]
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::hash::Hash::hash(&**self, state);
    }
}

impl<T> FromIterator<T> for ArraySeq<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut seq = Self::new();
        iter.into_iter().for_each(|value| seq.push(value));
        seq
    }
}

impl<T> Extend<T> for ArraySeq<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        iter.into_iter().for_each(|value| self.push(value));
    }
}

impl<T, const N: usize> From<[T; N]> for ArraySeq<T> {
    fn from(value: [T; N]) -> Self {
        Self::from_iter(value)
    }
}

impl<T> IntoIterator for ArraySeq<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}

impl<'a, T> IntoIterator for &'a ArraySeq<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<'a, T> IntoIterator for &'a mut ArraySeq<T> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.as_mut_slice().iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn t_new() {
        let seq = ArraySeq::<i32>::new();
        assert_eq!(seq.len(), 0);
        assert_eq!(seq.capacity(), 0);
        assert!(seq.is_empty());
    }

    #[test]
    fn t_filled() {
        let seq = ArraySeq::filled(3, 7);
        assert_eq!(seq, [7, 7, 7]);
        assert_eq!(seq.capacity(), 6);
    }

    #[test]
    fn t_push_grows_by_double_plus_two() {
        let mut seq = ArraySeq::new();
        (0..4).for_each(|x| seq.push(x));
        // push allocates 2 slots, then 2*2+2 = 6
        assert_eq!(seq.capacity(), 6);
        (4..6).for_each(|x| seq.push(x));
        seq.push(6);
        assert_eq!(seq.capacity(), 2 * 6 + 2);
        assert_eq!(seq, [0, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn t_growth_from_full_capacity_four() {
        let mut seq = ArraySeq::filled(2, 0);
        seq.set(0, 1).unwrap();
        seq.set(1, 2).unwrap();
        seq.push(3);
        seq.push(4);
        assert_eq!(seq.len(), 4);
        assert_eq!(seq.capacity(), 4);
        seq.push(5);
        assert!(seq.capacity() >= 10);
        assert_eq!(seq, [1, 2, 3, 4, 5]);
    }

    #[test]
    fn t_get_set() {
        let mut seq = ArraySeq::from([1, 2, 3]);
        assert_eq!(seq.get(1), Ok(&2));
        seq.set(1, 9).unwrap();
        assert_eq!(seq.get(1), Ok(&9));
        assert_eq!(seq.get(3), Err(OutOfRange { index: 3, len: 3 }));
        assert_eq!(seq.set(3, 0), Err(OutOfRange { index: 3, len: 3 }));
        assert_eq!(seq, [1, 9, 3]);
    }

    #[test]
    fn t_insert_into_empty() {
        let mut seq = ArraySeq::new();
        seq.insert(0, 5);
        assert_eq!(seq.len(), 1);
        assert_eq!(seq.get(0), Ok(&5));
    }

    #[test]
    fn t_insert_shifts_right() {
        let mut seq = ArraySeq::from([1, 2, 3]);
        seq.insert(1, 9);
        assert_eq!(seq, [1, 9, 2, 3]);
        assert_eq!(seq.capacity(), 8);
    }

    #[test]
    fn t_insert_past_end_fills_defaults() {
        let mut seq = ArraySeq::from([1, 2]);
        seq.insert(4, 9);
        assert_eq!(seq, [1, 2, 0, 0, 9]);
        assert_eq!(seq.capacity(), 10);
    }

    #[test]
    fn t_remove() {
        let mut seq = ArraySeq::from([1, 2, 3, 4]);
        let cap = seq.capacity();
        assert_eq!(seq.remove(1), Ok(2));
        assert_eq!(seq, [1, 3, 4]);
        assert_eq!(seq.capacity(), cap);
        assert_eq!(seq.remove(2), Ok(4));
        assert_eq!(seq, [1, 3]);
        assert_eq!(seq.remove(2), Err(OutOfRange { index: 2, len: 2 }));
        assert_eq!(seq, [1, 3]);
    }

    #[test]
    fn t_clear_twice() {
        let mut seq = ArraySeq::from([1, 2, 3]);
        seq.clear();
        assert!(seq.is_empty());
        assert_eq!(seq.capacity(), 0);
        seq.clear();
        assert!(seq.is_empty());
    }

    #[test]
    fn t_swap() {
        let mut a = ArraySeq::from([1, 2]);
        let mut b = ArraySeq::from([3, 4, 5]);
        a.swap(&mut b);
        assert_eq!(a, [3, 4, 5]);
        assert_eq!(b, [1, 2]);
    }

    #[test]
    fn t_insert_gap_fill_panic_leaves_unchanged() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        static DEFAULTS_MADE: AtomicUsize = AtomicUsize::new(0);
        static DEFAULTS_LIVE: AtomicUsize = AtomicUsize::new(0);

        #[derive(Debug, PartialEq)]
        struct Filler(i32);

        impl Default for Filler {
            fn default() -> Self {
                if DEFAULTS_MADE.fetch_add(1, Ordering::Relaxed) == 2 {
                    panic!("third default fails");
                }
                DEFAULTS_LIVE.fetch_add(1, Ordering::Relaxed);
                Filler(0)
            }
        }

        impl Drop for Filler {
            fn drop(&mut self) {
                if self.0 == 0 {
                    DEFAULTS_LIVE.fetch_sub(1, Ordering::Relaxed);
                }
            }
        }

        let mut seq = ArraySeq::new();
        seq.push(Filler(1));
        seq.push(Filler(2));
        let caught = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            // gap [2, 5) needs three defaults; the third panics
            seq.insert(5, Filler(9));
        }));
        assert!(caught.is_err());
        assert_eq!(seq.len(), 2);
        assert_eq!(seq.get(0), Ok(&Filler(1)));
        assert_eq!(seq.get(1), Ok(&Filler(2)));
        assert_eq!(DEFAULTS_LIVE.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn t_clone_is_independent() {
        let mut a = ArraySeq::from([1, 2, 3]);
        a.push(4);
        let mut b = a.clone();
        assert_eq!(a, b);
        assert_eq!(b.capacity(), b.len());
        b.set(0, 9).unwrap();
        b.push(5);
        assert_eq!(a, [1, 2, 3, 4]);
        assert_eq!(b, [9, 2, 3, 4, 5]);
    }

    #[test]
    fn t_eq() {
        let a = ArraySeq::from([1, 2, 3]);
        let mut b = ArraySeq::new();
        (1..4).for_each(|x| b.push(x));
        assert_eq!(a, b);
        b.push(4);
        assert_ne!(a, b);
    }

    #[test]
    fn t_iteration() {
        let seq = ArraySeq::from([1, 2, 3]);
        assert_eq!(seq.iter().copied().collect::<Vec<_>>(), [1, 2, 3]);
        assert_eq!(seq.iter().rev().copied().collect::<Vec<_>>(), [3, 2, 1]);
        let mut seq = seq;
        seq.iter_mut().for_each(|x| *x *= 10);
        assert_eq!(seq, [10, 20, 30]);
    }

    #[test]
    fn t_drops_elements() {
        use std::rc::Rc;
        let probe = Rc::new(());
        let mut seq = ArraySeq::new();
        (0..5).for_each(|_| seq.push(Rc::clone(&probe)));
        seq.remove(2).unwrap();
        assert_eq!(Rc::strong_count(&probe), 5);
        drop(seq);
        assert_eq!(Rc::strong_count(&probe), 1);
    }
}
