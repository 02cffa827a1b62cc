use std::marker::PhantomData;

use crate::{ArraySeq, adapter::Sequence, error::Underflow};

/// Adapts any [`Sequence`] into a FIFO queue: `enqueue` appends at the tail,
/// `dequeue` and `front` work at index 0.
///
/// Emptiness is checked here, not delegated to the wrapped sequence:
/// [`Underflow`] on an empty queue is a different condition from the
/// sequence's own [`OutOfRange`](crate::OutOfRange).
pub struct Queue<T, S: Sequence<T> = ArraySeq<T>> {
    seq: S,
    _phantom_data: PhantomData<T>,
}

impl<T, S: Sequence<T>> Queue<T, S> {
    #[inline]
    pub fn new(seq: S) -> Self {
        Self {
            seq,
            _phantom_data: PhantomData,
        }
    }

    #[inline]
    pub fn inner(&self) -> &S {
        &self.seq
    }

    #[inline]
    pub fn inner_mut(&mut self) -> &mut S {
        &mut self.seq
    }

    #[inline]
    pub fn into_inner(self) -> S {
        self.seq
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.seq.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }

    #[inline]
    pub fn enqueue(&mut self, value: T) {
        self.seq.push(value);
    }

    pub fn dequeue(&mut self) -> Result<T, Underflow> {
        if self.seq.is_empty() {
            return Err(Underflow);
        }
        // `Sequence` is a safe trait anyone can implement, so a bounds error
        // here cannot be ruled out statically; it still surfaces as Underflow.
        self.seq.remove(0).map_err(|_| Underflow)
    }

    pub fn front(&self) -> Result<&T, Underflow> {
        if self.seq.is_empty() {
            return Err(Underflow);
        }
        self.seq.get(0).map_err(|_| Underflow)
    }

    pub fn front_mut(&mut self) -> Result<&mut T, Underflow> {
        if self.seq.is_empty() {
            return Err(Underflow);
        }
        self.seq.get_mut(0).map_err(|_| Underflow)
    }
}

impl<T, S: Sequence<T>> From<S> for Queue<T, S> {
    #[inline]
    fn from(value: S) -> Self {
        Self::new(value)
    }
}

impl<T, S: Sequence<T> + Default> Default for Queue<T, S> {
    #[inline]
    fn default() -> Self {
        Self::new(Default::default())
    }
}

impl<T, S: Sequence<T> + std::fmt::Debug> std::fmt::Debug for Queue<T, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Queue").field("seq", &self.seq).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LinkedSeq;
    use std::collections::VecDeque;

    fn empty_underflows<S: Sequence<i32> + Default>() {
        let mut queue = Queue::<i32, S>::default();
        assert!(queue.is_empty());
        assert_eq!(queue.len(), 0);
        assert_eq!(queue.dequeue(), Err(Underflow));
        assert_eq!(queue.front(), Err(Underflow));
        assert_eq!(queue.front_mut(), Err(Underflow));
    }

    fn fifo_roundtrip<S: Sequence<i32> + Default>() {
        let mut queue = Queue::<i32, S>::default();
        for i in 1..100 {
            queue.enqueue(i);
            assert_eq!(queue.len(), i as usize);
            assert!(!queue.is_empty());
        }
        for i in 1..100 {
            assert_eq!(queue.front(), Ok(&i));
            assert_eq!(queue.dequeue(), Ok(i));
        }
        assert!(queue.is_empty());
        assert_eq!(queue.dequeue(), Err(Underflow));
    }

    fn front_writes_through<S: Sequence<i32> + Default>() {
        let mut queue = Queue::<i32, S>::default();
        queue.enqueue(1);
        queue.enqueue(2);
        *queue.front_mut().unwrap() = 9;
        assert_eq!(queue.dequeue(), Ok(9));
        assert_eq!(queue.dequeue(), Ok(2));
    }

    #[test]
    fn t_empty_array() {
        empty_underflows::<ArraySeq<i32>>();
    }

    #[test]
    fn t_empty_linked() {
        empty_underflows::<LinkedSeq<i32>>();
    }

    #[test]
    fn t_fifo_array() {
        fifo_roundtrip::<ArraySeq<i32>>();
    }

    #[test]
    fn t_fifo_linked() {
        fifo_roundtrip::<LinkedSeq<i32>>();
    }

    #[test]
    fn t_fifo_foreign_container() {
        fifo_roundtrip::<VecDeque<i32>>();
    }

    #[test]
    fn t_front_mut_array() {
        front_writes_through::<ArraySeq<i32>>();
    }

    #[test]
    fn t_front_mut_linked() {
        front_writes_through::<LinkedSeq<i32>>();
    }

    // A safe `Sequence` impl may misreport its length; the adapter must
    // degrade to an error, never trust `len()` for unchecked access.
    struct Misreporting;

    impl Sequence<i32> for Misreporting {
        fn len(&self) -> usize {
            1
        }

        fn get(&self, index: usize) -> Result<&i32, crate::OutOfRange> {
            Err(crate::OutOfRange { index, len: 0 })
        }

        fn get_mut(&mut self, index: usize) -> Result<&mut i32, crate::OutOfRange> {
            Err(crate::OutOfRange { index, len: 0 })
        }

        fn set(&mut self, index: usize, _value: i32) -> Result<(), crate::OutOfRange> {
            Err(crate::OutOfRange { index, len: 0 })
        }

        fn push(&mut self, _value: i32) {}

        fn insert(&mut self, _index: usize, _value: i32) {}

        fn remove(&mut self, index: usize) -> Result<i32, crate::OutOfRange> {
            Err(crate::OutOfRange { index, len: 0 })
        }
    }

    #[test]
    fn t_misreporting_sequence_underflows() {
        let mut queue = Queue::new(Misreporting);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.front(), Err(Underflow));
        assert_eq!(queue.front_mut(), Err(Underflow));
        assert_eq!(queue.dequeue(), Err(Underflow));
    }
}
