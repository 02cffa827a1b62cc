use std::marker::PhantomData;

use crate::{ArraySeq, adapter::Sequence, error::Underflow};

/// Adapts any [`Sequence`] into a LIFO stack: `push` appends at the tail,
/// `pop` and `top` work at index `len() - 1`.
///
/// Emptiness is checked here, not delegated to the wrapped sequence:
/// [`Underflow`] on an empty stack is a different condition from the
/// sequence's own [`OutOfRange`](crate::OutOfRange).
pub struct Stack<T, S: Sequence<T> = ArraySeq<T>> {
    seq: S,
    _phantom_data: PhantomData<T>,
}

impl<T, S: Sequence<T>> Stack<T, S> {
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
    pub fn push(&mut self, value: T) {
        self.seq.push(value);
    }

    pub fn pop(&mut self) -> Result<T, Underflow> {
        let len = self.seq.len();
        if len == 0 {
            return Err(Underflow);
        }
        // `Sequence` is a safe trait anyone can implement, so a bounds error
        // here cannot be ruled out statically; it still surfaces as Underflow.
        self.seq.remove(len - 1).map_err(|_| Underflow)
    }

    pub fn top(&self) -> Result<&T, Underflow> {
        let len = self.seq.len();
        if len == 0 {
            return Err(Underflow);
        }
        self.seq.get(len - 1).map_err(|_| Underflow)
    }

    pub fn top_mut(&mut self) -> Result<&mut T, Underflow> {
        let len = self.seq.len();
        if len == 0 {
            return Err(Underflow);
        }
        self.seq.get_mut(len - 1).map_err(|_| Underflow)
    }
}

impl<T, S: Sequence<T>> From<S> for Stack<T, S> {
    #[inline]
    fn from(value: S) -> Self {
        Self::new(value)
    }
}

impl<T, S: Sequence<T> + Default> Default for Stack<T, S> {
    #[inline]
    fn default() -> Self {
        Self::new(Default::default())
    }
}

impl<T, S: Sequence<T> + std::fmt::Debug> std::fmt::Debug for Stack<T, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stack").field("seq", &self.seq).finish()
    }
}
