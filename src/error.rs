/// Error for positional access with an index at or beyond the current length.
///
/// The sequence is left untouched whenever this is returned: the bounds check
/// runs before any mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[error("index (is {index}) should be < len (is {len})")]
pub struct OutOfRange {
    pub index: usize,
    pub len: usize,
}

/// Error for a peek or removal on an empty stack or queue.
///
/// Distinct from [`OutOfRange`]: the adapters check emptiness themselves
/// instead of reinterpreting the wrapped sequence's bounds error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[error("container is empty")]
pub struct Underflow;
