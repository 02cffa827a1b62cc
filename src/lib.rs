pub mod adapter;
pub mod array_seq;
pub mod error;
pub mod linked_seq;

pub use adapter::{Queue, Sequence, Stack};
pub use array_seq::ArraySeq;
pub use error::{OutOfRange, Underflow};
pub use linked_seq::LinkedSeq;
