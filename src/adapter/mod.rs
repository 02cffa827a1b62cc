pub mod queue;
pub mod sequence;
pub mod stack;

pub use queue::Queue;
pub use sequence::Sequence;
pub use stack::Stack;
