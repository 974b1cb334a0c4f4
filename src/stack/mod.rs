//! LIFO stacks: a fixed-capacity array, a growable array and a linked list
//!
//! All three share the [`Stack`] trait and iterate from top to bottom.

mod error;
mod fixed;
mod linked;
mod resizable;

pub use error::{StackError, StackResult};
pub use fixed::FixedStack;
pub use linked::NodeStack;
pub use resizable::ResizableStack;

/// Capacity of array-backed stacks built with `new()`
pub const DEFAULT_DEPTH: usize = 10;

/// Common stack operations
pub trait Stack<T> {
    /// Push an item on top of the stack
    fn push(&mut self, item: T) -> StackResult<()>;

    /// Remove and return the top item
    fn pop(&mut self) -> StackResult<T>;

    /// Borrow the top item without removing it
    fn peek(&self) -> StackResult<&T>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
