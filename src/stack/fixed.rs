use super::{DEFAULT_DEPTH, Stack, StackError, StackResult};

/// Array-backed stack that refuses to grow past its capacity
#[derive(Debug, Clone)]
pub struct FixedStack<T> {
    items: Vec<T>,
    capacity: usize,
}

impl<T> FixedStack<T> {
    /// Create a stack holding at most [`DEFAULT_DEPTH`] items
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_DEPTH)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterate from top to bottom
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter().rev()
    }
}

impl<T> Default for FixedStack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Stack<T> for FixedStack<T> {
    fn push(&mut self, item: T) -> StackResult<()> {
        if self.items.len() == self.capacity {
            return Err(StackError::Overflow {
                capacity: self.capacity,
            });
        }
        self.items.push(item);
        Ok(())
    }

    fn pop(&mut self) -> StackResult<T> {
        self.items.pop().ok_or(StackError::Empty)
    }

    fn peek(&self) -> StackResult<&T> {
        self.items.last().ok_or(StackError::Empty)
    }

    fn len(&self) -> usize {
        self.items.len()
    }
}
