use super::{DEFAULT_DEPTH, Stack, StackError, StackResult};

/// Capacity change applied when the stack grows or shrinks
pub const RESIZE_STEP: usize = 10;

/// Array-backed stack that grows and shrinks in fixed steps
///
/// Capacity is tracked explicitly so the resize policy does not depend on
/// how `Vec` chooses to over-allocate.
#[derive(Debug, Clone)]
pub struct ResizableStack<T> {
    items: Vec<T>,
    capacity: usize,
}

impl<T> ResizableStack<T> {
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

    fn resize(&mut self, capacity: usize) {
        if capacity > self.items.capacity() {
            self.items.reserve_exact(capacity - self.items.len());
        } else {
            self.items.shrink_to(capacity);
        }
        self.capacity = capacity;
    }
}

impl<T> Default for ResizableStack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Stack<T> for ResizableStack<T> {
    fn push(&mut self, item: T) -> StackResult<()> {
        if self.items.len() == self.capacity {
            self.resize(self.capacity + RESIZE_STEP);
        }
        self.items.push(item);
        Ok(())
    }

    fn pop(&mut self) -> StackResult<T> {
        let item = self.items.pop().ok_or(StackError::Empty)?;

        let len = self.items.len();
        if len > 0 && len + RESIZE_STEP < self.capacity {
            self.resize(self.capacity - RESIZE_STEP);
        }

        Ok(item)
    }

    fn peek(&self) -> StackResult<&T> {
        self.items.last().ok_or(StackError::Empty)
    }

    fn len(&self) -> usize {
        self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grows_in_steps() {
        let mut stack = ResizableStack::new();
        for i in 0..25 {
            stack.push(i).unwrap();
        }

        assert_eq!(stack.len(), 25);
        assert_eq!(stack.capacity(), 30);
    }

    #[test]
    fn test_shrinks_in_steps() {
        let mut stack = ResizableStack::new();
        for i in 0..25 {
            stack.push(i).unwrap();
        }

        // 30 slots: shrink once fewer than 20 items remain
        while stack.len() > 20 {
            stack.pop().unwrap();
        }
        assert_eq!(stack.capacity(), 30);

        stack.pop().unwrap();
        assert_eq!(stack.len(), 19);
        assert_eq!(stack.capacity(), 20);

        while stack.len() > 9 {
            stack.pop().unwrap();
        }
        assert_eq!(stack.capacity(), 10);
    }

    #[test]
    fn test_never_shrinks_to_nothing() {
        let mut stack = ResizableStack::with_capacity(20);
        stack.push(1).unwrap();

        stack.pop().unwrap();

        assert!(stack.is_empty());
        assert_eq!(stack.capacity(), 20);
    }
}
