use super::{Stack, StackError, StackResult};

type Link<T> = Option<Box<StackNode<T>>>;

#[derive(Debug)]
struct StackNode<T> {
    value: T,
    next: Link<T>,
}

/// Unbounded stack built from singly linked nodes
#[derive(Debug)]
pub struct NodeStack<T> {
    head: Link<T>,
    len: usize,
}

impl<T> NodeStack<T> {
    pub fn new() -> Self {
        Self { head: None, len: 0 }
    }

    /// Iterate from top to bottom
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        let mut current = self.head.as_deref();
        std::iter::from_fn(move || {
            let node = current?;
            current = node.next.as_deref();
            Some(&node.value)
        })
    }
}

impl<T> Default for NodeStack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Stack<T> for NodeStack<T> {
    fn push(&mut self, item: T) -> StackResult<()> {
        let node = Box::new(StackNode {
            value: item,
            next: self.head.take(),
        });
        self.head = Some(node);
        self.len += 1;
        Ok(())
    }

    fn pop(&mut self) -> StackResult<T> {
        let node = self.head.take().ok_or(StackError::Empty)?;
        self.head = node.next;
        self.len -= 1;
        Ok(node.value)
    }

    fn peek(&self) -> StackResult<&T> {
        self.head
            .as_ref()
            .map(|node| &node.value)
            .ok_or(StackError::Empty)
    }

    fn len(&self) -> usize {
        self.len
    }
}

impl<T> Drop for NodeStack<T> {
    fn drop(&mut self) {
        // Unlink iteratively; the default recursive drop overflows on long chains
        let mut current = self.head.take();
        while let Some(mut node) = current {
            current = node.next.take();
        }
    }
}
