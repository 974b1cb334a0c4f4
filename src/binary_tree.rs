//! Unbalanced binary search tree of unique keys

use std::cmp::Ordering;
use std::fmt;

type Link<T> = Option<Box<TreeNode<T>>>;

struct TreeNode<T> {
    value: T,
    left: Link<T>,
    right: Link<T>,
}

impl<T> TreeNode<T> {
    fn new(value: T) -> Self {
        Self {
            value,
            left: None,
            right: None,
        }
    }
}

/// Binary search tree
///
/// Smaller keys go left, larger keys go right; there is no rebalancing, so
/// sorted input degrades it into a list. Every walk over the tree is
/// iterative for that reason.
pub struct BinaryTree<T> {
    root: Link<T>,
    len: usize,
}

impl<T: Ord> BinaryTree<T> {
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Insert a key, returning false if it is already present
    pub fn insert(&mut self, value: T) -> bool {
        let mut link = &mut self.root;
        while let Some(node) = link {
            match value.cmp(&node.value) {
                Ordering::Less => link = &mut node.left,
                Ordering::Greater => link = &mut node.right,
                Ordering::Equal => return false,
            }
        }

        *link = Some(Box::new(TreeNode::new(value)));
        self.len += 1;
        true
    }

    pub fn find(&self, value: &T) -> Option<&T> {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match value.cmp(&node.value) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return Some(&node.value),
            };
        }
        None
    }

    pub fn contains(&self, value: &T) -> bool {
        self.find(value).is_some()
    }

    /// Remove a key, returning false if it was absent
    pub fn remove(&mut self, value: &T) -> bool {
        let mut link = &mut self.root;
        loop {
            let Some(node) = link.as_deref() else {
                return false;
            };
            let ordering = value.cmp(&node.value);
            if ordering == Ordering::Equal {
                break;
            }

            let Some(node) = link else {
                return false;
            };
            link = match ordering {
                Ordering::Less => &mut node.left,
                _ => &mut node.right,
            };
        }

        let Some(mut node) = link.take() else {
            return false;
        };
        *link = if node.left.is_some() && node.right.is_some() {
            // Two children: take over the in-order successor's key
            if let Some(successor) = Self::take_min(&mut node.right) {
                node.value = successor;
            }
            Some(node)
        } else {
            // Zero or one child: splice it into the parent's slot
            node.left.take().or_else(|| node.right.take())
        };

        self.len -= 1;
        true
    }

    /// Detach the smallest key of a subtree
    fn take_min(mut link: &mut Link<T>) -> Option<T> {
        while link.as_ref()?.left.is_some() {
            let Some(node) = link else {
                return None;
            };
            link = &mut node.left;
        }

        let mut node = link.take()?;
        *link = node.right.take();
        Some(node.value)
    }

    /// Number of levels (0 when empty)
    pub fn height(&self) -> usize {
        let mut level: Vec<&TreeNode<T>> = self.root.as_deref().into_iter().collect();
        let mut height = 0;

        while !level.is_empty() {
            height += 1;
            level = level
                .iter()
                .flat_map(|node| [node.left.as_deref(), node.right.as_deref()])
                .flatten()
                .collect();
        }

        height
    }

    /// Iterate over keys in ascending order
    pub fn iter(&self) -> Iter<'_, T> {
        let mut iter = Iter { stack: Vec::new() };
        iter.push_left(self.root.as_deref());
        iter
    }
}

impl<T: Ord> Default for BinaryTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for BinaryTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut set = f.debug_set();
        let mut stack = Vec::new();
        let mut current = self.root.as_deref();

        // In-order without recursion
        loop {
            while let Some(node) = current {
                stack.push(node);
                current = node.left.as_deref();
            }
            let Some(node) = stack.pop() else {
                break;
            };
            set.entry(&node.value);
            current = node.right.as_deref();
        }

        set.finish()
    }
}

impl<T> Drop for BinaryTree<T> {
    fn drop(&mut self) {
        // Detach subtrees onto a work list so no node drops a deep chain
        let mut pending: Vec<Box<TreeNode<T>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
        }
    }
}

impl<T: Ord> FromIterator<T> for BinaryTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        for value in iter {
            tree.insert(value);
        }
        tree
    }
}

/// In-order iterator over tree keys
pub struct Iter<'a, T> {
    stack: Vec<&'a TreeNode<T>>,
}

impl<'a, T> Iter<'a, T> {
    fn push_left(&mut self, mut current: Option<&'a TreeNode<T>>) {
        while let Some(node) = current {
            self.stack.push(node);
            current = node.left.as_deref();
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left(node.right.as_deref());
        Some(&node.value)
    }
}
