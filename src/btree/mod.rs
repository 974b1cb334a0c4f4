//! B-tree of unique, totally ordered keys
//!
//! Classic minimum-degree formulation: with degree `t`, every node holds at
//! most `2t - 1` keys and every node except the root holds at least `t - 1`.
//! - Insertion splits full children on the way down, so a single top-down
//!   pass always finds room for the promoted median
//! - Deletion tops up a child (borrow from a sibling, or merge) before
//!   descending into it, so no fix-up pass is ever needed on the way back
//!
//! Nodes own their children directly; recursion carries the parent and the
//! child index, so there are no parent pointers to keep in sync.

mod error;
mod node;
#[cfg(test)]
mod tests;

pub use error::{BTreeError, BTreeResult};
pub use node::Node;

use std::cmp::Ordering;
use std::fmt;
use std::mem;

use serde::Serialize;

/// Smallest degree for which the split/merge arithmetic holds
pub const MIN_DEGREE: usize = 2;

/// Degree used by [`BTree::default`] (at most 5 keys per node)
pub const DEFAULT_DEGREE: usize = 3;

/// B-tree data structure
///
/// Degree `t` means:
/// - Every node has at most `2t - 1` keys (`2t` children)
/// - Every node except the root has at least `t - 1` keys (`t` children)
/// - All leaves sit at the same depth
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BTree<K> {
    /// Minimum degree, fixed at construction
    degree: usize,

    /// Total number of keys in the tree
    len: usize,

    /// Root node (None if tree is empty)
    root: Option<Node<K>>,
}

impl<K: Ord> BTree<K> {
    /// Create a new empty B-tree with the given minimum degree
    ///
    /// # Returns
    /// * `Ok(BTree)` - A new empty tree
    /// * `Err(BTreeError::InvalidDegree)` - If degree is below 2, or so large
    ///   that `2 * degree` overflows
    pub fn new(degree: usize) -> BTreeResult<Self> {
        let degree = node::validate_degree(degree)?;

        Ok(Self {
            degree,
            len: 0,
            root: None,
        })
    }

    /// Create a new B-tree with [`DEFAULT_DEGREE`]
    pub fn with_default_degree() -> Self {
        Self {
            degree: DEFAULT_DEGREE,
            len: 0,
            root: None,
        }
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Number of keys in the tree
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn root(&self) -> Option<&Node<K>> {
        self.root.as_ref()
    }

    /// Get tree height (0 when empty, 1 for a single leaf)
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut current = self.root.as_ref();

        while let Some(node) = current {
            height += 1;
            current = node.children.first();
        }

        height
    }

    /// Total number of nodes in the tree
    pub fn node_count(&self) -> usize {
        self.root.as_ref().map_or(0, Node::subtree_nodes)
    }

    /// Remove every key, keeping the degree
    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }

    // ========== Search Operations ==========

    /// Find the node holding `key`
    pub fn search(&self, key: &K) -> Option<&Node<K>> {
        let mut node = self.root.as_ref()?;

        loop {
            match node.locate(key) {
                Ok(_) => return Some(node),
                Err(_) if node.is_leaf() => return None,
                Err(index) => node = node.children.get(index)?,
            }
        }
    }

    pub fn contains(&self, key: &K) -> bool {
        self.search(key).is_some()
    }

    /// Smallest key in the tree
    pub fn min(&self) -> Option<&K> {
        let mut node = self.root.as_ref()?;
        while let Some(child) = node.children.first() {
            node = child;
        }
        node.values.first()
    }

    /// Largest key in the tree
    pub fn max(&self) -> Option<&K> {
        let mut node = self.root.as_ref()?;
        while let Some(child) = node.children.last() {
            node = child;
        }
        node.values.last()
    }

    /// Iterate over all keys in ascending order
    pub fn iter(&self) -> Iter<'_, K> {
        Iter::new(self)
    }

    /// Collect all keys in ascending order
    pub fn keys(&self) -> Vec<&K> {
        self.iter().collect()
    }

    // ========== Insert Operations ==========

    /// Insert a key into the tree
    ///
    /// A key that is already present is rejected with
    /// [`BTreeError::DuplicateKey`] and the tree is left untouched.
    pub fn insert(&mut self, key: K) -> BTreeResult<()> {
        // Checked up front: the root split below must not happen for a rejected key
        if self.contains(&key) {
            return Err(BTreeError::DuplicateKey);
        }

        let degree = self.degree;

        match self.root.as_mut() {
            None => {
                self.root = Some(Node::new(degree, key)?);
            }
            Some(root) => {
                if root.is_full(degree) {
                    // Tree grows by one level
                    let old_root = mem::replace(root, Node::with_capacity(degree));
                    root.children.push(old_root);
                    Self::split_child(root, 0, degree)?;
                }
                Self::insert_non_full(root, key, degree)?;
            }
        }

        self.len += 1;
        Ok(())
    }

    /// Insert into a subtree whose root is known to have room for one more key
    fn insert_non_full(node: &mut Node<K>, key: K, degree: usize) -> BTreeResult<()> {
        let mut index = match node.locate(&key) {
            Ok(_) => return Err(BTreeError::DuplicateKey),
            Err(index) => index,
        };

        if node.is_leaf() {
            node.values.insert(index, key);
            return Ok(());
        }

        if Self::child(node, index)?.is_full(degree) {
            Self::split_child(node, index, degree)?;

            // The promoted median now sits at `index`
            match node.values[index].cmp(&key) {
                Ordering::Less => index += 1,
                Ordering::Equal => return Err(BTreeError::DuplicateKey),
                Ordering::Greater => {}
            }
        }

        let child = node
            .children
            .get_mut(index)
            .ok_or_else(|| missing_child(index))?;
        Self::insert_non_full(child, key, degree)
    }

    /// Split the full child at `index`, moving its median up into `parent`
    ///
    /// The child keeps its left `t - 1` keys (and `t` children); a new right
    /// sibling takes the other `t - 1` keys (and `t` children).
    fn split_child(parent: &mut Node<K>, index: usize, degree: usize) -> BTreeResult<()> {
        let child = parent
            .children
            .get_mut(index)
            .ok_or_else(|| missing_child(index))?;

        if child.values.len() != 2 * degree - 1 {
            return Err(BTreeError::invalid_state(format!(
                "split of child {} holding {} keys",
                index,
                child.values.len()
            )));
        }

        let mut sibling = Node::with_capacity(degree);
        sibling.values.extend(child.values.drain(degree..));
        if !child.is_leaf() {
            sibling.children.extend(child.children.drain(degree..));
        }

        let median = child
            .values
            .pop()
            .ok_or_else(|| BTreeError::invalid_state("split child has no median"))?;

        parent.values.insert(index, median);
        parent.children.insert(index + 1, sibling);

        Ok(())
    }

    // ========== Delete Operations ==========

    /// Delete a key from the tree
    ///
    /// An absent key is reported as [`BTreeError::KeyNotFound`] and the tree
    /// is left untouched.
    pub fn delete(&mut self, key: &K) -> BTreeResult<()> {
        // Checked up front: the top-up steps must not run for an absent key
        if !self.contains(key) {
            return Err(BTreeError::KeyNotFound);
        }

        let degree = self.degree;
        let root = self.root.as_mut().ok_or(BTreeError::KeyNotFound)?;
        Self::delete_from(root, key, degree)?;

        self.len -= 1;
        self.collapse_root();

        Ok(())
    }

    /// Replace a root left without keys by its only child (or nothing)
    fn collapse_root(&mut self) {
        let drained = matches!(&self.root, Some(root) if root.is_empty());
        if drained {
            // Tree shrinks by one level
            self.root = self.root.take().and_then(|mut root| root.children.pop());
        }
    }

    fn delete_from(node: &mut Node<K>, key: &K, degree: usize) -> BTreeResult<()> {
        match node.locate(key) {
            Ok(index) if node.is_leaf() => {
                node.values.remove(index);
                Ok(())
            }
            Ok(index) => Self::delete_internal_key(node, index, key, degree),
            Err(_) if node.is_leaf() => Err(BTreeError::KeyNotFound),
            Err(index) => {
                let index = Self::fill_child(node, index, degree)?;
                let child = node
                    .children
                    .get_mut(index)
                    .ok_or_else(|| missing_child(index))?;
                Self::delete_from(child, key, degree)
            }
        }
    }

    /// Delete the key at `index` of an internal node
    fn delete_internal_key(
        node: &mut Node<K>,
        index: usize,
        key: &K,
        degree: usize,
    ) -> BTreeResult<()> {
        if Self::child(node, index)?.len() >= degree {
            // Replace with the in-order predecessor
            let predecessor = Self::pop_max(&mut node.children[index], degree)?;
            node.values[index] = predecessor;
            Ok(())
        } else if Self::child(node, index + 1)?.len() >= degree {
            // Replace with the in-order successor
            let successor = Self::pop_min(&mut node.children[index + 1], degree)?;
            node.values[index] = successor;
            Ok(())
        } else {
            // Both neighbours hold t - 1 keys: pull the key down into their merge
            Self::merge_children(node, index)?;
            Self::delete_from(&mut node.children[index], key, degree)
        }
    }

    /// Remove and return the largest key of a subtree whose root holds at least `t` keys
    fn pop_max(node: &mut Node<K>, degree: usize) -> BTreeResult<K> {
        if node.is_leaf() {
            return node
                .values
                .pop()
                .ok_or_else(|| BTreeError::invalid_state("predecessor search reached an empty leaf"));
        }

        let last = node.children.len() - 1;
        let index = Self::fill_child(node, last, degree)?;
        Self::pop_max(&mut node.children[index], degree)
    }

    /// Remove and return the smallest key of a subtree whose root holds at least `t` keys
    fn pop_min(node: &mut Node<K>, degree: usize) -> BTreeResult<K> {
        if node.is_leaf() {
            if node.values.is_empty() {
                return Err(BTreeError::invalid_state(
                    "successor search reached an empty leaf",
                ));
            }
            return Ok(node.values.remove(0));
        }

        let index = Self::fill_child(node, 0, degree)?;
        Self::pop_min(&mut node.children[index], degree)
    }

    /// Make sure the child at `index` holds at least `t` keys before descending
    ///
    /// Returns the index to descend into, which moves one slot left when the
    /// child had to be merged into its left sibling.
    fn fill_child(node: &mut Node<K>, index: usize, degree: usize) -> BTreeResult<usize> {
        if Self::child(node, index)?.len() >= degree {
            return Ok(index);
        }

        let count = node.children.len();

        if index > 0 && node.children[index - 1].len() >= degree {
            Self::borrow_from_left(node, index)?;
            Ok(index)
        } else if index + 1 < count && node.children[index + 1].len() >= degree {
            Self::borrow_from_right(node, index)?;
            Ok(index)
        } else if index + 1 < count {
            Self::merge_children(node, index)?;
            Ok(index)
        } else if index > 0 {
            Self::merge_children(node, index - 1)?;
            Ok(index - 1)
        } else {
            Err(BTreeError::invalid_state(
                "child has no sibling to borrow from or merge with",
            ))
        }
    }

    /// Rotate the left sibling's last key up through the parent into the child
    fn borrow_from_left(parent: &mut Node<K>, index: usize) -> BTreeResult<()> {
        let (before, after) = parent.children.split_at_mut(index);
        let sibling = before
            .last_mut()
            .ok_or_else(|| BTreeError::invalid_state("first child has no left sibling"))?;
        let child = after.first_mut().ok_or_else(|| missing_child(index))?;

        let lent = sibling
            .values
            .pop()
            .ok_or_else(|| BTreeError::invalid_state("left sibling has no key to lend"))?;
        let separator = mem::replace(&mut parent.values[index - 1], lent);
        child.values.insert(0, separator);

        if let Some(subtree) = sibling.children.pop() {
            child.children.insert(0, subtree);
        }

        Ok(())
    }

    /// Rotate the right sibling's first key up through the parent into the child
    fn borrow_from_right(parent: &mut Node<K>, index: usize) -> BTreeResult<()> {
        let (before, after) = parent.children.split_at_mut(index + 1);
        let child = before.last_mut().ok_or_else(|| missing_child(index))?;
        let sibling = after.first_mut().ok_or_else(|| missing_child(index + 1))?;

        if sibling.values.is_empty() {
            return Err(BTreeError::invalid_state(
                "right sibling has no key to lend",
            ));
        }

        let lent = sibling.values.remove(0);
        let separator = mem::replace(&mut parent.values[index], lent);
        child.values.push(separator);

        if !sibling.is_leaf() {
            child.children.push(sibling.children.remove(0));
        }

        Ok(())
    }

    /// Merge child `index + 1` and the separating key into child `index`
    fn merge_children(parent: &mut Node<K>, index: usize) -> BTreeResult<()> {
        if index + 1 >= parent.children.len() || index >= parent.values.len() {
            return Err(BTreeError::invalid_state(format!(
                "no sibling pair at index {} to merge",
                index
            )));
        }

        let right = parent.children.remove(index + 1);
        let separator = parent.values.remove(index);

        let left = &mut parent.children[index];
        left.values.push(separator);
        left.values.extend(right.values);
        left.children.extend(right.children);

        Ok(())
    }

    fn child(node: &Node<K>, index: usize) -> BTreeResult<&Node<K>> {
        node.children.get(index).ok_or_else(|| missing_child(index))
    }

    // ========== Validation ==========

    /// Verify every structural invariant of the tree
    ///
    /// Checks key ordering (within and across nodes), per-node key counts,
    /// child counts, uniform leaf depth and the cached key count.
    pub fn check_invariants(&self) -> BTreeResult<()> {
        let Some(root) = self.root.as_ref() else {
            if self.len != 0 {
                return Err(BTreeError::invalid_state(format!(
                    "empty tree reports {} keys",
                    self.len
                )));
            }
            return Ok(());
        };

        if root.is_empty() {
            return Err(BTreeError::invalid_state("root holds no keys"));
        }

        let mut leaf_depth = None;
        let counted = self.check_node(root, true, 0, None, None, &mut leaf_depth)?;

        if counted != self.len {
            return Err(BTreeError::invalid_state(format!(
                "tree reports {} keys but holds {}",
                self.len, counted
            )));
        }

        Ok(())
    }

    /// Returns the number of keys in the subtree
    fn check_node(
        &self,
        node: &Node<K>,
        is_root: bool,
        depth: usize,
        lower: Option<&K>,
        upper: Option<&K>,
        leaf_depth: &mut Option<usize>,
    ) -> BTreeResult<usize> {
        let max_keys = 2 * self.degree - 1;
        let min_keys = if is_root { 0 } else { self.degree - 1 };

        if node.len() > max_keys || node.len() < min_keys {
            return Err(BTreeError::invalid_state(format!(
                "node at depth {} holds {} keys (allowed {}..={})",
                depth,
                node.len(),
                min_keys,
                max_keys
            )));
        }

        if !node.values.windows(2).all(|pair| pair[0] < pair[1]) {
            return Err(BTreeError::invalid_state(format!(
                "keys out of order at depth {}",
                depth
            )));
        }

        let below_lower = matches!((lower, node.values.first()), (Some(bound), Some(first)) if first <= bound);
        let above_upper = matches!((upper, node.values.last()), (Some(bound), Some(last)) if last >= bound);
        if below_lower || above_upper {
            return Err(BTreeError::invalid_state(format!(
                "keys at depth {} escape their separator bounds",
                depth
            )));
        }

        if node.is_leaf() {
            match *leaf_depth {
                None => *leaf_depth = Some(depth),
                Some(expected) if expected != depth => {
                    return Err(BTreeError::invalid_state(format!(
                        "leaf at depth {} but other leaves at depth {}",
                        depth, expected
                    )));
                }
                Some(_) => {}
            }
            return Ok(node.len());
        }

        if node.children.len() != node.values.len() + 1 {
            return Err(BTreeError::invalid_state(format!(
                "internal node at depth {} has {} keys and {} children",
                depth,
                node.values.len(),
                node.children.len()
            )));
        }

        let mut total = node.len();
        for (i, child) in node.children.iter().enumerate() {
            let child_lower = if i == 0 { lower } else { node.values.get(i - 1) };
            let child_upper = node.values.get(i).or(upper);
            total += self.check_node(child, false, depth + 1, child_lower, child_upper, leaf_depth)?;
        }

        Ok(total)
    }
}

impl<K: Ord> Default for BTree<K> {
    fn default() -> Self {
        Self::with_default_degree()
    }
}

fn missing_child(index: usize) -> BTreeError {
    BTreeError::invalid_state(format!("missing child at index {}", index))
}

/// Renders one line per level, each node as `[k1 k2 ...]`
impl<K: fmt::Display> fmt::Display for BTree<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(root) = self.root.as_ref() else {
            return write!(f, "(empty)");
        };

        let mut level = vec![root];
        let mut first = true;

        while !level.is_empty() {
            if !first {
                writeln!(f)?;
            }
            first = false;

            let line = level
                .iter()
                .map(|node| {
                    let keys: Vec<String> = node.values.iter().map(ToString::to_string).collect();
                    format!("[{}]", keys.join(" "))
                })
                .collect::<Vec<_>>()
                .join(" ");
            write!(f, "{}", line)?;

            level = level.iter().flat_map(|node| node.children.iter()).collect();
        }

        Ok(())
    }
}

// ========== Iterator ==========

/// In-order iterator over B-tree keys
pub struct Iter<'a, K> {
    /// Nodes on the path to the next key, with the index of their next unvisited key
    stack: Vec<(&'a Node<K>, usize)>,
    remaining: usize,
}

impl<'a, K> Iter<'a, K> {
    fn new(tree: &'a BTree<K>) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            remaining: tree.len,
        };
        if let Some(root) = tree.root.as_ref() {
            iter.descend(root);
        }
        iter
    }

    /// Push `node` and its leftmost spine
    fn descend(&mut self, mut node: &'a Node<K>) {
        loop {
            self.stack.push((node, 0));
            match node.children.first() {
                Some(child) => node = child,
                None => break,
            }
        }
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (node, index) = self.stack.last_mut()?;
            let node: &'a Node<K> = *node;

            if *index < node.values.len() {
                let current = *index;
                *index += 1;

                // Everything between this key and the next one lives in children[current + 1]
                if let Some(child) = node.children.get(current + 1) {
                    self.descend(child);
                }

                self.remaining = self.remaining.saturating_sub(1);
                return Some(&node.values[current]);
            }

            self.stack.pop();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {}

impl<'a, K: Ord> IntoIterator for &'a BTree<K> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
