use serde::Serialize;

use super::{BTreeError, BTreeResult, MIN_DEGREE};

/// B-tree node: ordered keys plus the subtrees between them
///
/// - `values` is strictly increasing
/// - `children` is either empty (leaf) or holds `values.len() + 1` subtrees
/// - children are owned by their parent; there is no back-pointer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node<K> {
    pub(crate) values: Vec<K>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(crate) children: Vec<Node<K>>,
}

impl<K: Ord> Node<K> {
    /// Create a leaf holding a single key
    pub fn new(degree: usize, key: K) -> BTreeResult<Self> {
        let mut node = Self::with_capacity(validate_degree(degree)?);
        node.values.push(key);
        Ok(node)
    }

    /// Create a leaf from keys that are already in ascending order
    ///
    /// Fails with `InvalidState` if the keys are not strictly increasing or
    /// would not fit in one node of this degree.
    pub fn with_values<I>(degree: usize, values: I) -> BTreeResult<Self>
    where
        I: IntoIterator<Item = K>,
    {
        let mut node = Self::with_capacity(validate_degree(degree)?);
        node.values.extend(values);

        if !node.values.windows(2).all(|w| w[0] < w[1]) {
            return Err(BTreeError::invalid_state("node keys are not strictly increasing"));
        }
        if node.values.len() > 2 * degree - 1 {
            return Err(BTreeError::invalid_state(format!(
                "{} keys exceed the node limit of {}",
                node.values.len(),
                2 * degree - 1
            )));
        }
        Ok(node)
    }

    /// Empty node sized for an already validated degree
    ///
    /// Reservation is capped at [`RESERVED_KEYS`]; wider nodes grow on demand.
    pub(crate) fn with_capacity(degree: usize) -> Self {
        let keys = (2 * degree - 1).min(RESERVED_KEYS);
        Self {
            values: Vec::with_capacity(keys),
            children: Vec::with_capacity(keys + 1),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of keys held by this node
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// A full node holds `2t - 1` keys and must be split before it can take another
    pub fn is_full(&self, degree: usize) -> bool {
        self.values.len() >= 2 * degree - 1
    }

    pub fn contains(&self, key: &K) -> bool {
        self.values.binary_search(key).is_ok()
    }

    pub fn values(&self) -> &[K] {
        &self.values
    }

    pub fn children(&self) -> &[Node<K>] {
        &self.children
    }

    /// Position of `key` in this node, or the child slot it would descend into
    pub(crate) fn locate(&self, key: &K) -> Result<usize, usize> {
        self.values.binary_search(key)
    }

    /// Number of nodes in this subtree, including this one
    pub(crate) fn subtree_nodes(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(|child| child.subtree_nodes())
            .sum::<usize>()
    }
}

/// Keys reserved up front when a node is created
const RESERVED_KEYS: usize = 63;

/// Accept degrees from [`MIN_DEGREE`] up to the largest `t` whose `2t` fits in a `usize`
pub(crate) fn validate_degree(degree: usize) -> BTreeResult<usize> {
    match degree.checked_mul(2) {
        Some(_) if degree >= MIN_DEGREE => Ok(degree),
        _ => Err(BTreeError::InvalidDegree(degree)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_single_key() {
        let node = Node::new(2, 7).unwrap();

        assert!(node.is_leaf());
        assert_eq!(node.len(), 1);
        assert_eq!(node.values(), &[7]);
        assert!(node.contains(&7));
        assert!(!node.contains(&8));
    }

    #[test]
    fn test_with_values_capacity() {
        let node = Node::with_values(3, [1, 4, 9]).unwrap();

        assert_eq!(node.values(), &[1, 4, 9]);
        assert!(node.values.capacity() >= 5);
        assert!(node.children.capacity() >= 6);
        assert!(!node.is_full(3));
        assert!(node.is_full(2));
    }

    #[test]
    fn test_invalid_degree() {
        assert_eq!(Node::new(1, 5), Err(BTreeError::InvalidDegree(1)));
        assert_eq!(
            Node::with_values(0, Vec::<i32>::new()),
            Err(BTreeError::InvalidDegree(0))
        );
    }

    #[test]
    fn test_degree_must_double_without_overflow() {
        assert_eq!(validate_degree(usize::MAX / 2), Ok(usize::MAX / 2));
        assert_eq!(
            validate_degree(usize::MAX / 2 + 1),
            Err(BTreeError::InvalidDegree(usize::MAX / 2 + 1))
        );
        assert_eq!(
            Node::new(usize::MAX, 1),
            Err(BTreeError::InvalidDegree(usize::MAX))
        );
    }

    #[test]
    fn test_huge_degree_reserves_little() {
        let node = Node::new(usize::MAX / 2, 1).unwrap();

        assert!(node.values.capacity() <= RESERVED_KEYS);
        assert!(!node.is_full(usize::MAX / 2));
    }

    #[test]
    fn test_with_values_rejects_bad_input() {
        assert!(matches!(
            Node::with_values(2, [3, 1, 2]),
            Err(BTreeError::InvalidState(_))
        ));
        assert!(matches!(
            Node::with_values(2, [1, 1]),
            Err(BTreeError::InvalidState(_))
        ));
        // t = 2 holds at most three keys
        assert!(matches!(
            Node::with_values(2, [1, 2, 3, 4]),
            Err(BTreeError::InvalidState(_))
        ));
        assert!(Node::with_values(2, [1, 2, 3]).is_ok());
    }

    #[test]
    fn test_locate() {
        let node = Node::with_values(3, [10, 20, 30]).unwrap();

        assert_eq!(node.locate(&20), Ok(1));
        assert_eq!(node.locate(&5), Err(0)); // before every key
        assert_eq!(node.locate(&25), Err(2)); // between 20 and 30
        assert_eq!(node.locate(&99), Err(3)); // rightmost child
    }

    #[test]
    fn test_leaf_status_follows_children() {
        let mut parent = Node::new(2, 10).unwrap();
        assert!(parent.is_leaf());

        parent.children.push(Node::new(2, 5).unwrap());
        parent.children.push(Node::new(2, 15).unwrap());

        assert!(!parent.is_leaf());
        assert_eq!(parent.subtree_nodes(), 3);
    }
}
