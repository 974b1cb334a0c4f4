pub mod binary_tree;
pub mod btree;
pub mod graph;
pub mod hash_table;
pub mod linked_list;
pub mod shell;
pub mod stack;

pub use binary_tree::BinaryTree;
pub use btree::{BTree, BTreeError, BTreeResult, DEFAULT_DEGREE, MIN_DEGREE, Node};
pub use graph::{Edge, Graph, GraphError, GraphResult, Vertex, VertexId};
pub use hash_table::HashTable;
pub use linked_list::LinkedList;
pub use shell::{Command, Outcome, Shell, ShellError, ShellResult};
pub use stack::{FixedStack, NodeStack, ResizableStack, Stack, StackError, StackResult};
