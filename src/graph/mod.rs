//! Undirected weighted graph stored as adjacency lists
//!
//! Vertices live in a `Vec` and refer to each other by index; a name index
//! maps vertex names to those slots.

mod error;

pub use error::{GraphError, GraphResult};

use ahash::AHashMap;

/// Index of a vertex in the graph's vertex storage
pub type VertexId = usize;

/// Edge as seen from one endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    /// The vertex on the other end
    pub target: VertexId,
    pub weight: i64,
}

#[derive(Debug, Clone)]
pub struct Vertex {
    name: String,
    edges: Vec<Edge>,
}

impl Vertex {
    fn new(name: String) -> Self {
        Self {
            name,
            edges: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn degree(&self) -> usize {
        self.edges.len()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Graph {
    vertices: Vec<Vertex>,
    index: AHashMap<String, VertexId>,
    edge_count: usize,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of undirected edges
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn add_vertex(&mut self, name: impl Into<String>) -> GraphResult<VertexId> {
        let name = name.into();
        if self.index.contains_key(&name) {
            return Err(GraphError::DuplicateVertex(name));
        }

        let id = self.vertices.len();
        self.index.insert(name.clone(), id);
        self.vertices.push(Vertex::new(name));
        Ok(id)
    }

    pub fn vertex(&self, name: &str) -> Option<&Vertex> {
        self.index.get(name).map(|&id| &self.vertices[id])
    }

    pub fn vertex_by_id(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(id)
    }

    /// Connect two existing vertices in both directions
    pub fn add_edge(&mut self, first: &str, second: &str, weight: i64) -> GraphResult<()> {
        let a = self.lookup(first)?;
        let b = self.lookup(second)?;

        self.vertices[a].edges.push(Edge { target: b, weight });
        if a != b {
            self.vertices[b].edges.push(Edge { target: a, weight });
        }
        self.edge_count += 1;

        Ok(())
    }

    /// Names and weights of the vertices adjacent to `name`
    pub fn neighbors(&self, name: &str) -> GraphResult<Vec<(&str, i64)>> {
        let id = self.lookup(name)?;
        Ok(self.vertices[id]
            .edges
            .iter()
            .map(|edge| (self.vertices[edge.target].name(), edge.weight))
            .collect())
    }

    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices.iter()
    }

    fn lookup(&self, name: &str) -> GraphResult<VertexId> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| GraphError::VertexNotFound(name.to_string()))
    }
}
