//! Vertex and edge value types shared by the graph and the algorithms.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Vertex identity: an integer id plus a display name.
///
/// Two vertices are equal iff both id and name match. Name uniqueness is
/// enforced by the owning [`Graph`](crate::Graph), not here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Vertex {
    id: u32,
    name: String,
}

impl Vertex {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Vertex {
            id,
            name: name.into(),
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A materialized edge between two vertices.
///
/// `weight` is `None` whenever the owning graph is unweighted. `seq` is a
/// display number for the editor; no algorithm reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub source: Vertex,
    pub destination: Vertex,
    pub weight: Option<f64>,
    pub seq: u32,
}

impl Edge {
    pub fn is_self_loop(&self) -> bool {
        self.source == self.destination
    }
}

/// Construction-time capabilities of a graph. Never changes afterwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphKind {
    pub directed: bool,
    pub weighted: bool,
}

impl GraphKind {
    pub fn new(directed: bool, weighted: bool) -> Self {
        GraphKind { directed, weighted }
    }
}

/// Plain value used by persistence adapters to round-trip a graph.
///
/// Undirected edges appear once; the mirror entry is implied by `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub kind: GraphKind,
    pub vertices: Vec<Vertex>,
    pub edges: Vec<Edge>,
}
