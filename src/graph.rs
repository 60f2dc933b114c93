//! Mutable adjacency structure with directed/undirected and weighted/unweighted variants.

use crate::model::{Edge, GraphKind, GraphSnapshot, Vertex};
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;
use wasm_bindgen::prelude::*;

/// One adjacency entry: the target's position plus the edge payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Link {
    pub(crate) to: usize,
    pub(crate) weight: Option<f64>,
    pub(crate) seq: u32,
}

/// Graph owning its vertices and their outgoing edges.
///
/// `directed` and `weighted` are fixed at construction. An undirected edge
/// is stored as two mirrored entries that are always created and removed
/// together. At most one edge exists per ordered pair.
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct Graph {
    kind: GraphKind,

    /// Vertices in insertion order. Positions index `adj`.
    vertices: Vec<Vertex>,

    /// Reverse lookup: name -> position
    name_index: HashMap<String, usize>,

    /// adj[u] = outgoing entries of vertices[u], in insertion order
    adj: Vec<Vec<Link>>,

    /// Wider than vertex ids so `u32::MAX + 1` is representable
    next_vertex_id: u64,
    next_edge_seq: u32,
}

#[wasm_bindgen]
impl Graph {
    /// Create an empty graph with fixed capabilities.
    #[wasm_bindgen(constructor)]
    pub fn new(directed: bool, weighted: bool) -> Graph {
        Graph::with_kind(GraphKind::new(directed, weighted))
    }

    /// Create an empty graph from a `{ directed, weighted }` object.
    #[wasm_bindgen(js_name = fromKind)]
    pub fn from_kind(kind: JsValue) -> Result<Graph, JsError> {
        let kind: GraphKind =
            serde_wasm_bindgen::from_value(kind).map_err(|e| JsError::new(&e.to_string()))?;
        Ok(Graph::with_kind(kind))
    }

    /// Rebuild a graph from a snapshot produced by `snapshot()`.
    #[wasm_bindgen(js_name = fromSnapshot)]
    pub fn from_snapshot_js(snapshot: JsValue) -> Result<Graph, JsError> {
        let snapshot: GraphSnapshot =
            serde_wasm_bindgen::from_value(snapshot).map_err(|e| JsError::new(&e.to_string()))?;
        Ok(Graph::from_snapshot(snapshot))
    }

    #[wasm_bindgen(js_name = isDirected)]
    pub fn is_directed(&self) -> bool {
        self.kind.directed
    }

    #[wasm_bindgen(js_name = isWeighted)]
    pub fn is_weighted(&self) -> bool {
        self.kind.weighted
    }

    /// Add a vertex with the next free id. No-op if the name is taken or
    /// the id space is exhausted.
    #[wasm_bindgen(js_name = addVertex)]
    pub fn add_vertex(&mut self, name: &str) {
        let Ok(id) = u32::try_from(self.next_vertex_id) else {
            debug!(name, "add_vertex: vertex ids exhausted, vertex dropped");
            return;
        };
        self.insert_vertex(Vertex::new(id, name));
    }

    /// Remove a vertex and every edge touching it.
    #[wasm_bindgen(js_name = removeVertex)]
    pub fn remove_vertex(&mut self, name: &str) {
        let Some(idx) = self.name_index.remove(name) else {
            debug!(name, "remove_vertex: no such vertex");
            return;
        };

        self.vertices.remove(idx);
        self.adj.remove(idx);

        // Drop incoming entries, then shift positions past the removed slot
        for arcs in &mut self.adj {
            arcs.retain(|a| a.to != idx);
            for arc in arcs.iter_mut() {
                if arc.to > idx {
                    arc.to -= 1;
                }
            }
        }
        for (pos, v) in self.vertices.iter().enumerate().skip(idx) {
            self.name_index.insert(v.name().to_string(), pos);
        }
    }

    /// Add an edge, replacing any existing edge for the pair.
    /// Mirrored for undirected graphs. No-op if either endpoint is missing.
    #[wasm_bindgen(js_name = addEdge)]
    pub fn add_edge(&mut self, from: &str, to: &str, weight: Option<f64>) {
        let (Some(u), Some(v)) = (self.position(from), self.position(to)) else {
            debug!(from, to, "add_edge: endpoint missing, edge dropped");
            return;
        };
        self.link(u, v, weight, None);
    }

    /// Remove the edge for the pair (both entries if undirected).
    #[wasm_bindgen(js_name = removeEdge)]
    pub fn remove_edge(&mut self, from: &str, to: &str) {
        let (Some(u), Some(v)) = (self.position(from), self.position(to)) else {
            debug!(from, to, "remove_edge: endpoint missing, request dropped");
            return;
        };
        self.adj[u].retain(|a| a.to != v);
        if !self.kind.directed {
            self.adj[v].retain(|a| a.to != u);
        }
    }

    #[wasm_bindgen(js_name = containsVertex)]
    pub fn contains_vertex(&self, name: &str) -> bool {
        self.name_index.contains_key(name)
    }

    #[wasm_bindgen(js_name = containsEdge)]
    pub fn contains_edge(&self, from: &str, to: &str) -> bool {
        self.arc_by_name(from, to).is_some()
    }

    /// Weight of the edge, or `None` if missing or the graph is unweighted.
    #[wasm_bindgen(js_name = edgeWeight)]
    pub fn edge_weight(&self, from: &str, to: &str) -> Option<f64> {
        self.arc_by_name(from, to).and_then(|a| a.weight)
    }

    #[wasm_bindgen(js_name = vertexCount)]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of edges. An undirected edge and its mirror count once.
    #[wasm_bindgen(js_name = edgeCount)]
    pub fn edge_count(&self) -> usize {
        let mut links = 0;
        let mut loops = 0;
        for (u, arcs) in self.adj.iter().enumerate() {
            for arc in arcs {
                if arc.to == u {
                    loops += 1;
                } else {
                    links += 1;
                }
            }
        }
        if self.kind.directed {
            links + loops
        } else {
            links / 2 + loops
        }
    }

    /// Graph density: edges / possible edges for this kind.
    pub fn density(&self) -> f64 {
        let n = self.vertex_count() as f64;
        let e = self.edge_count() as f64;
        if n <= 1.0 {
            0.0
        } else if self.kind.directed {
            e / (n * (n - 1.0))
        } else {
            2.0 * e / (n * (n - 1.0))
        }
    }

    /// Neighbors of a vertex as an array of `{ id, name }`.
    #[wasm_bindgen(js_name = neighbors)]
    pub fn neighbors_js(&self, name: &str) -> JsValue {
        let neighbors = self
            .vertex_by_name(name)
            .map(|v| self.neighbors(v))
            .unwrap_or_default();
        to_js(&neighbors)
    }

    /// All vertices as an array of `{ id, name }`.
    #[wasm_bindgen(js_name = vertices)]
    pub fn vertices_js(&self) -> JsValue {
        to_js(&self.vertices)
    }

    /// All edges, undirected pairs listed once.
    #[wasm_bindgen(js_name = edges)]
    pub fn edges_js(&self) -> JsValue {
        to_js(&self.edges())
    }

    /// Export `{ kind, vertices, edges }` for persistence adapters.
    #[wasm_bindgen(js_name = snapshot)]
    pub fn snapshot_js(&self) -> JsValue {
        to_js(&self.snapshot())
    }

    /// Dijkstra shortest path. Returns `{ path, distance }` or null.
    /// Throws if a negative edge weight is examined.
    #[wasm_bindgen(js_name = shortestPath)]
    pub fn shortest_path_js(&self, from: &str, to: &str) -> Result<JsValue, JsError> {
        use crate::algorithms::dijkstra::shortest_path;
        let (Some(start), Some(end)) = (self.vertex_by_name(from), self.vertex_by_name(to)) else {
            return Ok(JsValue::NULL);
        };
        Ok(match shortest_path(self, start, end)? {
            Some(found) => to_js(&found),
            None => JsValue::NULL,
        })
    }

    /// Bellman-Ford path to one target. Returns `{ path, distance }` or null.
    /// Throws on a reachable negative cycle.
    #[wasm_bindgen(js_name = bellmanFord)]
    pub fn bellman_ford_js(&self, from: &str, to: &str) -> Result<JsValue, JsError> {
        use crate::algorithms::bellman_ford::shortest_path;
        let (Some(source), Some(target)) = (self.vertex_by_name(from), self.vertex_by_name(to))
        else {
            return Ok(JsValue::NULL);
        };
        Ok(match shortest_path(self, source, target)? {
            Some(found) => to_js(&found),
            None => JsValue::NULL,
        })
    }

    /// Bellman-Ford distances from a source, keyed by vertex name.
    #[wasm_bindgen(js_name = bellmanFordDistances)]
    pub fn bellman_ford_distances_js(&self, from: &str) -> Result<JsValue, JsError> {
        use crate::algorithms::bellman_ford::distances;
        let Some(source) = self.vertex_by_name(from) else {
            return Ok(to_js_object(&HashMap::<String, f64>::new()));
        };
        let by_name: HashMap<String, f64> = distances(self, source)?
            .into_iter()
            .map(|(v, d)| (v.name().to_string(), d))
            .collect();
        Ok(to_js_object(&by_name))
    }

    /// Strongly connected components as arrays of `{ id, name }`.
    #[wasm_bindgen(js_name = stronglyConnectedComponents)]
    pub fn strongly_connected_components_js(&self) -> JsValue {
        use crate::algorithms::scc::strongly_connected_components;
        to_js(&strongly_connected_components(self))
    }

    /// Bridges (cut edges) as `[from, to]` vertex pairs.
    #[wasm_bindgen(js_name = bridges)]
    pub fn bridges_js(&self) -> JsValue {
        use crate::algorithms::bridges::bridges;
        to_js(&bridges(self))
    }

    /// Harmonic centrality keyed by vertex name.
    /// Throws on a reachable negative cycle in weighted graphs.
    #[wasm_bindgen(js_name = harmonicCentrality)]
    pub fn harmonic_centrality_js(&self) -> Result<JsValue, JsError> {
        use crate::algorithms::centrality::harmonic_centrality;
        let by_name: HashMap<String, f64> = harmonic_centrality(self)?
            .into_iter()
            .map(|(v, score)| (v.name().to_string(), score))
            .collect();
        Ok(to_js_object(&by_name))
    }
}

// Native API (not exposed to WASM)
impl Graph {
    pub fn with_kind(kind: GraphKind) -> Graph {
        Graph {
            kind,
            vertices: Vec::new(),
            name_index: HashMap::new(),
            adj: Vec::new(),
            next_vertex_id: 0,
            next_edge_seq: 0,
        }
    }

    pub fn kind(&self) -> GraphKind {
        self.kind
    }

    /// Insert a vertex keeping its id (used when restoring stored graphs).
    /// No-op if the name is taken. Later ids continue above the largest seen.
    pub fn insert_vertex(&mut self, vertex: Vertex) {
        if self.name_index.contains_key(vertex.name()) {
            debug!(name = vertex.name(), "insert_vertex: name taken, vertex dropped");
            return;
        }
        self.next_vertex_id = self.next_vertex_id.max(u64::from(vertex.id()) + 1);
        self.name_index
            .insert(vertex.name().to_string(), self.vertices.len());
        self.vertices.push(vertex);
        self.adj.push(Vec::new());
    }

    pub fn vertex_by_name(&self, name: &str) -> Option<&Vertex> {
        self.position(name).map(|idx| &self.vertices[idx])
    }

    pub fn contains(&self, vertex: &Vertex) -> bool {
        self.index_of(vertex).is_some()
    }

    /// All vertices in insertion order.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// All edges. For undirected graphs each mirrored pair is listed once.
    pub fn edges(&self) -> Vec<Edge> {
        let mut edges = Vec::with_capacity(self.edge_count());
        for (u, arcs) in self.adj.iter().enumerate() {
            for arc in arcs {
                if self.kind.directed || u <= arc.to {
                    edges.push(self.materialize(u, arc));
                }
            }
        }
        edges
    }

    /// Outgoing neighbors in edge insertion order. Empty for unknown vertices.
    pub fn neighbors(&self, vertex: &Vertex) -> Vec<Vertex> {
        match self.index_of(vertex) {
            Some(u) => self.adj[u]
                .iter()
                .map(|a| self.vertices[a.to].clone())
                .collect(),
            None => Vec::new(),
        }
    }

    /// Outgoing edges of a vertex. Empty for unknown vertices.
    pub fn edges_of(&self, vertex: &Vertex) -> Vec<Edge> {
        match self.index_of(vertex) {
            Some(u) => self.adj[u].iter().map(|a| self.materialize(u, a)).collect(),
            None => Vec::new(),
        }
    }

    /// The edge from `from` to `to`, if both vertices and the edge exist.
    pub fn edge_between(&self, from: &Vertex, to: &Vertex) -> Option<Edge> {
        let u = self.index_of(from)?;
        let v = self.index_of(to)?;
        self.find_arc(u, v).map(|a| self.materialize(u, a))
    }

    /// Iterate `(vertex, outgoing edges)` pairs in vertex insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Vertex, Vec<Edge>)> + '_ {
        self.vertices.iter().enumerate().map(move |(u, v)| {
            let edges = self.adj[u].iter().map(|a| self.materialize(u, a)).collect();
            (v, edges)
        })
    }

    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot {
            kind: self.kind,
            vertices: self.vertices.clone(),
            edges: self.edges(),
        }
    }

    /// Rebuild from a snapshot, keeping vertex ids and edge sequence numbers.
    /// Edges naming unknown vertices are dropped like any other edge.
    pub fn from_snapshot(snapshot: GraphSnapshot) -> Graph {
        let mut graph = Graph::with_kind(snapshot.kind);
        for vertex in snapshot.vertices {
            graph.insert_vertex(vertex);
        }
        for edge in snapshot.edges {
            let (Some(u), Some(v)) = (graph.index_of(&edge.source), graph.index_of(&edge.destination))
            else {
                debug!(from = %edge.source, to = %edge.destination, "from_snapshot: endpoint missing, edge dropped");
                continue;
            };
            graph.link(u, v, edge.weight, Some(edge.seq));
        }
        graph
    }
}

// Internal methods used by the algorithms
impl Graph {
    /// Number of vertices.
    pub(crate) fn len(&self) -> usize {
        self.vertices.len()
    }

    pub(crate) fn vertex_at(&self, idx: usize) -> &Vertex {
        &self.vertices[idx]
    }

    /// Position of a vertex, matching both id and name.
    pub(crate) fn index_of(&self, vertex: &Vertex) -> Option<usize> {
        self.position(vertex.name())
            .filter(|&idx| self.vertices[idx] == *vertex)
    }

    /// Outgoing entries of the vertex at `idx`.
    pub(crate) fn arcs(&self, idx: usize) -> &[Link] {
        self.adj.get(idx).map_or(&[], |v| v.as_slice())
    }

    /// Every stored entry as `(from, arc)`; undirected pairs appear twice.
    pub(crate) fn all_arcs(&self) -> impl Iterator<Item = (usize, &Link)> + '_ {
        self.adj
            .iter()
            .enumerate()
            .flat_map(|(from, arcs)| arcs.iter().map(move |arc| (from, arc)))
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.name_index.get(name).copied()
    }

    fn find_arc(&self, u: usize, v: usize) -> Option<&Link> {
        self.adj[u].iter().find(|a| a.to == v)
    }

    fn arc_by_name(&self, from: &str, to: &str) -> Option<&Link> {
        let u = self.position(from)?;
        let v = self.position(to)?;
        self.find_arc(u, v)
    }

    /// Create or replace the edge u -> v (and its mirror when undirected).
    fn link(&mut self, u: usize, v: usize, weight: Option<f64>, seq: Option<u32>) {
        let weight = if self.kind.weighted { weight } else { None };
        let existing = self.find_arc(u, v).map(|a| a.seq);
        let seq = match (seq, existing) {
            (Some(seq), _) => {
                self.next_edge_seq = self.next_edge_seq.max(seq);
                seq
            }
            (None, Some(existing)) => existing,
            (None, None) => {
                self.next_edge_seq += 1;
                self.next_edge_seq
            }
        };

        self.put_arc(u, Link { to: v, weight, seq });
        if !self.kind.directed && u != v {
            self.put_arc(v, Link { to: u, weight, seq });
        }
    }

    fn put_arc(&mut self, u: usize, arc: Link) {
        match self.adj[u].iter_mut().find(|a| a.to == arc.to) {
            Some(existing) => *existing = arc,
            None => self.adj[u].push(arc),
        }
    }

    fn materialize(&self, u: usize, arc: &Link) -> Edge {
        Edge {
            source: self.vertices[u].clone(),
            destination: self.vertices[arc.to].clone(),
            weight: arc.weight,
            seq: arc.seq,
        }
    }
}

impl Default for Graph {
    fn default() -> Self {
        Graph::with_kind(GraphKind::default())
    }
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> JsValue {
    serde_wasm_bindgen::to_value(value).unwrap_or(JsValue::NULL)
}

/// Serialize maps as plain JS objects rather than `Map`.
fn to_js_object<T: Serialize + ?Sized>(value: &T) -> JsValue {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .unwrap_or(JsValue::NULL)
}
