//! Bridges (cut edges).
//!
//! Finds edges whose removal disconnects the graph, on the undirected
//! view of the graph. Uses Tarjan's discovery time / low-link DFS.
//!
//! The back-edge check skips the DFS parent *vertex*, not the edge just
//! walked. That is only correct because a graph holds at most one edge per
//! pair: with parallel edges, a doubled connection would still be reported
//! as a bridge. Any multigraph support must track edge identity here.

use crate::graph::Graph;
use crate::model::Vertex;
use std::collections::HashSet;
use tracing::trace;

/// One DFS frame: vertex, its tree parent, next neighbor position.
struct Frame {
    vertex: usize,
    parent: Option<usize>,
    next: usize,
}

/// Find bridges using Tarjan's algorithm.
///
/// # Algorithm
/// DFS assigns each vertex a discovery time `tin[v]` and a low-link
/// `fup[v]`, the smallest discovery time reachable from the subtree of `v`
/// through at most one back edge. A tree edge (v, to) is a bridge if
/// `fup[to] > tin[v]`. Self-loops carry no connectivity and are skipped.
///
/// Directed graphs are read as undirected: `a -> b` and `b -> a` collapse
/// into one connection.
///
/// # Returns
/// Bridges as `(v, to)` tree edges in discovery order.
pub fn bridges(graph: &Graph) -> Vec<(Vertex, Vertex)> {
    let n = graph.len();
    if n == 0 {
        return Vec::new();
    }
    trace!(vertices = n, "bridges");

    let neighbors = build_undirected_neighbors(graph);

    let mut tin = vec![0usize; n];
    let mut fup = vec![0usize; n];
    let mut visited = vec![false; n];
    let mut timer = 0usize;
    let mut bridge_list = Vec::new();

    // Restart from every unvisited vertex (handles disconnected graphs)
    for root in 0..n {
        if visited[root] {
            continue;
        }

        visited[root] = true;
        tin[root] = timer;
        fup[root] = timer;
        timer += 1;

        let mut work = vec![Frame {
            vertex: root,
            parent: None,
            next: 0,
        }];

        while let Some(frame) = work.last_mut() {
            let v = frame.vertex;
            let parent = frame.parent;

            if let Some(&to) = neighbors[v].get(frame.next) {
                frame.next += 1;
                if to == v || Some(to) == parent {
                    continue;
                }
                if visited[to] {
                    // Back edge
                    fup[v] = fup[v].min(tin[to]);
                } else {
                    visited[to] = true;
                    tin[to] = timer;
                    fup[to] = timer;
                    timer += 1;
                    work.push(Frame {
                        vertex: to,
                        parent: Some(v),
                        next: 0,
                    });
                }
                continue;
            }

            work.pop();
            if let Some(p) = parent {
                fup[p] = fup[p].min(fup[v]);
                // Bridge condition: the subtree of v cannot reach p or above
                if fup[v] > tin[p] {
                    bridge_list.push((graph.vertex_at(p).clone(), graph.vertex_at(v).clone()));
                }
            }
        }
    }

    bridge_list
}

/// Build symmetric neighbor lists, keeping first-seen order and one entry per pair.
fn build_undirected_neighbors(graph: &Graph) -> Vec<Vec<usize>> {
    let n = graph.len();
    let mut neighbors: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut seen: HashSet<(usize, usize)> = HashSet::new();

    for (u, link) in graph.all_arcs() {
        let v = link.to;
        if u == v {
            // Skip self-loops
            continue;
        }
        if seen.insert((u, v)) {
            neighbors[u].push(v);
        }
        if seen.insert((v, u)) {
            neighbors[v].push(u);
        }
    }

    neighbors
}
