//! Strongly connected components (Tarjan).
//!
//! Iterative DFS with an explicit work stack, so deep graphs cannot
//! overflow the call stack. Each frame records the vertex and the position
//! of the next outgoing edge to examine.

use crate::graph::Graph;
use crate::model::Vertex;
use std::collections::HashSet;
use tracing::trace;

/// Find strongly connected components using Tarjan's algorithm.
///
/// Every vertex lands in exactly one component; isolated vertices and
/// vertices with only a self-loop form singleton components. Weights are
/// ignored. In an undirected graph every edge is mirrored, so components
/// are the connected components. Component order is unspecified.
pub fn strongly_connected_components(graph: &Graph) -> Vec<HashSet<Vertex>> {
    let n = graph.len();
    if n == 0 {
        return Vec::new();
    }
    trace!(vertices = n, "tarjan scc");

    // Tarjan's algorithm state
    let mut index = vec![usize::MAX; n]; // usize::MAX means unvisited
    let mut lowlink = vec![0usize; n];
    let mut on_stack = vec![false; n];
    let mut stack: Vec<usize> = Vec::new();
    let mut next_index = 0usize;
    let mut components = Vec::new();

    for root in 0..n {
        if index[root] != usize::MAX {
            continue;
        }

        index[root] = next_index;
        lowlink[root] = next_index;
        next_index += 1;
        stack.push(root);
        on_stack[root] = true;

        // (vertex, next arc position)
        let mut work: Vec<(usize, usize)> = vec![(root, 0)];

        while let Some(frame) = work.last_mut() {
            let v = frame.0;
            let arcs = graph.arcs(v);

            if frame.1 < arcs.len() {
                let w = arcs[frame.1].to;
                frame.1 += 1;

                if index[w] == usize::MAX {
                    index[w] = next_index;
                    lowlink[w] = next_index;
                    next_index += 1;
                    stack.push(w);
                    on_stack[w] = true;
                    work.push((w, 0));
                } else if on_stack[w] {
                    lowlink[v] = lowlink[v].min(index[w]);
                }
                continue;
            }

            // All neighbors done: return to the caller frame
            work.pop();
            if let Some(&(parent, _)) = work.last() {
                lowlink[parent] = lowlink[parent].min(lowlink[v]);
            }

            if lowlink[v] == index[v] {
                let mut component = HashSet::new();
                while let Some(w) = stack.pop() {
                    on_stack[w] = false;
                    component.insert(graph.vertex_at(w).clone());
                    if w == v {
                        break;
                    }
                }
                components.push(component);
            }
        }
    }

    components
}
