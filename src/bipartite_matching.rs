//! Maximum cardinality matching in bipartite graphs.

pub mod graph;
pub mod hopcroft_karp;

pub use graph::BipartiteGraph;
pub use hopcroft_karp::{HopcroftKarp, Matching};

use crate::error::FlowError;

/// Maximum matching of the bipartite graph with `num_left` left vertices,
/// `num_right` right vertices and the given `(left, right)` edges.
pub fn hopcroft_karp(num_left: usize, num_right: usize, edges: &[(usize, usize)]) -> Result<Matching, FlowError> {
    let mut graph = BipartiteGraph::new(num_left, num_right);
    for &(u, v) in edges {
        graph.add_edge(u, v)?;
    }
    Ok(HopcroftKarp::default().solve(&graph))
}
