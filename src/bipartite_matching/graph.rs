use crate::error::{check_node, FlowError};

/// Bipartite graph with left vertices `0..num_left` and right vertices
/// `0..num_right`. Adjacency lists keep insertion order.
#[derive(Default, Debug, Clone)]
pub struct BipartiteGraph {
    num_left: usize,
    num_right: usize,
    num_edges: usize,
    adjacency: Vec<Vec<usize>>,
}

impl BipartiteGraph {
    pub fn new(num_left: usize, num_right: usize) -> Self {
        Self { num_left, num_right, num_edges: 0, adjacency: vec![Vec::new(); num_left] }
    }

    /// Builds from one adjacency list per left vertex.
    pub fn from_adjacency(num_left: usize, num_right: usize, adjacency: &[Vec<usize>]) -> Result<Self, FlowError> {
        let mut graph = Self::new(num_left, num_right);
        for (u, neighbors) in adjacency.iter().enumerate() {
            for &v in neighbors {
                graph.add_edge(u, v)?;
            }
        }
        Ok(graph)
    }

    #[inline]
    pub fn num_left(&self) -> usize {
        self.num_left
    }

    #[inline]
    pub fn num_right(&self) -> usize {
        self.num_right
    }

    #[inline]
    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    // return edge index
    pub fn add_edge(&mut self, u: usize, v: usize) -> Result<usize, FlowError> {
        check_node(u, self.num_left)?;
        check_node(v, self.num_right)?;

        self.adjacency[u].push(v);
        self.num_edges += 1;
        Ok(self.num_edges - 1)
    }

    #[inline]
    pub fn neighbors(&self, u: usize) -> &[usize] {
        &self.adjacency[u]
    }

    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        self.adjacency.get(u).is_some_and(|neighbors| neighbors.contains(&v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InputError;

    #[test]
    fn adjacency_is_validated_per_side() {
        let graph = BipartiteGraph::from_adjacency(2, 3, &[vec![2, 0], vec![1]]).unwrap();
        assert_eq!(graph.num_edges(), 3);
        assert_eq!(graph.neighbors(0), &[2, 0]);
        assert!(graph.has_edge(1, 1));
        assert!(!graph.has_edge(1, 2));
        assert!(!graph.has_edge(5, 0));

        assert_eq!(
            BipartiteGraph::from_adjacency(2, 3, &[vec![3]]).unwrap_err(),
            FlowError::InvalidInput(InputError::NodeOutOfRange { node: 3, num_nodes: 3 })
        );
        assert_eq!(
            BipartiteGraph::new(2, 3).add_edge(2, 0).unwrap_err(),
            FlowError::InvalidInput(InputError::NodeOutOfRange { node: 2, num_nodes: 2 })
        );
    }
}
