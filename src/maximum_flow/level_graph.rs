use crate::residual_graph::ResidualGraph;
use num_traits::NumAssign;
use std::collections::VecDeque;

/// BFS distances from the source in the residual network.
///
/// `None` marks a node that is unreached, or that was removed from the level
/// graph because no path to the sink goes through it this phase.
#[derive(Default)]
pub struct LevelGraph {
    levels: Vec<Option<usize>>,
    que: VecDeque<usize>,
}

impl LevelGraph {
    // O(n + m)
    // returns whether the sink received a level
    pub fn build<Flow>(&mut self, graph: &ResidualGraph<Flow>, source: usize, sink: usize) -> bool
    where
        Flow: NumAssign + Ord + Copy,
    {
        self.levels.clear();
        self.levels.resize(graph.num_nodes(), None);
        self.que.clear();

        self.levels[source] = Some(0);
        self.que.push_back(source);
        while let Some(u) = self.que.pop_front() {
            let next = self.levels[u].map(|level| level + 1);
            for arc_index in graph.arcs(u) {
                let arc = graph.arc(arc_index);
                if self.levels[arc.to].is_none() && arc.residual_capacity() > Flow::zero() {
                    self.levels[arc.to] = next;
                    self.que.push_back(arc.to);
                }
            }
        }

        self.levels[sink].is_some()
    }

    #[inline]
    pub fn level(&self, u: usize) -> Option<usize> {
        self.levels[u]
    }

    /// An arc belongs to the level graph when it has residual capacity and
    /// advances the level by exactly one.
    #[inline]
    pub fn is_admissible<Flow>(&self, graph: &ResidualGraph<Flow>, u: usize, arc_index: usize) -> bool
    where
        Flow: NumAssign + Ord + Copy,
    {
        let arc = graph.arc(arc_index);
        match self.levels[u] {
            Some(level) => arc.residual_capacity() > Flow::zero() && self.levels[arc.to] == Some(level + 1),
            None => false,
        }
    }

    /// Drops `u` from the level graph for the rest of the phase.
    #[inline]
    pub fn remove(&mut self, u: usize) {
        self.levels[u] = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_are_bfs_distances() {
        let graph = ResidualGraph::new(5, &[(0, 1, 1), (0, 2, 1), (1, 3, 1), (2, 3, 1), (3, 4, 1), (4, 0, 1)]).unwrap();
        let mut levels = LevelGraph::default();
        assert!(levels.build(&graph, 0, 4));
        assert_eq!((0..5).map(|u| levels.level(u)).collect::<Vec<_>>(), vec![Some(0), Some(1), Some(1), Some(2), Some(3)]);

        // 4 -> 0 goes backwards, 1 -> 3 advances by one
        assert!(!levels.is_admissible(&graph, 4, graph.edge_arc(5).unwrap()));
        assert!(levels.is_admissible(&graph, 1, graph.edge_arc(2).unwrap()));

        levels.remove(3);
        assert!(!levels.is_admissible(&graph, 1, graph.edge_arc(2).unwrap()));
    }

    #[test]
    fn unreachable_sink_has_no_level() {
        let graph = ResidualGraph::new(3, &[(0, 1, 2), (2, 1, 2)]).unwrap();
        let mut levels = LevelGraph::default();
        assert!(!levels.build(&graph, 0, 2));
        assert_eq!(levels.level(1), Some(1));
        assert_eq!(levels.level(2), None);
    }
}
