use crate::error::FlowError;
use crate::residual_graph::ResidualGraph;
use num_traits::NumAssign;
use std::collections::VecDeque;

/// Breadth-first search for a shortest augmenting path.
///
/// `prev[v]` holds the arc the search entered `v` through, so the path is
/// recovered by walking arc tails back from the sink.
#[derive(Default)]
pub struct AugmentingPathFinder {
    prev: Vec<Option<usize>>,
    visited: Vec<bool>,
    que: VecDeque<usize>,
}

impl AugmentingPathFinder {
    /// Searches from `source` over arcs with positive residual capacity, and
    /// with at least `threshold` of it when one is given. Returns whether the
    /// sink was reached.
    pub fn find<Flow>(&mut self, graph: &ResidualGraph<Flow>, source: usize, sink: usize, threshold: Option<Flow>) -> bool
    where
        Flow: NumAssign + Ord + Copy,
    {
        let n = graph.num_nodes();
        self.prev.clear();
        self.prev.resize(n, None);
        self.visited.clear();
        self.visited.resize(n, false);
        self.que.clear();

        self.que.push_back(source);
        self.visited[source] = true;
        while let Some(u) = self.que.pop_front() {
            for arc_index in graph.arcs(u) {
                let arc = graph.arc(arc_index);
                let residual_capacity = arc.residual_capacity();
                if self.visited[arc.to] || residual_capacity == Flow::zero() || threshold.is_some_and(|delta| residual_capacity < delta) {
                    continue;
                }

                self.visited[arc.to] = true;
                self.prev[arc.to] = Some(arc_index);
                if arc.to == sink {
                    return true;
                }
                self.que.push_back(arc.to);
            }
        }

        false
    }

    /// Whether the last search reached `u`. The search stops at the sink, so
    /// this is only the full reachable set when the sink was not found.
    pub fn is_reached(&self, u: usize) -> bool {
        self.visited.get(u).copied().unwrap_or(false)
    }

    /// Arcs of the last path found, from the sink back to the source.
    pub fn path<'a, Flow>(&'a self, graph: &'a ResidualGraph<Flow>, sink: usize) -> impl Iterator<Item = usize> + 'a
    where
        Flow: NumAssign + Ord + Copy,
    {
        std::iter::successors(self.prev.get(sink).copied().flatten(), move |&arc_index| self.prev[graph.tail(arc_index)])
    }

    /// Smallest residual capacity along the last path found.
    pub fn bottleneck<Flow>(&self, graph: &ResidualGraph<Flow>, sink: usize) -> Option<Flow>
    where
        Flow: NumAssign + Ord + Copy,
    {
        self.path(graph, sink).map(|arc_index| graph.residual_capacity(arc_index)).min()
    }

    /// Pushes the bottleneck of the last path found, capped by `limit`, and
    /// returns the amount pushed.
    pub fn augment<Flow>(&self, graph: &mut ResidualGraph<Flow>, sink: usize, limit: Option<Flow>) -> Result<Flow, FlowError>
    where
        Flow: NumAssign + Ord + Copy,
    {
        let delta = match (self.bottleneck(graph, sink), limit) {
            (None, _) => return Ok(Flow::zero()),
            (Some(bottleneck), None) => bottleneck,
            (Some(bottleneck), Some(limit)) => bottleneck.min(limit),
        };

        let mut v = sink;
        while let Some(arc_index) = self.prev[v] {
            graph.push_flow_on_arc(arc_index, delta)?;
            v = graph.tail(arc_index);
        }
        Ok(delta)
    }
}
