use crate::bipartite_matching::graph::BipartiteGraph;
use crate::config::SolverConfig;
use crate::status::Status;
use log::{debug, warn};
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Matching {
    pub size: usize,
    pub pair_left: Vec<Option<usize>>,
    pub pair_right: Vec<Option<usize>>,
    pub status: Status,
}

impl Matching {
    /// Matched `(left, right)` pairs in left-vertex order.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.pair_left.iter().enumerate().filter_map(|(u, v)| v.map(|v| (u, v)))
    }
}

/// Hopcroft-Karp: each phase layers the graph by a BFS from every free left
/// vertex, then augments along a maximal set of vertex-disjoint shortest
/// alternating paths. O(E sqrt(V)).
#[derive(Default)]
pub struct HopcroftKarp {
    config: SolverConfig,
    pair_left: Vec<Option<usize>>,
    pair_right: Vec<Option<usize>>,
    // None means infinity
    dist: Vec<Option<usize>>,
    // layer of the left vertices adjacent to the nearest free right vertex
    free_layer: Option<usize>,
    que: VecDeque<usize>,
    // (left vertex, next adjacency position)
    stack: Vec<(usize, usize)>,
}

impl HopcroftKarp {
    pub fn with_config(config: SolverConfig) -> Self {
        Self { config, ..Default::default() }
    }

    pub fn solve(&mut self, graph: &BipartiteGraph) -> Matching {
        self.pair_left.clear();
        self.pair_left.resize(graph.num_left(), None);
        self.pair_right.clear();
        self.pair_right.resize(graph.num_right(), None);
        self.dist.clear();
        self.dist.resize(graph.num_left(), None);
        let mut budget = self.config.budget();

        let mut size = 0;
        let mut phase = 0;
        while self.bfs(graph) {
            phase += 1;
            let before = size;
            for u in 0..graph.num_left() {
                if self.pair_left[u].is_some() {
                    continue;
                }
                if budget.is_exhausted() {
                    let status = if self.bfs(graph) { Status::BudgetExhausted } else { Status::Optimal };
                    if status == Status::BudgetExhausted {
                        warn!("hopcroft-karp: budget exhausted with matching of size {}", size);
                    }
                    return self.matching(size, status);
                }
                if self.dfs(graph, u) {
                    size += 1;
                    budget.spend();
                }
            }
            debug!("hopcroft-karp: phase {} matched {} more", phase, size - before);
        }

        debug!("hopcroft-karp: maximum matching of size {} after {} phases", size, phase);
        self.matching(size, Status::Optimal)
    }

    // returns whether some free right vertex is reachable by an alternating path
    fn bfs(&mut self, graph: &BipartiteGraph) -> bool {
        self.que.clear();
        self.free_layer = None;
        for u in 0..graph.num_left() {
            if self.pair_left[u].is_none() {
                self.dist[u] = Some(0);
                self.que.push_back(u);
            } else {
                self.dist[u] = None;
            }
        }

        while let Some(u) = self.que.pop_front() {
            // paths longer than the shortest one are left for later phases
            if self.free_layer.is_some_and(|layer| self.dist[u].is_some_and(|d| d >= layer)) {
                continue;
            }
            let next = self.dist[u].map(|d| d + 1);
            for &v in graph.neighbors(u) {
                match self.pair_right[v] {
                    None => {
                        if self.free_layer.is_none() {
                            self.free_layer = self.dist[u];
                        }
                    }
                    Some(w) => {
                        if self.dist[w].is_none() {
                            self.dist[w] = next;
                            self.que.push_back(w);
                        }
                    }
                }
            }
        }

        self.free_layer.is_some()
    }

    fn dfs(&mut self, graph: &BipartiteGraph, root: usize) -> bool {
        self.stack.clear();
        self.stack.push((root, 0));

        while let Some(&(u, cursor)) = self.stack.last() {
            let neighbors = graph.neighbors(u);
            if cursor == neighbors.len() {
                // never retried in this phase
                self.dist[u] = None;
                self.stack.pop();
                continue;
            }

            let top = self.stack.len() - 1;
            self.stack[top].1 += 1;
            let v = neighbors[cursor];
            let at_free_layer = self.dist[u].is_some() && self.dist[u] == self.free_layer;
            match self.pair_right[v] {
                None if at_free_layer => {
                    self.flip(graph);
                    return true;
                }
                Some(w) if !at_free_layer => {
                    if self.dist[w].is_some() && self.dist[w] == self.dist[u].map(|d| d + 1) {
                        self.stack.push((w, 0));
                    }
                }
                _ => {}
            }
        }

        false
    }

    // every frame's last tried neighbor becomes its partner
    fn flip(&mut self, graph: &BipartiteGraph) {
        for &(u, cursor) in self.stack.iter() {
            let v = graph.neighbors(u)[cursor - 1];
            self.pair_left[u] = Some(v);
            self.pair_right[v] = Some(u);
        }
    }

    fn matching(&self, size: usize, status: Status) -> Matching {
        Matching { size, pair_left: self.pair_left.clone(), pair_right: self.pair_right.clone(), status }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alternating_path_reassigns_partners() {
        // greedy would match 0-0 and leave 1 unmatched
        let graph = BipartiteGraph::from_adjacency(2, 2, &[vec![0, 1], vec![0]]).unwrap();
        let matching = HopcroftKarp::default().solve(&graph);
        assert_eq!(matching.size, 2);
        assert_eq!(matching.pair_left, vec![Some(1), Some(0)]);
        assert_eq!(matching.pair_right, vec![Some(1), Some(0)]);
        assert_eq!(matching.pairs().collect::<Vec<_>>(), vec![(0, 1), (1, 0)]);
        assert_eq!(matching.status, Status::Optimal);
    }

    #[test]
    fn isolated_vertices_stay_unmatched() {
        let graph = BipartiteGraph::from_adjacency(3, 1, &[vec![0], vec![], vec![0]]).unwrap();
        let matching = HopcroftKarp::default().solve(&graph);
        assert_eq!(matching.size, 1);
        assert_eq!(matching.pair_left, vec![Some(0), None, None]);
    }

    #[test]
    fn long_alternating_chain() {
        // u_i is adjacent to v_i and v_{i+1}; a size n matching needs no recursion
        let n = 100_000;
        let mut graph = BipartiteGraph::new(n, n);
        for u in 0..n {
            if u + 1 < n {
                graph.add_edge(u, u + 1).unwrap();
            }
            graph.add_edge(u, u).unwrap();
        }
        let matching = HopcroftKarp::default().solve(&graph);
        assert_eq!(matching.size, n);
    }

    #[test]
    fn phase_only_augments_along_shortest_paths() {
        // 1 is matched to 0; from 0 the free vertex 1 is one edge away while
        // 0 -> 0 -> 1 -> 2 is an augmenting path three edges long
        let graph = BipartiteGraph::from_adjacency(2, 3, &[vec![0, 1], vec![0, 2]]).unwrap();
        let mut solver = HopcroftKarp::default();
        solver.pair_left = vec![None, Some(0)];
        solver.pair_right = vec![Some(1), None, None];
        solver.dist = vec![None; 2];

        assert!(solver.bfs(&graph));
        assert_eq!(solver.free_layer, Some(0));
        assert!(solver.dfs(&graph, 0));
        assert_eq!(solver.pair_left, vec![Some(1), Some(0)]);
        assert_eq!(solver.pair_right, vec![Some(1), Some(0), None]);
    }
}
