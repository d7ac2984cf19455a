use crate::config::SolverConfig;
use crate::error::{check_terminals, FlowError, InputError};
use crate::minimum_cost_flow::graph::Graph;
use crate::residual_graph::ResidualGraph;
use crate::status::Status;
use log::{debug, trace, warn};
use num_traits::NumAssign;
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt::Debug;
use std::ops::Neg;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinCostFlow<Flow> {
    /// Units actually routed, at most the demand.
    pub flow: Flow,
    pub cost: Flow,
    pub flow_per_edge: Vec<Flow>,
    pub augmentations: usize,
    pub status: Status,
}

/// Successive shortest paths with node potentials.
///
/// Dijkstra runs on reduced costs `cost(u, v) + p(u) - p(v)`. Adding the
/// shortest distances to the potentials after each search keeps every reduced
/// cost of the residual network non-negative, including those of the reverse
/// arcs created along the augmented path.
pub struct SuccessiveShortestPath<Flow> {
    config: SolverConfig,
    potentials: Vec<Flow>,
    dist: Vec<Option<Flow>>,
    prev: Vec<Option<usize>>,
    visited: Vec<bool>,
    bh: BinaryHeap<(Reverse<Flow>, usize)>,
}

impl<Flow> Default for SuccessiveShortestPath<Flow>
where
    Flow: Ord,
{
    fn default() -> Self {
        Self { config: SolverConfig::default(), potentials: Vec::new(), dist: Vec::new(), prev: Vec::new(), visited: Vec::new(), bh: BinaryHeap::new() }
    }
}

impl<Flow> SuccessiveShortestPath<Flow>
where
    Flow: NumAssign + Neg<Output = Flow> + Ord + Copy + Debug,
{
    pub fn with_config(config: SolverConfig) -> Self {
        Self { config, ..Default::default() }
    }

    /// Solves over a fresh residual network of `graph` and writes the flow of
    /// every edge back into it.
    pub fn solve(&mut self, source: usize, sink: usize, demand: Flow, graph: &mut Graph<Flow>) -> Result<MinCostFlow<Flow>, FlowError> {
        let mut residual = graph.residual_graph()?;
        let result = self.minimize(&mut residual, source, sink, demand)?;
        graph.set_flows(&residual);
        Ok(result)
    }

    /// Routes up to `demand` units from `source` to `sink` at minimum cost.
    pub fn minimize(&mut self, graph: &mut ResidualGraph<Flow>, source: usize, sink: usize, demand: Flow) -> Result<MinCostFlow<Flow>, FlowError> {
        check_terminals(source, sink, graph.num_nodes())?;
        if demand < Flow::zero() {
            return Err(InputError::NegativeDemand.into());
        }

        let n = graph.num_nodes();
        self.initialize_potentials(graph)?;
        let mut budget = self.config.budget();

        let mut remaining = demand;
        let mut flow = Flow::zero();
        let mut cost = Flow::zero();
        let status = loop {
            if remaining == Flow::zero() {
                break Status::Optimal;
            }

            self.calculate_distance(graph, source);
            if self.dist[sink].is_none() {
                debug!("successive shortest path: sink unreachable with {:?} of {:?} routed", flow, demand);
                break Status::DemandUnreachable;
            }
            if budget.is_exhausted() {
                warn!("successive shortest path: budget exhausted with {:?} of {:?} routed", flow, demand);
                break Status::BudgetExhausted;
            }

            // calculate delta
            let mut delta = remaining;
            let mut v = sink;
            while let Some(arc_index) = self.prev[v] {
                delta = delta.min(graph.residual_capacity(arc_index));
                v = graph.tail(arc_index);
            }

            // update flow
            let mut path_cost = Flow::zero();
            let mut v = sink;
            while let Some(arc_index) = self.prev[v] {
                graph.push_flow_on_arc(arc_index, delta)?;
                path_cost += graph.arc(arc_index).cost;
                v = graph.tail(arc_index);
            }
            trace!("successive shortest path: augmented {:?} at unit cost {:?}", delta, path_cost);

            remaining -= delta;
            flow += delta;
            cost += delta * path_cost;
            budget.spend();

            // update potentials
            for u in 0..n {
                if let Some(d) = self.dist[u] {
                    self.potentials[u] += d;
                }
            }
        };

        debug!("successive shortest path: routed {:?} at cost {:?} in {} augmentations", flow, cost, budget.spent());
        Ok(MinCostFlow { flow, cost, flow_per_edge: graph.edge_flows(), augmentations: budget.spent(), status })
    }

    /// Potentials left by the last call to [`minimize`](Self::minimize).
    pub fn potentials(&self) -> &[Flow] {
        &self.potentials
    }

    #[inline]
    pub fn reduced_cost(&self, graph: &ResidualGraph<Flow>, u: usize, arc_index: usize) -> Flow {
        let arc = graph.arc(arc_index);
        arc.cost + self.potentials[u] - self.potentials[arc.to]
    }

    // Bellman-Ford from a virtual root joined to every node by a zero-cost arc.
    // A fresh network has no residual arc of negative cost and settles after
    // one pass; one that already carries flow gets distances that make every
    // reduced cost non-negative.
    fn initialize_potentials(&mut self, graph: &ResidualGraph<Flow>) -> Result<(), FlowError> {
        let n = graph.num_nodes();
        self.potentials.clear();
        self.potentials.resize(n, Flow::zero());

        for _ in 0..=n {
            let mut updated = false;
            for u in 0..n {
                for arc_index in graph.arcs(u) {
                    let arc = graph.arc(arc_index);
                    if arc.residual_capacity() > Flow::zero() && self.potentials[u] + arc.cost < self.potentials[arc.to] {
                        self.potentials[arc.to] = self.potentials[u] + arc.cost;
                        updated = true;
                    }
                }
            }
            if !updated {
                return Ok(());
            }
        }

        warn!("successive shortest path: residual network has a negative cost cycle");
        Err(InputError::NegativeCostCycle.into())
    }

    // Dijkstra on reduced costs from `source`
    fn calculate_distance(&mut self, graph: &ResidualGraph<Flow>, source: usize) {
        let n = graph.num_nodes();
        self.dist.clear();
        self.dist.resize(n, None);
        self.prev.clear();
        self.prev.resize(n, None);
        self.visited.clear();
        self.visited.resize(n, false);
        self.bh.clear();

        self.bh.push((Reverse(Flow::zero()), source));
        self.dist[source] = Some(Flow::zero());

        while let Some((Reverse(d), u)) = self.bh.pop() {
            if self.visited[u] {
                continue;
            }
            self.visited[u] = true;

            for arc_index in graph.arcs(u) {
                let arc = graph.arc(arc_index);
                if arc.residual_capacity() == Flow::zero() {
                    continue;
                }

                let reduced_cost = self.reduced_cost(graph, u, arc_index);
                debug_assert!(reduced_cost >= Flow::zero(), "negative reduced cost on {} -> {}", u, arc.to);
                let new_dist = d + reduced_cost;
                if self.dist[arc.to].map_or(true, |old| new_dist < old) {
                    self.dist[arc.to] = Some(new_dist);
                    self.prev[arc.to] = Some(arc_index);
                    self.bh.push((Reverse(new_dist), arc.to));
                }
            }
        }
    }
}
