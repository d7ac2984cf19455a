//! Maximum flow by augmenting paths.
//!
//! [`FordFulkerson`] augments along BFS shortest paths, [`Dinic`] saturates a
//! blocking flow of the level graph per phase and [`CapacityScaling`] only
//! considers arcs with a large residual capacity before refining. All three
//! implement [`MaximumFlowSolver`] and return the same value on the same graph.

pub mod augmenting_path;
pub mod capacity_scaling;
pub mod dinic;
pub mod ford_fulkerson;
pub mod graph;
pub mod level_graph;

pub use capacity_scaling::CapacityScaling;
pub use dinic::Dinic;
pub use ford_fulkerson::FordFulkerson;

use crate::error::{check_terminals, FlowError};
use crate::residual_graph::ResidualGraph;
use crate::status::Status;
use graph::Graph;
use num_traits::NumAssign;
use std::fmt::Debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxFlow<Flow> {
    pub value: Flow,
    pub augmentations: usize,
    pub status: Status,
}

pub trait MaximumFlowSolver<Flow>
where
    Flow: NumAssign + Ord + Copy + Debug,
{
    /// Pushes as much flow as possible from `source` to `sink`, leaving the
    /// final residual capacities in `residual`.
    fn maximize(&mut self, residual: &mut ResidualGraph<Flow>, source: usize, sink: usize) -> Result<MaxFlow<Flow>, FlowError>;

    /// Solves over a fresh residual network of `graph` and writes the flow of
    /// every edge back into it.
    fn solve(&mut self, source: usize, sink: usize, graph: &mut Graph<Flow>) -> Result<Status, FlowError> {
        let mut residual = graph.residual_graph()?;
        let max_flow = self.maximize(&mut residual, source, sink)?;
        graph.set_flows(&residual);
        Ok(max_flow.status)
    }
}

pub fn ford_fulkerson<Flow>(num_nodes: usize, edges: &[(usize, usize, Flow)], source: usize, sink: usize) -> Result<(MaxFlow<Flow>, ResidualGraph<Flow>), FlowError>
where
    Flow: NumAssign + Ord + Copy + Debug,
{
    run(FordFulkerson::default(), num_nodes, edges, source, sink)
}

pub fn dinic<Flow>(num_nodes: usize, edges: &[(usize, usize, Flow)], source: usize, sink: usize) -> Result<(MaxFlow<Flow>, ResidualGraph<Flow>), FlowError>
where
    Flow: NumAssign + Ord + Copy + Debug,
{
    run(Dinic::default(), num_nodes, edges, source, sink)
}

pub fn capacity_scaling<Flow>(num_nodes: usize, edges: &[(usize, usize, Flow)], source: usize, sink: usize) -> Result<(MaxFlow<Flow>, ResidualGraph<Flow>), FlowError>
where
    Flow: NumAssign + Ord + Copy + Debug,
{
    run(CapacityScaling::default(), num_nodes, edges, source, sink)
}

fn run<Flow, S>(mut solver: S, num_nodes: usize, edges: &[(usize, usize, Flow)], source: usize, sink: usize) -> Result<(MaxFlow<Flow>, ResidualGraph<Flow>), FlowError>
where
    Flow: NumAssign + Ord + Copy + Debug,
    S: MaximumFlowSolver<Flow>,
{
    check_terminals(source, sink, num_nodes)?;
    let mut residual = ResidualGraph::new(num_nodes, edges)?;
    let max_flow = solver.maximize(&mut residual, source, sink)?;
    Ok((max_flow, residual))
}
