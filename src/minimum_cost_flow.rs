//! Minimum cost flow of a fixed demand from one source to one sink.

pub mod graph;
pub mod successive_shortest_path;

pub use successive_shortest_path::{MinCostFlow, SuccessiveShortestPath};

use crate::error::{check_terminals, FlowError, InputError};
use crate::residual_graph::ResidualGraph;
use num_traits::NumAssign;
use std::fmt::Debug;
use std::ops::Neg;

/// Routes up to `demand` units from `source` to `sink` at minimum cost over
/// the `(from, to, capacity, cost)` edges. Routing less than `demand` is a
/// valid outcome, reported by [`Status::DemandUnreachable`](crate::Status::DemandUnreachable).
pub fn successive_shortest_path<Flow>(
    num_nodes: usize,
    edges: &[(usize, usize, Flow, Flow)],
    source: usize,
    sink: usize,
    demand: Flow,
) -> Result<(MinCostFlow<Flow>, ResidualGraph<Flow>), FlowError>
where
    Flow: NumAssign + Neg<Output = Flow> + Ord + Copy + Debug,
{
    check_terminals(source, sink, num_nodes)?;
    if demand < Flow::zero() {
        return Err(InputError::NegativeDemand.into());
    }

    let mut residual = ResidualGraph::with_costs(num_nodes, edges)?;
    let result = SuccessiveShortestPath::default().minimize(&mut residual, source, sink, demand)?;
    Ok((result, residual))
}
