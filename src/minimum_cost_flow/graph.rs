use crate::error::{check_node, FlowError, InputError};
use crate::residual_graph::ResidualGraph;
use num_traits::NumAssign;
use std::ops::Neg;

#[derive(PartialEq, Debug, Clone)]
pub struct Edge<Flow> {
    pub from: usize,
    pub to: usize,
    pub flow: Flow,
    pub upper: Flow,
    pub cost: Flow,
}

/// Edge-list builder for minimum cost flow problems.
#[derive(Default, Debug, Clone)]
pub struct Graph<Flow> {
    num_nodes: usize,
    pub(crate) edges: Vec<Edge<Flow>>,
}

impl<Flow> Graph<Flow>
where
    Flow: NumAssign + Neg<Output = Flow> + Ord + Copy,
{
    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    #[inline]
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn add_node(&mut self) -> usize {
        self.num_nodes += 1;
        self.num_nodes - 1
    }

    pub fn add_nodes(&mut self, num_nodes: usize) -> Vec<usize> {
        self.num_nodes += num_nodes;
        ((self.num_nodes - num_nodes)..self.num_nodes).collect()
    }

    // return edge index
    pub fn add_directed_edge(&mut self, from: usize, to: usize, upper: Flow, cost: Flow) -> Result<usize, FlowError> {
        check_node(from, self.num_nodes)?;
        check_node(to, self.num_nodes)?;
        let edge = self.edges.len();
        if upper < Flow::zero() {
            return Err(InputError::NegativeCapacity { edge }.into());
        }
        if cost < Flow::zero() {
            return Err(InputError::NegativeCost { edge }.into());
        }

        self.edges.push(Edge { from, to, flow: Flow::zero(), upper, cost });
        Ok(edge)
    }

    pub fn get_edge(&self, edge_id: usize) -> Option<Edge<Flow>> {
        self.edges.get(edge_id).cloned()
    }

    pub fn minimum_cost(&self) -> Flow {
        self.edges.iter().fold(Flow::zero(), |cost, edge| cost + edge.cost * edge.flow)
    }

    /// Fresh residual network over the original capacities and costs.
    pub fn residual_graph(&self) -> Result<ResidualGraph<Flow>, FlowError> {
        let edges: Vec<(usize, usize, Flow, Flow)> = self.edges.iter().map(|e| (e.from, e.to, e.upper, e.cost)).collect();
        ResidualGraph::with_costs(self.num_nodes, &edges)
    }

    pub(crate) fn set_flows(&mut self, residual: &ResidualGraph<Flow>) {
        for (edge, flow) in self.edges.iter_mut().zip(residual.edge_flows()) {
            edge.flow = flow;
        }
    }
}
