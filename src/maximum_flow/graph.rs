use crate::error::{check_node, FlowError, InputError};
use crate::residual_graph::ResidualGraph;
use num_traits::NumAssign;

#[derive(PartialEq, Debug, Clone)]
pub struct Edge<Flow> {
    pub from: usize,
    pub to: usize,
    pub flow: Flow,
    pub upper: Flow,
}

/// Edge-list builder for maximum flow problems.
///
/// Solvers never mutate the capacities stored here, only the `flow` of each
/// edge, so solving the same graph again yields the same value.
#[derive(Default, Clone, Debug)]
pub struct Graph<Flow> {
    num_nodes: usize,
    pub(crate) edges: Vec<Edge<Flow>>,
}

impl<Flow> Graph<Flow>
where
    Flow: NumAssign + Ord + Copy,
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
    pub fn add_directed_edge(&mut self, from: usize, to: usize, upper: Flow) -> Result<usize, FlowError> {
        check_node(from, self.num_nodes)?;
        check_node(to, self.num_nodes)?;
        if upper < Flow::zero() {
            return Err(InputError::NegativeCapacity { edge: self.edges.len() }.into());
        }

        self.edges.push(Edge { from, to, flow: Flow::zero(), upper });
        Ok(self.edges.len() - 1)
    }

    pub fn get_edge(&self, edge_id: usize) -> Option<Edge<Flow>> {
        self.edges.get(edge_id).cloned()
    }

    /// Net flow leaving `source`.
    pub fn maximum_flow(&self, source: usize) -> Flow {
        let out = self.edges.iter().filter(|e| e.from == source).fold(Flow::zero(), |sum, e| sum + e.flow);
        let into = self.edges.iter().filter(|e| e.to == source).fold(Flow::zero(), |sum, e| sum + e.flow);
        out - into
    }

    /// Nodes on the source side of the cut left by the current flow.
    pub fn minimum_cut(&self, source: usize) -> Result<Vec<usize>, FlowError> {
        check_node(source, self.num_nodes)?;
        let mut residual = self.residual_graph()?;
        for (edge_index, edge) in self.edges.iter().enumerate() {
            if let Some(arc_index) = residual.edge_arc(edge_index) {
                residual.push_flow_on_arc(arc_index, edge.flow)?;
            }
        }

        let reached = residual.reachable_from(source)?;
        Ok((0..self.num_nodes).filter(|&u| reached[u]).collect())
    }

    /// Fresh residual network over the original capacities.
    pub fn residual_graph(&self) -> Result<ResidualGraph<Flow>, FlowError> {
        let edges: Vec<(usize, usize, Flow)> = self.edges.iter().map(|e| (e.from, e.to, e.upper)).collect();
        ResidualGraph::new(self.num_nodes, &edges)
    }

    pub(crate) fn set_flows(&mut self, residual: &ResidualGraph<Flow>) {
        for (edge, flow) in self.edges.iter_mut().zip(residual.edge_flows()) {
            edge.flow = flow;
        }
    }
}
