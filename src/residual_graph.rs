use crate::error::{check_node, FlowError, InputError};
use num_traits::NumAssign;
use std::collections::VecDeque;
use std::ops::{Neg, Range};

/// One direction of an edge in the residual network.
///
/// A forward arc starts with `flow == 0`; its paired reverse arc starts with
/// `flow == upper`, so the residual capacities of the pair always sum to the
/// original capacity.
#[derive(Default, PartialEq, Debug, Clone)]
pub struct InsideEdge<Flow> {
    pub to: usize,
    pub flow: Flow,
    pub upper: Flow,
    pub cost: Flow,
    pub rev: usize,
}

impl<Flow> InsideEdge<Flow>
where
    Flow: NumAssign + Copy,
{
    #[inline]
    pub fn residual_capacity(&self) -> Flow {
        self.upper - self.flow
    }
}

/// Residual network stored in compressed sparse row form.
///
/// The arcs leaving `u` occupy `start[u]..start[u + 1]` and appear in the
/// order their edges were inserted, which makes every search over the graph
/// deterministic.
#[derive(Debug, Clone)]
pub struct ResidualGraph<Flow> {
    num_nodes: usize,
    num_edges: usize,
    edge_index_to_arc_index: Vec<usize>,

    start: Vec<usize>,
    inside_edge_list: Vec<InsideEdge<Flow>>,
}

impl<Flow> ResidualGraph<Flow>
where
    Flow: NumAssign + Ord + Copy,
{
    /// Capacity-only network from `(from, to, capacity)` triples.
    pub fn new(num_nodes: usize, edges: &[(usize, usize, Flow)]) -> Result<Self, FlowError> {
        Self::build(num_nodes, edges.iter().map(|&(u, v, upper)| (u, v, upper, Flow::zero())).collect(), |_| Flow::zero())
    }

    /// Every non-zero entry `capacity[u][v]` becomes an edge, in row-major order.
    pub fn from_capacity_matrix(capacity: &[Vec<Flow>]) -> Result<Self, FlowError> {
        let n = capacity.len();
        check_square(capacity, n)?;

        let edges = capacity
            .iter()
            .enumerate()
            .flat_map(|(u, row)| row.iter().enumerate().filter(|&(_, &c)| c != Flow::zero()).map(move |(v, &c)| (u, v, c, Flow::zero())))
            .collect();
        Self::build(n, edges, |_| Flow::zero())
    }

    // `reverse_cost` maps the cost of an edge to the cost of its reverse arc
    fn build(num_nodes: usize, edges: Vec<(usize, usize, Flow, Flow)>, reverse_cost: impl Fn(Flow) -> Flow) -> Result<Self, FlowError> {
        // validate everything before allocating arcs
        for (edge, &(u, v, upper, cost)) in edges.iter().enumerate() {
            check_node(u, num_nodes)?;
            check_node(v, num_nodes)?;
            if upper < Flow::zero() {
                return Err(InputError::NegativeCapacity { edge }.into());
            }
            if cost < Flow::zero() {
                return Err(InputError::NegativeCost { edge }.into());
            }
        }

        let num_edges = edges.len();
        let mut start = vec![0; num_nodes + 1];
        let mut degree = vec![0; num_nodes];
        for &(u, v, _, _) in edges.iter() {
            degree[u] += 1;
            degree[v] += 1;
        }
        for i in 1..=num_nodes {
            start[i] = start[i - 1] + degree[i - 1];
        }

        let empty = InsideEdge { to: 0, flow: Flow::zero(), upper: Flow::zero(), cost: Flow::zero(), rev: 0 };
        let mut arcs = vec![empty; 2 * num_edges];
        let mut edge_index_to_arc_index = vec![usize::MAX; num_edges];
        let mut counter = vec![0; num_nodes];
        for (edge_index, &(u, v, upper, cost)) in edges.iter().enumerate() {
            let arc_u = start[u] + counter[u];
            counter[u] += 1;
            let arc_v = start[v] + counter[v];
            counter[v] += 1;
            edge_index_to_arc_index[edge_index] = arc_u;

            // u -> v
            arcs[arc_u] = InsideEdge { to: v, flow: Flow::zero(), upper, cost, rev: arc_v };
            // v -> u
            arcs[arc_v] = InsideEdge { to: u, flow: upper, upper, cost: reverse_cost(cost), rev: arc_u };
        }

        Ok(Self { num_nodes, num_edges, edge_index_to_arc_index, start, inside_edge_list: arcs })
    }

    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    #[inline]
    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    /// Indices of the arcs leaving `u`.
    ///
    /// # Panics
    ///
    /// Panics if `u >= num_nodes()`.
    #[inline]
    pub fn arcs(&self, u: usize) -> Range<usize> {
        self.start[u]..self.start[u + 1]
    }

    #[inline]
    pub fn arc(&self, arc_index: usize) -> &InsideEdge<Flow> {
        &self.inside_edge_list[arc_index]
    }

    #[inline]
    pub fn tail(&self, arc_index: usize) -> usize {
        self.inside_edge_list[self.inside_edge_list[arc_index].rev].to
    }

    #[inline]
    pub fn residual_capacity(&self, arc_index: usize) -> Flow {
        self.inside_edge_list[arc_index].residual_capacity()
    }

    /// Forward arc of the `edge_index`-th inserted edge.
    pub fn edge_arc(&self, edge_index: usize) -> Option<usize> {
        self.edge_index_to_arc_index.get(edge_index).copied()
    }

    /// Flow currently routed over the `edge_index`-th inserted edge.
    pub fn edge_flow(&self, edge_index: usize) -> Option<Flow> {
        self.edge_arc(edge_index).map(|i| self.inside_edge_list[i].flow)
    }

    pub fn edge_flows(&self) -> Vec<Flow> {
        self.edge_index_to_arc_index.iter().map(|&i| self.inside_edge_list[i].flow).collect()
    }

    /// Dense `flow[u][v]`, summing parallel edges.
    pub fn flow_matrix(&self) -> Vec<Vec<Flow>> {
        let mut flow = vec![vec![Flow::zero(); self.num_nodes]; self.num_nodes];
        for &i in self.edge_index_to_arc_index.iter() {
            flow[self.tail(i)][self.inside_edge_list[i].to] += self.inside_edge_list[i].flow;
        }
        flow
    }

    /// Largest original edge capacity, zero for an edgeless graph.
    pub fn max_capacity(&self) -> Flow {
        self.edge_index_to_arc_index.iter().map(|&i| self.inside_edge_list[i].upper).max().unwrap_or_else(Flow::zero)
    }

    /// Sum of `flow * cost` over all edges.
    pub fn flow_cost(&self) -> Flow {
        self.edge_index_to_arc_index.iter().fold(Flow::zero(), |sum, &i| sum + self.inside_edge_list[i].flow * self.inside_edge_list[i].cost)
    }

    /// Total residual capacity over all arcs `u -> v`.
    pub fn capacity(&self, u: usize, v: usize) -> Result<Flow, FlowError> {
        check_node(u, self.num_nodes)?;
        check_node(v, self.num_nodes)?;
        Ok(self.inside_edge_list[self.arcs(u)]
            .iter()
            .filter(|arc| arc.to == v)
            .fold(Flow::zero(), |sum, arc| sum + arc.residual_capacity()))
    }

    /// Distinct heads of the arcs leaving `u` that still have residual
    /// capacity, in insertion order.
    pub fn neighbors(&self, u: usize) -> Result<Vec<usize>, FlowError> {
        check_node(u, self.num_nodes)?;
        let mut neighbors = Vec::new();
        for arc in self.inside_edge_list[self.arcs(u)].iter() {
            if arc.residual_capacity() > Flow::zero() && !neighbors.contains(&arc.to) {
                neighbors.push(arc.to);
            }
        }
        Ok(neighbors)
    }

    /// Pushes `amount` along a single arc and credits its pair.
    #[inline]
    pub fn push_flow_on_arc(&mut self, arc_index: usize, amount: Flow) -> Result<(), FlowError> {
        let arc = &self.inside_edge_list[arc_index];
        if amount < Flow::zero() || amount > arc.residual_capacity() {
            return Err(FlowError::InvalidAugmentation { from: self.tail(arc_index), to: arc.to });
        }

        let rev = arc.rev;
        self.inside_edge_list[arc_index].flow += amount;
        self.inside_edge_list[rev].flow -= amount;
        Ok(())
    }

    /// Pushes `amount` from `u` to `v`, filling parallel arcs in insertion
    /// order. Nothing changes if `amount` exceeds `capacity(u, v)`.
    pub fn push_flow(&mut self, u: usize, v: usize, amount: Flow) -> Result<(), FlowError> {
        if amount < Flow::zero() || amount > self.capacity(u, v)? {
            return Err(FlowError::InvalidAugmentation { from: u, to: v });
        }

        let mut remaining = amount;
        for arc_index in self.arcs(u) {
            if remaining == Flow::zero() {
                break;
            }
            if self.inside_edge_list[arc_index].to != v {
                continue;
            }
            let delta = remaining.min(self.inside_edge_list[arc_index].residual_capacity());
            self.push_flow_on_arc(arc_index, delta)?;
            remaining -= delta;
        }
        Ok(())
    }

    /// Flow entering `u` over original edges.
    pub fn inflow(&self, u: usize) -> Flow {
        self.edge_index_to_arc_index
            .iter()
            .filter(|&&i| self.inside_edge_list[i].to == u)
            .fold(Flow::zero(), |sum, &i| sum + self.inside_edge_list[i].flow)
    }

    /// Flow leaving `u` over original edges.
    pub fn outflow(&self, u: usize) -> Flow {
        self.edge_index_to_arc_index
            .iter()
            .filter(|&&i| self.tail(i) == u)
            .fold(Flow::zero(), |sum, &i| sum + self.inside_edge_list[i].flow)
    }

    /// Nodes reachable from `source` over arcs with residual capacity.
    pub fn reachable_from(&self, source: usize) -> Result<Vec<bool>, FlowError> {
        check_node(source, self.num_nodes)?;
        let mut visited = vec![false; self.num_nodes];
        let mut que = VecDeque::from([source]);
        visited[source] = true;

        while let Some(u) = que.pop_front() {
            for arc in self.inside_edge_list[self.arcs(u)].iter() {
                if !visited[arc.to] && arc.residual_capacity() > Flow::zero() {
                    visited[arc.to] = true;
                    que.push_back(arc.to);
                }
            }
        }
        Ok(visited)
    }

    /// Edges crossing from the residual-reachable side of `source` to the rest.
    /// After a maximum flow this is a minimum cut.
    pub fn minimum_cut(&self, source: usize) -> Result<Vec<usize>, FlowError> {
        let reached = self.reachable_from(source)?;
        Ok((0..self.num_edges)
            .filter(|&e| {
                let i = self.edge_index_to_arc_index[e];
                reached[self.tail(i)] && !reached[self.inside_edge_list[i].to]
            })
            .collect())
    }

    /// Original capacity of the edges leaving the `reached` side. Nodes past
    /// the end of `reached` count as unreached.
    pub fn cut_capacity(&self, reached: &[bool]) -> Flow {
        let is_reached = |u: usize| reached.get(u).copied().unwrap_or(false);
        self.edge_index_to_arc_index
            .iter()
            .filter(|&&i| is_reached(self.tail(i)) && !is_reached(self.inside_edge_list[i].to))
            .fold(Flow::zero(), |sum, &i| sum + self.inside_edge_list[i].upper)
    }
}

impl<Flow> ResidualGraph<Flow>
where
    Flow: NumAssign + Neg<Output = Flow> + Ord + Copy,
{
    /// Network with costs from `(from, to, capacity, cost)` quadruples. Each
    /// reverse arc costs the negated cost of its edge.
    pub fn with_costs(num_nodes: usize, edges: &[(usize, usize, Flow, Flow)]) -> Result<Self, FlowError> {
        Self::build(num_nodes, edges.to_vec(), |cost| -cost)
    }

    /// Like [`from_capacity_matrix`](Self::from_capacity_matrix), taking each
    /// edge's cost from the same cell of `cost`.
    pub fn from_matrices(capacity: &[Vec<Flow>], cost: &[Vec<Flow>]) -> Result<Self, FlowError> {
        let n = capacity.len();
        check_square(capacity, n)?;
        for u in 0..n {
            let len = cost.get(u).map_or(0, Vec::len);
            if len != n {
                return Err(InputError::MatrixShape { row: u, len, expected: n }.into());
            }
        }

        let mut edges = Vec::new();
        for (u, row) in capacity.iter().enumerate() {
            for (v, &c) in row.iter().enumerate() {
                if c != Flow::zero() {
                    edges.push((u, v, c, cost[u][v]));
                }
            }
        }
        Self::build(n, edges, |cost| -cost)
    }
}

fn check_square<Flow>(matrix: &[Vec<Flow>], n: usize) -> Result<(), InputError> {
    for (row, entries) in matrix.iter().enumerate() {
        if entries.len() != n {
            return Err(InputError::MatrixShape { row, len: entries.len(), expected: n });
        }
    }
    Ok(())
}
