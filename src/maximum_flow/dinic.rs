use crate::config::SolverConfig;
use crate::error::{check_terminals, FlowError};
use crate::maximum_flow::level_graph::LevelGraph;
use crate::maximum_flow::{MaxFlow, MaximumFlowSolver};
use crate::residual_graph::ResidualGraph;
use crate::status::Status;
use log::{debug, trace, warn};
use num_traits::NumAssign;
use std::fmt::Debug;

/// Depth-first search over a level graph, one augmenting path at a time.
///
/// `current_arc[u]` only moves forward within a phase: an arc is skipped once
/// it is not admissible or leads to a dead end, so a whole phase scans each
/// arc at most once apart from the arcs of the paths themselves. The search
/// keeps its path on an explicit stack instead of recursing.
#[derive(Default)]
pub struct BlockingFlowSearch {
    current_arc: Vec<usize>,
    path: Vec<usize>,
}

impl BlockingFlowSearch {
    /// Rewinds every cursor. Called once at the start of each phase.
    pub fn reset<Flow>(&mut self, graph: &ResidualGraph<Flow>)
    where
        Flow: NumAssign + Ord + Copy,
    {
        self.current_arc.clear();
        self.current_arc.extend((0..graph.num_nodes()).map(|u| graph.arcs(u).start));
        self.path.clear();
    }

    /// Looks for a source-sink path in the level graph, leaving its arcs in
    /// `path()`. Returns false once the flow of this phase is blocking.
    pub fn find_path<Flow>(&mut self, graph: &ResidualGraph<Flow>, levels: &mut LevelGraph, source: usize, sink: usize) -> bool
    where
        Flow: NumAssign + Ord + Copy,
    {
        self.path.clear();
        let mut u = source;
        loop {
            if u == sink {
                return true;
            }

            let end = graph.arcs(u).end;
            while self.current_arc[u] < end && !levels.is_admissible(graph, u, self.current_arc[u]) {
                self.current_arc[u] += 1;
            }

            // advance
            if self.current_arc[u] < end {
                let arc_index = self.current_arc[u];
                self.path.push(arc_index);
                u = graph.arc(arc_index).to;
                continue;
            }

            // retreat
            levels.remove(u);
            match self.path.pop() {
                Some(arc_index) => {
                    u = graph.tail(arc_index);
                    self.current_arc[u] += 1;
                }
                None => return false,
            }
        }
    }

    /// Arcs of the last path found, from the source.
    pub fn path(&self) -> &[usize] {
        &self.path
    }

    /// Pushes the bottleneck of the last path found and returns it.
    pub fn push_path<Flow>(&mut self, graph: &mut ResidualGraph<Flow>) -> Result<Flow, FlowError>
    where
        Flow: NumAssign + Ord + Copy,
    {
        let delta = match self.path.iter().map(|&arc_index| graph.residual_capacity(arc_index)).min() {
            Some(delta) => delta,
            None => return Ok(Flow::zero()),
        };
        for &arc_index in self.path.iter() {
            graph.push_flow_on_arc(arc_index, delta)?;
        }
        Ok(delta)
    }
}

/// Dinic's algorithm: rebuild the level graph, saturate a blocking flow in it,
/// repeat until the sink gets no level. O(V^2 E) in general.
#[derive(Default)]
pub struct Dinic {
    config: SolverConfig,
    levels: LevelGraph,
    search: BlockingFlowSearch,
}

impl Dinic {
    pub fn with_config(config: SolverConfig) -> Self {
        Self { config, ..Default::default() }
    }
}

impl<Flow> MaximumFlowSolver<Flow> for Dinic
where
    Flow: NumAssign + Ord + Copy + Debug,
{
    fn maximize(&mut self, residual: &mut ResidualGraph<Flow>, source: usize, sink: usize) -> Result<MaxFlow<Flow>, FlowError> {
        check_terminals(source, sink, residual.num_nodes())?;
        let mut budget = self.config.budget();

        let mut value = Flow::zero();
        let mut phase = 0;
        while self.levels.build(residual, source, sink) {
            phase += 1;
            self.search.reset(residual);

            let mut pushed = Flow::zero();
            while self.search.find_path(residual, &mut self.levels, source, sink) {
                if budget.is_exhausted() {
                    warn!("dinic: budget exhausted in phase {}, flow so far {:?}", phase, value);
                    return Ok(MaxFlow { value, augmentations: budget.spent(), status: Status::BudgetExhausted });
                }

                let delta = self.search.push_path(residual)?;
                budget.spend();
                trace!("dinic: augmented {:?} along {} arcs", delta, self.search.path().len());
                value += delta;
                pushed += delta;
            }
            debug!("dinic: phase {} pushed {:?}", phase, pushed);
        }

        debug!("dinic: maximum flow {:?} after {} phases", value, phase);
        Ok(MaxFlow { value, augmentations: budget.spent(), status: Status::Optimal })
    }
}
