use crate::config::SolverConfig;
use crate::error::{check_terminals, FlowError};
use crate::maximum_flow::augmenting_path::AugmentingPathFinder;
use crate::maximum_flow::{MaxFlow, MaximumFlowSolver};
use crate::residual_graph::ResidualGraph;
use crate::status::Status;
use log::{debug, trace, warn};
use num_traits::NumAssign;
use std::fmt::Debug;

/// Ford-Fulkerson with breadth-first path selection (Edmonds-Karp), so every
/// augmentation follows a shortest path and at most O(V E) are needed.
#[derive(Default)]
pub struct FordFulkerson {
    config: SolverConfig,
    finder: AugmentingPathFinder,
}

impl FordFulkerson {
    pub fn with_config(config: SolverConfig) -> Self {
        Self { config, ..Default::default() }
    }
}

impl<Flow> MaximumFlowSolver<Flow> for FordFulkerson
where
    Flow: NumAssign + Ord + Copy + Debug,
{
    fn maximize(&mut self, residual: &mut ResidualGraph<Flow>, source: usize, sink: usize) -> Result<MaxFlow<Flow>, FlowError> {
        check_terminals(source, sink, residual.num_nodes())?;
        let mut budget = self.config.budget();

        let mut value = Flow::zero();
        while self.finder.find(residual, source, sink, None) {
            if budget.is_exhausted() {
                warn!("ford-fulkerson: budget exhausted after {} augmentations, flow so far {:?}", budget.spent(), value);
                return Ok(MaxFlow { value, augmentations: budget.spent(), status: Status::BudgetExhausted });
            }

            let delta = self.finder.augment(residual, sink, None)?;
            budget.spend();
            trace!("ford-fulkerson: augmented {:?}", delta);
            value += delta;
        }

        debug!("ford-fulkerson: maximum flow {:?} after {} augmentations", value, budget.spent());
        Ok(MaxFlow { value, augmentations: budget.spent(), status: Status::Optimal })
    }
}
