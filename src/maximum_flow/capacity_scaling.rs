use crate::config::SolverConfig;
use crate::error::{check_terminals, FlowError};
use crate::maximum_flow::augmenting_path::AugmentingPathFinder;
use crate::maximum_flow::{MaxFlow, MaximumFlowSolver};
use crate::residual_graph::ResidualGraph;
use crate::status::Status;
use log::{debug, trace, warn};
use num_traits::NumAssign;
use std::fmt::Debug;

/// Augments only along arcs with residual capacity at least `delta`, halving
/// `delta` whenever the `delta`-residual network has no s-t path. This bounds
/// the number of augmentations by O(E log U).
#[derive(Default)]
pub struct CapacityScaling {
    config: SolverConfig,
    finder: AugmentingPathFinder,
}

impl CapacityScaling {
    pub fn with_config(config: SolverConfig) -> Self {
        Self { config, ..Default::default() }
    }
}

/// Largest power of two not above `max_capacity`, zero when it is below one.
fn initial_delta<Flow>(max_capacity: Flow) -> Flow
where
    Flow: NumAssign + Ord + Copy,
{
    if max_capacity < Flow::one() {
        return Flow::zero();
    }
    let two = Flow::one() + Flow::one();
    let mut delta = Flow::one();
    while delta <= max_capacity / two {
        delta *= two;
    }
    delta
}

impl<Flow> MaximumFlowSolver<Flow> for CapacityScaling
where
    Flow: NumAssign + Ord + Copy + Debug,
{
    fn maximize(&mut self, residual: &mut ResidualGraph<Flow>, source: usize, sink: usize) -> Result<MaxFlow<Flow>, FlowError> {
        check_terminals(source, sink, residual.num_nodes())?;
        let mut budget = self.config.budget();
        let two = Flow::one() + Flow::one();

        let mut value = Flow::zero();
        let mut delta = initial_delta(residual.max_capacity());
        while delta >= Flow::one() {
            // solve maximum flow in delta-residual network
            let mut pushed = Flow::zero();
            while self.finder.find(residual, source, sink, Some(delta)) {
                if budget.is_exhausted() {
                    warn!("capacity scaling: budget exhausted at delta {:?}, flow so far {:?}", delta, value);
                    return Ok(MaxFlow { value, augmentations: budget.spent(), status: Status::BudgetExhausted });
                }

                let d = self.finder.augment(residual, sink, None)?;
                budget.spend();
                trace!("capacity scaling: augmented {:?}", d);
                value += d;
                pushed += d;
            }
            debug!("capacity scaling: delta {:?} pushed {:?}", delta, pushed);
            delta /= two;
        }

        debug!("capacity scaling: maximum flow {:?} after {} augmentations", value, budget.spent());
        Ok(MaxFlow { value, augmentations: budget.spent(), status: Status::Optimal })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_delta_is_the_largest_power_of_two() {
        assert_eq!(initial_delta(0), 0);
        assert_eq!(initial_delta(1), 1);
        assert_eq!(initial_delta(13), 8);
        assert_eq!(initial_delta(16), 16);
        assert_eq!(initial_delta(20), 16);
        assert_eq!(initial_delta(u64::MAX), 1 << 63);
    }
}
