use thiserror::Error;

/// Input rejected before any graph was built or mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("node {node} is out of range for a graph with {num_nodes} nodes")]
    NodeOutOfRange { node: usize, num_nodes: usize },
    #[error("edge {edge} has a negative capacity")]
    NegativeCapacity { edge: usize },
    #[error("edge {edge} has a negative cost")]
    NegativeCost { edge: usize },
    #[error("source and sink are both node {node}")]
    SourceIsSink { node: usize },
    #[error("demand must be non-negative")]
    NegativeDemand,
    #[error("matrix row {row} has {len} entries, expected {expected}")]
    MatrixShape { row: usize, len: usize, expected: usize },
    /// The flow already on the network can be made cheaper without changing
    /// its value, so no potentials keep every reduced cost non-negative.
    #[error("the residual network has a negative cost cycle")]
    NegativeCostCycle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FlowError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InputError),
    /// Pushing more flow than an arc can carry. Seeing this from a solver
    /// means the residual graph would have been corrupted, so the solve aborts.
    #[error("invalid augmentation along {from} -> {to}")]
    InvalidAugmentation { from: usize, to: usize },
}

pub(crate) fn check_node(node: usize, num_nodes: usize) -> Result<(), InputError> {
    if node >= num_nodes {
        return Err(InputError::NodeOutOfRange { node, num_nodes });
    }
    Ok(())
}

pub(crate) fn check_terminals(source: usize, sink: usize, num_nodes: usize) -> Result<(), InputError> {
    check_node(source, num_nodes)?;
    check_node(sink, num_nodes)?;
    if source == sink {
        return Err(InputError::SourceIsSink { node: source });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_errors_convert_into_flow_errors() {
        let err: FlowError = InputError::SourceIsSink { node: 3 }.into();
        assert_eq!(err, FlowError::InvalidInput(InputError::SourceIsSink { node: 3 }));
        assert_eq!(err.to_string(), "invalid input: source and sink are both node 3");
    }

    #[test]
    fn terminals_are_checked_in_order() {
        assert_eq!(check_terminals(0, 1, 2), Ok(()));
        assert_eq!(check_terminals(2, 1, 2), Err(InputError::NodeOutOfRange { node: 2, num_nodes: 2 }));
        assert_eq!(check_terminals(0, 5, 2), Err(InputError::NodeOutOfRange { node: 5, num_nodes: 2 }));
        assert_eq!(check_terminals(1, 1, 2), Err(InputError::SourceIsSink { node: 1 }));
    }
}
