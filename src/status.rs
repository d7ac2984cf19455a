#[derive(Default, PartialEq, Eq, Debug, Clone, Copy)]
pub enum Status {
    #[default]
    NotSolved,
    Optimal,
    /// The augmentation budget ran out while an augmenting path still existed.
    /// The reported value is the flow so far, not necessarily the optimum.
    BudgetExhausted,
    /// Minimum cost flow only: the sink became unreachable before the demand
    /// was routed. The reported flow is the cheapest way to route what could be.
    DemandUnreachable,
}

impl Status {
    pub fn is_optimal(&self) -> bool {
        *self == Status::Optimal
    }
}
