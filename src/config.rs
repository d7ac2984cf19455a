use serde::{Deserialize, Serialize};

/// Knobs shared by every solver.
///
/// The default places no limit on the work a solver does. A caller that needs
/// bounded latency sets `max_augmentations`; a solver that stops because of it
/// reports [`Status::BudgetExhausted`](crate::Status::BudgetExhausted).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Maximum number of augmenting paths pushed in one call.
    pub max_augmentations: Option<usize>,
}

impl SolverConfig {
    pub fn with_max_augmentations(max_augmentations: usize) -> Self {
        Self { max_augmentations: Some(max_augmentations) }
    }

    pub(crate) fn budget(&self) -> Budget {
        Budget { remaining: self.max_augmentations, spent: 0 }
    }
}

/// Per-call countdown of augmentations.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Budget {
    remaining: Option<usize>,
    spent: usize,
}

impl Budget {
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.remaining == Some(0)
    }

    #[inline]
    pub fn spend(&mut self) {
        self.spent += 1;
        if let Some(remaining) = self.remaining.as_mut() {
            *remaining = remaining.saturating_sub(1);
        }
    }

    #[inline]
    pub fn spent(&self) -> usize {
        self.spent
    }
}
