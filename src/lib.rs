//! Residual-graph maximum flow, bipartite matching and minimum cost flow.
//!
//! Every solver works on a [`ResidualGraph`] that it borrows mutably for the
//! duration of one call. Solvers are plain structs holding scratch buffers, so
//! they can be reused across graphs but never share state between calls.

pub mod bipartite_matching;
pub mod config;
pub mod error;
pub mod maximum_flow;
pub mod minimum_cost_flow;
pub mod residual_graph;
pub mod status;

pub use config::SolverConfig;
pub use error::{FlowError, InputError};
pub use residual_graph::{InsideEdge, ResidualGraph};
pub use status::Status;
