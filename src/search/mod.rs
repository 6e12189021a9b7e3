//! Exact recursive search over trip assignments.
//!
//! - [`Solver`] — depth-first branch-and-bound, optionally parallel at the root
//! - [`SearchConfig`] — cost, fleet, ordering and budget policies
//! - [`CanonicalSubsets`] — deterministic subset enumeration over a [`NodeSet`]
//! - [`SolveOutcome`] — optimal, budget-limited or infeasible result

mod config;
mod engine;
mod outcome;
mod subset;

pub use config::{FixedCostPolicy, FleetPolicy, SearchBudget, SearchConfig, Threads};
pub use engine::{solve, Solver};
pub use outcome::{Infeasibility, SearchStatistics, SolveOutcome, SolveResult};
pub use subset::{CanonicalSubsets, NodeSet, SubsetOrder};
