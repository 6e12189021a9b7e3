//! Search results and counters.

use std::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::models::Solution;

/// Why no solution exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Infeasibility {
    /// These delivery nodes exceed every vehicle type's capacity on their own.
    UnservableDeliveries(Vec<usize>),
    /// The search finished without finding any covering assignment.
    NoFeasibleAssignment,
}

impl fmt::Display for Infeasibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Infeasibility::UnservableDeliveries(nodes) => {
                write!(f, "no vehicle type can carry deliveries {nodes:?}")
            }
            Infeasibility::NoFeasibleAssignment => {
                write!(f, "no assignment of vehicles covers every delivery")
            }
        }
    }
}

/// Result of a search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SolveOutcome {
    /// The search tree was exhausted; the solution is a proven optimum.
    Optimal(Solution),
    /// The budget ran out, or a trip was too large to route, before the tree
    /// was exhausted; carries the best solution found, if any.
    BudgetExhausted(Option<Solution>),
    Infeasible(Infeasibility),
}

impl SolveOutcome {
    /// The solution carried by this outcome, optimal or not.
    pub fn solution(&self) -> Option<&Solution> {
        match self {
            SolveOutcome::Optimal(s) => Some(s),
            SolveOutcome::BudgetExhausted(s) => s.as_ref(),
            SolveOutcome::Infeasible(_) => None,
        }
    }

    pub fn into_solution(self) -> Option<Solution> {
        match self {
            SolveOutcome::Optimal(s) => Some(s),
            SolveOutcome::BudgetExhausted(s) => s,
            SolveOutcome::Infeasible(_) => None,
        }
    }

    pub fn is_optimal(&self) -> bool {
        matches!(self, SolveOutcome::Optimal(_))
    }

    pub fn is_infeasible(&self) -> bool {
        matches!(self, SolveOutcome::Infeasible(_))
    }

    /// Short label used in logs.
    pub fn label(&self) -> &'static str {
        match self {
            SolveOutcome::Optimal(_) => "optimal",
            SolveOutcome::BudgetExhausted(Some(_)) => "budget_exhausted",
            SolveOutcome::BudgetExhausted(None) => "budget_exhausted_empty",
            SolveOutcome::Infeasible(_) => "infeasible",
        }
    }
}

/// Search-tree counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SearchStatistics {
    /// Recursive calls entered.
    pub expansions: u64,
    /// Complete assignments reached.
    pub candidates: u64,
    /// Times the incumbent was replaced.
    pub improvements: u64,
    /// Branches cut by the cost bound.
    pub pruned: u64,
    /// Subsets rejected by the capacity check.
    pub capacity_rejections: u64,
    /// Routes computed by the route planner.
    pub routes_planned: u64,
    /// Routes served from the per-subset cache.
    pub route_cache_hits: u64,
    /// Capacity-feasible subsets skipped as too large to route.
    pub oversized_routes: u64,
    pub elapsed: Duration,
}

impl SearchStatistics {
    /// Adds another worker's counters into these. `elapsed` is left alone.
    pub fn merge(&mut self, other: &SearchStatistics) {
        self.expansions += other.expansions;
        self.candidates += other.candidates;
        self.improvements += other.improvements;
        self.pruned += other.pruned;
        self.capacity_rejections += other.capacity_rejections;
        self.routes_planned += other.routes_planned;
        self.route_cache_hits += other.route_cache_hits;
        self.oversized_routes += other.oversized_routes;
    }
}

/// Outcome together with the counters of the run that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolveResult {
    pub outcome: SolveOutcome,
    pub statistics: SearchStatistics,
}
