//! Search configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::evaluation::RouteStrategy;

use super::SubsetOrder;

/// How a vehicle type's fixed cost is charged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixedCostPolicy {
    /// Every trip pays its vehicle's fixed cost.
    #[default]
    PerTrip,
    /// A vehicle type's fixed cost is paid once, by its first trip; further
    /// trips of the same type pay fuel only.
    PerVehicleType,
}

/// How many trips each roster entry may run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FleetPolicy {
    /// Any vehicle type may be used for any number of trips.
    #[default]
    Unlimited,
    /// Each roster entry is a single physical vehicle used at most once.
    AsListed,
}

/// Worker threads for the top-level branches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Threads {
    #[default]
    Single,
    Auto,
    Multi(usize),
}

impl Threads {
    pub fn number_of_threads(&self) -> usize {
        match self {
            Threads::Single => 1,
            Threads::Multi(num) => (*num).max(1),
            Threads::Auto => std::thread::available_parallelism().map_or(1, |n| n.get()),
        }
    }
}

/// Limits after which the search stops and reports its best-so-far solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchBudget {
    /// Maximum number of search-tree nodes to expand.
    pub max_expansions: Option<u64>,
    /// Wall-clock limit in milliseconds.
    pub time_limit_ms: Option<u64>,
}

impl SearchBudget {
    pub fn unlimited() -> Self {
        Self::default()
    }

    pub fn with_max_expansions(mut self, n: u64) -> Self {
        self.max_expansions = Some(n);
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit_ms = Some(u64::try_from(limit.as_millis()).unwrap_or(u64::MAX));
        self
    }

    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit_ms.map(Duration::from_millis)
    }

    pub fn is_unlimited(&self) -> bool {
        self.max_expansions.is_none() && self.time_limit_ms.is_none()
    }
}

/// Configuration for [`Solver`](super::Solver).
///
/// Every field has a default, so partial JSON is accepted:
///
/// ```
/// use u_fleet::search::{FleetPolicy, SearchConfig, Threads};
///
/// let config: SearchConfig =
///     serde_json::from_str(r#"{ "fleet_policy": "as_listed", "threads": { "multi": 4 } }"#).unwrap();
/// assert_eq!(config.fleet_policy, FleetPolicy::AsListed);
/// assert_eq!(config.threads, Threads::Multi(4));
/// assert!(config.pruning);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub fixed_cost_policy: FixedCostPolicy,
    pub fleet_policy: FleetPolicy,
    pub subset_order: SubsetOrder,
    /// Abandon branches whose partial cost reaches the incumbent's.
    pub pruning: bool,
    /// Only branch on subsets containing the lowest unassigned delivery.
    pub anchor_lowest_node: bool,
    pub route_strategy: RouteStrategy,
    pub threads: Threads,
    pub budget: SearchBudget,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            fixed_cost_policy: FixedCostPolicy::PerTrip,
            fleet_policy: FleetPolicy::Unlimited,
            subset_order: SubsetOrder::LargestFirst,
            pruning: true,
            anchor_lowest_node: true,
            route_strategy: RouteStrategy::Exhaustive,
            threads: Threads::Single,
            budget: SearchBudget::unlimited(),
        }
    }
}

impl SearchConfig {
    pub fn with_fixed_cost_policy(mut self, policy: FixedCostPolicy) -> Self {
        self.fixed_cost_policy = policy;
        self
    }

    pub fn with_fleet_policy(mut self, policy: FleetPolicy) -> Self {
        self.fleet_policy = policy;
        self
    }

    pub fn with_subset_order(mut self, order: SubsetOrder) -> Self {
        self.subset_order = order;
        self
    }

    pub fn with_pruning(mut self, pruning: bool) -> Self {
        self.pruning = pruning;
        self
    }

    pub fn with_anchoring(mut self, anchor: bool) -> Self {
        self.anchor_lowest_node = anchor;
        self
    }

    pub fn with_route_strategy(mut self, strategy: RouteStrategy) -> Self {
        self.route_strategy = strategy;
        self
    }

    pub fn with_threads(mut self, threads: Threads) -> Self {
        self.threads = threads;
        self
    }

    pub fn with_budget(mut self, budget: SearchBudget) -> Self {
        self.budget = budget;
        self
    }
}
