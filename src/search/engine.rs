//! Depth-first branch-and-bound over vehicle trips.
//!
//! # Algorithm
//!
//! One recursion level commits one trip: a vehicle type and a non-empty
//! subset of the still unassigned deliveries. Vehicle types are tried in
//! decreasing capacity-to-fixed-cost ratio, subsets in canonical order
//! ([`CanonicalSubsets`]). A branch is abandoned when the capacity check
//! rejects it, when no route exists, or when its partial cost already meets
//! the incumbent's total. A complete assignment replaces the incumbent only
//! if it is strictly cheaper, so the first optimum found is the one reported.
//!
//! Routes depend only on the delivery subset, never on the vehicle, and are
//! memoized per subset for the lifetime of a search context. A subset larger
//! than the planner's [`max_deliveries`](RoutePlanner::max_deliveries) is
//! skipped, and the run then reports `BudgetExhausted` instead of `Optimal`.
//!
//! With more than one thread the root branches are fanned out over a rayon
//! pool. Workers share the incumbent; their bound reads may be momentarily
//! stale, which costs extra expansions but never loses the optimum. Among
//! several equally cheap optima, which one is reported may then vary.

use std::collections::hash_map::Entry;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::{Duration, Instant};

use fxhash::FxHashMap;
use parking_lot::Mutex;
use rayon::prelude::*;
use tracing::{debug, info, instrument, trace, warn};

use crate::evaluation::{checked_load, unservable_deliveries, RoutePlan, RoutePlanner};
use crate::models::{Problem, Solution, Trip};

use super::{
    CanonicalSubsets, FixedCostPolicy, FleetPolicy, Infeasibility, NodeSet, SearchConfig,
    SearchStatistics, SolveOutcome, SolveResult,
};

/// Exact solver for the multi-commodity fleet routing problem.
///
/// # Examples
///
/// ```
/// use u_fleet::instances::reference_problem;
/// use u_fleet::search::{SearchConfig, Solver};
///
/// let problem = reference_problem();
/// let result = Solver::new(SearchConfig::default()).solve(&problem);
/// let solution = result.outcome.solution().unwrap();
/// assert_eq!(solution.total_cost(), 425.0);
/// assert_eq!(solution.trips()[0].path(), &[0, 3, 2, 4, 1, 5, 6, 0]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Solver {
    config: SearchConfig,
}

impl Solver {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Runs the search to completion or until the budget runs out.
    #[instrument(skip_all, fields(deliveries = problem.deliveries().len()))]
    pub fn solve(&self, problem: &Problem) -> SolveResult {
        let started = Instant::now();
        let threads = self.config.threads.number_of_threads();
        info!(
            deliveries = problem.deliveries().len(),
            waypoints = problem.waypoints().len(),
            vehicle_types = problem.vehicles().len(),
            threads,
            "solve started"
        );

        let planner = self.config.route_strategy.planner();
        let (outcome, mut statistics) = self.run(problem, planner.as_ref(), threads, started);
        statistics.elapsed = started.elapsed();

        info!(
            outcome = outcome.label(),
            cost = outcome.solution().map(Solution::total_cost),
            expansions = statistics.expansions,
            pruned = statistics.pruned,
            elapsed_ms = millis(statistics.elapsed),
            "solve finished"
        );
        SolveResult {
            outcome,
            statistics,
        }
    }

    fn run(
        &self,
        problem: &Problem,
        planner: &dyn RoutePlanner,
        threads: usize,
        started: Instant,
    ) -> (SolveOutcome, SearchStatistics) {
        let mut statistics = SearchStatistics::default();

        if problem.deliveries().is_empty() {
            return (SolveOutcome::Optimal(Solution::default()), statistics);
        }
        let unservable = unservable_deliveries(problem);
        if !unservable.is_empty() {
            debug!(?unservable, "deliveries exceed every vehicle capacity");
            return (
                SolveOutcome::Infeasible(Infeasibility::UnservableDeliveries(unservable)),
                statistics,
            );
        }

        let shared = Shared::new(problem, &self.config, started);
        let root = State::root(problem.deliveries().len());

        if threads > 1 {
            statistics = self.run_parallel(&shared, planner, root, threads);
        } else {
            let mut ctx = SearchContext::new(&shared, planner);
            ctx.explore(root);
            statistics = ctx.stats;
        }

        // skipped oversized routes leave the tree incomplete, like a budget cut
        let exhausted = shared.guard.is_exhausted() || shared.truncated.load(Ordering::Relaxed);
        let best = shared.incumbent.take().map(Solution::new);
        let outcome = match (best, exhausted) {
            (best, true) => SolveOutcome::BudgetExhausted(best),
            (Some(solution), false) => SolveOutcome::Optimal(solution),
            (None, false) => SolveOutcome::Infeasible(Infeasibility::NoFeasibleAssignment),
        };
        (outcome, statistics)
    }

    fn run_parallel(
        &self,
        shared: &Shared<'_>,
        planner: &dyn RoutePlanner,
        root: State,
        threads: usize,
    ) -> SearchStatistics {
        let pool = match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
            Ok(pool) => pool,
            Err(e) => {
                warn!(error = %e, "could not build thread pool, searching sequentially");
                let mut ctx = SearchContext::new(shared, planner);
                ctx.explore(root);
                return ctx.stats;
            }
        };

        let mut statistics = SearchStatistics::default();
        if shared.guard.tick() {
            return statistics;
        }
        statistics.expansions += 1;

        let branches: Vec<(usize, NodeSet)> = shared
            .vehicle_order
            .iter()
            .flat_map(|&v| {
                CanonicalSubsets::new(
                    root.remaining,
                    shared.config.subset_order,
                    shared.config.anchor_lowest_node,
                )
                .map(move |subset| (v, subset))
            })
            .collect();
        debug!(branches = branches.len(), threads, "fanning out root branches");

        let workers = pool.install(|| {
            branches
                .par_iter()
                .map(|&(v, subset)| {
                    let mut ctx = SearchContext::new(shared, planner);
                    if !shared.guard.is_exhausted() {
                        ctx.branch(root, v, subset);
                    }
                    ctx.stats
                })
                .reduce(SearchStatistics::default, |mut a, b| {
                    a.merge(&b);
                    a
                })
        });
        statistics.merge(&workers);
        statistics
    }
}

/// Solves `problem` with the default configuration.
///
/// # Examples
///
/// ```
/// use u_fleet::instances::reference_problem;
/// use u_fleet::search::{solve, SolveOutcome};
///
/// let outcome = solve(&reference_problem());
/// assert!(matches!(outcome, SolveOutcome::Optimal(ref s) if s.total_cost() == 425.0));
/// ```
pub fn solve(problem: &Problem) -> SolveOutcome {
    Solver::default().solve(problem).outcome
}

/// Whole milliseconds in `d`, saturating at `u64::MAX`.
fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

/// Best complete assignment seen so far, shared between workers.
///
/// `bound` mirrors the incumbent cost as `f64` bits so pruning reads it
/// without taking the lock.
struct Incumbent {
    bound: AtomicU64,
    best: Mutex<Option<(f64, Vec<Trip>)>>,
}

impl Incumbent {
    fn new() -> Self {
        Self {
            bound: AtomicU64::new(f64::INFINITY.to_bits()),
            best: Mutex::new(None),
        }
    }

    fn bound(&self) -> f64 {
        f64::from_bits(self.bound.load(Ordering::Acquire))
    }

    /// Installs `trips` if `cost` is strictly lower than the incumbent's.
    fn offer(&self, cost: f64, trips: &[Trip]) -> bool {
        if cost >= self.bound() {
            return false;
        }
        let mut best = self.best.lock();
        let improves = best.as_ref().map_or(true, |(c, _)| cost < *c);
        if improves {
            *best = Some((cost, trips.to_vec()));
            self.bound.store(cost.to_bits(), Ordering::Release);
        }
        improves
    }

    fn take(&self) -> Option<Vec<Trip>> {
        self.best.lock().take().map(|(_, trips)| trips)
    }
}

/// Expansion and wall-clock limits, checked on every expansion.
struct BudgetGuard {
    max_expansions: Option<u64>,
    deadline: Option<Instant>,
    expansions: AtomicU64,
    exhausted: AtomicBool,
}

impl BudgetGuard {
    /// The clock is read once per this many expansions.
    const CLOCK_STRIDE: u64 = 64;

    fn new(config: &SearchConfig, started: Instant) -> Self {
        Self {
            max_expansions: config.budget.max_expansions,
            deadline: config.budget.time_limit().map(|limit| started + limit),
            expansions: AtomicU64::new(0),
            exhausted: AtomicBool::new(false),
        }
    }

    fn is_exhausted(&self) -> bool {
        self.exhausted.load(Ordering::Relaxed)
    }

    /// Counts one expansion; returns `true` if the search must stop instead.
    fn tick(&self) -> bool {
        if self.is_exhausted() {
            return true;
        }
        if self.max_expansions.is_none() && self.deadline.is_none() {
            return false;
        }
        let n = self.expansions.fetch_add(1, Ordering::Relaxed) + 1;
        let over_count = self.max_expansions.is_some_and(|max| n > max);
        let over_time = n % Self::CLOCK_STRIDE == 1
            && self.deadline.is_some_and(|deadline| Instant::now() >= deadline);
        if over_count || over_time {
            if !self.exhausted.swap(true, Ordering::Relaxed) {
                debug!(expansions = n - 1, "search budget exhausted");
            }
            return true;
        }
        false
    }
}

/// Per-solve data every worker reads.
struct Shared<'a> {
    problem: &'a Problem,
    config: &'a SearchConfig,
    /// Roster indices, most capacity per unit of fixed cost first.
    vehicle_order: Vec<usize>,
    /// Roster index to vehicle-type slot; entries sharing a name share a slot.
    type_slot: Vec<usize>,
    incumbent: Incumbent,
    guard: BudgetGuard,
    /// Set once a subset was too large for the route planner.
    truncated: AtomicBool,
}

impl<'a> Shared<'a> {
    fn new(problem: &'a Problem, config: &'a SearchConfig, started: Instant) -> Self {
        let vehicles = problem.vehicles();
        let efficiency: Vec<f64> = vehicles.iter().map(|v| v.efficiency()).collect();
        let mut vehicle_order: Vec<usize> = (0..vehicles.len()).collect();
        vehicle_order.sort_by(|&a, &b| efficiency[b].total_cmp(&efficiency[a]));

        let type_slot = (0..vehicles.len())
            .map(|i| {
                vehicles
                    .iter()
                    .position(|v| v.name() == vehicles[i].name())
                    .unwrap_or(i)
            })
            .collect();

        Self {
            problem,
            config,
            vehicle_order,
            type_slot,
            incumbent: Incumbent::new(),
            guard: BudgetGuard::new(config, started),
            truncated: AtomicBool::new(false),
        }
    }
}

/// Search state at one tree node.
#[derive(Debug, Clone, Copy)]
struct State {
    remaining: NodeSet,
    cost: f64,
    /// Vehicle-type slots whose fixed cost has been paid.
    charged: u64,
    /// Roster entries already dispatched.
    dispatched: u64,
}

impl State {
    fn root(deliveries: usize) -> Self {
        Self {
            remaining: NodeSet::full(deliveries),
            cost: 0.0,
            charged: 0,
            dispatched: 0,
        }
    }
}

/// One worker's view of the search: the trip stack, route memo and counters.
struct SearchContext<'s, 'a> {
    shared: &'s Shared<'a>,
    planner: &'s dyn RoutePlanner,
    routes: FxHashMap<NodeSet, Option<RoutePlan>>,
    trips: Vec<Trip>,
    stats: SearchStatistics,
}

impl<'s, 'a> SearchContext<'s, 'a> {
    fn new(shared: &'s Shared<'a>, planner: &'s dyn RoutePlanner) -> Self {
        Self {
            shared,
            planner,
            routes: FxHashMap::default(),
            trips: Vec::new(),
            stats: SearchStatistics::default(),
        }
    }

    fn explore(&mut self, state: State) {
        if self.shared.guard.tick() {
            return;
        }
        self.stats.expansions += 1;

        if state.remaining.is_empty() {
            self.stats.candidates += 1;
            if self.shared.incumbent.offer(state.cost, &self.trips) {
                self.stats.improvements += 1;
                debug!(
                    cost = state.cost,
                    trips = self.trips.len(),
                    "incumbent improved"
                );
            }
            return;
        }

        let config = self.shared.config;
        let shared = self.shared;
        for &v in &shared.vehicle_order {
            if config.fleet_policy == FleetPolicy::AsListed && state.dispatched & (1 << v) != 0 {
                continue;
            }
            let subsets = CanonicalSubsets::new(
                state.remaining,
                config.subset_order,
                config.anchor_lowest_node,
            );
            for subset in subsets {
                if shared.guard.is_exhausted() {
                    return;
                }
                self.branch(state, v, subset);
            }
        }
    }

    /// Commits `subset` to roster entry `v` and explores what remains.
    fn branch(&mut self, state: State, v: usize, subset: NodeSet) {
        let shared = self.shared;
        let problem = shared.problem;
        let deliveries = problem.deliveries();
        let vehicle = problem.vehicle(v);

        let Some(load) = checked_load(problem, vehicle, subset.iter().map(|i| deliveries[i]))
        else {
            self.stats.capacity_rejections += 1;
            return;
        };

        if subset.len() > self.planner.max_deliveries() {
            self.stats.oversized_routes += 1;
            if !shared.truncated.swap(true, Ordering::Relaxed) {
                warn!(
                    size = subset.len(),
                    limit = self.planner.max_deliveries(),
                    "trip too large for the route planner, search will be incomplete"
                );
            }
            return;
        }

        let plan = match self.routes.entry(subset) {
            Entry::Occupied(e) => {
                self.stats.route_cache_hits += 1;
                e.into_mut()
            }
            Entry::Vacant(e) => {
                self.stats.routes_planned += 1;
                let nodes: Vec<usize> = subset.iter().map(|i| deliveries[i]).collect();
                e.insert(self.planner.plan(problem, &nodes))
            }
        };
        let Some(plan) = plan.as_ref() else {
            return;
        };

        let slot = 1u64 << shared.type_slot[v];
        let fixed_cost = match shared.config.fixed_cost_policy {
            FixedCostPolicy::PerTrip => vehicle.fixed_cost(),
            FixedCostPolicy::PerVehicleType if state.charged & slot != 0 => 0.0,
            FixedCostPolicy::PerVehicleType => vehicle.fixed_cost(),
        };
        let fuel_cost = vehicle.fuel_cost(plan.distance());
        let cost = state.cost + fixed_cost + fuel_cost;

        if shared.config.pruning && cost >= shared.incumbent.bound() {
            self.stats.pruned += 1;
            trace!(vehicle = v, subset = subset.bits(), cost, "pruned");
            return;
        }

        let trip = Trip::new(
            v,
            plan.path(problem.hub()),
            plan.deliveries().to_vec(),
            load,
            plan.distance(),
        )
        .with_costs(fixed_cost, fuel_cost);

        let next = State {
            remaining: state.remaining.difference(subset),
            cost,
            charged: state.charged | slot,
            dispatched: state.dispatched | (1 << v),
        };
        self.trips.push(trip);
        self.explore(next);
        self.trips.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::RouteStrategy;
    use crate::instances::reference_problem;
    use crate::models::{ProblemBuilder, VehicleType};
    use crate::search::{SearchBudget, SubsetOrder, Threads};

    fn optimal(result: &SolveResult) -> &Solution {
        match &result.outcome {
            SolveOutcome::Optimal(s) => s,
            other => panic!("expected optimal, got {other:?}"),
        }
    }

    /// Hub, three deliveries on a line, no waypoints.
    fn line_problem(capacity: i32, fixed: f64) -> Problem {
        let mut b = ProblemBuilder::new(1);
        let hub = b.add_hub("Hub");
        let a = b.add_delivery("A", vec![1]);
        let c = b.add_delivery("B", vec![1]);
        let d = b.add_delivery("C", vec![1]);
        b.set_distance(hub, a, 10.0)
            .set_distance(hub, c, 20.0)
            .set_distance(hub, d, 30.0)
            .set_distance(a, c, 10.0)
            .set_distance(a, d, 20.0)
            .set_distance(c, d, 10.0)
            .add_vehicle(
                VehicleType::new("T", vec![capacity])
                    .with_fixed_cost(fixed)
                    .with_cost_per_distance(1.0),
            );
        b.build().expect("valid")
    }

    #[test]
    fn test_reference_optimum() {
        let p = reference_problem();
        let result = Solver::default().solve(&p);
        let s = optimal(&result);
        assert_eq!(s.total_cost(), 425.0);
        assert_eq!(s.vehicle_count(), 1);
        let trip = &s.trips()[0];
        assert_eq!(p.vehicle(trip.vehicle()).name(), "X");
        assert_eq!(trip.path(), &[0, 3, 2, 4, 1, 5, 6, 0]);
        assert_eq!(trip.distance(), 175.0);
        assert_eq!(trip.fixed_cost(), 250.0);
        assert_eq!(trip.load().as_slice(), &[3, 4]);
        assert!(result.statistics.expansions > 0);
        assert!(result.statistics.improvements >= 1);
    }

    #[test]
    fn test_reference_is_deterministic() {
        let p = reference_problem();
        let a = Solver::default().solve(&p).outcome;
        let b = Solver::default().solve(&p).outcome;
        assert_eq!(a, b);
    }

    #[test]
    fn test_pruning_does_not_change_cost() {
        let p = reference_problem();
        let with = Solver::default().solve(&p);
        let without = Solver::new(SearchConfig::default().with_pruning(false)).solve(&p);
        assert_eq!(optimal(&with).total_cost(), optimal(&without).total_cost());
        assert_eq!(without.statistics.pruned, 0);
        assert!(with.statistics.expansions < without.statistics.expansions);
    }

    #[test]
    fn test_all_orders_and_strategies_agree() {
        let p = reference_problem();
        for order in [SubsetOrder::LargestFirst, SubsetOrder::SmallestFirst] {
            for anchor in [true, false] {
                for strategy in [RouteStrategy::Exhaustive, RouteStrategy::HeldKarp] {
                    let config = SearchConfig::default()
                        .with_subset_order(order)
                        .with_anchoring(anchor)
                        .with_route_strategy(strategy);
                    let result = Solver::new(config).solve(&p);
                    assert_eq!(optimal(&result).total_cost(), 425.0);
                }
            }
        }
    }

    #[test]
    fn test_reuses_vehicle_type_when_unlimited() {
        // Capacity 1 forces one trip per delivery.
        let p = line_problem(1, 5.0);
        let s = Solver::default().solve(&p).outcome.into_solution().expect("feasible");
        assert_eq!(s.vehicle_count(), 3);
        assert_eq!(s.total_fixed_cost(), 15.0);
        assert_eq!(s.total_distance(), 20.0 + 40.0 + 60.0);
        let mut served: Vec<usize> = s.served().collect();
        served.sort_unstable();
        assert_eq!(served, vec![1, 2, 3]);
    }

    #[test]
    fn test_per_vehicle_type_charges_once() {
        let p = line_problem(1, 5.0);
        let config = SearchConfig::default().with_fixed_cost_policy(FixedCostPolicy::PerVehicleType);
        let s = Solver::new(config).solve(&p).outcome.into_solution().expect("feasible");
        assert_eq!(s.total_fixed_cost(), 5.0);
        assert_eq!(s.total_cost(), 5.0 + 120.0);
        assert_eq!(s.trips()[0].fixed_cost(), 5.0);
        assert!(s.trips()[1..].iter().all(|t| t.fixed_cost() == 0.0));
    }

    #[test]
    fn test_as_listed_fleet_can_be_infeasible() {
        let p = line_problem(1, 5.0);
        let config = SearchConfig::default().with_fleet_policy(FleetPolicy::AsListed);
        let result = Solver::new(config).solve(&p);
        assert_eq!(
            result.outcome,
            SolveOutcome::Infeasible(Infeasibility::NoFeasibleAssignment)
        );
    }

    #[test]
    fn test_as_listed_on_reference() {
        let p = reference_problem();
        let config = SearchConfig::default().with_fleet_policy(FleetPolicy::AsListed);
        let s = Solver::new(config).solve(&p).outcome.into_solution().expect("feasible");
        assert_eq!(s.total_cost(), 425.0);
    }

    #[test]
    fn test_unservable_fast_path() {
        let mut b = ProblemBuilder::new(2);
        b.add_hub("Hub");
        b.add_delivery("A", vec![1, 0]);
        b.add_delivery("Big", vec![0, 7]);
        b.add_vehicle(VehicleType::new("V", vec![2, 2]));
        b.set_distance(0, 1, 5.0)
            .set_distance(0, 2, 5.0)
            .set_distance(1, 2, 5.0);
        let p = b.build().expect("valid");
        let result = Solver::default().solve(&p);
        assert_eq!(
            result.outcome,
            SolveOutcome::Infeasible(Infeasibility::UnservableDeliveries(vec![2]))
        );
        assert_eq!(result.statistics.expansions, 0);
    }

    #[test]
    fn test_no_deliveries() {
        let mut b = ProblemBuilder::new(1);
        b.add_hub("Hub");
        b.add_vehicle(VehicleType::new("V", vec![1]));
        let p = b.build().expect("valid");
        let s = solve(&p);
        assert_eq!(s, SolveOutcome::Optimal(Solution::default()));
    }

    #[test]
    fn test_expansion_budget() {
        let p = reference_problem();
        let config =
            SearchConfig::default().with_budget(SearchBudget::unlimited().with_max_expansions(3));
        let result = Solver::new(config).solve(&p);
        assert!(matches!(result.outcome, SolveOutcome::BudgetExhausted(_)));
        assert!(result.statistics.expansions <= 3);
    }

    #[test]
    fn test_budget_keeps_best_so_far() {
        // Largest-first finds the single X trip at the second expansion.
        let p = reference_problem();
        let config =
            SearchConfig::default().with_budget(SearchBudget::unlimited().with_max_expansions(2));
        let result = Solver::new(config).solve(&p);
        match result.outcome {
            SolveOutcome::BudgetExhausted(Some(s)) => assert_eq!(s.total_cost(), 425.0),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_zero_time_limit_stops_immediately() {
        let p = reference_problem();
        let budget = SearchBudget::unlimited().with_time_limit(std::time::Duration::ZERO);
        let result = Solver::new(SearchConfig::default().with_budget(budget)).solve(&p);
        assert_eq!(result.outcome, SolveOutcome::BudgetExhausted(None));
        assert_eq!(result.statistics.expansions, 0);
    }

    #[test]
    fn test_generous_budget_is_optimal() {
        let p = reference_problem();
        let config = SearchConfig::default()
            .with_budget(SearchBudget::unlimited().with_max_expansions(u64::MAX));
        assert!(Solver::new(config).solve(&p).outcome.is_optimal());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let p = reference_problem();
        let config = SearchConfig::default().with_threads(Threads::Multi(4));
        let result = Solver::new(config).solve(&p);
        assert_eq!(optimal(&result).total_cost(), 425.0);
        assert!(result.statistics.expansions > 1);
    }

    #[test]
    fn test_demands_at_i32_limit_are_split() {
        let mut b = ProblemBuilder::new(1);
        let hub = b.add_hub("Hub");
        let a = b.add_delivery("A", vec![i32::MAX]);
        let c = b.add_delivery("B", vec![i32::MAX]);
        b.set_distance(hub, a, 1.0)
            .set_distance(hub, c, 1.0)
            .set_distance(a, c, 1.0)
            .add_vehicle(VehicleType::new("Max", vec![i32::MAX]));
        let p = b.build().expect("valid");

        let result = Solver::default().solve(&p);
        let s = optimal(&result);
        assert_eq!(s.trips().len(), 2);
        assert_eq!(s.total_cost(), 4.0);
        for trip in s.trips() {
            assert_eq!(trip.load().as_slice(), &[i32::MAX]);
        }
        assert!(result.statistics.capacity_rejections > 0);
        assert!(crate::validation::Validator::new().validate(&p, s).is_valid());
    }

    /// Exhaustive ordering limited to single-delivery trips.
    struct SingleStopPlanner;

    impl RoutePlanner for SingleStopPlanner {
        fn plan(&self, problem: &Problem, deliveries: &[usize]) -> Option<RoutePlan> {
            if deliveries.len() > 1 {
                return None;
            }
            crate::evaluation::ExhaustiveRoutePlanner.plan(problem, deliveries)
        }

        fn max_deliveries(&self) -> usize {
            1
        }
    }

    #[test]
    fn test_oversized_trips_make_search_incomplete() {
        let p = line_problem(3, 100.0);
        assert_eq!(optimal(&Solver::default().solve(&p)).total_cost(), 160.0);

        for threads in [1, 3] {
            let (outcome, stats) =
                Solver::default().run(&p, &SingleStopPlanner, threads, Instant::now());
            match outcome {
                SolveOutcome::BudgetExhausted(Some(s)) => {
                    assert_eq!(s.trips().len(), 3);
                    assert_eq!(s.total_cost(), 300.0 + 20.0 + 40.0 + 60.0);
                }
                other => panic!("unexpected {other:?}"),
            }
            assert!(stats.oversized_routes > 0);
        }
    }

    #[test]
    fn test_millis_saturates() {
        assert_eq!(millis(Duration::from_micros(1_500_999)), 1_500);
        assert_eq!(millis(Duration::MAX), u64::MAX);
    }

    #[test]
    fn test_incumbent_strictly_lower() {
        let inc = Incumbent::new();
        assert!(inc.offer(10.0, &[]));
        assert!(!inc.offer(10.0, &[]));
        assert!(!inc.offer(11.0, &[]));
        assert!(inc.offer(9.5, &[]));
        assert_eq!(inc.bound(), 9.5);
        assert!(inc.take().is_some());
    }
}
