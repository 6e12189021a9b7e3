//! Independent check of a solution against its problem.

use crate::models::{Problem, Solution, Trip};
use crate::search::{FixedCostPolicy, FleetPolicy, SearchConfig};

use super::{ValidationReport, Violation};

/// Re-derives every solution invariant from the problem data alone:
/// coverage, per-commodity capacity, waypoint tail, distance and cost
/// arithmetic, and the fleet rule.
///
/// The cost policies must match the ones the solution was built under.
///
/// # Examples
///
/// ```
/// use u_fleet::instances::reference_problem;
/// use u_fleet::search::solve;
/// use u_fleet::validation::Validator;
///
/// let problem = reference_problem();
/// let solution = solve(&problem).into_solution().unwrap();
/// let report = Validator::new().validate(&problem, &solution);
/// assert!(report.is_valid(), "{report}");
/// ```
#[derive(Debug, Clone)]
pub struct Validator {
    fixed_cost_policy: FixedCostPolicy,
    fleet_policy: FleetPolicy,
    tolerance: f64,
}

impl Default for Validator {
    fn default() -> Self {
        Self {
            fixed_cost_policy: FixedCostPolicy::PerTrip,
            fleet_policy: FleetPolicy::Unlimited,
            tolerance: 1e-6,
        }
    }
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// A validator using the cost and fleet policies of `config`.
    pub fn for_config(config: &SearchConfig) -> Self {
        Self {
            fixed_cost_policy: config.fixed_cost_policy,
            fleet_policy: config.fleet_policy,
            ..Self::default()
        }
    }

    pub fn with_fixed_cost_policy(mut self, policy: FixedCostPolicy) -> Self {
        self.fixed_cost_policy = policy;
        self
    }

    pub fn with_fleet_policy(mut self, policy: FleetPolicy) -> Self {
        self.fleet_policy = policy;
        self
    }

    /// Relative tolerance for floating-point comparisons.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn validate(&self, problem: &Problem, solution: &Solution) -> ValidationReport {
        let mut violations = Vec::new();
        let mut served = vec![0usize; problem.deliveries().len()];
        let mut runs = vec![0usize; problem.vehicles().len()];
        let mut charged_names: Vec<&str> = Vec::new();

        for (t, trip) in solution.trips().iter().enumerate() {
            let Some(vehicle) = problem.vehicles().get(trip.vehicle()) else {
                violations.push(Violation::UnknownVehicle {
                    trip: t,
                    vehicle: trip.vehicle(),
                });
                continue;
            };
            runs[trip.vehicle()] += 1;

            if let Some(&node) = trip.path().iter().find(|&&n| n >= problem.num_nodes()) {
                violations.push(Violation::UnknownNode { trip: t, node });
                continue;
            }
            self.check_shape(problem, t, trip, &mut violations);

            for &d in trip.deliveries() {
                if let Some(i) = problem.delivery_index(d) {
                    served[i] += 1;
                }
            }

            // capacity, on the demand actually served; summed in i64 so that
            // large demands cannot wrap back under the limit
            let commodities = problem.num_commodities();
            let mut load = vec![0i64; commodities];
            for &d in trip.deliveries() {
                if d < problem.num_nodes() {
                    for (c, sum) in load.iter_mut().enumerate() {
                        *sum += i64::from(problem.node(d).demand().get(c));
                    }
                }
            }
            let capacity = vehicle.capacity();
            if let Some(c) = (0..commodities).find(|&c| load[c] > i64::from(capacity.get(c))) {
                violations.push(Violation::CapacityExceeded {
                    trip: t,
                    commodity: c,
                    load: load[c],
                    capacity: capacity.get(c),
                });
            }
            let recorded = trip.load();
            if recorded.len() != commodities
                || (0..commodities).any(|c| i64::from(recorded.get(c)) != load[c])
            {
                violations.push(Violation::LoadMismatch { trip: t });
            }

            let actual = problem.distances().path_length(trip.path());
            if !self.close(trip.distance(), actual) {
                violations.push(Violation::DistanceMismatch {
                    trip: t,
                    recorded: trip.distance(),
                    actual,
                });
            }

            let expected_fixed = match self.fixed_cost_policy {
                FixedCostPolicy::PerTrip => vehicle.fixed_cost(),
                FixedCostPolicy::PerVehicleType => {
                    if charged_names.contains(&vehicle.name()) {
                        0.0
                    } else {
                        charged_names.push(vehicle.name());
                        vehicle.fixed_cost()
                    }
                }
            };
            if !self.close(trip.fixed_cost(), expected_fixed) {
                violations.push(Violation::FixedCostMismatch {
                    trip: t,
                    recorded: trip.fixed_cost(),
                    expected: expected_fixed,
                });
            }
            let expected_fuel = vehicle.fuel_cost(actual);
            if !self.close(trip.fuel_cost(), expected_fuel) {
                violations.push(Violation::FuelCostMismatch {
                    trip: t,
                    recorded: trip.fuel_cost(),
                    expected: expected_fuel,
                });
            }
        }

        for (i, &times) in served.iter().enumerate() {
            let node = problem.deliveries()[i];
            match times {
                0 => violations.push(Violation::Unserved { node }),
                1 => {}
                _ => violations.push(Violation::ServedMoreThanOnce { node, times }),
            }
        }

        if self.fleet_policy == FleetPolicy::AsListed {
            for (vehicle, &trips) in runs.iter().enumerate() {
                if trips > 1 {
                    violations.push(Violation::VehicleReused { vehicle, trips });
                }
            }
        }

        self.check_totals(solution, &mut violations);
        ValidationReport::new(violations)
    }

    /// Path structure: hub, deliveries, waypoint tail, hub.
    fn check_shape(&self, problem: &Problem, t: usize, trip: &Trip, out: &mut Vec<Violation>) {
        let path = trip.path();
        let hub = problem.hub();
        let k = trip.deliveries().len();

        if k == 0 {
            out.push(Violation::EmptyTrip { trip: t });
        }
        if path.len() < 2 || path[0] != hub || path[path.len() - 1] != hub {
            out.push(Violation::NotHubAnchored { trip: t });
            return;
        }
        let inner = &path[1..path.len() - 1];
        let deliveries_ok = inner.len() >= k
            && inner[..k] == *trip.deliveries()
            && trip.deliveries().iter().all(|&d| problem.node(d).is_delivery());
        if !deliveries_ok {
            out.push(Violation::DeliverySegmentMismatch { trip: t });
            return;
        }
        let mut tail = inner[k..].to_vec();
        tail.sort_unstable();
        if tail != problem.waypoints() {
            out.push(Violation::WaypointTailMismatch { trip: t });
        }
    }

    fn check_totals(&self, solution: &Solution, out: &mut Vec<Violation>) {
        let trips = solution.trips();
        let sums = [
            (
                "total_fixed_cost",
                solution.total_fixed_cost(),
                trips.iter().map(Trip::fixed_cost).sum::<f64>(),
            ),
            (
                "total_fuel_cost",
                solution.total_fuel_cost(),
                trips.iter().map(Trip::fuel_cost).sum::<f64>(),
            ),
            (
                "total_cost",
                solution.total_cost(),
                trips.iter().map(Trip::total_cost).sum::<f64>(),
            ),
            (
                "total_distance",
                solution.total_distance(),
                trips.iter().map(Trip::distance).sum::<f64>(),
            ),
        ];
        for (field, recorded, expected) in sums {
            if !self.close(recorded, expected) {
                out.push(Violation::TotalMismatch {
                    field,
                    recorded,
                    expected,
                });
            }
        }
    }

    fn close(&self, a: f64, b: f64) -> bool {
        (a - b).abs() <= self.tolerance * a.abs().max(b.abs()).max(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instances::reference_problem;
    use crate::models::Load;
    use crate::search::{SearchConfig, Solver};

    fn trip(vehicle: usize, path: Vec<usize>, deliveries: Vec<usize>, load: Vec<i32>) -> Trip {
        let p = reference_problem();
        let distance = p.distances().path_length(&path);
        let v = p.vehicle(vehicle);
        Trip::new(vehicle, path, deliveries, Load::from(load), distance)
            .with_costs(v.fixed_cost(), v.fuel_cost(distance))
    }

    #[test]
    fn test_solver_output_is_valid() {
        let p = reference_problem();
        let s = Solver::default().solve(&p).outcome.into_solution().expect("feasible");
        assert!(Validator::new().validate(&p, &s).is_valid());
    }

    #[test]
    fn test_capacity_violation_reported() {
        let p = reference_problem();
        let s = Solution::new(vec![
            trip(0, vec![0, 4, 1, 5, 6, 0], vec![4, 1], vec![2, 0]),
            trip(1, vec![0, 2, 3, 6, 5, 0], vec![2, 3], vec![1, 4]),
        ]);
        // W carries K = 4 > 3
        let report = Validator::new().validate(&p, &s);
        assert_eq!(
            report.violations(),
            &[Violation::CapacityExceeded {
                trip: 1,
                commodity: 1,
                load: 4,
                capacity: 3,
            }]
        );
    }

    #[test]
    fn test_capacity_checked_past_i32_range() {
        use crate::models::{ProblemBuilder, VehicleType};

        let mut b = ProblemBuilder::new(1);
        let hub = b.add_hub("Hub");
        let a = b.add_delivery("A", vec![i32::MAX]);
        let c = b.add_delivery("B", vec![i32::MAX]);
        b.set_distance(hub, a, 1.0)
            .set_distance(hub, c, 1.0)
            .set_distance(a, c, 1.0)
            .add_vehicle(VehicleType::new("Max", vec![i32::MAX]));
        let p = b.build().expect("valid");

        // the load a wrapping sum would have recorded
        let wrapped = Trip::new(0, vec![hub, a, c, hub], vec![a, c], Load::from(vec![-2]), 3.0)
            .with_costs(0.0, 3.0);
        let report = Validator::new().validate(&p, &Solution::new(vec![wrapped]));
        assert!(!report.is_valid());
        assert!(report.violations().contains(&Violation::CapacityExceeded {
            trip: 0,
            commodity: 0,
            load: 2 * i64::from(i32::MAX),
            capacity: i32::MAX,
        }));
        assert!(report
            .violations()
            .contains(&Violation::LoadMismatch { trip: 0 }));
    }

    #[test]
    fn test_coverage_violations() {
        let p = reference_problem();
        let s = Solution::new(vec![
            trip(2, vec![0, 1, 2, 5, 6, 0], vec![1, 2], vec![1, 2]),
            trip(2, vec![0, 2, 4, 5, 6, 0], vec![2, 4], vec![1, 2]),
        ]);
        let report = Validator::new().validate(&p, &s);
        assert!(report
            .violations()
            .contains(&Violation::Unserved { node: 3 }));
        assert!(report
            .violations()
            .contains(&Violation::ServedMoreThanOnce { node: 2, times: 2 }));
    }

    #[test]
    fn test_waypoint_tail_required() {
        let p = reference_problem();
        let s = Solution::new(vec![trip(
            4,
            vec![0, 1, 2, 3, 4, 5, 0],
            vec![1, 2, 3, 4],
            vec![3, 4],
        )]);
        let report = Validator::new().validate(&p, &s);
        assert_eq!(
            report.violations(),
            &[Violation::WaypointTailMismatch { trip: 0 }]
        );
    }

    #[test]
    fn test_cost_arithmetic() {
        let p = reference_problem();
        let t = Trip::new(
            2,
            vec![0, 3, 2, 4, 1, 5, 6, 0],
            vec![3, 2, 4, 1],
            Load::from(vec![3, 4]),
            170.0,
        )
        .with_costs(200.0, 170.0);
        let report = Validator::new().validate(&p, &Solution::new(vec![t]));
        let kinds: Vec<_> = report.violations().to_vec();
        assert!(matches!(kinds[0], Violation::DistanceMismatch { actual, .. } if actual == 175.0));
        assert!(matches!(kinds[1], Violation::FixedCostMismatch { expected, .. } if expected == 250.0));
        assert!(matches!(kinds[2], Violation::FuelCostMismatch { expected, .. } if expected == 175.0));
        assert_eq!(kinds.len(), 3);
    }

    #[test]
    fn test_fleet_and_fixed_cost_policies() {
        let p = reference_problem();
        let t1 = trip(2, vec![0, 1, 2, 5, 6, 0], vec![1, 2], vec![1, 2]);
        let t2 = trip(2, vec![0, 3, 4, 6, 5, 0], vec![3, 4], vec![2, 2]);
        let s = Solution::new(vec![t1, t2]);
        assert!(Validator::new().validate(&p, &s).is_valid());

        let config = SearchConfig::default().with_fleet_policy(FleetPolicy::AsListed);
        let report = Validator::for_config(&config).validate(&p, &s);
        assert_eq!(
            report.violations(),
            &[Violation::VehicleReused {
                vehicle: 2,
                trips: 2
            }]
        );

        // second trip of the same type should have been free
        let report = Validator::new()
            .with_fixed_cost_policy(FixedCostPolicy::PerVehicleType)
            .validate(&p, &s);
        assert_eq!(report.violations().len(), 1);
        assert!(matches!(
            report.violations()[0],
            Violation::FixedCostMismatch { trip: 1, .. }
        ));
    }

    #[test]
    fn test_unknown_ids() {
        let p = reference_problem();
        let bad_vehicle = Trip::new(9, vec![0, 1, 5, 6, 0], vec![1], Load::from(vec![1, 0]), 0.0);
        let bad_node = Trip::new(0, vec![0, 42, 0], vec![42], Load::from(vec![0, 0]), 0.0);
        let report = Validator::new().validate(&p, &Solution::new(vec![bad_vehicle, bad_node]));
        assert!(report.violations().contains(&Violation::UnknownVehicle {
            trip: 0,
            vehicle: 9
        }));
        assert!(report
            .violations()
            .contains(&Violation::UnknownNode { trip: 1, node: 42 }));
    }
}
