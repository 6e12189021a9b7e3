//! Read-only quality metrics of a solution.

use std::fmt;

use serde::Serialize;

use crate::models::{Problem, Solution, Trip};

/// Metrics of one trip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripAnalysis {
    pub vehicle: String,
    /// Load over capacity per commodity, in `[0, 1]` for feasible trips.
    /// Zero for a commodity the vehicle cannot carry.
    pub utilization: Vec<f64>,
    pub average_utilization: f64,
    pub distance: f64,
    /// Length of the greedy nearest-neighbour tour over the same deliveries,
    /// followed by the waypoints in id order.
    pub nearest_neighbor_distance: f64,
    /// `distance / nearest_neighbor_distance`; below 1 means the exact
    /// ordering beat the greedy one.
    pub efficiency_ratio: f64,
}

/// Metrics of a whole solution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolutionAnalysis {
    pub trips: Vec<TripAnalysis>,
    /// Total distance over total nearest-neighbour distance.
    pub overall_efficiency_ratio: f64,
    /// Fixed cost as a fraction of total cost.
    pub fixed_cost_share: f64,
    pub fuel_cost_share: f64,
    /// Total demand over the summed capacity of all trips, per commodity.
    pub fleet_utilization: Vec<f64>,
    pub vehicles_used: usize,
}

/// Computes utilization, routing efficiency and cost breakdown of `solution`.
///
/// # Examples
///
/// ```
/// use u_fleet::analysis::analyze;
/// use u_fleet::instances::reference_problem;
/// use u_fleet::search::solve;
///
/// let problem = reference_problem();
/// let solution = solve(&problem).into_solution().unwrap();
/// let report = analyze(&problem, &solution);
/// assert_eq!(report.vehicles_used, 1);
/// assert_eq!(report.fleet_utilization, vec![0.75, 1.0]);
/// ```
pub fn analyze(problem: &Problem, solution: &Solution) -> SolutionAnalysis {
    let trips: Vec<TripAnalysis> = solution
        .trips()
        .iter()
        .map(|t| analyze_trip(problem, t))
        .collect();

    let estimate: f64 = trips.iter().map(|t| t.nearest_neighbor_distance).sum();
    let actual: f64 = trips.iter().map(|t| t.distance).sum();

    let commodities = problem.num_commodities();
    let demand = problem.total_demand();
    let mut capacity = vec![0i64; commodities];
    for trip in solution.trips() {
        if let Some(vehicle) = problem.vehicles().get(trip.vehicle()) {
            for (c, cap) in capacity.iter_mut().enumerate() {
                *cap += i64::from(vehicle.capacity().get(c));
            }
        }
    }
    let fleet_utilization = (0..commodities)
        .map(|c| fraction(demand[c] as f64, capacity[c] as f64))
        .collect();

    SolutionAnalysis {
        trips,
        overall_efficiency_ratio: ratio(actual, estimate),
        fixed_cost_share: fraction(solution.total_fixed_cost(), solution.total_cost()),
        fuel_cost_share: fraction(solution.total_fuel_cost(), solution.total_cost()),
        fleet_utilization,
        vehicles_used: solution.vehicle_count(),
    }
}

fn analyze_trip(problem: &Problem, trip: &Trip) -> TripAnalysis {
    let vehicle = problem.vehicles().get(trip.vehicle());
    let utilization: Vec<f64> = (0..problem.num_commodities())
        .map(|c| {
            let cap = vehicle.map_or(0, |v| v.capacity().get(c));
            fraction(trip.load().get(c) as f64, cap as f64)
        })
        .collect();
    let average_utilization = if utilization.is_empty() {
        0.0
    } else {
        utilization.iter().sum::<f64>() / utilization.len() as f64
    };
    let estimate = nearest_neighbor_distance(problem, trip.deliveries());

    TripAnalysis {
        vehicle: vehicle.map_or_else(|| "?".to_string(), |v| v.name().to_string()),
        utilization,
        average_utilization,
        distance: trip.distance(),
        nearest_neighbor_distance: estimate,
        efficiency_ratio: ratio(trip.distance(), estimate),
    }
}

/// Greedy tour: hub, nearest unvisited delivery until none remain, then the
/// waypoints in id order, then hub.
pub fn nearest_neighbor_distance(problem: &Problem, deliveries: &[usize]) -> f64 {
    let matrix = problem.distances();
    let mut remaining = deliveries.to_vec();
    let mut current = problem.hub();
    let mut total = 0.0;
    while let Some(next) = matrix.nearest_neighbor(current, &remaining) {
        total += matrix.get(current, next);
        remaining.retain(|&n| n != next);
        current = next;
    }
    for &w in problem.waypoints() {
        total += matrix.get(current, w);
        current = w;
    }
    total + matrix.get(current, problem.hub())
}

fn fraction(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        part / whole
    } else {
        0.0
    }
}

fn ratio(actual: f64, estimate: f64) -> f64 {
    if estimate > 0.0 {
        actual / estimate
    } else if actual > 0.0 {
        f64::INFINITY
    } else {
        1.0
    }
}

impl fmt::Display for SolutionAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Vehicle utilization:")?;
        for t in &self.trips {
            let per: Vec<String> = t
                .utilization
                .iter()
                .map(|u| format!("{:.1}%", u * 100.0))
                .collect();
            writeln!(
                f,
                "  {}: [{}] avg {:.1}%, distance {} vs greedy {} ({:.2}x)",
                t.vehicle,
                per.join(", "),
                t.average_utilization * 100.0,
                t.distance,
                t.nearest_neighbor_distance,
                t.efficiency_ratio
            )?;
        }
        writeln!(f, "Overall efficiency ratio: {:.2}x", self.overall_efficiency_ratio)?;
        writeln!(
            f,
            "Cost breakdown: fixed {:.1}%, fuel {:.1}%",
            self.fixed_cost_share * 100.0,
            self.fuel_cost_share * 100.0
        )?;
        let fleet: Vec<String> = self
            .fleet_utilization
            .iter()
            .map(|u| format!("{:.1}%", u * 100.0))
            .collect();
        write!(
            f,
            "Vehicles used: {}, fleet utilization [{}]",
            self.vehicles_used,
            fleet.join(", ")
        )
    }
}
