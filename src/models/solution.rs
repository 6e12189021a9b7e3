//! Complete solution: an ordered collection of trips with cached totals.

use std::fmt;

use serde::Serialize;

use super::{Problem, Trip};

/// A complete routing solution.
///
/// Totals are computed once at construction. Feasibility is not checked
/// here; that is the job of [`crate::validation::Validator`].
///
/// # Examples
///
/// ```
/// use u_fleet::models::{Load, Solution, Trip};
///
/// let t1 = Trip::new(0, vec![0, 1, 3, 0], vec![1], Load::from(vec![1]), 30.0).with_costs(100.0, 30.0);
/// let t2 = Trip::new(1, vec![0, 2, 3, 0], vec![2], Load::from(vec![2]), 20.0).with_costs(150.0, 40.0);
/// let sol = Solution::new(vec![t1, t2]);
/// assert_eq!(sol.vehicle_count(), 2);
/// assert_eq!(sol.total_fixed_cost(), 250.0);
/// assert_eq!(sol.total_fuel_cost(), 70.0);
/// assert_eq!(sol.total_cost(), 320.0);
/// assert_eq!(sol.total_distance(), 50.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Solution {
    trips: Vec<Trip>,
    total_fixed_cost: f64,
    total_fuel_cost: f64,
    total_cost: f64,
    total_distance: f64,
}

impl Solution {
    /// Creates a solution from finalized trips.
    pub fn new(trips: Vec<Trip>) -> Self {
        let total_fixed_cost = trips.iter().map(|t| t.fixed_cost()).sum::<f64>();
        let total_fuel_cost = trips.iter().map(|t| t.fuel_cost()).sum::<f64>();
        let total_distance = trips.iter().map(|t| t.distance()).sum();
        Self {
            trips,
            total_fixed_cost,
            total_fuel_cost,
            total_cost: total_fixed_cost + total_fuel_cost,
            total_distance,
        }
    }

    /// Trips in the order they were committed.
    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    pub fn into_trips(self) -> Vec<Trip> {
        self.trips
    }

    /// Number of trips (each trip uses one vehicle).
    pub fn vehicle_count(&self) -> usize {
        self.trips.len()
    }

    pub fn total_fixed_cost(&self) -> f64 {
        self.total_fixed_cost
    }

    pub fn total_fuel_cost(&self) -> f64 {
        self.total_fuel_cost
    }

    /// Fixed plus fuel cost over all trips.
    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    pub fn total_distance(&self) -> f64 {
        self.total_distance
    }

    /// All delivery nodes served, trip by trip in visiting order.
    pub fn served(&self) -> impl Iterator<Item = usize> + '_ {
        self.trips.iter().flat_map(|t| t.deliveries().iter().copied())
    }

    /// Renders this solution with node and vehicle names from `problem`.
    pub fn display<'a>(&'a self, problem: &'a Problem) -> SolutionDisplay<'a> {
        SolutionDisplay {
            solution: self,
            problem,
        }
    }
}

impl Default for Solution {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

/// Human-readable view of a [`Solution`]; see [`Solution::display`].
pub struct SolutionDisplay<'a> {
    solution: &'a Solution,
    problem: &'a Problem,
}

impl fmt::Display for SolutionDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.solution;
        for (i, trip) in s.trips.iter().enumerate() {
            writeln!(f, "Trip #{} {}", i + 1, trip.display(self.problem))?;
        }
        writeln!(f, "Total fixed cost: {}", s.total_fixed_cost)?;
        writeln!(f, "Total fuel cost : {}", s.total_fuel_cost)?;
        writeln!(f, "Total cost      : {}", s.total_cost)?;
        writeln!(f, "Vehicles used   : {}", s.vehicle_count())?;
        write!(f, "Total distance  : {}", s.total_distance)
    }
}
