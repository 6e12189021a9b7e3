//! A single vehicle trip.

use std::fmt;

use serde::Serialize;

use super::{Load, Problem};

/// One vehicle's route from the hub through its deliveries and the required
/// waypoints back to the hub.
///
/// `path` holds the full node sequence including both hub endpoints;
/// `deliveries` is the delivery segment of that path in visiting order.
///
/// # Examples
///
/// ```
/// use u_fleet::models::{Load, Trip};
///
/// let trip = Trip::new(0, vec![0, 2, 1, 5, 6, 0], vec![2, 1], Load::from(vec![1, 2]), 120.0)
///     .with_costs(150.0, 120.0);
/// assert_eq!(trip.deliveries(), &[2, 1]);
/// assert_eq!(trip.waypoint_tail(), &[5, 6]);
/// assert_eq!(trip.total_cost(), 270.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trip {
    vehicle: usize,
    path: Vec<usize>,
    deliveries: Vec<usize>,
    load: Load,
    distance: f64,
    fixed_cost: f64,
    fuel_cost: f64,
}

impl Trip {
    /// Creates a trip for the vehicle at roster position `vehicle`, with zero costs.
    pub fn new(
        vehicle: usize,
        path: Vec<usize>,
        deliveries: Vec<usize>,
        load: Load,
        distance: f64,
    ) -> Self {
        Self {
            vehicle,
            path,
            deliveries,
            load,
            distance,
            fixed_cost: 0.0,
            fuel_cost: 0.0,
        }
    }

    /// Sets the fixed and fuel cost charged for this trip.
    pub fn with_costs(mut self, fixed_cost: f64, fuel_cost: f64) -> Self {
        self.fixed_cost = fixed_cost;
        self.fuel_cost = fuel_cost;
        self
    }

    /// Roster position of the vehicle driving this trip.
    pub fn vehicle(&self) -> usize {
        self.vehicle
    }

    /// Full node sequence, hub to hub.
    pub fn path(&self) -> &[usize] {
        &self.path
    }

    /// Delivery nodes in visiting order.
    pub fn deliveries(&self) -> &[usize] {
        &self.deliveries
    }

    /// Nodes between the last delivery and the final return to the hub.
    ///
    /// Empty if the path is too short to have a tail.
    pub fn waypoint_tail(&self) -> &[usize] {
        let start = 1 + self.deliveries.len();
        let end = self.path.len().saturating_sub(1);
        if start > end {
            return &[];
        }
        &self.path[start..end]
    }

    /// Per-commodity load carried.
    pub fn load(&self) -> &Load {
        &self.load
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn fixed_cost(&self) -> f64 {
        self.fixed_cost
    }

    pub fn fuel_cost(&self) -> f64 {
        self.fuel_cost
    }

    /// Fixed plus fuel cost.
    pub fn total_cost(&self) -> f64 {
        self.fixed_cost + self.fuel_cost
    }

    /// Renders this trip with node and vehicle names from `problem`.
    pub fn display<'a>(&'a self, problem: &'a Problem) -> TripDisplay<'a> {
        TripDisplay {
            trip: self,
            problem,
        }
    }
}

/// Human-readable view of a [`Trip`]; see [`Trip::display`].
pub struct TripDisplay<'a> {
    trip: &'a Trip,
    problem: &'a Problem,
}

impl fmt::Display for TripDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.problem;
        let t = self.trip;
        let vehicle = p.vehicles().get(t.vehicle).map_or("?", |v| v.name());
        let deliveries: Vec<String> = t
            .deliveries
            .iter()
            .map(|&n| {
                let demand: Vec<String> = p
                    .nodes()
                    .get(n)
                    .map(|node| node.demand().iter().map(|q| q.to_string()).collect())
                    .unwrap_or_default();
                format!("{} ({})", p.node_name(n), demand.join(", "))
            })
            .collect();
        let route: Vec<&str> = t.path.iter().map(|&n| p.node_name(n)).collect();

        writeln!(f, "Vehicle {vehicle}")?;
        writeln!(f, "  Deliveries: {}", deliveries.join(", "))?;
        writeln!(f, "  Route     : {}", route.join(" -> "))?;
        writeln!(f, "  Distance  : {}", t.distance)?;
        writeln!(f, "  Fixed cost: {}", t.fixed_cost)?;
        writeln!(f, "  Fuel cost : {}", t.fuel_cost)?;
        write!(f, "  Total cost: {}", t.total_cost())
    }
}
