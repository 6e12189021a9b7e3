//! Invariant violations found in a solution.

use std::fmt;

use serde::Serialize;

/// A broken invariant of a [`Solution`](crate::models::Solution).
///
/// `trip` fields are positions within [`Solution::trips`](crate::models::Solution::trips).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    /// The trip names a vehicle outside the roster.
    UnknownVehicle { trip: usize, vehicle: usize },
    /// The path visits a node id outside the problem.
    UnknownNode { trip: usize, node: usize },
    /// The trip serves no delivery.
    EmptyTrip { trip: usize },
    /// The path does not start and end at the hub.
    NotHubAnchored { trip: usize },
    /// The delivery list disagrees with the path, or names a non-delivery node.
    DeliverySegmentMismatch { trip: usize },
    /// The nodes after the deliveries are not exactly the required waypoints.
    WaypointTailMismatch { trip: usize },
    /// A delivery is served by no trip.
    Unserved { node: usize },
    /// A delivery is served more than once.
    ServedMoreThanOnce { node: usize, times: usize },
    /// Carried load exceeds the vehicle's capacity.
    CapacityExceeded {
        trip: usize,
        commodity: usize,
        load: i64,
        capacity: i32,
    },
    /// The recorded load disagrees with the served demand.
    LoadMismatch { trip: usize },
    /// The recorded distance disagrees with the path length.
    DistanceMismatch {
        trip: usize,
        recorded: f64,
        actual: f64,
    },
    FixedCostMismatch {
        trip: usize,
        recorded: f64,
        expected: f64,
    },
    FuelCostMismatch {
        trip: usize,
        recorded: f64,
        expected: f64,
    },
    /// A roster entry runs more than one trip under a fleet-as-listed policy.
    VehicleReused { vehicle: usize, trips: usize },
    /// A solution total disagrees with the sum over its trips.
    TotalMismatch {
        field: &'static str,
        recorded: f64,
        expected: f64,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::UnknownVehicle { trip, vehicle } => {
                write!(f, "trip {trip}: unknown vehicle {vehicle}")
            }
            Violation::UnknownNode { trip, node } => write!(f, "trip {trip}: unknown node {node}"),
            Violation::EmptyTrip { trip } => write!(f, "trip {trip}: serves no delivery"),
            Violation::NotHubAnchored { trip } => {
                write!(f, "trip {trip}: route must start and end at the hub")
            }
            Violation::DeliverySegmentMismatch { trip } => {
                write!(f, "trip {trip}: delivery segment does not match the route")
            }
            Violation::WaypointTailMismatch { trip } => {
                write!(f, "trip {trip}: route does not end with the required waypoints")
            }
            Violation::Unserved { node } => write!(f, "delivery {node} is not served"),
            Violation::ServedMoreThanOnce { node, times } => {
                write!(f, "delivery {node} is served {times} times")
            }
            Violation::CapacityExceeded {
                trip,
                commodity,
                load,
                capacity,
            } => write!(
                f,
                "trip {trip}: commodity {commodity} load {load} exceeds capacity {capacity}"
            ),
            Violation::LoadMismatch { trip } => {
                write!(f, "trip {trip}: recorded load differs from served demand")
            }
            Violation::DistanceMismatch {
                trip,
                recorded,
                actual,
            } => write!(f, "trip {trip}: distance {recorded} but route length is {actual}"),
            Violation::FixedCostMismatch {
                trip,
                recorded,
                expected,
            } => write!(f, "trip {trip}: fixed cost {recorded}, expected {expected}"),
            Violation::FuelCostMismatch {
                trip,
                recorded,
                expected,
            } => write!(f, "trip {trip}: fuel cost {recorded}, expected {expected}"),
            Violation::VehicleReused { vehicle, trips } => {
                write!(f, "vehicle {vehicle} runs {trips} trips")
            }
            Violation::TotalMismatch {
                field,
                recorded,
                expected,
            } => write!(f, "{field} is {recorded}, trips sum to {expected}"),
        }
    }
}

/// Outcome of validating a solution.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    violations: Vec<Violation>,
}

impl ValidationReport {
    pub(crate) fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            return write!(f, "valid");
        }
        write!(f, "{} violation(s)", self.violations.len())?;
        for v in &self.violations {
            write!(f, "\n  - {v}")?;
        }
        Ok(())
    }
}
