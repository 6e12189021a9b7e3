//! Domain model types for fixed-topology routing problems.
//!
//! Provides the core abstractions: nodes (hub, deliveries, required
//! waypoints) with per-commodity demands, vehicle types with per-commodity
//! capacities and costs, the validated problem, and the trip/solution
//! output structures.

mod load;
mod node;
mod problem;
mod solution;
mod trip;
mod vehicle;

pub use load::Load;
pub use node::{Node, NodeKind};
pub use problem::{Problem, ProblemBuilder, MAX_DELIVERIES, MAX_VEHICLE_TYPES};
pub use solution::{Solution, SolutionDisplay};
pub use trip::{Trip, TripDisplay};
pub use vehicle::VehicleType;
