//! Per-trip evaluation: capacity feasibility and route construction.
//!
//! - [`checked_load`] / [`is_feasible`] — per-commodity capacity check
//! - [`Permutations`] — lazy lexicographic ordering generator
//! - [`RoutePlanner`] — minimum-distance trip ordering with the waypoint tail

mod feasibility;
mod permutations;
mod route_builder;

pub use feasibility::{checked_load, is_feasible, trip_load, unservable_deliveries};
pub use permutations::{next_permutation, Permutations};
pub use route_builder::{
    best_tail, ExhaustiveRoutePlanner, HeldKarpRoutePlanner, RoutePlan, RoutePlanner,
    RouteStrategy,
};
