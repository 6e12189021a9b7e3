//! # u-fleet
//!
//! Exact vehicle routing for a heterogeneous fleet: every delivery is served
//! exactly once, each trip respects its vehicle's per-commodity capacity and
//! ends by passing all required waypoints before returning to the hub, and
//! the total of fixed plus fuel cost is minimized by depth-first
//! branch-and-bound over trip assignments.
//!
//! ## Modules
//!
//! - [`models`] — Domain types (Node, Load, VehicleType, Problem, Trip, Solution)
//! - [`distance`] — Dense distance matrix
//! - [`evaluation`] — Capacity feasibility and per-trip route construction
//! - [`search`] — The recursive search engine and its configuration
//! - [`validation`] — Independent solution checks
//! - [`analysis`] — Utilization, efficiency and cost reporting
//! - [`config`] — JSON problem files
//! - [`instances`] — Reference and random instances
//!
//! ## Example
//!
//! ```
//! use u_fleet::instances::reference_problem;
//! use u_fleet::search::{SearchConfig, Solver};
//!
//! let problem = reference_problem();
//! let result = Solver::new(SearchConfig::default()).solve(&problem);
//! let solution = result.outcome.solution().unwrap();
//! println!("{}", solution.display(&problem));
//! assert_eq!(solution.total_cost(), 425.0);
//! ```

pub mod analysis;
pub mod config;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod instances;
pub mod models;
pub mod search;
pub mod validation;

pub use error::ProblemError;
pub use search::{solve, SolveOutcome, Solver};
