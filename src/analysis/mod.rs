//! Read-only reporting on finished solutions.
//!
//! - [`analyze`] — utilization, routing efficiency and cost breakdown
//! - [`compare`] — headline deltas between two solutions

mod compare;
mod quality;

pub use compare::{compare, SolutionComparison};
pub use quality::{analyze, nearest_neighbor_distance, SolutionAnalysis, TripAnalysis};
