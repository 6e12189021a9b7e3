//! Solution validation, independent of the search.
//!
//! [`Validator`] recomputes coverage, capacity, waypoint tail and cost
//! arithmetic from the [`Problem`](crate::models::Problem) and reports every
//! broken invariant as a [`Violation`].

mod validator;
mod violation;

pub use validator::Validator;
pub use violation::{ValidationReport, Violation};
