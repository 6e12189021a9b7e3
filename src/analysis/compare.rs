//! Side-by-side comparison of two solutions to the same problem.

use std::fmt;

use serde::Serialize;

use crate::models::Solution;

/// Differences `candidate - reference` for each headline figure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SolutionComparison {
    pub cost_delta: f64,
    pub fixed_cost_delta: f64,
    pub fuel_cost_delta: f64,
    pub vehicle_delta: i64,
    pub distance_delta: f64,
}

impl SolutionComparison {
    /// `true` if the total costs agree within `tolerance`.
    pub fn same_cost(&self, tolerance: f64) -> bool {
        self.cost_delta.abs() <= tolerance
    }

    /// `true` if the candidate is strictly cheaper beyond `tolerance`.
    pub fn candidate_is_cheaper(&self, tolerance: f64) -> bool {
        self.cost_delta < -tolerance
    }
}

/// Compares `candidate` against `reference`, e.g. a solution from an
/// independent solver.
///
/// # Examples
///
/// ```
/// use u_fleet::analysis::compare;
/// use u_fleet::models::Solution;
///
/// let a = Solution::default();
/// let cmp = compare(&a, &a);
/// assert!(cmp.same_cost(1e-9));
/// assert_eq!(cmp.vehicle_delta, 0);
/// ```
pub fn compare(candidate: &Solution, reference: &Solution) -> SolutionComparison {
    SolutionComparison {
        cost_delta: candidate.total_cost() - reference.total_cost(),
        fixed_cost_delta: candidate.total_fixed_cost() - reference.total_fixed_cost(),
        fuel_cost_delta: candidate.total_fuel_cost() - reference.total_fuel_cost(),
        vehicle_delta: candidate.vehicle_count() as i64 - reference.vehicle_count() as i64,
        distance_delta: candidate.total_distance() - reference.total_distance(),
    }
}

impl fmt::Display for SolutionComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Cost difference    : {:+}", self.cost_delta)?;
        writeln!(f, "Fixed difference   : {:+}", self.fixed_cost_delta)?;
        writeln!(f, "Fuel difference    : {:+}", self.fuel_cost_delta)?;
        writeln!(f, "Vehicle difference : {:+}", self.vehicle_delta)?;
        write!(f, "Distance difference: {:+}", self.distance_delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Load, Trip};

    fn trip(vehicle: usize, fixed: f64, distance: f64) -> Trip {
        Trip::new(vehicle, vec![0, 1, 0], vec![1], Load::from(vec![1]), distance)
            .with_costs(fixed, distance)
    }

    #[test]
    fn test_deltas() {
        let one = Solution::new(vec![trip(2, 250.0, 175.0)]);
        let two = Solution::new(vec![trip(0, 150.0, 140.0), trip(1, 200.0, 145.0)]);
        let cmp = compare(&one, &two);
        assert_eq!(cmp.cost_delta, 425.0 - 635.0);
        assert_eq!(cmp.fixed_cost_delta, -100.0);
        assert_eq!(cmp.fuel_cost_delta, -110.0);
        assert_eq!(cmp.vehicle_delta, -1);
        assert_eq!(cmp.distance_delta, -110.0);
        assert!(cmp.candidate_is_cheaper(1e-9));
        assert!(!compare(&two, &one).candidate_is_cheaper(1e-9));
    }

    #[test]
    fn test_display_signs() {
        let one = Solution::new(vec![trip(2, 250.0, 175.0)]);
        let text = compare(&one, &Solution::default()).to_string();
        assert!(text.starts_with("Cost difference    : +425"));
        assert!(text.contains("Vehicle difference : +1"));
    }
}
