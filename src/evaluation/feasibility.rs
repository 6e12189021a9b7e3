//! Capacity feasibility of assigning a node subset to a vehicle.

use crate::models::{Load, Problem, VehicleType};

/// Sums the demand of `nodes` per commodity.
///
/// Non-delivery nodes contribute nothing. Returns `None` when a commodity
/// total overflows `i32`, which exceeds every capacity.
pub fn trip_load<I>(problem: &Problem, nodes: I) -> Option<Load>
where
    I: IntoIterator<Item = usize>,
{
    nodes
        .into_iter()
        .try_fold(Load::zero(problem.num_commodities()), |load, n| {
            load.checked_add(problem.node(n).demand())
        })
}

/// Returns the aggregate load of `nodes` if it fits `vehicle`, `None` otherwise.
///
/// The empty subset is trivially feasible and yields a zero load.
///
/// # Examples
///
/// ```
/// use u_fleet::evaluation::checked_load;
/// use u_fleet::instances::reference_problem;
///
/// let problem = reference_problem();
/// let v = problem.vehicle(0); // capacity (2, 2)
/// let load = checked_load(&problem, v, [1, 4]).unwrap();
/// assert_eq!(load.as_slice(), &[2, 0]);
/// assert!(checked_load(&problem, v, [2, 3]).is_none()); // K = 4
/// ```
pub fn checked_load<I>(problem: &Problem, vehicle: &VehicleType, nodes: I) -> Option<Load>
where
    I: IntoIterator<Item = usize>,
{
    trip_load(problem, nodes).filter(|load| load.fits_within(vehicle.capacity()))
}

/// Returns `true` if `vehicle` can carry the combined demand of `nodes`.
pub fn is_feasible<I>(problem: &Problem, vehicle: &VehicleType, nodes: I) -> bool
where
    I: IntoIterator<Item = usize>,
{
    checked_load(problem, vehicle, nodes).is_some()
}

/// Deliveries that no single vehicle type can carry on its own.
///
/// Any such node makes the instance infeasible regardless of fleet size.
pub fn unservable_deliveries(problem: &Problem) -> Vec<usize> {
    problem
        .deliveries()
        .iter()
        .copied()
        .filter(|&d| {
            let demand = problem.node(d).demand();
            !problem
                .vehicles()
                .iter()
                .any(|v| demand.fits_within(v.capacity()))
        })
        .collect()
}
