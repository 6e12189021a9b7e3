//! Vehicle type with per-commodity capacity and cost parameters.

use serde::{Deserialize, Serialize};

use super::Load;

/// A vehicle type available to the fleet.
///
/// Each trip is driven by one vehicle of a type; using it incurs the fixed
/// cost plus `cost_per_distance` for every unit of distance travelled.
///
/// # Examples
///
/// ```
/// use u_fleet::models::VehicleType;
///
/// let v = VehicleType::new("V", vec![2, 2])
///     .with_fixed_cost(150.0)
///     .with_cost_per_distance(1.0);
/// assert_eq!(v.name(), "V");
/// assert_eq!(v.capacity().as_slice(), &[2, 2]);
/// assert!((v.efficiency() - 4.0 / 150.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleType {
    name: String,
    capacity: Load,
    fixed_cost: f64,
    cost_per_distance: f64,
}

impl VehicleType {
    /// Creates a vehicle type with the given name and capacity.
    ///
    /// Default: no fixed cost, cost_per_distance = 1.0.
    pub fn new(name: impl Into<String>, capacity: impl Into<Load>) -> Self {
        Self {
            name: name.into(),
            capacity: capacity.into(),
            fixed_cost: 0.0,
            cost_per_distance: 1.0,
        }
    }

    /// Sets the fixed cost charged for using this vehicle.
    pub fn with_fixed_cost(mut self, cost: f64) -> Self {
        self.fixed_cost = cost;
        self
    }

    /// Sets the fuel cost per unit distance.
    pub fn with_cost_per_distance(mut self, cost: f64) -> Self {
        self.cost_per_distance = cost;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Per-commodity capacity.
    pub fn capacity(&self) -> &Load {
        &self.capacity
    }

    /// Fixed cost for using this vehicle (independent of distance).
    pub fn fixed_cost(&self) -> f64 {
        self.fixed_cost
    }

    /// Cost per unit distance traveled.
    pub fn cost_per_distance(&self) -> f64 {
        self.cost_per_distance
    }

    /// Fuel cost of travelling `distance`.
    pub fn fuel_cost(&self, distance: f64) -> f64 {
        distance * self.cost_per_distance
    }

    /// Aggregate capacity divided by fixed cost.
    ///
    /// Infinite for a free vehicle with any capacity, zero for a vehicle
    /// with no capacity at all.
    pub fn efficiency(&self) -> f64 {
        let total = self.capacity.total() as f64;
        if total <= 0.0 {
            0.0
        } else if self.fixed_cost <= 0.0 {
            f64::INFINITY
        } else {
            total / self.fixed_cost
        }
    }
}
