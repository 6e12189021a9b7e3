//! Validated, immutable routing problem.

use crate::distance::DistanceMatrix;
use crate::error::ProblemError;

use super::{Load, Node, NodeKind, VehicleType};

/// Largest number of delivery nodes the search can index in a bitmask.
pub const MAX_DELIVERIES: usize = 64;

/// Largest roster the search can track in a bitmask.
pub const MAX_VEHICLE_TYPES: usize = 64;

/// A vehicle routing problem instance.
///
/// Holds the nodes (exactly one hub, any number of deliveries and required
/// waypoints), the distance matrix over all nodes, and the ordered vehicle
/// roster. All input checks run in [`Problem::new`]; a constructed problem is
/// never mutated.
///
/// # Examples
///
/// ```
/// use u_fleet::models::{Node, Problem, VehicleType};
/// use u_fleet::distance::DistanceMatrix;
///
/// let nodes = vec![
///     Node::hub(0, "Hub"),
///     Node::delivery(1, "A", vec![1]),
///     Node::waypoint(2, "G"),
/// ];
/// let mut dm = DistanceMatrix::new(3);
/// dm.set_symmetric(0, 1, 10.0);
/// dm.set_symmetric(1, 2, 4.0);
/// dm.set_symmetric(0, 2, 7.0);
/// let vehicles = vec![VehicleType::new("V", vec![2]).with_fixed_cost(100.0)];
///
/// let problem = Problem::new(1, nodes, dm, vehicles).unwrap();
/// assert_eq!(problem.hub(), 0);
/// assert_eq!(problem.deliveries(), &[1]);
/// assert_eq!(problem.waypoints(), &[2]);
/// ```
#[derive(Debug, Clone)]
pub struct Problem {
    commodities: usize,
    nodes: Vec<Node>,
    distances: DistanceMatrix,
    vehicles: Vec<VehicleType>,
    hub: usize,
    deliveries: Vec<usize>,
    waypoints: Vec<usize>,
}

impl Problem {
    /// Validates the input and builds a problem.
    ///
    /// `nodes[i]` must have id `i`; the matrix must cover every node.
    pub fn new(
        commodities: usize,
        nodes: Vec<Node>,
        distances: DistanceMatrix,
        vehicles: Vec<VehicleType>,
    ) -> Result<Self, ProblemError> {
        let mut hub = None;
        let mut deliveries = Vec::new();
        let mut waypoints = Vec::new();

        for (position, node) in nodes.iter().enumerate() {
            if node.id() != position {
                return Err(ProblemError::NodeIdMismatch {
                    position,
                    id: node.id(),
                });
            }
            if let Some(commodity) = node.demand().first_negative() {
                return Err(ProblemError::NegativeDemand {
                    node: position,
                    commodity,
                    value: node.demand().get(commodity),
                });
            }
            match node.kind() {
                NodeKind::Hub => {
                    if let Some(first) = hub {
                        return Err(ProblemError::DuplicateHub {
                            first,
                            second: position,
                        });
                    }
                    hub = Some(position);
                }
                NodeKind::Delivery => {
                    if node.demand().len() != commodities {
                        return Err(ProblemError::DemandArity {
                            node: position,
                            len: node.demand().len(),
                            expected: commodities,
                        });
                    }
                    deliveries.push(position);
                }
                NodeKind::Waypoint => waypoints.push(position),
            }
            if !node.is_delivery() && !node.demand().is_zero() {
                return Err(ProblemError::DemandOnNonDelivery { node: position });
            }
        }

        let hub = hub.ok_or(ProblemError::MissingHub)?;

        if deliveries.len() > MAX_DELIVERIES {
            return Err(ProblemError::TooManyDeliveries {
                count: deliveries.len(),
                max: MAX_DELIVERIES,
            });
        }

        if distances.size() != nodes.len() {
            return Err(ProblemError::MatrixSizeMismatch {
                size: distances.size(),
                nodes: nodes.len(),
            });
        }
        distances.validate()?;

        if vehicles.is_empty() {
            return Err(ProblemError::EmptyFleet);
        }
        if vehicles.len() > MAX_VEHICLE_TYPES {
            return Err(ProblemError::TooManyVehicleTypes {
                count: vehicles.len(),
                max: MAX_VEHICLE_TYPES,
            });
        }
        for vehicle in &vehicles {
            validate_vehicle(vehicle, commodities)?;
        }

        Ok(Self {
            commodities,
            nodes,
            distances,
            vehicles,
            hub,
            deliveries,
            waypoints,
        })
    }

    /// Number of capacity-constrained commodities.
    pub fn num_commodities(&self) -> usize {
        self.commodities
    }

    /// All nodes, indexed by id.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Node with the given id.
    ///
    /// # Panics
    ///
    /// Panics if `id` is out of range.
    pub fn node(&self, id: usize) -> &Node {
        &self.nodes[id]
    }

    /// Name of the node, or a placeholder for an unknown id.
    pub fn node_name(&self, id: usize) -> &str {
        self.nodes.get(id).map_or("?", |n| n.name())
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Id of the hub.
    pub fn hub(&self) -> usize {
        self.hub
    }

    /// Delivery node ids in ascending order.
    pub fn deliveries(&self) -> &[usize] {
        &self.deliveries
    }

    /// Required waypoint ids in ascending order.
    pub fn waypoints(&self) -> &[usize] {
        &self.waypoints
    }

    /// Position of `node` within [`Problem::deliveries`], if it is a delivery.
    pub fn delivery_index(&self, node: usize) -> Option<usize> {
        self.deliveries.binary_search(&node).ok()
    }

    /// The vehicle roster, in input order.
    pub fn vehicles(&self) -> &[VehicleType] {
        &self.vehicles
    }

    /// Vehicle at roster position `index`.
    pub fn vehicle(&self, index: usize) -> &VehicleType {
        &self.vehicles[index]
    }

    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Travel distance from node `from` to node `to`.
    pub fn distance(&self, from: usize, to: usize) -> f64 {
        self.distances.get(from, to)
    }

    /// Demand of every delivery summed per commodity, widened to `i64`.
    pub fn total_demand(&self) -> Vec<i64> {
        let mut total = vec![0i64; self.commodities];
        for &d in &self.deliveries {
            for (c, sum) in total.iter_mut().enumerate() {
                *sum += i64::from(self.nodes[d].demand().get(c));
            }
        }
        total
    }
}

fn validate_vehicle(vehicle: &VehicleType, commodities: usize) -> Result<(), ProblemError> {
    let capacity = vehicle.capacity();
    if capacity.len() != commodities {
        return Err(ProblemError::CapacityArity {
            vehicle: vehicle.name().to_string(),
            len: capacity.len(),
            expected: commodities,
        });
    }
    if let Some(commodity) = capacity.first_negative() {
        return Err(ProblemError::NegativeCapacity {
            vehicle: vehicle.name().to_string(),
            commodity,
            value: capacity.get(commodity),
        });
    }
    for (field, value) in [
        ("fixed cost", vehicle.fixed_cost()),
        ("cost per distance", vehicle.cost_per_distance()),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(ProblemError::InvalidCost {
                vehicle: vehicle.name().to_string(),
                field,
                value,
            });
        }
    }
    Ok(())
}

/// Incremental builder for a [`Problem`].
///
/// Node ids are assigned in insertion order; distances are set afterwards
/// against those ids.
///
/// # Examples
///
/// ```
/// use u_fleet::models::{ProblemBuilder, VehicleType};
///
/// let mut b = ProblemBuilder::new(2);
/// let hub = b.add_hub("Hub");
/// let a = b.add_delivery("A", vec![1, 0]);
/// b.set_distance(hub, a, 12.0);
/// b.add_vehicle(VehicleType::new("V", vec![2, 2]));
///
/// let problem = b.build().unwrap();
/// assert_eq!(problem.distance(a, hub), 12.0);
/// ```
#[derive(Debug, Clone)]
pub struct ProblemBuilder {
    commodities: usize,
    nodes: Vec<Node>,
    edges: Vec<(usize, usize, f64, bool)>,
    vehicles: Vec<VehicleType>,
}

impl ProblemBuilder {
    /// Starts a problem with `commodities` commodities.
    pub fn new(commodities: usize) -> Self {
        Self {
            commodities,
            nodes: Vec::new(),
            edges: Vec::new(),
            vehicles: Vec::new(),
        }
    }

    fn push_node(&mut self, name: &str, kind: NodeKind, demand: Load) -> usize {
        let id = self.nodes.len();
        self.nodes.push(Node::new(id, name, kind, demand));
        id
    }

    /// Adds the hub and returns its id.
    pub fn add_hub(&mut self, name: &str) -> usize {
        self.push_node(name, NodeKind::Hub, Load::default())
    }

    /// Adds a delivery node and returns its id.
    pub fn add_delivery(&mut self, name: &str, demand: impl Into<Load>) -> usize {
        self.push_node(name, NodeKind::Delivery, demand.into())
    }

    /// Adds a required waypoint and returns its id.
    pub fn add_waypoint(&mut self, name: &str) -> usize {
        self.push_node(name, NodeKind::Waypoint, Load::default())
    }

    /// Appends a vehicle to the roster.
    pub fn add_vehicle(&mut self, vehicle: VehicleType) -> &mut Self {
        self.vehicles.push(vehicle);
        self
    }

    /// Sets a symmetric distance between two nodes.
    pub fn set_distance(&mut self, a: usize, b: usize, distance: f64) -> &mut Self {
        self.edges.push((a, b, distance, true));
        self
    }

    /// Sets a one-way distance.
    pub fn set_directed_distance(&mut self, from: usize, to: usize, distance: f64) -> &mut Self {
        self.edges.push((from, to, distance, false));
        self
    }

    /// Validates and builds the problem.
    ///
    /// Every ordered pair of distinct nodes needs a distance, either from
    /// [`set_distance`](Self::set_distance) or a directed entry; the first
    /// unset pair is reported as [`ProblemError::MissingDistance`].
    pub fn build(&self) -> Result<Problem, ProblemError> {
        let size = self.nodes.len();
        let mut distances = DistanceMatrix::new(size);
        let mut given = vec![false; size * size];
        for &(a, b, d, symmetric) in &self.edges {
            if a >= size || b >= size {
                return Err(ProblemError::MatrixSizeMismatch {
                    size,
                    nodes: a.max(b) + 1,
                });
            }
            if symmetric {
                distances.set_symmetric(a, b, d);
                given[b * size + a] = true;
            } else {
                distances.set(a, b, d);
            }
            given[a * size + b] = true;
        }
        let problem = Problem::new(
            self.commodities,
            self.nodes.clone(),
            distances,
            self.vehicles.clone(),
        )?;
        for from in 0..size {
            for to in (0..size).filter(|&to| to != from) {
                if !given[from * size + to] {
                    return Err(ProblemError::MissingDistance { from, to });
                }
            }
        }
        Ok(problem)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> ProblemBuilder {
        let mut b = ProblemBuilder::new(2);
        let hub = b.add_hub("Hub");
        let a = b.add_delivery("A", vec![1, 0]);
        let bb = b.add_delivery("B", vec![0, 2]);
        let g = b.add_waypoint("G");
        b.set_distance(hub, a, 10.0)
            .set_distance(hub, bb, 12.0)
            .set_distance(a, bb, 5.0)
            .set_distance(a, g, 3.0)
            .set_distance(bb, g, 4.0)
            .set_distance(g, hub, 8.0);
        b.add_vehicle(VehicleType::new("V", vec![2, 2]).with_fixed_cost(100.0));
        b
    }

    #[test]
    fn test_build_partitions_nodes() {
        let p = builder().build().expect("valid");
        assert_eq!(p.num_nodes(), 4);
        assert_eq!(p.num_commodities(), 2);
        assert_eq!(p.hub(), 0);
        assert_eq!(p.deliveries(), &[1, 2]);
        assert_eq!(p.waypoints(), &[3]);
        assert_eq!(p.delivery_index(2), Some(1));
        assert_eq!(p.delivery_index(3), None);
        assert_eq!(p.node_name(3), "G");
        assert_eq!(p.node_name(99), "?");
        assert_eq!(p.total_demand().as_slice(), &[1, 2]);
        assert_eq!(p.distance(3, 0), 8.0);
    }

    #[test]
    fn test_missing_hub() {
        let mut b = ProblemBuilder::new(1);
        b.add_delivery("A", vec![1]);
        b.add_vehicle(VehicleType::new("V", vec![1]));
        assert!(matches!(b.build(), Err(ProblemError::MissingHub)));
    }

    #[test]
    fn test_duplicate_hub() {
        let mut b = ProblemBuilder::new(1);
        b.add_hub("H1");
        b.add_hub("H2");
        b.add_vehicle(VehicleType::new("V", vec![1]));
        assert!(matches!(
            b.build(),
            Err(ProblemError::DuplicateHub { first: 0, second: 1 })
        ));
    }

    #[test]
    fn test_empty_fleet() {
        let mut b = ProblemBuilder::new(1);
        b.add_hub("Hub");
        assert!(matches!(b.build(), Err(ProblemError::EmptyFleet)));
    }

    #[test]
    fn test_negative_demand() {
        let mut b = builder();
        b.add_delivery("C", vec![0, -1]);
        assert!(matches!(
            b.build(),
            Err(ProblemError::NegativeDemand {
                node: 4,
                commodity: 1,
                value: -1
            })
        ));
    }

    #[test]
    fn test_demand_arity() {
        let mut b = builder();
        b.add_delivery("C", vec![1]);
        assert!(matches!(
            b.build(),
            Err(ProblemError::DemandArity { node: 4, .. })
        ));
    }

    #[test]
    fn test_capacity_checks() {
        let mut b = builder();
        b.add_vehicle(VehicleType::new("bad", vec![1, -1]));
        assert!(matches!(
            b.build(),
            Err(ProblemError::NegativeCapacity { commodity: 1, .. })
        ));

        let mut b = builder();
        b.add_vehicle(VehicleType::new("short", vec![1]));
        assert!(matches!(b.build(), Err(ProblemError::CapacityArity { .. })));

        let mut b = builder();
        b.add_vehicle(VehicleType::new("neg", vec![1, 1]).with_fixed_cost(-5.0));
        assert!(matches!(
            b.build(),
            Err(ProblemError::InvalidCost {
                field: "fixed cost",
                ..
            })
        ));
    }

    #[test]
    fn test_negative_distance_rejected() {
        let mut b = builder();
        b.set_directed_distance(1, 2, -3.0);
        assert!(matches!(
            b.build(),
            Err(ProblemError::InvalidDistance { from: 1, to: 2, .. })
        ));
    }

    #[test]
    fn test_missing_distances_rejected() {
        let mut b = ProblemBuilder::new(1);
        let hub = b.add_hub("Hub");
        let a = b.add_delivery("A", vec![1]);
        b.add_delivery("B", vec![1]);
        b.set_distance(hub, a, 10.0);
        b.add_vehicle(VehicleType::new("V", vec![2]));
        assert!(matches!(
            b.build(),
            Err(ProblemError::MissingDistance { from: 0, to: 2 })
        ));

        // one direction of an asymmetric pair is not enough
        let mut b = builder();
        let c = b.add_delivery("C", vec![1, 0]);
        for n in 0..c {
            b.set_distance(n, c, 2.0);
        }
        assert!(b.build().is_ok());
        let mut b = builder();
        let c = b.add_delivery("C", vec![1, 0]);
        for n in 0..c {
            b.set_directed_distance(n, c, 2.0);
        }
        assert!(matches!(
            b.build(),
            Err(ProblemError::MissingDistance { from: 4, to: 0 })
        ));
    }

    #[test]
    fn test_matrix_size_mismatch() {
        let nodes = vec![Node::hub(0, "Hub"), Node::delivery(1, "A", vec![1])];
        let err = Problem::new(
            1,
            nodes,
            DistanceMatrix::new(3),
            vec![VehicleType::new("V", vec![1])],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ProblemError::MatrixSizeMismatch { size: 3, nodes: 2 }
        ));
    }

    #[test]
    fn test_node_id_mismatch() {
        let nodes = vec![Node::hub(0, "Hub"), Node::delivery(5, "A", vec![1])];
        let err = Problem::new(
            1,
            nodes,
            DistanceMatrix::new(2),
            vec![VehicleType::new("V", vec![1])],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ProblemError::NodeIdMismatch { position: 1, id: 5 }
        ));
    }

    #[test]
    fn test_demand_on_waypoint_rejected() {
        let nodes = vec![
            Node::hub(0, "Hub"),
            Node::new(1, "G", NodeKind::Waypoint, vec![1]),
        ];
        let err = Problem::new(
            1,
            nodes,
            DistanceMatrix::new(2),
            vec![VehicleType::new("V", vec![1])],
        )
        .unwrap_err();
        assert!(matches!(err, ProblemError::DemandOnNonDelivery { node: 1 }));
    }

    #[test]
    fn test_too_many_deliveries() {
        let mut b = ProblemBuilder::new(1);
        b.add_hub("Hub");
        for i in 0..=MAX_DELIVERIES {
            b.add_delivery(&format!("D{i}"), vec![1]);
        }
        b.add_vehicle(VehicleType::new("V", vec![1]));
        assert!(matches!(
            b.build(),
            Err(ProblemError::TooManyDeliveries { count: 65, max: 64 })
        ));
    }
}
