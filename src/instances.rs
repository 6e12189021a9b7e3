//! Ready-made problem instances.
//!
//! - [`reference_problem`] — the seven-node depot instance with two required
//!   waypoints and a five-type fleet
//! - [`random_problem`] — seeded random instances for tests and benchmarks

use rand::Rng;

use crate::distance::DistanceMatrix;
use crate::models::{Node, Problem, VehicleType};

const REFERENCE_DISTANCES: [[f64; 7]; 7] = [
    [0.0, 80.0, 10.0, 15.0, 10.0, 35.0, 30.0],
    [80.0, 0.0, 70.0, 60.0, 50.0, 40.0, 35.0],
    [10.0, 70.0, 0.0, 20.0, 10.0, 40.0, 40.0],
    [15.0, 60.0, 20.0, 0.0, 20.0, 30.0, 20.0],
    [10.0, 50.0, 10.0, 20.0, 0.0, 20.0, 5.0],
    [35.0, 40.0, 40.0, 30.0, 20.0, 0.0, 10.0],
    [30.0, 35.0, 40.0, 20.0, 5.0, 10.0, 0.0],
];

/// The reference instance.
///
/// Node ids: `0` Hub, `1..=4` deliveries A-D with (H, K) demands
/// (1,0), (0,2), (1,2), (1,0), `5` waypoint G, `6` waypoint H. Vehicle
/// types V, W, X, Y, Z carry 2..=6 units of each commodity at fixed costs
/// 150, 200, 250, 350, 600 and a fuel rate of 1.
///
/// # Examples
///
/// ```
/// use u_fleet::instances::reference_problem;
///
/// let p = reference_problem();
/// assert_eq!(p.deliveries(), &[1, 2, 3, 4]);
/// assert_eq!(p.waypoints(), &[5, 6]);
/// assert_eq!(p.vehicles().len(), 5);
/// ```
pub fn reference_problem() -> Problem {
    let nodes = vec![
        Node::hub(0, "Hub"),
        Node::delivery(1, "A", vec![1, 0]),
        Node::delivery(2, "B", vec![0, 2]),
        Node::delivery(3, "C", vec![1, 2]),
        Node::delivery(4, "D", vec![1, 0]),
        Node::waypoint(5, "G"),
        Node::waypoint(6, "H"),
    ];
    let mut distances = DistanceMatrix::new(REFERENCE_DISTANCES.len());
    for (i, row) in REFERENCE_DISTANCES.iter().enumerate() {
        for (j, &d) in row.iter().enumerate() {
            distances.set(i, j, d);
        }
    }
    let vehicles = [
        ("V", 150.0, 2),
        ("W", 200.0, 3),
        ("X", 250.0, 4),
        ("Y", 350.0, 5),
        ("Z", 600.0, 6),
    ]
    .into_iter()
    .map(|(name, fixed, cap)| {
        VehicleType::new(name, vec![cap, cap])
            .with_fixed_cost(fixed)
            .with_cost_per_distance(1.0)
    })
    .collect();

    match Problem::new(2, nodes, distances, vehicles) {
        Ok(problem) => problem,
        Err(e) => unreachable!("reference instance is well-formed: {e}"),
    }
}

/// Shape of a generated instance.
#[derive(Debug, Clone)]
pub struct RandomInstanceParams {
    pub deliveries: usize,
    pub waypoints: usize,
    pub commodities: usize,
    pub vehicle_types: usize,
    /// Largest per-commodity demand of a single delivery.
    pub max_demand: i32,
    /// Side of the square the locations are scattered over.
    pub extent: f64,
}

impl Default for RandomInstanceParams {
    fn default() -> Self {
        Self {
            deliveries: 5,
            waypoints: 2,
            commodities: 2,
            vehicle_types: 3,
            max_demand: 2,
            extent: 100.0,
        }
    }
}

/// Generates a feasible random instance.
///
/// Locations are scattered uniformly; distances are rounded Euclidean
/// (symmetric, integral). Every delivery has positive demand in at least one
/// commodity and every vehicle type can carry any single delivery, so the
/// instance always has a solution under an unlimited fleet. Fixed costs and
/// fuel rates are integral, which keeps cost arithmetic exact.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use u_fleet::instances::{random_problem, RandomInstanceParams};
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let p = random_problem(&mut rng, &RandomInstanceParams::default());
/// assert_eq!(p.deliveries().len(), 5);
/// assert_eq!(p.waypoints().len(), 2);
/// ```
pub fn random_problem<R: Rng>(rng: &mut R, params: &RandomInstanceParams) -> Problem {
    let n = 1 + params.deliveries + params.waypoints;
    let max_demand = params.max_demand.max(1);
    let commodities = params.commodities.max(1);

    let coords: Vec<(f64, f64)> = (0..n)
        .map(|_| {
            (
                rng.random_range(0.0..params.extent.max(1.0)),
                rng.random_range(0.0..params.extent.max(1.0)),
            )
        })
        .collect();
    let mut distances = DistanceMatrix::new(n);
    for i in 0..n {
        for j in (i + 1)..n {
            let (dx, dy) = (coords[i].0 - coords[j].0, coords[i].1 - coords[j].1);
            distances.set_symmetric(i, j, (dx * dx + dy * dy).sqrt().round());
        }
    }

    let mut nodes = vec![Node::hub(0, "Hub")];
    for d in 0..params.deliveries {
        let mut demand: Vec<i32> = (0..commodities)
            .map(|_| rng.random_range(0..=max_demand))
            .collect();
        if demand.iter().all(|&q| q == 0) {
            let c = rng.random_range(0..commodities);
            demand[c] = 1;
        }
        nodes.push(Node::delivery(1 + d, format!("D{}", d + 1), demand));
    }
    for w in 0..params.waypoints {
        let id = 1 + params.deliveries + w;
        nodes.push(Node::waypoint(id, format!("W{}", w + 1)));
    }

    let vehicles = (0..params.vehicle_types.max(1))
        .map(|v| {
            let capacity: Vec<i32> = (0..commodities)
                .map(|_| rng.random_range(max_demand..=max_demand * 3))
                .collect();
            VehicleType::new(format!("T{}", v + 1), capacity)
                .with_fixed_cost(f64::from(rng.random_range(50..=300i32)))
                .with_cost_per_distance(f64::from(rng.random_range(1..=2i32)))
        })
        .collect();

    match Problem::new(commodities, nodes, distances, vehicles) {
        Ok(problem) => problem,
        Err(e) => unreachable!("generated instance is well-formed: {e}"),
    }
}
