//! JSON problem files.
//!
//! ```json
//! {
//!   "commodities": 2,
//!   "nodes": [
//!     { "name": "Hub", "kind": "hub" },
//!     { "name": "A", "kind": "delivery", "demand": [1, 0] },
//!     { "name": "G", "kind": "waypoint" }
//!   ],
//!   "distances": [[0, 10, 7], [10, 0, 4], [7, 4, 0]],
//!   "vehicles": [
//!     { "name": "V", "capacity": [2, 2], "fixed_cost": 150, "fuel_cost_per_distance": 1 }
//!   ]
//! }
//! ```
//!
//! Node ids are positions in `nodes`.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::distance::DistanceMatrix;
use crate::error::ProblemError;
use crate::models::{Node, NodeKind, Problem, VehicleType};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeConfig {
    pub name: String,
    pub kind: NodeKind,
    #[serde(default)]
    pub demand: Vec<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleConfig {
    pub name: String,
    pub capacity: Vec<i32>,
    #[serde(default)]
    pub fixed_cost: f64,
    #[serde(default = "default_fuel_rate")]
    pub fuel_cost_per_distance: f64,
}

fn default_fuel_rate() -> f64 {
    1.0
}

/// Serialized form of a [`Problem`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemConfig {
    pub commodities: usize,
    pub nodes: Vec<NodeConfig>,
    pub distances: Vec<Vec<f64>>,
    pub vehicles: Vec<VehicleConfig>,
}

impl ProblemConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ProblemError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ProblemError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ProblemError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn to_json_string(&self) -> Result<String, ProblemError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validates and converts into a [`Problem`].
    pub fn into_problem(self) -> Result<Problem, ProblemError> {
        Problem::try_from(self)
    }
}

impl TryFrom<ProblemConfig> for Problem {
    type Error = ProblemError;

    fn try_from(config: ProblemConfig) -> Result<Self, Self::Error> {
        let nodes = config
            .nodes
            .into_iter()
            .enumerate()
            .map(|(id, n)| Node::new(id, n.name, n.kind, n.demand))
            .collect();
        let distances = DistanceMatrix::from_rows(config.distances)?;
        let vehicles = config
            .vehicles
            .into_iter()
            .map(|v| {
                VehicleType::new(v.name, v.capacity)
                    .with_fixed_cost(v.fixed_cost)
                    .with_cost_per_distance(v.fuel_cost_per_distance)
            })
            .collect();
        Problem::new(config.commodities, nodes, distances, vehicles)
    }
}

impl From<&Problem> for ProblemConfig {
    fn from(problem: &Problem) -> Self {
        Self {
            commodities: problem.num_commodities(),
            nodes: problem
                .nodes()
                .iter()
                .map(|n| NodeConfig {
                    name: n.name().to_string(),
                    kind: n.kind(),
                    demand: if n.is_delivery() {
                        n.demand().as_slice().to_vec()
                    } else {
                        Vec::new()
                    },
                })
                .collect(),
            distances: problem.distances().to_rows(),
            vehicles: problem
                .vehicles()
                .iter()
                .map(|v| VehicleConfig {
                    name: v.name().to_string(),
                    capacity: v.capacity().as_slice().to_vec(),
                    fixed_cost: v.fixed_cost(),
                    fuel_cost_per_distance: v.cost_per_distance(),
                })
                .collect(),
        }
    }
}
