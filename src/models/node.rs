//! Nodes of the routing network: the hub, delivery locations, and required waypoints.

use serde::{Deserialize, Serialize};

use super::Load;

/// Role a node plays in every route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Start and end of every route.
    Hub,
    /// Location that must be serviced by exactly one trip.
    Delivery,
    /// Location every trip passes through right before returning to the hub.
    Waypoint,
}

/// A location in a routing problem.
///
/// The node id is its row/column in the distance matrix. Only delivery nodes
/// carry demand.
///
/// # Examples
///
/// ```
/// use u_fleet::models::{Node, NodeKind};
///
/// let hub = Node::hub(0, "Hub");
/// assert_eq!(hub.kind(), NodeKind::Hub);
/// assert!(hub.demand().is_zero());
///
/// let a = Node::delivery(1, "A", vec![1, 0]);
/// assert_eq!(a.id(), 1);
/// assert_eq!(a.demand().get(0), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    id: usize,
    name: String,
    kind: NodeKind,
    demand: Load,
}

impl Node {
    /// Creates a node of the given kind.
    pub fn new(id: usize, name: impl Into<String>, kind: NodeKind, demand: impl Into<Load>) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            demand: demand.into(),
        }
    }

    /// Creates the hub node.
    pub fn hub(id: usize, name: impl Into<String>) -> Self {
        Self::new(id, name, NodeKind::Hub, Load::default())
    }

    /// Creates a delivery node with a per-commodity demand.
    pub fn delivery(id: usize, name: impl Into<String>, demand: impl Into<Load>) -> Self {
        Self::new(id, name, NodeKind::Delivery, demand)
    }

    /// Creates a required waypoint.
    pub fn waypoint(id: usize, name: impl Into<String>) -> Self {
        Self::new(id, name, NodeKind::Waypoint, Load::default())
    }

    /// Node id (matrix index).
    pub fn id(&self) -> usize {
        self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Per-commodity demand (empty for hub and waypoints).
    pub fn demand(&self) -> &Load {
        &self.demand
    }

    pub fn is_delivery(&self) -> bool {
        self.kind == NodeKind::Delivery
    }
}
