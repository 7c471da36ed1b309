//! Route type.

use serde::{Deserialize, Serialize};

/// An ordered sequence of delivery nodes served by one vehicle.
///
/// Nodes are matrix indices (`1..=N`); the depot (node 0) is implicit at
/// both ends and never stored. Every delivery has unit demand, so the
/// route's load equals its length.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::Route;
///
/// let mut route = Route::new(0);
/// route.push(3);
/// route.push(1);
/// assert_eq!(route.nodes(), &[3, 1]);
/// assert_eq!(route.load(), 2);
/// assert_eq!(route.vehicle(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    vehicle: usize,
    nodes: Vec<usize>,
}

impl Route {
    /// Creates an empty route for the vehicle with the given handle.
    pub fn new(vehicle: usize) -> Self {
        Self {
            vehicle,
            nodes: Vec::new(),
        }
    }

    /// Creates a route with an explicit node sequence.
    pub fn with_nodes(vehicle: usize, nodes: Vec<usize>) -> Self {
        Self { vehicle, nodes }
    }

    /// Handle of the owning vehicle (index into the instance fleet).
    pub fn vehicle(&self) -> usize {
        self.vehicle
    }

    /// Ordered delivery nodes, depot excluded.
    pub fn nodes(&self) -> &[usize] {
        &self.nodes
    }

    /// Mutable access to the node sequence.
    pub fn nodes_mut(&mut self) -> &mut Vec<usize> {
        &mut self.nodes
    }

    /// Appends a node at the end of the route.
    pub fn push(&mut self, node: usize) {
        self.nodes.push(node);
    }

    /// Inserts a node at `pos`.
    pub fn insert(&mut self, pos: usize, node: usize) {
        self.nodes.insert(pos, node);
    }

    /// Removes and returns the node at `pos`.
    pub fn remove(&mut self, pos: usize) -> usize {
        self.nodes.remove(pos)
    }

    /// Number of deliveries on the route.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the route serves nothing.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Capacity units consumed.
    pub fn load(&self) -> i32 {
        i32::try_from(self.nodes.len()).unwrap_or(i32::MAX)
    }

    /// Last node before returning to the depot (0 when empty).
    pub fn tail(&self) -> usize {
        self.nodes.last().copied().unwrap_or(0)
    }

    /// Delivery indices (0-based into the input list) in visit order.
    pub fn delivery_indices(&self) -> Vec<usize> {
        self.nodes.iter().map(|&n| n - 1).collect()
    }
}
