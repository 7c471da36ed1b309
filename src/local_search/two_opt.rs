//! Intra-route 2-opt improvement.
//!
//! # Algorithm
//!
//! For each pair of positions `i < j` in a route, compute the change in
//! cost from reversing the segment `[i..=j]`:
//!
//! ```text
//! delta = d(prev_i, r[j]) + d(r[i], next_j) - d(prev_i, r[i]) - d(r[j], next_j)
//! ```
//!
//! where `prev_i` / `next_j` fall back to the depot at the route ends. On
//! an asymmetric matrix the cost of traversing the segment backwards is
//! added as well. A reversal is applied only if `delta < 0`; the pass
//! repeats until no reversal improves the route (first improvement).
//!
//! # Complexity
//!
//! O(n²) per sweep on a symmetric matrix, O(n³) on an asymmetric one.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use log::trace;

use crate::distance::CostMatrix;

/// Applies 2-opt to a single route in place until it is 2-opt optimal.
///
/// `nodes` holds the delivery nodes; the depot (node 0) is implicit at
/// both ends. Returns the number of reversals applied.
///
/// # Examples
///
/// ```
/// use u_dispatch::distance::CostMatrix;
/// use u_dispatch::local_search::two_opt_improve;
/// use u_dispatch::models::GeoPoint;
///
/// let points = [
///     GeoPoint::ORIGIN,
///     GeoPoint::new(0.01, 0.0),
///     GeoPoint::new(0.02, 0.0),
///     GeoPoint::new(0.03, 0.0),
/// ];
/// let cm = CostMatrix::from_points(&points, 1.0);
///
/// let mut route = vec![3, 1, 2];
/// let before = cm.tour_cost(&route);
/// assert!(two_opt_improve(&mut route, &cm) > 0);
/// assert!(cm.tour_cost(&route) < before);
/// ```
pub fn two_opt_improve(nodes: &mut [usize], costs: &CostMatrix) -> usize {
    if nodes.len() < 2 {
        return 0;
    }

    let mut applied = 0;
    let mut improved = true;
    while improved {
        improved = false;
        let n = nodes.len();
        for i in 0..n - 1 {
            for j in i + 1..n {
                let delta = two_opt_delta(nodes, costs, i, j);
                if delta < 0 {
                    nodes[i..=j].reverse();
                    applied += 1;
                    improved = true;
                    trace!("2-opt reversed [{i}..={j}], delta {delta}");
                }
            }
        }
    }
    applied
}

/// Cost change from reversing `nodes[i..=j]`.
///
/// Before: `prev_i → r[i] → … → r[j] → next_j`
/// After:  `prev_i → r[j] → … → r[i] → next_j`
pub fn two_opt_delta(nodes: &[usize], costs: &CostMatrix, i: usize, j: usize) -> i64 {
    let n = nodes.len();
    let prev_i = if i == 0 { 0 } else { nodes[i - 1] };
    let next_j = if j == n - 1 { 0 } else { nodes[j + 1] };

    let old_cost = costs.get(prev_i, nodes[i]) + costs.get(nodes[j], next_j);
    let new_cost = costs.get(prev_i, nodes[j]) + costs.get(nodes[i], next_j);
    let mut delta = new_cost - old_cost;

    if !costs.is_symmetric() {
        delta += nodes[i..=j]
            .windows(2)
            .map(|w| costs.get(w[1], w[0]) - costs.get(w[0], w[1]))
            .sum::<i64>();
    }
    delta
}
