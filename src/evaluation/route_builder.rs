//! Minimum-distance ordering of a trip: hub → deliveries → waypoints → hub.
//!
//! # Algorithm
//!
//! Every trip must end by visiting all required waypoints, in any relative
//! order, right before returning to the hub. For a fixed last delivery `j`
//! the cheapest tail is independent of the rest of the route, so it is
//! computed once per candidate last node:
//!
//! ```text
//! tail(j) = min over waypoint orders w of d(j, w1) + d(w1, w2) + ... + d(wm, hub)
//! route   = d(hub, p1) + d(p1, p2) + ... + d(pk-1, pk) + tail(pk)
//! ```
//!
//! [`ExhaustiveRoutePlanner`] walks all delivery orderings lazily;
//! [`HeldKarpRoutePlanner`] solves the same problem with the Held-Karp
//! bitmask DP for larger subsets.

use serde::{Deserialize, Serialize};

use crate::models::Problem;

use super::Permutations;

/// Ordered route for one trip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutePlan {
    deliveries: Vec<usize>,
    waypoints: Vec<usize>,
    distance: f64,
}

impl RoutePlan {
    /// Delivery nodes in visiting order.
    pub fn deliveries(&self) -> &[usize] {
        &self.deliveries
    }

    /// Required waypoints in visiting order.
    pub fn waypoints(&self) -> &[usize] {
        &self.waypoints
    }

    /// Total hub-to-hub distance.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Full node sequence starting and ending at `hub`.
    pub fn path(&self, hub: usize) -> Vec<usize> {
        let mut path = Vec::with_capacity(self.deliveries.len() + self.waypoints.len() + 2);
        path.push(hub);
        path.extend_from_slice(&self.deliveries);
        path.extend_from_slice(&self.waypoints);
        path.push(hub);
        path
    }
}

/// Strategy for ordering the nodes of a single trip.
///
/// Implementations must return the minimum-distance route over all delivery
/// orderings and waypoint orders, or `None` when no route exists (the empty
/// subset has no route: an unused vehicle) or the subset has more than
/// [`max_deliveries`](Self::max_deliveries) nodes.
pub trait RoutePlanner: Send + Sync {
    fn plan(&self, problem: &Problem, deliveries: &[usize]) -> Option<RoutePlan>;

    /// Largest subset this planner will order.
    fn max_deliveries(&self) -> usize;
}

/// Which [`RoutePlanner`] the search uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteStrategy {
    /// All permutations; ties go to the lexicographically first ordering.
    #[default]
    Exhaustive,
    /// Held-Karp dynamic programming, O(2^k · k²) per subset.
    HeldKarp,
}

impl RouteStrategy {
    pub fn planner(self) -> Box<dyn RoutePlanner> {
        match self {
            RouteStrategy::Exhaustive => Box::new(ExhaustiveRoutePlanner),
            RouteStrategy::HeldKarp => Box::new(HeldKarpRoutePlanner),
        }
    }
}

/// Cheapest waypoint order from `last` back to the hub.
///
/// Waypoint orders are tried lexicographically by node id; the first
/// strictly shortest one wins.
pub fn best_tail(problem: &Problem, last: usize) -> (Vec<usize>, f64) {
    let hub = problem.hub();
    let mut orders = Permutations::new(problem.waypoints().to_vec());
    let mut best: Option<(Vec<usize>, f64)> = None;
    while let Some(order) = orders.next_ordering() {
        let mut prev = last;
        let mut dist = 0.0;
        for &w in order {
            dist += problem.distance(prev, w);
            prev = w;
        }
        dist += problem.distance(prev, hub);
        if best.as_ref().map_or(true, |(_, d)| dist < *d) {
            best = Some((order.to_vec(), dist));
        }
    }
    best.unwrap_or_else(|| (Vec::new(), problem.distance(last, hub)))
}

/// Tries every ordering of the deliveries.
///
/// # Examples
///
/// ```
/// use u_fleet::evaluation::{ExhaustiveRoutePlanner, RoutePlanner};
/// use u_fleet::instances::reference_problem;
///
/// let problem = reference_problem();
/// let plan = ExhaustiveRoutePlanner.plan(&problem, &[1, 4]).unwrap();
/// assert_eq!(plan.path(problem.hub()), vec![0, 4, 1, 5, 6, 0]);
/// assert_eq!(plan.distance(), 140.0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ExhaustiveRoutePlanner;

impl ExhaustiveRoutePlanner {
    /// 10! orderings, a few million path evaluations.
    pub const MAX_DELIVERIES: usize = 10;
}

impl RoutePlanner for ExhaustiveRoutePlanner {
    fn plan(&self, problem: &Problem, deliveries: &[usize]) -> Option<RoutePlan> {
        if deliveries.is_empty() || deliveries.len() > Self::MAX_DELIVERIES {
            return None;
        }
        let hub = problem.hub();
        let mut sorted = deliveries.to_vec();
        sorted.sort_unstable();
        let tails: Vec<(Vec<usize>, f64)> =
            sorted.iter().map(|&d| best_tail(problem, d)).collect();

        let mut orderings = Permutations::new(sorted.clone());
        let mut best: Option<(Vec<usize>, usize, f64)> = None;
        while let Some(order) = orderings.next_ordering() {
            let mut dist = problem.distance(hub, order[0]);
            for w in order.windows(2) {
                dist += problem.distance(w[0], w[1]);
            }
            let last = order[order.len() - 1];
            let tail = sorted.binary_search(&last).ok()?;
            dist += tails[tail].1;
            if best.as_ref().map_or(true, |(_, _, d)| dist < *d) {
                best = Some((order.to_vec(), tail, dist));
            }
        }

        best.map(|(order, tail, distance)| RoutePlan {
            deliveries: order,
            waypoints: tails[tail].0.clone(),
            distance,
        })
    }

    fn max_deliveries(&self) -> usize {
        Self::MAX_DELIVERIES
    }
}

/// Held-Karp dynamic program over delivery subsets.
///
/// Finds the same minimum distance as [`ExhaustiveRoutePlanner`]; among
/// equal-length routes the chosen ordering may differ.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeldKarpRoutePlanner;

impl HeldKarpRoutePlanner {
    /// Keeps the `2^k · k` cost and parent tables near a million entries each.
    pub const MAX_DELIVERIES: usize = 16;
}

impl RoutePlanner for HeldKarpRoutePlanner {
    fn plan(&self, problem: &Problem, deliveries: &[usize]) -> Option<RoutePlan> {
        if deliveries.is_empty() || deliveries.len() > Self::MAX_DELIVERIES {
            return None;
        }
        let hub = problem.hub();
        let mut nodes = deliveries.to_vec();
        nodes.sort_unstable();
        let k = nodes.len();
        let full = (1usize << k) - 1;

        // cost[mask * k + j]: shortest hub → (all of mask) path ending at nodes[j]
        let mut cost = vec![f64::INFINITY; (full + 1) * k];
        let mut parent = vec![usize::MAX; (full + 1) * k];
        for (j, &n) in nodes.iter().enumerate() {
            cost[(1 << j) * k + j] = problem.distance(hub, n);
        }
        for mask in 1..=full {
            for j in 0..k {
                let here = cost[mask * k + j];
                if mask & (1 << j) == 0 || !here.is_finite() {
                    continue;
                }
                for next in 0..k {
                    if mask & (1 << next) != 0 {
                        continue;
                    }
                    let m2 = mask | (1 << next);
                    let cand = here + problem.distance(nodes[j], nodes[next]);
                    if cand < cost[m2 * k + next] {
                        cost[m2 * k + next] = cand;
                        parent[m2 * k + next] = j;
                    }
                }
            }
        }

        let mut best: Option<(usize, Vec<usize>, f64)> = None;
        for (j, &n) in nodes.iter().enumerate() {
            let (tail, tail_dist) = best_tail(problem, n);
            let total = cost[full * k + j] + tail_dist;
            if best.as_ref().map_or(true, |(_, _, d)| total < *d) {
                best = Some((j, tail, total));
            }
        }
        let (mut j, waypoints, distance) = best?;

        let mut order = Vec::with_capacity(k);
        let mut mask = full;
        loop {
            order.push(nodes[j]);
            let p = parent[mask * k + j];
            mask &= !(1 << j);
            if p == usize::MAX {
                break;
            }
            j = p;
        }
        order.reverse();

        Some(RoutePlan {
            deliveries: order,
            waypoints,
            distance,
        })
    }

    fn max_deliveries(&self) -> usize {
        Self::MAX_DELIVERIES
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instances::reference_problem;
    use crate::models::{ProblemBuilder, VehicleType};

    #[test]
    fn test_empty_subset_has_no_route() {
        let p = reference_problem();
        assert!(ExhaustiveRoutePlanner.plan(&p, &[]).is_none());
        assert!(HeldKarpRoutePlanner.plan(&p, &[]).is_none());
    }

    #[test]
    fn test_best_tail_picks_shorter_order() {
        let p = reference_problem();
        // from D(4): D→G→H→Hub = 20+10+30 = 60, D→H→G→Hub = 5+10+35 = 50
        let (order, dist) = best_tail(&p, 4);
        assert_eq!(order, vec![6, 5]);
        assert_eq!(dist, 50.0);
        // from A(1): A→G→H→Hub = 40+10+30 = 80, A→H→G→Hub = 35+10+35 = 80, first wins
        let (order, dist) = best_tail(&p, 1);
        assert_eq!(order, vec![5, 6]);
        assert_eq!(dist, 80.0);
    }

    #[test]
    fn test_single_delivery() {
        let p = reference_problem();
        let plan = ExhaustiveRoutePlanner.plan(&p, &[2]).expect("route");
        // Hub→B = 10, B→G→H→Hub = 40+10+30 = 80, B→H→G→Hub = 40+10+35 = 85
        assert_eq!(plan.deliveries(), &[2]);
        assert_eq!(plan.waypoints(), &[5, 6]);
        assert_eq!(plan.distance(), 90.0);
        assert_eq!(plan.path(0), vec![0, 2, 5, 6, 0]);
    }

    #[test]
    fn test_all_deliveries_reference() {
        let p = reference_problem();
        let plan = ExhaustiveRoutePlanner.plan(&p, &[4, 3, 2, 1]).expect("route");
        assert_eq!(plan.path(0), vec![0, 3, 2, 4, 1, 5, 6, 0]);
        assert_eq!(plan.distance(), 175.0);
        assert_eq!(p.distances().path_length(&plan.path(0)), plan.distance());
    }

    #[test]
    fn test_held_karp_matches_exhaustive_distance() {
        let p = reference_problem();
        let subsets: [&[usize]; 6] = [
            &[1],
            &[2, 3],
            &[1, 4],
            &[1, 2, 3],
            &[2, 3, 4],
            &[1, 2, 3, 4],
        ];
        for s in subsets {
            let a = ExhaustiveRoutePlanner.plan(&p, s).expect("route");
            let b = HeldKarpRoutePlanner.plan(&p, s).expect("route");
            assert!((a.distance() - b.distance()).abs() < 1e-9, "subset {s:?}");
            assert_eq!(p.distances().path_length(&b.path(0)), b.distance());
            let mut served = b.deliveries().to_vec();
            served.sort_unstable();
            let mut expected = s.to_vec();
            expected.sort_unstable();
            assert_eq!(served, expected);
        }
    }

    #[test]
    fn test_no_waypoints_returns_straight_to_hub() {
        let mut b = ProblemBuilder::new(1);
        let hub = b.add_hub("Hub");
        let a = b.add_delivery("A", vec![1]);
        let c = b.add_delivery("C", vec![1]);
        b.set_distance(hub, a, 3.0)
            .set_distance(a, c, 4.0)
            .set_distance(c, hub, 5.0);
        b.add_vehicle(VehicleType::new("V", vec![2]));
        let p = b.build().expect("valid");

        let plan = ExhaustiveRoutePlanner.plan(&p, &[a, c]).expect("route");
        assert!(plan.waypoints().is_empty());
        assert_eq!(plan.path(hub), vec![hub, a, c, hub]);
        assert_eq!(plan.distance(), 12.0);
    }

    #[test]
    fn test_asymmetric_distances_respected() {
        let mut b = ProblemBuilder::new(1);
        let hub = b.add_hub("Hub");
        let a = b.add_delivery("A", vec![1]);
        let c = b.add_delivery("C", vec![1]);
        let g = b.add_waypoint("G");
        b.set_distance(hub, a, 10.0)
            .set_distance(hub, c, 10.0)
            .set_directed_distance(a, c, 1.0)
            .set_directed_distance(c, a, 50.0)
            .set_distance(a, g, 5.0)
            .set_distance(c, g, 5.0)
            .set_distance(g, hub, 5.0);
        b.add_vehicle(VehicleType::new("V", vec![2]));
        let p = b.build().expect("valid");

        let plan = ExhaustiveRoutePlanner.plan(&p, &[c, a]).expect("route");
        assert_eq!(plan.path(hub), vec![hub, a, c, g, hub]);
        assert_eq!(plan.distance(), 21.0);
        let hk = HeldKarpRoutePlanner.plan(&p, &[c, a]).expect("route");
        assert_eq!(hk.distance(), 21.0);
    }

    #[test]
    fn test_oversized_subsets_are_refused() {
        let mut b = ProblemBuilder::new(1);
        let hub = b.add_hub("Hub");
        let nodes: Vec<usize> = (0..=HeldKarpRoutePlanner::MAX_DELIVERIES)
            .map(|i| b.add_delivery(&format!("D{i}"), vec![1]))
            .collect();
        for (i, &n) in nodes.iter().enumerate() {
            b.set_distance(hub, n, 10.0);
            for &m in &nodes[i + 1..] {
                b.set_distance(n, m, 1.0);
            }
        }
        b.add_vehicle(VehicleType::new("V", vec![100]));
        let p = b.build().expect("valid");

        let small = &nodes[..ExhaustiveRoutePlanner::MAX_DELIVERIES];
        let big = &nodes[..=ExhaustiveRoutePlanner::MAX_DELIVERIES];
        assert_eq!(ExhaustiveRoutePlanner.max_deliveries(), small.len());
        assert!(ExhaustiveRoutePlanner.plan(&p, big).is_none());
        assert!(HeldKarpRoutePlanner.plan(&p, big).is_some());

        assert_eq!(nodes.len(), HeldKarpRoutePlanner::MAX_DELIVERIES + 1);
        assert!(HeldKarpRoutePlanner.plan(&p, &nodes).is_none());
        let fits = HeldKarpRoutePlanner
            .plan(&p, &nodes[1..])
            .expect("within the limit");
        assert_eq!(fits.distance(), 10.0 + 15.0 + 10.0);
    }

    #[test]
    fn test_strategy_planner() {
        let p = reference_problem();
        for s in [RouteStrategy::Exhaustive, RouteStrategy::HeldKarp] {
            let plan = s.planner().plan(&p, &[1, 2]).expect("route");
            assert!(plan.distance() > 0.0);
        }
        assert_eq!(RouteStrategy::default(), RouteStrategy::Exhaustive);
    }
}
