//! Hop-bounded weighted pathfinding
//!
//! Shortest-path search over a dense [`GraphView`] where every edge carries a
//! non-negative traversal cost and the caller caps the number of hops. Both
//! entry points treat "no path within the hop budget" as an empty result, not
//! an error.

use super::common::GraphView;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Result of a pathfinding run, expressed in arena indices.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathResult {
    pub path: Vec<usize>,
    pub cost: f64,
    pub hops: usize,
}

/// State for the Dijkstra priority queue
#[derive(Copy, Clone, PartialEq)]
struct State {
    cost: f64,
    hops: usize,
    node: usize,
}

// Rust's BinaryHeap is a max-heap, so Ord is reversed for min-heap behavior.
// Ties on cost break toward fewer hops.
impl Eq for State {}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .partial_cmp(&self.cost)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.hops.cmp(&self.hops))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Dijkstra's algorithm with a hop budget.
///
/// Distance labels are kept per `(node, hops)` so a cheaper-but-longer prefix
/// is not discarded while a shorter prefix could still reach the target
/// within the budget. Costs are non-negative, so the first time the target is
/// popped its cost is globally minimal.
pub fn dijkstra_bounded(
    view: &GraphView,
    source: usize,
    target: usize,
    max_hops: usize,
) -> Option<PathResult> {
    let n = view.node_count;
    if source >= n || target >= n {
        return None;
    }
    if source == target {
        return Some(PathResult {
            path: vec![source],
            cost: 0.0,
            hops: 0,
        });
    }

    // dist[node][hops] = cheapest cost reaching `node` in exactly `hops` hops
    let mut dist = vec![vec![f64::INFINITY; max_hops + 1]; n];
    let mut parent: Vec<Vec<Option<(usize, usize)>>> = vec![vec![None; max_hops + 1]; n];
    let mut heap = BinaryHeap::new();

    dist[source][0] = 0.0;
    heap.push(State {
        cost: 0.0,
        hops: 0,
        node: source,
    });

    while let Some(State { cost, hops, node }) = heap.pop() {
        if node == target {
            // Reconstruct path following (node, hops) labels
            let mut path = Vec::with_capacity(hops + 1);
            let mut curr = Some((target, hops));
            while let Some((idx, h)) = curr {
                path.push(idx);
                curr = parent[idx][h];
            }
            path.reverse();
            return Some(PathResult { path, cost, hops });
        }

        if cost > dist[node][hops] {
            continue;
        }
        if hops == max_hops {
            continue;
        }

        let neighbors = view.neighbors(node);
        let weights = view.edge_weights(node);

        for (i, &next) in neighbors.iter().enumerate() {
            let weight = weights[i];
            if weight < 0.0 {
                continue;
            }

            let next_cost = cost + weight;
            let next_hops = hops + 1;

            if next_cost < dist[next][next_hops] {
                dist[next][next_hops] = next_cost;
                parent[next][next_hops] = Some((node, hops));
                heap.push(State {
                    cost: next_cost,
                    hops: next_hops,
                    node: next,
                });
            }
        }
    }

    None
}

/// Candidate partial path for k-cheapest enumeration
#[derive(Clone, PartialEq)]
struct Candidate {
    cost: f64,
    path: Vec<usize>,
}

impl Candidate {
    fn hops(&self) -> usize {
        self.path.len() - 1
    }
}

impl Eq for Candidate {}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .partial_cmp(&self.cost)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.hops().cmp(&self.hops()))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Up to `k` cheapest *simple* paths from `source` to `target`, ascending by
/// `(cost, hops)`.
///
/// Best-first enumeration over partial simple paths: with non-negative
/// weights, complete paths pop off the frontier in ascending cost order, so
/// the first `k` arrivals at the target are the answer. The hop budget keeps
/// the frontier small at the interactive graph sizes this crate targets.
pub fn k_cheapest_paths(
    view: &GraphView,
    source: usize,
    target: usize,
    k: usize,
    max_hops: usize,
) -> Vec<PathResult> {
    let n = view.node_count;
    if source >= n || target >= n || k == 0 {
        return Vec::new();
    }
    if source == target {
        return vec![PathResult {
            path: vec![source],
            cost: 0.0,
            hops: 0,
        }];
    }

    let mut results = Vec::with_capacity(k);
    let mut heap = BinaryHeap::new();
    heap.push(Candidate {
        cost: 0.0,
        path: vec![source],
    });

    while let Some(candidate) = heap.pop() {
        let last = *candidate.path.last().unwrap();

        if last == target {
            results.push(PathResult {
                hops: candidate.hops(),
                cost: candidate.cost,
                path: candidate.path,
            });
            if results.len() == k {
                break;
            }
            continue;
        }

        if candidate.hops() == max_hops {
            continue;
        }

        let neighbors = view.neighbors(last);
        let weights = view.edge_weights(last);

        for (i, &next) in neighbors.iter().enumerate() {
            let weight = weights[i];
            if weight < 0.0 || candidate.path.contains(&next) {
                continue;
            }

            let mut path = candidate.path.clone();
            path.push(next);
            heap.push(Candidate {
                cost: candidate.cost + weight,
                path,
            });
        }
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_view() -> GraphView {
        // 0 - 1 (10.0), 1 - 2 (5.0), 0 - 2 (50.0)
        GraphView::from_adjacency(vec![
            vec![(1, 10.0), (2, 50.0)],
            vec![(0, 10.0), (2, 5.0)],
            vec![(0, 50.0), (1, 5.0)],
        ])
    }

    #[test]
    fn test_dijkstra_prefers_cheaper_detour() {
        let result = dijkstra_bounded(&line_view(), 0, 2, 3).unwrap();
        assert_eq!(result.path, vec![0, 1, 2]);
        assert_eq!(result.cost, 15.0);
        assert_eq!(result.hops, 2);
    }

    #[test]
    fn test_dijkstra_hop_budget_forces_direct() {
        // One hop only: the expensive direct edge is the sole option
        let result = dijkstra_bounded(&line_view(), 0, 2, 1).unwrap();
        assert_eq!(result.path, vec![0, 2]);
        assert_eq!(result.cost, 50.0);
    }

    #[test]
    fn test_dijkstra_unreachable_within_budget() {
        // 0 - 1 - 2 with no shortcut
        let view = GraphView::from_adjacency(vec![
            vec![(1, 1.0)],
            vec![(0, 1.0), (2, 1.0)],
            vec![(1, 1.0)],
        ]);
        assert!(dijkstra_bounded(&view, 0, 2, 1).is_none());
        assert!(dijkstra_bounded(&view, 0, 2, 2).is_some());
    }

    #[test]
    fn test_dijkstra_trivial_source_is_target() {
        let result = dijkstra_bounded(&line_view(), 1, 1, 3).unwrap();
        assert_eq!(result.path, vec![1]);
        assert_eq!(result.cost, 0.0);
        assert_eq!(result.hops, 0);
    }

    #[test]
    fn test_k_cheapest_ordering() {
        let results = k_cheapest_paths(&line_view(), 0, 2, 2, 3);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].path, vec![0, 1, 2]);
        assert_eq!(results[0].cost, 15.0);
        assert_eq!(results[1].path, vec![0, 2]);
        assert_eq!(results[1].cost, 50.0);
    }

    #[test]
    fn test_k_cheapest_simple_paths_only() {
        // Square: 0-1, 1-2, 2-3, 3-0, all weight 1. Two simple paths 0->2.
        let view = GraphView::from_adjacency(vec![
            vec![(1, 1.0), (3, 1.0)],
            vec![(0, 1.0), (2, 1.0)],
            vec![(1, 1.0), (3, 1.0)],
            vec![(2, 1.0), (0, 1.0)],
        ]);
        let results = k_cheapest_paths(&view, 0, 2, 10, 4);
        assert_eq!(results.len(), 2);
        for result in &results {
            assert_eq!(result.cost, 2.0);
            assert_eq!(result.hops, 2);
        }
    }
}
