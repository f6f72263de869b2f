//! Warm-introduction pathfinding
//!
//! Ranks candidate introduction chains between two nodes. Users want the
//! *easiest* route to a referral, not the fewest hops: a two-hop path through
//! a weak acquaintance is worse than a three-hop path through two strong
//! relationships. Each traversal therefore costs `multiplier(kind) /
//! strength`, and the search is a hop-bounded cheapest-path run in the
//! `venturegraph-algorithms` crate; this module is the integration/adapter
//! layer between the typed [`Graph`] and that crate's dense views.

use crate::graph::{Graph, LinkKind, NodeId};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use venturegraph_algorithms::{dijkstra_bounded, k_cheapest_paths, GraphView, PathResult};

#[derive(Error, Debug, PartialEq)]
pub enum PathError {
    #[error("node {0} not found in graph")]
    UnknownNode(NodeId),

    #[error("max_hops must be at least 1")]
    InvalidMaxHops,

    #[error("k must be at least 1")]
    InvalidK,

    #[error("cost multiplier for {0} must be positive and finite")]
    InvalidMultiplier(LinkKind),
}

/// Per-kind traversal cost multipliers
///
/// Colleagues are easier introducers than shared-sector strangers, so
/// colleague edges are discounted and sector-only edges surcharged. The exact
/// values are tunable product parameters; tests pin the defaults as
/// constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostModel {
    pub investment: f64,
    pub co_investment: f64,
    pub firm_colleague: f64,
    pub board_member: f64,
    pub sector: f64,
}

impl Default for CostModel {
    fn default() -> Self {
        CostModel {
            investment: 1.0,
            co_investment: 0.9,
            firm_colleague: 0.7,
            board_member: 0.8,
            sector: 1.5,
        }
    }
}

impl CostModel {
    /// All kinds weighted equally; hop cost is then purely 1/strength
    pub fn uniform() -> Self {
        CostModel {
            investment: 1.0,
            co_investment: 1.0,
            firm_colleague: 1.0,
            board_member: 1.0,
            sector: 1.0,
        }
    }

    pub fn multiplier(&self, kind: LinkKind) -> f64 {
        match kind {
            LinkKind::Investment => self.investment,
            LinkKind::CoInvestment => self.co_investment,
            LinkKind::FirmColleague => self.firm_colleague,
            LinkKind::BoardMember => self.board_member,
            LinkKind::Sector => self.sector,
        }
    }

    /// Traversal cost of one edge: stronger ties are cheaper
    pub fn edge_cost(&self, kind: LinkKind, strength: f64) -> f64 {
        self.multiplier(kind) / strength
    }

    pub fn validate(&self) -> Result<(), PathError> {
        for kind in LinkKind::ALL {
            let m = self.multiplier(kind);
            if !(m.is_finite() && m > 0.0) {
                return Err(PathError::InvalidMultiplier(kind));
            }
        }
        Ok(())
    }
}

/// Search bounds for an introduction query
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntroOptions {
    /// Hop budget; paths longer than this are not considered
    pub max_hops: usize,
    /// Number of ranked alternatives to return
    pub k: usize,
}

impl Default for IntroOptions {
    fn default() -> Self {
        IntroOptions { max_hops: 3, k: 1 }
    }
}

impl IntroOptions {
    pub fn validate(&self) -> Result<(), PathError> {
        if self.max_hops == 0 {
            return Err(PathError::InvalidMaxHops);
        }
        if self.k == 0 {
            return Err(PathError::InvalidK);
        }
        Ok(())
    }
}

/// A ranked introduction chain from source to target
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntroPath {
    /// Node ids from source to target inclusive
    pub nodes: Vec<NodeId>,
    /// Sum of per-edge costs
    pub total_cost: f64,
    pub hop_count: usize,
    /// Link kinds traversed, in order, for display
    pub narrative: Vec<LinkKind>,
}

/// Dense view plus the kind of the cheapest edge per ordered pair
struct ViewBundle {
    view: GraphView,
    kinds: FxHashMap<(usize, usize), LinkKind>,
}

/// Project the typed graph into an undirected dense view.
///
/// Multiple links between a pair collapse to the cheapest edge; its kind is
/// what the narrative reports. Adjacency lists are sorted by neighbor index
/// so equal-cost ties resolve the same way on every run.
fn build_view(graph: &Graph, cost: &CostModel) -> ViewBundle {
    let n = graph.node_count();
    let mut best: FxHashMap<(usize, usize), (f64, LinkKind)> = FxHashMap::default();

    for link in graph.links() {
        // Endpoints resolve; the graph validated them at build time
        let (Some(s), Some(t)) = (graph.index_of(&link.source), graph.index_of(&link.target))
        else {
            continue;
        };
        let edge_cost = cost.edge_cost(link.kind, link.strength);
        for key in [(s, t), (t, s)] {
            let better = match best.get(&key) {
                Some((existing, _)) => edge_cost < *existing,
                None => true,
            };
            if better {
                best.insert(key, (edge_cost, link.kind));
            }
        }
    }

    let mut adjacency: Vec<Vec<(usize, f64)>> = vec![Vec::new(); n];
    let mut kinds = FxHashMap::default();
    for (&(u, v), &(edge_cost, kind)) in &best {
        adjacency[u].push((v, edge_cost));
        kinds.insert((u, v), kind);
    }
    for neighbors in adjacency.iter_mut() {
        neighbors.sort_by(|a, b| a.0.cmp(&b.0));
    }

    ViewBundle {
        view: GraphView::from_adjacency(adjacency),
        kinds,
    }
}

/// Find up to `options.k` cheapest introduction paths, best first, ties
/// broken by ascending hop count.
///
/// `source == target` yields the trivial zero-hop path. An unreachable
/// target within `max_hops` yields an empty list; that is an expected
/// outcome, not an error.
pub fn find_introductions(
    graph: &Graph,
    source: &NodeId,
    target: &NodeId,
    cost: &CostModel,
    options: &IntroOptions,
) -> Result<Vec<IntroPath>, PathError> {
    options.validate()?;
    cost.validate()?;

    let source_idx = graph
        .index_of(source)
        .ok_or_else(|| PathError::UnknownNode(source.clone()))?;
    let target_idx = graph
        .index_of(target)
        .ok_or_else(|| PathError::UnknownNode(target.clone()))?;

    if source_idx == target_idx {
        return Ok(vec![IntroPath {
            nodes: vec![source.clone()],
            total_cost: 0.0,
            hop_count: 0,
            narrative: Vec::new(),
        }]);
    }

    let bundle = build_view(graph, cost);
    let results: Vec<PathResult> = if options.k == 1 {
        dijkstra_bounded(&bundle.view, source_idx, target_idx, options.max_hops)
            .into_iter()
            .collect()
    } else {
        k_cheapest_paths(
            &bundle.view,
            source_idx,
            target_idx,
            options.k,
            options.max_hops,
        )
    };

    let ids: Vec<NodeId> = graph.nodes().map(|n| n.id.clone()).collect();
    let paths: Vec<IntroPath> = results
        .into_iter()
        .map(|result| {
            let narrative = result
                .path
                .windows(2)
                .map(|pair| bundle.kinds[&(pair[0], pair[1])])
                .collect();
            IntroPath {
                nodes: result.path.iter().map(|&idx| ids[idx].clone()).collect(),
                total_cost: result.cost,
                hop_count: result.hops,
                narrative,
            }
        })
        .collect();

    debug!(
        source = %source,
        target = %target,
        max_hops = options.max_hops,
        found = paths.len(),
        "introduction search finished"
    );

    Ok(paths)
}
