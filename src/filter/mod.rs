//! Filter pipeline
//!
//! Applies a [`FilterSpec`] to a graph in a fixed, dependency-respecting
//! order: node predicates first, then link predicates restricted to links
//! whose endpoints both survived. The order is part of the observable
//! contract and must not change:
//!
//! 1. node kind filter
//! 2. node attribute filters (sector, location, tier range)
//! 3. degree filter against the canonical (build-time) degree
//! 4. link kind / strength filters over surviving endpoints
//!
//! Degree is evaluated against the link set the graph was originally built
//! from, carried through filtered views, so a node held only by weak or
//! disallowed-kind links still counts them toward `min_connections`, and
//! re-applying a spec to its own output is a no-op.

use crate::graph::{Graph, LinkKind, Node, NodeKind, MAX_TIER, MIN_TIER};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;
use tracing::debug;

/// Errors raised by filter-spec validation, before any computation starts
#[derive(Error, Debug, PartialEq)]
pub enum FilterError {
    #[error("tier range {min}..={max} is outside 1..=3 or inverted")]
    InvalidTierRange { min: u8, max: u8 },

    #[error("min_strength {0} must be a finite, non-negative number")]
    InvalidMinStrength(f64),
}

/// Immutable description of which nodes and links remain visible
///
/// The default spec passes everything through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Keep only nodes of this kind; `None` keeps all kinds
    pub kind: Option<NodeKind>,
    /// Minimum canonical degree a node must have to survive
    pub min_connections: usize,
    /// Exact match against a node's `group`
    pub sector: Option<String>,
    /// Exact match against a node's `location`
    pub location: Option<String>,
    /// Inclusive tier bounds, both in 1..=3
    pub tier_range: (u8, u8),
    /// Link kinds allowed through; an empty set yields zero links
    pub link_kinds: BTreeSet<LinkKind>,
    /// Minimum link strength allowed through
    pub min_strength: f64,
}

impl Default for FilterSpec {
    fn default() -> Self {
        FilterSpec {
            kind: None,
            min_connections: 0,
            sector: None,
            location: None,
            tier_range: (MIN_TIER, MAX_TIER),
            link_kinds: LinkKind::ALL.into_iter().collect(),
            min_strength: 0.0,
        }
    }
}

impl FilterSpec {
    pub fn validate(&self) -> Result<(), FilterError> {
        let (min, max) = self.tier_range;
        if min < MIN_TIER || max > MAX_TIER || min > max {
            return Err(FilterError::InvalidTierRange { min, max });
        }
        if !self.min_strength.is_finite() || self.min_strength < 0.0 {
            return Err(FilterError::InvalidMinStrength(self.min_strength));
        }
        Ok(())
    }

    fn node_survives(&self, node: &Node) -> bool {
        if let Some(kind) = self.kind {
            if node.kind != kind {
                return false;
            }
        }
        if let Some(sector) = &self.sector {
            if node.group.as_deref() != Some(sector.as_str()) {
                return false;
            }
        }
        if let Some(location) = &self.location {
            if node.location.as_deref() != Some(location.as_str()) {
                return false;
            }
        }
        let (min, max) = self.tier_range;
        (min..=max).contains(&node.tier)
    }
}

/// Apply `spec` to `graph`, producing a new graph view of the survivors
pub fn apply(graph: &Graph, spec: &FilterSpec) -> Result<Graph, FilterError> {
    spec.validate()?;

    // Steps 1-3: node predicates, then the degree gate. Degree uses the
    // canonical build-time count, not the post-filter link set.
    let mut nodes = Vec::new();
    let mut degrees = Vec::new();
    let mut survivors: FxHashSet<usize> = FxHashSet::default();

    for (index, node) in graph.nodes().enumerate() {
        if !spec.node_survives(node) {
            continue;
        }
        if graph.degree_at(index) < spec.min_connections {
            continue;
        }
        survivors.insert(index);
        nodes.push(node.clone());
        degrees.push(graph.degree_at(index));
    }

    // Step 4: link predicates, only over links whose endpoints both survived
    let links: Vec<_> = graph
        .links()
        .iter()
        .filter(|link| {
            let source_idx = graph.index_of(&link.source);
            let target_idx = graph.index_of(&link.target);
            match (source_idx, target_idx) {
                (Some(s), Some(t)) => {
                    survivors.contains(&s)
                        && survivors.contains(&t)
                        && spec.link_kinds.contains(&link.kind)
                        && link.strength >= spec.min_strength
                }
                _ => false,
            }
        })
        .cloned()
        .collect();

    debug!(
        nodes_in = graph.node_count(),
        nodes_out = nodes.len(),
        links_in = graph.link_count(),
        links_out = links.len(),
        "filter applied"
    );

    Ok(Graph::from_filtered_parts(nodes, links, degrees))
}
