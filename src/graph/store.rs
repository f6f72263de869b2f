//! Immutable graph value and build-time validation
//!
//! A [`Graph`] is constructed once per query from raw node and link records,
//! validated eagerly, and never mutated afterwards. Filtering produces a new
//! `Graph`; the layout simulation copies positions into its own arena. Each
//! node receives a stable dense index at build time, which is what the layout
//! bodies and the pathfinding view are keyed by.

use super::link::Link;
use super::node::Node;
use super::types::{NodeId, MAX_TIER, MIN_TIER};
use indexmap::IndexMap;
use thiserror::Error;
use tracing::debug;

/// Errors raised while building a graph
///
/// All of these are fatal to the build call and identify the offending
/// record; the caller never receives a partially built graph.
#[derive(Error, Debug, PartialEq)]
pub enum GraphError {
    #[error("node id must not be empty")]
    EmptyNodeId,

    #[error("node {0} already exists")]
    DuplicateNode(NodeId),

    #[error("node {node} has tier {tier}, expected 1..=3")]
    InvalidTier { node: NodeId, tier: u8 },

    #[error("link {from} -> {target} references missing node {missing}")]
    DanglingLink {
        from: NodeId,
        target: NodeId,
        missing: NodeId,
    },

    #[error("node {0} links to itself")]
    SelfLoop(NodeId),

    #[error("link {from} -> {target} has strength {strength}, expected (0, 1]")]
    InvalidStrength {
        from: NodeId,
        target: NodeId,
        strength: f64,
    },
}

pub type GraphResult<T> = Result<T, GraphError>;

/// The validated, immutable unit of work
///
/// Owns the node collection (insertion-ordered map by id) and the link
/// collection. Links hold ids only. Per-node degree over the build-time link
/// set is precomputed, and filtered views carry these canonical degrees
/// forward so connectivity always reflects the originally built link set.
#[derive(Debug, Clone)]
pub struct Graph {
    nodes: IndexMap<NodeId, Node>,
    links: Vec<Link>,
    degrees: Vec<usize>,
}

impl Graph {
    /// Validate and assemble a graph from raw nodes and links.
    ///
    /// Fails fast on the first duplicate id, out-of-range tier, dangling
    /// endpoint, self-loop or out-of-range strength.
    pub fn build(nodes: Vec<Node>, links: Vec<Link>) -> GraphResult<Graph> {
        let mut map: IndexMap<NodeId, Node> = IndexMap::with_capacity(nodes.len());

        for node in nodes {
            if node.id.is_empty() {
                return Err(GraphError::EmptyNodeId);
            }
            if !(MIN_TIER..=MAX_TIER).contains(&node.tier) {
                return Err(GraphError::InvalidTier {
                    node: node.id,
                    tier: node.tier,
                });
            }
            let id = node.id.clone();
            if map.insert(id.clone(), node).is_some() {
                return Err(GraphError::DuplicateNode(id));
            }
        }

        let mut degrees = vec![0usize; map.len()];

        for link in &links {
            if !(link.strength.is_finite() && link.strength > 0.0 && link.strength <= 1.0) {
                return Err(GraphError::InvalidStrength {
                    from: link.source.clone(),
                    target: link.target.clone(),
                    strength: link.strength,
                });
            }
            if link.source == link.target {
                return Err(GraphError::SelfLoop(link.source.clone()));
            }

            let source_idx =
                map.get_index_of(&link.source)
                    .ok_or_else(|| GraphError::DanglingLink {
                        from: link.source.clone(),
                        target: link.target.clone(),
                        missing: link.source.clone(),
                    })?;
            let target_idx =
                map.get_index_of(&link.target)
                    .ok_or_else(|| GraphError::DanglingLink {
                        from: link.source.clone(),
                        target: link.target.clone(),
                        missing: link.target.clone(),
                    })?;

            degrees[source_idx] += 1;
            degrees[target_idx] += 1;
        }

        debug!(
            nodes = map.len(),
            links = links.len(),
            "graph built"
        );

        Ok(Graph {
            nodes: map,
            links,
            degrees,
        })
    }

    /// Assemble a filtered view from survivors. The caller (the filter
    /// pipeline) guarantees endpoints resolve and supplies the canonical
    /// degrees carried over from the parent graph.
    pub(crate) fn from_filtered_parts(
        nodes: Vec<Node>,
        links: Vec<Link>,
        degrees: Vec<usize>,
    ) -> Graph {
        let map: IndexMap<NodeId, Node> =
            nodes.into_iter().map(|n| (n.id.clone(), n)).collect();
        Graph {
            nodes: map,
            links,
            degrees,
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Iterate nodes in insertion order (the dense index order)
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Dense arena index assigned to `id` at build time
    pub fn index_of(&self, id: &NodeId) -> Option<usize> {
        self.nodes.get_index_of(id)
    }

    pub fn id_at(&self, index: usize) -> Option<&NodeId> {
        self.nodes.get_index(index).map(|(id, _)| id)
    }

    pub fn node_at(&self, index: usize) -> Option<&Node> {
        self.nodes.get_index(index).map(|(_, node)| node)
    }

    /// Canonical degree: the number of links touching the node in the link
    /// set the graph was originally built from. O(1).
    pub fn degree(&self, id: &NodeId) -> Option<usize> {
        self.index_of(id).map(|idx| self.degrees[idx])
    }

    pub(crate) fn degree_at(&self, index: usize) -> usize {
        self.degrees[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::types::{LinkKind, NodeKind};

    fn sample_nodes() -> Vec<Node> {
        vec![
            Node::new("a", "Alpha Ventures", NodeKind::Firm).with_tier(1),
            Node::new("b", "Bo Lin", NodeKind::Investor).with_tier(2),
            Node::new("c", "Carver Health", NodeKind::Company),
        ]
    }

    #[test]
    fn test_build_and_degrees() {
        let links = vec![
            Link::new("a", "b", LinkKind::FirmColleague, 0.8),
            Link::new("b", "c", LinkKind::Investment, 0.5),
        ];
        let graph = Graph::build(sample_nodes(), links).unwrap();

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.link_count(), 2);
        assert_eq!(graph.degree(&"a".into()), Some(1));
        assert_eq!(graph.degree(&"b".into()), Some(2));
        assert_eq!(graph.degree(&"c".into()), Some(1));
    }

    #[test]
    fn test_dense_indices_follow_insertion_order() {
        let graph = Graph::build(sample_nodes(), Vec::new()).unwrap();
        assert_eq!(graph.index_of(&"a".into()), Some(0));
        assert_eq!(graph.index_of(&"c".into()), Some(2));
        assert_eq!(graph.id_at(1), Some(&NodeId::new("b")));
    }

    #[test]
    fn test_duplicate_node_rejected() {
        let mut nodes = sample_nodes();
        nodes.push(Node::new("a", "Alpha again", NodeKind::Firm));
        let err = Graph::build(nodes, Vec::new()).unwrap_err();
        assert_eq!(err, GraphError::DuplicateNode("a".into()));
    }

    #[test]
    fn test_dangling_link_identifies_missing_id() {
        let links = vec![Link::new("a", "ghost", LinkKind::Investment, 0.4)];
        let err = Graph::build(sample_nodes(), links).unwrap_err();
        assert_eq!(
            err,
            GraphError::DanglingLink {
                from: "a".into(),
                target: "ghost".into(),
                missing: "ghost".into(),
            }
        );
    }

    #[test]
    fn test_self_loop_rejected() {
        let links = vec![Link::new("b", "b", LinkKind::CoInvestment, 0.9)];
        let err = Graph::build(sample_nodes(), links).unwrap_err();
        assert_eq!(err, GraphError::SelfLoop("b".into()));
    }

    #[test]
    fn test_tier_out_of_range_rejected() {
        let nodes = vec![Node::new("x", "X", NodeKind::Investor).with_tier(4)];
        let err = Graph::build(nodes, Vec::new()).unwrap_err();
        assert_eq!(
            err,
            GraphError::InvalidTier {
                node: "x".into(),
                tier: 4
            }
        );
    }

    #[test]
    fn test_strength_out_of_range_rejected() {
        for bad in [0.0, -0.2, 1.5, f64::NAN] {
            let links = vec![Link::new("a", "b", LinkKind::Sector, bad)];
            assert!(Graph::build(sample_nodes(), links).is_err());
        }
    }
}
