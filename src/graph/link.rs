//! Link implementation for the relationship graph

use super::types::{LinkKind, NodeId};
use serde::{Deserialize, Serialize};

/// An undirected, typed link between two nodes
///
/// Links hold node ids only, never node references; node lifetimes belong to
/// the [`Graph`](super::Graph). `strength` is the normalized (0, 1] weight of
/// the relationship, used both as a physical-force coefficient and as the
/// basis of the path-cost model (higher strength, lower traversal cost).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Link {
    pub source: NodeId,
    pub target: NodeId,
    pub kind: LinkKind,
    pub strength: f64,
}

impl Link {
    pub fn new(
        source: impl Into<NodeId>,
        target: impl Into<NodeId>,
        kind: LinkKind,
        strength: f64,
    ) -> Self {
        Link {
            source: source.into(),
            target: target.into(),
            kind,
            strength,
        }
    }

    /// Whether the link has `id` as either endpoint
    pub fn touches(&self, id: &NodeId) -> bool {
        &self.source == id || &self.target == id
    }

    /// The opposite endpoint, if `id` is one of the two
    pub fn other_end(&self, id: &NodeId) -> Option<&NodeId> {
        if &self.source == id {
            Some(&self.target)
        } else if &self.target == id {
            Some(&self.source)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        let link = Link::new("a", "b", LinkKind::CoInvestment, 0.9);
        let a = NodeId::new("a");
        let b = NodeId::new("b");
        let c = NodeId::new("c");

        assert!(link.touches(&a));
        assert!(link.touches(&b));
        assert!(!link.touches(&c));

        assert_eq!(link.other_end(&a), Some(&b));
        assert_eq!(link.other_end(&b), Some(&a));
        assert_eq!(link.other_end(&c), None);
    }
}
