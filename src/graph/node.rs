//! Node implementation for the relationship graph

use super::types::{NodeId, NodeKind};
use serde::{Deserialize, Serialize};

/// A node in the relationship graph
///
/// Nodes carry:
/// - A unique ID and display name
/// - A kind (investor, firm, company, sector)
/// - A tier (1 = most influential) driving rendered size and repulsion
/// - An importance value, with an optional explicit investment count
/// - Optional sector group, location and firm affiliation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier for this node
    pub id: NodeId,

    /// Display label
    pub name: String,

    /// Node kind
    pub kind: NodeKind,

    /// Influence tier, 1..=3 (1 = most influential)
    pub tier: u8,

    /// Scalar importance measure, used when `investment_count` is absent
    pub value: f64,

    /// Count of investments attributed to this node
    pub investment_count: Option<u32>,

    /// Categorical tag (sector name) used by the sector filter
    pub group: Option<String>,

    /// Location string used by the location filter
    pub location: Option<String>,

    /// Firm affiliation, populated for investor nodes
    pub firm_name: Option<String>,
}

impl Node {
    /// Create a new node with default tier 3 and unit value
    pub fn new(id: impl Into<NodeId>, name: impl Into<String>, kind: NodeKind) -> Self {
        Node {
            id: id.into(),
            name: name.into(),
            kind,
            tier: 3,
            value: 1.0,
            investment_count: None,
            group: None,
            location: None,
            firm_name: None,
        }
    }

    pub fn with_tier(mut self, tier: u8) -> Self {
        self.tier = tier;
        self
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.value = value;
        self
    }

    pub fn with_investment_count(mut self, count: u32) -> Self {
        self.investment_count = Some(count);
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_firm_name(mut self, firm_name: impl Into<String>) -> Self {
        self.firm_name = Some(firm_name.into());
        self
    }

    /// The measure the layout sizes this node by: the investment count when
    /// present, the scalar value otherwise.
    pub fn importance(&self) -> f64 {
        match self.investment_count {
            Some(count) => count as f64,
            None => self.value,
        }
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Node {}

impl std::hash::Hash for Node {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_node_defaults() {
        let node = Node::new("investor_1", "Alice Chen", NodeKind::Investor);
        assert_eq!(node.id, NodeId::new("investor_1"));
        assert_eq!(node.tier, 3);
        assert_eq!(node.value, 1.0);
        assert!(node.investment_count.is_none());
    }

    #[test]
    fn test_builder_chain() {
        let node = Node::new("firm_9", "Meridian Capital", NodeKind::Firm)
            .with_tier(1)
            .with_investment_count(84)
            .with_group("Fintech")
            .with_location("New York");

        assert_eq!(node.tier, 1);
        assert_eq!(node.investment_count, Some(84));
        assert_eq!(node.group.as_deref(), Some("Fintech"));
        assert_eq!(node.location.as_deref(), Some("New York"));
    }

    #[test]
    fn test_importance_prefers_investment_count() {
        let by_value = Node::new("a", "A", NodeKind::Investor).with_value(12.5);
        assert_eq!(by_value.importance(), 12.5);

        let by_count = by_value.clone().with_investment_count(40);
        assert_eq!(by_count.importance(), 40.0);
    }

    #[test]
    fn test_node_equality_by_id() {
        let node1 = Node::new("investor_7", "Dana", NodeKind::Investor);
        let node2 = Node::new("investor_7", "Dana K.", NodeKind::Investor).with_tier(1);
        let node3 = Node::new("investor_8", "Dana", NodeKind::Investor);

        assert_eq!(node1, node2); // Same ID
        assert_ne!(node1, node3); // Different ID
    }
}
