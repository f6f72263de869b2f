//! Core type definitions for the relationship graph

use serde::{Deserialize, Serialize};
use std::fmt;

/// Most influential tier
pub const MIN_TIER: u8 = 1;
/// Least influential tier
pub const MAX_TIER: u8 = 3;

/// Unique identifier for a node
///
/// Ids come from the upstream data layer (slugs like `investor_42`) and are
/// opaque to the engine beyond equality and ordering.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        NodeId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        NodeId(id)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        NodeId(id.to_string())
    }
}

/// Node kind (e.g., investor, firm)
///
/// A closed enum rather than a free-form string so per-kind force and cost
/// parameters are matched exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Investor,
    Firm,
    Company,
    Sector,
}

impl NodeKind {
    /// All node kinds, in display order
    pub const ALL: [NodeKind; 4] = [
        NodeKind::Investor,
        NodeKind::Firm,
        NodeKind::Company,
        NodeKind::Sector,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Investor => "investor",
            NodeKind::Firm => "firm",
            NodeKind::Company => "company",
            NodeKind::Sector => "sector",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Link kind (relationship type, e.g., co-investment)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum LinkKind {
    Investment,
    CoInvestment,
    FirmColleague,
    BoardMember,
    Sector,
}

impl LinkKind {
    /// All link kinds, in display order
    pub const ALL: [LinkKind; 5] = [
        LinkKind::Investment,
        LinkKind::CoInvestment,
        LinkKind::FirmColleague,
        LinkKind::BoardMember,
        LinkKind::Sector,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LinkKind::Investment => "investment",
            LinkKind::CoInvestment => "co_investment",
            LinkKind::FirmColleague => "firm_colleague",
            LinkKind::BoardMember => "board_member",
            LinkKind::Sector => "sector",
        }
    }

    /// Default rest length for the layout's link force, in canvas units.
    /// Colleagues sit tightest; shared-sector links are the loosest bond.
    pub fn rest_distance(self) -> f64 {
        match self {
            LinkKind::Investment => 70.0,
            LinkKind::CoInvestment => 60.0,
            LinkKind::FirmColleague => 45.0,
            LinkKind::BoardMember => 55.0,
            LinkKind::Sector => 90.0,
        }
    }
}

impl fmt::Display for LinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
