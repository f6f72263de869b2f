//! Venturegraph Relationship Graph Engine
//!
//! Turns a flat list of investors, firms, companies and sectors plus their
//! pairwise relationships into:
//!
//! - a validated, typed, immutable graph ([`graph`])
//! - a filtered view via a fixed-order predicate pipeline ([`filter`])
//! - a 2-D force-directed layout ([`layout`])
//! - ranked "warm introduction" paths between two people ([`algo`])
//!
//! The engine is pure computation: it consumes already-joined records from
//! the data layer ([`records`]) and hands graphs, position maps and ranked
//! paths to a presentation adapter. Rendering, transport and persistence
//! live elsewhere.
//!
//! # Example Usage
//!
//! ```rust
//! use venturegraph::algo::{find_introductions, CostModel, IntroOptions};
//! use venturegraph::graph::{Graph, Link, LinkKind, Node, NodeKind};
//! use venturegraph::layout::{simulate, LayoutConfig};
//!
//! let nodes = vec![
//!     Node::new("inv_a", "Alice Chen", NodeKind::Investor).with_tier(1),
//!     Node::new("inv_b", "Bo Lin", NodeKind::Investor).with_tier(2),
//!     Node::new("firm_m", "Meridian Capital", NodeKind::Firm).with_tier(1),
//! ];
//! let links = vec![
//!     Link::new("inv_a", "firm_m", LinkKind::FirmColleague, 0.9),
//!     Link::new("inv_b", "firm_m", LinkKind::FirmColleague, 0.7),
//! ];
//!
//! let graph = Graph::build(nodes, links).unwrap();
//!
//! // Positions for drawing
//! let positions = simulate(&graph, LayoutConfig::default()).unwrap();
//! assert_eq!(positions.len(), 3);
//!
//! // Easiest route to a referral
//! let paths = find_introductions(
//!     &graph,
//!     &"inv_a".into(),
//!     &"inv_b".into(),
//!     &CostModel::default(),
//!     &IntroOptions::default(),
//! )
//! .unwrap();
//! assert_eq!(paths[0].hop_count, 2);
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod filter;
pub mod graph;
pub mod layout;
pub mod records;

// Re-export main types for convenience
pub use graph::{
    Graph, GraphError, GraphResult, Link, LinkKind, Node, NodeId, NodeKind,
};

pub use filter::{FilterError, FilterSpec};

pub use layout::{LayoutConfig, LayoutError, Position, Simulation};

pub use algo::{CostModel, IntroOptions, IntroPath, PathError};

pub use records::{LinkRecord, NodeRecord, RecordError, RecordResult};

/// Crate version string
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
