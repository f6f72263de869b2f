//! Core graph model implementation
//!
//! This module implements the typed relationship graph:
//! - Nodes for investors, firms, companies and sectors
//! - Undirected, typed links with a normalized strength weight
//! - A validated, immutable [`Graph`] value with build-time arena indices

pub mod link;
pub mod node;
pub mod store;
pub mod types;

// Re-export main types
pub use link::Link;
pub use node::Node;
pub use store::{Graph, GraphError, GraphResult};
pub use types::{LinkKind, NodeId, NodeKind, MAX_TIER, MIN_TIER};
