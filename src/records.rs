//! Raw-record adapter
//!
//! The surrounding product stores investors, firms, companies and sectors
//! relationally and hands the engine flat, already-joined arrays. This module
//! is the typed boundary for that input: serde-deserializable record shapes,
//! defaulting rules, and assembly into a validated [`Graph`].

use crate::graph::{Graph, GraphError, Link, LinkKind, Node, NodeId, NodeKind};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum RecordError {
    #[error("invalid record payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Graph(#[from] GraphError),
}

pub type RecordResult<T> = Result<T, RecordError>;

fn default_tier() -> u8 {
    3
}

fn default_value() -> f64 {
    1.0
}

/// A raw node row as supplied by the data layer.
///
/// Unknown `type` strings are a deserialization error, not a default; a
/// missing tier defaults to 3 and a missing value to 1.0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(default = "default_tier")]
    pub tier: u8,
    #[serde(default = "default_value")]
    pub value: f64,
    #[serde(default)]
    pub investment_count: Option<u32>,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub firm_name: Option<String>,
}

/// A raw link row as supplied by the data layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkRecord {
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub kind: LinkKind,
    pub strength: f64,
}

impl From<NodeRecord> for Node {
    fn from(record: NodeRecord) -> Self {
        Node {
            id: NodeId::new(record.id.trim()),
            name: record.name,
            kind: record.kind,
            tier: record.tier,
            value: record.value,
            investment_count: record.investment_count,
            group: record.group,
            location: record.location,
            firm_name: record.firm_name,
        }
    }
}

impl From<LinkRecord> for Link {
    fn from(record: LinkRecord) -> Self {
        Link {
            source: NodeId::new(record.source.trim()),
            target: NodeId::new(record.target.trim()),
            kind: record.kind,
            strength: record.strength,
        }
    }
}

/// Build a validated graph from typed records
pub fn from_records(
    nodes: Vec<NodeRecord>,
    links: Vec<LinkRecord>,
) -> Result<Graph, GraphError> {
    let nodes: Vec<Node> = nodes.into_iter().map(Node::from).collect();
    let links: Vec<Link> = links.into_iter().map(Link::from).collect();
    Graph::build(nodes, links)
}

/// Parse two JSON arrays (nodes, links) and build a validated graph
pub fn from_json_slices(nodes: &[u8], links: &[u8]) -> RecordResult<Graph> {
    let node_records: Vec<NodeRecord> = serde_json::from_slice(nodes)?;
    let link_records: Vec<LinkRecord> = serde_json::from_slice(links)?;
    debug!(
        nodes = node_records.len(),
        links = link_records.len(),
        "parsed record payload"
    );
    Ok(from_records(node_records, link_records)?)
}
