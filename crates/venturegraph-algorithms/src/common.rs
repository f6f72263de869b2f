//! Shared utilities for graph algorithms
//!
//! Provides a read-only, dense view of the graph topology for algorithm
//! execution. The view speaks arena indices (0..N) only; mapping indices back
//! to domain identifiers is the caller's concern.

/// A dense, integer-indexed view of an undirected graph using Compressed
/// Sparse Row (CSR) format.
///
/// Callers insert each undirected edge in both directions, so a single
/// `offsets`/`targets` pair covers the whole neighborhood of a node.
pub struct GraphView {
    /// Number of nodes
    pub node_count: usize,
    /// Offsets into `targets`. Size = node_count + 1
    pub offsets: Vec<usize>,
    /// Contiguous array of neighbor indices
    pub targets: Vec<usize>,
    /// Edge weights, aligned with `targets`
    pub weights: Vec<f64>,
}

impl GraphView {
    /// Build a view from per-node adjacency lists of `(neighbor, weight)`.
    pub fn from_adjacency(adjacency: Vec<Vec<(usize, f64)>>) -> Self {
        let node_count = adjacency.len();
        let mut offsets = Vec::with_capacity(node_count + 1);
        let mut targets = Vec::new();
        let mut weights = Vec::new();

        offsets.push(0);
        for neighbors in adjacency {
            for (target, weight) in neighbors {
                targets.push(target);
                weights.push(weight);
            }
            offsets.push(targets.len());
        }

        GraphView {
            node_count,
            offsets,
            targets,
            weights,
        }
    }

    /// Get the degree of a node (by index)
    pub fn degree(&self, idx: usize) -> usize {
        self.offsets[idx + 1] - self.offsets[idx]
    }

    /// Get the neighbors of a node
    pub fn neighbors(&self, idx: usize) -> &[usize] {
        let start = self.offsets[idx];
        let end = self.offsets[idx + 1];
        &self.targets[start..end]
    }

    /// Get weights for the edges of a node, aligned with `neighbors`
    pub fn edge_weights(&self, idx: usize) -> &[f64] {
        let start = self.offsets[idx];
        let end = self.offsets[idx + 1];
        &self.weights[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csr_construction() {
        // 0 - 1 - 2 (undirected, both directions inserted)
        let adjacency = vec![
            vec![(1, 2.0)],
            vec![(0, 2.0), (2, 5.0)],
            vec![(1, 5.0)],
        ];
        let view = GraphView::from_adjacency(adjacency);

        assert_eq!(view.node_count, 3);
        assert_eq!(view.degree(0), 1);
        assert_eq!(view.degree(1), 2);
        assert_eq!(view.neighbors(1), &[0, 2]);
        assert_eq!(view.edge_weights(1), &[2.0, 5.0]);
    }

    #[test]
    fn test_empty_view() {
        let view = GraphView::from_adjacency(Vec::new());
        assert_eq!(view.node_count, 0);
        assert_eq!(view.offsets, vec![0]);
    }
}
