pub mod common;
pub mod pathfinding;

pub use common::GraphView;
pub use pathfinding::{dijkstra_bounded, k_cheapest_paths, PathResult};
