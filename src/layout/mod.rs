//! Force-directed layout simulator
//!
//! Assigns 2-D positions to the nodes of a graph by iterating a force system
//! (link springs, many-body repulsion, centering, collision separation) until
//! the decaying energy scalar `alpha` falls below a threshold or a tick
//! budget runs out.
//!
//! The simulation owns a local arena of body records indexed by the graph's
//! dense node index; the canonical graph is never mutated. The
//! caller drives the loop: `tick()` is one frame's worth of work, and the
//! control surface (`pause`/`resume`/`reset`/`reheat`/`pin`) supports
//! interactive dragging and filter changes without rebuilding.

mod forces;

use crate::graph::{Graph, Node, NodeId};
use forces::{Body, LinkBinding};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, PartialEq)]
pub enum LayoutError {
    #[error("canvas dimensions {width}x{height} must be positive")]
    InvalidCanvas { width: f64, height: f64 },

    #[error("decay factors must lie in (0, 1): alpha {alpha_decay}, velocity {velocity_decay}")]
    InvalidDecay {
        alpha_decay: f64,
        velocity_decay: f64,
    },

    #[error("max_ticks must be at least 1")]
    ZeroTicks,

    #[error("node {0} not part of this simulation")]
    UnknownNode(NodeId),
}

/// A computed 2-D position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Tunable parameters of the force system
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub width: f64,
    pub height: f64,
    /// Initial energy, conventionally in (0.3, 1.0]
    pub alpha: f64,
    /// Convergence threshold
    pub alpha_min: f64,
    /// Fraction of alpha retained per tick (multiplicative decay)
    pub alpha_decay: f64,
    /// Fraction of velocity retained per tick
    pub velocity_decay: f64,
    /// Base many-body charge; scaled per node by `tier_boost`
    pub repulsion: f64,
    /// Multiplier by tier (index tier-1): tier 1 repels hardest and renders largest
    pub tier_boost: [f64; 3],
    /// Global scale applied to each link kind's rest distance
    pub link_distance_scale: f64,
    /// Strength of the pull toward the canvas center
    pub centering: f64,
    /// Extra separation beyond the sum of radii
    pub collision_margin: f64,
    pub base_size: f64,
    /// Logarithmic size factor applied to a node's importance
    pub size_factor: f64,
    pub max_size: f64,
    pub max_ticks: usize,
    /// Seed for the initial scatter; fixed seed means reproducible layouts
    pub seed: u64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            width: 1280.0,
            height: 720.0,
            alpha: 1.0,
            alpha_min: 0.001,
            alpha_decay: 0.977,
            velocity_decay: 0.6,
            repulsion: 120.0,
            tier_boost: [1.75, 1.3, 1.0],
            link_distance_scale: 1.0,
            centering: 0.05,
            collision_margin: 2.0,
            base_size: 8.0,
            size_factor: 3.0,
            max_size: 28.0,
            max_ticks: 300,
            seed: 0x7e_57_ed,
        }
    }
}

impl LayoutConfig {
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(LayoutError::InvalidCanvas {
                width: self.width,
                height: self.height,
            });
        }
        let decay_ok = |d: f64| d > 0.0 && d < 1.0;
        if !decay_ok(self.alpha_decay) || !decay_ok(self.velocity_decay) {
            return Err(LayoutError::InvalidDecay {
                alpha_decay: self.alpha_decay,
                velocity_decay: self.velocity_decay,
            });
        }
        if self.max_ticks == 0 {
            return Err(LayoutError::ZeroTicks);
        }
        Ok(())
    }

    /// Rendered radius for a node: logarithmic in importance, boosted by
    /// tier, clamped to `[base_size, max_size]`.
    pub fn node_radius(&self, node: &Node) -> f64 {
        let tier_mult = self.tier_boost[(node.tier - 1) as usize];
        let size_mult = (node.importance() + 1.0).ln() * self.size_factor;
        (self.base_size * size_mult * tier_mult)
            .min(self.max_size)
            .max(self.base_size)
    }
}

/// The layout simulation: the engine's only stateful, long-running component
#[derive(Debug)]
pub struct Simulation {
    config: LayoutConfig,
    ids: Vec<NodeId>,
    index_of: FxHashMap<NodeId, usize>,
    bodies: Vec<Body>,
    bindings: Vec<LinkBinding>,
    charges: Vec<f64>,
    radii: Vec<f64>,
    alpha: f64,
    ticks: usize,
    running: bool,
}

impl Simulation {
    /// Build a simulation arena for `graph`.
    ///
    /// Duplicate links of the same kind between a pair collapse to a single
    /// binding. A link endpoint that fails to resolve is a programmer error
    /// (the graph validates endpoints at build) and is raised, not skipped.
    pub fn new(graph: &Graph, config: LayoutConfig) -> Result<Simulation, LayoutError> {
        config.validate()?;

        let ids: Vec<NodeId> = graph.nodes().map(|n| n.id.clone()).collect();
        let index_of: FxHashMap<NodeId, usize> = ids
            .iter()
            .enumerate()
            .map(|(i, id)| (id.clone(), i))
            .collect();

        let charges: Vec<f64> = graph
            .nodes()
            .map(|n| config.repulsion * config.tier_boost[(n.tier - 1) as usize])
            .collect();
        let radii: Vec<f64> = graph.nodes().map(|n| config.node_radius(n)).collect();

        let mut seen: FxHashSet<(usize, usize, LinkKindKey)> = FxHashSet::default();
        let mut bindings = Vec::with_capacity(graph.link_count());
        for link in graph.links() {
            let a = graph
                .index_of(&link.source)
                .ok_or_else(|| LayoutError::UnknownNode(link.source.clone()))?;
            let b = graph
                .index_of(&link.target)
                .ok_or_else(|| LayoutError::UnknownNode(link.target.clone()))?;
            let key = (a.min(b), a.max(b), link.kind as LinkKindKey);
            if !seen.insert(key) {
                continue;
            }
            bindings.push(LinkBinding {
                a,
                b,
                rest: link.kind.rest_distance() * config.link_distance_scale,
                coeff: link.strength.min(1.0),
            });
        }

        let bodies = Self::scatter(&config, ids.len());
        let alpha = config.alpha;

        Ok(Simulation {
            config,
            ids,
            index_of,
            bodies,
            bindings,
            charges,
            radii,
            alpha,
            ticks: 0,
            running: false,
        })
    }

    /// Seeded initial placement around the canvas center
    fn scatter(config: &LayoutConfig, count: usize) -> Vec<Body> {
        let mut rng = StdRng::seed_from_u64(config.seed);
        let (cx, cy) = (config.width / 2.0, config.height / 2.0);
        let spread = config.width.min(config.height) / 4.0;
        (0..count)
            .map(|_| Body {
                x: cx + rng.gen_range(-spread..=spread),
                y: cy + rng.gen_range(-spread..=spread),
                ..Body::default()
            })
            .collect()
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn resume(&mut self) {
        self.running = true;
    }

    /// Recreate the arena from the seed: positions, velocities, pins, alpha
    /// and the tick counter all reset.
    pub fn reset(&mut self) {
        self.bodies = Self::scatter(&self.config, self.ids.len());
        self.alpha = self.config.alpha;
        self.ticks = 0;
        self.running = false;
    }

    /// Re-seed alpha (after a drag or filter change) without rebuilding.
    /// Also resets the tick budget and resumes the simulation.
    pub fn reheat(&mut self, alpha: f64) {
        self.alpha = alpha.clamp(0.0, 1.0);
        self.ticks = 0;
        self.running = true;
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Pin a node at a fixed position (interactive dragging). Pinned nodes
    /// participate in forces affecting others but do not move.
    pub fn pin(&mut self, id: &NodeId, x: f64, y: f64) -> Result<(), LayoutError> {
        let idx = *self
            .index_of
            .get(id)
            .ok_or_else(|| LayoutError::UnknownNode(id.clone()))?;
        let body = &mut self.bodies[idx];
        body.x = x;
        body.y = y;
        body.vx = 0.0;
        body.vy = 0.0;
        body.fx = Some(x);
        body.fy = Some(y);
        Ok(())
    }

    /// Release a pinned node; it keeps its current position and rejoins the
    /// force system on the next tick.
    pub fn unpin(&mut self, id: &NodeId) -> Result<(), LayoutError> {
        let idx = *self
            .index_of
            .get(id)
            .ok_or_else(|| LayoutError::UnknownNode(id.clone()))?;
        self.bodies[idx].fx = None;
        self.bodies[idx].fy = None;
        Ok(())
    }

    /// Advance one tick. Returns `false` once paused or converged, so a
    /// caller loop (one tick per animation frame) knows when to stop.
    pub fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }
        if self.alpha < self.config.alpha_min || self.ticks >= self.config.max_ticks {
            self.running = false;
            return false;
        }

        forces::apply_link_force(&mut self.bodies, &self.bindings, self.alpha);
        forces::apply_repulsion(&mut self.bodies, &self.charges, self.alpha);
        forces::apply_centering(
            &mut self.bodies,
            self.config.width / 2.0,
            self.config.height / 2.0,
            self.config.centering,
            self.alpha,
        );

        for body in self.bodies.iter_mut() {
            body.vx *= self.config.velocity_decay;
            body.vy *= self.config.velocity_decay;
            match (body.fx, body.fy) {
                (Some(fx), Some(fy)) => {
                    body.x = fx;
                    body.y = fy;
                    body.vx = 0.0;
                    body.vy = 0.0;
                }
                _ => {
                    body.x += body.vx;
                    body.y += body.vy;
                }
            }
        }

        forces::resolve_collisions(&mut self.bodies, &self.radii, self.config.collision_margin);

        self.alpha *= self.config.alpha_decay;
        self.ticks += 1;
        true
    }

    /// Run to convergence (or the tick budget) and return final positions.
    ///
    /// A zero-node graph yields an empty map. A final relaxation loop clears
    /// any residual overlap so converged layouts satisfy the minimum
    /// separation invariant.
    pub fn run(&mut self) -> BTreeMap<NodeId, Position> {
        self.start();
        while self.tick() {}

        let mut passes = 0;
        while forces::resolve_collisions(
            &mut self.bodies,
            &self.radii,
            self.config.collision_margin,
        ) > 0
            && passes < 64
        {
            passes += 1;
        }

        debug!(
            ticks = self.ticks,
            alpha = self.alpha,
            settle_passes = passes,
            "layout converged"
        );
        self.positions()
    }

    /// Snapshot of current positions, keyed by node id
    pub fn positions(&self) -> BTreeMap<NodeId, Position> {
        self.ids
            .iter()
            .zip(&self.bodies)
            .map(|(id, body)| {
                (
                    id.clone(),
                    Position {
                        x: body.x,
                        y: body.y,
                    },
                )
            })
            .collect()
    }

    /// Rendered radius of a node in this simulation, if present
    pub fn radius(&self, id: &NodeId) -> Option<f64> {
        self.index_of.get(id).map(|&idx| self.radii[idx])
    }
}

// Discriminant type for the (pair, kind) dedup key
type LinkKindKey = u8;

/// One-shot convenience: build a simulation and run it to convergence
pub fn simulate(
    graph: &Graph,
    config: LayoutConfig,
) -> Result<BTreeMap<NodeId, Position>, LayoutError> {
    let mut simulation = Simulation::new(graph, config)?;
    Ok(simulation.run())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Link, LinkKind, Node, NodeKind};

    fn sample_graph() -> Graph {
        let nodes = vec![
            Node::new("a", "Alpha", NodeKind::Firm)
                .with_tier(1)
                .with_investment_count(50),
            Node::new("b", "Beta", NodeKind::Investor).with_tier(2),
            Node::new("c", "Gamma", NodeKind::Investor).with_tier(3),
        ];
        let links = vec![
            Link::new("a", "b", LinkKind::FirmColleague, 0.9),
            Link::new("b", "c", LinkKind::CoInvestment, 0.5),
        ];
        Graph::build(nodes, links).unwrap()
    }

    #[test]
    fn test_empty_graph_yields_empty_positions() {
        let graph = Graph::build(Vec::new(), Vec::new()).unwrap();
        let positions = simulate(&graph, LayoutConfig::default()).unwrap();
        assert!(positions.is_empty());
    }

    #[test]
    fn test_deterministic_under_fixed_seed() {
        let graph = sample_graph();
        let first = simulate(&graph, LayoutConfig::default()).unwrap();
        let second = simulate(&graph, LayoutConfig::default()).unwrap();
        assert_eq!(first.len(), second.len());
        for (id, position) in &first {
            let other = &second[id];
            assert!((position.x - other.x).abs() < 1e-9);
            assert!((position.y - other.y).abs() < 1e-9);
        }
    }

    #[test]
    fn test_different_seed_moves_nodes() {
        let graph = sample_graph();
        let first = simulate(&graph, LayoutConfig::default()).unwrap();
        let config = LayoutConfig {
            seed: 99,
            ..LayoutConfig::default()
        };
        let second = simulate(&graph, config).unwrap();
        let moved = first
            .iter()
            .any(|(id, p)| (p.x - second[id].x).abs() > 1e-6);
        assert!(moved);
    }

    #[test]
    fn test_collision_invariant_after_run() {
        let graph = sample_graph();
        let config = LayoutConfig::default();
        let mut simulation = Simulation::new(&graph, config.clone()).unwrap();
        let positions = simulation.run();

        let entries: Vec<_> = positions.iter().collect();
        for i in 0..entries.len() {
            for j in (i + 1)..entries.len() {
                let (id_i, p_i) = entries[i];
                let (id_j, p_j) = entries[j];
                let dist = ((p_i.x - p_j.x).powi(2) + (p_i.y - p_j.y).powi(2)).sqrt();
                let min_dist =
                    simulation.radius(id_i).unwrap() + simulation.radius(id_j).unwrap();
                assert!(
                    dist + 1e-6 >= min_dist,
                    "{} and {} overlap: {} < {}",
                    id_i,
                    id_j,
                    dist,
                    min_dist
                );
            }
        }
    }

    #[test]
    fn test_pinned_node_does_not_move() {
        let graph = sample_graph();
        let mut simulation = Simulation::new(&graph, LayoutConfig::default()).unwrap();
        simulation.pin(&"a".into(), 100.0, 100.0).unwrap();
        simulation.run();

        let positions = simulation.positions();
        let pinned = &positions[&"a".into()];
        assert_eq!(pinned.x, 100.0);
        assert_eq!(pinned.y, 100.0);
    }

    #[test]
    fn test_pin_unknown_node_raises() {
        let graph = sample_graph();
        let mut simulation = Simulation::new(&graph, LayoutConfig::default()).unwrap();
        assert_eq!(
            simulation.pin(&"ghost".into(), 0.0, 0.0).unwrap_err(),
            LayoutError::UnknownNode("ghost".into())
        );
    }

    #[test]
    fn test_reheat_resumes_converged_simulation() {
        let graph = sample_graph();
        let mut simulation = Simulation::new(&graph, LayoutConfig::default()).unwrap();
        simulation.run();
        assert!(!simulation.is_running());

        simulation.reheat(0.5);
        assert!(simulation.is_running());
        assert!(simulation.tick());
    }

    #[test]
    fn test_reset_restores_seeded_scatter() {
        let graph = sample_graph();
        let mut simulation = Simulation::new(&graph, LayoutConfig::default()).unwrap();
        let initial = simulation.positions();
        simulation.run();
        simulation.reset();
        assert_eq!(simulation.positions(), initial);
        assert_eq!(simulation.alpha(), LayoutConfig::default().alpha);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let graph = sample_graph();
        let config = LayoutConfig {
            width: 0.0,
            ..LayoutConfig::default()
        };
        assert!(matches!(
            Simulation::new(&graph, config),
            Err(LayoutError::InvalidCanvas { .. })
        ));

        let config = LayoutConfig {
            max_ticks: 0,
            ..LayoutConfig::default()
        };
        assert_eq!(
            Simulation::new(&graph, config).unwrap_err(),
            LayoutError::ZeroTicks
        );
    }

    #[test]
    fn test_radius_clamped() {
        let config = LayoutConfig::default();
        let tiny = Node::new("t", "T", NodeKind::Sector).with_value(0.0);
        assert_eq!(config.node_radius(&tiny), config.base_size);

        let huge = Node::new("h", "H", NodeKind::Firm)
            .with_tier(1)
            .with_investment_count(100_000);
        assert_eq!(config.node_radius(&huge), config.max_size);
    }
}
