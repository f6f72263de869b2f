//! Force passes for the layout simulation
//!
//! Each pass reads the arena and accumulates into velocities (collision is
//! positional). Passes are deterministic: the repulsion pass parallelizes per
//! body over an immutable position snapshot, and degenerate zero-distance
//! pairs are separated with an index-derived nudge instead of randomness.

use rayon::prelude::*;

/// Transient physics state for one node, indexed by the graph's dense index
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Body {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    /// Pin coordinates; a pinned body exerts forces but does not move
    pub fx: Option<f64>,
    pub fy: Option<f64>,
}

impl Body {
    pub fn pinned(&self) -> bool {
        self.fx.is_some() || self.fy.is_some()
    }
}

/// A link resolved to arena indices with its physical parameters
#[derive(Debug, Clone, Copy)]
pub(crate) struct LinkBinding {
    pub a: usize,
    pub b: usize,
    /// Target separation for this bond
    pub rest: f64,
    /// Force coefficient, min(strength, 1): stronger bonds pull harder
    pub coeff: f64,
}

/// Deterministic sub-pixel nudge for coincident points
fn jiggle(i: usize) -> f64 {
    ((i % 13) as f64 - 6.0) * 1e-6 + 1e-6
}

/// Spring force toward each binding's rest distance
pub(crate) fn apply_link_force(bodies: &mut [Body], bindings: &[LinkBinding], alpha: f64) {
    for (i, binding) in bindings.iter().enumerate() {
        let (a, b) = (binding.a, binding.b);
        let mut dx = (bodies[b].x + bodies[b].vx) - (bodies[a].x + bodies[a].vx);
        let mut dy = (bodies[b].y + bodies[b].vy) - (bodies[a].y + bodies[a].vy);
        if dx == 0.0 && dy == 0.0 {
            dx = jiggle(i);
            dy = jiggle(i + 1);
        }
        let dist = (dx * dx + dy * dy).sqrt();
        let k = (dist - binding.rest) / dist * alpha * binding.coeff;
        bodies[b].vx -= dx * k * 0.5;
        bodies[b].vy -= dy * k * 0.5;
        bodies[a].vx += dx * k * 0.5;
        bodies[a].vy += dy * k * 0.5;
    }
}

/// Many-body repulsion, naive n^2 over a position snapshot
///
/// Fine at the interactive scale this engine targets (a few hundred nodes);
/// per-body accumulation runs in parallel and the inner loop is sequential,
/// so the result does not depend on thread scheduling.
pub(crate) fn apply_repulsion(bodies: &mut [Body], charges: &[f64], alpha: f64) {
    let positions: Vec<(f64, f64)> = bodies.iter().map(|b| (b.x, b.y)).collect();
    let n = positions.len();

    let forces: Vec<(f64, f64)> = (0..n)
        .into_par_iter()
        .map(|i| {
            let (xi, yi) = positions[i];
            let mut fx = 0.0;
            let mut fy = 0.0;
            for j in 0..n {
                if i == j {
                    continue;
                }
                let mut dx = xi - positions[j].0;
                let mut dy = yi - positions[j].1;
                if dx == 0.0 && dy == 0.0 {
                    dx = jiggle(i);
                    dy = jiggle(j);
                }
                let d2 = dx * dx + dy * dy;
                let w = charges[j] * alpha / d2;
                fx += dx * w;
                fy += dy * w;
            }
            (fx, fy)
        })
        .collect();

    for (body, (fx, fy)) in bodies.iter_mut().zip(forces) {
        body.vx += fx;
        body.vy += fy;
    }
}

/// Weak pull toward the canvas center to prevent drift
pub(crate) fn apply_centering(
    bodies: &mut [Body],
    cx: f64,
    cy: f64,
    strength: f64,
    alpha: f64,
) {
    for body in bodies.iter_mut() {
        body.vx += (cx - body.x) * strength * alpha;
        body.vy += (cy - body.y) * strength * alpha;
    }
}

/// Positional separation of overlapping pairs
///
/// Returns the number of pairs corrected. A pinned body does not move; its
/// partner absorbs the whole correction. Two pinned bodies stay where the
/// caller put them.
pub(crate) fn resolve_collisions(bodies: &mut [Body], radii: &[f64], margin: f64) -> usize {
    let n = bodies.len();
    let mut corrected = 0;

    for i in 0..n {
        for j in (i + 1)..n {
            let min_dist = radii[i] + radii[j] + margin;
            let mut dx = bodies[j].x - bodies[i].x;
            let mut dy = bodies[j].y - bodies[i].y;
            if dx == 0.0 && dy == 0.0 {
                dx = jiggle(i);
                dy = jiggle(j);
            }
            let dist = (dx * dx + dy * dy).sqrt();
            if dist >= min_dist {
                continue;
            }

            let overlap = min_dist - dist;
            let ux = dx / dist;
            let uy = dy / dist;

            match (bodies[i].pinned(), bodies[j].pinned()) {
                (true, true) => continue,
                (true, false) => {
                    bodies[j].x += ux * overlap;
                    bodies[j].y += uy * overlap;
                }
                (false, true) => {
                    bodies[i].x -= ux * overlap;
                    bodies[i].y -= uy * overlap;
                }
                (false, false) => {
                    bodies[i].x -= ux * overlap * 0.5;
                    bodies[i].y -= uy * overlap * 0.5;
                    bodies[j].x += ux * overlap * 0.5;
                    bodies[j].y += uy * overlap * 0.5;
                }
            }
            corrected += 1;
        }
    }

    corrected
}
