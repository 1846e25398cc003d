//! Collision detection and impulse response
//!
//! Detection runs two overlap tests against the same threshold (r1 + r2)²:
//! - resting contact on current positions
//! - swept, on positions extrapolated by one tick of current velocity,
//!   which catches fast pairs that would pass through each other
//!
//! Response is an impulse along the separation normal. Immovable particles
//! behave as infinite mass: they keep their velocity and only their partner
//! is pushed.
//!
//! The pass is order independent: every colliding pair computes its impulse
//! from the velocities at the start of the pass, the per-particle velocity
//! deltas are summed (per worker, then reduced) and applied after the join.

use rayon::prelude::*;

use super::engine::Engine;
use super::params::Parameters;
use super::states::{NVec2, Particle};

/// Contact threshold shared by both tests
fn contact_threshold(p1: &Particle, p2: &Particle) -> f64 {
    let r = p1.radius + p2.radius;
    r * r
}

/// Resting contact: current squared distance below (r1 + r2)²
pub fn check_collision(p1: &Particle, p2: &Particle) -> bool {
    (p1.x - p2.x).norm_squared() < contact_threshold(p1, p2)
}

/// Swept test: positions extrapolated by `dt` overlap
pub fn will_collide(p1: &Particle, p2: &Particle, dt: f64) -> bool {
    let next1 = p1.x + p1.v * dt;
    let next2 = p2.x + p2.v * dt;
    (next1 - next2).norm_squared() < contact_threshold(p1, p2)
}

/// Either test fires
pub fn is_colliding(p1: &Particle, p2: &Particle, dt: f64) -> bool {
    will_collide(p1, p2, dt) || check_collision(p1, p2)
}

/// Velocity changes `(dv1, dv2)` for a colliding pair, or `None` when no
/// impulse applies (both anchored, coincident centers, separating pair, no
/// velocity would change). Against an anchor the movable side gets
/// `-(1 + e) (v_rel . n) n` whatever the anchor's mass
pub fn collision_impulse(p1: &Particle, p2: &Particle, restitution: f64) -> Option<(NVec2, NVec2)> {
    if !p1.movable && !p2.movable {
        return None;
    }

    let d = p1.x - p2.x;
    let dist_sq = d.norm_squared();
    if dist_sq == 0.0 {
        // normal is undefined
        log::debug!("collision skipped: particles exactly overlapping");
        return None;
    }
    let n = d / dist_sq.sqrt();

    let dot = (p1.v - p2.v).dot(&n);
    if dot >= 0.0 {
        return None;
    }

    // share of the impulse each side absorbs; an anchor is infinite mass,
    // so its partner takes all of it
    let (w1, w2) = match (p1.movable, p2.movable) {
        (true, true) => {
            let total_mass = p1.m + p2.m;
            if total_mass <= 0.0 {
                return None;
            }
            (p2.m / total_mass, p1.m / total_mass)
        }
        (true, false) => (1.0, 0.0),
        _ => (0.0, 1.0),
    };

    // restitution 1 gives the elastic 2 * (v_rel . n) * m_other / (m1 + m2)
    let j = (1.0 + restitution) * dot;
    let dv1 = -j * w1 * n;
    let dv2 = j * w2 * n;
    if dv1 == NVec2::zeros() && dv2 == NVec2::zeros() {
        return None;
    }
    Some((dv1, dv2))
}

/// Resolve a single pair in place. Returns whether an impulse was applied
pub fn resolve_collision(p1: &mut Particle, p2: &mut Particle, restitution: f64) -> bool {
    match collision_impulse(p1, p2, restitution) {
        Some((dv1, dv2)) => {
            p1.v += dv1;
            p2.v += dv2;
            true
        }
        None => false,
    }
}

/// Detect and resolve every colliding pair. Returns the number of impulses applied
pub fn collision_pass(engine: &Engine, particles: &mut [Particle], params: &Parameters, dt: f64) -> usize {
    let n = particles.len();
    if n < 2 {
        return 0;
    }

    let (deltas, resolved) = {
        let snapshot: &[Particle] = particles;
        if engine.fan_out(n) {
            (0..n)
                .into_par_iter()
                .fold(
                    || (vec![NVec2::zeros(); n], 0usize),
                    |(mut acc, count), i| {
                        let hits = collide_row(i, snapshot, params.restitution, dt, &mut acc);
                        (acc, count + hits)
                    },
                )
                .reduce(
                    || (vec![NVec2::zeros(); n], 0usize),
                    |(mut a, ca), (b, cb)| {
                        for (x, y) in a.iter_mut().zip(b) {
                            *x += y;
                        }
                        (a, ca + cb)
                    },
                )
        } else {
            let mut acc = vec![NVec2::zeros(); n];
            let mut count = 0;
            for i in 0..n {
                count += collide_row(i, snapshot, params.restitution, dt, &mut acc);
            }
            (acc, count)
        }
    };

    for (p, dv) in particles.iter_mut().zip(deltas) {
        if p.movable {
            p.v += dv;
        }
    }

    if resolved > 0 {
        log::debug!("collision pass: {} impulses", resolved);
    }
    resolved
}

/// Pairs (i, j) with j > i
fn collide_row(i: usize, particles: &[Particle], restitution: f64, dt: f64, acc: &mut [NVec2]) -> usize {
    let pi = &particles[i];
    let mut hits = 0;
    for (j, pj) in particles.iter().enumerate().skip(i + 1) {
        if !is_colliding(pi, pj, dt) {
            continue;
        }
        if let Some((dv1, dv2)) = collision_impulse(pi, pj, restitution) {
            acc[i] += dv1;
            acc[j] += dv2;
            hits += 1;
        }
    }
    hits
}
