//! Pairwise force accumulation
//!
//! Walks every unordered pair (i, j), i < j, with at least one movable member
//! and writes the pair force into `out[i]` and its negation into `out[j]`,
//! but only for the members that are movable. Immovable particles emit
//! forces without ever receiving any.
//!
//! The parallel path forks over the outer index `i`. A row writes to `j > i`
//! slots owned by other rows, so every worker folds into its own full-length
//! buffer and the buffers are reduced after the join; no slot is ever
//! shared between two running workers.
//!
//! Output is net force, not acceleration. Dividing by mass happens at
//! integration time.

use rayon::prelude::*;

use crate::simulation::engine::Engine;
use crate::simulation::forces::ForceSet;
use crate::simulation::states::{NVec2, Particle};

/// Net force on every particle, serial or fork-join depending on `engine`
pub fn accumulate_forces(engine: &Engine, particles: &[Particle], forces: &ForceSet, out: &mut [NVec2]) {
    if engine.fan_out(particles.len()) {
        accumulate_forces_parallel(particles, forces, out);
    } else {
        accumulate_forces_serial(particles, forces, out);
    }
}

/// Single-threaded reference accumulation
pub fn accumulate_forces_serial(particles: &[Particle], forces: &ForceSet, out: &mut [NVec2]) {
    debug_assert_eq!(particles.len(), out.len());
    // Zero buffer
    for f in out.iter_mut() {
        *f = NVec2::zeros();
    }

    if forces.has_pair_terms() {
        for i in 0..particles.len() {
            accumulate_row(i, particles, forces, out);
        }
    }

    if forces.has_field_terms() {
        for (f, p) in out.iter_mut().zip(particles) {
            if p.movable {
                *f += forces.field_force(p);
            }
        }
    }
}

/// Fork-join accumulation with thread-local buffers merged by reduction
pub fn accumulate_forces_parallel(particles: &[Particle], forces: &ForceSet, out: &mut [NVec2]) {
    let n = particles.len();
    debug_assert_eq!(n, out.len());

    if forces.has_pair_terms() {
        let merged = (0..n)
            .into_par_iter()
            .fold(
                || vec![NVec2::zeros(); n],
                |mut acc, i| {
                    accumulate_row(i, particles, forces, &mut acc);
                    acc
                },
            )
            .reduce(|| vec![NVec2::zeros(); n], merge_buffers);
        out.copy_from_slice(&merged);
    } else {
        out.par_iter_mut().for_each(|f| *f = NVec2::zeros());
    }

    if forces.has_field_terms() {
        // one slot per particle: disjoint writes, no reduction needed
        out.par_iter_mut().zip(particles.par_iter()).for_each(|(f, p)| {
            if p.movable {
                *f += forces.field_force(p);
            }
        });
    }
}

/// Contributions of every pair (i, j) with j > i
fn accumulate_row(i: usize, particles: &[Particle], forces: &ForceSet, acc: &mut [NVec2]) {
    let pi = &particles[i];
    for (j, pj) in particles.iter().enumerate().skip(i + 1) {
        if !pi.movable && !pj.movable {
            continue;
        }
        if let Some(f) = forces.pair_force(pi, pj) {
            // equal and opposite
            if pi.movable {
                acc[i] += f;
            }
            if pj.movable {
                acc[j] -= f;
            }
        }
    }
}

fn merge_buffers(mut a: Vec<NVec2>, b: Vec<NVec2>) -> Vec<NVec2> {
    for (x, y) in a.iter_mut().zip(b) {
        *x += y;
    }
    a
}
