//! World boundaries and ground contact
//!
//! Side walls and the ceiling clamp the particle and bounce it with damping.
//! The ground additionally drives the vertical mode of a particle:
//!
//! ```text
//! Airborne --(ground contact, bounce speed < threshold)--> Grounded
//! Grounded --(found above the ground line)---------------> Airborne
//! ```
//!
//! A grounded particle is pinned to the ground line with zero vertical
//! velocity and slowed horizontally by ground friction.

use rayon::prelude::*;

use super::engine::Engine;
use super::params::Parameters;
use super::states::Particle;

/// Apply the boundary rules to every movable particle
pub fn boundary_pass(engine: &Engine, particles: &mut [Particle], params: &Parameters) {
    if engine.fan_out(particles.len()) {
        particles.par_iter_mut().for_each(|p| apply_boundary(p, params));
    } else {
        for p in particles.iter_mut() {
            apply_boundary(p, params);
        }
    }
}

/// Walls, ground and ceiling for one movable particle.
/// Ground friction is applied once per call while grounded, so repeated
/// calls keep slowing a sliding particle; one at rest is left unchanged
pub fn apply_boundary(p: &mut Particle, params: &Parameters) {
    if !p.movable {
        return;
    }
    let damping = params.damping_factor;
    let r = p.radius;

    // Right wall
    if p.x.x + r > params.world_width {
        p.x.x = params.world_width - r;
        p.v.x = -p.v.x * damping;
    }
    // Left wall
    if p.x.x - r < 0.0 {
        p.x.x = r;
        p.v.x = -p.v.x * damping;
    }

    // Ground
    let ground = params.world_height - r;
    if p.x.y >= ground {
        if !p.grounded {
            // Bounce
            p.x.y = ground;
            p.v.y = -p.v.y * damping;

            if p.v.y.abs() < params.velocity_threshold {
                p.grounded = true;
                p.v.y = 0.0;
                p.a.y = 0.0;
                log::debug!("particle settled at x = {:.2}", p.x.x);
            }
        } else {
            apply_ground_friction(p, params);
            p.x.y = ground;
            p.v.y = 0.0;
            p.a.y = 0.0;
        }
    } else if p.grounded {
        p.grounded = false;
        log::debug!("particle left the ground at x = {:.2}", p.x.x);
    }

    // Ceiling
    if p.x.y - r < 0.0 {
        p.x.y = r;
        p.v.y = -p.v.y * damping;
    }
}

/// Slow horizontal motion toward zero without flipping its sign
pub fn apply_ground_friction(p: &mut Particle, params: &Parameters) {
    let decel = params.ground_friction();
    if p.v.x > 0.0 {
        p.v.x = (p.v.x - decel).max(0.0);
    } else if p.v.x < 0.0 {
        p.v.x = (p.v.x + decel).min(0.0);
    }
}
