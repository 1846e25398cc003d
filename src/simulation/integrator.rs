//! Fixed-step time integration
//!
//! Semi-implicit (symplectic) Euler driven by the net forces of the
//! accumulator: velocity is advanced first, then position with the new
//! velocity. Only movable particles are touched. Grounded particles keep
//! moving horizontally, their vertical motion stays frozen until the
//! boundary pass lifts the grounded flag.

use rayon::prelude::*;

use super::engine::Engine;
use super::params::Parameters;
use super::states::{NVec2, Particle};

/// Advance every particle by `dt` using its net force `forces[i]`
pub fn semi_implicit_euler(engine: &Engine, particles: &mut [Particle], forces: &[NVec2], params: &Parameters, dt: f64) {
    debug_assert_eq!(particles.len(), forces.len());
    if engine.fan_out(particles.len()) {
        particles
            .par_iter_mut()
            .zip(forces.par_iter())
            .for_each(|(p, f)| integrate_particle(p, *f, params, dt));
    } else {
        for (p, f) in particles.iter_mut().zip(forces.iter()) {
            integrate_particle(p, *f, params, dt);
        }
    }
}

/// One particle, one step
pub fn integrate_particle(p: &mut Particle, force: NVec2, params: &Parameters, dt: f64) {
    if !p.movable {
        return;
    }

    apply_air_drag(p, params);

    // a = F / m, converted here so pair contributions stay mass independent
    p.a = if p.m > 0.0 {
        force / p.m
    } else {
        log::warn!("integrator: movable particle with mass {} receives no force", p.m);
        NVec2::zeros()
    };

    if p.grounded {
        p.a.y = 0.0;
    } else {
        // world gravity, +y is down
        p.a.y += params.gravity_magnitude;
    }

    // Kick: v_n+1 = v_n + dt * a_n
    p.v.x += p.a.x * dt;
    if !p.grounded {
        p.v.y += p.a.y * dt;
    }

    // Drift: x_n+1 = x_n + dt * v_n+1
    p.x.x += p.v.x * dt;
    if !p.grounded {
        p.x.y += p.v.y * dt;
    }
}

/// Scale velocity by (1 - air drag)
pub fn apply_air_drag(p: &mut Particle, params: &Parameters) {
    p.v -= p.v * params.air_drag_coefficient;
}
