use std::time::Instant;

use crate::simulation::accumulator::{accumulate_forces_parallel, accumulate_forces_serial};
use crate::simulation::engine::Engine;
use crate::simulation::forces::ForceSet;
use crate::simulation::params::Parameters;
use crate::simulation::scenario::Scenario;
use crate::simulation::states::{NVec2, Particle, System};
use crate::simulation::tick::Simulation;

/// Deterministic particle cloud filling the default world, no rand needed
pub fn bench_system(n: usize, params: &Parameters) -> System {
    let mut sys = System::new();
    for i in 0..n {
        let i_f = i as f64;
        let x = NVec2::new(
            (0.5 + 0.45 * (i_f * 0.37).sin()) * params.world_width,
            (0.5 + 0.45 * (i_f * 0.13).cos()) * params.world_height,
        );
        let v = NVec2::new((i_f * 0.07).sin() * 50.0, 0.0);
        let charge = if i % 2 == 0 { 1.0e-6 } else { -1.0e-6 };
        let p = Particle::new(x, v, 1.0, 2.0).with_charge(charge);
        // every particle here is valid, a failure means the generator is broken
        if let Err(e) = sys.add_particle(p) {
            log::error!("bench_system: {}", e);
        }
    }
    sys
}

pub fn bench_forces() {
    // Different system sizes to test
    let ns = [200, 400, 800, 1600, 3200];
    let params = Parameters::default();
    let forces = ForceSet::from_engine(&Engine::default(), &params);

    for n in ns {
        let sys = bench_system(n, &params);
        let mut serial = vec![NVec2::zeros(); n];
        let mut parallel = vec![NVec2::zeros(); n];

        // Warm up
        accumulate_forces_serial(sys.particles(), &forces, &mut serial);
        accumulate_forces_parallel(sys.particles(), &forces, &mut parallel);

        let t0 = Instant::now();
        accumulate_forces_serial(sys.particles(), &forces, &mut serial);
        let dt_serial = t0.elapsed().as_secs_f64();

        let t1 = Instant::now();
        accumulate_forces_parallel(sys.particles(), &forces, &mut parallel);
        let dt_parallel = t1.elapsed().as_secs_f64();

        // reduction order differs, results agree up to rounding
        let max_rel = serial
            .iter()
            .zip(&parallel)
            .map(|(a, b)| (a - b).norm() / a.norm().max(f64::MIN_POSITIVE))
            .fold(0.0, f64::max);

        println!(
            "N = {n:5}, serial = {:8.6} s, parallel = {:8.6} s, max rel diff = {:.2e}",
            dt_serial, dt_parallel, max_rel
        );
    }
}

pub fn bench_tick() {
    let ns = [200, 800, 3200];
    let steps = 100;

    for n in ns {
        let mut timings = Vec::new();
        for parallel in [false, true] {
            let params = Parameters::default();
            let engine = Engine {
                parallel,
                parallel_threshold: 0,
                ..Engine::default()
            };
            let sys = bench_system(n, &params);
            let scenario = match Scenario::new(engine, params, sys) {
                Ok(s) => s,
                Err(e) => {
                    log::error!("bench_tick: {}", e);
                    return;
                }
            };
            let mut sim = match Simulation::new(scenario) {
                Ok(sim) => sim,
                Err(e) => {
                    log::error!("bench_tick: {}", e);
                    return;
                }
            };

            let t0 = Instant::now();
            for _ in 0..steps {
                sim.step();
            }
            timings.push(t0.elapsed().as_secs_f64() / steps as f64);
        }

        println!(
            "N = {n:5}, serial tick = {:8.6} s, parallel tick = {:8.6} s",
            timings[0], timings[1]
        );
    }
}
