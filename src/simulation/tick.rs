//! One simulation tick and the paced main loop
//!
//! A tick runs its stages strictly in order, each one finishing (and
//! joining its workers) before the next reads the particle state:
//!
//! 1. force accumulation   (fork-join, per-worker buffers + reduction)
//! 2. integration          (per particle)
//! 3. collision pass       (fork-join, per-worker velocity deltas + reduction)
//! 4. boundary pass        (per particle)
//!
//! The loop wraps ticks with the input hook before and the presentation hook
//! after, then sleeps for whatever is left of the frame budget.

use std::time::{Duration, Instant};

use crate::error::SimError;
use crate::simulation::accumulator::accumulate_forces;
use crate::simulation::boundary::boundary_pass;
use crate::simulation::collisions::collision_pass;
use crate::simulation::engine::Engine;
use crate::simulation::forces::ForceSet;
use crate::simulation::integrator::semi_implicit_euler;
use crate::simulation::params::Parameters;
use crate::simulation::scenario::Scenario;
use crate::simulation::states::{NVec2, Particle, ParticleHandle, System};

/// Presentation collaborator. Called once per particle per frame
pub trait Renderer {
    fn begin_frame(&mut self) {}
    fn draw_particle(&mut self, handle: ParticleHandle, particle: &Particle);
    fn end_frame(&mut self) {}
}

/// Input collaborator. Runs between ticks and may add or remove particles,
/// or toggle pause. Returning `false` tears the loop down
pub trait Input {
    fn handle_input(&mut self, sim: &mut Simulation) -> bool;
}

/// Input that never interferes
pub struct NoInput;

impl Input for NoInput {
    fn handle_input(&mut self, _sim: &mut Simulation) -> bool {
        true
    }
}

/// Renderer that only traces draw calls, for headless runs
#[derive(Default)]
pub struct LogRenderer {
    pub frames: u64,
}

impl Renderer for LogRenderer {
    fn draw_particle(&mut self, handle: ParticleHandle, particle: &Particle) {
        log::trace!("frame {} {:?}: {}", self.frames, handle, particle);
    }

    fn end_frame(&mut self) {
        self.frames += 1;
    }
}

/// Advance `system` by one tick of length `dt`. Returns the number of collision impulses
pub fn tick(
    engine: &Engine,
    parameters: &Parameters,
    forces: &ForceSet,
    system: &mut System,
    net_forces: &mut Vec<NVec2>,
    dt: f64,
) -> usize {
    // the collection may have changed size since the previous tick
    net_forces.clear();
    net_forces.resize(system.len(), NVec2::zeros());

    accumulate_forces(engine, system.particles(), forces, net_forces);
    semi_implicit_euler(engine, system.particles_mut(), net_forces, parameters, dt);
    let impulses = collision_pass(engine, system.particles_mut(), parameters, dt);
    boundary_pass(engine, system.particles_mut(), parameters);

    system.t += dt;
    impulses
}

/// Runtime wrapper around a [`Scenario`]: owns the worker pool, the force
/// buffer and the pause state
pub struct Simulation {
    scenario: Scenario,
    pool: Option<rayon::ThreadPool>,
    net_forces: Vec<NVec2>,
    paused: bool,
    ticks: u64,
}

impl Simulation {
    pub fn new(scenario: Scenario) -> Result<Self, SimError> {
        scenario.parameters.validate()?;

        let pool = if scenario.engine.parallel {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(scenario.engine.threads.unwrap_or(0))
                .thread_name(|i| format!("ppsim-worker-{}", i))
                .build()?;
            log::info!("worker pool ready: {} threads", pool.current_num_threads());
            Some(pool)
        } else {
            None
        };

        Ok(Self {
            net_forces: Vec::with_capacity(scenario.system.len()),
            scenario,
            pool,
            paused: false,
            ticks: 0,
        })
    }

    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    pub fn system(&self) -> &System {
        &self.scenario.system
    }

    pub fn system_mut(&mut self) -> &mut System {
        &mut self.scenario.system
    }

    pub fn parameters(&self) -> &Parameters {
        &self.scenario.parameters
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Flip pause, returning the new state
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        log::info!("simulation {}", if self.paused { "paused" } else { "resumed" });
        self.paused
    }

    pub fn add_particle(&mut self, particle: Particle) -> Result<ParticleHandle, SimError> {
        self.scenario.system.add_particle(particle)
    }

    pub fn remove_particle_near(&mut self, x: f64, y: f64, radius: f64) -> Option<(ParticleHandle, Particle)> {
        self.scenario.system.remove_particle_near(x, y, radius)
    }

    /// One tick of the configured `dt`
    pub fn step(&mut self) {
        let dt = self.scenario.parameters.dt;
        self.step_dt(dt);
    }

    /// One tick of a measured or custom duration. No-op while paused
    pub fn step_dt(&mut self, dt: f64) {
        if self.paused {
            return;
        }

        let Scenario {
            engine,
            parameters,
            system,
            forces,
        } = &mut self.scenario;
        let net_forces = &mut self.net_forces;

        let impulses = match &self.pool {
            Some(pool) => pool.install(|| tick(engine, parameters, forces, system, net_forces, dt)),
            None => tick(engine, parameters, forces, system, net_forces, dt),
        };

        self.ticks += 1;
        log::trace!("tick {}: t = {:.4}, {} impulses", self.ticks, system.t, impulses);
    }

    /// Hand every particle to the renderer
    pub fn render<R: Renderer>(&self, renderer: &mut R) {
        renderer.begin_frame();
        for (handle, particle) in self.scenario.system.iter() {
            renderer.draw_particle(handle, particle);
        }
        renderer.end_frame();
    }

    /// Input -> tick -> render, paced to `frame_budget`, until the input
    /// hook asks to stop or `max_frames` is reached. Returns frames run
    pub fn run<R, I>(&mut self, renderer: &mut R, input: &mut I, max_frames: Option<u64>) -> u64
    where
        R: Renderer,
        I: Input,
    {
        let budget = Duration::from_secs_f64(self.scenario.parameters.frame_budget);
        log::info!(
            "loop start: {} particles, frame budget {:?}",
            self.scenario.system.len(),
            budget
        );

        let mut frames = 0;
        while max_frames.map_or(true, |max| frames < max) {
            let frame_start = Instant::now();

            if !input.handle_input(self) {
                break;
            }
            self.step();
            self.render(renderer);
            frames += 1;

            if let Some(rest) = budget.checked_sub(frame_start.elapsed()) {
                std::thread::sleep(rest);
            }
        }

        log::info!("loop end: {} frames, t = {:.3}", frames, self.scenario.system.t);
        frames
    }
}
