//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle
//! `Scenario` containing:
//! - engine settings (`Engine`)
//! - numerical parameters (`Parameters`)
//! - system state (`System` with particles at t = 0)
//! - active force set (`ForceSet`)
//!
//! Every particle and parameter is validated here, so a movable particle
//! with zero mass never reaches the per-tick stages.

use crate::configuration::config::{
    EngineConfig, MagneticFieldConfig, OrientationConfig, ParametersConfig, ParticleConfig, ScenarioConfig,
};
use crate::error::SimError;
use crate::simulation::engine::Engine;
use crate::simulation::forces::{FieldOrientation, ForceSet, MagneticField3, UniformMagneticField};
use crate::simulation::params::Parameters;
use crate::simulation::states::{Color, NVec2, NVec3, Particle, System};

pub struct Scenario {
    pub engine: Engine,
    pub parameters: Parameters,
    pub system: System,
    pub forces: ForceSet,
}

impl Scenario {
    /// Bundle already-built parts, using the default gravity/Coulomb force set
    pub fn new(engine: Engine, parameters: Parameters, system: System) -> Result<Self, SimError> {
        parameters.validate()?;
        let forces = ForceSet::from_engine(&engine, &parameters);
        Ok(Self {
            engine,
            parameters,
            system,
            forces,
        })
    }

    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self, SimError> {
        let parameters = build_parameters(&cfg.parameters);
        parameters.validate()?;

        let engine = build_engine(&cfg.engine)?;

        // Particles: map `ParticleConfig` -> runtime `Particle` using nalgebra vectors
        let particles = cfg
            .particles
            .iter()
            .map(build_particle)
            .collect::<Result<Vec<_>, _>>()?;
        let system = System::from_particles(particles)?;

        // Forces: gravity / Coulomb per engine toggles, plus the optional field
        let mut forces = ForceSet::from_engine(&engine, &parameters);
        match &cfg.magnetic_field {
            Some(MagneticFieldConfig::Uniform { strength, orientation }) => {
                let orientation = match orientation {
                    OrientationConfig::Out => FieldOrientation::OutOfPlane,
                    OrientationConfig::In => FieldOrientation::IntoPlane,
                };
                forces = forces.with_field(UniformMagneticField {
                    strength: *strength,
                    orientation,
                });
            }
            Some(MagneticFieldConfig::Vector { b }) => {
                let b = vec3_from(b, "magnetic_field.b")?;
                forces = forces.with_field(MagneticField3 { b });
            }
            None => {}
        }

        log::info!(
            "built scenario: {} particles, {}x{} world, dt = {:.5}",
            system.len(),
            parameters.world_width,
            parameters.world_height,
            parameters.dt
        );

        Ok(Self {
            engine,
            parameters,
            system,
            forces,
        })
    }
}

fn build_parameters(cfg: &ParametersConfig) -> Parameters {
    let d = Parameters::default();
    Parameters {
        gravity_magnitude: cfg.gravity_magnitude.unwrap_or(d.gravity_magnitude),
        damping_factor: cfg.damping_factor.unwrap_or(d.damping_factor),
        velocity_threshold: cfg.velocity_threshold.unwrap_or(d.velocity_threshold),
        ground_friction_coefficient: cfg.ground_friction_coefficient.unwrap_or(d.ground_friction_coefficient),
        air_drag_coefficient: cfg.air_drag_coefficient.unwrap_or(d.air_drag_coefficient),
        coulomb_constant: cfg.coulomb_constant.unwrap_or(d.coulomb_constant),
        gravitational_constant: cfg.gravitational_constant.unwrap_or(d.gravitational_constant),
        cutoff_distance_squared: cfg.cutoff_distance_squared.unwrap_or(d.cutoff_distance_squared),
        min_distance_squared: cfg.min_distance_squared.unwrap_or(d.min_distance_squared),
        restitution: cfg.restitution.unwrap_or(d.restitution),
        world_width: cfg.world_width.unwrap_or(d.world_width),
        world_height: cfg.world_height.unwrap_or(d.world_height),
        dt: cfg.dt.unwrap_or(d.dt),
        frame_budget: cfg.frame_budget.unwrap_or(d.frame_budget),
    }
}

fn build_engine(cfg: &EngineConfig) -> Result<Engine, SimError> {
    if cfg.threads == Some(0) {
        return Err(SimError::InvalidConfig("engine.threads must be >= 1".into()));
    }
    Ok(Engine {
        gravity: cfg.gravity,
        electrostatics: cfg.electrostatics,
        parallel: cfg.parallel,
        threads: cfg.threads,
        parallel_threshold: cfg.parallel_threshold,
    })
}

fn build_particle(pc: &ParticleConfig) -> Result<Particle, SimError> {
    let x = vec2_from(&pc.x, "particle.x")?;
    let v = match &pc.v {
        Some(v) => vec2_from(v, "particle.v")?,
        None => NVec2::zeros(),
    };

    let mut p = Particle::new(x, v, pc.m, pc.radius).with_charge(pc.charge);
    if !pc.movable {
        p = p.immovable();
    }
    if let Some(c) = pc.color {
        p = p.with_color(Color::from_array(c));
    }
    p.validate()?;
    Ok(p)
}

fn vec2_from(values: &[f64], what: &str) -> Result<NVec2, SimError> {
    match values {
        [x, y] => Ok(NVec2::new(*x, *y)),
        _ => Err(SimError::InvalidConfig(format!(
            "{} needs 2 components, got {}",
            what,
            values.len()
        ))),
    }
}

fn vec3_from(values: &[f64], what: &str) -> Result<NVec3, SimError> {
    match values {
        [x, y, z] => Ok(NVec3::new(*x, *y, *z)),
        _ => Err(SimError::InvalidConfig(format!(
            "{} needs 3 components, got {}",
            what,
            values.len()
        ))),
    }
}
