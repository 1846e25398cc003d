//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! simulation scenario. A scenario consists of:
//!
//! - [`EngineConfig`]         – force toggles and parallelism
//! - [`ParametersConfig`]     – tuning values and physical constants, all optional
//! - [`ParticleConfig`]       – initial state for each particle
//! - [`MagneticFieldConfig`]  – optional external magnetic field
//! - [`ScenarioConfig`]       – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! Every section except `particles` may be omitted; missing values fall back
//! to the defaults of `Parameters` and `Engine`.
//!
//! ```yaml
//! engine:
//!   gravity: true           # pairwise Newtonian gravity
//!   electrostatics: true    # pairwise Coulomb force
//!   parallel: true          # fork-join force / collision stages
//!   threads: 4              # omit for one worker per core
//!
//! parameters:
//!   gravity_magnitude: 980.0
//!   damping_factor: 0.7
//!   restitution: 1.0
//!   world_width: 800.0
//!   world_height: 600.0
//!   dt: 0.016666
//!
//! magnetic_field:
//!   type: uniform           # or `vector` with `b: [bx, by, bz]`
//!   strength: 0.5
//!   orientation: out        # `out` of the plane or `in` to it
//!
//! particles:
//!   - x: [ 200.0, 100.0 ]
//!     v: [  10.0,   0.0 ]
//!     m: 1.0
//!     radius: 10.0
//!   - x: [ 400.0, 300.0 ]
//!     m: 50.0
//!     radius: 20.0
//!     charge: 1.0e-6
//!     movable: false
//! ```
//!
//! The scenario builder then maps this configuration into the runtime
//! representation and validates it.

use serde::Deserialize;

use crate::simulation::constants::{DEFAULT_MASS, DEFAULT_RADIUS};
use crate::simulation::engine::DEFAULT_PARALLEL_THRESHOLD;

/// Engine options
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct EngineConfig {
    pub gravity: bool, // pairwise gravity between particles
    pub electrostatics: bool, // pairwise Coulomb force between charged particles
    pub parallel: bool, // fan out force accumulation and collision pass
    pub threads: Option<usize>, // worker threads, default one per core
    pub parallel_threshold: usize, // run serially below this particle count
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            gravity: true,
            electrostatics: true,
            parallel: true,
            threads: None,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

/// Overrides for the default parameter table
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct ParametersConfig {
    pub gravity_magnitude: Option<f64>,
    pub damping_factor: Option<f64>,
    pub velocity_threshold: Option<f64>,
    pub ground_friction_coefficient: Option<f64>,
    pub air_drag_coefficient: Option<f64>,
    pub coulomb_constant: Option<f64>,
    pub gravitational_constant: Option<f64>,
    pub cutoff_distance_squared: Option<f64>,
    pub min_distance_squared: Option<f64>,
    pub restitution: Option<f64>,
    pub world_width: Option<f64>,
    pub world_height: Option<f64>,
    pub dt: Option<f64>,
    pub frame_budget: Option<f64>,
}

/// Initial state of one particle
#[derive(Deserialize, Debug, Clone)]
pub struct ParticleConfig {
    pub x: Vec<f64>, // position [x, y]
    #[serde(default)]
    pub v: Option<Vec<f64>>, // velocity [vx, vy], default at rest
    #[serde(default = "default_mass")]
    pub m: f64,
    #[serde(default = "default_radius")]
    pub radius: f64,
    #[serde(default)]
    pub charge: f64,
    #[serde(default = "default_movable")]
    pub movable: bool,
    #[serde(default)]
    pub color: Option<[f32; 4]>, // rgba
}

fn default_mass() -> f64 {
    DEFAULT_MASS
}

fn default_radius() -> f64 {
    DEFAULT_RADIUS
}

fn default_movable() -> bool {
    true
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrientationConfig {
    #[serde(rename = "out")] // out of the plane, +1
    Out,
    #[serde(rename = "in")] // into the plane, -1
    In,
}

/// External magnetic field
#[derive(Deserialize, Debug, Clone)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MagneticFieldConfig {
    /// Perpendicular to the plane
    Uniform { strength: f64, orientation: OrientationConfig },
    /// Arbitrary direction [bx, by, bz]
    Vector { b: Vec<f64> },
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub parameters: ParametersConfig,
    #[serde(default)]
    pub magnetic_field: Option<MagneticFieldConfig>,
    pub particles: Vec<ParticleConfig>,
}

impl ScenarioConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(s)
    }
}
