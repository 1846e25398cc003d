pub mod simulation;
pub mod configuration;
pub mod benchmark;
pub mod error;
#[cfg(feature = "viewer")]
pub mod visualization;

pub use error::SimError;

pub use simulation::states::{Particle, ParticleHandle, System, Color, NVec2, NVec3};
pub use simulation::params::Parameters;
pub use simulation::engine::Engine;
pub use simulation::forces::{
    gravitational_force, electrostatic_force, magnetic_force, magnetic_force_3d,
    PairForce, FieldForce, ForceSet, NewtonianGravity, Coulomb,
    FieldOrientation, UniformMagneticField, MagneticField3, NonUniformMagneticField,
};
pub use simulation::accumulator::{accumulate_forces, accumulate_forces_serial, accumulate_forces_parallel};
pub use simulation::integrator::{semi_implicit_euler, integrate_particle};
pub use simulation::collisions::{check_collision, will_collide, is_colliding, collision_impulse, resolve_collision, collision_pass};
pub use simulation::boundary::{apply_boundary, apply_ground_friction, boundary_pass};
pub use simulation::scenario::Scenario;
pub use simulation::tick::{tick, Simulation, Renderer, Input, NoInput, LogRenderer};

pub use configuration::config::{EngineConfig, ParametersConfig, ParticleConfig, MagneticFieldConfig, ScenarioConfig};

#[cfg(feature = "viewer")]
pub use visualization::ppsim_vis2d::run_2d;

pub use benchmark::benchmark::{bench_forces, bench_tick};
