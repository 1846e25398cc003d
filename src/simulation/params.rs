//! Numerical and physical parameters for the simulation
//!
//! `Parameters` is the explicit configuration value handed to the force,
//! integrator, collision and boundary stages:
//! - physical constants (`gravitational_constant`, `coulomb_constant`),
//! - world gravity, air drag, ground friction,
//! - bounce damping, grounding threshold and restitution,
//! - force cutoff / floor and the world extents,
//! - the fixed tick duration and the frame budget used for pacing

use crate::error::SimError;
use crate::simulation::constants::*;

#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub gravity_magnitude: f64, // world gravity, +y (down)
    pub damping_factor: f64, // velocity kept on a wall/ground bounce
    pub velocity_threshold: f64, // bounce speed under which a particle grounds
    pub ground_friction_coefficient: f64, // kinetic friction while grounded
    pub air_drag_coefficient: f64, // velocity fraction lost per tick
    pub coulomb_constant: f64, // k_e
    pub gravitational_constant: f64, // G
    pub cutoff_distance_squared: f64, // interaction range limit
    pub min_distance_squared: f64, // numerical floor for pair forces
    pub restitution: f64, // coefficient of restitution in [0, 1]
    pub world_width: f64,
    pub world_height: f64,
    pub dt: f64, // tick duration
    pub frame_budget: f64, // wall-clock seconds per frame, pacing only
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            gravity_magnitude: GRAVITY,
            damping_factor: DAMPING_FACTOR,
            velocity_threshold: VELOCITY_THRESHOLD,
            ground_friction_coefficient: GROUND_FRICTION_COEFFICIENT,
            air_drag_coefficient: AIR_DRAG_COEFFICIENT,
            coulomb_constant: COULOMB_CONSTANT,
            gravitational_constant: GRAVITATIONAL_CONSTANT,
            cutoff_distance_squared: CUTOFF_DISTANCE_SQUARED,
            min_distance_squared: MIN_DISTANCE_SQUARED,
            restitution: COEFFICIENT_OF_RESTITUTION,
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            dt: TIME_STEP,
            frame_budget: TIME_STEP,
        }
    }
}

impl Parameters {
    /// Friction deceleration applied per tick to a grounded particle
    pub fn ground_friction(&self) -> f64 {
        self.ground_friction_coefficient * self.gravity_magnitude
    }

    pub fn validate(&self) -> Result<(), SimError> {
        fn check(ok: bool, msg: &str) -> Result<(), SimError> {
            if ok {
                Ok(())
            } else {
                Err(SimError::InvalidConfig(msg.to_string()))
            }
        }

        check(self.dt.is_finite() && self.dt > 0.0, "dt must be > 0")?;
        check(self.frame_budget.is_finite() && self.frame_budget >= 0.0, "frame_budget must be >= 0")?;
        check((0.0..=1.0).contains(&self.damping_factor), "damping_factor must be in [0, 1]")?;
        check((0.0..=1.0).contains(&self.restitution), "restitution must be in [0, 1]")?;
        check((0.0..1.0).contains(&self.air_drag_coefficient), "air_drag_coefficient must be in [0, 1)")?;
        check(self.ground_friction_coefficient >= 0.0, "ground_friction_coefficient must be >= 0")?;
        check(self.velocity_threshold >= 0.0, "velocity_threshold must be >= 0")?;
        check(self.gravity_magnitude.is_finite(), "gravity_magnitude must be finite")?;
        check(
            self.min_distance_squared >= 0.0 && self.min_distance_squared <= self.cutoff_distance_squared,
            "min_distance_squared must be in [0, cutoff_distance_squared]",
        )?;
        check(
            self.world_width > 0.0 && self.world_height > 0.0,
            "world extents must be > 0",
        )?;
        Ok(())
    }
}
