//! Physical constants and default tuning values
//!
//! Physical constants are SI. Tuning values are in screen units
//! (pixels, pixels/s, pixels/s²) and seed `Parameters::default()`.

/// Gravitational constant G, m³/(kg·s²)
pub const GRAVITATIONAL_CONSTANT: f64 = 6.67430e-11;

/// Coulomb constant k_e, N·m²/C²
pub const COULOMB_CONSTANT: f64 = 8.9875517923e9;

/// Permittivity of free space ε₀, C²/(N·m²)
pub const PERMITTIVITY_OF_FREE_SPACE: f64 = 8.854187817e-12;

/// Elementary charge e, C
pub const ELEMENTARY_CHARGE: f64 = 1.602176634e-19;

/// k_e = 1 / (4π ε₀)
pub fn coulomb_constant_from_permittivity(eps0: f64) -> f64 {
    1.0 / (4.0 * std::f64::consts::PI * eps0)
}

pub const DEFAULT_MASS: f64 = 1.0;
pub const DEFAULT_RADIUS: f64 = 10.0;

/// Downward acceleration of airborne particles, pixels/s²
pub const GRAVITY: f64 = 980.0;

/// Kinetic friction coefficient of the ground
pub const GROUND_FRICTION_COEFFICIENT: f64 = 0.0001;

/// Fraction of velocity lost to air every tick
pub const AIR_DRAG_COEFFICIENT: f64 = 0.00009;

/// Velocity kept (and inverted) on a wall or ground bounce
pub const DAMPING_FACTOR: f64 = 0.7;

/// Bounce speed under which a particle settles on the ground
pub const VELOCITY_THRESHOLD: f64 = 20.0;

/// 1 = perfectly elastic particle collisions
pub const COEFFICIENT_OF_RESTITUTION: f64 = 1.0;

/// Pairs farther apart than this (squared) exert no force on each other
pub const CUTOFF_DISTANCE_SQUARED: f64 = 1e4;

/// Pairs closer than this (squared) are treated as coincident and skipped
pub const MIN_DISTANCE_SQUARED: f64 = 1e-10;

pub const WORLD_WIDTH: f64 = 800.0;
pub const WORLD_HEIGHT: f64 = 600.0;

/// Fixed tick duration, seconds
pub const TIME_STEP: f64 = 1.0 / 60.0;
