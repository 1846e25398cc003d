//! Error types for the simulator.
//!
//! Errors only surface where particles or parameters enter the engine
//! (scenario build, `System::add_particle`, thread pool setup). Once a tick
//! is running, degenerate numerics are guarded locally and never reported.

use std::fmt;

/// Errors raised while constructing or extending a simulation.
#[derive(Debug)]
pub enum SimError {
    /// A movable particle needs a finite, strictly positive mass.
    InvalidMass { mass: f64 },
    /// Radius must be finite and non-negative.
    InvalidRadius { radius: f64 },
    /// A parameter or configuration value is out of range.
    InvalidConfig(String),
    /// The fork-join worker pool could not be created.
    ThreadPool(rayon::ThreadPoolBuildError),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::InvalidMass { mass } => {
                write!(f, "Invalid mass {} for a movable particle (must be finite and > 0)", mass)
            }
            SimError::InvalidRadius { radius } => {
                write!(f, "Invalid radius {} (must be finite and >= 0)", radius)
            }
            SimError::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
            SimError::ThreadPool(e) => write!(f, "Failed to build worker pool: {}", e),
        }
    }
}

impl std::error::Error for SimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimError::ThreadPool(e) => Some(e),
            _ => None,
        }
    }
}

impl From<rayon::ThreadPoolBuildError> for SimError {
    fn from(e: rayon::ThreadPoolBuildError) -> Self {
        SimError::ThreadPool(e)
    }
}
