pub mod states;
pub mod constants;
pub mod params;
pub mod engine;
pub mod forces;
pub mod accumulator;
pub mod integrator;
pub mod collisions;
pub mod boundary;
pub mod scenario;
pub mod tick;
