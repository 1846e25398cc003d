//! High-level runtime engine settings
//!
//! Selects which pair forces are active and how the per-tick stages
//! fan out across worker threads

/// Below this many particles the fork-join stages run on the calling thread
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 64;

#[derive(Debug, Clone, PartialEq)]
pub struct Engine {
    pub gravity: bool, // pairwise Newtonian gravity on/off
    pub electrostatics: bool, // pairwise Coulomb force on/off
    pub parallel: bool, // false = every stage on the calling thread
    pub threads: Option<usize>, // worker count, None = one per core
    pub parallel_threshold: usize, // minimum particle count before fanning out
}

impl Default for Engine {
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

impl Engine {
    /// Whether a stage over `n` particles should fan out
    pub fn fan_out(&self, n: usize) -> bool {
        self.parallel && n >= self.parallel_threshold
    }
}
