//! Core state types for the particle simulation.
//!
//! Defines the single canonical particle shape and the container that owns it:
//! - `Particle` using `NVec2` for position / velocity / acceleration
//! - `ParticleHandle` a generational handle that survives insertions and removals
//! - `System` the dense particle store plus the current simulation time `t`
//!
//! "No charge" and "no field" are zero-valued inputs, not separate particle types.

use std::fmt;

use nalgebra::{Vector2, Vector3};

use crate::error::SimError;

pub type NVec2 = Vector2<f64>;
pub type NVec3 = Vector3<f64>;

/// Display color, owned by the presentation side. The physics never reads it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const RED: Color = Color { r: 1.0, g: 0.0, b: 0.0, a: 1.0 };
    pub const SKY: Color = Color { r: 0.5, g: 0.7, b: 1.0, a: 1.0 };

    pub fn from_array(c: [f32; 4]) -> Self {
        Self { r: c[0], g: c[1], b: c[2], a: c[3] }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::RED
    }
}

#[derive(Debug, Clone)]
pub struct Particle {
    pub x: NVec2, // position, screen space (+y points down)
    pub v: NVec2, // velocity
    pub a: NVec2, // acceleration of the last integrated tick
    pub m: f64, // mass
    pub radius: f64, // collision envelope
    pub charge: f64, // 0 = electromagnetically inert
    pub movable: bool, // false = anchor: emits forces and impulses, never moves
    pub grounded: bool, // settled on the lower boundary
    pub color: Color,
}

impl Particle {
    /// Movable, neutral particle at rest acceleration
    pub fn new(x: NVec2, v: NVec2, m: f64, radius: f64) -> Self {
        Self {
            x,
            v,
            a: NVec2::zeros(),
            m,
            radius,
            charge: 0.0,
            movable: true,
            grounded: false,
            color: Color::default(),
        }
    }

    pub fn with_charge(mut self, charge: f64) -> Self {
        self.charge = charge;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Turn the particle into an anchor
    pub fn immovable(mut self) -> Self {
        self.movable = false;
        self
    }

    /// Reject configurations the force-to-acceleration step cannot handle
    pub fn validate(&self) -> Result<(), SimError> {
        if self.movable && !(self.m.is_finite() && self.m > 0.0) {
            return Err(SimError::InvalidMass { mass: self.m });
        }
        if !(self.radius.is_finite() && self.radius >= 0.0) {
            return Err(SimError::InvalidRadius { radius: self.radius });
        }
        Ok(())
    }

    /// Add `f / m` to the acceleration of a movable particle
    pub fn apply_force(&mut self, f: NVec2) {
        if !self.movable {
            return;
        }
        if self.m <= 0.0 {
            log::warn!("apply_force: skipping particle with mass {}", self.m);
            return;
        }
        self.a += f / self.m;
    }
}

impl fmt::Display for Particle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Mass: {:.2}, Position: ({:.6}, {:.6}), Velocity: ({:.6}, {:.6}), Grounded: {}",
            self.m, self.x.x, self.x.y, self.v.x, self.v.y, self.grounded
        )
    }
}

/// Stable reference to a particle in a [`System`].
///
/// A handle outlives index shuffling caused by removals; once its particle is
/// removed the slot generation is bumped and the handle resolves to nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParticleHandle {
    index: u32,
    generation: u32,
}

impl ParticleHandle {
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    dense: Option<usize>,
}

/// Particle store.
///
/// Particles live in a dense `Vec` so every per-tick stage can work on a
/// contiguous slice; handles map onto dense positions through `slots`.
#[derive(Debug, Clone, Default)]
pub struct System {
    particles: Vec<Particle>,
    handles: Vec<ParticleHandle>, // dense index -> owning handle
    slots: Vec<Slot>,
    free: Vec<u32>,
    pub t: f64, // time
}

impl System {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a system, validating every particle
    pub fn from_particles<I>(particles: I) -> Result<Self, SimError>
    where
        I: IntoIterator<Item = Particle>,
    {
        let mut sys = Self::new();
        for p in particles {
            sys.add_particle(p)?;
        }
        Ok(sys)
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    /// Handles in the same order as [`System::particles`]
    pub fn handles(&self) -> &[ParticleHandle] {
        &self.handles
    }

    pub fn iter(&self) -> impl Iterator<Item = (ParticleHandle, &Particle)> + '_ {
        self.handles.iter().copied().zip(self.particles.iter())
    }

    pub fn add_particle(&mut self, particle: Particle) -> Result<ParticleHandle, SimError> {
        particle.validate()?;

        let dense = self.particles.len();
        let handle = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.dense = Some(dense);
                ParticleHandle { index, generation: slot.generation }
            }
            None => {
                let index = u32::try_from(self.slots.len())
                    .map_err(|_| SimError::InvalidConfig("particle capacity exhausted".into()))?;
                self.slots.push(Slot { generation: 0, dense: Some(dense) });
                ParticleHandle { index, generation: 0 }
            }
        };

        self.particles.push(particle);
        self.handles.push(handle);
        log::debug!("added particle {:?} ({} live)", handle, self.particles.len());
        Ok(handle)
    }

    pub fn contains(&self, handle: ParticleHandle) -> bool {
        self.dense_index(handle).is_some()
    }

    pub fn get(&self, handle: ParticleHandle) -> Option<&Particle> {
        self.dense_index(handle).map(|i| &self.particles[i])
    }

    pub fn get_mut(&mut self, handle: ParticleHandle) -> Option<&mut Particle> {
        let i = self.dense_index(handle)?;
        Some(&mut self.particles[i])
    }

    pub fn remove_particle(&mut self, handle: ParticleHandle) -> Option<Particle> {
        let dense = self.dense_index(handle)?;

        let slot = &mut self.slots[handle.index as usize];
        slot.dense = None;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);

        let removed = self.particles.swap_remove(dense);
        self.handles.swap_remove(dense);
        // the former last particle now sits at `dense`
        if let Some(moved) = self.handles.get(dense) {
            self.slots[moved.index as usize].dense = Some(dense);
        }

        log::debug!("removed particle {:?} ({} live)", handle, self.particles.len());
        Some(removed)
    }

    /// Remove the first particle whose center lies within `radius` of (x, y)
    pub fn remove_particle_near(&mut self, x: f64, y: f64, radius: f64) -> Option<(ParticleHandle, Particle)> {
        let target = NVec2::new(x, y);
        let handle = self
            .iter()
            .find(|(_, p)| (p.x - target).norm_squared() <= radius * radius)
            .map(|(h, _)| h)?;
        self.remove_particle(handle).map(|p| (handle, p))
    }

    fn dense_index(&self, handle: ParticleHandle) -> Option<usize> {
        let slot = self.slots.get(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.dense
    }
}
