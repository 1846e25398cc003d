//! Force laws for the particle engine
//!
//! Pure force laws (gravity, Coulomb, Lorentz) plus the two traits the
//! accumulator drives them through:
//! - [`PairForce`]  forces between two particles (Newton's third law applies)
//! - [`FieldForce`] forces a particle feels from an external field
//!
//! [`ForceSet`] bundles the active terms of a scenario together with the
//! interaction window (`min_distance_squared ..= cutoff_distance_squared`)
//! outside which a pair contributes nothing.

use crate::simulation::engine::Engine;
use crate::simulation::params::Parameters;
use crate::simulation::states::{NVec2, NVec3, Particle};

// =========================================================================================
// Scalar laws
// =========================================================================================

/// Magnitude of the gravitational attraction between two particles.
/// G * m1 * m2 / d², zero outside the interaction window
pub fn gravitational_force(p1: &Particle, p2: &Particle, params: &Parameters) -> f64 {
    let d2 = (p2.x - p1.x).norm_squared();
    if d2 == 0.0 || d2 < params.min_distance_squared || d2 > params.cutoff_distance_squared {
        return 0.0;
    }
    params.gravitational_constant * p1.m * p2.m / d2
}

/// Signed Coulomb force between two particles: positive repels, negative attracts.
/// The squared distance is clamped to at least (r1 + r2)² so touching
/// particles never see the singular part of the law
pub fn electrostatic_force(p1: &Particle, p2: &Particle, params: &Parameters) -> f64 {
    if p1.charge == 0.0 || p2.charge == 0.0 {
        return 0.0;
    }
    let d2 = (p2.x - p1.x).norm_squared();
    let contact = p1.radius + p2.radius;
    let d2 = d2.max(contact * contact);
    if d2 == 0.0 || d2 < params.min_distance_squared {
        return 0.0;
    }
    params.coulomb_constant * p1.charge * p2.charge / d2
}

/// Lorentz force in the plane for a field of signed strength `b`
/// (positive out of the plane, negative into it): (q·vy·B, -q·vx·B)
pub fn magnetic_force(p: &Particle, b: f64) -> NVec2 {
    if p.charge == 0.0 || p.v == NVec2::zeros() {
        return NVec2::zeros();
    }
    let q = p.charge;
    NVec2::new(q * p.v.y * b, -q * p.v.x * b)
}

/// Full Lorentz force F = q (v × B) for an arbitrary field vector.
/// The particle moves in the plane, so its velocity has no z component
pub fn magnetic_force_3d(p: &Particle, b: NVec3) -> NVec3 {
    if p.charge == 0.0 {
        return NVec3::zeros();
    }
    let v = NVec3::new(p.v.x, p.v.y, 0.0);
    p.charge * v.cross(&b)
}

// =========================================================================================
// Pair terms
// =========================================================================================

/// A force acting between two particles.
/// `r` points from `p1` to `p2` and `r2 = |r|²` is already inside the interaction window.
/// Implementations return the force on `p1`; the force on `p2` is its negation
pub trait PairForce {
    fn pair_force(&self, p1: &Particle, p2: &Particle, r: NVec2, r2: f64) -> NVec2;
}

pub struct NewtonianGravity {
    pub g: f64, // gravitational constant
}

impl PairForce for NewtonianGravity {
    fn pair_force(&self, p1: &Particle, p2: &Particle, r: NVec2, r2: f64) -> NVec2 {
        let inv_r = r2.sqrt().recip();
        // attraction: along +r
        let magnitude = self.g * p1.m * p2.m * inv_r * inv_r;
        r * (magnitude * inv_r)
    }
}

pub struct Coulomb {
    pub k: f64, // Coulomb constant
}

impl PairForce for Coulomb {
    fn pair_force(&self, p1: &Particle, p2: &Particle, r: NVec2, r2: f64) -> NVec2 {
        if p1.charge == 0.0 || p2.charge == 0.0 {
            return NVec2::zeros();
        }
        let contact = p1.radius + p2.radius;
        let denom = r2.max(contact * contact);
        let magnitude = self.k * p1.charge * p2.charge / denom;

        // like charges push p1 away from p2, i.e. along -r
        let inv_r = r2.sqrt().recip();
        r * (-magnitude * inv_r)
    }
}

// =========================================================================================
// Field terms
// =========================================================================================

/// A force a particle feels from an external field
pub trait FieldForce {
    fn field_force(&self, p: &Particle) -> NVec2;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldOrientation {
    OutOfPlane,
    IntoPlane,
}

impl FieldOrientation {
    pub fn sign(self) -> f64 {
        match self {
            FieldOrientation::OutOfPlane => 1.0,
            FieldOrientation::IntoPlane => -1.0,
        }
    }
}

/// Uniform field perpendicular to the simulation plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformMagneticField {
    pub strength: f64,
    pub orientation: FieldOrientation,
}

impl UniformMagneticField {
    pub fn signed_strength(&self) -> f64 {
        self.strength * self.orientation.sign()
    }
}

impl FieldForce for UniformMagneticField {
    fn field_force(&self, p: &Particle) -> NVec2 {
        magnetic_force(p, self.signed_strength())
    }
}

/// Uniform field with arbitrary direction; only the in-plane part of the force is applied
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MagneticField3 {
    pub b: NVec3,
}

impl FieldForce for MagneticField3 {
    fn field_force(&self, p: &Particle) -> NVec2 {
        magnetic_force_3d(p, self.b).xy()
    }
}

/// Perpendicular field whose strength and orientation depend on position
pub struct NonUniformMagneticField<F>
where
    F: Fn(f64, f64) -> (f64, FieldOrientation),
{
    pub field: F,
}

impl<F> FieldForce for NonUniformMagneticField<F>
where
    F: Fn(f64, f64) -> (f64, FieldOrientation),
{
    fn field_force(&self, p: &Particle) -> NVec2 {
        let (strength, orientation) = (self.field)(p.x.x, p.x.y);
        magnetic_force(p, strength * orientation.sign())
    }
}

// =========================================================================================
// Force set
// =========================================================================================

/// Active force terms of a scenario.
/// Pair contributions are summed into a single vector per pair, field
/// contributions into a single vector per particle
pub struct ForceSet {
    pair_terms: Vec<Box<dyn PairForce + Send + Sync>>,
    field_terms: Vec<Box<dyn FieldForce + Send + Sync>>,
    min_distance_squared: f64,
    cutoff_distance_squared: f64,
}

impl ForceSet {
    /// Create an empty set using the interaction window of `params`
    pub fn new(params: &Parameters) -> Self {
        Self {
            pair_terms: Vec::new(),
            field_terms: Vec::new(),
            min_distance_squared: params.min_distance_squared,
            cutoff_distance_squared: params.cutoff_distance_squared,
        }
    }

    /// Gravity and Coulomb terms as toggled by the engine settings
    pub fn from_engine(engine: &Engine, params: &Parameters) -> Self {
        let mut forces = Self::new(params);
        if engine.gravity {
            forces = forces.with_pair(NewtonianGravity { g: params.gravitational_constant });
        }
        if engine.electrostatics {
            forces = forces.with_pair(Coulomb { k: params.coulomb_constant });
        }
        forces
    }

    /// Add a pair term
    pub fn with_pair<T>(mut self, term: T) -> Self
    where
        T: PairForce + Send + Sync + 'static,
    {
        self.pair_terms.push(Box::new(term));
        self
    }

    /// Add a field term
    pub fn with_field<T>(mut self, term: T) -> Self
    where
        T: FieldForce + Send + Sync + 'static,
    {
        self.field_terms.push(Box::new(term));
        self
    }

    pub fn has_pair_terms(&self) -> bool {
        !self.pair_terms.is_empty()
    }

    pub fn has_field_terms(&self) -> bool {
        !self.field_terms.is_empty()
    }

    /// Net force on `p1` due to `p2`, or `None` when the pair lies outside
    /// the interaction window and is skipped entirely
    pub fn pair_force(&self, p1: &Particle, p2: &Particle) -> Option<NVec2> {
        let r = p2.x - p1.x;
        let r2 = r.norm_squared();
        if r2 == 0.0 || r2 < self.min_distance_squared || r2 > self.cutoff_distance_squared {
            return None;
        }
        Some(
            self.pair_terms
                .iter()
                .fold(NVec2::zeros(), |f, term| f + term.pair_force(p1, p2, r, r2)),
        )
    }

    /// Net external-field force on `p`
    pub fn field_force(&self, p: &Particle) -> NVec2 {
        self.field_terms
            .iter()
            .fold(NVec2::zeros(), |f, term| f + term.field_force(p))
    }
}
