//! Core state types for the cavity simulation.
//!
//! Defines the physical state structs:
//! - `Body` — one sphere (mass, radius, position, velocity) plus the
//!   per-step collision bookkeeping set
//! - `Bounds` — the fixed rectangular cavity, one (min, max) pair per axis
//! - `World` — the owned body collection, cavity bounds, and tick counter
//!
//! `World` owns all bodies exclusively; mutation happens only through the
//! step functions in `integrator`/`collisions` driven by `World::tick`.

use std::collections::HashSet;

use nalgebra::Vector3;
use thiserror::Error;

pub type NVec3 = Vector3<f64>;

/// Rejected body descriptors. Bad mass or radius values would surface as
/// undefined physics several steps later, so construction fails fast instead.
#[derive(Debug, Error, PartialEq)]
pub enum BodyError {
    #[error("body mass must be positive and finite, got {0}")]
    InvalidMass(f64),
    #[error("body radius must be positive and finite, got {0}")]
    InvalidRadius(f64),
}

#[derive(Debug, Clone)]
pub struct Body {
    pub id: usize, // stable identifier, assigned by World at insertion
    pub x: NVec3, // position
    pub v: NVec3, // velocity
    pub m: f64, // mass
    pub radius: f64, // contact radius
    pub resolved: HashSet<usize>, // ids already resolved against, this step
}

impl Body {
    /// Build a validated body. `id` is assigned by [`World::add_body`].
    pub fn new(id: usize, m: f64, radius: f64, x: NVec3, v: NVec3) -> Result<Self, BodyError> {
        if !(m.is_finite() && m > 0.0) {
            return Err(BodyError::InvalidMass(m));
        }
        if !(radius.is_finite() && radius > 0.0) {
            return Err(BodyError::InvalidRadius(radius));
        }
        Ok(Self {
            id,
            x,
            v,
            m,
            radius,
            resolved: HashSet::new(),
        })
    }

    /// Kick the velocity by one step of constant gravity: v += dt * g
    pub fn apply_gravity(&mut self, gravity: &NVec3, dt: f64) {
        self.v += dt * gravity;
    }

    /// Drift the position by one step: x += dt * v
    /// Also clears the collision bookkeeping for the new step.
    pub fn apply_velocity(&mut self, dt: f64) {
        self.x += dt * self.v;
        self.resolved.clear();
    }

    /// True iff a sphere at `x` with `radius` overlaps this body
    /// (strict center-distance test; coincident centers count as touching).
    pub fn is_touching(&self, x: &NVec3, radius: f64) -> bool {
        (x - self.x).norm() < radius + self.radius
    }
}

/// The cavity walls: an axis-aligned box, min/max per axis.
#[derive(Debug, Clone, Copy)]
pub struct Bounds {
    pub min: NVec3,
    pub max: NVec3,
}

#[derive(Debug, Clone)]
pub struct World {
    pub(crate) bodies: Vec<Body>,
    pub(crate) bounds: Bounds,
    pub(crate) ticks: u64,
}

impl World {
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bodies: Vec::new(),
            bounds,
            ticks: 0,
        }
    }

    /// Insert a body and return its id (its index in the owned sequence).
    /// The scenario builder guarantees the non-overlap precondition for
    /// initial placement; it is not re-validated here.
    pub fn add_body(&mut self, m: f64, radius: f64, x: NVec3, v: NVec3) -> Result<usize, BodyError> {
        let id = self.bodies.len();
        self.bodies.push(Body::new(id, m, radius, x, v)?);
        Ok(id)
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body(&self, id: usize) -> Option<&Body> {
        self.bodies.get(id)
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Steps advanced so far. Only external callers consult this (e.g. to
    /// time an impulse); the step logic itself never reads it.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
