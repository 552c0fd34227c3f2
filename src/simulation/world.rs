//! Step orchestration for the cavity world
//!
//! `World::tick` advances the simulation by one fixed step:
//! 1. gravity pass — every body's velocity is integrated first,
//! 2. per body, in creation order: position drift (which clears the
//!    per-step collision bookkeeping), wall resolution, pairwise resolution
//!    against the full collection.
//!
//! Single-threaded and non-interruptible; one call is one complete step.

use crate::simulation::collisions::{resolve_body_collisions, resolve_wall_collisions};
use crate::simulation::integrator::gravity_pass;
use crate::simulation::params::Parameters;
use crate::simulation::states::{NVec3, World};

impl World {
    /// Advance the world by one step. Returns the new step count.
    pub fn tick(&mut self, params: &Parameters) -> u64 {
        gravity_pass(&mut self.bodies, params);

        for i in 0..self.bodies.len() {
            self.bodies[i].apply_velocity(params.dt);
            resolve_wall_collisions(&mut self.bodies[i], &self.bounds, params);
            resolve_body_collisions(&mut self.bodies, i, params);
        }

        self.ticks += 1;
        self.ticks
    }

    /// One-off velocity kick for the driving loop, applied between ticks.
    pub fn apply_impulse(&mut self, id: usize, dv: NVec3) {
        if let Some(b) = self.bodies.get_mut(id) {
            b.v += dv;
        }
    }
}
