//! Fixed-step velocity integration
//!
//! One pass per step: every body's velocity picks up one step of constant
//! gravity before any position changes. Splitting the velocity pass from the
//! position/collision pass keeps collision responses consistent — they all
//! see post-gravity velocities.

use crate::simulation::params::Parameters;
use crate::simulation::states::Body;

/// Kick: v_n+1 = v_n + dt * g, for every body.
pub fn gravity_pass(bodies: &mut [Body], params: &Parameters) {
    for b in bodies.iter_mut() {
        b.apply_gravity(&params.gravity, params.dt);
    }
}
