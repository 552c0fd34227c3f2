//! Wall and body–body collision resolution
//!
//! Both resolvers run after the gravity and position passes of the same
//! step. Wall resolution is per-body and per-axis: reflect the velocity
//! component with damping and clamp the position just inside the boundary.
//! Pairwise resolution is a direct O(n²) sweep with a mass-weighted
//! inelastic exchange along the contact normal; the symmetric `resolved`
//! guard makes each pair respond at most once per step.

use tracing::warn;

use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, Bounds};

/// Below this center distance the contact normal is undefined; the pair is
/// marked resolved without a response so NaN never enters velocity state.
const MIN_NORMAL_DISTANCE: f64 = 1e-9;

/// Reflect and clamp `body` against each cavity wall it has crossed.
/// The rebound speed is scaled by `(1 - damping)`, and the position is
/// clamped `margin` inside the wall so the same contact does not re-trigger
/// next step from floating-point residue.
pub fn resolve_wall_collisions(body: &mut Body, bounds: &Bounds, params: &Parameters) {
    let restitution = 1.0 - params.damping;
    for axis in 0..3 {
        if body.x[axis] - body.radius < bounds.min[axis] {
            body.v[axis] *= -restitution;
            body.x[axis] = bounds.min[axis] + body.radius + params.margin;
        } else if body.x[axis] + body.radius > bounds.max[axis] {
            body.v[axis] *= -restitution;
            body.x[axis] = bounds.max[axis] - body.radius - params.margin;
        }
    }
}

/// Resolve body `i` against every other body it is touching and has not yet
/// been resolved with this step.
///
/// For a touching pair the velocities are projected onto the contact normal
/// and exchanged with each body's mass as weight, scaled by `(1 - damping)`;
/// tangential components are untouched. Body `i` also receives a small
/// separating nudge along the normal. Both bodies record the other's id so
/// the pair is skipped when the sweep later reaches `j`.
pub fn resolve_body_collisions(bodies: &mut [Body], i: usize, params: &Parameters) {
    let restitution = 1.0 - params.damping;
    for j in 0..bodies.len() {
        if j == i {
            continue;
        }
        // Body i's own set was refreshed by its drift just before this
        // sweep. Body j's set is fresh only once j's drift this step has
        // run, which is the case exactly when j < i; for j > i it still
        // carries last step's marks and must not suppress a due response.
        if bodies[i].resolved.contains(&bodies[j].id)
            || (j < i && bodies[j].resolved.contains(&bodies[i].id))
        {
            continue;
        }

        let (a, b) = pair_mut(bodies, i, j);
        if !b.is_touching(&a.x, a.radius) {
            continue;
        }

        let offset = a.x - b.x;
        let dist = offset.norm();
        if dist < MIN_NORMAL_DISTANCE {
            // Coincident centers: no contact normal exists. Skip the
            // response but still consume the pair for this step.
            warn!(a = a.id, b = b.id, "coincident body centers, skipping collision response");
            a.resolved.insert(b.id);
            b.resolved.insert(a.id);
            continue;
        }
        let dir = offset / dist;

        // Normal-direction speeds of each body.
        let a_speed = a.v.dot(&dir);
        let b_speed = b.v.dot(&dir);

        // 1-D elastic exchange along the normal, mass-weighted, bled down
        // by the damping factor.
        let total_m = a.m + b.m;
        a.v += (b_speed - a_speed) * restitution * (2.0 * b.m / total_m) * dir;
        b.v += (a_speed - b_speed) * restitution * (2.0 * a.m / total_m) * dir;

        // Separating nudge, applied to `a` only. Not a full penetration
        // solve; residual overlap across one step is accepted.
        a.x += dir * (params.margin * 3.0);

        a.resolved.insert(b.id);
        b.resolved.insert(a.id);
    }
}

/// Simultaneous mutable access to two distinct bodies.
fn pair_mut(bodies: &mut [Body], i: usize, j: usize) -> (&mut Body, &mut Body) {
    debug_assert_ne!(i, j);
    if i < j {
        let (left, right) = bodies.split_at_mut(j);
        (&mut left[i], &mut right[0])
    } else {
        let (left, right) = bodies.split_at_mut(i);
        (&mut right[0], &mut left[j])
    }
}
