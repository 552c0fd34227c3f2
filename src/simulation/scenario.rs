//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle
//! (`Scenario`) containing:
//! - numerical parameters (`Parameters`)
//! - the world state (`World` with all bodies placed, tick count 0)
//! - the tracked body index reported by headless runs
//!
//! Explicit bodies are inserted first; randomized bodies are then appended
//! using rejection sampling so that no two initial spheres overlap. The
//! generator is seeded, so identical configs build identical worlds.
//!
//! The scenario is inserted into Bevy as a `Resource` and consumed by the
//! physics-step and rendering systems.

use anyhow::{bail, ensure, Result};
use bevy::prelude::Resource;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::configuration::config::{BodyConfig, RandomBodiesConfig, ScenarioConfig};
use crate::simulation::params::Parameters;
use crate::simulation::states::{Bounds, NVec3, World};

/// Give up on randomized placement after this many rejected candidates per
/// requested body; a tighter cavity than this is a config mistake.
const MAX_PLACEMENT_ATTEMPTS_PER_BODY: usize = 10_000;

/// Bevy resource representing a fully-initialized simulation scenario
#[derive(Resource)]
pub struct Scenario {
    pub parameters: Parameters,
    pub world: World,
    pub tracked: usize,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self> {
        let p_cfg = &cfg.parameters;
        ensure!(p_cfg.dt > 0.0, "dt must be positive, got {}", p_cfg.dt);
        ensure!(
            (0.0..1.0).contains(&p_cfg.damping),
            "damping must be in [0, 1), got {}",
            p_cfg.damping
        );
        ensure!(p_cfg.margin > 0.0, "margin must be positive, got {}", p_cfg.margin);
        for axis in 0..3 {
            ensure!(
                cfg.bounds.min[axis] < cfg.bounds.max[axis],
                "bounds are inverted on axis {axis}"
            );
        }

        let parameters = Parameters {
            dt: p_cfg.dt,
            gravity: NVec3::from(p_cfg.gravity),
            damping: p_cfg.damping,
            margin: p_cfg.margin,
            seed: p_cfg.seed,
        };

        let bounds = Bounds {
            min: NVec3::from(cfg.bounds.min),
            max: NVec3::from(cfg.bounds.max),
        };
        let mut world = World::new(bounds);

        // Explicit bodies first, in config order.
        for bc in &cfg.bodies {
            world.add_body(bc.m, bc.radius, NVec3::from(bc.x), NVec3::from(bc.v))?;
        }

        // Then the randomized batch, rejection-sampled against everything
        // already placed.
        if let Some(r_cfg) = &cfg.random {
            let mut rng = StdRng::seed_from_u64(parameters.seed);
            let generated =
                randomize_bodies(r_cfg, world.bodies().iter().map(|b| (b.x, b.radius)), &mut rng)?;
            for bc in generated {
                world.add_body(bc.m, bc.radius, NVec3::from(bc.x), NVec3::from(bc.v))?;
            }
        }

        ensure!(
            cfg.tracked < world.bodies().len().max(1),
            "tracked body index {} out of range ({} bodies)",
            cfg.tracked,
            world.bodies().len()
        );

        info!(
            bodies = world.bodies().len(),
            dt = parameters.dt,
            damping = parameters.damping,
            "scenario built"
        );

        Ok(Self {
            parameters,
            world,
            tracked: cfg.tracked,
        })
    }
}

/// Generate `cfg.count` body descriptors with uniformly sampled radius,
/// position, and velocity, such that no candidate overlaps any sphere in
/// `placed` or any earlier candidate. Mass is derived as radius³.
pub fn randomize_bodies(
    cfg: &RandomBodiesConfig,
    placed: impl Iterator<Item = (NVec3, f64)>,
    rng: &mut StdRng,
) -> Result<Vec<BodyConfig>> {
    ensure!(cfg.radius[0] > 0.0, "random radius range must be positive");
    ensure!(cfg.radius[0] <= cfg.radius[1], "random radius range is inverted");
    for axis in 0..3 {
        ensure!(
            cfg.x_min[axis] <= cfg.x_max[axis],
            "random position range is inverted on axis {axis}"
        );
        ensure!(
            cfg.v_min[axis] <= cfg.v_max[axis],
            "random velocity range is inverted on axis {axis}"
        );
    }

    let mut occupied: Vec<(NVec3, f64)> = placed.collect();
    let mut out = Vec::with_capacity(cfg.count);
    let mut attempts = 0usize;

    while out.len() < cfg.count {
        if attempts >= MAX_PLACEMENT_ATTEMPTS_PER_BODY * cfg.count {
            bail!(
                "could not place {} non-overlapping bodies after {} attempts",
                cfg.count,
                attempts
            );
        }
        attempts += 1;

        let radius = rng.gen_range(cfg.radius[0]..=cfg.radius[1]);
        let x = NVec3::new(
            rng.gen_range(cfg.x_min[0]..=cfg.x_max[0]),
            rng.gen_range(cfg.x_min[1]..=cfg.x_max[1]),
            rng.gen_range(cfg.x_min[2]..=cfg.x_max[2]),
        );
        let v = NVec3::new(
            rng.gen_range(cfg.v_min[0]..=cfg.v_max[0]),
            rng.gen_range(cfg.v_min[1]..=cfg.v_max[1]),
            rng.gen_range(cfg.v_min[2]..=cfg.v_max[2]),
        );

        let touching = occupied
            .iter()
            .any(|(ox, oradius)| (x - ox).norm() < radius + oradius);
        if touching {
            continue;
        }

        occupied.push((x, radius));
        out.push(BodyConfig {
            m: radius.powi(3),
            radius,
            x: [x.x, x.y, x.z],
            v: [v.x, v.y, v.z],
        });
    }

    Ok(out)
}
