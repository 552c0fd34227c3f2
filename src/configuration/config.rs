//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! scenario. A scenario consists of:
//!
//! - [`ParametersConfig`]   – step size, gravity, damping, margin, seed
//! - [`BoundsConfig`]       – the cavity walls
//! - [`BodyConfig`]         – initial state for one explicit body
//! - [`RandomBodiesConfig`] – randomized non-overlapping body generation
//! - [`ScenarioConfig`]     – top-level wrapper loaded from YAML
//!
//! # YAML format
//! An example scenario YAML matching these types:
//!
//! ```yaml
//! parameters:
//!   dt: 0.1                 # fixed step duration
//!   gravity: [0.0, -7.0, 0.0]
//!   damping: 0.5            # rebound fraction lost per collision
//!   margin: 0.1             # wall/contact clamp offset
//!   seed: 42
//!
//! bounds:
//!   min: [-200.0, -200.0, -200.0]
//!   max: [ 200.0,  800.0,  200.0]
//!
//! tracked: 0                # body whose position headless runs report
//!
//! bodies:
//!   - m: 8000.0
//!     radius: 20.0
//!     x: [0.0, 300.0, 0.0]
//!     v: [5.0, 0.0, 0.0]
//!
//! random:
//!   count: 50
//!   radius: [20.0, 20.0]    # mass is derived as radius^3
//!   x_min: [-100.0, 230.0, 0.0]
//!   x_max: [ 190.0, 380.0, 190.0]
//!   v_min: [-7.0, -20.0, -25.0]
//!   v_max: [10.0,  20.0, -10.0]
//! ```
//!
//! Unset parameters fall back to the reference constants. The scenario
//! builder maps this configuration into the runtime `Parameters`/`World`.

use serde::Deserialize;

/// Step, gravity, and collision parameters for a scenario
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ParametersConfig {
    pub dt: f64,               // fixed step duration
    pub gravity: [f64; 3],     // constant gravity vector
    pub damping: f64,          // rebound fraction lost per collision, in [0, 1)
    pub margin: f64,           // wall/contact clamp offset
    pub seed: u64,             // seed for randomized body generation
}

impl Default for ParametersConfig {
    fn default() -> Self {
        Self {
            dt: 0.1,
            gravity: [0.0, -7.0, 0.0],
            damping: 0.5,
            margin: 0.1,
            seed: 42,
        }
    }
}

/// The cavity walls, min/max per axis
#[derive(Deserialize, Debug, Clone)]
pub struct BoundsConfig {
    pub min: [f64; 3],
    pub max: [f64; 3],
}

impl Default for BoundsConfig {
    fn default() -> Self {
        Self {
            min: [-200.0, -200.0, -200.0],
            max: [200.0, 800.0, 200.0],
        }
    }
}

/// Initial state for a single explicit body
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub m: f64,       // mass
    pub radius: f64,  // contact radius
    pub x: [f64; 3],  // initial position
    pub v: [f64; 3],  // initial velocity
}

/// Randomized body generation: `count` spheres placed so that no two
/// initial spheres overlap, with mass derived as radius³
#[derive(Deserialize, Debug, Clone)]
pub struct RandomBodiesConfig {
    pub count: usize,
    pub radius: [f64; 2], // [min, max] radius range
    pub x_min: [f64; 3],
    pub x_max: [f64; 3],
    pub v_min: [f64; 3],
    pub v_max: [f64; 3],
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Default)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub parameters: ParametersConfig,
    #[serde(default)]
    pub bounds: BoundsConfig,
    #[serde(default)]
    pub tracked: usize, // body whose position headless runs report
    #[serde(default)]
    pub bodies: Vec<BodyConfig>, // explicit bodies, inserted first
    #[serde(default)]
    pub random: Option<RandomBodiesConfig>, // generated bodies, appended after
}
