//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - fixed step duration `dt` (never wall-clock-derived),
//! - the constant gravity vector,
//! - collision damping and wall/contact margin,
//! - random seed for scenario generation

use crate::simulation::states::NVec3;

#[derive(Debug, Clone)]
pub struct Parameters {
    pub dt: f64, // fixed step duration
    pub gravity: NVec3, // constant gravity vector
    pub damping: f64, // fraction of rebound speed lost per collision, in [0, 1)
    pub margin: f64, // small clamp offset to keep bodies off boundaries
    pub seed: u64, // deterministic seed for randomized scenarios
}
