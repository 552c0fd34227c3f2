pub mod states;
pub mod params;
pub mod world;
pub mod integrator;
pub mod collisions;
pub mod scenario;
