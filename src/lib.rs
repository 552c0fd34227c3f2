pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod benchmark;

pub use simulation::states::{Body, BodyError, Bounds, NVec3, World};
pub use simulation::params::Parameters;
pub use simulation::scenario::{randomize_bodies, Scenario};

pub use configuration::config::{
    BodyConfig, BoundsConfig, ParametersConfig, RandomBodiesConfig, ScenarioConfig,
};

pub use visualization::vis3d::run_3d;

pub use benchmark::benchmark::bench_tick;
