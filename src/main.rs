use bouncesim::{bench_tick, run_3d, Scenario, ScenarioConfig};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file name, looked up under scenarios/
    #[arg(short, default_value = "bouncing.yaml")]
    file_name: String,

    /// Advance this many ticks without a window and print the tracked body
    #[arg(long)]
    headless: Option<u64>,

    /// Run the tick scaling benchmark instead of a scenario
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("scenarios")
        .join(file_name);
    let file = File::open(&config_path)
        .with_context(|| format!("opening scenario {}", config_path.display()))?;
    let reader = BufReader::new(file);
    let scenario_cfg: ScenarioConfig = serde_yaml::from_reader(reader)?;

    Ok(scenario_cfg)
}

/// Fixed-cadence loop with no renderer: step count is an explicit input, so
/// runs are reproducible and wall-clock never enters the simulation.
fn run_headless(mut scenario: Scenario, ticks: u64) {
    for _ in 0..ticks {
        scenario.world.tick(&scenario.parameters);
    }
    match scenario.world.body(scenario.tracked) {
        Some(b) => info!(
            ticks = scenario.world.ticks(),
            x = b.x.x,
            y = b.x.y,
            z = b.x.z,
            "tracked body position"
        ),
        None => info!(ticks = scenario.world.ticks(), "world has no bodies"),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.bench {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .init();
        bench_tick();
        return Ok(());
    }

    let scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    match args.headless {
        Some(ticks) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
                .init();
            let scenario = Scenario::build_scenario(scenario_cfg)?;
            run_headless(scenario, ticks);
        }
        None => {
            // Bevy's LogPlugin installs the tracing subscriber on this path.
            let scenario = Scenario::build_scenario(scenario_cfg)?;
            run_3d(scenario);
        }
    }

    Ok(())
}
