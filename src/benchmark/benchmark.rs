use std::time::Instant;

use crate::simulation::params::Parameters;
use crate::simulation::states::{Bounds, NVec3, World};

/// Helper to build a world of `n` small spheres scattered deterministically
/// inside a cubic cavity, no rand needed
fn make_world(n: usize) -> World {
    let bounds = Bounds {
        min: NVec3::new(-200.0, -200.0, -200.0),
        max: NVec3::new(200.0, 200.0, 200.0),
    };
    let mut world = World::new(bounds);

    for i in 0..n {
        let i_f = i as f64;
        let x = NVec3::new(
            (i_f * 0.37).sin() * 150.0,
            (i_f * 0.13).cos() * 150.0,
            (i_f * 0.07).sin() * 150.0,
        );
        let v = NVec3::new((i_f * 0.19).sin() * 10.0, 0.0, (i_f * 0.11).cos() * 10.0);

        world
            .add_body(1.0, 1.0, x, v)
            .expect("benchmark body descriptors are valid");
    }

    world
}

fn make_params() -> Parameters {
    Parameters {
        dt: 0.1,
        gravity: NVec3::new(0.0, -7.0, 0.0),
        damping: 0.5,
        margin: 0.1,
        seed: 42,
    }
}

/// Benchmark the O(n²) tick across a range of body counts
/// Paste output directly into a spreadsheet to graph
pub fn bench_tick() {
    // Different world sizes to test
    let ns = [50, 100, 200, 400, 800, 1600, 3200];
    let steps = 20; // timed steps per size

    println!("N,tick_ms");

    for n in ns {
        let mut world = make_world(n);
        let params = make_params();

        // Warm up
        world.tick(&params);

        let t0 = Instant::now();
        for _ in 0..steps {
            world.tick(&params);
        }
        let ms_per_tick = t0.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        println!("{},{:.6}", n, ms_per_tick);
    }
}
