use bevy::math::primitives::{Cuboid, Sphere};
use bevy::prelude::*;

use rand::Rng;

use crate::simulation::scenario::Scenario;

/// Component tagging each sphere with its body index into Scenario.world
#[derive(Component)]
struct BodyIndex(pub usize);

/// Render-side spin state, purely visual: slow tumble scaled inversely with
/// sphere size. Lives here, not in the physics core.
#[derive(Component)]
struct Spin {
    rate: f32, // radians per frame
}

/// Camera orbit speed around the cavity, radians per frame
const ORBIT_RATE: f32 = 0.0025;

/// Impulse kick magnitude range applied on Space, in multiples of gravity
const KICK_RANGE: std::ops::RangeInclusive<f64> = 2.0..=8.0;

/// Convenience entrypoint: hand the scenario to Bevy and run the viewer
pub fn run_3d(scenario: Scenario) {
    println!("run_3d: starting Bevy 3D viewer with {} bodies", scenario.world.bodies().len());

    App::new()
        .insert_resource(scenario)
        .add_plugins(DefaultPlugins)
        .add_systems(Startup, setup_3d)
        .add_systems(Update, (physics_step, sync_transforms, orbit_camera, kick_on_space))
        .run();
}

/// Startup system: spawn camera, light, cavity box, and one sphere per body
fn setup_3d(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    scenario: Res<Scenario>,
) {
    let bounds = scenario.world.bounds();
    let center = (bounds.min + bounds.max) * 0.5;
    let size = bounds.max - bounds.min;
    let extent = size.x.max(size.y).max(size.z) as f32;
    let center = Vec3::new(center.x as f32, center.y as f32, center.z as f32);

    // Camera pulled back far enough to frame the whole cavity
    commands.spawn(Camera3dBundle {
        camera: Camera {
            clear_color: ClearColorConfig::Custom(Color::srgb(0.0, 0.0, 0.0)),
            ..Default::default()
        },
        transform: Transform::from_translation(center + Vec3::new(0.0, 0.3 * extent, 1.8 * extent))
            .looking_at(center, Vec3::Y),
        ..Default::default()
    });

    // Basic point light above the cavity
    commands.spawn(PointLightBundle {
        point_light: PointLight {
            intensity: 2_000_000.0,
            range: 4.0 * extent,
            ..Default::default()
        },
        transform: Transform::from_translation(center + Vec3::new(0.4 * extent, extent, 0.8 * extent)),
        ..Default::default()
    });

    // Semi-transparent box so the walls the bodies bounce off are visible
    commands.spawn(PbrBundle {
        mesh: meshes.add(Cuboid::new(size.x as f32, size.y as f32, size.z as f32).mesh()),
        material: materials.add(StandardMaterial {
            base_color: Color::srgba(0.7, 0.7, 0.7, 0.12),
            alpha_mode: AlphaMode::Blend,
            unlit: true,
            cull_mode: None,
            ..Default::default()
        }),
        transform: Transform::from_translation(center),
        ..Default::default()
    });

    // Spawn one sphere per body with a random color and a size-scaled spin
    let mut rng = rand::thread_rng();
    for b in scenario.world.bodies() {
        commands.spawn((
            PbrBundle {
                mesh: meshes.add(Sphere::new(b.radius as f32).mesh()),
                material: materials.add(StandardMaterial {
                    base_color: Color::srgb(
                        rng.gen_range(0.1..1.0),
                        rng.gen_range(0.1..1.0),
                        rng.gen_range(0.1..1.0),
                    ),
                    ..Default::default()
                }),
                transform: Transform::from_xyz(b.x.x as f32, b.x.y as f32, b.x.z as f32),
                ..Default::default()
            },
            BodyIndex(b.id),
            Spin {
                rate: (10.0 / b.radius as f32).to_radians(),
            },
        ));
    }
}

/// Per-frame physics: exactly one fixed step, never wall-clock-scaled
fn physics_step(mut scenario: ResMut<Scenario>) {
    let Scenario {
        world, parameters, ..
    } = &mut *scenario;

    world.tick(parameters);
}

/// Copy body positions into sphere transforms and advance the visual spin
fn sync_transforms(
    scenario: Res<Scenario>,
    mut query: Query<(&BodyIndex, &Spin, &mut Transform)>,
) {
    for (BodyIndex(i), spin, mut transform) in &mut query {
        if let Some(b) = scenario.world.body(*i) {
            transform.translation = Vec3::new(b.x.x as f32, b.x.y as f32, b.x.z as f32);
            transform.rotate_z(spin.rate);
        }
    }
}

/// Slow orbit of the camera around the vertical axis through the cavity center
fn orbit_camera(scenario: Res<Scenario>, mut query: Query<&mut Transform, With<Camera3d>>) {
    let bounds = scenario.world.bounds();
    let center = (bounds.min + bounds.max) * 0.5;
    let center = Vec3::new(center.x as f32, center.y as f32, center.z as f32);

    for mut transform in &mut query {
        transform.rotate_around(center, Quat::from_rotation_y(ORBIT_RATE));
        transform.look_at(center, Vec3::Y);
    }
}

/// Space applies a one-off randomized impulse against gravity to every body
fn kick_on_space(keys: Res<ButtonInput<KeyCode>>, mut scenario: ResMut<Scenario>) {
    if !keys.just_pressed(KeyCode::Space) {
        return;
    }

    let mut rng = rand::thread_rng();
    let gravity = scenario.parameters.gravity;
    let ids: Vec<usize> = scenario.world.bodies().iter().map(|b| b.id).collect();
    for id in ids {
        let dv = -gravity * rng.gen_range(KICK_RANGE);
        scenario.world.apply_impulse(id, dv);
    }
}
