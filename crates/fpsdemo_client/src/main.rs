use anyhow::Context;
use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use fpsdemo_simulation::physics::{environment_groups, prop_groups};
use fpsdemo_simulation::{
    init_logger, log_info, log_warning, spawn_fps_character, FpsDemoConfig, SimulationPlugin,
};

mod camera;
mod input;
mod rendering;

use camera::FirstPersonViewPlugin;
use input::DeviceInputPlugin;
use rendering::RenderingSyncPlugin;

/// Путь к JSON конфигу
const CONFIG_ENV: &str = "FPSDEMO_CONFIG";

fn main() {
    init_logger();

    let config = match load_config() {
        Ok(Some(config)) => config,
        Ok(None) => FpsDemoConfig::default(),
        Err(err) => {
            log_warning(&format!("{:#}, using default config", err));
            FpsDemoConfig::default()
        }
    };

    App::new()
        // Bevy defaults (rendering, input, time, etc.)
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "FPS Demo".to_string(),
                resolution: (1280., 720.).into(),
                ..default()
            }),
            ..default()
        }))
        // Rapier: интеграция, отскоки, CollisionEvent
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())
        // Конфиг до SimulationPlugin (init_resource его не перезапишет)
        .insert_resource(config)
        // Simulation (headless ECS logic)
        .add_plugins(SimulationPlugin)
        // Devices → input events
        .add_plugins(DeviceInputPlugin)
        // FOV → render projection
        .add_plugins(FirstPersonViewPlugin)
        // Projectile visuals
        .add_plugins(RenderingSyncPlugin)
        .add_systems(Startup, setup_scene)
        .run();
}

/// Конфиг из `FPSDEMO_CONFIG` (None = переменная не задана)
fn load_config() -> anyhow::Result<Option<FpsDemoConfig>> {
    let Ok(path) = std::env::var(CONFIG_ENV) else {
        return Ok(None);
    };

    let config = FpsDemoConfig::load(&path)
        .with_context(|| format!("{}={} could not be loaded", CONFIG_ENV, path))?;

    log_info(&format!("Loaded config from {}", path));
    Ok(Some(config))
}

/// Spawn пол, ящики для стрельбы, свет и игрока
fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<FpsDemoConfig>,
) {
    // Ground (40x40m), верх коллайдера на y = 0
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::new(Vec3::Y, Vec2::splat(20.0)))),
        MeshMaterial3d(materials.add(Color::srgb(0.3, 0.5, 0.3))),
        Transform::default(),
    ));
    commands.spawn((
        Transform::from_xyz(0.0, -0.5, 0.0),
        RigidBody::Fixed,
        Collider::cuboid(20.0, 0.5, 20.0),
        environment_groups(),
    ));

    // Стена позади ящиков: снаряды от неё отскакивают
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(12.0, 4.0, 0.5))),
        MeshMaterial3d(materials.add(Color::srgb(0.5, 0.5, 0.55))),
        Transform::from_xyz(0.0, 2.0, -16.0),
        RigidBody::Fixed,
        Collider::cuboid(6.0, 2.0, 0.25),
        environment_groups(),
    ));

    // Dynamic ящики: получают impulse от попаданий
    let crate_mesh = meshes.add(Cuboid::new(1.0, 1.0, 1.0));
    let crate_material = materials.add(Color::srgb(0.7, 0.5, 0.3));
    for x in -2..=2 {
        for level in 0..2 {
            commands.spawn((
                Mesh3d(crate_mesh.clone()),
                MeshMaterial3d(crate_material.clone()),
                Transform::from_xyz(x as f32 * 1.2, 0.5 + level as f32 * 1.0, -10.0),
                RigidBody::Dynamic,
                Collider::cuboid(0.5, 0.5, 0.5),
                ColliderMassProperties::Density(400.0),
                prop_groups(),
            ));
        }
    }

    // Directional light (sun)
    commands.spawn((
        DirectionalLight {
            illuminance: 10000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_rotation_x(-std::f32::consts::FRAC_PI_4)),
    ));

    // Ambient light
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 300.0,
        affects_lightmapped_meshes: false,
    });

    // Игрок: камера добавляется FirstPersonViewPlugin'ом
    let player = spawn_fps_character(
        &mut commands,
        Vec3::new(0.0, config.character.capsule_half_height, 0.0),
        &config,
    );
    commands.entity(player).insert(Visibility::default());
}
