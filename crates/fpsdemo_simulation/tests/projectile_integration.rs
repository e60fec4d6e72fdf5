//! Projectile integration test
//!
//! Headless App без RapierPhysicsPlugin: интеграции нет, столкновения
//! подаются напрямую как CollisionEvent. Проверяем реакцию на hit,
//! lifespan и ограничение скорости.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use bevy_rapier3d::rapier::geometry::CollisionEventFlags;
use fpsdemo_simulation::config::ProjectileConfig;
use fpsdemo_simulation::projectile::Lifespan;
use fpsdemo_simulation::*;

fn create_projectile_app() -> App {
    let mut app = create_headless_app();
    app.add_plugins(SimulationPlugin);
    app.update();
    app
}

fn spawn_at(app: &mut App, position: Vec3, config: &ProjectileConfig) -> Entity {
    let transform = Transform::from_translation(position).looking_to(Vec3::NEG_Z, Vec3::Y);
    let projectile = spawn_projectile(&mut app.world_mut().commands(), transform, None, config);
    app.world_mut().flush();
    projectile
}

fn spawn_target(app: &mut App, body: RigidBody, position: Vec3) -> Entity {
    app.world_mut()
        .spawn((
            body,
            Transform::from_translation(position),
            GlobalTransform::from_translation(position),
        ))
        .id()
}

fn collide(app: &mut App, first: Entity, second: Entity) {
    app.world_mut()
        .send_event(CollisionEvent::Started(first, second, CollisionEventFlags::empty()));
}

fn hits(app: &App) -> Vec<ProjectileHit> {
    let events = app.world().resource::<Events<ProjectileHit>>();
    events.get_cursor().read(events).copied().collect()
}

fn exists(app: &App, entity: Entity) -> bool {
    app.world().entities().contains(entity)
}

#[test]
fn test_spawned_projectile_physics() {
    let mut app = create_projectile_app();
    let projectile = spawn_at(&mut app, Vec3::ZERO, &ProjectileConfig::default());

    let world = app.world();
    assert_eq!(world.get::<RigidBody>(projectile), Some(&RigidBody::Dynamic));
    assert_eq!(world.get::<Velocity>(projectile).unwrap().linvel, Vec3::new(0.0, 0.0, -90.0));
    assert_eq!(world.get::<GravityScale>(projectile).unwrap().0, 0.05);
    assert_eq!(world.get::<Restitution>(projectile).unwrap().coefficient, 0.6);
    assert_eq!(world.get::<Lifespan>(projectile).unwrap().remaining, 3.0);
}

#[test]
fn test_projectile_expires_after_lifespan() {
    let mut app = create_projectile_app();
    let projectile = spawn_at(&mut app, Vec3::ZERO, &ProjectileConfig::default());

    for _ in 0..170 {
        app.update();
    }
    assert!(exists(&app, projectile), "3 секунды ещё не прошли");

    for _ in 0..15 {
        app.update();
    }
    assert!(!exists(&app, projectile));
}

#[test]
fn test_speed_clamped_to_max() {
    let mut app = create_projectile_app();
    let projectile = spawn_at(&mut app, Vec3::ZERO, &ProjectileConfig::default());

    app.world_mut().get_mut::<Velocity>(projectile).unwrap().linvel = Vec3::new(200.0, 0.0, 0.0);
    app.update();

    let velocity = app.world().get::<Velocity>(projectile).unwrap().linvel;
    assert!((velocity.length() - 90.0).abs() < 1e-3, "velocity = {:?}", velocity);
}

#[test]
fn test_rotation_follows_velocity() {
    let mut app = create_projectile_app();
    let projectile = spawn_at(&mut app, Vec3::ZERO, &ProjectileConfig::default());

    app.world_mut().get_mut::<Velocity>(projectile).unwrap().linvel = Vec3::new(50.0, 0.0, 0.0);
    app.update();

    let transform = app.world().get::<Transform>(projectile).unwrap();
    assert!((*transform.forward() - Vec3::X).length() < 1e-4);
}

#[test]
fn test_hit_dynamic_body_pushes_and_destroys() {
    let mut app = create_projectile_app();
    let projectile = spawn_at(&mut app, Vec3::ZERO, &ProjectileConfig::default());
    let target = spawn_target(&mut app, RigidBody::Dynamic, Vec3::new(0.0, 0.0, -2.0));

    collide(&mut app, projectile, target);
    app.update();

    assert!(!exists(&app, projectile));

    let external = app.world().get::<ExternalImpulse>(target).unwrap();
    assert!((external.impulse - Vec3::new(0.0, 0.0, -9000.0)).length() < 1e-2);
    // Удар по линии центра масс: без вращения
    assert!(external.torque_impulse.length() < 1e-3);

    let hits = hits(&app);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].projectile, projectile);
    assert_eq!(hits[0].other, target);
    assert!(hits[0].impulse.is_some());
}

#[test]
fn test_hit_detected_in_either_event_order() {
    let mut app = create_projectile_app();
    let projectile = spawn_at(&mut app, Vec3::ZERO, &ProjectileConfig::default());
    let target = spawn_target(&mut app, RigidBody::Dynamic, Vec3::new(0.0, 0.0, -2.0));

    collide(&mut app, target, projectile);
    app.update();

    assert!(!exists(&app, projectile));
    assert!(app.world().get::<ExternalImpulse>(target).is_some());
}

#[test]
fn test_impulse_accumulates_with_existing() {
    let mut app = create_projectile_app();
    let projectile = spawn_at(&mut app, Vec3::ZERO, &ProjectileConfig::default());
    let target = spawn_target(&mut app, RigidBody::Dynamic, Vec3::new(0.0, 0.0, -2.0));
    app.world_mut().entity_mut(target).insert(ExternalImpulse {
        impulse: Vec3::Y * 10.0,
        torque_impulse: Vec3::ZERO,
    });

    collide(&mut app, projectile, target);
    app.update();

    let external = app.world().get::<ExternalImpulse>(target).unwrap();
    assert!((external.impulse - Vec3::new(0.0, 10.0, -9000.0)).length() < 1e-2);
}

#[test]
fn test_static_surface_only_bounces() {
    let mut app = create_projectile_app();
    let projectile = spawn_at(&mut app, Vec3::ZERO, &ProjectileConfig::default());
    let wall = spawn_target(&mut app, RigidBody::Fixed, Vec3::new(0.0, 0.0, -2.0));

    collide(&mut app, projectile, wall);
    app.update();

    assert!(exists(&app, projectile));
    assert!(app.world().get::<ExternalImpulse>(wall).is_none());
    assert_eq!(app.world().get::<RigidBody>(projectile), Some(&RigidBody::Dynamic));

    let hits = hits(&app);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].impulse, None);
}

#[test]
fn test_collider_without_body_is_not_pushed() {
    let mut app = create_projectile_app();
    let projectile = spawn_at(&mut app, Vec3::ZERO, &ProjectileConfig::default());
    let scenery = app.world_mut().spawn(Transform::default()).id();

    collide(&mut app, projectile, scenery);
    app.update();

    assert!(exists(&app, projectile));
    assert!(app.world().get::<ExternalImpulse>(scenery).is_none());
}

#[test]
fn test_no_bounce_projectile_stops() {
    let mut app = create_projectile_app();
    let config = ProjectileConfig {
        should_bounce: false,
        ..default()
    };
    let projectile = spawn_at(&mut app, Vec3::ZERO, &config);
    let wall = spawn_target(&mut app, RigidBody::Fixed, Vec3::new(0.0, 0.0, -2.0));

    collide(&mut app, projectile, wall);
    app.update();

    let world = app.world();
    assert_eq!(world.get::<Velocity>(projectile).unwrap().linvel, Vec3::ZERO);
    assert_eq!(world.get::<RigidBody>(projectile), Some(&RigidBody::Fixed));
}

#[test]
fn test_stopped_events_ignored() {
    let mut app = create_projectile_app();
    let projectile = spawn_at(&mut app, Vec3::ZERO, &ProjectileConfig::default());
    let target = spawn_target(&mut app, RigidBody::Dynamic, Vec3::new(0.0, 0.0, -2.0));

    app.world_mut()
        .send_event(CollisionEvent::Stopped(projectile, target, CollisionEventFlags::empty()));
    app.update();

    assert!(exists(&app, projectile));
    assert!(app.world().get::<ExternalImpulse>(target).is_none());
    assert!(hits(&app).is_empty());
}
