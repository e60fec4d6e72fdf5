//! Character integration test
//!
//! Headless App + SimulationPlugin, input подаётся событиями.
//! Один `app.update()` = один fixed tick (после warm-up frame).
//!
//! Порядок внутри frame: FixedUpdate → Update. Input, поданный в frame N,
//! превращается в velocity только fixed tick'ом frame N+1.
//!
//! Проверяем:
//! - выбор max walk speed (rush / default, forward / right)
//! - FOV по focus каждый frame
//! - mouse / gamepad look, прыжок
//! - primary action → UseItem → projectile
//! - touch tap

use bevy::prelude::*;
use fpsdemo_simulation::*;

const SPAWN_HEIGHT: f32 = 0.96;

/// Helper: App с персонажем на полу
fn create_character_app(config: FpsDemoConfig) -> (App, Entity) {
    let mut app = create_headless_app();
    app.insert_resource(config.clone());
    app.add_plugins(SimulationPlugin);

    let player = spawn_fps_character(
        &mut app.world_mut().commands(),
        Vec3::new(0.0, SPAWN_HEIGHT, 0.0),
        &config,
    );
    app.world_mut().flush();

    // Warm-up: Startup + первый frame без delta
    app.update();

    (app, player)
}

fn movement(app: &App, player: Entity) -> CharacterMovement {
    *app.world().get::<CharacterMovement>(player).unwrap()
}

fn camera_of(app: &mut App, player: Entity) -> (Entity, FirstPersonCamera, Transform) {
    let world = app.world_mut();
    let mut query = world.query::<(Entity, &ChildOf, &FirstPersonCamera, &Transform)>();
    query
        .iter(world)
        .find(|(_, child_of, _, _)| child_of.parent() == player)
        .map(|(entity, _, camera, transform)| (entity, *camera, *transform))
        .unwrap()
}

fn projectile_count(app: &mut App) -> usize {
    let world = app.world_mut();
    world.query::<&Projectile>().iter(world).count()
}

fn send_axis(app: &mut App, axis: InputAxis, value: f32) {
    app.world_mut().send_event(AxisInput::new(axis, value));
}

fn send_action(app: &mut App, action: ActionInput) {
    app.world_mut().send_event(action);
}

#[test]
fn test_spawned_character_defaults() {
    let (mut app, player) = create_character_app(FpsDemoConfig::default());

    let state = *app.world().get::<CharacterState>(player).unwrap();
    assert!(!state.rush && !state.focus);
    assert!(app.world().get::<Weapon>(player).is_some());
    assert!(app.world().get::<TouchState>(player).is_some(), "required component");

    let (_, camera, camera_transform) = camera_of(&mut app, player);
    assert_eq!(camera.field_of_view, 90.0);
    assert!((camera_transform.translation - Vec3::new(0.0175, 0.64, 0.3956)).length() < 1e-5);
}

#[test]
fn test_forward_walk_default_speed() {
    let (mut app, player) = create_character_app(FpsDemoConfig::default());

    send_axis(&mut app, InputAxis::MoveForward, 1.0);
    app.update();
    assert_eq!(movement(&app, player).max_walk_speed, 6.0);

    send_axis(&mut app, InputAxis::MoveForward, 1.0);
    app.update();

    let movement = movement(&app, player);
    assert!((movement.velocity.z + 6.0).abs() < 1e-4, "velocity = {:?}", movement.velocity);

    for _ in 0..60 {
        send_axis(&mut app, InputAxis::MoveForward, 1.0);
        app.update();
    }

    let transform = app.world().get::<Transform>(player).unwrap();
    assert!(transform.translation.z < -5.0, "z = {}", transform.translation.z);
    assert!((transform.translation.y - SPAWN_HEIGHT).abs() < 1e-4, "стоит на полу");
}

#[test]
fn test_rush_selects_rush_speeds() {
    let (mut app, player) = create_character_app(FpsDemoConfig::default());

    send_action(&mut app, ActionInput::pressed(InputAction::Rush));
    send_axis(&mut app, InputAxis::MoveForward, 1.0);
    app.update();

    assert!(app.world().get::<CharacterState>(player).unwrap().rush);
    assert_eq!(movement(&app, player).max_walk_speed, 12.0);

    send_axis(&mut app, InputAxis::MoveRight, -1.0);
    app.update();
    assert_eq!(movement(&app, player).max_walk_speed, 8.0);

    // Fixed tick применяет input прошлого frame
    app.update();
    let movement_right = movement(&app, player);
    assert!((movement_right.velocity.x + 8.0).abs() < 1e-4, "velocity = {:?}", movement_right.velocity);

    send_action(&mut app, ActionInput::released(InputAction::Rush));
    send_axis(&mut app, InputAxis::MoveForward, 1.0);
    app.update();

    assert!(!app.world().get::<CharacterState>(player).unwrap().rush);
    assert_eq!(movement(&app, player).max_walk_speed, 6.0);
}

#[test]
fn test_right_axis_speed_wins_when_both_active() {
    let (mut app, player) = create_character_app(FpsDemoConfig::default());

    send_axis(&mut app, InputAxis::MoveForward, 1.0);
    send_axis(&mut app, InputAxis::MoveRight, 1.0);
    app.update();
    app.update();

    let movement = movement(&app, player);
    assert_eq!(movement.max_walk_speed, 4.0);

    // Диагональ ограничена длиной 1
    let horizontal = Vec3::new(movement.velocity.x, 0.0, movement.velocity.z);
    assert!((horizontal.length() - 4.0).abs() < 1e-4);
}

#[test]
fn test_no_input_stops_and_keeps_speed_limit() {
    let (mut app, player) = create_character_app(FpsDemoConfig::default());

    send_action(&mut app, ActionInput::pressed(InputAction::Rush));
    send_axis(&mut app, InputAxis::MoveForward, 1.0);
    app.update();

    // Frame без input: fixed tick ещё двигает по прошлому input
    app.update();
    assert!(movement(&app, player).velocity.z < -11.9);

    app.update();

    let movement = movement(&app, player);
    assert_eq!(movement.velocity.x, 0.0);
    assert_eq!(movement.velocity.z, 0.0);
    assert_eq!(movement.max_walk_speed, 12.0, "нулевая ось не трогает max walk speed");
}

#[test]
fn test_focus_changes_field_of_view() {
    let (mut app, player) = create_character_app(FpsDemoConfig::default());

    send_action(&mut app, ActionInput::pressed(InputAction::Focus));
    app.update();
    assert_eq!(camera_of(&mut app, player).1.field_of_view, 60.0);

    send_action(&mut app, ActionInput::released(InputAction::Focus));
    app.update();
    assert_eq!(camera_of(&mut app, player).1.field_of_view, 90.0);
}

#[test]
fn test_field_of_view_enforced_every_frame() {
    let (mut app, player) = create_character_app(FpsDemoConfig::default());
    let (camera, _, _) = camera_of(&mut app, player);

    app.world_mut()
        .get_mut::<FirstPersonCamera>(camera)
        .unwrap()
        .set_field_of_view(30.0);
    app.update();

    assert_eq!(camera_of(&mut app, player).1.field_of_view, 90.0);
}

#[test]
fn test_mouse_turn_rotates_body_and_pitch_rotates_camera() {
    let (mut app, player) = create_character_app(FpsDemoConfig::default());

    send_axis(&mut app, InputAxis::TurnMouse, 90.0);
    send_axis(&mut app, InputAxis::LookUpMouse, 30.0);
    app.update();

    let body = *app.world().get::<Transform>(player).unwrap();
    assert!((*body.forward() - Vec3::X).length() < 1e-4, "forward = {:?}", body.forward());

    let (_, _, camera_transform) = camera_of(&mut app, player);
    let camera_forward = camera_transform.rotation * Vec3::NEG_Z;
    assert!((camera_forward.y - 30f32.to_radians().sin()).abs() < 1e-4);

    // После поворота W ведёт в +X
    send_axis(&mut app, InputAxis::MoveForward, 1.0);
    app.update();
    app.update();
    assert!(movement(&app, player).velocity.x > 5.9);
}

#[test]
fn test_pitch_clamped() {
    let (mut app, player) = create_character_app(FpsDemoConfig::default());

    send_axis(&mut app, InputAxis::LookUpMouse, 500.0);
    app.update();

    let rotation = *app.world().get::<ControlRotation>(player).unwrap();
    assert_eq!(rotation.pitch, ControlRotation::PITCH_LIMIT);
}

#[test]
fn test_gamepad_turn_rate() {
    let (mut app, player) = create_character_app(FpsDemoConfig::default());

    send_axis(&mut app, InputAxis::TurnGamepad, 1.0);
    app.update();

    // 1.0 × 45°/s × 1/60 s
    let rotation = *app.world().get::<ControlRotation>(player).unwrap();
    assert!((rotation.yaw - 0.75).abs() < 1e-3, "yaw = {}", rotation.yaw);
}

#[test]
fn test_jump_and_land() {
    let (mut app, player) = create_character_app(FpsDemoConfig::default());

    send_action(&mut app, ActionInput::pressed(InputAction::Jump));
    app.update();
    send_action(&mut app, ActionInput::released(InputAction::Jump));

    let mut peak: f32 = SPAWN_HEIGHT;
    for _ in 0..90 {
        app.update();
        let y = app.world().get::<Transform>(player).unwrap().translation.y;
        peak = peak.max(y);
    }

    // v²/2g = 4.2² / 19.62 ≈ 0.9m
    assert!(peak > SPAWN_HEIGHT + 0.8, "peak = {}", peak);

    let landed = movement(&app, player);
    assert!(landed.grounded);
    let y = app.world().get::<Transform>(player).unwrap().translation.y;
    assert!((y - SPAWN_HEIGHT).abs() < 1e-4);
}

#[test]
fn test_primary_action_fires_projectile() {
    let (mut app, player) = create_character_app(FpsDemoConfig::default());

    send_action(&mut app, ActionInput::pressed(InputAction::PrimaryAction));
    app.update();

    let world = app.world_mut();
    let mut projectiles = world.query::<(&Projectile, &bevy_rapier3d::prelude::Velocity, &Transform)>();
    let fired: Vec<_> = projectiles.iter(world).collect();
    assert_eq!(fired.len(), 1);

    let (projectile, velocity, transform) = fired[0];
    assert_eq!(projectile.owner, Some(player));
    assert!((velocity.linvel - Vec3::new(0.0, 0.0, -90.0)).length() < 1e-3);

    // Дуло перед камерой: центр capsule 0.96 + камера 0.64 + дуло 0.1
    assert!((transform.translation.y - 1.7).abs() < 1e-4);
    assert!(transform.translation.z < -0.5);
}

#[test]
fn test_release_primary_action_does_nothing() {
    let (mut app, _player) = create_character_app(FpsDemoConfig::default());

    send_action(&mut app, ActionInput::released(InputAction::PrimaryAction));
    app.update();

    assert_eq!(projectile_count(&mut app), 0);
}

#[test]
fn test_unarmed_character_broadcasts_but_does_not_fire() {
    let mut config = FpsDemoConfig::default();
    config.weapon.armed = false;
    let (mut app, player) = create_character_app(config);

    send_action(&mut app, ActionInput::pressed(InputAction::PrimaryAction));
    app.update();

    let events = app.world().resource::<Events<UseItem>>();
    let mut cursor = events.get_cursor();
    let used: Vec<_> = cursor.read(events).copied().collect();
    assert_eq!(used, vec![UseItem { character: player }]);

    assert_eq!(projectile_count(&mut app), 0);
}

#[test]
fn test_touch_tap_fires_when_enabled() {
    let mut config = FpsDemoConfig::default();
    config.input.use_mouse_for_touch = true;
    let (mut app, player) = create_character_app(config);

    app.world_mut().send_event(TouchInputEvent {
        phase: TouchPhase::Pressed,
        finger: 0,
        location: Vec2::new(100.0, 200.0),
    });
    app.update();

    assert_eq!(projectile_count(&mut app), 1);
    assert!(app.world().get::<TouchState>(player).unwrap().is_pressed);

    // Второй палец пока первый зажат: игнорируется
    app.world_mut().send_event(TouchInputEvent {
        phase: TouchPhase::Pressed,
        finger: 1,
        location: Vec2::ZERO,
    });
    app.update();
    assert_eq!(projectile_count(&mut app), 1);

    app.world_mut().send_event(TouchInputEvent {
        phase: TouchPhase::Released,
        finger: 0,
        location: Vec2::ZERO,
    });
    app.update();
    assert!(!app.world().get::<TouchState>(player).unwrap().is_pressed);
}

#[test]
fn test_touch_ignored_without_touch_support() {
    let (mut app, player) = create_character_app(FpsDemoConfig::default());

    app.world_mut().send_event(TouchInputEvent {
        phase: TouchPhase::Pressed,
        finger: 0,
        location: Vec2::ZERO,
    });
    app.update();

    assert_eq!(projectile_count(&mut app), 0);
    assert!(!app.world().get::<TouchState>(player).unwrap().is_pressed);
}

#[test]
fn test_non_player_character_ignores_input() {
    let (mut app, player) = create_character_app(FpsDemoConfig::default());
    app.world_mut().entity_mut(player).remove::<Player>();

    send_action(&mut app, ActionInput::pressed(InputAction::Rush));
    send_axis(&mut app, InputAxis::MoveForward, 1.0);
    app.update();
    app.update();

    assert!(!app.world().get::<CharacterState>(player).unwrap().rush);
    assert_eq!(movement(&app, player).velocity.z, 0.0);
}
