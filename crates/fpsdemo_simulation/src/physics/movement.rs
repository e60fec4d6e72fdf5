//! CharacterMovement: kinematic контроллер персонажа
//!
//! Архитектура:
//! - Rapier для коллизий (RigidBody::KinematicPositionBased + capsule)
//! - Velocity интегрируем сами (не используем Rapier forces)
//! - Input копится за frame в `pending_input`, FixedUpdate его читает
//!
//! Пол: плоскость y = GROUND_HEIGHT.

use bevy::prelude::*;

use crate::config::CharacterConfig;

/// Высота пола (м)
pub const GROUND_HEIGHT: f32 = 0.0;

/// Запас для ground check (numerical errors)
pub const GROUND_TOLERANCE: f32 = 0.02;

/// Movement компонент персонажа
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct CharacterMovement {
    /// Текущий лимит горизонтальной скорости (м/с), выставляется input'ом
    pub max_walk_speed: f32,
    /// Скорость прыжка (м/с)
    pub jump_velocity: f32,
    /// Гравитация (м/с²)
    pub gravity: f32,
    /// Half-height capsule (центр → низ), для ground check
    pub half_height: f32,
    pub velocity: Vec3,
    pub grounded: bool,
    /// Сумма movement input за текущий frame (world space)
    pub pending_input: Vec3,
    /// Jump запрошен (сбрасывается в ближайший fixed tick)
    pub jump_pressed: bool,
}

impl Default for CharacterMovement {
    fn default() -> Self {
        Self::from_config(&CharacterConfig::default())
    }
}

impl CharacterMovement {
    pub fn from_config(config: &CharacterConfig) -> Self {
        Self {
            max_walk_speed: config.default_forward_speed,
            jump_velocity: config.jump_velocity,
            gravity: config.gravity,
            half_height: config.capsule_half_height,
            velocity: Vec3::ZERO,
            grounded: false,
            pending_input: Vec3::ZERO,
            jump_pressed: false,
        }
    }

    pub fn add_input_vector(&mut self, direction: Vec3, scale: f32) {
        self.pending_input += direction * scale;
    }

    pub fn clear_input(&mut self) {
        self.pending_input = Vec3::ZERO;
    }

    /// Горизонтальная velocity из накопленного input
    ///
    /// Input проецируется на XZ и ограничивается длиной 1
    /// (диагональ не быстрее прямого движения).
    pub fn desired_horizontal_velocity(&self) -> Vec3 {
        let input = Vec3::new(self.pending_input.x, 0.0, self.pending_input.z);
        input.clamp_length_max(1.0) * self.max_walk_speed
    }

    pub fn jump(&mut self) {
        self.jump_pressed = true;
    }

    pub fn stop_jumping(&mut self) {
        self.jump_pressed = false;
    }
}

/// Система ground detection по высоте низа capsule
pub fn ground_detection(mut query: Query<(&Transform, &mut CharacterMovement)>) {
    for (transform, mut movement) in query.iter_mut() {
        let bottom = transform.translation.y - movement.half_height;
        movement.grounded =
            bottom <= GROUND_HEIGHT + GROUND_TOLERANCE && movement.velocity.y <= 0.0;
    }
}

/// Система применения движения от input
///
/// Без input горизонтальное движение останавливается сразу (без инерции).
pub fn apply_movement_input(mut query: Query<&mut CharacterMovement>) {
    for mut movement in query.iter_mut() {
        let horizontal = movement.desired_horizontal_velocity();
        movement.velocity.x = horizontal.x;
        movement.velocity.z = horizontal.z;
    }
}

/// Система прыжка
///
/// Запрос живёт один fixed tick: в воздухе прыжок теряется.
pub fn apply_jump(mut query: Query<&mut CharacterMovement>) {
    for mut movement in query.iter_mut() {
        if !movement.jump_pressed {
            continue;
        }

        if movement.grounded {
            movement.velocity.y = movement.jump_velocity;
            movement.grounded = false;
        }

        movement.jump_pressed = false;
    }
}

/// Система применения gravity к velocity
pub fn apply_gravity(mut query: Query<&mut CharacterMovement>, time: Res<Time<Fixed>>) {
    let delta = time.delta_secs();

    for mut movement in query.iter_mut() {
        if !movement.grounded {
            movement.velocity.y += movement.gravity * delta;
        } else if movement.velocity.y < 0.0 {
            movement.velocity.y = 0.0;
        }
    }
}

/// Система интеграции velocity → Transform
///
/// Rapier читает Transform kinematic тела после нас.
/// Capsule не проваливается ниже пола.
pub fn integrate_velocity_to_transform(
    mut query: Query<(&mut CharacterMovement, &mut Transform)>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (mut movement, mut transform) in query.iter_mut() {
        transform.translation += movement.velocity * delta;

        let floor = GROUND_HEIGHT + movement.half_height;
        if transform.translation.y < floor {
            transform.translation.y = floor;
            movement.velocity.y = 0.0;
            movement.grounded = true;
        }
    }
}

/// Plugin для kinematic движения персонажа
pub struct CharacterMovementPlugin;

impl Plugin for CharacterMovementPlugin {
    fn build(&self, app: &mut App) {
        use bevy_rapier3d::plugin::PhysicsSet;

        // Наши системы запускаются ДО rapier sync (Transform → kinematic body)
        app.add_systems(
            FixedUpdate,
            (
                ground_detection,
                apply_movement_input,
                apply_jump,
                apply_gravity,
                integrate_velocity_to_transform,
            )
                .chain()
                .before(PhysicsSet::SyncBackend),
        );
    }
}
