//! Input handlers персонажа
//!
//! Каждый handler: свободная функция над `CharacterControl`, чтобы
//! `PlayerInputComponent` мог хранить их как `fn` pointers (binding table).

use bevy::prelude::*;

use super::components::{CharacterState, ControlRotation, FpsCharacter};
use crate::physics::CharacterMovement;

/// Mutable view на персонажа на время dispatch одного input события
pub struct CharacterControl<'a> {
    pub entity: Entity,
    pub character: &'a FpsCharacter,
    pub transform: &'a Transform,
    pub state: &'a mut CharacterState,
    pub movement: &'a mut CharacterMovement,
    pub rotation: &'a mut ControlRotation,
    /// Frame delta (секунды) для rate-based осей
    pub delta_secs: f32,
    /// Выставляется `on_primary_action`, dispatcher пишет `UseItem`
    pub use_item_requested: bool,
}

impl<'a> CharacterControl<'a> {
    /// Forward тела персонажа (только yaw)
    pub fn actor_forward(&self) -> Vec3 {
        *self.transform.forward()
    }

    pub fn actor_right(&self) -> Vec3 {
        *self.transform.right()
    }
}

pub fn jump(control: &mut CharacterControl) {
    control.movement.jump();
}

pub fn stop_jumping(control: &mut CharacterControl) {
    control.movement.stop_jumping();
}

pub fn start_rush(control: &mut CharacterControl) {
    control.state.start_rush();
}

pub fn stop_rush(control: &mut CharacterControl) {
    control.state.stop_rush();
}

pub fn start_focus(control: &mut CharacterControl) {
    control.state.start_focus();
}

pub fn stop_focus(control: &mut CharacterControl) {
    control.state.stop_focus();
}

/// Primary action → broadcast `UseItem`
pub fn on_primary_action(control: &mut CharacterControl) {
    control.use_item_requested = true;
}

/// Forward/backward ось
///
/// Нулевое значение ничего не трогает: max walk speed остаётся от
/// последней ненулевой оси.
pub fn move_forward(control: &mut CharacterControl, value: f32) {
    if value == 0.0 {
        return;
    }

    control.movement.max_walk_speed = control.character.forward_speed(control.state.rush);
    let forward = control.actor_forward();
    control.movement.add_input_vector(forward, value);
}

/// Right/left ось
pub fn move_right(control: &mut CharacterControl, value: f32) {
    if value == 0.0 {
        return;
    }

    control.movement.max_walk_speed = control.character.right_speed(control.state.rush);
    let right = control.actor_right();
    control.movement.add_input_vector(right, value);
}

/// Mouse turn: абсолютная дельта
pub fn add_yaw_input(control: &mut CharacterControl, value: f32) {
    control.rotation.add_yaw(value);
}

/// Mouse look: абсолютная дельта
pub fn add_pitch_input(control: &mut CharacterControl, value: f32) {
    control.rotation.add_pitch(value);
}

/// Gamepad turn: rate × turn_rate_gamepad × delta
pub fn turn_at_rate(control: &mut CharacterControl, rate: f32) {
    let degrees = rate * control.character.turn_rate_gamepad * control.delta_secs;
    control.rotation.add_yaw(degrees);
}

/// Gamepad look: rate × turn_rate_gamepad × delta
pub fn look_up_at_rate(control: &mut CharacterControl, rate: f32) {
    let degrees = rate * control.character.turn_rate_gamepad * control.delta_secs;
    control.rotation.add_pitch(degrees);
}
