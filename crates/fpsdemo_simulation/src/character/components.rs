//! Компоненты first-person персонажа

use bevy::prelude::*;

use crate::config::CharacterConfig;
use crate::input::TouchState;

/// Marker component для player-controlled entity
///
/// Input systems используют `With<Player>` filter: события input
/// получают только акторы с этим маркером.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;

/// First-person персонаж: tuning скоростей, look rate и FOV
///
/// Runtime состояние (rush/focus, rotation, touch): в required components.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
#[require(CharacterState, ControlRotation, TouchState)]
pub struct FpsCharacter {
    pub capsule_radius: f32,
    pub capsule_half_height: f32,
    /// Градусы/сек при полном отклонении gamepad стика
    pub turn_rate_gamepad: f32,
    pub default_forward_speed: f32,
    pub rush_forward_speed: f32,
    pub default_right_speed: f32,
    pub rush_right_speed: f32,
    pub default_field_of_view: f32,
    pub focus_field_of_view: f32,
}

impl Default for FpsCharacter {
    fn default() -> Self {
        Self::from_config(&CharacterConfig::default())
    }
}

impl FpsCharacter {
    pub fn from_config(config: &CharacterConfig) -> Self {
        Self {
            capsule_radius: config.capsule_radius,
            capsule_half_height: config.capsule_half_height,
            turn_rate_gamepad: config.turn_rate_gamepad,
            default_forward_speed: config.default_forward_speed,
            rush_forward_speed: config.rush_forward_speed,
            default_right_speed: config.default_right_speed,
            rush_right_speed: config.rush_right_speed,
            default_field_of_view: config.default_field_of_view,
            focus_field_of_view: config.focus_field_of_view,
        }
    }

    /// Max walk speed для forward оси с учётом rush
    pub fn forward_speed(&self, rush: bool) -> f32 {
        if rush {
            self.rush_forward_speed
        } else {
            self.default_forward_speed
        }
    }

    /// Max walk speed для right оси с учётом rush
    pub fn right_speed(&self, rush: bool) -> f32 {
        if rush {
            self.rush_right_speed
        } else {
            self.default_right_speed
        }
    }

    /// FOV камеры с учётом focus
    pub fn field_of_view(&self, focus: bool) -> f32 {
        if focus {
            self.focus_field_of_view
        } else {
            self.default_field_of_view
        }
    }
}

/// Флаги modifier'ов (зажаты пока держится кнопка)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct CharacterState {
    /// Sprint: rush скорости вместо default
    pub rush: bool,
    /// Zoom: focus FOV вместо default
    pub focus: bool,
}

impl CharacterState {
    pub fn start_rush(&mut self) {
        self.rush = true;
    }

    pub fn stop_rush(&mut self) {
        self.rush = false;
    }

    pub fn start_focus(&mut self) {
        self.focus = true;
    }

    pub fn stop_focus(&mut self) {
        self.focus = false;
    }
}

/// Rotation контроллера (градусы)
///
/// - `yaw`: +right, тело персонажа поворачивается вместе с yaw
/// - `pitch`: +up, применяется только к камере
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct ControlRotation {
    pub yaw: f32,
    pub pitch: f32,
}

impl ControlRotation {
    /// Камера не переворачивается через зенит/надир
    pub const PITCH_LIMIT: f32 = 89.9;

    pub fn add_yaw(&mut self, degrees: f32) {
        self.yaw = (self.yaw + degrees).rem_euclid(360.0);
    }

    pub fn add_pitch(&mut self, degrees: f32) {
        self.pitch = (self.pitch + degrees).clamp(-Self::PITCH_LIMIT, Self::PITCH_LIMIT);
    }

    /// Rotation тела (только yaw). Bevy: +yaw вокруг Y = влево, поэтому минус
    pub fn yaw_quat(&self) -> Quat {
        Quat::from_rotation_y(-self.yaw.to_radians())
    }

    /// Локальный pitch камеры относительно тела
    pub fn pitch_quat(&self) -> Quat {
        Quat::from_rotation_x(self.pitch.to_radians())
    }

    /// Полная view rotation (yaw + pitch)
    pub fn to_quat(&self) -> Quat {
        self.yaw_quat() * self.pitch_quat()
    }
}

/// First-person камера (child entity персонажа)
///
/// Offset хранится в локальном `Transform` child'а.
/// Client копирует `field_of_view` в render `Projection`.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct FirstPersonCamera {
    /// Horizontal FOV (градусы)
    pub field_of_view: f32,
}

impl FirstPersonCamera {
    pub fn new(field_of_view: f32) -> Self {
        Self { field_of_view }
    }

    pub fn set_field_of_view(&mut self, degrees: f32) {
        self.field_of_view = degrees;
    }
}
