//! Character domain: first-person персонаж
//!
//! Содержит:
//! - FpsCharacter, CharacterState, ControlRotation, FirstPersonCamera
//! - Input handlers (rush/focus/jump/move/look/primary action)
//! - Camera systems (control rotation, FOV по focus)
//! - spawn_fps_character

use bevy::prelude::*;

pub mod camera;
pub mod components;
pub mod control;
pub mod spawn;

pub use camera::*;
pub use components::*;
pub use spawn::spawn_fps_character;

use crate::input::PlayerInputSet;

/// System set: камера после input
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct CharacterCameraSet;

pub struct CharacterPlugin;

impl Plugin for CharacterPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<FpsCharacter>()
            .register_type::<CharacterState>()
            .register_type::<ControlRotation>()
            .register_type::<FirstPersonCamera>();

        app.add_systems(
            Update,
            (apply_control_rotation, update_camera_field_of_view)
                .chain()
                .in_set(CharacterCameraSet)
                .after(PlayerInputSet),
        );
    }
}
