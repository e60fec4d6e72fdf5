//! Spawn helper для first-person персонажа

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::components::{FirstPersonCamera, FpsCharacter, Player};
use crate::config::FpsDemoConfig;
use crate::input::setup_player_input;
use crate::physics::{collision, CharacterMovement};
use crate::weapon::Weapon;

/// Создаёт player персонажа с полным набором компонентов:
/// - FpsCharacter (+ required CharacterState, ControlRotation, TouchState)
/// - CharacterMovement + PlayerInputComponent
/// - Rapier: kinematic capsule
/// - Child: FirstPersonCamera с offset
/// - Weapon, если `config.weapon.armed`
///
/// `position`: центр capsule.
pub fn spawn_fps_character(commands: &mut Commands, position: Vec3, config: &FpsDemoConfig) -> Entity {
    let character_config = &config.character;

    // Rapier capsule_y принимает half-height цилиндра (без полусфер)
    let segment_half_height =
        (character_config.capsule_half_height - character_config.capsule_radius).max(0.0);

    let mut entity = commands.spawn((
        Player,
        FpsCharacter::from_config(character_config),
        CharacterMovement::from_config(character_config),
        setup_player_input(&config.input),
        Transform::from_translation(position),
        RigidBody::KinematicPositionBased,
        Collider::capsule_y(segment_half_height, character_config.capsule_radius),
        collision::character_groups(),
    ));

    entity.with_children(|parent| {
        parent.spawn((
            FirstPersonCamera::new(character_config.default_field_of_view),
            Transform::from_translation(character_config.camera_offset()),
        ));
    });

    if config.weapon.armed {
        entity.insert(Weapon::new(config.weapon.muzzle_offset()));
    }

    let id = entity.id();

    crate::log_info(&format!(
        "Spawned FPS character {:?} at {:?} (armed: {})",
        id, position, config.weapon.armed
    ));

    id
}
