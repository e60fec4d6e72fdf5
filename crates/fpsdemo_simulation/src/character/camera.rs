//! First-person camera: control rotation и FOV
//!
//! Камера является child entity персонажа. Тело берёт yaw, камера берёт pitch
//! (итоговая world rotation камеры = полная control rotation).

use bevy::prelude::*;

use super::components::{CharacterState, ControlRotation, FirstPersonCamera, FpsCharacter};

/// Система: control rotation → Transform тела и камеры
pub fn apply_control_rotation(
    mut characters: Query<(&ControlRotation, &mut Transform), With<FpsCharacter>>,
    mut cameras: Query<(&ChildOf, &mut Transform), (With<FirstPersonCamera>, Without<FpsCharacter>)>,
) {
    for (rotation, mut transform) in characters.iter_mut() {
        transform.rotation = rotation.yaw_quat();
    }

    for (child_of, mut camera_transform) in cameras.iter_mut() {
        let Ok((rotation, _)) = characters.get(child_of.parent()) else {
            continue;
        };

        camera_transform.rotation = rotation.pitch_quat();
    }
}

/// Система: FOV камеры по focus флагу
///
/// Выставляется каждый frame, независимо от input.
pub fn update_camera_field_of_view(
    characters: Query<(&FpsCharacter, &CharacterState)>,
    mut cameras: Query<(&ChildOf, &mut FirstPersonCamera)>,
) {
    for (child_of, mut camera) in cameras.iter_mut() {
        let Ok((character, state)) = characters.get(child_of.parent()) else {
            continue;
        };

        camera.set_field_of_view(character.field_of_view(state.focus));
    }
}

/// World transform камеры без GlobalTransform propagation
///
/// Headless App не содержит TransformPlugin, поэтому считаем вручную.
pub fn camera_world_transform(body: &Transform, camera_local: &Transform) -> Transform {
    body.mul_transform(*camera_local)
}
