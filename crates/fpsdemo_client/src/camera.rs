use bevy::prelude::*;
use fpsdemo_simulation::{CharacterCameraSet, FirstPersonCamera};

/// Render камера для FirstPersonCamera + синхронизация FOV
pub struct FirstPersonViewPlugin;

impl Plugin for FirstPersonViewPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (attach_render_camera, sync_projection_fov)
                .chain()
                .after(CharacterCameraSet),
        );
    }
}

/// Horizontal FOV (градусы) → vertical FOV (радианы) для Bevy projection
///
/// Симуляция хранит FOV по горизонтали, PerspectiveProjection ждёт вертикальный.
pub fn vertical_fov(horizontal_degrees: f32, aspect_ratio: f32) -> f32 {
    let half = horizontal_degrees.to_radians() * 0.5;
    if aspect_ratio <= 0.0 {
        return half * 2.0;
    }

    2.0 * (half.tan() / aspect_ratio).atan()
}

/// Новая first-person камера → Camera3d + Projection
fn attach_render_camera(
    mut commands: Commands,
    query: Query<(Entity, &FirstPersonCamera), Added<FirstPersonCamera>>,
) {
    for (entity, camera) in query.iter() {
        let perspective = PerspectiveProjection::default();
        let fov = vertical_fov(camera.field_of_view, perspective.aspect_ratio);

        commands.entity(entity).insert((
            Camera3d::default(),
            Projection::Perspective(PerspectiveProjection { fov, ..perspective }),
        ));
    }
}

/// FOV симуляции → projection (aspect обновляется Bevy при resize)
fn sync_projection_fov(mut query: Query<(&FirstPersonCamera, &mut Projection)>) {
    for (camera, mut projection) in query.iter_mut() {
        let Projection::Perspective(perspective) = projection.as_ref() else {
            continue;
        };

        let fov = vertical_fov(camera.field_of_view, perspective.aspect_ratio);
        if (perspective.fov - fov).abs() < 1e-5 {
            continue;
        }

        if let Projection::Perspective(perspective) = projection.as_mut() {
            perspective.fov = fov;
        }
    }
}
