use bevy::prelude::*;
use fpsdemo_simulation::{FpsDemoConfig, Projectile, ProjectileHit};

pub struct RenderingSyncPlugin;

impl Plugin for RenderingSyncPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_projectile_visual)
            .add_systems(Update, (attach_projectile_visuals, draw_hit_markers));
    }
}

/// Общие mesh/material для всех снарядов
#[derive(Resource)]
pub struct ProjectileVisual {
    mesh: Handle<Mesh>,
    material: Handle<StandardMaterial>,
}

fn load_projectile_visual(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<FpsDemoConfig>,
) {
    commands.insert_resource(ProjectileVisual {
        mesh: meshes.add(Sphere::new(config.projectile.radius)),
        material: materials.add(StandardMaterial {
            base_color: Color::srgb(1.0, 0.8, 0.2),
            emissive: LinearRgba::rgb(4.0, 3.0, 0.5),
            ..default()
        }),
    });
}

/// Sphere mesh для новых снарядов (transform ведёт Rapier)
fn attach_projectile_visuals(
    mut commands: Commands,
    query: Query<Entity, Added<Projectile>>,
    visual: Option<Res<ProjectileVisual>>,
) {
    let Some(visual) = visual else {
        return;
    };

    for entity in query.iter() {
        commands.entity(entity).insert((
            Mesh3d(visual.mesh.clone()),
            MeshMaterial3d(visual.material.clone()),
        ));
    }
}

/// Debug маркер попадания (gizmo на один frame)
fn draw_hit_markers(mut hits: EventReader<ProjectileHit>, mut gizmos: Gizmos) {
    for hit in hits.read() {
        let color = if hit.impulse.is_some() {
            Color::srgb(0.9, 0.2, 0.2)
        } else {
            Color::srgb(0.6, 0.6, 0.6)
        };

        gizmos.sphere(bevy::math::Isometry3d::from_translation(hit.location), 0.15, color);
    }
}
