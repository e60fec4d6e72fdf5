//! Projectile systems
//!
//! - spawn_projectile: sphere collider + dynamic body + стартовая velocity
//! - handle_projectile_collisions: CollisionEvent::Started → on hit
//! - tick_projectile_lifespan / limit_projectile_speed / orient_projectile_to_velocity

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::components::{Lifespan, Projectile, ProjectileMovement};
use crate::config::ProjectileConfig;
use crate::physics::collision;

/// Event: снаряд столкнулся с чем-то
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ProjectileHit {
    pub projectile: Entity,
    pub other: Entity,
    pub location: Vec3,
    /// Impulse, переданный цели (None = цель не simulating physics)
    pub impulse: Option<Vec3>,
}

/// Spawn снаряда
///
/// `transform.forward()`: направление полёта.
pub fn spawn_projectile(
    commands: &mut Commands,
    transform: Transform,
    owner: Option<Entity>,
    config: &ProjectileConfig,
) -> Entity {
    let movement = ProjectileMovement::from_config(config);
    let velocity = movement.initial_velocity(*transform.forward());

    commands
        .spawn((
            Projectile::new(owner, config),
            movement,
            Lifespan::new(config.lifespan),
            transform,
            // Rapier physics
            RigidBody::Dynamic,
            Collider::ball(config.radius),
            Velocity::linear(velocity),
            GravityScale(movement.gravity_scale),
            Restitution::coefficient(movement.restitution()),
            Ccd::enabled(),
            // Rotation ведём сами (rotation follows velocity)
            LockedAxes::ROTATION_LOCKED,
            ActiveEvents::COLLISION_EVENTS,
            collision::projectile_groups(),
        ))
        .id()
}

/// Impulse в точке → (linear, torque) относительно центра масс
pub fn impulse_at_point(impulse: Vec3, point: Vec3, center_of_mass: Vec3) -> ExternalImpulse {
    ExternalImpulse {
        impulse,
        torque_impulse: (point - center_of_mass).cross(impulse),
    }
}

/// Система: CollisionEvent::Started → on hit
///
/// Попадание в simulating body (RigidBody::Dynamic): impulse
/// `velocity × hit_impulse_scale` в точке попадания + despawn снаряда.
/// Остальные столкновения снаряд переживает (отскок),
/// без bounce останавливается на месте.
pub fn handle_projectile_collisions(
    mut commands: Commands,
    mut collision_events: EventReader<CollisionEvent>,
    mut hit_events: EventWriter<ProjectileHit>,
    mut projectiles: Query<(&Projectile, &ProjectileMovement, &Transform, &mut Velocity)>,
    bodies: Query<(&RigidBody, Option<&GlobalTransform>), Without<Projectile>>,
    mut impulses: Query<&mut ExternalImpulse, Without<Projectile>>,
) {
    // Снаряд может задеть несколько тел за один step
    let mut destroyed: Vec<Entity> = Vec::new();

    for event in collision_events.read() {
        let CollisionEvent::Started(first, second, _) = *event else {
            continue;
        };

        let (projectile_entity, other) = if projectiles.contains(first) {
            (first, second)
        } else if projectiles.contains(second) {
            (second, first)
        } else {
            continue;
        };

        if destroyed.contains(&projectile_entity) {
            continue;
        }

        let Ok((projectile, movement, transform, mut velocity)) = projectiles.get_mut(projectile_entity)
        else {
            continue;
        };

        let location = transform.translation;

        let target = if other != projectile_entity {
            bodies.get(other).ok()
        } else {
            None
        };

        match target {
            Some((RigidBody::Dynamic, global_transform)) => {
                let impulse = projectile.hit_impulse(velocity.linvel);
                let center_of_mass = global_transform
                    .map(|global| global.translation())
                    .unwrap_or(location);
                let external = impulse_at_point(impulse, location, center_of_mass);

                if let Ok(mut existing) = impulses.get_mut(other) {
                    existing.impulse += external.impulse;
                    existing.torque_impulse += external.torque_impulse;
                } else {
                    commands.entity(other).insert(external);
                }

                commands.entity(projectile_entity).try_despawn();
                destroyed.push(projectile_entity);

                hit_events.write(ProjectileHit {
                    projectile: projectile_entity,
                    other,
                    location,
                    impulse: Some(impulse),
                });

                crate::log(&format!(
                    "Projectile {:?} hit {:?} at {:?}, impulse {:?}",
                    projectile_entity, other, location, impulse
                ));
            }
            _ => {
                if !movement.should_bounce {
                    velocity.linvel = Vec3::ZERO;
                    velocity.angvel = Vec3::ZERO;
                    commands.entity(projectile_entity).insert(RigidBody::Fixed);
                }

                hit_events.write(ProjectileHit {
                    projectile: projectile_entity,
                    other,
                    location,
                    impulse: None,
                });
            }
        }
    }
}

/// Система: despawn снарядов с истёкшим lifespan
pub fn tick_projectile_lifespan(
    mut commands: Commands,
    mut query: Query<(Entity, &mut Lifespan)>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (entity, mut lifespan) in query.iter_mut() {
        if lifespan.tick(delta) {
            commands.entity(entity).try_despawn();
        }
    }
}

/// Система: скорость снаряда не превышает max_speed
pub fn limit_projectile_speed(mut query: Query<(&ProjectileMovement, &mut Velocity)>) {
    for (movement, mut velocity) in query.iter_mut() {
        let limited = movement.limit_velocity(velocity.linvel);
        if limited != velocity.linvel {
            velocity.linvel = limited;
        }
    }
}

/// Система: снаряд смотрит по направлению полёта
pub fn orient_projectile_to_velocity(
    mut query: Query<(&ProjectileMovement, &Velocity, &mut Transform)>,
) {
    for (movement, velocity, mut transform) in query.iter_mut() {
        if !movement.rotation_follows_velocity {
            continue;
        }

        let Some(direction) = velocity.linvel.try_normalize() else {
            continue;
        };

        transform.rotation = Quat::from_rotation_arc(Vec3::NEG_Z, direction);
    }
}
