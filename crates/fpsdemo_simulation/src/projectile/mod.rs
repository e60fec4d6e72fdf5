//! Projectile domain
//!
//! ECS ответственность:
//! - параметры (ProjectileMovement, Lifespan)
//! - реакция на столкновение (impulse + destroy)
//!
//! Rapier ответственность:
//! - интеграция, gravity, отскок (Restitution), CCD
//! - CollisionEvent

use bevy::prelude::*;
use bevy_rapier3d::prelude::CollisionEvent;

pub mod components;
pub mod systems;

pub use components::*;
pub use systems::*;

pub struct ProjectilePlugin;

impl Plugin for ProjectilePlugin {
    fn build(&self, app: &mut App) {
        // RapierPhysicsPlugin тоже регистрирует CollisionEvent (add_event идемпотентен);
        // headless App без Rapier получает события напрямую
        app.add_event::<CollisionEvent>().add_event::<ProjectileHit>();

        app.register_type::<Projectile>()
            .register_type::<ProjectileMovement>()
            .register_type::<Lifespan>();

        app.add_systems(
            FixedUpdate,
            (
                limit_projectile_speed,
                orient_projectile_to_velocity,
                tick_projectile_lifespan,
            )
                .chain(),
        );

        // CollisionEvent пишется Rapier writeback'ом раз в frame
        app.add_systems(Update, handle_projectile_collisions);
    }
}
