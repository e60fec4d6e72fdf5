//! Projectile компоненты
//!
//! Коллизии и интеграция: Rapier (dynamic body + ball collider),
//! здесь только параметры ballistic движения и время жизни.

use bevy::prelude::*;

use crate::config::ProjectileConfig;

/// Снаряд
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
#[require(Lifespan)]
pub struct Projectile {
    /// Кто выстрелил (None = спавн без стрелка)
    pub owner: Option<Entity>,
    /// Impulse при попадании = velocity × hit_impulse_scale
    pub hit_impulse_scale: f32,
}

impl Projectile {
    pub fn new(owner: Option<Entity>, config: &ProjectileConfig) -> Self {
        Self {
            owner,
            hit_impulse_scale: config.hit_impulse_scale,
        }
    }

    /// Impulse, передаваемый цели
    pub fn hit_impulse(&self, velocity: Vec3) -> Vec3 {
        velocity * self.hit_impulse_scale
    }
}

/// Ballistic movement параметры
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct ProjectileMovement {
    pub initial_speed: f32,
    pub max_speed: f32,
    pub gravity_scale: f32,
    pub should_bounce: bool,
    pub bounciness: f32,
    pub rotation_follows_velocity: bool,
}

impl Default for ProjectileMovement {
    fn default() -> Self {
        Self::from_config(&ProjectileConfig::default())
    }
}

impl ProjectileMovement {
    pub fn from_config(config: &ProjectileConfig) -> Self {
        Self {
            initial_speed: config.initial_speed,
            max_speed: config.max_speed,
            gravity_scale: config.gravity_scale,
            should_bounce: config.should_bounce,
            bounciness: config.bounciness,
            rotation_follows_velocity: config.rotation_follows_velocity,
        }
    }

    /// Стартовая velocity вдоль forward
    pub fn initial_velocity(&self, forward: Vec3) -> Vec3 {
        forward.normalize_or_zero() * self.initial_speed
    }

    /// Velocity с ограничением по max_speed (0 = без лимита)
    pub fn limit_velocity(&self, velocity: Vec3) -> Vec3 {
        if self.max_speed > 0.0 {
            velocity.clamp_length_max(self.max_speed)
        } else {
            velocity
        }
    }

    /// Restitution коллайдера (без bounce снаряд не отскакивает)
    pub fn restitution(&self) -> f32 {
        if self.should_bounce {
            self.bounciness
        } else {
            0.0
        }
    }
}

/// Время жизни (секунды), по истечении entity despawn
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Lifespan {
    pub remaining: f32,
}

impl Default for Lifespan {
    fn default() -> Self {
        Self::new(ProjectileConfig::default().lifespan)
    }
}

impl Lifespan {
    pub fn new(seconds: f32) -> Self {
        Self { remaining: seconds }
    }

    /// Возвращает `true`, когда время вышло
    pub fn tick(&mut self, delta: f32) -> bool {
        self.remaining -= delta;
        self.remaining <= 0.0
    }
}
