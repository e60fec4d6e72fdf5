//! FPS Demo Simulation Core
//!
//! ECS gameplay layer на Bevy 0.16:
//! - first-person персонаж (rush / focus / jump / look / primary action)
//! - оружие (UseItem → projectile)
//! - ballistic projectile (Rapier body + реакция на hit)
//!
//! Устройства ввода и рендер живут в fpsdemo_client. Здесь только
//! input events → component state.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;

// Публичные модули
pub mod character;
pub mod config;
pub mod input;
pub mod logger;
pub mod physics;
pub mod projectile;
pub mod weapon;

// Re-export для удобства
pub use character::{
    spawn_fps_character, CharacterCameraSet, CharacterPlugin, CharacterState, ControlRotation,
    FirstPersonCamera, FpsCharacter, Player,
};
pub use config::{ConfigError, FpsDemoConfig};
pub use input::{
    ActionInput, AxisInput, InputAction, InputAxis, InputEdge, PlayerInputPlugin, PlayerInputSet,
    TouchInputEvent, TouchPhase, TouchState, UseItem,
};
pub use logger::{init_logger, log, log_error, log_info, log_warning, set_log_level, LogLevel};
pub use physics::{CharacterMovement, CharacterMovementPlugin};
pub use projectile::{spawn_projectile, Projectile, ProjectileHit, ProjectileMovement, ProjectilePlugin};
pub use weapon::{ProjectileFired, Weapon, WeaponPlugin};

/// Частота fixed timestep (Hz)
pub const FIXED_HZ: f64 = 60.0;

/// Длительность одного fixed tick
pub fn fixed_timestep() -> Duration {
    Duration::from_secs_f64(1.0 / FIXED_HZ)
}

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Time::<Fixed>::from_hz(FIXED_HZ))
            // Не перезаписывает конфиг, вставленный до plugin'а
            .init_resource::<FpsDemoConfig>()
            .add_systems(Startup, apply_log_level)
            .add_plugins((
                PlayerInputPlugin,
                CharacterPlugin,
                CharacterMovementPlugin,
                WeaponPlugin,
                ProjectilePlugin,
            ));
    }
}

/// Система: уровень логов из конфига
fn apply_log_level(config: Res<FpsDemoConfig>) {
    match LogLevel::parse(&config.log_level) {
        Some(level) => set_log_level(level),
        None => log_warning(&format!(
            "Unknown log_level {:?} in config, keeping current level",
            config.log_level
        )),
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Время идёт ровно на один fixed tick за `app.update()`,
/// поэтому прогоны детерминированы.
pub fn create_headless_app() -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(Time::<Fixed>::from_hz(FIXED_HZ))
        .insert_resource(TimeUpdateStrategy::ManualDuration(fixed_timestep()));

    app
}
