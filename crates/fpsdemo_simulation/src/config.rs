//! FpsDemoConfig: tuning персонажа, снаряда и input
//!
//! Все секции `#[serde(default)]`: в JSON достаточно указать только то,
//! что отличается от дефолтов.
//!
//! Единицы: метры, секунды, градусы. Оси Bevy: +X right, +Y up, -Z forward.

use std::fmt;
use std::path::{Path, PathBuf};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Корневой конфиг (Resource)
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FpsDemoConfig {
    /// Минимальный уровень логов ("debug", "info", "warning", "error")
    pub log_level: String,
    pub character: CharacterConfig,
    pub weapon: WeaponConfig,
    pub projectile: ProjectileConfig,
    pub input: InputConfig,
}

impl Default for FpsDemoConfig {
    fn default() -> Self {
        Self {
            log_level: "debug".to_string(),
            character: CharacterConfig::default(),
            weapon: WeaponConfig::default(),
            projectile: ProjectileConfig::default(),
            input: InputConfig::default(),
        }
    }
}

impl FpsDemoConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|source| ConfigError::Parse {
            path: None,
            source,
        })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
            path: Some(path.to_path_buf()),
            source,
        })
    }
}

/// Персонаж: capsule, скорости, камера
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterConfig {
    /// Радиус capsule (м)
    pub capsule_radius: f32,
    /// Half-height capsule включая полусферы (м)
    pub capsule_half_height: f32,
    /// Gamepad look rate (градусы/сек при полном отклонении стика)
    pub turn_rate_gamepad: f32,
    pub default_forward_speed: f32,
    pub rush_forward_speed: f32,
    pub default_right_speed: f32,
    pub rush_right_speed: f32,
    /// Horizontal FOV (градусы) без focus
    pub default_field_of_view: f32,
    /// Horizontal FOV (градусы) при зажатом focus
    pub focus_field_of_view: f32,
    /// Вертикальная скорость прыжка (м/с)
    pub jump_velocity: f32,
    /// Гравитация (м/с²), отрицательная = вниз
    pub gravity: f32,
    /// Позиция камеры относительно центра capsule (м)
    pub camera_offset: [f32; 3],
}

impl Default for CharacterConfig {
    fn default() -> Self {
        Self {
            capsule_radius: 0.55,
            capsule_half_height: 0.96,
            turn_rate_gamepad: 45.0,
            default_forward_speed: 6.0,
            rush_forward_speed: 12.0,
            default_right_speed: 4.0,
            rush_right_speed: 8.0,
            default_field_of_view: 90.0,
            focus_field_of_view: 60.0,
            jump_velocity: 4.2,
            gravity: -9.81,
            camera_offset: [0.0175, 0.64, 0.3956],
        }
    }
}

impl CharacterConfig {
    pub fn camera_offset(&self) -> Vec3 {
        Vec3::from_array(self.camera_offset)
    }
}

/// Оружие (слушает UseItem)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponConfig {
    /// Спавнить персонажа сразу с оружием
    pub armed: bool,
    /// Смещение дула в пространстве камеры (м)
    pub muzzle_offset: [f32; 3],
}

impl Default for WeaponConfig {
    fn default() -> Self {
        Self {
            armed: true,
            muzzle_offset: [0.0, 0.1, -1.0],
        }
    }
}

impl WeaponConfig {
    pub fn muzzle_offset(&self) -> Vec3 {
        Vec3::from_array(self.muzzle_offset)
    }
}

/// Снаряд: sphere collision + ballistic movement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileConfig {
    pub radius: f32,
    /// Стартовая скорость вдоль forward (м/с)
    pub initial_speed: f32,
    /// Лимит скорости (м/с)
    pub max_speed: f32,
    /// Множитель мировой гравитации
    pub gravity_scale: f32,
    pub should_bounce: bool,
    /// Restitution при отскоке
    pub bounciness: f32,
    pub rotation_follows_velocity: bool,
    /// Время жизни (секунды)
    pub lifespan: f32,
    /// Impulse при попадании = velocity * hit_impulse_scale
    pub hit_impulse_scale: f32,
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            radius: 0.05,
            initial_speed: 90.0,
            max_speed: 90.0,
            gravity_scale: 0.05,
            should_bounce: true,
            bounciness: 0.6,
            rotation_follows_velocity: true,
            lifespan: 3.0,
            hit_impulse_scale: 100.0,
        }
    }
}

/// Input: touch и чувствительность мыши
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Платформа поддерживает touch input
    pub touch_supported: bool,
    /// Мышь эмулирует touch (включает touch bindings на десктопе)
    pub use_mouse_for_touch: bool,
    /// Градусы поворота на пиксель движения мыши
    pub mouse_sensitivity: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            touch_supported: false,
            use_mouse_for_touch: false,
            mouse_sensitivity: 0.1,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: Option<PathBuf>,
        source: serde_json::Error,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "failed to read config {}: {}", path.display(), source)
            }
            ConfigError::Parse {
                path: Some(path),
                source,
            } => write!(f, "failed to parse config {}: {}", path.display(), source),
            ConfigError::Parse { path: None, source } => {
                write!(f, "failed to parse config: {}", source)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
        }
    }
}
