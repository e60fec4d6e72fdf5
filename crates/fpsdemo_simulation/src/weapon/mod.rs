//! Weapon: слушатель UseItem
//!
//! Персонаж с `Weapon` на каждый UseItem выпускает projectile из дула:
//! - location = камера + control rotation × muzzle_offset
//! - rotation = control rotation (камера смотрит туда же)

use bevy::prelude::*;

use crate::character::{camera_world_transform, CharacterCameraSet, ControlRotation, FirstPersonCamera};
use crate::config::FpsDemoConfig;
use crate::input::UseItem;
use crate::projectile::spawn_projectile;

/// Оружие в руках персонажа
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Weapon {
    /// Смещение дула в пространстве камеры (м)
    pub muzzle_offset: Vec3,
}

impl Weapon {
    pub fn new(muzzle_offset: Vec3) -> Self {
        Self { muzzle_offset }
    }

    /// Transform точки вылета снаряда
    ///
    /// `camera_position`: world позиция камеры.
    pub fn muzzle_transform(&self, camera_position: Vec3, rotation: &ControlRotation) -> Transform {
        let view = rotation.to_quat();
        Transform::from_translation(camera_position + view * self.muzzle_offset).with_rotation(view)
    }
}

/// Event: оружие выпустило снаряд
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ProjectileFired {
    pub shooter: Entity,
    pub projectile: Entity,
    pub origin: Vec3,
    pub direction: Vec3,
}

/// Система: UseItem → spawn projectile
///
/// Персонажи без Weapon игнорируют UseItem.
pub fn fire_weapon_on_use_item(
    mut commands: Commands,
    mut use_item_events: EventReader<UseItem>,
    mut fired_events: EventWriter<ProjectileFired>,
    shooters: Query<(&Transform, &ControlRotation, &Weapon)>,
    cameras: Query<(&ChildOf, &Transform), With<FirstPersonCamera>>,
    config: Res<FpsDemoConfig>,
) {
    for event in use_item_events.read() {
        let Ok((body, rotation, weapon)) = shooters.get(event.character) else {
            continue;
        };

        // Камера персонажа; без неё стреляем из центра тела
        let camera_position = cameras
            .iter()
            .find(|(child_of, _)| child_of.parent() == event.character)
            .map(|(_, camera_local)| camera_world_transform(body, camera_local).translation)
            .unwrap_or(body.translation);

        let muzzle = weapon.muzzle_transform(camera_position, rotation);
        let direction = *muzzle.forward();

        let projectile = spawn_projectile(&mut commands, muzzle, Some(event.character), &config.projectile);

        fired_events.write(ProjectileFired {
            shooter: event.character,
            projectile,
            origin: muzzle.translation,
            direction,
        });

        crate::log(&format!(
            "Character {:?} fired projectile {:?} from {:?} dir {:?}",
            event.character, projectile, muzzle.translation, direction
        ));
    }
}

pub struct WeaponPlugin;

impl Plugin for WeaponPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<Weapon>()
            .add_event::<ProjectileFired>()
            .add_systems(Update, fire_weapon_on_use_item.after(CharacterCameraSet));
    }
}
