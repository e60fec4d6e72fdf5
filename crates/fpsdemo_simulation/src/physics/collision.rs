//! Collision groups
//!
//! Rapier groups: centralised константы для всего проекта.
//!
//! - Memberships: на каком слое объект
//! - Filters: с какими слоями объект коллидирует
//!
//! | Group   | Слой        | Кто                            |
//! |---------|-------------|--------------------------------|
//! | GROUP_1 | Characters  | capsule персонажей             |
//! | GROUP_2 | Environment | пол, стены (fixed bodies)      |
//! | GROUP_3 | Props       | dynamic bodies, реагируют на hit |
//! | GROUP_4 | Projectiles | снаряды                        |

use bevy_rapier3d::prelude::{CollisionGroups, Group};

pub const COLLISION_LAYER_CHARACTERS: Group = Group::GROUP_1;
pub const COLLISION_LAYER_ENVIRONMENT: Group = Group::GROUP_2;
pub const COLLISION_LAYER_PROPS: Group = Group::GROUP_3;
pub const COLLISION_LAYER_PROJECTILES: Group = Group::GROUP_4;

/// Персонажи коллайдят со всем
pub fn character_groups() -> CollisionGroups {
    CollisionGroups::new(COLLISION_LAYER_CHARACTERS, Group::ALL)
}

/// Окружение коллайдит со всем
pub fn environment_groups() -> CollisionGroups {
    CollisionGroups::new(COLLISION_LAYER_ENVIRONMENT, Group::ALL)
}

/// Props коллайдят со всем
pub fn prop_groups() -> CollisionGroups {
    CollisionGroups::new(COLLISION_LAYER_PROPS, Group::ALL)
}

/// Снаряды НЕ коллайдят с другими снарядами
pub fn projectile_groups() -> CollisionGroups {
    CollisionGroups::new(
        COLLISION_LAYER_PROJECTILES,
        COLLISION_LAYER_CHARACTERS | COLLISION_LAYER_ENVIRONMENT | COLLISION_LAYER_PROPS,
    )
}

/// Название слоя для debug логов
pub fn get_layer_name(layer: Group) -> &'static str {
    if layer == COLLISION_LAYER_CHARACTERS {
        "Characters"
    } else if layer == COLLISION_LAYER_ENVIRONMENT {
        "Environment"
    } else if layer == COLLISION_LAYER_PROPS {
        "Props"
    } else if layer == COLLISION_LAYER_PROJECTILES {
        "Projectiles"
    } else {
        "Unknown"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projectiles_ignore_each_other() {
        let groups = projectile_groups();

        assert!(!groups.filters.contains(COLLISION_LAYER_PROJECTILES));
        assert!(groups.filters.contains(COLLISION_LAYER_PROPS));
        assert!(groups.filters.contains(COLLISION_LAYER_CHARACTERS));
    }

    #[test]
    fn test_layer_names() {
        assert_eq!(get_layer_name(character_groups().memberships), "Characters");
        assert_eq!(get_layer_name(prop_groups().memberships), "Props");
        assert_eq!(get_layer_name(Group::GROUP_9), "Unknown");
    }
}
