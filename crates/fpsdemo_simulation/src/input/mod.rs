//! Player input module
//!
//! ```text
//! Devices (client InputBindings) / тесты
//!     ↓
//! ActionInput / AxisInput / TouchInputEvent (ECS events) - events.rs
//!     ↓
//! PlayerInputComponent (binding table) - bindings.rs
//!     ↓
//! character::control handlers → CharacterState / CharacterMovement / ControlRotation
//!     ↓
//! UseItem (primary action broadcast)
//! ```

use bevy::prelude::*;

pub mod bindings;
pub mod events;
pub mod systems;
pub mod touch;

pub use bindings::*;
pub use events::*;
pub use systems::*;
pub use touch::*;

/// System set: обработка input за frame
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlayerInputSet;

pub struct PlayerInputPlugin;

impl Plugin for PlayerInputPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ActionInput>()
            .add_event::<AxisInput>()
            .add_event::<TouchInputEvent>()
            .add_event::<UseItem>();

        app.add_systems(
            Update,
            (
                reset_movement_input,
                dispatch_action_input,
                dispatch_axis_input,
                dispatch_touch_input,
            )
                .chain()
                .in_set(PlayerInputSet),
        );
    }
}
