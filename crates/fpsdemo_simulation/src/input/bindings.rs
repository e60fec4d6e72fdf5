//! PlayerInputComponent: binding table персонажа
//!
//! Action (press/release) и axis события маршрутизируются в handlers
//! из `character::control`. Порядок axis bindings важен: оси
//! вызываются каждый frame в порядке регистрации.

use bevy::prelude::*;

use super::events::{InputAction, InputAxis, InputEdge};
use crate::character::control::{self, CharacterControl};
use crate::config::InputConfig;

pub type ActionHandler = fn(&mut CharacterControl);
pub type AxisHandler = fn(&mut CharacterControl, f32);

#[derive(Clone, Copy)]
pub struct ActionBinding {
    pub action: InputAction,
    pub edge: InputEdge,
    pub handler: ActionHandler,
}

#[derive(Clone, Copy)]
pub struct AxisBinding {
    pub axis: InputAxis,
    pub handler: AxisHandler,
}

#[derive(Component, Clone, Default)]
pub struct PlayerInputComponent {
    pub actions: Vec<ActionBinding>,
    pub axes: Vec<AxisBinding>,
    /// Touch begin/end маршрутизируются в `TouchState`
    pub touch_enabled: bool,
}

impl PlayerInputComponent {
    pub fn bind_action(&mut self, action: InputAction, edge: InputEdge, handler: ActionHandler) {
        self.actions.push(ActionBinding {
            action,
            edge,
            handler,
        });
    }

    pub fn bind_axis(&mut self, axis: InputAxis, handler: AxisHandler) {
        self.axes.push(AxisBinding { axis, handler });
    }

    /// Все handlers для (action, edge), в порядке регистрации
    pub fn action_handlers(
        &self,
        action: InputAction,
        edge: InputEdge,
    ) -> impl Iterator<Item = ActionHandler> + '_ {
        self.actions
            .iter()
            .filter(move |binding| binding.action == action && binding.edge == edge)
            .map(|binding| binding.handler)
    }

    pub fn is_action_bound(&self, action: InputAction, edge: InputEdge) -> bool {
        self.action_handlers(action, edge).next().is_some()
    }

    pub fn is_axis_bound(&self, axis: InputAxis) -> bool {
        self.axes.iter().any(|binding| binding.axis == axis)
    }
}

impl std::fmt::Debug for PlayerInputComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerInputComponent")
            .field("actions", &self.actions.len())
            .field("axes", &self.axes.len())
            .field("touch_enabled", &self.touch_enabled)
            .finish()
    }
}

/// Gameplay key bindings персонажа
pub fn setup_player_input(config: &InputConfig) -> PlayerInputComponent {
    use InputAction::*;
    use InputEdge::*;

    let mut input = PlayerInputComponent::default();

    input.bind_action(Jump, Pressed, control::jump);
    input.bind_action(Jump, Released, control::stop_jumping);

    input.bind_action(Rush, Pressed, control::start_rush);
    input.bind_action(Rush, Released, control::stop_rush);

    input.bind_action(Focus, Pressed, control::start_focus);
    input.bind_action(Focus, Released, control::stop_focus);

    input.bind_action(PrimaryAction, Pressed, control::on_primary_action);

    enable_touchscreen_movement(&mut input, config);

    input.bind_axis(InputAxis::MoveForward, control::move_forward);
    input.bind_axis(InputAxis::MoveRight, control::move_right);

    // Mouse: абсолютная дельта, gamepad: rate
    input.bind_axis(InputAxis::TurnMouse, control::add_yaw_input);
    input.bind_axis(InputAxis::LookUpMouse, control::add_pitch_input);
    input.bind_axis(InputAxis::TurnGamepad, control::turn_at_rate);
    input.bind_axis(InputAxis::LookUpGamepad, control::look_up_at_rate);

    input
}

/// Включает touch bindings, если платформа умеет touch или мышь эмулирует его
pub fn enable_touchscreen_movement(input: &mut PlayerInputComponent, config: &InputConfig) -> bool {
    if config.touch_supported || config.use_mouse_for_touch {
        input.touch_enabled = true;
        return true;
    }

    false
}
