//! Player input systems (ECS)
//!
//! Маршрутизируют ActionInput / AxisInput / TouchInputEvent через
//! `PlayerInputComponent` в handlers персонажа.
//!
//! Порядок за frame:
//! 1. reset_movement_input - сброс movement input прошлого frame
//! 2. dispatch_action_input - press/release handlers
//! 3. dispatch_axis_input - все оси в порядке bindings (даже с 0.0)
//! 4. dispatch_touch_input - touch begin/end

use bevy::prelude::*;

use super::bindings::PlayerInputComponent;
use super::events::{ActionInput, AxisInput, InputAxis, TouchInputEvent, TouchPhase, UseItem};
use super::touch::TouchState;
use crate::character::control::CharacterControl;
use crate::character::{CharacterState, ControlRotation, FpsCharacter, Player};
use crate::physics::CharacterMovement;

type PlayerControlQuery<'w, 's> = Query<
    'w,
    's,
    (
        Entity,
        &'static PlayerInputComponent,
        &'static FpsCharacter,
        &'static Transform,
        &'static mut CharacterState,
        &'static mut CharacterMovement,
        &'static mut ControlRotation,
    ),
    With<Player>,
>;

/// Сумма значений осей за frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AxisFrame {
    values: [f32; InputAxis::COUNT],
}

impl AxisFrame {
    pub fn add(&mut self, axis: InputAxis, value: f32) {
        if value.is_finite() {
            self.values[axis.index()] += value;
        }
    }

    pub fn value(&self, axis: InputAxis) -> f32 {
        self.values[axis.index()]
    }

    pub fn is_idle(&self) -> bool {
        InputAxis::ALL.iter().all(|axis| self.value(*axis) == 0.0)
    }
}

/// Система: сброс movement input перед обработкой нового frame
pub fn reset_movement_input(mut players: Query<&mut CharacterMovement, With<Player>>) {
    for mut movement in players.iter_mut() {
        movement.clear_input();
    }
}

/// Система: action press/release → handlers
pub fn dispatch_action_input(
    mut action_events: EventReader<ActionInput>,
    mut use_item_events: EventWriter<UseItem>,
    mut players: PlayerControlQuery,
    time: Res<Time>,
) {
    let delta_secs = time.delta_secs();

    for event in action_events.read() {
        for (entity, input, character, transform, mut state, mut movement, mut rotation) in
            players.iter_mut()
        {
            let mut control = CharacterControl {
                entity,
                character,
                transform,
                state: &mut state,
                movement: &mut movement,
                rotation: &mut rotation,
                delta_secs,
                use_item_requested: false,
            };

            for handler in input.action_handlers(event.action, event.edge) {
                handler(&mut control);
            }

            if control.use_item_requested {
                use_item_events.write(UseItem { character: entity });
                crate::log(&format!("Character {:?} used item", entity));
            }
        }
    }
}

/// Система: оси → handlers
///
/// Handlers вызываются каждый frame для каждой оси, даже без событий.
pub fn dispatch_axis_input(
    mut axis_events: EventReader<AxisInput>,
    mut players: PlayerControlQuery,
    time: Res<Time>,
) {
    let mut frame = AxisFrame::default();
    for event in axis_events.read() {
        frame.add(event.axis, event.value);
    }

    let delta_secs = time.delta_secs();

    for (entity, input, character, transform, mut state, mut movement, mut rotation) in
        players.iter_mut()
    {
        let mut control = CharacterControl {
            entity,
            character,
            transform,
            state: &mut state,
            movement: &mut movement,
            rotation: &mut rotation,
            delta_secs,
            use_item_requested: false,
        };

        for binding in &input.axes {
            (binding.handler)(&mut control, frame.value(binding.axis));
        }
    }
}

/// Система: touch begin/end → TouchState
pub fn dispatch_touch_input(
    mut touch_events: EventReader<TouchInputEvent>,
    mut use_item_events: EventWriter<UseItem>,
    mut players: Query<(Entity, &PlayerInputComponent, &mut TouchState), With<Player>>,
) {
    for event in touch_events.read() {
        for (entity, input, mut touch) in players.iter_mut() {
            // Touch bindings не установлены на этой платформе
            if !input.touch_enabled {
                continue;
            }

            match event.phase {
                TouchPhase::Pressed => {
                    if touch.begin_touch(event.finger, event.location) {
                        use_item_events.write(UseItem { character: entity });
                        crate::log(&format!(
                            "Character {:?} tap (finger {}) → use item",
                            entity, event.finger
                        ));
                    }
                }
                TouchPhase::Released => touch.end_touch(event.finger, event.location),
            }
        }
    }
}
