//! Devices → simulation input events
//!
//! ```text
//! ButtonInput<KeyCode> / ButtonInput<MouseButton> / Gamepad / MouseMotion / TouchInput
//!     ↓ InputBindings
//! ActionInput / AxisInput / TouchInputEvent
//!     ↓
//! PlayerInputSet (fpsdemo_simulation)
//! ```

use bevy::input::mouse::MouseMotion;
use bevy::input::touch::{TouchInput, TouchPhase as DeviceTouchPhase};
use bevy::prelude::*;
use bevy::window::{CursorGrabMode, PrimaryWindow};
use fpsdemo_simulation::{
    ActionInput, AxisInput, FpsDemoConfig, InputAction, InputAxis, PlayerInputSet,
    TouchInputEvent, TouchPhase,
};

pub struct DeviceInputPlugin;

impl Plugin for DeviceInputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<InputBindings>()
            .add_systems(Startup, grab_cursor)
            .add_systems(
                Update,
                (
                    toggle_cursor_grab,
                    emit_action_input,
                    emit_axis_input,
                    emit_touch_input,
                )
                    .chain()
                    .before(PlayerInputSet),
            );
    }
}

/// Кнопка → action
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionMapping<T> {
    pub input: T,
    pub action: InputAction,
}

fn action<T>(input: T, action: InputAction) -> ActionMapping<T> {
    ActionMapping { input, action }
}

/// Источник → axis (value × scale)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisMapping<T> {
    pub input: T,
    pub axis: InputAxis,
    pub scale: f32,
}

/// Таблица устройств (аналог input ini)
#[derive(Resource, Debug, Clone)]
pub struct InputBindings {
    pub key_actions: Vec<ActionMapping<KeyCode>>,
    pub mouse_actions: Vec<ActionMapping<MouseButton>>,
    pub gamepad_actions: Vec<ActionMapping<GamepadButton>>,
    pub key_axes: Vec<AxisMapping<KeyCode>>,
    pub gamepad_axes: Vec<AxisMapping<GamepadAxis>>,
    /// Мышь по X
    pub mouse_x: AxisMapping<()>,
    /// Мышь по Y (экранный Y растёт вниз)
    pub mouse_y: AxisMapping<()>,
}

impl Default for InputBindings {
    fn default() -> Self {
        use InputAction::*;
        use InputAxis::*;

        Self {
            key_actions: vec![action(KeyCode::Space, Jump), action(KeyCode::ShiftLeft, Rush)],
            mouse_actions: vec![
                action(MouseButton::Right, Focus),
                action(MouseButton::Left, PrimaryAction),
            ],
            gamepad_actions: vec![
                action(GamepadButton::South, Jump),
                action(GamepadButton::LeftThumb, Rush),
                action(GamepadButton::LeftTrigger2, Focus),
                action(GamepadButton::RightTrigger2, PrimaryAction),
            ],
            key_axes: vec![
                AxisMapping { input: KeyCode::KeyW, axis: MoveForward, scale: 1.0 },
                AxisMapping { input: KeyCode::KeyS, axis: MoveForward, scale: -1.0 },
                AxisMapping { input: KeyCode::KeyD, axis: MoveRight, scale: 1.0 },
                AxisMapping { input: KeyCode::KeyA, axis: MoveRight, scale: -1.0 },
            ],
            gamepad_axes: vec![
                AxisMapping { input: GamepadAxis::LeftStickY, axis: MoveForward, scale: 1.0 },
                AxisMapping { input: GamepadAxis::LeftStickX, axis: MoveRight, scale: 1.0 },
                AxisMapping { input: GamepadAxis::RightStickX, axis: TurnGamepad, scale: 1.0 },
                AxisMapping { input: GamepadAxis::RightStickY, axis: LookUpGamepad, scale: 1.0 },
            ],
            mouse_x: AxisMapping { input: (), axis: TurnMouse, scale: 1.0 },
            mouse_y: AxisMapping { input: (), axis: LookUpMouse, scale: -1.0 },
        }
    }
}

impl InputBindings {
    /// Сумма зажатых клавиш по оси
    pub fn key_axis_value(&self, axis: InputAxis, keys: &ButtonInput<KeyCode>) -> f32 {
        self.key_axes
            .iter()
            .filter(|mapping| mapping.axis == axis && keys.pressed(mapping.input))
            .map(|mapping| mapping.scale)
            .sum()
    }
}

fn edges<T: Copy>(
    mappings: &[ActionMapping<T>],
    just_pressed: impl Fn(T) -> bool,
    just_released: impl Fn(T) -> bool,
    writer: &mut EventWriter<ActionInput>,
) {
    for mapping in mappings {
        if just_pressed(mapping.input) {
            writer.write(ActionInput::pressed(mapping.action));
        }
        if just_released(mapping.input) {
            writer.write(ActionInput::released(mapping.action));
        }
    }
}

/// Система: кнопки → ActionInput (pressed / released)
fn emit_action_input(
    keys: Res<ButtonInput<KeyCode>>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    gamepads: Query<&Gamepad>,
    bindings: Res<InputBindings>,
    config: Res<FpsDemoConfig>,
    mut writer: EventWriter<ActionInput>,
) {
    edges(
        &bindings.key_actions,
        |key| keys.just_pressed(key),
        |key| keys.just_released(key),
        &mut writer,
    );

    // Мышь как touch: кнопки идут в emit_touch_input
    if !config.input.use_mouse_for_touch {
        edges(
            &bindings.mouse_actions,
            |button| mouse_buttons.just_pressed(button),
            |button| mouse_buttons.just_released(button),
            &mut writer,
        );
    }

    for gamepad in gamepads.iter() {
        edges(
            &bindings.gamepad_actions,
            |button| gamepad.just_pressed(button),
            |button| gamepad.just_released(button),
            &mut writer,
        );
    }
}

/// Система: клавиши, стики и мышь → AxisInput
fn emit_axis_input(
    keys: Res<ButtonInput<KeyCode>>,
    gamepads: Query<&Gamepad>,
    mut mouse_motion: EventReader<MouseMotion>,
    bindings: Res<InputBindings>,
    config: Res<FpsDemoConfig>,
    mut writer: EventWriter<AxisInput>,
) {
    for axis in InputAxis::ALL {
        let value = bindings.key_axis_value(axis, &keys);
        if value != 0.0 {
            writer.write(AxisInput::new(axis, value));
        }
    }

    for gamepad in gamepads.iter() {
        for mapping in &bindings.gamepad_axes {
            let value = gamepad.get(mapping.input).unwrap_or(0.0) * mapping.scale;
            if value != 0.0 {
                writer.write(AxisInput::new(mapping.axis, value));
            }
        }
    }

    let delta: Vec2 = mouse_motion.read().map(|motion| motion.delta).sum();
    if delta != Vec2::ZERO {
        let sensitivity = config.input.mouse_sensitivity;
        writer.write(AxisInput::new(
            bindings.mouse_x.axis,
            delta.x * sensitivity * bindings.mouse_x.scale,
        ));
        writer.write(AxisInput::new(
            bindings.mouse_y.axis,
            delta.y * sensitivity * bindings.mouse_y.scale,
        ));
    }
}

/// Система: touch (и мышь в режиме use_mouse_for_touch) → TouchInputEvent
fn emit_touch_input(
    mut touches: EventReader<TouchInput>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    config: Res<FpsDemoConfig>,
    mut writer: EventWriter<TouchInputEvent>,
) {
    for touch in touches.read() {
        let phase = match touch.phase {
            DeviceTouchPhase::Started => TouchPhase::Pressed,
            DeviceTouchPhase::Ended | DeviceTouchPhase::Canceled => TouchPhase::Released,
            DeviceTouchPhase::Moved => continue,
        };

        writer.write(TouchInputEvent {
            phase,
            finger: touch.id,
            location: touch.position,
        });
    }

    if !config.input.use_mouse_for_touch {
        return;
    }

    let location = windows
        .single()
        .ok()
        .and_then(|window| window.cursor_position())
        .unwrap_or(Vec2::ZERO);

    if mouse_buttons.just_pressed(MouseButton::Left) {
        writer.write(TouchInputEvent {
            phase: TouchPhase::Pressed,
            finger: 0,
            location,
        });
    }
    if mouse_buttons.just_released(MouseButton::Left) {
        writer.write(TouchInputEvent {
            phase: TouchPhase::Released,
            finger: 0,
            location,
        });
    }
}

fn set_cursor_grab(window: &mut Window, grab: bool) {
    if grab {
        window.cursor_options.grab_mode = CursorGrabMode::Locked;
        window.cursor_options.visible = false;
    } else {
        window.cursor_options.grab_mode = CursorGrabMode::None;
        window.cursor_options.visible = true;
    }
}

/// Startup: мышь захвачена окном (mouse look)
fn grab_cursor(mut windows: Query<&mut Window, With<PrimaryWindow>>, config: Res<FpsDemoConfig>) {
    // Курсор нужен для touch эмуляции
    if config.input.use_mouse_for_touch {
        return;
    }

    if let Ok(mut window) = windows.single_mut() {
        set_cursor_grab(&mut window, true);
    }
}

/// Escape отпускает курсор, клик по окну захватывает снова
fn toggle_cursor_grab(
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
    keys: Res<ButtonInput<KeyCode>>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    config: Res<FpsDemoConfig>,
) {
    if config.input.use_mouse_for_touch {
        return;
    }

    let Ok(mut window) = windows.single_mut() else {
        return;
    };

    if keys.just_pressed(KeyCode::Escape) {
        set_cursor_grab(&mut window, false);
    } else if mouse_buttons.just_pressed(MouseButton::Left)
        && window.cursor_options.grab_mode == CursorGrabMode::None
    {
        set_cursor_grab(&mut window, true);
    }
}
