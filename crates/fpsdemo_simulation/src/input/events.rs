//! Player input events
//!
//! Генерируются клиентом (keyboard/mouse/gamepad/touch → InputBindings)
//! или тестами напрямую. Симуляция устройства не читает.

use bevy::prelude::{Entity, Event, Vec2};

/// Дискретные действия (press/release)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    Jump,
    /// Sprint modifier
    Rush,
    /// Zoom modifier (уменьшает FOV)
    Focus,
    /// Выстрел / использование предмета
    PrimaryAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputEdge {
    Pressed,
    Released,
}

/// Event: action нажат или отпущен
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ActionInput {
    pub action: InputAction,
    pub edge: InputEdge,
}

impl ActionInput {
    pub fn pressed(action: InputAction) -> Self {
        Self {
            action,
            edge: InputEdge::Pressed,
        }
    }

    pub fn released(action: InputAction) -> Self {
        Self {
            action,
            edge: InputEdge::Released,
        }
    }
}

/// Аналоговые оси
///
/// Mouse оси: абсолютная дельта (градусы после scale),
/// Gamepad оси: rate (-1..1), умножается на turn rate и delta time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAxis {
    /// +1 forward, -1 backward
    MoveForward,
    /// +1 right, -1 left
    MoveRight,
    TurnMouse,
    LookUpMouse,
    TurnGamepad,
    LookUpGamepad,
}

impl InputAxis {
    pub const COUNT: usize = 6;

    pub const ALL: [InputAxis; Self::COUNT] = [
        InputAxis::MoveForward,
        InputAxis::MoveRight,
        InputAxis::TurnMouse,
        InputAxis::LookUpMouse,
        InputAxis::TurnGamepad,
        InputAxis::LookUpGamepad,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Event: значение оси за этот frame
///
/// Несколько событий одной оси за frame суммируются (W + S = 0).
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct AxisInput {
    pub axis: InputAxis,
    pub value: f32,
}

impl AxisInput {
    pub fn new(axis: InputAxis, value: f32) -> Self {
        Self { axis, value }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Pressed,
    Released,
}

/// Event: палец коснулся / отпустил экран
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct TouchInputEvent {
    pub phase: TouchPhase,
    pub finger: u64,
    pub location: Vec2,
}

/// Event: персонаж использовал предмет (primary action)
///
/// Слушатели: оружие (spawn projectile), UI, звук.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct UseItem {
    pub character: Entity,
}
