//! Touch input: tap тем же пальцем = primary action

use bevy::prelude::*;

/// Состояние последнего касания
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct TouchState {
    pub is_pressed: bool,
    pub finger_index: u64,
    pub location: Vec2,
    pub moved: bool,
}

impl Default for TouchState {
    fn default() -> Self {
        Self {
            is_pressed: false,
            finger_index: 0,
            location: Vec2::ZERO,
            moved: false,
        }
    }
}

impl TouchState {
    /// Палец коснулся экрана
    ///
    /// Возвращает `true`, если касание должно сработать как primary action.
    /// Повторное касание при уже зажатом пальце игнорируется целиком.
    pub fn begin_touch(&mut self, finger: u64, location: Vec2) -> bool {
        if self.is_pressed {
            return false;
        }

        let fire = finger == self.finger_index && !self.moved;

        self.is_pressed = true;
        self.finger_index = finger;
        self.location = location;
        self.moved = false;

        fire
    }

    pub fn end_touch(&mut self, _finger: u64, _location: Vec2) {
        if !self.is_pressed {
            return;
        }

        self.is_pressed = false;
    }
}
