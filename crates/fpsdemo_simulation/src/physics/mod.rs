//! Physics module
//!
//! Kinematic движение персонажа + collision groups для Rapier.

pub mod collision;
pub mod movement;

pub use collision::*;
pub use movement::{
    CharacterMovement, CharacterMovementPlugin, GROUND_HEIGHT, GROUND_TOLERANCE,
};
