//! Headless симуляция FPS Demo
//!
//! Прогоняет scripted input без рендера: бег с rush, прыжок, focus, выстрел.

use bevy::prelude::*;
use fpsdemo_simulation::{
    create_headless_app, log_info, spawn_fps_character, ActionInput, AxisInput, ControlRotation,
    FirstPersonCamera, FpsDemoConfig, InputAction, InputAxis, ProjectileFired, SimulationPlugin,
};

const TICKS: u32 = 240;

fn main() {
    let mut app = create_headless_app();
    app.add_plugins(SimulationPlugin);

    let config = app.world().resource::<FpsDemoConfig>().clone();
    let player = {
        let mut commands = app.world_mut().commands();
        spawn_fps_character(&mut commands, Vec3::new(0.0, config.character.capsule_half_height, 0.0), &config)
    };
    app.world_mut().flush();

    log_info(&format!("Starting FPS Demo headless simulation ({} ticks)", TICKS));

    for tick in 0..TICKS {
        script_input(&mut app, tick);
        app.update();

        if tick % 60 == 0 {
            report(&mut app, player, tick);
        }
    }

    let fired = app.world().resource::<Events<ProjectileFired>>().len();
    log_info(&format!("Simulation complete! Projectiles fired in last frames: {}", fired));
}

/// Scripted input: секунда ходьбы, секунда rush + прыжок, focus + выстрел
fn script_input(app: &mut App, tick: u32) {
    let world = app.world_mut();

    world.send_event(AxisInput::new(InputAxis::MoveForward, 1.0));
    world.send_event(AxisInput::new(InputAxis::TurnGamepad, 0.25));

    match tick {
        60 => {
            world.send_event(ActionInput::pressed(InputAction::Rush));
        }
        90 => {
            world.send_event(ActionInput::pressed(InputAction::Jump));
        }
        91 => {
            world.send_event(ActionInput::released(InputAction::Jump));
        }
        120 => {
            world.send_event(ActionInput::released(InputAction::Rush));
            world.send_event(ActionInput::pressed(InputAction::Focus));
        }
        150 => {
            world.send_event(ActionInput::pressed(InputAction::PrimaryAction));
        }
        180 => {
            world.send_event(ActionInput::released(InputAction::Focus));
        }
        _ => {}
    }
}

fn report(app: &mut App, player: Entity, tick: u32) {
    let world = app.world_mut();

    let Some(transform) = world.get::<Transform>(player).copied() else {
        return;
    };
    let yaw = world.get::<ControlRotation>(player).map(|rotation| rotation.yaw);

    let mut cameras = world.query::<&FirstPersonCamera>();
    let fov = cameras.iter(world).next().map(|camera| camera.field_of_view);

    log_info(&format!(
        "Tick {}: position {:?}, yaw {:?}, fov {:?}",
        tick, transform.translation, yaw, fov
    ));
}
