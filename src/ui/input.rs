//! Input handling systems

use bevy::prelude::*;
use log::{info, warn};

use super::components::{world_to_plane, FleetResource, MainCamera};

/// Handle keyboard input: selection, pause and exit
pub fn handle_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut fleet: ResMut<FleetResource>,
    mut exit: MessageWriter<AppExit>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        fleet.frame_loop.stop();
        exit.write(AppExit::Success);
        return;
    }

    if keyboard.just_pressed(KeyCode::Tab) {
        if let Some(vehicle) = fleet.fleet.select_next() {
            info!("Selected vehicle {}", vehicle.id);
        }
    }

    if keyboard.just_pressed(KeyCode::Space) {
        if fleet.frame_loop.is_running() {
            fleet.frame_loop.stop();
        } else {
            fleet.frame_loop.start();
        }
    }
}

/// Plane units around a marker that still count as a click on it
const PICK_RADIUS: f32 = 4.0;

/// Handle clicks on vehicle markers
///
/// Clicking a vehicle selects it, clicking the selected vehicle again clears
/// the selection.
pub fn handle_vehicle_click(
    mouse_button: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window>,
    camera_query: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    mut fleet: ResMut<FleetResource>,
) {
    if !mouse_button.just_pressed(MouseButton::Left) {
        return;
    }

    let Ok(window) = windows.single() else {
        return;
    };
    let Ok((camera, camera_transform)) = camera_query.single() else {
        return;
    };
    let Some(cursor_position) = window.cursor_position() else {
        return;
    };
    let Ok(world_position) = camera.viewport_to_world_2d(camera_transform, cursor_position) else {
        return;
    };

    let clicked = world_to_plane(world_position);
    let Some(id) = fleet
        .fleet
        .nearest_vehicle(clicked, PICK_RADIUS)
        .map(|v| v.id.clone())
    else {
        return;
    };

    match fleet.fleet.toggle_selection(id.as_str()) {
        Ok(Some(vehicle)) => info!("Selected vehicle {}", vehicle.id),
        Ok(None) => info!("Cleared selection of {}", id),
        Err(err) => warn!("Could not select {}: {}", id, err),
    }
}
