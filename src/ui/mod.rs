//! UI module that visualizes the fleet using Bevy
//!
//! This module is purely for visualization - all simulation logic is in the `simulation` module.
//! The UI reads state from `SimFleet` and renders it with Bevy's 2D graphics.

mod components;
mod input;
pub mod spawner;
mod sync;
mod world;

use bevy::prelude::*;

pub use components::{EntityMappings, FleetResource};

use crate::simulation::SimFleet;
use input::{handle_input, handle_vehicle_click};
use spawner::{setup_hud, spawn_initial_visuals};
use sync::{
    start_motion, sync_selection, sync_vehicles, tick_fleet, update_hud_text,
    update_telemetry_text,
};
use world::setup_world;

/// Plugin to register all UI systems
pub struct DispatchSimUIPlugin {
    fleet: SimFleet,
    telemetry_seed: Option<u64>,
}

impl DispatchSimUIPlugin {
    pub fn new(fleet: SimFleet, telemetry_seed: Option<u64>) -> Self {
        Self {
            fleet,
            telemetry_seed,
        }
    }
}

impl Plugin for DispatchSimUIPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(FleetResource::new(self.fleet.clone(), self.telemetry_seed))
            .init_resource::<EntityMappings>()
            .add_systems(
                Startup,
                (
                    setup_world,
                    spawn_initial_visuals.after(setup_world),
                    setup_hud,
                    start_motion.after(spawn_initial_visuals),
                ),
            )
            .add_systems(
                Update,
                (
                    handle_input,
                    handle_vehicle_click,
                    tick_fleet.after(handle_input),
                    sync_vehicles.after(tick_fleet),
                    sync_selection.after(handle_input).after(handle_vehicle_click),
                    update_hud_text.after(tick_fleet),
                    update_telemetry_text.after(tick_fleet),
                ),
            );
    }
}
