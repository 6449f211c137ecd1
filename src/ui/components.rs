//! UI components and resources for linking Bevy entities to simulation state

use bevy::prelude::*;
use log::warn;
use std::collections::HashMap;

use crate::simulation::{
    FrameLoop, Position, SimFleet, SimVehicle, TelemetryFeed, VehicleId, WallClock,
};

/// Pixels per unit of the normalized plane
pub const PLANE_SCALE: f32 = 6.5;

/// Map a plane position to world coordinates
///
/// The plane's y axis points down the screen, Bevy's points up.
pub fn plane_to_world(position: &Position, z: f32) -> Vec3 {
    Vec3::new(
        (position.x - 50.0) * PLANE_SCALE,
        (50.0 - position.y) * PLANE_SCALE,
        z,
    )
}

/// Map a world position back onto the plane
pub fn world_to_plane(world: Vec2) -> Position {
    Position::new(world.x / PLANE_SCALE + 50.0, 50.0 - world.y / PLANE_SCALE)
}

/// Marker color parsed from the vehicle's hex color
pub fn vehicle_color(vehicle: &SimVehicle) -> Color {
    match Srgba::hex(&vehicle.color) {
        Ok(color) => color.into(),
        Err(err) => {
            warn!("Vehicle {} has unusable color '{}': {}", vehicle.id, vehicle.color, err);
            Color::WHITE
        }
    }
}

/// Resource wrapper for the fleet and everything that drives it
#[derive(Resource)]
pub struct FleetResource {
    pub fleet: SimFleet,
    pub frame_loop: FrameLoop<WallClock>,
    pub telemetry: TelemetryFeed,
}

impl FleetResource {
    pub fn new(fleet: SimFleet, telemetry_seed: Option<u64>) -> Self {
        let telemetry = TelemetryFeed::new(fleet.vehicle_ids(), telemetry_seed);
        Self {
            fleet,
            frame_loop: FrameLoop::new(WallClock::new()),
            telemetry,
        }
    }
}

/// Marker component for the main camera
#[derive(Component)]
pub struct MainCamera;

/// Links a Bevy entity to a simulation vehicle
#[derive(Component)]
pub struct VehicleLink(pub VehicleId);

/// Ring drawn around the selected vehicle
#[derive(Component)]
pub struct SelectionRing;

/// Resource to track Bevy entities mapped to simulation vehicles
#[derive(Resource, Default)]
pub struct EntityMappings {
    /// Vehicle marker entities
    pub vehicles: HashMap<VehicleId, Entity>,
    /// Selection ring entities, children of the markers
    pub rings: HashMap<VehicleId, Entity>,
}

/// Marker for HUD text elements
#[derive(Component)]
pub enum HudText {
    /// Active vehicles, utilization and alert count
    FleetKpis,
    /// Vehicle counts per status
    StatusBreakdown,
    /// Whether the motion loop is running
    LoopState,
    /// Details of the selected vehicle
    Selection,
}

/// Marker for the telemetry stream text
#[derive(Component)]
pub struct TelemetryText;
