//! Systems for spawning visual entities from simulation state

use bevy::prelude::*;

use super::components::{
    plane_to_world, vehicle_color, EntityMappings, FleetResource, HudText, SelectionRing,
    TelemetryText, VehicleLink, PLANE_SCALE,
};
use crate::simulation::{Position, SimVehicle, DEPOT_POSITION};

const ROUTE_Z: f32 = 1.0;
const DEPOT_Z: f32 = 2.0;
const VEHICLE_Z: f32 = 3.0;

/// System to create initial visual entities from simulation state
pub fn spawn_initial_visuals(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    fleet: Res<FleetResource>,
    mut mappings: ResMut<EntityMappings>,
) {
    for (index, vehicle) in fleet.fleet.vehicles().iter().enumerate() {
        // Routes of vehicles needing attention are drawn in amber
        let route_color = if vehicle.status.needs_attention() {
            Color::srgba(0.96, 0.62, 0.04, 0.55)
        } else {
            Color::srgba(0.23, 0.51, 0.96, 0.55)
        };
        spawn_route(
            &mut commands,
            &mut meshes,
            &mut materials,
            &vehicle.route,
            route_color,
            index,
        );
    }

    spawn_depot(&mut commands, &mut meshes, &mut materials);

    for vehicle in fleet.fleet.vehicles() {
        let (marker, ring) =
            spawn_vehicle_visual(&mut commands, &mut meshes, &mut materials, vehicle);
        mappings.vehicles.insert(vehicle.id.clone(), marker);
        mappings.rings.insert(vehicle.id.clone(), ring);
    }
}

fn spawn_route(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<ColorMaterial>>,
    route: &[Position],
    color: Color,
    index: usize,
) {
    const ROUTE_WIDTH: f32 = 0.4 * PLANE_SCALE;
    let material = materials.add(color);
    // Stack routes slightly so overlapping segments don't flicker
    let z = ROUTE_Z + index as f32 * 0.01;

    for segment in route.windows(2) {
        let start = plane_to_world(&segment[0], z);
        let end = plane_to_world(&segment[1], z);
        let direction = end - start;
        let length = direction.truncate().length();
        if length <= f32::EPSILON {
            continue;
        }

        commands.spawn((
            Mesh2d(meshes.add(Rectangle::new(length, ROUTE_WIDTH))),
            MeshMaterial2d(material.clone()),
            Transform::from_translation((start + end) / 2.0)
                .with_rotation(Quat::from_rotation_z(direction.y.atan2(direction.x))),
        ));
    }
}

fn spawn_depot(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<ColorMaterial>>,
) {
    let position = plane_to_world(&DEPOT_POSITION, DEPOT_Z);
    commands
        .spawn((
            Mesh2d(meshes.add(RegularPolygon::new(2.5 * PLANE_SCALE, 5))),
            MeshMaterial2d(materials.add(Color::srgb(0.15, 0.39, 0.92))),
            Transform::from_translation(position),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text2d::new("HQ"),
                TextFont {
                    font_size: 12.0,
                    ..default()
                },
                TextColor(Color::srgb(0.38, 0.65, 0.98)),
                Transform::from_xyz(3.5 * PLANE_SCALE, 1.0 * PLANE_SCALE, 0.1),
            ));
        });
}

/// Spawn a single vehicle marker with its label and selection ring
///
/// Returns the marker entity and its ring.
pub fn spawn_vehicle_visual(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<ColorMaterial>>,
    vehicle: &SimVehicle,
) -> (Entity, Entity) {
    const MARKER_RADIUS: f32 = 1.4 * PLANE_SCALE;
    const RING_RADIUS: f32 = 4.5 * PLANE_SCALE;
    let color = vehicle_color(vehicle);
    let mut ring = Entity::PLACEHOLDER;

    let marker = commands
        .spawn((
            VehicleLink(vehicle.id.clone()),
            Mesh2d(meshes.add(Circle::new(MARKER_RADIUS))),
            MeshMaterial2d(materials.add(color)),
            Transform::from_translation(plane_to_world(&vehicle.position, VEHICLE_Z)),
        ))
        .with_children(|parent| {
            ring = parent
                .spawn((
                    SelectionRing,
                    Mesh2d(meshes.add(Annulus::new(RING_RADIUS - 0.4 * PLANE_SCALE, RING_RADIUS))),
                    MeshMaterial2d(materials.add(color.with_alpha(0.8))),
                    Transform::from_xyz(0.0, 0.0, -0.1),
                    Visibility::Hidden,
                ))
                .id();
            parent.spawn((
                Text2d::new(vehicle.label.clone()),
                TextFont {
                    font_size: 12.0,
                    ..default()
                },
                TextColor(color),
                Transform::from_xyz(4.0 * PLANE_SCALE, 1.5 * PLANE_SCALE, 0.1),
            ));
        })
        .id();

    (marker, ring)
}

/// System to setup the HUD panels
pub fn setup_hud(mut commands: Commands) {
    commands
        .spawn((
            Node {
                width: Val::Auto,
                height: Val::Auto,
                position_type: PositionType::Absolute,
                top: Val::Px(10.0),
                left: Val::Px(10.0),
                padding: UiRect::all(Val::Px(10.0)),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(5.0),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.7)),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("Active Vehicles: -"),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(0.9, 0.9, 0.9)),
                HudText::FleetKpis,
            ));
            parent.spawn((
                Text::new("Active 0 | Delayed 0 | Alert 0 | Idle 0"),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.8, 0.8)),
                HudText::StatusBreakdown,
            ));
            parent.spawn((
                Text::new("Motion: -"),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::srgb(0.2, 1.0, 0.2)),
                HudText::LoopState,
            ));
            parent.spawn((
                Text::new("No vehicle selected"),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::srgb(1.0, 1.0, 0.5)),
                HudText::Selection,
            ));
        });

    commands
        .spawn((
            Node {
                width: Val::Px(360.0),
                height: Val::Auto,
                position_type: PositionType::Absolute,
                top: Val::Px(10.0),
                right: Val::Px(10.0),
                padding: UiRect::all(Val::Px(10.0)),
                flex_direction: FlexDirection::Column,
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.7)),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("Telemetry Stream"),
                TextFont {
                    font_size: 11.0,
                    ..default()
                },
                TextColor(Color::srgb(0.7, 0.7, 0.7)),
                TelemetryText,
            ));
        });
}
