//! Systems for syncing Bevy entities with simulation state

use bevy::prelude::*;

use super::components::{
    plane_to_world, vehicle_color, EntityMappings, FleetResource, HudText, SelectionRing,
    TelemetryText, VehicleLink,
};

/// Telemetry lines shown in the stream panel
const TELEMETRY_LINES: usize = 12;

/// Start the motion loop once the visuals exist
pub fn start_motion(mut fleet: ResMut<FleetResource>) {
    fleet.frame_loop.start();
}

/// System to advance the fleet by one frame
///
/// The wall clock inside the frame loop measures the time since the previous
/// frame, so this runs once per rendered frame.
pub fn tick_fleet(mut fleet: ResMut<FleetResource>) {
    let resource = &mut *fleet;
    if let Some(report) = resource.frame_loop.frame(&mut resource.fleet) {
        resource.telemetry.tick(report.delta_secs, report.time);
    }
}

/// System to sync vehicle marker positions and colors from simulation state
pub fn sync_vehicles(
    fleet: Res<FleetResource>,
    mappings: Res<EntityMappings>,
    mut vehicle_query: Query<
        (&mut Transform, &MeshMaterial2d<ColorMaterial>),
        With<VehicleLink>,
    >,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    for vehicle in fleet.fleet.vehicles() {
        let Some(&entity) = mappings.vehicles.get(&vehicle.id) else {
            continue;
        };
        let Ok((mut transform, material_handle)) = vehicle_query.get_mut(entity) else {
            continue;
        };
        transform.translation = plane_to_world(&vehicle.position, transform.translation.z);

        if let Some(material) = materials.get_mut(&material_handle.0) {
            material.color = vehicle_color(vehicle);
        }
    }
}

/// System to show the ring around the selected vehicle only
pub fn sync_selection(
    fleet: Res<FleetResource>,
    mappings: Res<EntityMappings>,
    mut ring_query: Query<&mut Visibility, With<SelectionRing>>,
) {
    let selected = fleet.fleet.selected().map(|v| &v.id);
    for (id, &ring) in &mappings.rings {
        let Ok(mut visibility) = ring_query.get_mut(ring) else {
            continue;
        };
        *visibility = if selected == Some(id) {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
}

/// System to update the HUD text
pub fn update_hud_text(fleet: Res<FleetResource>, mut text_query: Query<(&HudText, &mut Text)>) {
    let stats = fleet.fleet.stats();

    for (hud, mut text) in text_query.iter_mut() {
        match hud {
            HudText::FleetKpis => {
                **text = format!(
                    "Active Vehicles: {} / {} | Utilization: {}% | Alerts: {}",
                    stats.active, stats.total, stats.utilization_pct, stats.alerts
                );
            }
            HudText::StatusBreakdown => {
                **text = format!(
                    "Active {} | Delayed {} | Alert {} | Idle {}",
                    stats.active, stats.delayed, stats.alert, stats.idle
                );
            }
            HudText::LoopState => {
                **text = if fleet.frame_loop.is_running() {
                    format!("Motion: live | {:.1}s", fleet.fleet.time)
                } else {
                    format!("Motion: paused | {:.1}s", fleet.fleet.time)
                };
            }
            HudText::Selection => {
                **text = match fleet.fleet.selected() {
                    Some(v) => {
                        let assigned: Vec<&str> =
                            fleet.fleet.orders_for(v.id.as_str()).map(|o| o.id.as_str()).collect();
                        format!(
                            "{} {} | {} | {}km/h | orders {} | ETA {}\nQueue: {}",
                            v.label,
                            v.driver,
                            v.status.display_label(),
                            v.speed,
                            v.orders,
                            v.eta(),
                            if assigned.is_empty() {
                                "-".to_string()
                            } else {
                                assigned.join(", ")
                            }
                        )
                    }
                    None => "No vehicle selected".to_string(),
                };
            }
        }
    }
}

/// System to update the telemetry stream panel
pub fn update_telemetry_text(
    fleet: Res<FleetResource>,
    mut text_query: Query<&mut Text, With<TelemetryText>>,
) {
    let mut lines = vec![format!("Telemetry Stream ({} events)", fleet.telemetry.len())];
    lines.extend(
        fleet
            .telemetry
            .entries()
            .take(TELEMETRY_LINES)
            .map(|entry| entry.summary()),
    );

    for mut text in text_query.iter_mut() {
        **text = lines.join("\n");
    }
}
