//! World setup systems for camera and map background

use bevy::prelude::*;

use super::components::{plane_to_world, MainCamera, PLANE_SCALE};
use crate::simulation::{Position, PLANE_MAX, PLANE_MIN};

/// System to setup the world environment (camera, map background, drivable area)
pub fn setup_world(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    commands.spawn((MainCamera, Camera2d));

    // Full 0-100 plane
    commands.spawn((
        Mesh2d(meshes.add(Rectangle::new(100.0 * PLANE_SCALE, 100.0 * PLANE_SCALE))),
        MeshMaterial2d(materials.add(Color::srgb(0.02, 0.05, 0.10))),
        Transform::from_translation(plane_to_world(&Position::new(50.0, 50.0), 0.0)),
    ));

    // Area vehicles are allowed to drive in
    let extent = (PLANE_MAX - PLANE_MIN) * PLANE_SCALE;
    commands.spawn((
        Mesh2d(meshes.add(Rectangle::new(extent, extent))),
        MeshMaterial2d(materials.add(Color::srgb(0.04, 0.09, 0.16))),
        Transform::from_translation(plane_to_world(&Position::new(50.0, 50.0), 0.5)),
    ));
}
