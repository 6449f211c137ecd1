//! Seed fleet loaded once at startup
//!
//! The fleet is a fixed compile-time list. It goes through the same validation
//! as any other vehicle set so a bad entry fails at load time rather than
//! mid-simulation.

use anyhow::{bail, Context, Result};
use log::{debug, warn};
use std::collections::HashSet;

use super::types::{Position, Velocity, VehicleId, VehicleStatus};
use super::vehicle::SimVehicle;

/// One raw entry of the seed list
#[derive(Debug, Clone, Copy)]
pub struct SeedVehicle {
    pub id: &'static str,
    pub x: f32,
    pub y: f32,
    pub dx: f32,
    pub dy: f32,
    pub status: &'static str,
    pub driver: &'static str,
    pub speed: u32,
    pub orders: u32,
}

pub const SEED_VEHICLES: [SeedVehicle; 6] = [
    SeedVehicle {
        id: "V-01",
        x: 22.0,
        y: 35.0,
        dx: 0.12,
        dy: 0.08,
        status: "active",
        driver: "M. Torres",
        speed: 42,
        orders: 4,
    },
    SeedVehicle {
        id: "V-02",
        x: 55.0,
        y: 20.0,
        dx: -0.09,
        dy: 0.13,
        status: "active",
        driver: "S. Chen",
        speed: 38,
        orders: 6,
    },
    SeedVehicle {
        id: "V-03",
        x: 75.0,
        y: 60.0,
        dx: 0.07,
        dy: -0.11,
        status: "delayed",
        driver: "R. Patel",
        speed: 21,
        orders: 3,
    },
    SeedVehicle {
        id: "V-04",
        x: 40.0,
        y: 70.0,
        dx: -0.14,
        dy: -0.06,
        status: "active",
        driver: "J. Kim",
        speed: 51,
        orders: 5,
    },
    SeedVehicle {
        id: "V-05",
        x: 88.0,
        y: 25.0,
        dx: -0.06,
        dy: 0.09,
        status: "alert",
        driver: "A. Novak",
        speed: 0,
        orders: 2,
    },
    SeedVehicle {
        id: "V-06",
        x: 15.0,
        y: 75.0,
        dx: 0.10,
        dy: -0.07,
        status: "idle",
        driver: "C. Diaz",
        speed: 0,
        orders: 0,
    },
];

/// Route polylines, assigned in order to the first vehicles of the seed list
pub const SEED_ROUTES: [&[(f32, f32)]; 4] = [
    &[(22.0, 35.0), (35.0, 28.0), (50.0, 22.0), (62.0, 18.0), (72.0, 14.0), (80.0, 20.0)],
    &[(55.0, 20.0), (50.0, 35.0), (45.0, 50.0), (40.0, 62.0), (38.0, 75.0)],
    &[(75.0, 60.0), (65.0, 55.0), (55.0, 52.0), (45.0, 55.0), (38.0, 62.0)],
    &[(40.0, 70.0), (52.0, 65.0), (65.0, 60.0), (74.0, 52.0), (80.0, 40.0), (85.0, 30.0)],
];

/// Build the default seed fleet
pub fn seed_fleet() -> Result<Vec<SimVehicle>> {
    load_seed(&SEED_VEHICLES, &SEED_ROUTES)
}

/// Turn raw seed entries into validated vehicles
///
/// `routes[i]` is attached to `seeds[i]`; extra seeds get no route.
pub fn load_seed(seeds: &[SeedVehicle], routes: &[&[(f32, f32)]]) -> Result<Vec<SimVehicle>> {
    let vehicles = seeds
        .iter()
        .enumerate()
        .map(|(i, seed)| -> Result<SimVehicle> {
            let status: VehicleStatus = seed
                .status
                .parse()
                .with_context(|| format!("invalid seed entry {}", seed.id))?;
            let route: Vec<Position> = routes
                .get(i)
                .map(|points| points.iter().map(|&(x, y)| Position::new(x, y)).collect())
                .unwrap_or_default();

            Ok(SimVehicle::new(
                VehicleId::new(seed.id),
                seed.id,
                Position::new(seed.x, seed.y),
                Velocity::new(seed.dx, seed.dy),
                status,
                route,
                seed.driver,
                seed.speed,
                seed.orders,
            ))
        })
        .collect::<Result<Vec<_>>>()?;

    validate_fleet(vehicles)
}

/// Check fleet invariants, clamping finite out-of-range positions
///
/// Rejects duplicate ids, non-finite kinematics and motion-eligible vehicles
/// that have no velocity.
pub fn validate_fleet(mut vehicles: Vec<SimVehicle>) -> Result<Vec<SimVehicle>> {
    let mut seen = HashSet::new();

    for vehicle in &mut vehicles {
        if !seen.insert(vehicle.id.clone()) {
            bail!("duplicate vehicle id {}", vehicle.id);
        }
        if !vehicle.position.is_finite() {
            bail!("vehicle {} has a non-finite position {:?}", vehicle.id, vehicle.position);
        }
        if !vehicle.velocity.is_finite() {
            bail!("vehicle {} has a non-finite velocity {:?}", vehicle.id, vehicle.velocity);
        }
        if vehicle.is_motion_eligible() && vehicle.velocity.is_zero() {
            bail!("vehicle {} is {} but has zero velocity", vehicle.id, vehicle.status);
        }
        if !vehicle.position.in_bounds() {
            let clamped = vehicle.position.clamped();
            warn!(
                "Vehicle {} seeded outside the drivable area at ({:.1}, {:.1}), clamping",
                vehicle.id, vehicle.position.x, vehicle.position.y
            );
            vehicle.position = clamped;
        }
    }

    debug!("Validated fleet of {} vehicles", vehicles.len());
    Ok(vehicles)
}
