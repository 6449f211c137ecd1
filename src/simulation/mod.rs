//! Standalone dispatch simulation module
//!
//! This module contains all the core fleet simulation logic that can run
//! independently of the Bevy game engine. It can be tested via console
//! without needing to boot up the full UI.

mod clock;
mod fleet;
mod frame_loop;
mod orders;
mod seed;
mod telemetry;
mod types;
mod vehicle;

pub use clock::{FixedClock, FrameClock, WallClock};
pub use fleet::{advance_fleet, FleetStats, SimFleet, StatusChange};
pub use frame_loop::{FrameLoop, FrameReport, StopHandle};
pub use orders::{
    check_order_links, load_orders, seed_orders, Order, OrderPriority, OrderStats, OrderStatus,
    SeedOrder, TimeWindow, SEED_ORDERS,
};
pub use seed::{load_seed, seed_fleet, validate_fleet, SeedVehicle, SEED_ROUTES, SEED_VEHICLES};
pub use telemetry::{
    TelemetryEntry, TelemetryFeed, TelemetryKind, TELEMETRY_CAPACITY, TELEMETRY_EVENTS,
    TELEMETRY_FIRST_ID, TELEMETRY_INITIAL_ENTRIES, TELEMETRY_INTERVAL_SECS,
};
pub use types::{
    Eta, Position, Velocity, VehicleId, VehicleStatus, DEPOT_POSITION, PLANE_MAX, PLANE_MIN,
    SPEED_SCALE,
};
pub use vehicle::{reflect_axis, SimVehicle};
