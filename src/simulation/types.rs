//! Core types for the dispatch simulation
//!
//! These are standalone types that don't depend on Bevy.

use anyhow::{bail, Error};
use std::fmt;
use std::str::FromStr;

/// Lower edge of the drivable area of the normalized plane
pub const PLANE_MIN: f32 = 5.0;

/// Upper edge of the drivable area of the normalized plane
pub const PLANE_MAX: f32 = 95.0;

/// Multiplier applied to velocity (plane units per second) each frame
pub const SPEED_SCALE: f32 = 8.0;

/// Location of the dispatch depot on the plane
pub const DEPOT_POSITION: Position = Position { x: 50.0, y: 50.0 };

/// A unique vehicle identifier such as `V-01`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VehicleId(pub String);

impl VehicleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric suffix of the id (`V-04` -> 4), if it has one
    pub fn number(&self) -> Option<u32> {
        self.0.rsplit('-').next()?.parse().ok()
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VehicleId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A 2D position on the normalized 0-100 plane
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn in_bounds(&self) -> bool {
        (PLANE_MIN..=PLANE_MAX).contains(&self.x) && (PLANE_MIN..=PLANE_MAX).contains(&self.y)
    }

    pub fn distance(&self, other: &Position) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn clamped(&self) -> Position {
        Position {
            x: self.x.clamp(PLANE_MIN, PLANE_MAX),
            y: self.y.clamp(PLANE_MIN, PLANE_MAX),
        }
    }
}

/// Velocity in plane units per second
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Velocity {
    pub dx: f32,
    pub dy: f32,
}

impl Velocity {
    pub const fn new(dx: f32, dy: f32) -> Self {
        Self { dx, dy }
    }

    pub fn is_finite(&self) -> bool {
        self.dx.is_finite() && self.dy.is_finite()
    }

    pub fn is_zero(&self) -> bool {
        self.dx == 0.0 && self.dy == 0.0
    }
}

/// Operational status of a vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VehicleStatus {
    /// On route and moving
    Active,
    /// Parked and available for dispatch
    Idle,
    /// Moving but behind schedule
    Delayed,
    /// Stopped with an open incident
    Alert,
}

impl VehicleStatus {
    pub const ALL: [VehicleStatus; 4] = [
        VehicleStatus::Active,
        VehicleStatus::Idle,
        VehicleStatus::Delayed,
        VehicleStatus::Alert,
    ];

    /// Idle and alert vehicles hold their position
    pub fn is_motion_eligible(&self) -> bool {
        !matches!(self, VehicleStatus::Idle | VehicleStatus::Alert)
    }

    /// Counted towards the alert KPI
    pub fn needs_attention(&self) -> bool {
        matches!(self, VehicleStatus::Alert | VehicleStatus::Delayed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleStatus::Active => "active",
            VehicleStatus::Idle => "idle",
            VehicleStatus::Delayed => "delayed",
            VehicleStatus::Alert => "alert",
        }
    }

    /// Label shown on the fleet panel
    pub fn display_label(&self) -> &'static str {
        match self {
            VehicleStatus::Active => "On Route",
            VehicleStatus::Idle => "Available",
            VehicleStatus::Delayed => "Delayed",
            VehicleStatus::Alert => "Alert",
        }
    }

    /// Marker color as `#rrggbb`
    pub fn color_hex(&self) -> &'static str {
        match self {
            VehicleStatus::Active => "#22c55e",
            VehicleStatus::Idle => "#6b7280",
            VehicleStatus::Delayed => "#f59e0b",
            VehicleStatus::Alert => "#ef4444",
        }
    }
}

impl fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(VehicleStatus::Active),
            "idle" => Ok(VehicleStatus::Idle),
            "delayed" => Ok(VehicleStatus::Delayed),
            "alert" => Ok(VehicleStatus::Alert),
            other => bail!("unknown vehicle status '{}'", other),
        }
    }
}

/// Estimated time of arrival as shown on the fleet panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eta {
    /// Vehicle is not on a job
    None,
    /// Vehicle is stopped with an incident
    Unknown,
    Minutes(u32),
}

impl fmt::Display for Eta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Eta::None => f.write_str("-"),
            Eta::Unknown => f.write_str("!"),
            Eta::Minutes(m) => write!(f, "{}m", m),
        }
    }
}
