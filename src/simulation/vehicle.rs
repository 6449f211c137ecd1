//! Vehicle movement logic for the dispatch simulation
//!
//! Standalone implementation that doesn't depend on Bevy.

use super::types::{
    Eta, Position, Velocity, VehicleId, VehicleStatus, PLANE_MAX, PLANE_MIN, SPEED_SCALE,
};

/// A delivery vehicle in the dispatch simulation
#[derive(Debug, Clone, PartialEq)]
pub struct SimVehicle {
    pub id: VehicleId,
    pub label: String,
    pub position: Position,
    pub velocity: Velocity,
    pub status: VehicleStatus,
    /// Marker color as a hex string, keyed by status
    pub color: String,
    /// Planned route polyline, empty when the vehicle has none
    pub route: Vec<Position>,
    pub driver: String,
    /// Speed shown on the fleet panel in km/h
    pub speed: u32,
    /// Orders currently assigned
    pub orders: u32,
}

impl SimVehicle {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: VehicleId,
        label: impl Into<String>,
        position: Position,
        velocity: Velocity,
        status: VehicleStatus,
        route: Vec<Position>,
        driver: impl Into<String>,
        speed: u32,
        orders: u32,
    ) -> Self {
        Self {
            id,
            label: label.into(),
            position,
            velocity,
            status,
            color: status.color_hex().to_string(),
            route,
            driver: driver.into(),
            speed,
            orders,
        }
    }

    pub fn is_motion_eligible(&self) -> bool {
        self.status.is_motion_eligible()
    }

    /// Return this vehicle advanced by `delta_secs`
    ///
    /// Idle and alert vehicles come back unchanged. Each axis reflects
    /// independently when the provisional coordinate leaves the drivable area.
    pub fn advanced(&self, delta_secs: f32) -> SimVehicle {
        if !self.is_motion_eligible() || !delta_secs.is_finite() || delta_secs <= 0.0 {
            return self.clone();
        }

        let step = delta_secs * SPEED_SCALE;
        let (x, dx) = reflect_axis(self.position.x + self.velocity.dx * step, self.velocity.dx);
        let (y, dy) = reflect_axis(self.position.y + self.velocity.dy * step, self.velocity.dy);

        SimVehicle {
            position: Position::new(x, y),
            velocity: Velocity::new(dx, dy),
            ..self.clone()
        }
    }

    /// Change status and recolor the marker to match
    pub fn set_status(&mut self, status: VehicleStatus) {
        self.status = status;
        self.color = status.color_hex().to_string();
    }

    /// Fleet panel ETA, `14 + 3n` minutes for a vehicle numbered `n`
    ///
    /// Ids without a numeric suffix, or with one too large for the rule, have
    /// no estimate.
    pub fn eta(&self) -> Eta {
        match self.status {
            VehicleStatus::Idle => Eta::None,
            VehicleStatus::Alert => Eta::Unknown,
            VehicleStatus::Active | VehicleStatus::Delayed => self
                .id
                .number()
                .and_then(|n| n.checked_mul(3))
                .and_then(|m| m.checked_add(14))
                .map_or(Eta::Unknown, Eta::Minutes),
        }
    }
}

/// Reflect one axis off the plane edges
///
/// Returns the (possibly clamped) coordinate and velocity component.
pub fn reflect_axis(provisional: f32, velocity: f32) -> (f32, f32) {
    if provisional < PLANE_MIN || provisional > PLANE_MAX {
        (provisional.clamp(PLANE_MIN, PLANE_MAX), -velocity)
    } else {
        (provisional, velocity)
    }
}
