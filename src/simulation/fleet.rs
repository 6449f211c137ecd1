//! Fleet state container that ties the simulation together
//!
//! The vehicle set is replaced as a whole on every tick by [`advance_fleet`].
//! Status changes from outside are queued and applied at the start of the next
//! tick so the fleet has a single writer.

use anyhow::{bail, Result};
use log::{debug, info, warn};
use std::collections::VecDeque;

use super::orders::{check_order_links, seed_orders, Order, OrderStats};
use super::seed::{seed_fleet, validate_fleet};
use super::types::{Position, VehicleId, VehicleStatus, DEPOT_POSITION};
use super::vehicle::SimVehicle;

/// Advance every vehicle by `delta_secs`
///
/// Pure: vehicles don't interact, so each one is stepped on its own.
pub fn advance_fleet(vehicles: &[SimVehicle], delta_secs: f32) -> Vec<SimVehicle> {
    vehicles.iter().map(|v| v.advanced(delta_secs)).collect()
}

/// A pending status change for one vehicle
#[derive(Debug, Clone, PartialEq)]
pub struct StatusChange {
    pub vehicle: VehicleId,
    pub status: VehicleStatus,
}

/// Fleet KPIs shown in the dashboard header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FleetStats {
    pub total: usize,
    /// Vehicles with status `active`
    pub active: usize,
    pub delayed: usize,
    pub alert: usize,
    pub idle: usize,
    /// Vehicles that are `alert` or `delayed`
    pub alerts: usize,
    /// Share of active vehicles, rounded to a whole percent
    pub utilization_pct: u32,
}

/// The fleet being simulated
#[derive(Debug, Clone)]
pub struct SimFleet {
    vehicles: Vec<SimVehicle>,

    /// Status changes waiting for the next tick
    pending: VecDeque<StatusChange>,

    /// Orders linked to the fleet's vehicles
    orders: Vec<Order>,

    /// Vehicle highlighted by the renderer
    selected: Option<VehicleId>,

    /// Simulation time in seconds
    pub time: f32,
}

impl SimFleet {
    /// Build a fleet from a validated vehicle set
    pub fn new(vehicles: Vec<SimVehicle>) -> Result<Self> {
        let vehicles = validate_fleet(vehicles)?;
        info!("Fleet ready with {} vehicles", vehicles.len());
        Ok(Self {
            vehicles,
            pending: VecDeque::new(),
            orders: Vec::new(),
            selected: None,
            time: 0.0,
        })
    }

    /// Build the fleet and its orders from the built-in seed lists
    pub fn from_seed() -> Result<Self> {
        Self::new(seed_fleet()?)?.with_orders(seed_orders()?)
    }

    /// Attach orders, checking that each assigned vehicle is in the fleet
    pub fn with_orders(mut self, orders: Vec<Order>) -> Result<Self> {
        check_order_links(&orders, &self.vehicle_ids())?;
        self.orders = orders;
        Ok(self)
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Orders assigned to one vehicle
    pub fn orders_for<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Order> + 'a {
        self.orders
            .iter()
            .filter(move |o| o.vehicle.as_ref().is_some_and(|v| v.as_str() == id))
    }

    pub fn order_stats(&self) -> OrderStats {
        OrderStats::from_orders(&self.orders)
    }

    pub fn vehicles(&self) -> &[SimVehicle] {
        &self.vehicles
    }

    pub fn vehicle(&self, id: &str) -> Option<&SimVehicle> {
        self.vehicles.iter().find(|v| v.id.as_str() == id)
    }

    pub fn vehicle_ids(&self) -> Vec<VehicleId> {
        self.vehicles.iter().map(|v| v.id.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    /// Advance the fleet by one frame
    pub fn tick(&mut self, delta_secs: f32) {
        self.apply_pending();
        self.vehicles = advance_fleet(&self.vehicles, delta_secs);
        if delta_secs.is_finite() && delta_secs > 0.0 {
            self.time += delta_secs;
        }
    }

    /// Queue a status change to apply at the start of the next tick
    pub fn queue_status_change(&mut self, vehicle: impl Into<VehicleId>, status: VehicleStatus) {
        self.pending.push_back(StatusChange {
            vehicle: vehicle.into(),
            status,
        });
    }

    pub fn pending_changes(&self) -> usize {
        self.pending.len()
    }

    fn apply_pending(&mut self) {
        while let Some(change) = self.pending.pop_front() {
            match self.vehicles.iter_mut().find(|v| v.id == change.vehicle) {
                Some(vehicle) => {
                    if vehicle.status != change.status {
                        debug!(
                            "Vehicle {} status {} -> {}",
                            vehicle.id, vehicle.status, change.status
                        );
                    }
                    vehicle.set_status(change.status);
                }
                None => warn!("Dropping status change for unknown vehicle {}", change.vehicle),
            }
        }
    }

    pub fn selected(&self) -> Option<&SimVehicle> {
        let id = self.selected.as_ref()?;
        self.vehicles.iter().find(|v| &v.id == id)
    }

    /// Select a vehicle by id, or clear the selection with `None`
    pub fn select(&mut self, id: Option<&str>) -> Result<()> {
        match id {
            Some(id) => {
                if self.vehicle(id).is_none() {
                    bail!("no vehicle with id {}", id);
                }
                self.selected = Some(VehicleId::new(id));
            }
            None => self.selected = None,
        }
        Ok(())
    }

    /// Select a vehicle, or clear the selection if it is already selected
    ///
    /// Returns the vehicle that is selected afterwards.
    pub fn toggle_selection(&mut self, id: &str) -> Result<Option<&SimVehicle>> {
        if self.selected.as_ref().is_some_and(|selected| selected.as_str() == id) {
            self.selected = None;
            return Ok(None);
        }
        self.select(Some(id))?;
        Ok(self.selected())
    }

    /// Closest vehicle to `at` within `max_distance` plane units
    pub fn nearest_vehicle(&self, at: Position, max_distance: f32) -> Option<&SimVehicle> {
        self.vehicles
            .iter()
            .map(|v| (v, v.position.distance(&at)))
            .filter(|&(_, distance)| distance <= max_distance)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(v, _)| v)
    }

    /// Move the selection to the next vehicle in seed order, wrapping around
    pub fn select_next(&mut self) -> Option<&SimVehicle> {
        if self.vehicles.is_empty() {
            return None;
        }
        let next = match &self.selected {
            Some(id) => self
                .vehicles
                .iter()
                .position(|v| &v.id == id)
                .map_or(0, |i| (i + 1) % self.vehicles.len()),
            None => 0,
        };
        self.selected = Some(self.vehicles[next].id.clone());
        self.vehicles.get(next)
    }

    pub fn stats(&self) -> FleetStats {
        let total = self.vehicles.len();
        let count = |status: VehicleStatus| {
            self.vehicles.iter().filter(|v| v.status == status).count()
        };
        let active = count(VehicleStatus::Active);
        let delayed = count(VehicleStatus::Delayed);
        let alert = count(VehicleStatus::Alert);
        let idle = count(VehicleStatus::Idle);
        let utilization_pct = if total > 0 {
            (active as f32 / total as f32 * 100.0).round() as u32
        } else {
            0
        };

        FleetStats {
            total,
            active,
            delayed,
            alert,
            idle,
            alerts: delayed + alert,
            utilization_pct,
        }
    }

    /// Print a summary of the fleet state
    pub fn print_summary(&self) {
        let stats = self.stats();
        println!("=== Dispatch Fleet Summary ===");
        println!("Time: {:.2}s", self.time);
        println!(
            "Active: {} / {} | Utilization: {}% | Alerts: {}",
            stats.active, stats.total, stats.utilization_pct, stats.alerts
        );
        println!(
            "Fleet: {} active, {} delayed, {} alert, {} idle",
            stats.active, stats.delayed, stats.alert, stats.idle
        );
        println!();

        println!("--- Vehicles ---");
        for vehicle in &self.vehicles {
            let marker = if self.selected.as_ref() == Some(&vehicle.id) {
                '*'
            } else {
                ' '
            };
            println!(
                "{}{} {:<10} {:<9} at ({:5.1}, {:5.1}) v ({:+.2}, {:+.2}) {}km/h orders {} eta {}",
                marker,
                vehicle.label,
                vehicle.driver,
                vehicle.status.display_label(),
                vehicle.position.x,
                vehicle.position.y,
                vehicle.velocity.dx,
                vehicle.velocity.dy,
                vehicle.speed,
                vehicle.orders,
                vehicle.eta()
            );
        }

        if !self.orders.is_empty() {
            let orders = self.order_stats();
            println!();
            println!(
                "--- Orders ({}: {} pending, {} in transit, {} overdue, {} delivered) ---",
                orders.total, orders.pending, orders.in_transit, orders.overdue, orders.delivered
            );
            for order in &self.orders {
                let vehicle = order.vehicle.as_ref().map_or("-", |v| v.as_str());
                println!(
                    "  {} {:<10} {:<8} {:<4} {} {:4.1}km {}",
                    order.id,
                    order.status.display_label(),
                    order.priority,
                    vehicle,
                    order.window,
                    order.distance_km,
                    order.destination
                );
            }
        }
    }

    /// Render the plane as a character grid
    ///
    /// Vehicles are drawn with the last digit of their label, routes with `.`
    /// and the depot with `H`.
    pub fn render_map(&self, width: usize, height: usize) -> Vec<String> {
        let width = width.max(2);
        let height = height.max(2);
        let mut grid = vec![vec![' '; width]; height];

        let to_grid = |x: f32, y: f32| -> (usize, usize) {
            let col = (x / 100.0 * (width - 1) as f32).round().clamp(0.0, (width - 1) as f32);
            let row = (y / 100.0 * (height - 1) as f32).round().clamp(0.0, (height - 1) as f32);
            (row as usize, col as usize)
        };

        for vehicle in &self.vehicles {
            for point in &vehicle.route {
                let (row, col) = to_grid(point.x, point.y);
                grid[row][col] = '.';
            }
        }

        let (row, col) = to_grid(DEPOT_POSITION.x, DEPOT_POSITION.y);
        grid[row][col] = 'H';

        for vehicle in &self.vehicles {
            let (row, col) = to_grid(vehicle.position.x, vehicle.position.y);
            grid[row][col] = vehicle.label.chars().last().unwrap_or('V');
        }

        grid.into_iter().map(|row| row.into_iter().collect()).collect()
    }

    /// Draw a visual map of the fleet in the terminal
    pub fn draw_map(&self) {
        const MAP_WIDTH: usize = 60;
        const MAP_HEIGHT: usize = 24;

        println!("\n=== Dispatch Map ===");
        println!("Legend: digit=Vehicle, H=Depot, .=Route waypoint");
        println!("+{}+", "-".repeat(MAP_WIDTH));
        for line in self.render_map(MAP_WIDTH, MAP_HEIGHT) {
            println!("|{}|", line);
        }
        println!("+{}+", "-".repeat(MAP_WIDTH));
        println!();
    }
}
