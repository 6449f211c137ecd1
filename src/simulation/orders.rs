//! Delivery orders queued against the fleet
//!
//! Orders are a fixed list loaded with the seed fleet. Each one may be linked
//! to a vehicle; the link is checked when the orders are attached to a fleet.

use anyhow::{bail, Context, Error, Result};
use log::debug;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use super::types::VehicleId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    Pending,
    InTransit,
    Delivered,
    Overdue,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::InTransit,
        OrderStatus::Delivered,
        OrderStatus::Overdue,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::InTransit => "in_transit",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Overdue => "overdue",
        }
    }

    pub fn display_label(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::InTransit => "In Transit",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Overdue => "Overdue",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "in_transit" => Ok(OrderStatus::InTransit),
            "delivered" => Ok(OrderStatus::Delivered),
            "overdue" => Ok(OrderStatus::Overdue),
            other => bail!("unknown order status '{}'", other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OrderPriority {
    Standard,
    Express,
    Critical,
}

impl OrderPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderPriority::Standard => "standard",
            OrderPriority::Express => "express",
            OrderPriority::Critical => "critical",
        }
    }
}

impl fmt::Display for OrderPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderPriority {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(OrderPriority::Standard),
            "express" => Ok(OrderPriority::Express),
            "critical" => Ok(OrderPriority::Critical),
            other => bail!("unknown order priority '{}'", other),
        }
    }
}

/// Delivery window as minutes after midnight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: u16,
    pub end: u16,
}

impl TimeWindow {
    /// Parse a window from two `HH:MM` clock times
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        let window = Self {
            start: parse_clock(start)?,
            end: parse_clock(end)?,
        };
        if window.end <= window.start {
            bail!("time window {} ends before it starts", window);
        }
        Ok(window)
    }

    pub fn duration_minutes(&self) -> u16 {
        self.end - self.start
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}-{:02}:{:02}",
            self.start / 60,
            self.start % 60,
            self.end / 60,
            self.end % 60
        )
    }
}

fn parse_clock(time: &str) -> Result<u16> {
    let (hours, minutes) = time
        .split_once(':')
        .with_context(|| format!("expected HH:MM, got '{}'", time))?;
    let hours: u16 = hours.parse().with_context(|| format!("bad hour in '{}'", time))?;
    let minutes: u16 = minutes.parse().with_context(|| format!("bad minute in '{}'", time))?;
    if hours >= 24 || minutes >= 60 {
        bail!("clock time '{}' out of range", time);
    }
    Ok(hours * 60 + minutes)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: String,
    pub destination: String,
    /// Assigned vehicle, `None` while unassigned
    pub vehicle: Option<VehicleId>,
    pub window: TimeWindow,
    pub status: OrderStatus,
    pub priority: OrderPriority,
    pub distance_km: f32,
}

/// One raw entry of the order seed list
#[derive(Debug, Clone, Copy)]
pub struct SeedOrder {
    pub id: &'static str,
    pub destination: &'static str,
    pub vehicle: Option<&'static str>,
    pub window_start: &'static str,
    pub window_end: &'static str,
    pub status: &'static str,
    pub priority: &'static str,
    pub distance_km: f32,
}

pub const SEED_ORDERS: [SeedOrder; 7] = [
    SeedOrder {
        id: "ORD-8821",
        destination: "Industrial Area, Nairobi",
        vehicle: Some("V-01"),
        window_start: "09:00",
        window_end: "10:30",
        status: "in_transit",
        priority: "express",
        distance_km: 4.2,
    },
    SeedOrder {
        id: "ORD-8822",
        destination: "Upper Hill, Nairobi",
        vehicle: Some("V-02"),
        window_start: "09:15",
        window_end: "11:00",
        status: "in_transit",
        priority: "critical",
        distance_km: 2.8,
    },
    SeedOrder {
        id: "ORD-8823",
        destination: "Thika Road Mall Hub (TRM)",
        vehicle: Some("V-03"),
        window_start: "08:30",
        window_end: "10:00",
        status: "overdue",
        priority: "express",
        distance_km: 7.1,
    },
    SeedOrder {
        id: "ORD-8824",
        destination: "Westlands, Nairobi",
        vehicle: Some("V-04"),
        window_start: "10:00",
        window_end: "12:00",
        status: "in_transit",
        priority: "standard",
        distance_km: 3.5,
    },
    SeedOrder {
        id: "ORD-8825",
        destination: "JKIA Cargo Terminal, Nairobi",
        vehicle: Some("V-05"),
        window_start: "11:00",
        window_end: "13:00",
        status: "pending",
        priority: "critical",
        distance_km: 5.9,
    },
    SeedOrder {
        id: "ORD-8826",
        destination: "Ruiru Distribution Depot",
        vehicle: None,
        window_start: "11:30",
        window_end: "14:00",
        status: "pending",
        priority: "standard",
        distance_km: 3.1,
    },
    SeedOrder {
        id: "ORD-8820",
        destination: "Mombasa Road Logistics Park",
        vehicle: Some("V-02"),
        window_start: "07:00",
        window_end: "09:00",
        status: "delivered",
        priority: "standard",
        distance_km: 6.4,
    },
];

/// Counts by order status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OrderStats {
    pub total: usize,
    pub pending: usize,
    pub in_transit: usize,
    pub delivered: usize,
    pub overdue: usize,
}

impl OrderStats {
    pub fn from_orders(orders: &[Order]) -> Self {
        let count = |status: OrderStatus| orders.iter().filter(|o| o.status == status).count();
        Self {
            total: orders.len(),
            pending: count(OrderStatus::Pending),
            in_transit: count(OrderStatus::InTransit),
            delivered: count(OrderStatus::Delivered),
            overdue: count(OrderStatus::Overdue),
        }
    }
}

/// Build the default order list
pub fn seed_orders() -> Result<Vec<Order>> {
    load_orders(&SEED_ORDERS)
}

/// Turn raw seed entries into orders
///
/// Rejects duplicate ids, unknown statuses or priorities, malformed windows,
/// bad distances and in-transit orders with no vehicle. Vehicle links are
/// checked separately by [`check_order_links`].
pub fn load_orders(seeds: &[SeedOrder]) -> Result<Vec<Order>> {
    let mut seen = HashSet::new();
    let mut orders = Vec::with_capacity(seeds.len());

    for seed in seeds {
        let order = parse_order(seed).with_context(|| format!("invalid order {}", seed.id))?;
        if !seen.insert(seed.id) {
            bail!("duplicate order id {}", seed.id);
        }
        orders.push(order);
    }

    debug!("Loaded {} orders", orders.len());
    Ok(orders)
}

fn parse_order(seed: &SeedOrder) -> Result<Order> {
    let status: OrderStatus = seed.status.parse()?;
    let priority: OrderPriority = seed.priority.parse()?;
    let window = TimeWindow::parse(seed.window_start, seed.window_end)?;

    if !seed.distance_km.is_finite() || seed.distance_km < 0.0 {
        bail!("distance must be a non-negative number, got {}", seed.distance_km);
    }
    if status == OrderStatus::InTransit && seed.vehicle.is_none() {
        bail!("order is in transit but has no vehicle");
    }

    Ok(Order {
        id: seed.id.to_string(),
        destination: seed.destination.to_string(),
        vehicle: seed.vehicle.map(VehicleId::from),
        window,
        status,
        priority,
        distance_km: seed.distance_km,
    })
}

/// Check that every assigned order points at a known vehicle
pub fn check_order_links(orders: &[Order], vehicles: &[VehicleId]) -> Result<()> {
    for order in orders {
        if let Some(vehicle) = &order.vehicle {
            if !vehicles.contains(vehicle) {
                bail!("order {} is assigned to unknown vehicle {}", order.id, vehicle);
            }
        }
    }
    Ok(())
}
