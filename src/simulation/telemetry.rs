//! Synthetic telemetry stream for the dashboard
//!
//! Entries are generated on a fixed cadence from an injectable random source.
//! The feed only reads vehicle ids; it never touches the fleet.

use log::trace;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

use super::types::VehicleId;

/// Simulated seconds between generated entries
pub const TELEMETRY_INTERVAL_SECS: f32 = 1.8;

/// Entries kept in the feed, newest first
pub const TELEMETRY_CAPACITY: usize = 25;

/// Entries the feed starts with
pub const TELEMETRY_INITIAL_ENTRIES: usize = 12;

/// First entry id
pub const TELEMETRY_FIRST_ID: u64 = 100;

pub const TELEMETRY_EVENTS: [&str; 8] = [
    "GPS sync",
    "Route waypoint reached",
    "Speed variance detected",
    "Geofence check",
    "Order delivered",
    "Traffic reroute",
    "Low battery warning",
    "Connection restored",
];

const BASE_LAT: f64 = 40.71;
const BASE_LNG: f64 = -74.00;
const COORD_SPREAD: f64 = 0.1;
const MAX_SPEED_KMH: f32 = 65.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TelemetryKind {
    Location,
    Event,
    Alert,
}

impl TelemetryKind {
    /// Classify an event by its text
    pub fn classify(event: &str) -> Self {
        if event.contains("warning") || event.contains("alert") {
            TelemetryKind::Alert
        } else if event.contains("delivered") || event.contains("waypoint") {
            TelemetryKind::Event
        } else {
            TelemetryKind::Location
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TelemetryEntry {
    pub id: u64,
    pub vehicle_id: VehicleId,
    pub lat: f64,
    pub lng: f64,
    /// km/h
    pub speed: u32,
    /// Degrees
    pub heading: u32,
    pub event: &'static str,
    /// Simulation time the entry was generated at, in seconds
    pub timestamp: f32,
    pub kind: TelemetryKind,
}

impl TelemetryEntry {
    /// One-line rendering for console output
    pub fn summary(&self) -> String {
        format!(
            "[{:7.1}s] {} {:<24} {:.4}N, {:.4}W {}km/h {}deg",
            self.timestamp,
            self.vehicle_id,
            self.event,
            self.lat,
            self.lng.abs(),
            self.speed,
            self.heading
        )
    }
}

pub struct TelemetryFeed<R: Rng = StdRng> {
    rng: R,
    vehicle_ids: Vec<VehicleId>,
    entries: VecDeque<TelemetryEntry>,
    next_id: u64,
    since_last: f32,
}

impl TelemetryFeed<StdRng> {
    /// Create a feed, seeded for reproducible runs when `seed` is given
    pub fn new(vehicle_ids: Vec<VehicleId>, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        Self::with_rng(vehicle_ids, rng)
    }
}

impl<R: Rng> TelemetryFeed<R> {
    /// Create a feed drawing from `rng`, pre-filled with the initial entries
    pub fn with_rng(vehicle_ids: Vec<VehicleId>, rng: R) -> Self {
        let mut feed = Self {
            rng,
            vehicle_ids,
            entries: VecDeque::with_capacity(TELEMETRY_CAPACITY),
            next_id: TELEMETRY_FIRST_ID,
            since_last: 0.0,
        };
        for _ in 0..TELEMETRY_INITIAL_ENTRIES {
            feed.emit(0.0);
        }
        feed
    }

    /// Entries, newest first
    pub fn entries(&self) -> impl Iterator<Item = &TelemetryEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&TelemetryEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Advance the feed clock, returning how many entries were generated
    ///
    /// At most `TELEMETRY_CAPACITY` entries are generated per call, however
    /// large the delta.
    pub fn tick(&mut self, delta_secs: f32, now: f32) -> usize {
        if !delta_secs.is_finite() || delta_secs <= 0.0 {
            return 0;
        }
        self.since_last += delta_secs;

        let due = (self.since_last / TELEMETRY_INTERVAL_SECS).floor();
        if due < 1.0 {
            return 0;
        }
        self.since_last %= TELEMETRY_INTERVAL_SECS;
        if self.vehicle_ids.is_empty() {
            return 0;
        }

        // Only the newest `TELEMETRY_CAPACITY` entries would survive, so older
        // ones are skipped but keep their ids
        let due = due as u64;
        let kept = due.min(TELEMETRY_CAPACITY as u64);
        self.next_id = self.next_id.saturating_add(due - kept);

        let mut generated = 0;
        for _ in 0..kept {
            if self.emit(now) {
                generated += 1;
            }
        }
        generated
    }

    fn emit(&mut self, now: f32) -> bool {
        let Some(entry) = self.generate(now) else {
            return false;
        };
        trace!("Telemetry {}", entry.summary());
        self.entries.push_front(entry);
        self.entries.truncate(TELEMETRY_CAPACITY);
        true
    }

    fn generate(&mut self, now: f32) -> Option<TelemetryEntry> {
        let vehicle_id = self.vehicle_ids.choose(&mut self.rng)?.clone();
        let event = *TELEMETRY_EVENTS.choose(&mut self.rng)?;

        let lat = BASE_LAT + (self.rng.random::<f64>() - 0.5) * COORD_SPREAD;
        let lng = BASE_LNG + (self.rng.random::<f64>() - 0.5) * COORD_SPREAD;
        let speed = (self.rng.random::<f32>() * MAX_SPEED_KMH).round() as u32;
        let heading = (self.rng.random::<f32>() * 360.0).round() as u32;

        let id = self.next_id;
        self.next_id = self.next_id.saturating_add(1);

        Some(TelemetryEntry {
            id,
            vehicle_id,
            lat,
            lng,
            speed,
            heading,
            event,
            timestamp: now,
            kind: TelemetryKind::classify(event),
        })
    }
}
