//! Telemetry feed tests

use rand::rngs::StdRng;
use rand::SeedableRng;

use dispatch_sim::simulation::{
    TelemetryFeed, TelemetryKind, VehicleId, TELEMETRY_CAPACITY, TELEMETRY_EVENTS,
    TELEMETRY_FIRST_ID, TELEMETRY_INITIAL_ENTRIES, TELEMETRY_INTERVAL_SECS,
};

fn vehicle_ids() -> Vec<VehicleId> {
    ["V-01", "V-02", "V-03", "V-04", "V-05", "V-06"]
        .into_iter()
        .map(VehicleId::from)
        .collect()
}

#[test]
fn test_initial_feed_is_newest_first() {
    let feed = TelemetryFeed::new(vehicle_ids(), Some(1));

    assert_eq!(feed.len(), TELEMETRY_INITIAL_ENTRIES);
    let ids: Vec<u64> = feed.entries().map(|e| e.id).collect();
    let last = TELEMETRY_FIRST_ID + TELEMETRY_INITIAL_ENTRIES as u64;
    let expected: Vec<u64> = (TELEMETRY_FIRST_ID..last).rev().collect();
    assert_eq!(ids, expected);
}

#[test]
fn test_same_seed_same_feed() {
    let mut a = TelemetryFeed::new(vehicle_ids(), Some(99));
    let mut b = TelemetryFeed::new(vehicle_ids(), Some(99));

    a.tick(10.0, 10.0);
    b.tick(10.0, 10.0);

    assert!(a.entries().eq(b.entries()));
}

#[test]
fn test_injected_rng_matches_seeded_feed() {
    let injected = TelemetryFeed::with_rng(vehicle_ids(), StdRng::seed_from_u64(7));
    let seeded = TelemetryFeed::new(vehicle_ids(), Some(7));

    assert!(injected.entries().eq(seeded.entries()));
}

#[test]
fn test_entries_generated_on_cadence() {
    let mut feed = TelemetryFeed::new(vehicle_ids(), Some(3));

    assert_eq!(feed.tick(1.0, 1.0), 0);
    assert_eq!(feed.tick(0.9, 1.9), 1);

    let latest = feed.latest().unwrap();
    assert_eq!(latest.id, TELEMETRY_FIRST_ID + TELEMETRY_INITIAL_ENTRIES as u64);
    assert_eq!(latest.timestamp, 1.9);
    assert_eq!(feed.len(), TELEMETRY_INITIAL_ENTRIES + 1);
}

#[test]
fn test_feed_is_capped() {
    let mut feed = TelemetryFeed::new(vehicle_ids(), Some(5));

    // 100s covers 55 intervals, only the newest 25 are kept
    let generated = feed.tick(100.0, 100.0);

    assert_eq!(generated, TELEMETRY_CAPACITY);
    assert_eq!(feed.len(), TELEMETRY_CAPACITY);
    let newest = TELEMETRY_FIRST_ID + TELEMETRY_INITIAL_ENTRIES as u64 + 54;
    assert_eq!(feed.latest().unwrap().id, newest);
    let ids: Vec<u64> = feed.entries().map(|e| e.id).collect();
    let expected: Vec<u64> = (newest - 24..=newest).rev().collect();
    assert_eq!(ids, expected);
}

#[test]
fn test_huge_delta_returns_promptly() {
    let mut feed = TelemetryFeed::new(vehicle_ids(), Some(1));

    let generated = feed.tick(1.0e8, 1.0e8);

    assert_eq!(generated, TELEMETRY_CAPACITY);
    assert_eq!(feed.len(), TELEMETRY_CAPACITY);
    assert!(feed.latest().unwrap().id > TELEMETRY_FIRST_ID + 1_000_000);

    // The remainder is below one interval, so the cadence carries on
    let next = feed.tick(TELEMETRY_INTERVAL_SECS, 1.0e8);
    assert!((1..=2).contains(&next), "next = {}", next);
    assert_eq!(feed.tick(f32::MAX, f32::MAX), TELEMETRY_CAPACITY);
}

#[test]
fn test_invalid_delta_generates_nothing() {
    let mut feed = TelemetryFeed::new(vehicle_ids(), Some(5));

    assert_eq!(feed.tick(0.0, 0.0), 0);
    assert_eq!(feed.tick(-5.0, 0.0), 0);
    assert_eq!(feed.tick(f32::NAN, 0.0), 0);
    assert_eq!(feed.len(), TELEMETRY_INITIAL_ENTRIES);
}

#[test]
fn test_entry_values_in_range() {
    let ids = vehicle_ids();
    let mut feed = TelemetryFeed::new(ids.clone(), Some(11));
    feed.tick(40.0, 40.0);

    for entry in feed.entries() {
        assert!(ids.contains(&entry.vehicle_id));
        assert!(TELEMETRY_EVENTS.contains(&entry.event));
        assert_eq!(entry.kind, TelemetryKind::classify(entry.event));
        assert!((40.66..=40.76).contains(&entry.lat), "lat = {}", entry.lat);
        assert!((-74.05..=-73.95).contains(&entry.lng), "lng = {}", entry.lng);
        assert!(entry.speed <= 65);
        assert!(entry.heading <= 360);
    }
}

#[test]
fn test_event_classification() {
    assert_eq!(TelemetryKind::classify("Low battery warning"), TelemetryKind::Alert);
    assert_eq!(TelemetryKind::classify("Order delivered"), TelemetryKind::Event);
    assert_eq!(TelemetryKind::classify("Route waypoint reached"), TelemetryKind::Event);
    assert_eq!(TelemetryKind::classify("GPS sync"), TelemetryKind::Location);
    assert_eq!(TelemetryKind::classify("Traffic reroute"), TelemetryKind::Location);
}

#[test]
fn test_no_vehicles_no_entries() {
    let mut feed = TelemetryFeed::new(Vec::new(), Some(1));

    assert!(feed.is_empty());
    assert_eq!(feed.tick(10.0, 10.0), 0);
    assert!(feed.latest().is_none());
}
