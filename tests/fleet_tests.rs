//! Fleet container validation tests
//!
//! Seed loading, status changes, selection and KPIs.

use dispatch_sim::simulation::{
    load_seed, Eta, Position, SeedVehicle, SimFleet, SimVehicle, Velocity, VehicleId,
    VehicleStatus, SEED_ROUTES, SEED_VEHICLES,
};

fn seed(id: &'static str, x: f32, y: f32, dx: f32, dy: f32, status: &'static str) -> SeedVehicle {
    SeedVehicle {
        id,
        x,
        y,
        dx,
        dy,
        status,
        driver: "Test Driver",
        speed: 10,
        orders: 1,
    }
}

#[test]
fn test_seed_fleet_loads() {
    let fleet = SimFleet::from_seed().unwrap();

    assert_eq!(fleet.len(), 6);
    let ids: Vec<String> = fleet.vehicle_ids().iter().map(|id| id.to_string()).collect();
    assert_eq!(ids, vec!["V-01", "V-02", "V-03", "V-04", "V-05", "V-06"]);

    let v1 = fleet.vehicle("V-01").unwrap();
    assert_eq!(v1.position, Position::new(22.0, 35.0));
    assert_eq!(v1.velocity, Velocity::new(0.12, 0.08));
    assert_eq!(v1.driver, "M. Torres");
    assert_eq!(v1.speed, 42);
    assert_eq!(v1.orders, 4);
    assert_eq!(v1.route.len(), 6);
    assert_eq!(v1.route[0], Position::new(22.0, 35.0));

    assert_eq!(fleet.vehicle("V-04").unwrap().route.len(), 6);
    assert!(fleet.vehicle("V-05").unwrap().route.is_empty());
    assert!(fleet.vehicle("V-06").unwrap().route.is_empty());

    for v in fleet.vehicles() {
        assert_eq!(v.color, v.status.color_hex());
        assert!(v.position.in_bounds());
    }
    assert_eq!(fleet.time, 0.0);
}

#[test]
fn test_seed_statuses() {
    let fleet = SimFleet::from_seed().unwrap();
    let status = |id: &str| fleet.vehicle(id).unwrap().status;

    assert_eq!(status("V-01"), VehicleStatus::Active);
    assert_eq!(status("V-03"), VehicleStatus::Delayed);
    assert_eq!(status("V-05"), VehicleStatus::Alert);
    assert_eq!(status("V-06"), VehicleStatus::Idle);
}

#[test]
fn test_seed_fleet_kpis() {
    let stats = SimFleet::from_seed().unwrap().stats();

    assert_eq!(stats.total, 6);
    assert_eq!(stats.active, 3);
    assert_eq!(stats.delayed, 1);
    assert_eq!(stats.alert, 1);
    assert_eq!(stats.idle, 1);
    assert_eq!(stats.alerts, 2);
    assert_eq!(stats.utilization_pct, 50);
}

#[test]
fn test_status_breakdown_follows_changes() {
    let mut fleet = SimFleet::from_seed().unwrap();

    fleet.queue_status_change("V-03", VehicleStatus::Alert);
    fleet.queue_status_change("V-06", VehicleStatus::Active);
    fleet.tick(0.1);

    let stats = fleet.stats();
    assert_eq!(
        (stats.active, stats.delayed, stats.alert, stats.idle),
        (4, 0, 2, 0)
    );
    assert_eq!(stats.alerts, 2);
    assert_eq!(stats.utilization_pct, 67);
}

#[test]
fn test_empty_fleet_kpis() {
    let fleet = SimFleet::new(Vec::new()).unwrap();
    let stats = fleet.stats();

    assert!(fleet.is_empty());
    assert_eq!(stats.total, 0);
    assert_eq!(stats.utilization_pct, 0);
}

#[test]
fn test_unknown_status_rejected() {
    let seeds = [seed("V-01", 50.0, 50.0, 0.1, 0.1, "parked")];

    let err = load_seed(&seeds, &[]).unwrap_err();

    let message = format!("{:#}", err);
    assert!(message.contains("V-01"), "{}", message);
    assert!(message.contains("unknown vehicle status 'parked'"), "{}", message);
}

#[test]
fn test_duplicate_ids_rejected() {
    let seeds = [
        seed("V-01", 50.0, 50.0, 0.1, 0.1, "active"),
        seed("V-01", 60.0, 60.0, 0.1, 0.1, "idle"),
    ];

    let err = load_seed(&seeds, &[]).unwrap_err();
    assert!(err.to_string().contains("duplicate vehicle id V-01"));
}

#[test]
fn test_non_finite_kinematics_rejected() {
    assert!(load_seed(&[seed("V-01", f32::NAN, 50.0, 0.1, 0.1, "active")], &[]).is_err());
    assert!(load_seed(&[seed("V-01", 50.0, f32::INFINITY, 0.1, 0.1, "idle")], &[]).is_err());
    assert!(load_seed(&[seed("V-01", 50.0, 50.0, f32::NAN, 0.1, "active")], &[]).is_err());
}

#[test]
fn test_motion_eligible_vehicle_needs_velocity() {
    assert!(load_seed(&[seed("V-01", 50.0, 50.0, 0.0, 0.0, "active")], &[]).is_err());
    assert!(load_seed(&[seed("V-01", 50.0, 50.0, 0.0, 0.0, "delayed")], &[]).is_err());
    assert!(load_seed(&[seed("V-01", 50.0, 50.0, 0.0, 0.0, "idle")], &[]).is_ok());
    assert!(load_seed(&[seed("V-01", 50.0, 50.0, 0.0, 0.0, "alert")], &[]).is_ok());
    assert!(load_seed(&[seed("V-01", 50.0, 50.0, 0.0, 0.3, "active")], &[]).is_ok());
}

#[test]
fn test_out_of_range_seed_is_clamped() {
    let seeds = [seed("V-01", 120.0, -3.0, 0.1, 0.1, "active")];

    let vehicles = load_seed(&seeds, &[]).unwrap();

    assert_eq!(vehicles[0].position, Position::new(95.0, 5.0));
}

#[test]
fn test_new_fleet_validates_vehicles() {
    let v = SimVehicle::new(
        VehicleId::new("V-09"),
        "V-09",
        Position::new(50.0, 50.0),
        Velocity::new(0.0, 0.0),
        VehicleStatus::Active,
        Vec::new(),
        "Test Driver",
        0,
        0,
    );

    assert!(SimFleet::new(vec![v]).is_err());
}

#[test]
fn test_routes_attach_in_order() {
    let vehicles = load_seed(&SEED_VEHICLES, &SEED_ROUTES).unwrap();

    for (vehicle, route) in vehicles.iter().zip(SEED_ROUTES.iter()) {
        let expected: Vec<Position> = route.iter().map(|&(x, y)| Position::new(x, y)).collect();
        assert_eq!(vehicle.route, expected);
    }
}

#[test]
fn test_tick_moves_only_eligible_vehicles() {
    let mut fleet = SimFleet::from_seed().unwrap();
    let before = fleet.clone();

    fleet.tick(0.5);

    for (old, new) in before.vehicles().iter().zip(fleet.vehicles()) {
        if old.is_motion_eligible() {
            assert_ne!(old.position, new.position, "{} should move", old.id);
        } else {
            assert_eq!(old, new, "{} should be frozen", old.id);
        }
    }
    assert_eq!(fleet.time, 0.5);
}

#[test]
fn test_zero_delta_does_not_advance_time() {
    let mut fleet = SimFleet::from_seed().unwrap();
    fleet.tick(0.0);
    assert_eq!(fleet.time, 0.0);
}

#[test]
fn test_status_change_applies_on_next_tick() {
    let mut fleet = SimFleet::from_seed().unwrap();

    fleet.queue_status_change("V-06", VehicleStatus::Active);
    assert_eq!(fleet.pending_changes(), 1);
    assert_eq!(fleet.vehicle("V-06").unwrap().status, VehicleStatus::Idle);

    fleet.tick(1.0);

    let v6 = fleet.vehicle("V-06").unwrap();
    assert_eq!(fleet.pending_changes(), 0);
    assert_eq!(v6.status, VehicleStatus::Active);
    assert_eq!(v6.color, "#22c55e");
    // 15 + 0.10 * 8, 75 - 0.07 * 8
    assert!((v6.position.x - 15.8).abs() < 1e-4, "x = {}", v6.position.x);
    assert!((v6.position.y - 74.44).abs() < 1e-4, "y = {}", v6.position.y);
}

#[test]
fn test_status_change_freezes_vehicle() {
    let mut fleet = SimFleet::from_seed().unwrap();
    let start = fleet.vehicle("V-01").unwrap().position;

    fleet.queue_status_change("V-01", VehicleStatus::Idle);
    fleet.tick(1.0);
    fleet.tick(1.0);

    assert_eq!(fleet.vehicle("V-01").unwrap().position, start);
    assert_eq!(fleet.stats().active, 2);
}

#[test]
fn test_status_change_for_unknown_vehicle_is_dropped() {
    let mut fleet = SimFleet::from_seed().unwrap();

    fleet.queue_status_change("V-99", VehicleStatus::Alert);
    fleet.tick(0.1);

    assert_eq!(fleet.pending_changes(), 0);
    assert_eq!(fleet.len(), 6);
}

#[test]
fn test_selection() {
    let mut fleet = SimFleet::from_seed().unwrap();
    assert!(fleet.selected().is_none());

    fleet.select(Some("V-03")).unwrap();
    assert_eq!(fleet.selected().unwrap().id.as_str(), "V-03");

    assert!(fleet.select(Some("V-99")).is_err());
    assert_eq!(fleet.selected().unwrap().id.as_str(), "V-03");

    // Selection doesn't affect motion
    let before = fleet.vehicle("V-03").unwrap().advanced(0.5);
    fleet.tick(0.5);
    assert_eq!(fleet.vehicle("V-03").unwrap(), &before);

    fleet.select(None).unwrap();
    assert!(fleet.selected().is_none());
}

#[test]
fn test_toggle_selection_clears_selected_vehicle() {
    let mut fleet = SimFleet::from_seed().unwrap();

    let selected = fleet.toggle_selection("V-02").unwrap();
    assert_eq!(selected.unwrap().id.as_str(), "V-02");

    // Another vehicle moves the selection
    fleet.toggle_selection("V-04").unwrap();
    assert_eq!(fleet.selected().unwrap().id.as_str(), "V-04");

    // The selected vehicle again clears it
    assert!(fleet.toggle_selection("V-04").unwrap().is_none());
    assert!(fleet.selected().is_none());

    assert!(fleet.toggle_selection("V-99").is_err());
    assert!(fleet.selected().is_none());
}

#[test]
fn test_nearest_vehicle_within_radius() {
    let fleet = SimFleet::from_seed().unwrap();

    let hit = fleet.nearest_vehicle(Position::new(23.0, 36.0), 4.0).unwrap();
    assert_eq!(hit.id.as_str(), "V-01");

    assert!(fleet.nearest_vehicle(Position::new(50.0, 50.0), 4.0).is_none());
}

#[test]
fn test_select_next_cycles_in_seed_order() {
    let mut fleet = SimFleet::from_seed().unwrap();

    let mut seen = Vec::new();
    for _ in 0..7 {
        seen.push(fleet.select_next().unwrap().id.to_string());
    }

    assert_eq!(seen, vec!["V-01", "V-02", "V-03", "V-04", "V-05", "V-06", "V-01"]);
}

#[test]
fn test_eta() {
    let mut fleet = SimFleet::from_seed().unwrap();
    let eta = |fleet: &SimFleet, id: &str| fleet.vehicle(id).unwrap().eta();

    assert_eq!(eta(&fleet, "V-01"), Eta::Minutes(17));
    assert_eq!(eta(&fleet, "V-03"), Eta::Minutes(23));
    assert_eq!(eta(&fleet, "V-05"), Eta::Unknown);
    assert_eq!(eta(&fleet, "V-06"), Eta::None);
    assert_eq!(Eta::Minutes(17).to_string(), "17m");

    fleet.queue_status_change("V-06", VehicleStatus::Active);
    fleet.tick(0.1);
    assert_eq!(eta(&fleet, "V-06"), Eta::Minutes(32));
}

#[test]
fn test_eta_for_large_vehicle_numbers() {
    let vehicle = |id: &str| {
        SimVehicle::new(
            VehicleId::new(id),
            id,
            Position::new(50.0, 50.0),
            Velocity::new(0.1, 0.1),
            VehicleStatus::Active,
            Vec::new(),
            "Test Driver",
            30,
            1,
        )
    };

    assert_eq!(vehicle("V-2000000000").eta(), Eta::Unknown);
    assert_eq!(vehicle(&format!("V-{}", u32::MAX)).eta(), Eta::Unknown);
    // Largest number the rule still covers
    assert_eq!(vehicle("V-1431655760").eta(), Eta::Minutes(4294967294));
    assert_eq!(vehicle("Truck").eta(), Eta::Unknown);

    let fleet = SimFleet::new(vec![vehicle("V-2000000000")]).unwrap();
    assert_eq!(fleet.vehicle("V-2000000000").unwrap().eta().to_string(), "!");
}

#[test]
fn test_status_strings() {
    for status in VehicleStatus::ALL {
        assert_eq!(status.as_str().parse::<VehicleStatus>().unwrap(), status);
    }
    assert_eq!(VehicleStatus::Active.display_label(), "On Route");
    assert_eq!(VehicleStatus::Idle.display_label(), "Available");
    assert!("Active".parse::<VehicleStatus>().is_err());
}

#[test]
fn test_render_map() {
    let fleet = SimFleet::from_seed().unwrap();

    let lines = fleet.render_map(60, 24);

    assert_eq!(lines.len(), 24);
    assert!(lines.iter().all(|line| line.chars().count() == 60));
    let map = lines.concat();
    assert!(map.contains('H'));
    assert!(map.contains('.'));
    for digit in ['1', '2', '3', '4', '5', '6'] {
        assert!(map.contains(digit), "vehicle {} missing from map", digit);
    }
}
