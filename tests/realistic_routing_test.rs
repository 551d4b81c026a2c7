//! Realistic routing tests using real Toronto locations.
//!
//! These tests run the full pipeline over city-scale stop pools with great-circle
//! travel times and rush-hour congestion.

mod fixtures;

use std::collections::HashSet;

use route_planner::haversine::travel_minutes;
use route_planner::planner::{PlanRequest, PlanResult, UnroutedReason, generate_route_plan};
use route_planner::{Constraints, EngineConfig, StartPoint, Stop, Weights};

use fixtures::{DOWNTOWN, EAST_END, Location, OFFICES, SUBURBS, TestStop, at};

// ============================================================================
// Test Infrastructure
// ============================================================================

fn start_at(location: &Location) -> StartPoint {
    StartPoint::new(location.lat, location.lng)
}

fn day_request(stops: Vec<Stop>, start: &Location) -> PlanRequest {
    PlanRequest {
        stops,
        start_point: start_at(start),
        constraints: Constraints {
            shift_start_minutes: at(8, 0),
            shift_end_minutes: at(17, 30),
            max_stops: 10,
            ..Constraints::default()
        },
        weights: Weights::default(),
        config: EngineConfig {
            max_optimization_time_ms: 30_000,
            max_iterations: 2,
            ..EngineConfig::default()
        },
    }
}

/// Leads spread over the city with varied priority, recency and deal value.
fn lead_pool() -> Vec<Stop> {
    fixtures::all_locations()
        .iter()
        .enumerate()
        .map(|(i, location)| {
            TestStop::at(&format!("lead-{}", i), location)
                .priority((i % 5 + 1) as u8)
                .last_touched((i * 7 % 60) as f64)
                .deal((i * 1_000 % 9_000) as f64, 9_000.0)
                .duration(25 + (i as i32 % 3) * 10)
                .build()
        })
        .collect()
}

fn assert_well_formed(result: &PlanResult, request: &PlanRequest) {
    assert!(result.success, "plan failed: {:?}", result.error);

    let ids: HashSet<&str> = result.stop_ids().into_iter().collect();
    assert_eq!(ids.len(), result.route.len(), "a stop was planned twice");

    let lunch_start = request.constraints.lunch_break_start;
    let lunch_end = request.constraints.lunch_break_start + request.constraints.lunch_break_duration;
    let mut previous_end = request.constraints.shift_start_minutes;

    for planned in &result.route {
        let schedule = &planned.schedule;
        assert!(schedule.arrival_time_minutes >= previous_end);
        assert!(schedule.planned_start_minutes >= schedule.arrival_time_minutes);
        if schedule.arrival_time_minutes >= lunch_start && schedule.arrival_time_minutes < lunch_end {
            assert!(
                schedule.planned_start_minutes >= lunch_end,
                "{} starts during lunch",
                planned.stop.id
            );
        }
        previous_end = schedule.planned_end_minutes;
    }

    assert_eq!(
        result.stats.total_stops + result.diagnostics.unrouted_stops.len() + result.stats.excluded_stops,
        result.diagnostics.candidate_pool_size
    );
    assert!(result.stats.objective <= result.diagnostics.initial_objective);
}

// ============================================================================
// Full Day Scenarios
// ============================================================================

#[test]
fn test_downtown_day_from_union_station() {
    let stops: Vec<Stop> = DOWNTOWN
        .iter()
        .enumerate()
        .map(|(i, location)| TestStop::at(&format!("dt-{}", i), location).build())
        .collect();
    let request = day_request(stops, &OFFICES[0]);

    let result = generate_route_plan(&request);

    assert_well_formed(&result, &request);
    assert_eq!(result.route.len(), DOWNTOWN.len());
    assert!(result.diagnostics.feasibility.feasible);
    // downtown hops are short even in rush hour
    assert!(result.stats.route.total_travel_minutes < 90);
}

#[test]
fn test_lead_pool_respects_max_stops() {
    let request = day_request(lead_pool(), &OFFICES[1]);

    let result = generate_route_plan(&request);

    assert_well_formed(&result, &request);
    assert_eq!(result.route.len(), request.constraints.max_stops);
    let not_selected = result
        .diagnostics
        .unrouted_stops
        .iter()
        .filter(|u| u.reason == UnroutedReason::NotSelected)
        .count();
    assert_eq!(not_selected, fixtures::all_locations().len() - request.constraints.max_stops);
}

#[test]
fn test_appointments_kept_in_their_windows() {
    let mut stops = lead_pool();
    stops.push(
        TestStop::at("appt-casa-loma", &EAST_END[0])
            .must_visit()
            .window(at(9, 30), at(10, 30))
            .duration(45)
            .build(),
    );
    stops.push(
        TestStop::at("appt-high-park", &SUBURBS[6])
            .must_visit()
            .window(at(14, 0), at(15, 0))
            .duration(60)
            .build(),
    );
    let mut request = day_request(stops, &OFFICES[1]);
    request.constraints.max_stops = 6;

    let result = generate_route_plan(&request);

    assert_well_formed(&result, &request);
    assert_eq!(result.route.len(), 6);
    for (id, open, close) in [
        ("appt-casa-loma", at(9, 30), at(10, 30)),
        ("appt-high-park", at(14, 0), at(15, 0)),
    ] {
        let planned = result
            .route
            .iter()
            .find(|p| p.stop.id == id)
            .unwrap_or_else(|| panic!("{} should be planned", id));
        assert!(
            planned.schedule.planned_start_minutes >= open && planned.schedule.planned_start_minutes <= close,
            "{} planned at {} outside [{}, {}]",
            id,
            planned.schedule.planned_start_minutes,
            open,
            close
        );
    }
    assert_eq!(result.stats.route.total_lateness, 0);
}

#[test]
fn test_excluded_leads_never_routed() {
    let mut stops = lead_pool();
    stops[0].do_not_contact = Some(true);
    stops[1].routing_eligible = Some(false);
    stops[2].latitude = None;
    let request = day_request(stops, &OFFICES[0]);

    let result = generate_route_plan(&request);

    assert_well_formed(&result, &request);
    let planned: HashSet<&str> = result.stop_ids().into_iter().collect();
    for id in ["lead-0", "lead-1", "lead-2"] {
        assert!(!planned.contains(id), "{} should have been excluded", id);
    }
    assert_eq!(result.stats.excluded_stops, 3);
}

#[test]
fn test_rush_hour_start_uses_congested_matrix() {
    let from = &OFFICES[2];
    let to = &SUBURBS[3];
    let config = EngineConfig::default();

    let rush = travel_minutes(from.lat, from.lng, to.lat, to.lng, 8, &config);
    let midday = travel_minutes(from.lat, from.lng, to.lat, to.lng, 11, &config);
    assert!(rush > midday, "rush {} should exceed midday {}", rush, midday);

    let stops = vec![TestStop::at("a", &SUBURBS[2]).build(), TestStop::at("b", to).build()];
    let mut request = day_request(stops, from);
    request.constraints.shift_start_minutes = at(8, 15);

    let result = generate_route_plan(&request);
    assert_eq!(result.diagnostics.hour_of_day, 8);
}

#[test]
fn test_long_shift_overflow_is_penalized_not_fatal() {
    let stops: Vec<Stop> = fixtures::all_locations()
        .iter()
        .enumerate()
        .map(|(i, location)| TestStop::at(&format!("long-{}", i), location).duration(90).build())
        .collect();
    let request = day_request(stops, &OFFICES[3]);

    let result = generate_route_plan(&request);

    assert_well_formed(&result, &request);
    assert!(result.stats.route.overtime > 0);
    assert!(!result.diagnostics.feasibility.feasible);
    assert!(result.stats.route.feasibility_score < 1.0);
}
