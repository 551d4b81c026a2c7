//! Test fixtures for route-planner.
//!
//! Provides realistic test data including:
//! - Real Toronto locations for start points and stop pools
//! - A builder for stops with sensible defaults

pub mod toronto_locations;

pub use toronto_locations::*;

use route_planner::Stop;

/// Builder for test stops with sensible defaults.
#[derive(Clone, Debug)]
pub struct TestStop(Stop);

#[allow(dead_code)]
impl TestStop {
    pub fn new(id: &str) -> Self {
        Self(Stop::new(id, 43.65, -79.38))
    }

    pub fn at(id: &str, location: &Location) -> Self {
        Self(Stop::new(id, location.lat, location.lng))
    }

    pub fn location(mut self, lat: f64, lng: f64) -> Self {
        self.0.latitude = Some(lat);
        self.0.longitude = Some(lng);
        self
    }

    pub fn no_coordinates(mut self) -> Self {
        self.0.latitude = None;
        self.0.longitude = None;
        self
    }

    pub fn must_visit(mut self) -> Self {
        self.0.must_visit = Some(true);
        self
    }

    pub fn do_not_contact(mut self) -> Self {
        self.0.do_not_contact = Some(true);
        self
    }

    pub fn not_routable(mut self) -> Self {
        self.0.routing_eligible = Some(false);
        self
    }

    pub fn priority(mut self, priority: u8) -> Self {
        self.0.priority = Some(priority);
        self
    }

    pub fn window(mut self, start: i32, end: i32) -> Self {
        self.0.time_window_start_minutes = Some(start);
        self.0.time_window_end_minutes = Some(end);
        self
    }

    pub fn duration(mut self, minutes: i32) -> Self {
        self.0.service_duration_minutes = Some(minutes);
        self
    }

    pub fn last_touched(mut self, days: f64) -> Self {
        self.0.days_since_last_touch = Some(days);
        self
    }

    pub fn deal(mut self, value: f64, max_value: f64) -> Self {
        self.0.deal_value = Some(value);
        self.0.max_deal_value = Some(max_value);
        self
    }

    pub fn build(self) -> Stop {
        self.0
    }
}

/// Minutes since midnight for `h:m`.
#[allow(dead_code)]
pub fn at(h: i32, m: i32) -> i32 {
    h * 60 + m
}
