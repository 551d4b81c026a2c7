//! Real Toronto locations for realistic test fixtures.
//!
//! Coordinates are approximate street-level positions of well-known places.

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    #[allow(dead_code)]
    pub fn coords(&self) -> (f64, f64) {
        (self.lat, self.lng)
    }
}

// ============================================================================
// Offices (good for shift start locations)
// ============================================================================

pub const OFFICES: &[Location] = &[
    Location::new("Union Station", 43.6453, -79.3806),
    Location::new("Toronto City Hall", 43.6534, -79.3841),
    Location::new("North York Centre", 43.7685, -79.4129),
    Location::new("Etobicoke Civic Centre", 43.6447, -79.5252),
];

// ============================================================================
// Downtown Core
// ============================================================================

pub const DOWNTOWN: &[Location] = &[
    Location::new("CN Tower", 43.6426, -79.3871),
    Location::new("St. Lawrence Market", 43.6487, -79.3716),
    Location::new("Distillery District", 43.6503, -79.3596),
    Location::new("Kensington Market", 43.6547, -79.4005),
    Location::new("Eaton Centre", 43.6544, -79.3807),
    Location::new("Liberty Village", 43.6376, -79.4200),
    Location::new("Royal Ontario Museum", 43.6677, -79.3948),
];

// ============================================================================
// Midtown / East End
// ============================================================================

pub const EAST_END: &[Location] = &[
    Location::new("Casa Loma", 43.6780, -79.4094),
    Location::new("Evergreen Brick Works", 43.6846, -79.3652),
    Location::new("Danforth and Pape", 43.6797, -79.3447),
    Location::new("Leslieville", 43.6627, -79.3330),
    Location::new("The Beaches", 43.6680, -79.3110),
    Location::new("Don Mills Centre", 43.7359, -79.3433),
];

// ============================================================================
// Suburbs
// ============================================================================

pub const SUBURBS: &[Location] = &[
    Location::new("Yorkdale Shopping Centre", 43.7255, -79.4522),
    Location::new("Downsview Park", 43.7426, -79.4787),
    Location::new("Fairview Mall", 43.7778, -79.3446),
    Location::new("Scarborough Town Centre", 43.7757, -79.2578),
    Location::new("Toronto Zoo", 43.8177, -79.1859),
    Location::new("Sherway Gardens", 43.6117, -79.5573),
    Location::new("High Park", 43.6465, -79.4637),
    Location::new("Bloor West Village", 43.6500, -79.4840),
];

/// Returns all stop locations (offices excluded) as a single list.
pub fn all_locations() -> Vec<Location> {
    let mut all = Vec::with_capacity(DOWNTOWN.len() + EAST_END.len() + SUBURBS.len());
    all.extend_from_slice(DOWNTOWN);
    all.extend_from_slice(EAST_END);
    all.extend_from_slice(SUBURBS);
    all
}

/// Returns a subset of locations for smaller tests.
#[allow(dead_code)]
pub fn sample_locations(count: usize) -> Vec<Location> {
    all_locations().into_iter().take(count).collect()
}
